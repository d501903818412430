use std::collections::HashSet;
use std::sync::Arc;

use tracing::trace;

use super::{resolve_spans, PipelineError, RecordStage};
use crate::records::{Span, VariantRecord, HITS_KEY};
use crate::regions::IntervalIndex;

/// Most region names written into a single `hits` annotation.
pub const MAX_LISTED_HITS: usize = 10_000;

/// Regions overlapped by a record across all of its spans.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HitSet {
    names: Vec<Arc<str>>,
    overlaps: usize,
}

impl HitSet {
    /// Query `index` with every span and merge the results.
    ///
    /// Names are deduplicated and kept in first-encounter order; the overlap
    /// count includes unnamed intervals and repeats across spans.
    pub fn collect(index: &IntervalIndex, spans: &[Span]) -> Self {
        let mut seen = HashSet::new();
        let mut hits = HitSet::default();
        for span in spans {
            for interval in index.overlapping(&span.chrom, span.start, span.end) {
                hits.overlaps += 1;
                if let Some(name) = &interval.name {
                    if seen.insert(Arc::clone(name)) {
                        hits.names.push(Arc::clone(name));
                    }
                }
            }
        }
        hits
    }

    /// Distinct overlapping region names.
    pub fn names(&self) -> &[Arc<str>] {
        &self.names
    }

    /// Number of overlapping intervals, named or not.
    pub fn overlap_count(&self) -> usize {
        self.overlaps
    }

    /// Whether nothing overlapped.
    pub fn is_empty(&self) -> bool {
        self.overlaps == 0
    }

    /// Annotation text, or `None` if no named region overlapped.
    pub fn annotation(&self) -> Option<String> {
        (!self.names.is_empty()).then(|| render_hits(&self.names))
    }
}

/// Comma-join region names, listing at most [`MAX_LISTED_HITS`] and
/// summarising the remainder as `+ N more`.
pub fn render_hits(names: &[Arc<str>]) -> String {
    let listed = names.len().min(MAX_LISTED_HITS);
    let mut text = names[..listed].join(",");
    if names.len() > listed {
        text.push_str(&format!(" + {} more", names.len() - listed));
    }
    text
}

/// First stage: filter and/or annotate records by region overlap.
///
/// Without an index the stage passes every record through untouched.
#[derive(Debug, Clone)]
pub struct CoordinateStage {
    index: Option<Arc<IntervalIndex>>,
    filter: bool,
    annotate: bool,
}

impl CoordinateStage {
    /// Create the stage. `index = None` means no region file was given.
    pub fn new(index: Option<Arc<IntervalIndex>>, filter: bool, annotate: bool) -> Self {
        Self {
            index,
            filter,
            annotate,
        }
    }

    /// Pass-through stage used when no region file is supplied.
    pub fn bypass() -> Self {
        Self::new(None, false, false)
    }

    /// Apply the stage to one record, returning zero or one records.
    pub fn apply<R: VariantRecord>(&self, mut record: R) -> Vec<R> {
        let Some(index) = &self.index else {
            return vec![record];
        };

        let spans = resolve_spans(&record);
        let hits = HitSet::collect(index, &spans);

        if self.filter && hits.is_empty() {
            trace!(locus = %record.primary_locus(), "no region overlap, record dropped");
            return Vec::new();
        }
        if self.annotate {
            if let Some(text) = hits.annotation() {
                record.set_annotation(HITS_KEY, &text);
            }
        }
        vec![record]
    }
}

impl<R: VariantRecord> RecordStage<R> for CoordinateStage {
    fn process(&self, record: R) -> Result<Vec<R>, PipelineError> {
        Ok(self.apply(record))
    }
}
