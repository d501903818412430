use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use rust_htslib::bgzf;
use thiserror::Error;
use tracing::{debug, info};

use super::{Interval, IntervalIndex};
use crate::records::Position;

/// Errors raised while loading a region file.
#[derive(Debug, Error)]
pub enum RegionError {
    /// Start or end column that is not an integer.
    #[error("invalid coordinate {text:?} on line {line} of region file")]
    InvalidCoordinate {
        /// 1-based line number.
        line: usize,
        /// Offending column text.
        text: String,
    },

    /// Header-labelled table without a `name` column.
    #[error("region table header on line {line} has no name column")]
    MissingNameColumn {
        /// 1-based line number.
        line: usize,
    },

    /// Failure reading the region file.
    #[error("failed to read region file: {0}")]
    Io(#[from] std::io::Error),

    /// Failure opening a (possibly compressed) region file.
    #[error("failed to open region file: {0}")]
    Htslib(#[from] rust_htslib::errors::Error),
}

/// Column positions of a region row.
#[derive(Debug, Clone, Copy)]
struct Layout {
    chrom: usize,
    start: usize,
    end: usize,
    /// Name column; always present (and required) in a labelled table.
    name: Option<usize>,
    name_required: bool,
}

impl Layout {
    const FREE_FORM: Layout = Layout {
        chrom: 0,
        start: 1,
        end: 2,
        name: Some(3),
        name_required: false,
    };

    /// Recognise a header row labelling the `chrom`, `start` and `end`
    /// columns (any order, case-insensitive). A labelled table must also
    /// carry a `name` column.
    fn from_header(fields: &[&str], line: usize) -> Result<Option<Self>, RegionError> {
        let find = |label: &str| {
            fields
                .iter()
                .position(|field| field.eq_ignore_ascii_case(label))
        };
        let (Some(chrom), Some(start), Some(end)) = (find("chrom"), find("start"), find("end"))
        else {
            return Ok(None);
        };
        let name = find("name").ok_or(RegionError::MissingNameColumn { line })?;
        Ok(Some(Layout {
            chrom,
            start,
            end,
            name: Some(name),
            name_required: true,
        }))
    }

    fn min_fields(&self) -> usize {
        let required = self.chrom.max(self.start).max(self.end) + 1;
        match (self.name, self.name_required) {
            (Some(name), true) => required.max(name + 1),
            _ => required,
        }
    }
}

fn is_comment(line: &str) -> bool {
    line.starts_with('#') || line.starts_with("track") || line.starts_with("browser")
}

/// Build an [`IntervalIndex`] from region rows.
///
/// Rows are `chrom start end [name]` separated by whitespace, or a table
/// whose first row labels the `chrom`, `start`, `end` and `name` columns.
/// Rows too short for the layout are skipped; non-integer coordinates are
/// an error.
pub fn load_regions<R: BufRead>(reader: R) -> Result<IntervalIndex, RegionError> {
    let mut layout: Option<Layout> = None;
    let mut intervals: Vec<(Arc<str>, Interval)> = Vec::new();
    let mut skipped = 0usize;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || is_comment(trimmed) {
            continue;
        }
        let fields: Vec<&str> = trimmed.split_whitespace().collect();

        let current = match layout {
            Some(current) => current,
            None => {
                if let Some(header) = Layout::from_header(&fields, line_no)? {
                    debug!(line = line_no, "region file has a header row");
                    layout = Some(header);
                    continue;
                }
                layout = Some(Layout::FREE_FORM);
                Layout::FREE_FORM
            }
        };

        if fields.len() < current.min_fields() {
            debug!(line = line_no, fields = fields.len(), "skipping short region row");
            skipped += 1;
            continue;
        }

        let start = parse_coordinate(fields[current.start], line_no)?;
        let end = parse_coordinate(fields[current.end], line_no)?;
        let name = current
            .name
            .and_then(|column| fields.get(column))
            .map(|name| Arc::from(*name));
        intervals.push((Arc::from(fields[current.chrom]), Interval::new(start, end, name)));
    }

    let index = IntervalIndex::build(intervals);
    info!(
        intervals = index.len(),
        chromosomes = index.chromosome_count(),
        skipped,
        "built region index"
    );
    Ok(index)
}

/// Load a region file from disk; plain text and BGZF/gzip are both accepted.
pub fn load_regions_from_path<P: AsRef<Path>>(path: P) -> Result<IntervalIndex, RegionError> {
    let reader = bgzf::Reader::from_path(path.as_ref())?;
    load_regions(BufReader::new(reader))
}

fn parse_coordinate(text: &str, line: usize) -> Result<Position, RegionError> {
    text.parse().map_err(|_| RegionError::InvalidCoordinate {
        line,
        text: text.to_string(),
    })
}
