use crate::records::{Span, SvType, VariantRecord};

/// Genomic footprint of a record as a list of query spans.
///
/// * Non-breakend records (and breakends without any remote end) give one
///   span from the call position to `END`, or a point if there is no end.
/// * Each breakend junction with both ends on one chromosome gives a single
///   span covering the region between them.
/// * Each junction across chromosomes gives a point span at either end.
pub fn resolve_spans<R: VariantRecord + ?Sized>(record: &R) -> Vec<Span> {
    let is_breakend = record
        .structural_type()
        .as_ref()
        .is_some_and(SvType::is_breakend);

    if is_breakend {
        let junctions = record.breakend_junctions();
        if !junctions.is_empty() {
            let mut spans = Vec::with_capacity(junctions.len() * 2);
            for (near, remote) in junctions {
                if near.chrom == remote.chrom {
                    spans.push(Span::new(near.chrom, near.pos, remote.pos));
                } else {
                    spans.push(Span::point(&near));
                    spans.push(Span::point(&remote));
                }
            }
            return spans;
        }
    }

    let primary = record.primary_locus();
    let end = record.end_position().unwrap_or(primary.pos);
    vec![Span::new(primary.chrom, primary.pos, end)]
}
