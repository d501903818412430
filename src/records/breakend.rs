//! Breakend descriptor parsing.
//!
//! Remote ends are written either in VCF bracket notation (`G]17:198982]`,
//! `[chr2:321682[T`) or as bare `chrom:pos` tokens. The chromosome token is
//! everything before the last colon, so contigs such as `HLA-A*01:01:01:01`
//! survive intact.

use super::{Locus, Position, RecordError};

/// Parse a `chrom:pos` token.
pub fn parse_locus(text: &str) -> Result<Locus, RecordError> {
    let malformed = || RecordError::MalformedBreakend(text.to_string());
    let (chrom, pos) = text.rsplit_once(':').ok_or_else(malformed)?;
    if chrom.is_empty() || chrom.chars().any(char::is_whitespace) {
        return Err(malformed());
    }
    let pos: Position = pos.parse().map_err(|_| malformed())?;
    Ok(Locus::new(chrom, pos))
}

/// Parse one ALT allele of a breakend record into its remote end.
///
/// Returns `Ok(None)` for alleles that name no remote end: the missing
/// allele `.` and single breakends (`G.`, `.A`).
pub fn parse_breakend_alt(alt: &str) -> Result<Option<Locus>, RecordError> {
    if alt == "." {
        return Ok(None);
    }

    if let Some(open) = alt.find(|c: char| c == '[' || c == ']') {
        let bracket = alt[open..].chars().next().ok_or_else(|| malformed(alt))?;
        let rest = &alt[open + 1..];
        let close = rest.find(bracket).ok_or_else(|| malformed(alt))?;
        return parse_locus(&rest[..close])
            .map(Some)
            .map_err(|_| malformed(alt));
    }

    if alt.len() > 1 && (alt.starts_with('.') || alt.ends_with('.')) {
        return Ok(None);
    }

    parse_locus(alt).map(Some)
}

fn malformed(text: &str) -> RecordError {
    RecordError::MalformedBreakend(text.to_string())
}
