use std::sync::Arc;

use super::breakend::parse_locus;
use super::{Locus, Position, RecordError, SvType, VariantRecord};

/// Column holding the first breakpoint's anchored end.
pub const C1_ANCHOR: usize = 0;
/// Column holding the first breakpoint's realigned end.
pub const C1_REALIGN: usize = 2;
/// Column holding the second breakpoint's anchored end.
pub const C2_ANCHOR: usize = 12;
/// Column holding the second breakpoint's realigned end.
pub const C2_REALIGN: usize = 14;
/// Fields a row needs before the positional schema can be read.
pub const TABULAR_MIN_FIELDS: usize = C2_REALIGN + 1;

/// One row of a Socrates-style paired breakpoint table.
///
/// Each side of the rearrangement carries an anchor and a realigned
/// `chrom:pos` locus. Annotations are appended as trailing `key=value`
/// columns.
#[derive(Debug, Clone, PartialEq)]
pub struct TabularRecord {
    fields: Vec<String>,
    columns: Arc<[String]>,
    annotations: Vec<(String, String)>,
    c1_anchor: Locus,
    c1_realign: Locus,
    c2_anchor: Locus,
    c2_realign: Locus,
}

impl TabularRecord {
    /// Parse a tab-separated row. `columns` is the header row, used for
    /// attribute lookups by name.
    pub fn parse(line: &str, columns: Arc<[String]>) -> Result<Self, RecordError> {
        let fields: Vec<String> = line.split('\t').map(str::to_string).collect();
        if fields.len() < TABULAR_MIN_FIELDS {
            return Err(RecordError::TooFewFields {
                found: fields.len(),
                expected: TABULAR_MIN_FIELDS,
                line: line.to_string(),
            });
        }

        Ok(Self {
            c1_anchor: parse_locus(&fields[C1_ANCHOR])?,
            c1_realign: parse_locus(&fields[C1_REALIGN])?,
            c2_anchor: parse_locus(&fields[C2_ANCHOR])?,
            c2_realign: parse_locus(&fields[C2_REALIGN])?,
            fields,
            columns,
            annotations: Vec::new(),
        })
    }

    /// Serialise the row, followed by any annotation columns (no newline).
    pub fn to_line(&self) -> String {
        let mut line = self.fields.join("\t");
        for (key, value) in &self.annotations {
            line.push('\t');
            line.push_str(key);
            line.push('=');
            line.push_str(value);
        }
        line
    }

    /// Annotations set on this row, in the order they were first set.
    pub fn annotations(&self) -> &[(String, String)] {
        &self.annotations
    }
}

impl VariantRecord for TabularRecord {
    fn structural_type(&self) -> Option<SvType> {
        Some(SvType::Bnd)
    }

    fn primary_locus(&self) -> Locus {
        self.c1_anchor.clone()
    }

    fn end_position(&self) -> Option<Position> {
        None
    }

    fn breakend_remote_loci(&self) -> Vec<Locus> {
        vec![self.c1_realign.clone(), self.c2_realign.clone()]
    }

    fn breakend_junctions(&self) -> Vec<(Locus, Locus)> {
        vec![
            (self.c1_anchor.clone(), self.c1_realign.clone()),
            (self.c2_anchor.clone(), self.c2_realign.clone()),
        ]
    }

    fn attribute(&self, key: &str) -> Option<&str> {
        if let Some((_, value)) = self.annotations.iter().find(|(k, _)| k == key) {
            return Some(value);
        }
        self.columns
            .iter()
            .position(|column| column == key)
            .and_then(|index| self.fields.get(index))
            .map(String::as_str)
    }

    fn set_annotation(&mut self, key: &str, value: &str) {
        match self.annotations.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.annotations.push((key.to_string(), value.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(c1: (&str, &str), c2: (&str, &str)) -> String {
        let mut fields = vec!["x".to_string(); TABULAR_MIN_FIELDS + 2];
        fields[C1_ANCHOR] = c1.0.to_string();
        fields[C1_REALIGN] = c1.1.to_string();
        fields[C2_ANCHOR] = c2.0.to_string();
        fields[C2_REALIGN] = c2.1.to_string();
        fields[3] = "7".to_string();
        fields.join("\t")
    }

    fn columns() -> Arc<[String]> {
        (0..TABULAR_MIN_FIELDS + 2)
            .map(|i| match i {
                3 => "C1_long_support".to_string(),
                i => format!("col{i}"),
            })
            .collect()
    }

    #[test]
    fn reads_both_breakpoint_sides() {
        let line = row(("chr1:100", "chr2:900"), ("chr2:901", "chr1:101"));
        let record = TabularRecord::parse(&line, columns()).unwrap();
        assert_eq!(record.primary_locus(), Locus::new("chr1", 100));
        assert_eq!(record.structural_type(), Some(SvType::Bnd));
        assert_eq!(
            record.breakend_junctions(),
            vec![
                (Locus::new("chr1", 100), Locus::new("chr2", 900)),
                (Locus::new("chr2", 901), Locus::new("chr1", 101)),
            ]
        );
        assert_eq!(record.attribute("C1_long_support"), Some("7"));
        assert_eq!(record.to_line(), line);
    }

    #[test]
    fn short_row_is_fatal() {
        let err = TabularRecord::parse("chr1:1\t+\tchr2:5", columns()).unwrap_err();
        assert!(matches!(
            err,
            RecordError::TooFewFields { found: 3, expected: TABULAR_MIN_FIELDS, .. }
        ));
    }

    #[test]
    fn malformed_locus_is_fatal() {
        let line = row(("chr1100", "chr2:900"), ("chr2:901", "chr1:101"));
        assert!(matches!(
            TabularRecord::parse(&line, columns()),
            Err(RecordError::MalformedBreakend(text)) if text == "chr1100"
        ));
    }

    #[test]
    fn annotations_become_trailing_columns() {
        let line = row(("chr1:100", "chr1:300"), ("chr1:301", "chr1:101"));
        let mut record = TabularRecord::parse(&line, columns()).unwrap();
        record.set_annotation("hits", "geneA");
        record.append_sample_tag("S1");
        assert_eq!(record.attribute("hits"), Some("geneA"));
        assert_eq!(
            record.annotations(),
            &[
                ("hits".to_string(), "geneA".to_string()),
                ("sample".to_string(), "S1".to_string()),
            ]
        );
        assert_eq!(record.to_line(), format!("{line}\thits=geneA\tsample=S1"));
    }
}
