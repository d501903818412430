use thiserror::Error;

use super::{Locus, Position, SvType, TabularRecord, VcfRecord};

/// Annotation key carrying the comma-joined overlapping region names.
pub const HITS_KEY: &str = "hits";
/// Annotation key carrying the sample identifier.
pub const SAMPLE_KEY: &str = "sample";

/// Errors raised while reading a variant record.
#[derive(Debug, Error)]
pub enum RecordError {
    /// Breakend descriptor that is not `chromosome:integer`.
    #[error("malformed breakend coordinate: {0:?}")]
    MalformedBreakend(String),

    /// Row with fewer fields than the format requires.
    #[error("record has {found} fields, expected at least {expected}: {line:?}")]
    TooFewFields {
        /// Fields present in the row.
        found: usize,
        /// Minimum number of fields for the format.
        expected: usize,
        /// Offending row.
        line: String,
    },

    /// Call position that is not an integer.
    #[error("invalid position {0:?}")]
    InvalidPosition(String),

    /// `END` INFO value that is not an integer.
    #[error("invalid END value {0:?}")]
    InvalidEnd(String),

    /// Failure reading the underlying stream.
    #[error("failed to read variant stream: {0}")]
    Io(#[from] std::io::Error),
}

/// Capability set shared by every variant record format.
///
/// The resolver, coordinate stage and pipeline are written once against
/// this trait.
pub trait VariantRecord {
    /// Structural-variant type tag, if the record carries one.
    fn structural_type(&self) -> Option<SvType>;

    /// Call site of the variant.
    fn primary_locus(&self) -> Locus;

    /// Explicit end coordinate on the primary chromosome.
    fn end_position(&self) -> Option<Position>;

    /// Remote ends of a breakend record; empty for other records.
    fn breakend_remote_loci(&self) -> Vec<Locus>;

    /// `(near, remote)` pairs describing each junction.
    fn breakend_junctions(&self) -> Vec<(Locus, Locus)> {
        let primary = self.primary_locus();
        self.breakend_remote_loci()
            .into_iter()
            .map(|remote| (primary.clone(), remote))
            .collect()
    }

    /// Raw value of a named field, for hooks that inspect records.
    fn attribute(&self, key: &str) -> Option<&str>;

    /// Set (or replace) an annotation.
    fn set_annotation(&mut self, key: &str, value: &str);

    /// Tag the record with a sample identifier.
    fn append_sample_tag(&mut self, value: &str) {
        self.set_annotation(SAMPLE_KEY, value);
    }
}

/// Variant record in one of the supported input formats.
#[derive(Debug, Clone, PartialEq)]
pub enum SvRecord {
    /// Structured VCF record.
    Vcf(VcfRecord),
    /// Delimited Socrates-style row.
    Tabular(TabularRecord),
}

impl SvRecord {
    /// Serialise the record in its native representation (no newline).
    pub fn to_line(&self) -> String {
        match self {
            SvRecord::Vcf(record) => record.to_line(),
            SvRecord::Tabular(record) => record.to_line(),
        }
    }
}

impl SvRecord {
    fn as_dyn(&self) -> &dyn VariantRecord {
        match self {
            SvRecord::Vcf(record) => record,
            SvRecord::Tabular(record) => record,
        }
    }

    fn as_dyn_mut(&mut self) -> &mut dyn VariantRecord {
        match self {
            SvRecord::Vcf(record) => record,
            SvRecord::Tabular(record) => record,
        }
    }
}

impl VariantRecord for SvRecord {
    fn structural_type(&self) -> Option<SvType> {
        self.as_dyn().structural_type()
    }

    fn primary_locus(&self) -> Locus {
        self.as_dyn().primary_locus()
    }

    fn end_position(&self) -> Option<Position> {
        self.as_dyn().end_position()
    }

    fn breakend_remote_loci(&self) -> Vec<Locus> {
        self.as_dyn().breakend_remote_loci()
    }

    fn breakend_junctions(&self) -> Vec<(Locus, Locus)> {
        self.as_dyn().breakend_junctions()
    }

    fn attribute(&self, key: &str) -> Option<&str> {
        self.as_dyn().attribute(key)
    }

    fn set_annotation(&mut self, key: &str, value: &str) {
        self.as_dyn_mut().set_annotation(key, value)
    }

    fn append_sample_tag(&mut self, value: &str) {
        self.as_dyn_mut().append_sample_tag(value)
    }
}

impl From<VcfRecord> for SvRecord {
    fn from(record: VcfRecord) -> Self {
        SvRecord::Vcf(record)
    }
}

impl From<TabularRecord> for SvRecord {
    fn from(record: TabularRecord) -> Self {
        SvRecord::Tabular(record)
    }
}
