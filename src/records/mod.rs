//! Variant record model.
//!
//! Two concrete formats, a structured VCF line and a positional
//! Socrates-style row, exposed through one capability trait
//! ([`VariantRecord`]) so the overlap engine is written once.

mod breakend;
mod reader;
mod record;
mod tabular;
mod types;
mod vcf;

pub use breakend::{parse_breakend_alt, parse_locus};
pub use reader::{Header, RecordReader, RecordWriter};
pub use record::{RecordError, SvRecord, VariantRecord, HITS_KEY, SAMPLE_KEY};
pub use tabular::{
    TabularRecord, C1_ANCHOR, C1_REALIGN, C2_ANCHOR, C2_REALIGN, TABULAR_MIN_FIELDS,
};
pub use types::{Locus, Position, Span, SvType};
pub use vcf::{VcfRecord, VCF_MIN_FIELDS};

/// Supported variant stream formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// VCF, one record per line, `SVTYPE`/`END` in INFO.
    Vcf,
    /// Socrates paired breakpoint table with one header row.
    Socrates,
}
