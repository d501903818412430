use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Genomic coordinate as written in the source files.
pub type Position = u64;

/// Single genomic location.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Locus {
    /// Chromosome/contig name (exact, case-sensitive).
    pub chrom: Arc<str>,
    /// Coordinate on the chromosome.
    pub pos: Position,
}

impl Locus {
    /// Construct a new locus.
    pub fn new(chrom: impl Into<Arc<str>>, pos: Position) -> Self {
        Self {
            chrom: chrom.into(),
            pos,
        }
    }
}

impl fmt::Display for Locus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chrom, self.pos)
    }
}

/// Closed query region `[start, end]` on one chromosome.
///
/// Construction always orders the endpoints, so `start <= end` holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Span {
    /// Chromosome/contig name.
    pub chrom: Arc<str>,
    /// Lower coordinate (inclusive).
    pub start: Position,
    /// Upper coordinate (inclusive).
    pub end: Position,
}

impl Span {
    /// Construct a span, treating `a` and `b` as an unordered pair.
    pub fn new(chrom: impl Into<Arc<str>>, a: Position, b: Position) -> Self {
        Self {
            chrom: chrom.into(),
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// Zero-width span at a single locus.
    pub fn point(locus: &Locus) -> Self {
        Self::new(Arc::clone(&locus.chrom), locus.pos, locus.pos)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chrom, self.start, self.end)
    }
}

/// Structural-variant type tag (`SVTYPE`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SvType {
    /// Breakend.
    Bnd,
    /// Deletion.
    Del,
    /// Insertion.
    Ins,
    /// Duplication.
    Dup,
    /// Inversion.
    Inv,
    /// Any other tag (`CNV`, `DUP:TANDEM`, ...); resolved like a same-chromosome variant.
    Other(String),
}

impl SvType {
    /// Whether the record is a breakend and needs remote-end analysis.
    pub fn is_breakend(&self) -> bool {
        matches!(self, SvType::Bnd)
    }

    /// Tag text as written in VCF INFO.
    pub fn as_str(&self) -> &str {
        match self {
            SvType::Bnd => "BND",
            SvType::Del => "DEL",
            SvType::Ins => "INS",
            SvType::Dup => "DUP",
            SvType::Inv => "INV",
            SvType::Other(tag) => tag,
        }
    }
}

impl From<&str> for SvType {
    fn from(tag: &str) -> Self {
        match tag {
            "BND" => SvType::Bnd,
            "DEL" => SvType::Del,
            "INS" => SvType::Ins,
            "DUP" => SvType::Dup,
            "INV" => SvType::Inv,
            other => SvType::Other(other.to_string()),
        }
    }
}

impl FromStr for SvType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SvType::from(s))
    }
}

impl fmt::Display for SvType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
