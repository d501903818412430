use crate::plugin::{HookError, RecordHook};
use crate::records::{SvRecord, VariantRecord};

/// Keeps records with strong read support.
///
/// Reads the `SU` (total), `PE` (paired-end) and `SR` (split-read) support
/// counts as written by LUMPY; list values use their first element. A record
/// must exceed every threshold. A missing or non-integer count fails the hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportFilter {
    /// Total support must exceed this.
    pub min_support: i64,
    /// Paired-end support must exceed this.
    pub min_paired_end: i64,
    /// Split-read support must exceed this.
    pub min_split_read: i64,
}

impl Default for SupportFilter {
    fn default() -> Self {
        Self {
            min_support: 10,
            min_paired_end: 5,
            min_split_read: 5,
        }
    }
}

impl SupportFilter {
    fn count(&self, record: &SvRecord, key: &str) -> Result<i64, HookError> {
        let value = record.attribute(key).ok_or_else(|| HookError::Failed {
            hook: self.name(),
            message: format!("{key} missing at {}", record.primary_locus()),
        })?;
        let first = value.split(',').next().unwrap_or(value);
        first.parse().map_err(|_| HookError::Failed {
            hook: self.name(),
            message: format!("{key}={value:?} is not an integer"),
        })
    }
}

impl RecordHook for SupportFilter {
    fn name(&self) -> &'static str {
        "support"
    }

    fn description(&self) -> &'static str {
        "Keep records with SU > 10, PE > 5 and SR > 5."
    }

    fn apply(&self, record: SvRecord) -> Result<Vec<SvRecord>, HookError> {
        let su = self.count(&record, "SU")?;
        let pe = self.count(&record, "PE")?;
        let sr = self.count(&record, "SR")?;
        let keep = su > self.min_support && pe > self.min_paired_end && sr > self.min_split_read;
        Ok(if keep { vec![record] } else { Vec::new() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::VcfRecord;
    use test_case::test_case;

    fn record(info: &str) -> SvRecord {
        VcfRecord::parse(&format!("chr1\t10\t.\tN\t<DEL>\t.\tPASS\tSVTYPE=DEL;{info}"))
            .unwrap()
            .into()
    }

    #[test_case("SU=11;PE=6;SR=6", 1 ; "all above")]
    #[test_case("SU=11,3;PE=6;SR=6", 1 ; "list values use first")]
    #[test_case("SU=10;PE=6;SR=6", 0 ; "support at threshold")]
    #[test_case("SU=20;PE=5;SR=9", 0 ; "paired end at threshold")]
    fn thresholds(info: &str, expected: usize) {
        let out = SupportFilter::default().apply(record(info)).unwrap();
        assert_eq!(out.len(), expected);
    }

    #[test]
    fn missing_count_fails() {
        let result = SupportFilter::default().apply(record("SU=20;PE=9"));
        match result {
            Err(HookError::Failed { hook, message }) => {
                assert_eq!(hook, "support");
                assert_eq!(message, "SR missing at chr1:10");
            }
            other => panic!("expected hook failure, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_counts_fail() {
        let result = SupportFilter::default().apply(record("SU=lots;PE=6;SR=6"));
        assert!(matches!(result, Err(HookError::Failed { hook: "support", .. })));
    }
}
