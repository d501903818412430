use thiserror::Error;
use tracing::debug;

use crate::plugin::HookError;
use crate::records::{RecordError, VariantRecord};
use crate::regions::RegionError;

/// Errors that stop a filtering run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Malformed variant record or unreadable variant stream.
    #[error(transparent)]
    Record(#[from] RecordError),

    /// Unreadable or malformed region file.
    #[error(transparent)]
    Region(#[from] RegionError),

    /// Custom hook could not be loaded or failed on a record.
    #[error(transparent)]
    Hook(#[from] HookError),

    /// Failure writing output.
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    /// Failure opening the variant stream.
    #[error("failed to open variant stream: {0}")]
    Htslib(#[from] rust_htslib::errors::Error),
}

/// One step of the pipeline: a record in, zero or more records out.
pub trait RecordStage<R> {
    /// Transform one record.
    fn process(&self, record: R) -> Result<Vec<R>, PipelineError>;
}

impl<R, F> RecordStage<R> for F
where
    F: Fn(R) -> Result<Vec<R>, PipelineError>,
{
    fn process(&self, record: R) -> Result<Vec<R>, PipelineError> {
        self(record)
    }
}

/// Third stage: tag every record with the sample identifier, if one is set.
#[derive(Debug, Clone, Default)]
pub struct SampleTagStage {
    sample: Option<String>,
}

impl SampleTagStage {
    /// Create the stage; `None` leaves records untouched.
    pub fn new(sample: Option<String>) -> Self {
        Self { sample }
    }
}

impl<R: VariantRecord> RecordStage<R> for SampleTagStage {
    fn process(&self, mut record: R) -> Result<Vec<R>, PipelineError> {
        if let Some(sample) = &self.sample {
            record.append_sample_tag(sample);
        }
        Ok(vec![record])
    }
}

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Records read from the input.
    pub records_in: usize,
    /// Records handed to the sink.
    pub records_out: usize,
}

/// Three-stage streaming pipeline.
///
/// Each input record is pushed depth-first through the stages: every output
/// of one stage is carried all the way to the sink before the next output of
/// that stage is processed, so output order refines input order.
#[derive(Debug, Clone)]
pub struct Pipeline<S1, S2, S3> {
    first: S1,
    second: S2,
    third: S3,
}

impl<S1, S2, S3> Pipeline<S1, S2, S3> {
    /// Assemble a pipeline from its stages.
    pub fn new(first: S1, second: S2, third: S3) -> Self {
        Self {
            first,
            second,
            third,
        }
    }

    /// Stream `records` through the stages into `sink`.
    ///
    /// Stops at the first error from the input, a stage or the sink. Records
    /// already passed to the sink stay written.
    pub fn run<R, I, E, K>(&self, records: I, mut sink: K) -> Result<PipelineStats, PipelineError>
    where
        S1: RecordStage<R>,
        S2: RecordStage<R>,
        S3: RecordStage<R>,
        I: IntoIterator<Item = Result<R, E>>,
        PipelineError: From<E>,
        K: FnMut(R) -> Result<(), PipelineError>,
    {
        let mut stats = PipelineStats::default();

        for record in records {
            let record = record?;
            stats.records_in += 1;
            for first in self.first.process(record)? {
                for second in self.second.process(first)? {
                    for third in self.third.process(second)? {
                        sink(third)?;
                        stats.records_out += 1;
                    }
                }
            }
        }

        debug!(
            records_in = stats.records_in,
            records_out = stats.records_out,
            "pipeline finished"
        );
        Ok(stats)
    }
}
