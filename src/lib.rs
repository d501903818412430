//! # Structural-variant region filter
//!
//! Filters and annotates structural-variant records (deletions, insertions,
//! duplications, inversions and breakends) against a set of genomic regions
//! of interest.
//!
//! ## Pipeline
//!
//! 1. **Region index**: the region file is loaded once into a per-chromosome
//!    interval index ([`regions::IntervalIndex`]).
//! 2. **Coordinate stage**: each record is resolved to query spans (breakends
//!    across chromosomes give two points, within a chromosome one span) and
//!    filtered and/or annotated with the overlapping region names.
//! 3. **Custom hook**: a registered [`plugin::RecordHook`] maps each record to
//!    zero or more records.
//! 4. **Sample tag**: records are tagged with the sample identifier.
//!
//! Records stream through one at a time; output keeps the input format.
//!
//! ## Usage Example
//!
//! ```ignore
//! use svfilter::{FilterConfig, InputFormat, SvFilter};
//! use svfilter::plugin::HookRegistry;
//!
//! let config = FilterConfig::new(InputFormat::Vcf).with_regions("exons.tsv");
//! let filter = SvFilter::from_config(config, &HookRegistry::with_builtins())?;
//! let stats = filter.run_path("calls.vcf", std::io::stdout().lock())?;
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod engine; // Span resolution, coordinate stage, pipeline
pub mod plugin; // Custom record hooks
pub mod records; // Variant record model and I/O
pub mod regions; // Region file loading and interval index

pub use engine::{Pipeline, PipelineError, PipelineStats};
pub use records::{InputFormat, SvRecord, VariantRecord};
pub use regions::IntervalIndex;

use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rust_htslib::bgzf;
use tracing::info;

use engine::{CoordinateStage, SampleTagStage};
use plugin::{HookRegistry, HookStage, IdentityHook, RecordHook};
use records::{RecordReader, RecordWriter, HITS_KEY, SAMPLE_KEY};

/// Run parameters, as collected by the command line.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    /// Region file; `None` disables the coordinate stage.
    pub regions: Option<PathBuf>,
    /// Variant stream format.
    pub format: InputFormat,
    /// Drop records that overlap no region.
    pub filter: bool,
    /// Add the `hits` annotation to overlapping records.
    pub annotate: bool,
    /// Sample identifier added to every output record.
    pub sample: Option<String>,
    /// Name of a registered custom hook.
    pub custom: Option<String>,
}

impl FilterConfig {
    /// Configuration that filters and annotates, with no regions, hook or sample.
    pub fn new(format: InputFormat) -> Self {
        Self {
            regions: None,
            format,
            filter: true,
            annotate: true,
            sample: None,
            custom: None,
        }
    }

    /// Set the region file.
    pub fn with_regions(mut self, path: impl Into<PathBuf>) -> Self {
        self.regions = Some(path.into());
        self
    }

    /// Select filter and annotate behaviour.
    pub fn with_modes(mut self, filter: bool, annotate: bool) -> Self {
        self.filter = filter;
        self.annotate = annotate;
        self
    }

    /// Set the sample identifier.
    pub fn with_sample(mut self, sample: impl Into<String>) -> Self {
        self.sample = Some(sample.into());
        self
    }

    /// Select a custom hook by name.
    pub fn with_custom(mut self, name: impl Into<String>) -> Self {
        self.custom = Some(name.into());
        self
    }
}

/// Main filtering orchestrator.
///
/// Holds the read-only region index and the selected hook; each call to
/// [`SvFilter::run`] streams one variant file.
pub struct SvFilter {
    config: FilterConfig,
    index: Option<Arc<IntervalIndex>>,
    hook: Arc<dyn RecordHook>,
}

impl std::fmt::Debug for SvFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SvFilter")
            .field("config", &self.config)
            .field("index", &self.index)
            .field("hook", &self.hook.name())
            .finish()
    }
}

impl SvFilter {
    /// Create a filter from an already built index and hook.
    pub fn new(
        config: FilterConfig,
        index: Option<Arc<IntervalIndex>>,
        hook: Arc<dyn RecordHook>,
    ) -> Self {
        Self {
            config,
            index,
            hook,
        }
    }

    /// Load the region file and resolve the hook named in `config`.
    pub fn from_config(config: FilterConfig, registry: &HookRegistry) -> Result<Self, PipelineError> {
        let index = match &config.regions {
            Some(path) => {
                info!(path = %path.display(), "loading regions");
                Some(Arc::new(regions::load_regions_from_path(path)?))
            }
            None => None,
        };
        let hook = registry.resolve(config.custom.as_deref())?;
        Ok(Self::new(config, index, hook))
    }

    /// Filter with no regions and the identity hook.
    pub fn passthrough(config: FilterConfig) -> Self {
        Self::new(config, None, Arc::new(IdentityHook))
    }

    /// Run configuration.
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Stream the variant file at `path` (`-` for stdin; plain or
    /// BGZF-compressed) to `output`.
    pub fn run_path<P: AsRef<Path>, W: Write>(
        &self,
        path: P,
        output: W,
    ) -> Result<PipelineStats, PipelineError> {
        let path = path.as_ref();
        let reader = if path == Path::new("-") {
            bgzf::Reader::from_stdin()?
        } else {
            bgzf::Reader::from_path(path)?
        };
        self.run(BufReader::new(reader), output)
    }

    /// Stream variant records from `input` to `output`.
    pub fn run<R: BufRead, W: Write>(
        &self,
        input: R,
        output: W,
    ) -> Result<PipelineStats, PipelineError> {
        let mut reader = RecordReader::new(input, self.config.format)?;
        if self.config.format == InputFormat::Vcf {
            let header = reader.header_mut();
            if self.index.is_some() && self.config.annotate {
                header.declare_info(
                    HITS_KEY,
                    ".",
                    "String",
                    "Regions of interest overlapping the variant",
                );
            }
            if self.config.sample.is_some() {
                header.declare_info(SAMPLE_KEY, "1", "String", "Sample identifier");
            }
        }

        let mut writer = RecordWriter::new(output);
        writer.write_header(reader.header())?;

        let pipeline = Pipeline::new(
            CoordinateStage::new(self.index.clone(), self.config.filter, self.config.annotate),
            HookStage::new(Arc::clone(&self.hook)),
            SampleTagStage::new(self.config.sample.clone()),
        );
        let stats = pipeline.run(reader, |record: SvRecord| {
            writer.write_record(&record).map_err(PipelineError::from)
        })?;
        writer.flush()?;

        info!(
            records_in = stats.records_in,
            records_out = stats.records_out,
            hook = self.hook.name(),
            "finished filtering"
        );
        Ok(stats)
    }
}
