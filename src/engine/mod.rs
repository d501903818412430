//! Coordinate-overlap engine: span resolution, the region filter/annotate
//! stage and the streaming three-stage pipeline.

mod coordinate;
mod pipeline;
mod resolver;

pub use coordinate::{render_hits, CoordinateStage, HitSet, MAX_LISTED_HITS};
pub use pipeline::{Pipeline, PipelineError, PipelineStats, RecordStage, SampleTagStage};
pub use resolver::resolve_spans;
