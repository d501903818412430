//! Custom record hooks run between the coordinate stage and sample tagging.

mod api;
mod examples;
mod registry;

pub use api::{HookError, HookStage, IdentityHook, RecordHook};
pub use examples::SupportFilter;
pub use registry::{HookInfo, HookRegistry};
