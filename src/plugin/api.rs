use std::sync::Arc;

use thiserror::Error;

use crate::engine::{PipelineError, RecordStage};
use crate::records::SvRecord;

/// Errors raised while loading or running a custom hook.
#[derive(Debug, Error)]
pub enum HookError {
    /// No hook registered under the requested name.
    #[error("unknown custom filter {name:?} (available: {available})")]
    Unknown {
        /// Requested name.
        name: String,
        /// Comma-separated registered names.
        available: String,
    },

    /// Hook rejected a record it could not evaluate.
    #[error("custom filter {hook} failed: {message}")]
    Failed {
        /// Hook name.
        hook: &'static str,
        /// What went wrong.
        message: String,
    },
}

/// User-supplied record predicate/transform run after the coordinate stage.
///
/// Hooks are compiled into the binary and registered at startup, so only
/// trusted code runs here.
pub trait RecordHook: Send + Sync + 'static {
    /// Unique hook name, used to select it on the command line.
    fn name(&self) -> &'static str;

    /// Human-readable description.
    fn description(&self) -> &'static str;

    /// Map one record to zero or more records.
    fn apply(&self, record: SvRecord) -> Result<Vec<SvRecord>, HookError>;
}

/// Hook that emits every record unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityHook;

impl RecordHook for IdentityHook {
    fn name(&self) -> &'static str {
        "identity"
    }

    fn description(&self) -> &'static str {
        "Keep every record unchanged (default)."
    }

    fn apply(&self, record: SvRecord) -> Result<Vec<SvRecord>, HookError> {
        Ok(vec![record])
    }
}

/// Second pipeline stage adapting a [`RecordHook`].
#[derive(Clone)]
pub struct HookStage {
    hook: Arc<dyn RecordHook>,
}

impl HookStage {
    /// Wrap a hook.
    pub fn new(hook: Arc<dyn RecordHook>) -> Self {
        Self { hook }
    }

    /// Name of the wrapped hook.
    pub fn name(&self) -> &'static str {
        self.hook.name()
    }
}

impl std::fmt::Debug for HookStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookStage")
            .field("hook", &self.hook.name())
            .finish()
    }
}

impl RecordStage<SvRecord> for HookStage {
    fn process(&self, record: SvRecord) -> Result<Vec<SvRecord>, PipelineError> {
        Ok(self.hook.apply(record)?)
    }
}
