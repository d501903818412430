use std::collections::HashMap;
use std::sync::Arc;

use crate::plugin::{HookError, IdentityHook, RecordHook, SupportFilter};

/// Metadata describing a registered hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookInfo {
    /// Hook name.
    pub name: String,
    /// Hook description.
    pub description: String,
}

/// Registry of custom hooks available to the command line.
#[derive(Default)]
pub struct HookRegistry {
    entries: HashMap<String, Arc<dyn RecordHook>>,
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookRegistry")
            .field("hooks", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl HookRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Registry holding the identity hook and the built-in filters.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(IdentityHook);
        registry.register(SupportFilter::default());
        registry
    }

    /// Register a hook and return a shared handle to it.
    pub fn register<H: RecordHook>(&mut self, hook: H) -> Arc<dyn RecordHook> {
        let hook: Arc<dyn RecordHook> = Arc::new(hook);
        self.entries
            .insert(hook.name().to_string(), Arc::clone(&hook));
        hook
    }

    /// Retrieve a hook by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn RecordHook>> {
        self.entries.get(name).map(Arc::clone)
    }

    /// Resolve the hook selected on the command line; `None` selects the
    /// identity hook.
    pub fn resolve(&self, name: Option<&str>) -> Result<Arc<dyn RecordHook>, HookError> {
        match name {
            None => Ok(self.get("identity").unwrap_or_else(|| Arc::new(IdentityHook))),
            Some(name) => self.get(name).ok_or_else(|| HookError::Unknown {
                name: name.to_string(),
                available: self
                    .list()
                    .into_iter()
                    .map(|info| info.name)
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }

    /// All registered hooks, sorted by name.
    pub fn list(&self) -> Vec<HookInfo> {
        let mut infos: Vec<HookInfo> = self
            .entries
            .iter()
            .map(|(name, hook)| HookInfo {
                name: name.clone(),
                description: hook.description().to_string(),
            })
            .collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        infos
    }
}
