use crate::domain::{BookingRange, CalendarDate};
use anyhow::Result;
use log::warn;

/// Context provided to commit hooks
#[derive(Debug, Clone)]
pub struct CommitContext {
    /// Which widget committed, e.g. "picker" or "select"
    pub source: String,
    pub today: CalendarDate,
    /// Whether the engine started from a persisted booking
    pub seeded: bool,
}

/// Trait for plugins that respond to a committed check-in/check-out range
pub trait CommitHook: Send + Sync {
    /// Called after the user has confirmed a full range
    fn on_range_committed(&self, context: &CommitContext, range: &BookingRange) -> Result<()>;

    /// Human-readable name for this hook
    fn name(&self) -> &str;

    /// Whether this hook should be enabled by default
    fn enabled_by_default(&self) -> bool {
        true
    }
}

/// Registry for managing commit hooks
pub struct HookRegistry {
    hooks: Vec<Box<dyn CommitHook>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    /// Register a new commit hook
    pub fn register<H>(&mut self, hook: H)
    where
        H: CommitHook + 'static,
    {
        self.hooks.push(Box::new(hook));
    }

    /// Execute all registered hooks for a committed range.
    ///
    /// A failing hook is logged and skipped; the rest still run.
    pub fn execute_commit_hooks(&self, context: &CommitContext, range: &BookingRange) -> usize {
        let mut failures = 0;
        for hook in &self.hooks {
            if let Err(e) = hook.on_range_committed(context, range) {
                warn!("Hook '{}' failed: {:#}", hook.name(), e);
                failures += 1;
            }
        }
        failures
    }

    /// List all registered hooks
    pub fn list_hooks(&self) -> Vec<&str> {
        self.hooks.iter().map(|h| h.name()).collect()
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}
