use crate::error::AppResult;

/// Destination for the run's named outputs. Each output is set once, and
/// only after the whole changelog resolved successfully.
pub trait OutputSink: Send + Sync {
    fn set_output(&self, name: &str, value: &str) -> AppResult<()>;
}
