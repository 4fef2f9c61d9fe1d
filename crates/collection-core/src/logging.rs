//! Logging seam for conversions

/// Receives diagnostic messages produced while converting a document
pub trait ConversionLog: Send + Sync {
    fn debug(&self, message: &str);

    /// Non-fatal problems, such as a reference to an unknown security scheme
    fn warn(&self, message: &str);
}

/// Forwards conversion messages to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl ConversionLog for TracingLog {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "collection_core", "{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "collection_core", "{}", message);
    }
}
