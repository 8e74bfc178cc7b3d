//! Progress reporting for export runs

/// Category label carried by every morph shape progress event
pub const MORPH_SHAPE_CATEGORY: &str = "morphshape";

/// One progress notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    pub category: &'static str,
    /// 1-based position among the qualifying records
    pub index: usize,
    pub total: usize,
    pub name: String,
}

/// Receives exporting-started and exporting-finished notifications
pub trait ExportEventListener {
    fn exporting(&mut self, event: &ProgressEvent);
    fn exported(&mut self, event: &ProgressEvent);
}

/// Listener that forwards events to `tracing`
#[derive(Debug, Default)]
pub struct TracingProgress;

impl ExportEventListener for TracingProgress {
    fn exporting(&mut self, event: &ProgressEvent) {
        crate::log_batch_processing!(event.index, event.total);
        tracing::info!(
            category = event.category,
            index = event.index,
            total = event.total,
            name = %event.name,
            "Exporting"
        );
    }

    fn exported(&mut self, event: &ProgressEvent) {
        tracing::debug!(
            category = event.category,
            index = event.index,
            total = event.total,
            name = %event.name,
            "Exported"
        );
    }
}
