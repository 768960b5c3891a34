use std::time::Duration;

use serde_json::json;

use crate::logging::{LogEvent, LogFields, LogLevel};

/// Counters for drawing and resize activity.
#[derive(Debug, Default, Clone)]
pub struct RenderMetrics {
    redraws: u64,
    flushes: u64,
    cells_written: u64,
    boxes_placed: u64,
    resize_steps: u64,
    term_resizes: u64,
}

impl RenderMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_redraw(&mut self) {
        self.redraws = self.redraws.saturating_add(1);
    }

    pub fn record_flush(&mut self, cells: usize) {
        self.flushes = self.flushes.saturating_add(1);
        self.cells_written = self.cells_written.saturating_add(cells as u64);
    }

    pub fn record_box_placed(&mut self) {
        self.boxes_placed = self.boxes_placed.saturating_add(1);
    }

    pub fn record_resize_step(&mut self) {
        self.resize_steps = self.resize_steps.saturating_add(1);
    }

    pub fn record_term_resize(&mut self) {
        self.term_resizes = self.term_resizes.saturating_add(1);
    }

    pub fn snapshot(&self, uptime: Duration) -> MetricSnapshot {
        MetricSnapshot {
            uptime_ms: uptime.as_millis() as u64,
            redraws: self.redraws,
            flushes: self.flushes,
            cells_written: self.cells_written,
            boxes_placed: self.boxes_placed,
            resize_steps: self.resize_steps,
            term_resizes: self.term_resizes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub uptime_ms: u64,
    pub redraws: u64,
    pub flushes: u64,
    pub cells_written: u64,
    pub boxes_placed: u64,
    pub resize_steps: u64,
    pub term_resizes: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "render_metrics", self.as_fields())
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("uptime_ms".to_string(), json!(self.uptime_ms));
        map.insert("redraws".to_string(), json!(self.redraws));
        map.insert("flushes".to_string(), json!(self.flushes));
        map.insert("cells_written".to_string(), json!(self.cells_written));
        map.insert("boxes_placed".to_string(), json!(self.boxes_placed));
        map.insert("resize_steps".to_string(), json!(self.resize_steps));
        map.insert("term_resizes".to_string(), json!(self.term_resizes));
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reports_counters() {
        let mut metrics = RenderMetrics::new();
        metrics.record_redraw();
        metrics.record_flush(12);
        metrics.record_flush(3);
        metrics.record_resize_step();

        let snapshot = metrics.snapshot(Duration::from_millis(1500));
        assert_eq!(snapshot.flushes, 2);
        assert_eq!(snapshot.cells_written, 15);

        let event = snapshot.to_log_event("room::grid.metrics");
        assert_eq!(event.message, "render_metrics");
        assert_eq!(event.fields["uptime_ms"], 1500);
        assert_eq!(event.fields["resize_steps"], 1);
    }
}
