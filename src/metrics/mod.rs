use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;
use std::time::Duration;

/// Counters accumulated across a runtime session.
#[derive(Debug, Default, Clone)]
pub struct RollMetrics {
    throws: u64,
    layouts: u64,
    renders: u64,
    frames_skipped: u64,
    resizes: u64,
}

impl RollMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_throw(&mut self) {
        self.throws = self.throws.saturating_add(1);
    }

    pub fn record_layout(&mut self) {
        self.layouts = self.layouts.saturating_add(1);
    }

    pub fn record_render(&mut self) {
        self.renders = self.renders.saturating_add(1);
    }

    pub fn record_frame_skipped(&mut self) {
        self.frames_skipped = self.frames_skipped.saturating_add(1);
    }

    pub fn record_resize(&mut self) {
        self.resizes = self.resizes.saturating_add(1);
    }

    pub fn snapshot(&self, uptime: Duration) -> MetricSnapshot {
        MetricSnapshot {
            uptime_ms: uptime.as_millis() as u64,
            throws: self.throws,
            layouts: self.layouts,
            renders: self.renders,
            frames_skipped: self.frames_skipped,
            resizes: self.resizes,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MetricSnapshot {
    pub uptime_ms: u64,
    pub throws: u64,
    pub layouts: u64,
    pub renders: u64,
    pub frames_skipped: u64,
    pub resizes: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(
            LogLevel::Info,
            target.to_string(),
            "roll_metrics".to_string(),
            self.as_fields(),
        )
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("uptime_ms".to_string(), json!(self.uptime_ms));
        map.insert("throws".to_string(), json!(self.throws));
        map.insert("layouts".to_string(), json!(self.layouts));
        map.insert("renders".to_string(), json!(self.renders));
        map.insert("frames_skipped".to_string(), json!(self.frames_skipped));
        map.insert("resizes".to_string(), json!(self.resizes));
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_land_in_the_snapshot() {
        let mut metrics = RollMetrics::new();
        metrics.record_throw();
        metrics.record_layout();
        metrics.record_layout();
        metrics.record_render();
        metrics.record_frame_skipped();
        metrics.record_resize();

        let snapshot = metrics.snapshot(Duration::from_millis(1500));
        assert_eq!(snapshot.uptime_ms, 1500);
        assert_eq!(snapshot.throws, 1);
        assert_eq!(snapshot.layouts, 2);
        assert_eq!(snapshot.renders, 1);
        assert_eq!(snapshot.frames_skipped, 1);
        assert_eq!(snapshot.resizes, 1);

        let fields = snapshot.as_fields();
        assert_eq!(fields["layouts"], json!(2));
    }
}
