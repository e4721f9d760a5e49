//! Frame cache and viewport memory.
//!
//! Keeps the transient-viewport rules out of the layout engine: a computed
//! cell size of zero (container not yet measured) falls back to the last
//! good value, and re-rendered frames are content-hashed so redundant
//! recomputation during rapid resizes never rewrites the terminal.

use blake3::Hash;

#[derive(Debug, Default)]
pub struct PlanCache {
    last_cell_size: Option<u16>,
    frame_hash: Option<Hash>,
}

impl PlanCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a freshly computed cell size against the cache.
    ///
    /// Non-zero sizes are remembered and returned as-is; a zero size means
    /// the viewport is unmeasured, so the last good value is returned
    /// instead. `None` until the first valid measurement arrives.
    pub fn resolve_cell_size(&mut self, computed: u16) -> Option<u16> {
        if computed > 0 {
            self.last_cell_size = Some(computed);
        }
        self.last_cell_size
    }

    /// Admit a rendered frame, reporting whether it differs from the last
    /// admitted one. Unchanged frames should be skipped by the caller.
    pub fn admit_frame(&mut self, frame: &str) -> bool {
        let hash = blake3::hash(frame.as_bytes());
        let changed = self.frame_hash.map(|h| h != hash).unwrap_or(true);
        if changed {
            self.frame_hash = Some(hash);
        }
        changed
    }

    /// Force the next frame through regardless of content.
    pub fn invalidate(&mut self) {
        self.frame_hash = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_cell_size_keeps_the_previous_value() {
        let mut cache = PlanCache::new();
        assert_eq!(cache.resolve_cell_size(0), None);
        assert_eq!(cache.resolve_cell_size(12), Some(12));
        assert_eq!(cache.resolve_cell_size(0), Some(12));
        assert_eq!(cache.resolve_cell_size(32), Some(32));
    }

    #[test]
    fn identical_frames_are_reported_clean() {
        let mut cache = PlanCache::new();
        assert!(cache.admit_frame("frame"));
        assert!(!cache.admit_frame("frame"));
        assert!(cache.admit_frame("other"));
    }

    #[test]
    fn invalidate_forces_a_redraw() {
        let mut cache = PlanCache::new();
        assert!(cache.admit_frame("frame"));
        cache.invalidate();
        assert!(cache.admit_frame("frame"));
    }
}
