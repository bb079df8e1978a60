//! Dirty region tracking for incremental rendering.
//!
//! Collects screen-space rectangles that need repainting between renders.

use crate::util::Rect;

/// Tracks dirty rectangles accumulated between renders.
#[derive(Debug, Default)]
pub struct DirtyTracker {
    regions: Vec<Rect>,
    force_full: bool,
}

impl DirtyTracker {
    /// Creates a new, empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the entire surface as dirty. Clears any accumulated rectangles.
    pub fn mark_full(&mut self) {
        self.force_full = true;
        self.regions.clear();
    }

    /// Adds a dirty rectangle if the tracker is not already full.
    pub fn mark_rect(&mut self, rect: Rect) {
        if !rect.is_valid() || self.force_full {
            return;
        }
        self.regions.push(rect);
    }

    /// Adds a dirty rectangle when present, full damage otherwise.
    pub fn mark_bounds(&mut self, rect: Option<Rect>) {
        match rect {
            Some(rect) => self.mark_rect(rect),
            None => self.mark_full(),
        }
    }

    pub fn is_full(&self) -> bool {
        self.force_full
    }

    pub fn is_clean(&self) -> bool {
        !self.force_full && self.regions.is_empty()
    }

    /// Drains the dirty regions gathered so far.
    ///
    /// When the full surface is marked, returns a single rectangle covering the
    /// entire surface; otherwise returns accumulated rectangles.
    pub fn take_regions(&mut self, width: i32, height: i32) -> Vec<Rect> {
        if self.force_full {
            self.force_full = false;
            self.regions.clear();
            return Rect::new(0, 0, width, height).into_iter().collect();
        }
        self.regions.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_rect_records_rectangles() {
        let mut tracker = DirtyTracker::new();
        tracker.mark_rect(Rect::new(0, 0, 10, 10).unwrap());
        tracker.mark_bounds(Rect::new(20, 20, 5, 5));
        assert!(!tracker.is_clean());

        let rects = tracker.take_regions(100, 100);
        assert_eq!(rects.len(), 2);
        assert!(tracker.is_clean());
    }

    #[test]
    fn mark_full_takes_precedence() {
        let mut tracker = DirtyTracker::new();
        tracker.mark_rect(Rect::new(5, 5, 10, 10).unwrap());
        tracker.mark_full();
        tracker.mark_rect(Rect::new(20, 20, 15, 15).unwrap());
        assert!(tracker.is_full());

        let rects = tracker.take_regions(200, 100);
        assert_eq!(rects, vec![Rect::new(0, 0, 200, 100).unwrap()]);
        assert!(tracker.is_clean());
    }

    #[test]
    fn missing_bounds_mark_everything() {
        let mut tracker = DirtyTracker::new();
        tracker.mark_bounds(None);
        assert!(tracker.is_full());
        assert!(tracker.take_regions(0, 0).is_empty());
    }
}
