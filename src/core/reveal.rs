//! Scroll-triggered reveal bookkeeping
//!
//! Elements start hidden and move to their resting style the first time
//! they intersect the viewport. They are never hidden again.

use std::collections::HashSet;

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Fraction of the element that must be visible
    pub threshold: f64,
    /// Observer root margin; a negative bottom margin reveals a little later
    pub root_margin: String,
    /// Elements to reveal
    pub selector: String,
    /// Vertical offset, in pixels, elements start from
    pub start_offset_px: u32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_string(),
            selector: ".card, .service-card, .pricing-card, .testimonial-card, .contact-card, .trust-card"
                .to_string(),
            start_offset_px: 30,
        }
    }
}

/// Which observed elements have been revealed, by observation index.
#[derive(Debug, Default)]
pub struct RevealTracker {
    revealed: HashSet<usize>,
}

impl RevealTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one intersection entry. Returns `true` only the first time an
    /// element intersects, which is when its resting style is applied.
    pub fn on_intersection(&mut self, index: usize, is_intersecting: bool) -> bool {
        is_intersecting && self.revealed.insert(index)
    }

    #[cfg(test)]
    fn is_revealed(&self, index: usize) -> bool {
        self.revealed.contains(&index)
    }

    #[cfg(test)]
    fn revealed_count(&self) -> usize {
        self.revealed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal_once_per_element() {
        let mut tracker = RevealTracker::new();

        let mut applied = 0;
        for intersecting in [false, true, false, true, true, false, true] {
            if tracker.on_intersection(3, intersecting) {
                applied += 1;
            }
        }
        assert_eq!(applied, 1);
        assert!(tracker.is_revealed(3));
    }

    #[test]
    fn test_not_intersecting_does_not_reveal() {
        let mut tracker = RevealTracker::new();
        assert!(!tracker.on_intersection(0, false));
        assert!(!tracker.is_revealed(0));
    }

    #[test]
    fn test_elements_tracked_independently() {
        let mut tracker = RevealTracker::new();
        assert!(tracker.on_intersection(0, true));
        assert!(tracker.on_intersection(1, true));
        assert!(!tracker.on_intersection(0, true));
        assert_eq!(tracker.revealed_count(), 2);
    }

    #[test]
    fn test_default_observer_options() {
        let config = RevealConfig::default();
        assert_eq!(config.threshold, 0.1);
        assert!(config.root_margin.ends_with("-50px 0px"));
        assert!(config.selector.contains(".pricing-card"));
    }
}
