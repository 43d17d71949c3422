//! Decorative effects: sparkles, click ripples and floating accents
//!
//! Only geometry and rate limiting live here; the DOM elements are created
//! by `ui::effects`. Randomness comes from a [`RandomSource`] so spawn rates
//! can be asserted without flakiness.

use serde::Deserialize;

/// Uniform random numbers in `[0, 1)`.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SparkleConfig {
    /// Minimum time between two scroll evaluations
    pub scroll_throttle_ms: f64,
    /// Scroll distance since the last spawn needed to spawn again
    pub scroll_min_delta_px: f64,
    /// Sparkle lifetime before removal
    pub lifetime_ms: u32,
    /// Period of the ambient sparkle timer
    pub ambient_interval_ms: u32,
    /// Probability that an ambient tick spawns a sparkle
    pub ambient_probability: f64,
    pub click_min_count: u32,
    pub click_max_count: u32,
    /// Width of the square around the click point sparkles land in
    pub click_spread_px: f64,
    /// Ripple removal delay, matching its CSS animation
    pub ripple_ms: u32,
}

impl Default for SparkleConfig {
    fn default() -> Self {
        Self {
            scroll_throttle_ms: 200.0,
            scroll_min_delta_px: 10.0,
            lifetime_ms: 2000,
            ambient_interval_ms: 3000,
            ambient_probability: 0.3,
            click_min_count: 3,
            click_max_count: 5,
            click_spread_px: 60.0,
            ripple_ms: 600,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Bounding box of an element, in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Leading-edge throttle over caller-supplied timestamps.
///
/// Timestamps are milliseconds from any monotonic source, usually
/// `performance.now()`.
#[derive(Debug, Clone)]
pub struct Throttle {
    last_fired: Option<f64>,
    interval_ms: f64,
}

impl Throttle {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            last_fired: None,
            interval_ms,
        }
    }

    pub fn should_fire(&self, now_ms: f64) -> bool {
        match self.last_fired {
            Some(last) => now_ms - last >= self.interval_ms,
            None => true,
        }
    }

    pub fn mark_fired(&mut self, now_ms: f64) {
        self.last_fired = Some(now_ms);
    }

    /// Fire if allowed, recording the fire time.
    pub fn try_fire(&mut self, now_ms: f64) -> bool {
        let fire = self.should_fire(now_ms);
        if fire {
            self.mark_fired(now_ms);
        }
        fire
    }
}

/// Decides when scrolling spawns a sparkle.
#[derive(Debug, Clone)]
pub struct ScrollSparkles {
    throttle: Throttle,
    last_spawn_y: f64,
    min_delta_px: f64,
}

impl ScrollSparkles {
    pub fn new(initial_scroll_y: f64, config: &SparkleConfig) -> Self {
        Self {
            throttle: Throttle::new(config.scroll_throttle_ms),
            last_spawn_y: initial_scroll_y,
            min_delta_px: config.scroll_min_delta_px,
        }
    }

    /// Feed a scroll event; returns `true` when a sparkle should spawn.
    ///
    /// Small movements accumulate until they exceed the threshold.
    pub fn on_scroll(&mut self, now_ms: f64, scroll_y: f64) -> bool {
        if !self.throttle.try_fire(now_ms) {
            return false;
        }
        if (scroll_y - self.last_spawn_y).abs() > self.min_delta_px {
            self.last_spawn_y = scroll_y;
            true
        } else {
            false
        }
    }
}

pub fn ambient_spawn(rng: &mut impl RandomSource, probability: f64) -> bool {
    rng.next_f64() < probability
}

/// Random position inside a `width` x `height` viewport.
pub fn random_point(rng: &mut impl RandomSource, width: f64, height: f64) -> Point {
    Point::new(rng.next_f64() * width, rng.next_f64() * height)
}

/// Sparkle positions scattered around a click.
pub fn click_burst(
    rng: &mut impl RandomSource,
    origin: Point,
    config: &SparkleConfig,
) -> Vec<Point> {
    let min = config.click_min_count.min(config.click_max_count);
    let span = (config.click_max_count - min).saturating_add(1);
    let extra = ((rng.next_f64() * f64::from(span)) as u32).min(span - 1);
    (0..min + extra)
        .map(|_| {
            let dx = (rng.next_f64() - 0.5) * config.click_spread_px;
            let dy = (rng.next_f64() - 0.5) * config.click_spread_px;
            Point::new(origin.x + dx, origin.y + dy)
        })
        .collect()
}

/// Placement of a click ripple inside its element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    pub size: f64,
    pub left: f64,
    pub top: f64,
}

impl Ripple {
    /// Center a circle the size of the element's larger side on the click.
    pub fn at(click: Point, rect: Rect) -> Self {
        let size = rect.width.max(rect.height);
        Self {
            size,
            left: click.x - rect.left - size / 2.0,
            top: click.y - rect.top - size / 2.0,
        }
    }
}

/// Every other accent element floats, starting with the first.
pub fn is_floating_accent(index: usize) -> bool {
    index % 2 == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    struct Seeded(StdRng);

    impl RandomSource for Seeded {
        fn next_f64(&mut self) -> f64 {
            self.0.r#gen::<f64>()
        }
    }

    struct Fixed(Vec<f64>, usize);

    impl RandomSource for Fixed {
        fn next_f64(&mut self) -> f64 {
            let value = self.0[self.1 % self.0.len()];
            self.1 += 1;
            value
        }
    }

    #[test]
    fn test_throttle_first_fire() {
        let mut throttle = Throttle::new(200.0);
        assert!(throttle.try_fire(0.0));
        assert!(!throttle.try_fire(199.0));
        assert!(throttle.try_fire(200.0));
    }

    #[test]
    fn test_throttle_mark_fired() {
        let mut throttle = Throttle::new(200.0);
        throttle.mark_fired(10.0);
        assert!(!throttle.should_fire(20.0));
        assert!(throttle.should_fire(210.0));
    }

    #[test]
    fn test_scroll_sparkle_needs_distance() {
        let mut sparkles = ScrollSparkles::new(0.0, &SparkleConfig::default());
        assert!(!sparkles.on_scroll(0.0, 5.0));
        assert!(!sparkles.on_scroll(250.0, 10.0));
        assert!(sparkles.on_scroll(500.0, 11.0));
    }

    #[test]
    fn test_scroll_sparkle_throttled() {
        let mut sparkles = ScrollSparkles::new(0.0, &SparkleConfig::default());
        assert!(sparkles.on_scroll(0.0, 100.0));
        assert!(!sparkles.on_scroll(50.0, 400.0));
        assert!(!sparkles.on_scroll(199.0, 800.0));
        assert!(sparkles.on_scroll(200.0, 800.0));
    }

    #[test]
    fn test_scroll_sparkle_rate_bound() {
        // continuous scrolling for 10s with an event every 16ms
        let mut sparkles = ScrollSparkles::new(0.0, &SparkleConfig::default());
        let spawned = (0..625)
            .filter(|i| {
                let t = f64::from(*i) * 16.0;
                sparkles.on_scroll(t, t * 2.0)
            })
            .count();
        assert!(spawned <= 50, "spawned {spawned}");
        assert!(spawned >= 40, "spawned {spawned}");
    }

    #[test]
    fn test_ambient_probability() {
        let mut rng = Seeded(StdRng::seed_from_u64(7));
        let hits = (0..10_000)
            .filter(|_| ambient_spawn(&mut rng, 0.3))
            .count();
        assert!((2_700..=3_300).contains(&hits), "hits {hits}");
    }

    #[test]
    fn test_random_point_in_viewport() {
        let mut rng = Seeded(StdRng::seed_from_u64(1));
        for _ in 0..500 {
            let p = random_point(&mut rng, 1280.0, 720.0);
            assert!((0.0..1280.0).contains(&p.x));
            assert!((0.0..720.0).contains(&p.y));
        }
    }

    #[test]
    fn test_click_burst_count_range() {
        let config = SparkleConfig::default();
        let mut rng = Seeded(StdRng::seed_from_u64(42));
        for _ in 0..500 {
            let burst = click_burst(&mut rng, Point::new(100.0, 100.0), &config);
            assert!((3..=5).contains(&burst.len()));
            for p in burst {
                assert!((p.x - 100.0).abs() <= 30.0);
                assert!((p.y - 100.0).abs() <= 30.0);
            }
        }
    }

    #[test]
    fn test_click_burst_extremes() {
        let config = SparkleConfig::default();
        let origin = Point::new(0.0, 0.0);
        assert_eq!(click_burst(&mut Fixed(vec![0.0], 0), origin, &config).len(), 3);
        assert_eq!(click_burst(&mut Fixed(vec![0.999], 0), origin, &config).len(), 5);
    }

    #[test]
    fn test_click_burst_unbounded_max_does_not_overflow() {
        let config = SparkleConfig {
            click_min_count: 2,
            click_max_count: u32::MAX,
            ..SparkleConfig::default()
        };
        let burst = click_burst(&mut Fixed(vec![0.0], 0), Point::new(0.0, 0.0), &config);
        assert_eq!(burst.len(), 2);

        let config = SparkleConfig {
            click_min_count: 0,
            ..config
        };
        assert!(click_burst(&mut Fixed(vec![0.0], 0), Point::new(0.0, 0.0), &config).is_empty());
    }

    #[test]
    fn test_ripple_geometry() {
        let rect = Rect {
            left: 100.0,
            top: 50.0,
            width: 200.0,
            height: 40.0,
        };
        let ripple = Ripple::at(Point::new(150.0, 70.0), rect);
        assert_eq!(ripple.size, 200.0);
        assert_eq!(ripple.left, -50.0);
        assert_eq!(ripple.top, -80.0);
    }

    #[test]
    fn test_floating_accents() {
        let floating: Vec<usize> = (0..6).filter(|i| is_floating_accent(*i)).collect();
        assert_eq!(floating, vec![0, 2, 4]);
    }
}
