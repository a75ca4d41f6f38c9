//! Drag-to-duration mapping

/// Scroll pixels per second of duration on the gauge
pub const DEFAULT_PIXELS_PER_SECOND: f64 = 200.0;

/// How drag/scroll positions turn into target durations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragPolicy {
    /// Position units per second of duration; always positive
    pub pixels_per_second: f64,
    /// Optional ceiling on the selectable duration, in seconds
    pub max_seconds: Option<f64>,
}

impl DragPolicy {
    /// Falls back to the default scale when `pixels_per_second` is not a
    /// positive finite number. A non-positive or non-finite ceiling is
    /// dropped.
    pub fn new(pixels_per_second: f64, max_seconds: Option<f64>) -> Self {
        let pixels_per_second = if pixels_per_second.is_finite() && pixels_per_second > 0.0 {
            pixels_per_second
        } else {
            DEFAULT_PIXELS_PER_SECOND
        };
        let max_seconds = max_seconds.filter(|max| max.is_finite() && *max > 0.0);

        Self {
            pixels_per_second,
            max_seconds,
        }
    }

    /// One hour ceiling at the default scale
    pub fn capped_at_one_hour() -> Self {
        Self::new(DEFAULT_PIXELS_PER_SECOND, Some(3600.0))
    }

    /// Seconds selected by an absolute scroll position, clamped to
    /// `[0, max_seconds]`. Positions too large to represent saturate at
    /// `f64::MAX` rather than overflowing to infinity.
    pub fn seconds_for_position(&self, position: f64) -> f64 {
        let seconds = (position / self.pixels_per_second).clamp(0.0, f64::MAX);
        match self.max_seconds {
            Some(max) => seconds.min(max),
            None => seconds,
        }
    }

    /// Scroll position that shows `seconds` on the gauge
    pub fn position_for_seconds(&self, seconds: f64) -> f64 {
        seconds * self.pixels_per_second
    }
}

impl Default for DragPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_PIXELS_PER_SECOND, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scale() {
        let policy = DragPolicy::default();
        assert_eq!(policy.seconds_for_position(200.0), 1.0);
        assert_eq!(policy.seconds_for_position(25_000.0), 125.0);
        assert_eq!(policy.seconds_for_position(-50.0), 0.0);
        assert_eq!(policy.position_for_seconds(1.5), 300.0);
    }

    #[test]
    fn test_ceiling_is_optional() {
        let uncapped = DragPolicy::default();
        assert_eq!(uncapped.seconds_for_position(1_000_000.0), 5_000.0);

        let capped = DragPolicy::capped_at_one_hour();
        assert_eq!(capped.seconds_for_position(1_000_000.0), 3_600.0);
        assert_eq!(capped.seconds_for_position(400.0), 2.0);
    }

    #[test]
    fn test_huge_positions_stay_finite() {
        let policy = DragPolicy::default();
        assert_eq!(policy.seconds_for_position(f64::INFINITY), f64::MAX);
        assert_eq!(policy.seconds_for_position(f64::MAX * 2.0), f64::MAX);
        assert!(policy.position_for_seconds(f64::MAX).is_infinite());
    }

    #[test]
    fn test_invalid_parameters_fall_back() {
        let policy = DragPolicy::new(0.0, Some(-1.0));
        assert_eq!(policy.pixels_per_second, DEFAULT_PIXELS_PER_SECOND);
        assert_eq!(policy.max_seconds, None);

        let policy = DragPolicy::new(f64::NAN, Some(f64::INFINITY));
        assert_eq!(policy.pixels_per_second, DEFAULT_PIXELS_PER_SECOND);
        assert_eq!(policy.max_seconds, None);
    }
}
