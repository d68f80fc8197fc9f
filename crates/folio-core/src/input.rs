#![forbid(unsafe_code)]

//! Keyboard and wheel input normalization.

use crate::chapter::Step;

/// Keys the router reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowLeft,
    ArrowRight,
}

impl NavKey {
    /// Map a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "Left" => Some(Self::ArrowLeft),
            "ArrowRight" | "Right" => Some(Self::ArrowRight),
            _ => None,
        }
    }

    /// Map a legacy `KeyboardEvent.keyCode` value.
    #[must_use]
    pub const fn from_key_code(code: u32) -> Option<Self> {
        match code {
            37 => Some(Self::ArrowLeft),
            39 => Some(Self::ArrowRight),
            _ => None,
        }
    }

    #[must_use]
    pub const fn step(self) -> Step {
        match self {
            Self::ArrowLeft => Step::Previous,
            Self::ArrowRight => Step::Next,
        }
    }
}

/// Scales wheel deltas for the sidebar and content panes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelScroll {
    factor: f64,
}

impl WheelScroll {
    #[must_use]
    pub const fn new(factor: f64) -> Self {
        Self { factor }
    }

    /// Vertical distance to scroll for a wheel event with `delta_y`.
    ///
    /// Non-finite deltas scroll nothing.
    #[must_use]
    pub fn scaled_delta(self, delta_y: f64) -> f64 {
        if delta_y.is_finite() {
            delta_y * self.factor
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_dom_keys() {
        assert_eq!(NavKey::from_dom_key("ArrowLeft"), Some(NavKey::ArrowLeft));
        assert_eq!(NavKey::from_dom_key("Right"), Some(NavKey::ArrowRight));
        assert_eq!(NavKey::from_dom_key("ArrowUp"), None);
        assert_eq!(NavKey::from_dom_key("a"), None);
    }

    #[test]
    fn maps_key_codes() {
        assert_eq!(NavKey::from_key_code(37), Some(NavKey::ArrowLeft));
        assert_eq!(NavKey::from_key_code(39), Some(NavKey::ArrowRight));
        assert_eq!(NavKey::from_key_code(38), None);
    }

    #[test]
    fn arrows_step_in_reading_order() {
        assert_eq!(NavKey::ArrowLeft.step(), Step::Previous);
        assert_eq!(NavKey::ArrowRight.step(), Step::Next);
    }

    #[test]
    fn wheel_delta_is_scaled() {
        let wheel = WheelScroll::new(0.6);
        assert!((wheel.scaled_delta(100.0) - 60.0).abs() < 1e-9);
        assert!((wheel.scaled_delta(-50.0) + 30.0).abs() < 1e-9);
        assert_eq!(wheel.scaled_delta(f64::NAN), 0.0);
        assert_eq!(wheel.scaled_delta(f64::INFINITY), 0.0);
    }
}
