//! Interpolation and easing curves
//!
//! Pure numeric helpers used to turn elapsed time into motion and colour:
//!
//! - [`lerp`] / [`lerp_color`]: linear interpolation of scalars and RGBA channels
//! - [`Gradient`]: evenly spaced multi-stop colour gradient
//! - [`ease_out_pow`] / [`ease_in_pow`]: power curves on `[0, 1]`

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::ConfigError;

/// Exponent of the stick tween curve
///
/// Much steeper than a textbook quint; the ghost covers almost the whole
/// distance within the first few frames after a change.
pub const STICK_TWEEN_POWER: f32 = 30.0;

/// Linear interpolation between `a` and `b`
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

/// Component-wise interpolation of all four channels (alpha included)
///
/// Channels are rounded to the nearest integer.
pub fn lerp_color(a: Rgba, b: Rgba, t: f32) -> Rgba {
    let channel = |x: u8, y: u8| lerp(x as f32, y as f32, t).round().clamp(0.0, 255.0) as u8;
    Rgba::rgba(
        channel(a.r, b.r),
        channel(a.g, b.g),
        channel(a.b, b.b),
        channel(a.a, b.a),
    )
}

/// Ease-out power curve: `1 - (1 - t)^power`
///
/// Fast start, slow finish. `t` is clamped to `[0, 1]`.
pub fn ease_out_pow(t: f32, power: f32) -> f32 {
    1.0 - (1.0 - t.clamp(0.0, 1.0)).powf(power)
}

/// Ease-in power curve: `t^power`
///
/// Slow start, fast finish. `t` is clamped to `[0, 1]`.
pub fn ease_in_pow(t: f32, power: f32) -> f32 {
    t.clamp(0.0, 1.0).powf(power)
}

/// Stick tween curve, `1 - (1 - t)^30`
pub fn ease_out_quint(t: f32) -> f32 {
    ease_out_pow(t, STICK_TWEEN_POWER)
}

/// Ordered colour stops, evenly spaced over `[0, 1]`
///
/// Always holds at least two stops.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "Vec<Rgba>", into = "Vec<Rgba>")]
pub struct Gradient {
    stops: Vec<Rgba>,
}

impl Gradient {
    pub fn new(stops: Vec<Rgba>) -> Result<Self, ConfigError> {
        if stops.len() < 2 {
            return Err(ConfigError::GradientTooShort(stops.len()));
        }
        Ok(Self { stops })
    }

    pub fn stops(&self) -> &[Rgba] {
        &self.stops
    }

    /// Sample the gradient at parametric position `t`
    ///
    /// `t <= 0` and `t >= 1` return the first and last stop exactly. Anything
    /// else finds the enclosing stop pair and interpolates within it.
    pub fn sample(&self, t: f32) -> Rgba {
        let last = self.stops.len() - 1;

        if t.is_nan() || t <= 0.0 {
            return self.stops[0];
        }
        if t >= 1.0 {
            return self.stops[last];
        }

        let spacing = 1.0 / last as f32;
        let index = ((t / spacing).floor() as usize).min(last - 1);
        let local_t = (t - index as f32 * spacing) / spacing;

        lerp_color(self.stops[index], self.stops[index + 1], local_t)
    }
}

impl Default for Gradient {
    /// Red to blue and back to red
    fn default() -> Self {
        Self {
            stops: vec![
                Rgba::rgb(255, 0, 0),
                Rgba::rgb(0, 0, 255),
                Rgba::rgb(255, 0, 0),
            ],
        }
    }
}

impl TryFrom<Vec<Rgba>> for Gradient {
    type Error = ConfigError;

    fn try_from(stops: Vec<Rgba>) -> Result<Self, Self::Error> {
        Gradient::new(stops)
    }
}

impl From<Gradient> for Vec<Rgba> {
    fn from(gradient: Gradient) -> Self {
        gradient.stops
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const A: Rgba = Rgba::rgba(200, 0, 100, 255);
    const B: Rgba = Rgba::rgba(0, 100, 50, 55);

    #[test]
    fn test_gradient_endpoints_are_exact() {
        let g = Gradient::default();
        assert_eq!(g.sample(0.0), Rgba::rgb(255, 0, 0));
        assert_eq!(g.sample(1.0), Rgba::rgb(255, 0, 0));
        assert_eq!(g.sample(0.5), Rgba::rgb(0, 0, 255));
    }

    #[test]
    fn test_two_stop_midpoint() {
        let g = Gradient::new(vec![A, B]).unwrap();
        assert_eq!(g.sample(0.5), Rgba::rgba(100, 50, 75, 155));
    }

    #[test]
    fn test_three_stop_quarter() {
        // 0.25 sits halfway between stop 0 and stop 1
        let g = Gradient::new(vec![
            Rgba::rgb(0, 0, 0),
            Rgba::rgb(200, 100, 0),
            Rgba::rgb(0, 0, 0),
        ])
        .unwrap();
        assert_eq!(g.sample(0.25), Rgba::rgb(100, 50, 0));
        assert_eq!(g.sample(0.75), Rgba::rgb(100, 50, 0));
    }

    #[test]
    fn test_out_of_range_clamps_to_ends() {
        let g = Gradient::new(vec![A, B]).unwrap();
        assert_eq!(g.sample(-3.0), A);
        assert_eq!(g.sample(7.0), B);
        assert_eq!(g.sample(f32::NAN), A);
    }

    #[test]
    fn test_gradient_needs_two_stops() {
        assert_eq!(
            Gradient::new(vec![A]),
            Err(ConfigError::GradientTooShort(1))
        );
        assert!(serde_yaml::from_str::<Gradient>("[\"#FF0000\"]").is_err());

        let g: Gradient = serde_yaml::from_str("[\"#FF0000\", [0, 0, 255]]").unwrap();
        assert_eq!(g.stops().len(), 2);
    }

    #[test]
    fn test_ease_out_quint_endpoints() {
        assert_eq!(ease_out_quint(0.0), 0.0);
        assert!((ease_out_quint(1.0) - 1.0).abs() < 1e-6);
        // Almost there after a tenth of the way
        assert!(ease_out_quint(0.1) > 0.95);
    }

    #[test]
    fn test_ease_in_out_are_complementary() {
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            let sum = ease_out_pow(t, 5.0) + ease_in_pow(1.0 - t, 5.0);
            assert!((sum - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(2.0, 4.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 4.0, 0.5), 3.0);
        assert_eq!(lerp(2.0, 4.0, 1.0), 4.0);
    }

    proptest! {
        #[test]
        fn prop_ease_out_quint_monotonic(a in 0.0f32..=1.0, b in 0.0f32..=1.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(ease_out_quint(lo) <= ease_out_quint(hi));
        }

        #[test]
        fn prop_ease_curves_stay_in_unit_range(t in -2.0f32..3.0, power in 1.0f32..40.0) {
            let out = ease_out_pow(t, power);
            let inn = ease_in_pow(t, power);
            prop_assert!((0.0..=1.0).contains(&out));
            prop_assert!((0.0..=1.0).contains(&inn));
        }

        #[test]
        fn prop_gradient_sample_between_neighbouring_stops(t in 0.0f32..=1.0) {
            let g = Gradient::new(vec![Rgba::rgb(0, 0, 0), Rgba::rgb(250, 250, 250)]).unwrap();
            let c = g.sample(t);
            prop_assert_eq!(c.r, c.g);
            prop_assert!((c.r as f32 - t * 250.0).abs() <= 1.0);
        }
    }
}
