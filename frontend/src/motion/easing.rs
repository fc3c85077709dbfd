use serde::{Deserialize, Serialize};

/// Easing curves mapping elapsed fraction to value fraction.
/// Every curve is monotone on [0, 1] and pins both endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    #[serde(alias = "ease-out")]
    CubicOut,
    #[serde(alias = "ease-in-out")]
    #[default]
    QuadInOut,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 1.0 };
        match self {
            Easing::Linear => t,
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }

    /// Parses the names accepted in `data-easing` attributes.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "linear" => Some(Easing::Linear),
            "cubic-out" | "ease-out" => Some(Easing::CubicOut),
            "ease-in-out" | "quad-in-out" => Some(Easing::QuadInOut),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ALL: [Easing; 3] = [Easing::Linear, Easing::CubicOut, Easing::QuadInOut];

    #[test]
    fn endpoints_are_pinned() {
        for easing in ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{:?} at 0", easing);
            assert_eq!(easing.apply(1.0), 1.0, "{:?} at 1", easing);
        }
    }

    #[test]
    fn curves_never_decrease() {
        for easing in ALL {
            let mut previous = easing.apply(0.0);
            for step in 1..=1000 {
                let current = easing.apply(step as f64 / 1000.0);
                assert!(
                    current >= previous,
                    "{:?} decreased at step {}: {} < {}",
                    easing,
                    step,
                    current,
                    previous
                );
                previous = current;
            }
        }
    }

    #[test]
    fn input_outside_unit_interval_is_clamped() {
        assert_eq!(Easing::CubicOut.apply(-3.0), 0.0);
        assert_eq!(Easing::QuadInOut.apply(7.5), 1.0);
        assert_eq!(Easing::Linear.apply(f64::NAN), 1.0);
    }

    #[test]
    fn ease_in_out_is_symmetric_around_midpoint() {
        assert_eq!(Easing::QuadInOut.apply(0.5), 0.5);
        let low = Easing::QuadInOut.apply(0.25);
        let high = Easing::QuadInOut.apply(0.75);
        assert!((low + high - 1.0).abs() < 1e-12);
    }

    #[test]
    fn names_from_markup() {
        assert_eq!(Easing::from_name("Ease-Out"), Some(Easing::CubicOut));
        assert_eq!(Easing::from_name(" ease-in-out "), Some(Easing::QuadInOut));
        assert_eq!(Easing::from_name("linear"), Some(Easing::Linear));
        assert_eq!(Easing::from_name("bounce"), None);
    }

    #[test]
    fn config_names_deserialize() {
        let easing: Easing = serde_json::from_str("\"ease-out\"").unwrap();
        assert_eq!(easing, Easing::CubicOut);
        let easing: Easing = serde_json::from_str("\"quad-in-out\"").unwrap();
        assert_eq!(easing, Easing::QuadInOut);
        assert_eq!(Easing::default(), Easing::QuadInOut);
    }
}
