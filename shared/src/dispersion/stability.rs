//! Stability parameter tables
//!
//! Pure lookups mapping a Pasquill-Gifford class to the numeric spread
//! parameters of each model version. Less atmospheric stability means
//! more turbulent mixing, so A yields the widest, longest-reaching
//! footprint and F the narrowest.

use crate::models::StabilityClass;

/// Sigma-based spread parameters, paired with the `gaussian-v1` geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SigmaParams {
    /// Lateral spread coefficient.
    pub sigma_y: f64,
    /// Vertical spread coefficient. Unused by the 2-D footprint, retained
    /// for a future 3-D extension.
    pub sigma_z: f64,
    /// Plume length multiplier, 1.8 (very unstable) down to 0.6 (stable).
    pub spread_factor: f64,
}

/// Look up the `gaussian-v1` spread parameters for a stability class.
pub fn sigma_params(class: StabilityClass) -> SigmaParams {
    match class {
        StabilityClass::A => SigmaParams {
            sigma_y: 0.22,
            sigma_z: 0.20,
            spread_factor: 1.8,
        },
        StabilityClass::B => SigmaParams {
            sigma_y: 0.16,
            sigma_z: 0.12,
            spread_factor: 1.5,
        },
        StabilityClass::C => SigmaParams {
            sigma_y: 0.11,
            sigma_z: 0.08,
            spread_factor: 1.2,
        },
        StabilityClass::D => SigmaParams {
            sigma_y: 0.08,
            sigma_z: 0.06,
            spread_factor: 1.0,
        },
        StabilityClass::E => SigmaParams {
            sigma_y: 0.06,
            sigma_z: 0.03,
            spread_factor: 0.8,
        },
        StabilityClass::F => SigmaParams {
            sigma_y: 0.04,
            sigma_z: 0.016,
            spread_factor: 0.6,
        },
    }
}

/// Lateral spread as a fraction of plume length, paired with the
/// `plume-v2` exponential-decay geometry. 0.35 (very unstable) down to
/// 0.15 (stable).
pub fn spread_fraction(class: StabilityClass) -> f64 {
    match class {
        StabilityClass::A => 0.35,
        StabilityClass::B => 0.30,
        StabilityClass::C => 0.26,
        StabilityClass::D => 0.22,
        StabilityClass::E => 0.18,
        StabilityClass::F => 0.15,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_code_behaves_as_neutral() {
        let neutral = sigma_params(StabilityClass::D);
        assert_eq!(sigma_params(StabilityClass::from_code("X")), neutral);
        assert_eq!(
            spread_fraction(StabilityClass::from_code("?")),
            spread_fraction(StabilityClass::D)
        );
    }

    #[test]
    fn test_neutral_length_multiplier_is_one() {
        assert_eq!(sigma_params(StabilityClass::D).spread_factor, 1.0);
    }

    #[test]
    fn test_spread_factor_decreases_with_stability() {
        let classes = [
            StabilityClass::A,
            StabilityClass::B,
            StabilityClass::C,
            StabilityClass::D,
            StabilityClass::E,
            StabilityClass::F,
        ];
        for pair in classes.windows(2) {
            assert!(sigma_params(pair[0]).spread_factor > sigma_params(pair[1]).spread_factor);
            assert!(sigma_params(pair[0]).sigma_y > sigma_params(pair[1]).sigma_y);
            assert!(spread_fraction(pair[0]) > spread_fraction(pair[1]));
        }
    }

    #[test]
    fn test_spread_fraction_range() {
        assert_eq!(spread_fraction(StabilityClass::A), 0.35);
        assert_eq!(spread_fraction(StabilityClass::F), 0.15);
    }
}
