//! Symmetric breakpoints for comparison legends.

use crate::palette;
use regatlas_metrics::DeltaMode;

/// Number of steps on each side of zero.
const STEPS_PER_SIDE: i32 = 4;

/// Unit of the deltas being classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeltaScale {
    /// Differences of raw values
    Absolute,
    /// Differences in percent, clamped to ±100
    Relative,
    /// Differences of shares in percentage points, clamped to ±70
    SharePoints,
}

impl DeltaScale {
    /// Scale of a comparison on raw values.
    pub const fn from_mode(mode: DeltaMode) -> Self {
        match mode {
            DeltaMode::Absolute => Self::Absolute,
            DeltaMode::Relative => Self::Relative,
        }
    }

    /// Bound deltas are clamped to, if any.
    pub const fn clamp_bound(&self) -> Option<f64> {
        match self {
            Self::Absolute => None,
            Self::Relative => Some(100.0),
            Self::SharePoints => Some(70.0),
        }
    }

    /// Step between breakpoints for the largest absolute delta.
    pub fn step(&self, max_abs: f64) -> f64 {
        let table: &[(f64, f64)] = match self {
            Self::Absolute => &[(10.0, 1.0), (50.0, 5.0), (200.0, 20.0), (1000.0, 100.0)],
            Self::Relative => &[(10.0, 2.0), (30.0, 5.0), (70.0, 10.0)],
            Self::SharePoints => &[(5.0, 1.0), (15.0, 3.0), (30.0, 5.0), (50.0, 10.0)],
        };
        let last = match self {
            Self::Absolute => 500.0,
            Self::Relative => 20.0,
            Self::SharePoints => 15.0,
        };

        table
            .iter()
            .find(|(limit, _)| max_abs < *limit)
            .map_or(last, |(_, step)| *step)
    }

    /// Breakpoints used when no delta could be computed.
    pub const fn default_classes(&self) -> [f64; 9] {
        match self {
            Self::Absolute => [
                -1000.0, -500.0, -100.0, -50.0, 0.0, 50.0, 100.0, 500.0, 1000.0,
            ],
            Self::Relative => [-100.0, -50.0, -20.0, -10.0, 0.0, 10.0, 20.0, 50.0, 100.0],
            Self::SharePoints => [-70.0, -50.0, -30.0, -10.0, 0.0, 10.0, 30.0, 50.0, 70.0],
        }
    }

    /// Legend title for computed breakpoints.
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Absolute => "Абсолютное изменение",
            Self::Relative => "Относительное изменение (%)",
            Self::SharePoints => "Изменение доли (п.п.)",
        }
    }

    /// Legend title for the default breakpoints.
    pub const fn default_title(&self) -> &'static str {
        match self {
            Self::Relative => "Изменение (%)",
            Self::Absolute | Self::SharePoints => self.title(),
        }
    }
}

/// Nine breakpoints `[-4s, ..., 0, ..., 4s]` covering the range of deltas.
pub fn delta_classes(min: f64, max: f64, scale: DeltaScale) -> Vec<f64> {
    let (min, max) = match scale.clamp_bound() {
        Some(bound) => (min.max(-bound), max.min(bound)),
        None => (min, max),
    };
    let step = scale.step(min.abs().max(max.abs()));

    (-STEPS_PER_SIDE..=STEPS_PER_SIDE)
        .map(|i| f64::from(i) * step)
        .collect()
}

/// Colors for a set of delta breakpoints.
pub fn delta_colors(classes: &[f64]) -> Vec<String> {
    palette::diverging(classes.len().saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_absolute_small_range() {
        assert_eq!(
            delta_classes(-3.0, 3.0, DeltaScale::Absolute),
            vec![-4.0, -3.0, -2.0, -1.0, 0.0, 1.0, 2.0, 3.0, 4.0]
        );
    }

    #[rstest]
    #[case(DeltaScale::Absolute, 9.99, 1.0)]
    #[case(DeltaScale::Absolute, 10.0, 5.0)]
    #[case(DeltaScale::Absolute, 199.0, 20.0)]
    #[case(DeltaScale::Absolute, 999.0, 100.0)]
    #[case(DeltaScale::Absolute, 25_000.0, 500.0)]
    #[case(DeltaScale::Relative, 9.0, 2.0)]
    #[case(DeltaScale::Relative, 29.0, 5.0)]
    #[case(DeltaScale::Relative, 69.0, 10.0)]
    #[case(DeltaScale::Relative, 70.0, 20.0)]
    #[case(DeltaScale::SharePoints, 4.0, 1.0)]
    #[case(DeltaScale::SharePoints, 14.0, 3.0)]
    #[case(DeltaScale::SharePoints, 29.0, 5.0)]
    #[case(DeltaScale::SharePoints, 49.0, 10.0)]
    #[case(DeltaScale::SharePoints, 50.0, 15.0)]
    fn test_steps(#[case] scale: DeltaScale, #[case] max_abs: f64, #[case] step: f64) {
        assert_eq!(scale.step(max_abs), step);
    }

    #[test]
    fn test_relative_is_clamped() {
        let classes = delta_classes(-20.0, 450.0, DeltaScale::Relative);
        assert_eq!(classes[8], 80.0);
    }

    #[test]
    fn test_share_points_are_clamped() {
        let classes = delta_classes(-300.0, 0.0, DeltaScale::SharePoints);
        assert_eq!(classes[0], -60.0);
    }

    #[test]
    fn test_colors_match_classes() {
        let classes = delta_classes(-3.0, 3.0, DeltaScale::Absolute);
        let colors = delta_colors(&classes);
        assert_eq!(colors.len(), classes.len() - 1);
        assert_eq!(colors[0], "#8b0000");
    }

    #[test]
    fn test_titles() {
        assert_eq!(DeltaScale::Relative.default_title(), "Изменение (%)");
        assert_eq!(DeltaScale::Relative.title(), "Относительное изменение (%)");
        assert_eq!(DeltaScale::SharePoints.default_title(), "Изменение доли (п.п.)");
    }
}
