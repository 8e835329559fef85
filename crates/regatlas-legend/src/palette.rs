//! Color palettes.

use regatlas_data::IndicatorKind;

/// Nine-step diverging scale from dark red through light gray to dark green.
pub const DIVERGING: [&str; 9] = [
    "#8b0000", "#ff0000", "#ff6666", "#ffcccc", "#f0f0f0", "#ccffcc", "#66ff66", "#00ff00",
    "#008000",
];

/// Sequential palette for indicators without their own scheme.
pub const DEFAULT_SEQUENTIAL: [&str; 5] = ["#c6e48b", "#7bc96f", "#239a3b", "#196127", "#0d3b1e"];

/// Palette of the relative share legend.
pub const RELATIVE_SHARE: [&str; 6] = [
    "#f7fbff", "#c6dbef", "#6baed6", "#3182bd", "#08519c", "#08306b",
];

/// Color of the no-data legend.
pub const NO_DATA: &str = "#808080";

const BLUES: [&str; 5] = ["#c6dbef", "#6baed6", "#3182bd", "#08519c", "#08306b"];
const REDS: [&str; 5] = ["#fcbba1", "#fb6a4a", "#de2d26", "#a50f15", "#67000d"];
const GREENS: [&str; 5] = ["#e5f5e0", "#c7e9c0", "#a1d99b", "#74c476", "#41ab5d"];
const YELLOWS: [&str; 5] = ["#ffffcc", "#ffeda0", "#fed976", "#feb24c", "#fd8d3c"];
const ROSES: [&str; 5] = ["#fddbc7", "#f4a582", "#d6604d", "#b2182b", "#67001f"];
const PURPLES: [&str; 5] = ["#dadaeb", "#bcbddc", "#9e9ac8", "#756bb1", "#54278f"];
const SKY: [&str; 5] = ["#e6f3ff", "#b3d9ff", "#80bfff", "#4da6ff", "#1a8cff"];

/// Sequential palette of an indicator.
pub const fn sequential(kind: &IndicatorKind) -> &'static [&'static str; 5] {
    match kind {
        IndicatorKind::Gdp | IndicatorKind::WaterSupply => &BLUES,
        IndicatorKind::Salary | IndicatorKind::EnergySupply => &REDS,
        IndicatorKind::GdpPerCapita | IndicatorKind::TotalVolume => &GREENS,
        IndicatorKind::MiningIndustry => &YELLOWS,
        IndicatorKind::ManufacturingIndustry => &ROSES,
        IndicatorKind::Agriculture => &PURPLES,
        IndicatorKind::Services => &SKY,
        IndicatorKind::Population | IndicatorKind::Custom(_) => &DEFAULT_SEQUENTIAL,
    }
}

/// Exactly `count` colors from a palette, cycling when it is too short.
pub fn cycled(palette: &[&str], count: usize) -> Vec<String> {
    palette
        .iter()
        .cycle()
        .take(if palette.is_empty() { 0 } else { count })
        .map(|c| c.to_string())
        .collect()
}

/// Centered contiguous slice of [`DIVERGING`] with `count` colors.
pub fn diverging(count: usize) -> Vec<String> {
    let count = count.min(DIVERGING.len());
    let start = (DIVERGING.len() - count) / 2;
    DIVERGING[start..start + count]
        .iter()
        .map(|c| c.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diverging_slice() {
        let colors = diverging(8);
        assert_eq!(colors.len(), 8);
        assert_eq!(colors[0], "#8b0000");
        assert_eq!(colors[7], "#00ff00");
        assert_eq!(diverging(9).len(), 9);
        assert_eq!(diverging(1), vec!["#f0f0f0"]);
    }

    #[test]
    fn test_cycled() {
        let colors = cycled(&DEFAULT_SEQUENTIAL, 7);
        assert_eq!(colors.len(), 7);
        assert_eq!(colors[5], "#c6e48b");
        assert_eq!(cycled(&DEFAULT_SEQUENTIAL, 3).len(), 3);
        assert!(cycled(&[], 3).is_empty());
    }

    #[test]
    fn test_sequential() {
        assert_eq!(sequential(&IndicatorKind::Gdp)[0], "#c6dbef");
        assert_eq!(
            sequential(&IndicatorKind::Custom("x".to_string())),
            &DEFAULT_SEQUENTIAL
        );
    }
}
