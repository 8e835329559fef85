//! The legend handed to map renderers.

use crate::format::range_label;
use serde::{Deserialize, Serialize};

/// Breakpoints, colors and labels of one map layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Legend {
    /// Breakpoints, ascending.
    pub classes: Vec<f64>,

    /// Colors; one per interval for continuous legends, one per label for
    /// categorical ones.
    pub colorscale: Vec<String>,

    /// Feature property the renderer colors by.
    pub color_prop: String,

    /// Display title.
    pub title: String,

    /// Unit of the values, when the title does not carry it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Whether the legend maps labels rather than ranges.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub categorical: bool,

    /// Category labels of a categorical legend.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

/// One swatch of a rendered legend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendItem {
    /// Swatch color.
    pub color: String,
    /// Swatch label.
    pub label: String,
}

impl Legend {
    /// A continuous legend.
    pub fn continuous(
        classes: Vec<f64>,
        colorscale: Vec<String>,
        color_prop: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            classes,
            colorscale,
            color_prop: color_prop.into(),
            title: title.into(),
            unit: None,
            categorical: false,
            labels: Vec::new(),
        }
    }

    /// Set the unit.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Whether colors and classes line up: one color per interval, or at
    /// least one color per label when categorical.
    pub fn is_consistent(&self) -> bool {
        if self.categorical {
            self.colorscale.len() >= self.labels.len()
        } else {
            !self.classes.is_empty() && self.colorscale.len() == self.classes.len() - 1
        }
    }

    /// Swatches in display order: category labels, or formatted ranges.
    pub fn items(&self) -> Vec<LegendItem> {
        if self.categorical {
            return self
                .labels
                .iter()
                .zip(&self.colorscale)
                .map(|(label, color)| LegendItem {
                    color: color.clone(),
                    label: label.clone(),
                })
                .collect();
        }

        self.colorscale
            .iter()
            .zip(self.classes.windows(2))
            .map(|(color, bounds)| LegendItem {
                color: color.clone(),
                label: range_label(bounds[0], bounds[1]),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legend() -> Legend {
        Legend::continuous(
            vec![0.0, 10.0, 1500.0],
            vec!["#fff".to_string(), "#000".to_string()],
            "gdp",
            "ВРП",
        )
    }

    #[test]
    fn test_items() {
        let items = legend().items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].label, "0-10");
        assert_eq!(items[1].label, "10-1 500");
    }

    #[test]
    fn test_consistency() {
        assert!(legend().is_consistent());
        let mut broken = legend();
        broken.colorscale.pop();
        assert!(!broken.is_consistent());
    }

    #[test]
    fn test_serialized_keys() {
        let json = serde_json::to_value(legend().with_unit("%")).unwrap();
        assert_eq!(json["colorProp"], "gdp");
        assert_eq!(json["unit"], "%");
        assert!(json.get("categorical").is_none());
        assert!(json.get("labels").is_none());
    }
}
