//! Indicator summaries and rankings.

use regatlas_data::EntityValues;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Aggregate statistics of one indicator over a set of entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSummary {
    /// Number of entities with a value.
    pub count: usize,
    /// Sum of values.
    pub total: f64,
    /// Mean value.
    pub mean: f64,
    /// Entity with the largest value.
    pub max_entity: String,
    /// Largest value.
    pub max_value: f64,
}

impl fmt::Display for IndicatorSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} entities, total {:.2}, mean {:.2}, max {:.2} ({})",
            self.count, self.total, self.mean, self.max_value, self.max_entity
        )
    }
}

/// Summarize values; `None` for an empty mapping.
///
/// Ties for the maximum go to the first entity in name order.
pub fn summarize(values: &EntityValues) -> Option<IndicatorSummary> {
    let mut iter = values.iter();
    let (first_entity, &first_value) = iter.next()?;

    let mut total = first_value;
    let mut max_entity = first_entity;
    let mut max_value = first_value;
    for (entity, &value) in iter {
        total += value;
        if value > max_value {
            max_value = value;
            max_entity = entity;
        }
    }

    let count = values.len();
    Some(IndicatorSummary {
        count,
        total,
        mean: total / count as f64,
        max_entity: max_entity.clone(),
        max_value,
    })
}

/// A ranked entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntity {
    /// Position, starting at 1.
    pub rank: usize,
    /// Entity name.
    pub entity: String,
    /// Value.
    pub value: f64,
}

/// The `n` entities with the largest values, descending.
pub fn top_n(values: &EntityValues, n: usize) -> Vec<RankedEntity> {
    let mut sorted: Vec<(&String, f64)> = values.iter().map(|(e, &v)| (e, v)).collect();
    sorted.sort_by(|a, b| b.1.total_cmp(&a.1));

    sorted
        .into_iter()
        .take(n)
        .enumerate()
        .map(|(i, (entity, value))| RankedEntity {
            rank: i + 1,
            entity: entity.clone(),
            value,
        })
        .collect()
}
