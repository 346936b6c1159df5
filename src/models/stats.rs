use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate view of the collection at a point in time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatsSnapshot {
    pub total: usize,
    /// Mean rating rounded to two decimals
    pub avg_rating: Option<f64>,
    /// Rating value to number of movies holding it
    pub distribution: BTreeMap<i64, usize>,
    /// Mean release year, truncated
    pub avg_year: Option<i64>,
    pub most_common_year: Option<String>,
    pub generated_at: DateTime<Utc>,
}
