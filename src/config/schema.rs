use crate::filter::FilterConfig;
use crate::scoring::ScoringConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Dataset file looked up in the working directory when none is configured
pub const DEFAULT_DATASET: &str = "ufc-fighters-statistics.csv";

/// Rows shown when `top` is not configured
pub const DEFAULT_TOP: usize = 10;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path to the fighter statistics CSV
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<PathBuf>,

    /// Number of ranked fighters to display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<FilterConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoring: Option<ScoringConfig>,
}

impl Config {
    pub fn dataset_path(&self) -> PathBuf {
        self.dataset
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET))
    }

    pub fn top(&self) -> usize {
        self.top.unwrap_or(DEFAULT_TOP)
    }

    pub fn filters(&self) -> FilterConfig {
        self.filters.clone().unwrap_or_default()
    }

    pub fn scoring(&self) -> ScoringConfig {
        self.scoring.clone().unwrap_or_default()
    }
}
