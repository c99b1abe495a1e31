use super::types::Fighter;
use serde::Serialize;
use std::collections::BTreeMap;

/// Headline numbers for a (filtered) fighter set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub fighters: usize,
    pub total_wins: u64,
    pub total_losses: u64,
    pub total_draws: u64,
    /// Mean over fighters that have a value; `None` if nobody does
    pub avg_striking_accuracy: Option<f64>,
    /// Fighter count per stance, fighters without a stance excluded
    pub stances: BTreeMap<String, usize>,
}

pub fn summarize(fighters: &[Fighter]) -> DatasetSummary {
    let total = |key: &str| -> u64 {
        fighters
            .iter()
            .filter_map(|f| f.number(key))
            .map(|n| n.max(0.0) as u64)
            .sum()
    };

    let accuracies: Vec<f64> = fighters
        .iter()
        .filter_map(|f| f.number("significant_striking_accuracy"))
        .collect();
    let avg_striking_accuracy = if accuracies.is_empty() {
        None
    } else {
        Some(accuracies.iter().sum::<f64>() / accuracies.len() as f64)
    };

    let mut stances = BTreeMap::new();
    for stance in fighters.iter().filter_map(Fighter::stance) {
        *stances.entry(stance.to_string()).or_insert(0) += 1;
    }

    DatasetSummary {
        fighters: fighters.len(),
        total_wins: total("wins"),
        total_losses: total("losses"),
        total_draws: total("draws"),
        avg_striking_accuracy,
        stances,
    }
}
