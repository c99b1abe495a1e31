use super::config::{ScoringConfig, MAX_WEIGHT};
use std::collections::HashSet;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.criteria.is_empty() {
        errors.push("scoring.criteria: select at least one criterion".to_string());
    }

    let mut seen = HashSet::new();
    for (i, criterion) in config.criteria.iter().enumerate() {
        if criterion.key.trim().is_empty() {
            errors.push(format!("scoring.criteria[{}].key: must not be empty", i));
        } else if !seen.insert(criterion.key.as_str()) {
            errors.push(format!(
                "scoring.criteria[{}].key: '{}' is selected more than once",
                i, criterion.key
            ));
        }

        let w = criterion.weight;
        if !w.is_finite() || !(0.0..=MAX_WEIGHT).contains(&w) {
            errors.push(format!(
                "scoring.criteria[{}].weight: {} is outside 0-{}",
                i, w, MAX_WEIGHT
            ));
        }
    }

    let total: f64 = config.criteria.iter().map(|c| c.weight).sum();
    if !config.criteria.is_empty() && total == 0.0 {
        errors.push("scoring.criteria: weights must not all be zero".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::Criterion;

    fn config(criteria: Vec<Criterion>) -> ScoringConfig {
        ScoringConfig { criteria }
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_scoring(&ScoringConfig::default()).is_ok());
    }

    #[test]
    fn test_empty_criteria() {
        let errors = validate_scoring(&config(vec![])).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("at least one criterion"));
    }

    #[test]
    fn test_all_zero_weights() {
        let errors = validate_scoring(&config(vec![
            Criterion::benefit("wins", 0.0),
            Criterion::cost("losses", 0.0),
        ]))
        .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("must not all be zero"));
    }

    #[test]
    fn test_weight_out_of_range() {
        let errors = validate_scoring(&config(vec![
            Criterion::benefit("wins", 5.25),
            Criterion::cost("losses", -1.0),
        ]))
        .unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("scoring.criteria[0].weight"));
        assert!(errors[1].contains("scoring.criteria[1].weight"));
    }

    #[test]
    fn test_boundary_weights_accepted() {
        assert!(validate_scoring(&config(vec![
            Criterion::benefit("wins", 5.0),
            Criterion::cost("losses", 0.0),
        ]))
        .is_ok());
    }

    #[test]
    fn test_duplicate_and_empty_keys() {
        let errors = validate_scoring(&config(vec![
            Criterion::benefit("wins", 1.0),
            Criterion::cost("wins", 1.0),
            Criterion::benefit(" ", 1.0),
        ]))
        .unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("scoring.criteria[1].key"));
        assert!(errors[1].contains("scoring.criteria[2].key"));
    }

    #[test]
    fn test_nan_weight() {
        let errors = validate_scoring(&config(vec![Criterion::benefit("wins", f64::NAN)]))
            .unwrap_err();
        assert!(errors[0].contains("weight"));
    }
}
