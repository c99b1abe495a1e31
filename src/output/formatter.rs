use std::collections::BTreeMap;
use std::io::IsTerminal;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use terminal_size::{terminal_size, Width};

use crate::dataset::{AttrValue, DatasetSummary};
use crate::scoring::{label_for, CriterionSet, ScoreResult, CATALOG};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Scores are shares of 1, so show enough decimals to tell them apart
pub fn format_score(score: f64) -> String {
    format!("{:.6}", score)
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn pad_right(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - len))
    }
}

/// Format the ranking as a table: rank, score, name, then one column per
/// selected criterion holding the raw value.
pub fn format_ranking_table(
    results: &[ScoreResult],
    criteria: &CriterionSet,
    use_colors: bool,
) -> String {
    if results.is_empty() {
        return "No fighters match the current filters.".to_string();
    }

    let index_width = 4; // fits "999."
    let score_width = 8; // "0.123456"
    let separator = "  ";

    let labels: Vec<&str> = criteria.keys().map(label_for).collect();
    let value_widths: Vec<usize> = criteria
        .keys()
        .zip(&labels)
        .map(|(key, label)| {
            results
                .iter()
                .map(|r| r.raw(key).map_or(1, |v| v.to_string().chars().count()))
                .max()
                .unwrap_or(1)
                .max(label.chars().count())
        })
        .collect();

    let longest_name = results
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Name".len());
    let fixed_width = index_width
        + 1
        + score_width
        + separator.len()
        + value_widths.iter().map(|w| w + separator.len()).sum::<usize>();
    let name_width = match get_terminal_width() {
        Some(width) if width > fixed_width + 10 => longest_name.min(width - fixed_width),
        // Very narrow terminal
        Some(_) => longest_name.min(20),
        // No terminal (pipe), don't truncate
        None => longest_name,
    };

    let mut header = format!(
        "{:>index_width$} {:>score_width$}{}{}",
        "#",
        "Score",
        separator,
        pad_right("Name", name_width),
    );
    for (label, width) in labels.iter().zip(&value_widths) {
        header.push_str(separator);
        header.push_str(&pad_right(label, *width));
    }
    let header = header.trim_end().to_string();

    let mut lines = Vec::with_capacity(results.len() + 1);
    lines.push(if use_colors {
        header.bold().to_string()
    } else {
        header
    });

    for (idx, result) in results.iter().enumerate() {
        let index_str = format!("{:>width$}.", idx + 1, width = index_width - 1);
        let score_str = format!("{:>width$}", format_score(result.score), width = score_width);
        let name = pad_right(&truncate_name(&result.name, name_width), name_width);

        let mut values = String::new();
        for (key, width) in criteria.keys().zip(&value_widths) {
            let value = result
                .raw(key)
                .map_or_else(|| AttrValue::Missing.to_string(), |v| v.to_string());
            values.push_str(separator);
            values.push_str(&format!("{:>width$}", value, width = *width));
        }

        let line = if use_colors {
            format!(
                "{} {}{}{}{}",
                index_str.dimmed(),
                score_str.bold(),
                separator,
                name,
                values
            )
        } else {
            format!("{} {}{}{}{}", index_str, score_str, separator, name, values)
        };
        lines.push(line.trim_end().to_string());
    }

    lines.join("\n")
}

/// Format the ranking as tab-separated values for scripting.
/// Columns: rank, name, score, then raw criterion values (no headers, no colors)
pub fn format_tsv(results: &[ScoreResult], criteria: &CriterionSet) -> String {
    results
        .iter()
        .enumerate()
        .map(|(idx, result)| {
            let mut fields = vec![
                (idx + 1).to_string(),
                result.name.clone(),
                result.score.to_string(),
            ];
            fields.extend(
                criteria
                    .keys()
                    .map(|key| match result.raw(key) {
                        Some(value) if !value.is_missing() => value.to_string(),
                        _ => String::new(),
                    }),
            );
            fields.join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Serialize)]
struct JsonRow<'a> {
    rank: usize,
    name: &'a str,
    score: f64,
    values: BTreeMap<&'a str, &'a AttrValue>,
}

/// Format the ranking as a pretty-printed JSON array
pub fn format_json(results: &[ScoreResult]) -> Result<String> {
    let rows: Vec<JsonRow> = results
        .iter()
        .enumerate()
        .map(|(idx, result)| JsonRow {
            rank: idx + 1,
            name: &result.name,
            score: result.score,
            values: result
                .breakdown
                .terms
                .iter()
                .map(|t| (t.key.as_str(), &t.raw))
                .collect(),
        })
        .collect();
    serde_json::to_string_pretty(&rows).context("Failed to serialize ranking as JSON")
}

/// One line naming the top-ranked fighter
pub fn format_recommendation(results: &[ScoreResult], use_colors: bool) -> Option<String> {
    let top = results.first()?;
    let name = if use_colors {
        top.name.bold().green().to_string()
    } else {
        top.name.clone()
    };
    Some(format!(
        "Recommended fighter: {} (score {})",
        name,
        format_score(top.score)
    ))
}

/// Normalized weights as "Label: 0.333, Label: 0.667"
pub fn format_weights(criteria: &CriterionSet) -> String {
    criteria
        .criteria()
        .iter()
        .zip(criteria.normalized_weights())
        .map(|(c, w)| format!("{}: {:.3}", label_for(&c.key), w))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Per-criterion contribution of one fighter (for verbose mode)
pub fn format_breakdown(result: &ScoreResult) -> String {
    let mut lines = vec![format!(
        "{}\n  Score: {}  ln S: {:.6}",
        result.name,
        format_score(result.score),
        result.breakdown.log_preference
    )];
    for term in &result.breakdown.terms {
        lines.push(format!(
            "  {}: raw {} -> value {} ^ {:+.3} = {:.6}",
            label_for(&term.key),
            term.raw,
            term.value,
            term.exponent,
            term.factor()
        ));
    }
    lines.join("\n")
}

/// Catalog listing with the active selection marked
pub fn format_criteria_list(active: Option<&CriterionSet>, use_colors: bool) -> String {
    let mut lines = Vec::new();
    let mut shown: Vec<&str> = Vec::new();

    let describe = |key: &str| -> Option<String> {
        let set = active?;
        let i = set.keys().position(|k| k == key)?;
        let c = &set.criteria()[i];
        Some(format!(
            "{}, weight {} ({:.3})",
            c.direction,
            c.weight,
            set.normalized_weights()[i]
        ))
    };

    for entry in CATALOG {
        shown.push(entry.key);
        let line = match describe(entry.key) {
            Some(detail) if use_colors => format!(
                "* {:<32} {:<34} {}",
                entry.key.bold(),
                entry.label,
                detail.green()
            ),
            Some(detail) => format!("* {:<32} {:<34} {}", entry.key, entry.label, detail),
            None => format!("  {:<32} {}", entry.key, entry.label),
        };
        lines.push(line.trim_end().to_string());
    }

    // Active criteria outside the catalog
    if let Some(set) = active {
        for key in set.keys().filter(|k| !shown.contains(k)) {
            if let Some(detail) = describe(key) {
                lines.push(format!("* {:<32} {:<34} {}", key, key, detail));
            }
        }
    }

    lines.join("\n")
}

/// Dataset KPIs, one per line
pub fn format_summary(summary: &DatasetSummary) -> String {
    let mut lines = vec![
        format!("Fighters:                 {}", summary.fighters),
        format!("Total wins:               {}", summary.total_wins),
        format!("Total losses:             {}", summary.total_losses),
        format!("Total draws:              {}", summary.total_draws),
        format!(
            "Avg striking accuracy:    {}",
            summary
                .avg_striking_accuracy
                .map_or_else(|| "-".to_string(), |a| format!("{:.1}%", a))
        ),
    ];
    if !summary.stances.is_empty() {
        lines.push("Stances:".to_string());
        for (stance, count) in &summary.stances {
            lines.push(format!("  {:<24}{}", stance, count));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{summarize, Fighter};
    use crate::scoring::{rank, Criterion};

    fn criteria() -> CriterionSet {
        CriterionSet::new(vec![
            Criterion::benefit("wins", 3.0),
            Criterion::cost("losses", 1.0),
        ])
        .unwrap()
    }

    fn ranked() -> Vec<ScoreResult> {
        let fighters = vec![
            Fighter::new("Alpha").with("wins", 10.0).with("losses", 2.0),
            Fighter::new("Bravo").with("wins", 5.0).with("losses", 1.0),
            Fighter::new("Charlie").with("losses", 4.0),
        ];
        rank(&fighters, &criteria()).unwrap()
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(0.5), "0.500000");
        assert_eq!(format_score(1.0 / 3.0), "0.333333");
    }

    #[test]
    fn test_truncate_name_short() {
        assert_eq!(truncate_name("Jon Jones", 20), "Jon Jones");
    }

    #[test]
    fn test_truncate_name_long() {
        assert_eq!(
            truncate_name("Khabib Nurmagomedov", 10),
            "Khabib ..."
        );
    }

    #[test]
    fn test_truncate_name_unicode() {
        assert_eq!(truncate_name("José Aldo", 9), "José Aldo");
        assert_eq!(truncate_name("José Aldo Junior", 7), "José...");
    }

    #[test]
    fn test_truncate_name_very_narrow() {
        assert_eq!(truncate_name("Conor", 3), "Con");
    }

    #[test]
    fn test_table_empty() {
        assert_eq!(
            format_ranking_table(&[], &criteria(), false),
            "No fighters match the current filters."
        );
    }

    #[test]
    fn test_table_rows() {
        let table = format_ranking_table(&ranked(), &criteria(), false);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("Score"));
        assert!(lines[0].contains("Win"));
        assert!(lines[0].contains("Lose"));
        assert!(lines[1].starts_with("  1."));
        assert!(lines[1].contains("Alpha"));
        assert!(lines[2].contains("Bravo"));
        assert!(lines[3].contains("Charlie"));
        // Missing wins shown as a dash
        assert!(lines[3].split_whitespace().any(|f| f == "-"));
    }

    #[test]
    fn test_tsv() {
        let tsv = format_tsv(&ranked(), &criteria());
        let lines: Vec<&str> = tsv.lines().collect();
        assert_eq!(lines.len(), 3);
        let fields: Vec<&str> = lines[0].split('\t').collect();
        assert_eq!(fields.len(), 5);
        assert_eq!(fields[0], "1");
        assert_eq!(fields[1], "Alpha");
        assert_eq!(fields[3], "10");
        assert_eq!(fields[4], "2");
        // Missing value is an empty field
        assert!(lines[2].ends_with("\t\t4"));
    }

    #[test]
    fn test_tsv_missing_value_has_no_placeholder() {
        let tsv = format_tsv(&ranked(), &criteria());
        let charlie = tsv.lines().find(|l| l.contains("Charlie")).unwrap();
        let fields: Vec<&str> = charlie.split('\t').collect();
        assert_eq!(fields.len(), 5);
        assert_eq!(fields[3], "");
        assert_eq!(fields[4], "4");
    }

    #[test]
    fn test_tsv_empty() {
        assert_eq!(format_tsv(&[], &criteria()), "");
    }

    #[test]
    fn test_json() {
        let json = format_json(&ranked()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        let rows = parsed.as_array().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["rank"], 1);
        assert_eq!(rows[0]["name"], "Alpha");
        assert_eq!(rows[0]["values"]["wins"], 10.0);
        assert!(rows[2]["values"]["wins"].is_null());
    }

    #[test]
    fn test_recommendation() {
        let line = format_recommendation(&ranked(), false).unwrap();
        assert!(line.starts_with("Recommended fighter: Alpha"));
        assert!(format_recommendation(&[], false).is_none());
    }

    #[test]
    fn test_weights() {
        assert_eq!(format_weights(&criteria()), "Win: 0.750, Lose: 0.250");
    }

    #[test]
    fn test_breakdown() {
        let text = format_breakdown(&ranked()[0]);
        assert!(text.starts_with("Alpha"));
        assert!(text.contains("Win: raw 10"));
        assert!(text.contains("^ +0.750"));
        assert!(text.contains("^ -0.250"));
    }

    #[test]
    fn test_criteria_list_marks_active() {
        let set = CriterionSet::new(vec![
            Criterion::benefit("wins", 1.0),
            Criterion::benefit("reach_in_cm", 1.0),
        ])
        .unwrap();
        let text = format_criteria_list(Some(&set), false);
        let wins = text.lines().find(|l| l.contains("wins")).unwrap();
        assert!(wins.starts_with('*'));
        assert!(wins.contains("Benefit, weight 1 (0.500)"));
        let draws = text.lines().find(|l| l.contains("draws")).unwrap();
        assert!(draws.starts_with(' '));
        assert!(text.lines().any(|l| l.starts_with("* reach_in_cm")));
    }

    #[test]
    fn test_summary() {
        let fighters = vec![
            Fighter::new("A")
                .with("wins", 3.0)
                .with("significant_striking_accuracy", 41.0)
                .with("stance", "Orthodox"),
        ];
        let text = format_summary(&summarize(&fighters));
        assert!(text.contains("Fighters:                 1"));
        assert!(text.contains("41.0%"));
        assert!(text.contains("Orthodox"));
    }
}
