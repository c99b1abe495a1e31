pub mod formatter;

pub use formatter::{
    format_breakdown, format_criteria_list, format_json, format_ranking_table,
    format_recommendation, format_score, format_summary, format_tsv, format_weights,
    should_use_colors,
};
