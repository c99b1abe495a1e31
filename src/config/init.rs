use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{get_config_path, save_config, Config, DEFAULT_DATASET, DEFAULT_TOP};
use crate::scoring::{
    label_for, Criterion, Direction, ScoringConfig, CATALOG, DEFAULT_WEIGHT, MAX_WEIGHT,
    WEIGHT_STEP,
};

/// Line-oriented prompter over any reader/writer pair.
struct Prompter<'a, R: BufRead, W: Write> {
    input: &'a mut R,
    output: &'a mut W,
}

impl<'a, R: BufRead, W: Write> Prompter<'a, R, W> {
    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text).context("Failed to write output")
    }

    /// Prompt user with a message and return their trimmed input.
    fn prompt(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{}", message).context("Failed to write prompt")?;
        self.output.flush().context("Failed to flush output")?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            anyhow::bail!("Input closed before the wizard finished");
        }
        Ok(line.trim().to_string())
    }

    /// Prompt with a default value. Returns default if input is empty.
    fn prompt_with_default(&mut self, message: &str, default: &str) -> Result<String> {
        let input = self.prompt(&format!("{} [{}]: ", message, default))?;
        if input.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(input)
        }
    }

    /// Prompt with a yes/no question. Returns bool based on input and default.
    fn prompt_yes_no(&mut self, message: &str, default_yes: bool) -> Result<bool> {
        let hint = if default_yes { "Y/n" } else { "y/N" };
        let input = self.prompt(&format!("{} [{}]: ", message, hint))?;
        let input = input.to_lowercase();
        if input.is_empty() {
            Ok(default_yes)
        } else {
            Ok(input == "y" || input == "yes")
        }
    }
}

/// Parse a comma-separated criterion selection. Entries are either catalog
/// numbers (1-based, as listed by the wizard) or column keys.
fn parse_selection(input: &str) -> Result<Vec<String>, String> {
    let mut keys: Vec<String> = Vec::new();
    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let key = match part.parse::<usize>() {
            Ok(n) if (1..=CATALOG.len()).contains(&n) => CATALOG[n - 1].key.to_string(),
            Ok(n) => return Err(format!("no criterion number {}", n)),
            Err(_) => part.to_string(),
        };
        if keys.contains(&key) {
            return Err(format!("'{}' selected more than once", key));
        }
        keys.push(key);
    }
    if keys.is_empty() {
        return Err("select at least one criterion".to_string());
    }
    Ok(keys)
}

/// Parse a weight on the 0-5 scale in quarter steps.
fn parse_weight(input: &str) -> Result<f64, String> {
    let weight: f64 = input
        .parse()
        .map_err(|_| format!("'{}' is not a number", input))?;
    if !(0.0..=MAX_WEIGHT).contains(&weight) {
        return Err(format!("must be between 0 and {}", MAX_WEIGHT));
    }
    let steps = weight / WEIGHT_STEP;
    if (steps - steps.round()).abs() > 1e-9 {
        return Err(format!("must be a multiple of {}", WEIGHT_STEP));
    }
    Ok(weight)
}

fn default_direction(key: &str) -> Direction {
    ScoringConfig::default()
        .criteria
        .into_iter()
        .find(|c| c.key == key)
        .map(|c| c.direction)
        .unwrap_or(Direction::Benefit)
}

/// Run the interactive init wizard on stdin/stdout.
///
/// If `default_path` is Some, it is offered as the save location.
/// Otherwise the default config path is offered.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();
    run_wizard(&mut input, &mut output, default_path).map(|_| ())
}

/// Wizard body. Returns the path written, or None if the user declined to
/// overwrite an existing file.
fn run_wizard<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    default_path: Option<PathBuf>,
) -> Result<Option<PathBuf>> {
    let mut p = Prompter { input, output };

    p.say("")?;
    p.say("Fighter Rank Configuration Wizard")?;
    p.say("=================================")?;
    p.say("")?;

    // 1. Dataset
    let dataset = p.prompt_with_default("Path to the fighter statistics CSV", DEFAULT_DATASET)?;

    // 2. Criteria
    p.say("")?;
    p.say("Available criteria:")?;
    for (i, entry) in CATALOG.iter().enumerate() {
        p.say(&format!("  {}. {} ({})", i + 1, entry.label, entry.key))?;
    }
    p.say("Any other numeric column of the dataset can be entered by name.")?;
    let default_selection = ScoringConfig::default()
        .criteria
        .iter()
        .map(|c| c.key.clone())
        .collect::<Vec<_>>()
        .join(",");
    let keys = loop {
        let raw = p.prompt_with_default("Criteria (comma-separated)", &default_selection)?;
        match parse_selection(&raw) {
            Ok(keys) => break keys,
            Err(e) => p.say(&format!("  Invalid: {}. Try again.", e))?,
        }
    };

    // 3. Direction and weight per criterion
    p.say("")?;
    p.say("Benefit: higher is better. Cost: lower is better.")?;
    p.say(&format!(
        "Weights run from 0 to {} in steps of {}; only their ratios matter.",
        MAX_WEIGHT, WEIGHT_STEP
    ))?;
    let criteria = loop {
        let mut criteria = Vec::with_capacity(keys.len());
        for key in &keys {
            let label = label_for(key);
            let direction = loop {
                let raw = p.prompt_with_default(
                    &format!("{}: benefit or cost?", label),
                    &default_direction(key).to_string(),
                )?;
                match Direction::parse(&raw) {
                    Ok(d) => break d,
                    Err(e) => p.say(&format!("  Invalid: {}. Try again.", e))?,
                }
            };
            let weight = loop {
                let raw = p.prompt_with_default(
                    &format!("Weight for {}", label),
                    &DEFAULT_WEIGHT.to_string(),
                )?;
                match parse_weight(&raw) {
                    Ok(w) => break w,
                    Err(e) => p.say(&format!("  Invalid: {}. Try again.", e))?,
                }
            };
            criteria.push(Criterion::new(key.clone(), direction, weight));
        }
        if criteria.iter().any(|c| c.weight > 0.0) {
            break criteria;
        }
        p.say("  Weights must not all be zero. Let's go through them again.")?;
    };

    // 4. Rows to display
    p.say("")?;
    let top = loop {
        let raw = p.prompt_with_default("How many fighters to show", &DEFAULT_TOP.to_string())?;
        match raw.parse::<usize>() {
            Ok(n) if n > 0 => break n,
            _ => p.say("  Invalid: must be a positive whole number. Try again.")?,
        }
    };

    // 5. Config path
    let default_config_path = default_path.unwrap_or_else(get_config_path);
    p.say("")?;
    let path_str = p.prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    if config_path.exists() {
        let overwrite = p.prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            p.say("Aborted.")?;
            return Ok(None);
        }
    }

    // 6. Write config
    let config = Config {
        dataset: Some(PathBuf::from(dataset)),
        top: Some(top),
        filters: None,
        scoring: Some(ScoringConfig { criteria }),
    };
    save_config(&config_path, &config)?;

    p.say("")?;
    p.say(&format!("Config written to {}", config_path.display()))?;
    p.say("Run `fighter-rank` to see the ranking.")?;

    Ok(Some(config_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use std::env;
    use std::io::Cursor;

    #[test]
    fn test_parse_selection_keys_and_numbers() {
        assert_eq!(
            parse_selection("1, losses ,reach_in_cm").unwrap(),
            vec!["wins", "losses", "reach_in_cm"]
        );
    }

    #[test]
    fn test_parse_selection_errors() {
        assert!(parse_selection("").is_err());
        assert!(parse_selection(" , ").is_err());
        assert!(parse_selection("99").is_err());
        assert!(parse_selection("wins,1").is_err());
    }

    #[test]
    fn test_parse_weight() {
        assert_eq!(parse_weight("2.75"), Ok(2.75));
        assert_eq!(parse_weight("0"), Ok(0.0));
        assert_eq!(parse_weight("5"), Ok(5.0));
        assert!(parse_weight("5.25").is_err());
        assert!(parse_weight("-1").is_err());
        assert!(parse_weight("1.1").is_err());
        assert!(parse_weight("heavy").is_err());
    }

    #[test]
    fn test_default_direction() {
        assert_eq!(default_direction("losses"), Direction::Cost);
        assert_eq!(default_direction("wins"), Direction::Benefit);
        assert_eq!(default_direction("reach_in_cm"), Direction::Benefit);
    }

    #[test]
    fn test_wizard_writes_config() {
        let path = env::temp_dir().join("fighter_rank_test_wizard.yaml");
        let _ = std::fs::remove_file(&path);

        // dataset, criteria, (direction, weight) x2 with one bad weight, top, path
        let script = format!(
            "data.csv\nwins,losses\n\n3\ncost\n7\n1\n5\n{}\n",
            path.display()
        );
        let mut input = Cursor::new(script.into_bytes());
        let mut output = Vec::new();

        let written = run_wizard(&mut input, &mut output, None).unwrap();
        assert_eq!(written, Some(path.clone()));

        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.contains("must be between 0 and 5"));

        let config = load_config(Some(path.clone())).unwrap();
        assert_eq!(config.dataset, Some(PathBuf::from("data.csv")));
        assert_eq!(config.top, Some(5));
        assert_eq!(
            config.scoring().criteria,
            vec![Criterion::benefit("wins", 3.0), Criterion::cost("losses", 1.0)]
        );

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_wizard_reasks_all_zero_weights() {
        let path = env::temp_dir().join("fighter_rank_test_wizard_zero.yaml");
        let _ = std::fs::remove_file(&path);

        let script = format!(
            "\nwins\n\n0\n\n2\n\n{}\n",
            path.display()
        );
        let mut input = Cursor::new(script.into_bytes());
        let mut output = Vec::new();

        run_wizard(&mut input, &mut output, None).unwrap();
        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.contains("Weights must not all be zero"));

        let config = load_config(Some(path.clone())).unwrap();
        assert_eq!(config.scoring().criteria, vec![Criterion::benefit("wins", 2.0)]);
        assert_eq!(config.top, Some(DEFAULT_TOP));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_wizard_declines_overwrite() {
        let path = env::temp_dir().join("fighter_rank_test_wizard_exists.yaml");
        std::fs::write(&path, "top: 1\n").unwrap();

        let script = format!("\n\n\n\n\n\n\n\n\n{}\nn\n", path.display());
        let mut input = Cursor::new(script.into_bytes());
        let mut output = Vec::new();

        let written = run_wizard(&mut input, &mut output, None).unwrap();
        assert_eq!(written, None);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "top: 1\n");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_wizard_eof_errors() {
        let mut input = Cursor::new(b"data.csv\n".to_vec());
        let mut output = Vec::new();
        assert!(run_wizard(&mut input, &mut output, None).is_err());
    }
}
