//! verimatch CLI — compile text-matcher configs and try them on values.
//!
//! Subcommands:
//! - `describe <config>` — print the compiled matcher's description
//! - `check <config> <value>...` — evaluate each value, print `ok` or the failure
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`.

use std::path::Path;
use std::process;

use tracing_subscriber::EnvFilter;
use verimatch::{check_that, Matcher, MatcherConfig, MatcherError};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "describe" => cmd_describe(&args[2..]),
        "check" => cmd_check(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(true)
        }
        other => {
            eprintln!("error: unknown command \"{other}\"");
            print_usage();
            process::exit(1);
        }
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Commands
// ═══════════════════════════════════════════════════════════════════════════════

fn cmd_describe(args: &[String]) -> Result<bool, String> {
    let [config_path] = args else {
        return Err("describe requires exactly one config file path".into());
    };

    let matcher = load_matcher(config_path)?;
    println!("{matcher}");
    Ok(true)
}

/// Returns `Ok(false)` when at least one value fails to match.
fn cmd_check(args: &[String]) -> Result<bool, String> {
    let Some((config_path, values)) = args.split_first() else {
        return Err("check requires a config file path".into());
    };
    if values.is_empty() {
        return Err("check requires at least one value".into());
    }

    let matcher = load_matcher(config_path)?;
    let outcomes = check_values(matcher.as_ref(), values);
    for outcome in &outcomes {
        println!("{outcome}");
    }
    Ok(outcomes.iter().all(|outcome| outcome == "ok"))
}

/// One entry per value: `ok`, or the failure message headed by the value.
fn check_values(matcher: &dyn Matcher<str>, values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|value| match check_that(value, value.as_str(), matcher) {
            Ok(()) => "ok".to_string(),
            Err(failure) => failure.message,
        })
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════════
// Config loading
// ═══════════════════════════════════════════════════════════════════════════════

fn load_matcher(path: &str) -> Result<Box<dyn Matcher<str>>, String> {
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("failed to read \"{path}\": {e}"))?;

    let is_json = Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let config = parse_config(&content, is_json).map_err(|e| e.to_string())?;
    tracing::debug!(path, depth = config.depth(), "loaded matcher config");
    config
        .compile()
        .map_err(|e| format!("config invalid: {e}"))
}

fn parse_config(content: &str, is_json: bool) -> Result<MatcherConfig, MatcherError> {
    if is_json {
        serde_json::from_str(content).map_err(|e| MatcherError::InvalidConfig {
            reason: format!("JSON parse error: {e}"),
        })
    } else {
        // Default to YAML (handles .yaml and .yml)
        serde_yaml::from_str(content).map_err(|e| MatcherError::InvalidConfig {
            reason: format!("YAML parse error: {e}"),
        })
    }
}

fn print_usage() {
    eprintln!(
        "Usage: verimatch <command> [options]

Commands:
  describe <config>           Print the matcher description
  check <config> <value>...   Check each value against the matcher
  help                        Show this help

Configs are YAML, or JSON when the file ends in .json."
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
type: all_of
matchers:
  - { type: starting_with, value: "user-" }
  - { type: not, matcher: { type: ending_with, value: "-0" } }
"#;

    #[test]
    fn parse_yaml_config() {
        let config = parse_config(YAML, false).unwrap();
        assert_eq!(config.depth(), 3);
    }

    #[test]
    fn parse_json_config() {
        let config = parse_config(r#"{ "type": "equal_to", "value": "x" }"#, true).unwrap();
        assert_eq!(config, MatcherConfig::EqualTo { value: "x".into() });
    }

    #[test]
    fn parse_error_is_invalid_config() {
        let err = parse_config("{ not json", true).unwrap_err();
        assert!(matches!(err, MatcherError::InvalidConfig { .. }));
        assert!(err.to_string().starts_with("invalid config: JSON parse error"));
    }

    #[test]
    fn check_values_reports_each_value() {
        let matcher = parse_config(YAML, false).unwrap().compile().unwrap();
        let values = vec!["user-1".to_string(), "user-0".to_string()];
        let outcomes = check_values(matcher.as_ref(), &values);

        assert_eq!(outcomes[0], "ok");
        assert_eq!(
            outcomes[1],
            "user-0\nExpected: (a string starting with \"user-\" and not a string ending with \"-0\")\n     but: not a string ending with \"-0\" was \"user-0\""
        );
    }

    #[test]
    fn check_requires_values() {
        assert!(cmd_check(&["config.yaml".to_string()]).is_err());
        assert!(cmd_check(&[]).is_err());
    }

    #[test]
    fn describe_requires_one_path() {
        assert!(cmd_describe(&[]).is_err());
    }
}
