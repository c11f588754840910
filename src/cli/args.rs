use clap::Parser;
use std::path::PathBuf;

/// Configuration file read when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Run a configurable payments analytics pipeline
#[derive(Parser, Debug)]
#[command(name = "payments-analytics")]
#[command(about = "Run a configurable payments analytics pipeline", long_about = None)]
pub struct CliArgs {
    /// Run configuration document (YAML or JSON)
    #[arg(
        long = "config",
        short = 'c',
        value_name = "PATH",
        default_value = DEFAULT_CONFIG_PATH,
        help = "Path to the run configuration (.yaml, .yml or .json)"
    )]
    pub config: PathBuf,

    /// Log filter directive, overriding RUST_LOG
    #[arg(
        long = "log-level",
        value_name = "FILTER",
        help = "Log filter such as 'debug' or 'payments_analytics=trace' (default: RUST_LOG or info)"
    )]
    pub log_level: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::default_config(&["program"], "config.yaml")]
    #[case::long_flag(&["program", "--config", "runs/daily.yaml"], "runs/daily.yaml")]
    #[case::short_flag(&["program", "-c", "run.json"], "run.json")]
    fn test_config_parsing(#[case] args: &[&str], #[case] expected: &str) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.config, PathBuf::from(expected));
    }

    #[rstest]
    #[case::absent(&["program"], None)]
    #[case::given(&["program", "--log-level", "debug"], Some("debug"))]
    fn test_log_level_parsing(#[case] args: &[&str], #[case] expected: Option<&str>) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.log_level.as_deref(), expected);
    }

    #[rstest]
    #[case::missing_value(&["program", "--config"])]
    #[case::positional(&["program", "input.csv"])]
    #[case::unknown_flag(&["program", "--strategy", "sync"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
