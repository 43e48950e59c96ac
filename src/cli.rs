use clap::Parser;
use std::path::PathBuf;

/// Terminal front-end for the h2mm-cli mod manager.
#[derive(Debug, Parser)]
#[command(name = "h2mm-tui", version, about)]
pub struct Cli {
    /// Use an alternate config file.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Invoke this h2mm-cli executable instead of the configured one
    /// (one-shot; not persisted).
    #[arg(long, value_name = "PATH")]
    pub cli_path: Option<PathBuf>,

    /// Skip the first-run wizard even if onboarding never completed.
    #[arg(long)]
    pub skip_onboarding: bool,
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;

    #[test]
    fn defaults_are_empty() {
        let cli = Cli::try_parse_from(["h2mm-tui"]).unwrap();
        assert!(cli.config.is_none());
        assert!(cli.cli_path.is_none());
        assert!(!cli.skip_onboarding);
    }

    #[test]
    fn parses_overrides() {
        let cli = Cli::try_parse_from([
            "h2mm-tui",
            "--config",
            "/tmp/alt.toml",
            "--cli-path",
            "/opt/h2mm-cli",
            "--skip-onboarding",
        ])
        .unwrap();
        assert_eq!(cli.config.unwrap().to_str(), Some("/tmp/alt.toml"));
        assert_eq!(cli.cli_path.unwrap().to_str(), Some("/opt/h2mm-cli"));
        assert!(cli.skip_onboarding);
    }
}
