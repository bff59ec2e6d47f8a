//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for shellfix
#[derive(Parser, Debug)]
#[command(name = "shellfix")]
#[command(author, version, about = "Suggests a fix when a shell command fails")]
#[command(long_about = r#"
shellfix asks a language model to repair a failed shell command (or to turn a
request into a command), then checks the answer before showing it:

1. Tool validators reject invented flags and unknown subcommands
2. One re-query is made when validation blocks the first answer
3. A danger scan refuses destructive commands outright
4. A confidence score rates what is left

Configuration files are loaded from (in priority order):
1. SHELLFIX_* environment variables
2. --config <path>     Explicit config file
3. ./shellfix.toml     Project-level config
4. ~/.config/shellfix/config.toml   Global config

Example:
  shellfix analyze "kubectl get pods --memory" 1 "error: unknown flag: --memory"
  shellfix ask find files larger than 100MB
  shellfix cache stats
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Suggest a fix for a command that just failed
    Analyze {
        /// The failed command line
        command: String,

        /// Its exit code
        #[arg(allow_negative_numbers = true)]
        exit_code: i32,

        /// Captured error output
        #[arg(allow_hyphen_values = true)]
        error: Option<String>,

        /// Run even when the activation mode would not trigger
        #[arg(short, long)]
        force: bool,
    },

    /// Generate a command from a natural-language request
    Ask {
        /// What you want to do
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        query: Vec<String>,
    },

    /// Inspect or reset the response cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Check that the configured backend is reachable
    Check,

    /// List models offered by the configured backend
    Models,

    /// Show the effective configuration and where it came from
    Config,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheAction {
    /// Entry count, total hits and file location
    Stats,
    /// Remove every entry
    Clear,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_arguments() {
        let cli = Cli::try_parse_from([
            "shellfix",
            "-vv",
            "analyze",
            "git push",
            "1",
            "--force",
            "-bash: error: failed to push some refs",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert_eq!(
            cli.command,
            Command::Analyze {
                command: "git push".to_string(),
                exit_code: 1,
                error: Some("-bash: error: failed to push some refs".to_string()),
                force: true,
            }
        );
    }

    #[test]
    fn test_analyze_without_error_text() {
        let cli = Cli::try_parse_from(["shellfix", "analyze", "make", "2"]).unwrap();
        let Command::Analyze { error, force, .. } = cli.command else {
            panic!("expected analyze");
        };
        assert!(error.is_none());
        assert!(!force);
    }

    #[test]
    fn test_ask_joins_words() {
        let cli =
            Cli::try_parse_from(["shellfix", "--quiet", "ask", "list", "big", "files"]).unwrap();
        assert!(cli.quiet);
        assert_eq!(
            cli.command,
            Command::Ask {
                query: vec!["list".into(), "big".into(), "files".into()]
            }
        );
    }

    #[test]
    fn test_cache_subcommands_and_globals() {
        let cli = Cli::try_parse_from([
            "shellfix",
            "cache",
            "clear",
            "--no-config",
            "--log-file",
            "/tmp/shellfix.log",
        ])
        .unwrap();
        assert_eq!(cli.command, Command::Cache { action: CacheAction::Clear });
        assert!(cli.no_config);
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/shellfix.log")));
    }

    #[test]
    fn test_ask_requires_query() {
        assert!(Cli::try_parse_from(["shellfix", "ask"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
