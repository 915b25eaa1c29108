//! CLI definition using clap.
//!
//! There are no subcommands: running the binary always starts the
//! interactive session. The flags only choose where settings come from.

use clap::Parser;
use std::path::PathBuf;

/// readlog - keep track of the books you read
#[derive(Parser, Debug)]
#[command(name = "readlog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the resolved settings and log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::try_parse_from(["readlog"]).unwrap();
        assert!(!cli.verbose);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_verbose_flag() {
        let cli = Cli::try_parse_from(["readlog", "-v"]).unwrap();
        assert!(cli.is_verbose());
    }

    #[test]
    fn test_cli_config_option() {
        let cli = Cli::try_parse_from(["readlog", "--config", "/etc/readlog.yml"]).unwrap();
        assert_eq!(cli.config.as_ref(), Some(&PathBuf::from("/etc/readlog.yml")));
    }

    #[test]
    fn test_cli_rejects_subcommands() {
        assert!(Cli::try_parse_from(["readlog", "list"]).is_err());
    }

    #[test]
    fn test_cli_debug_assert() {
        Cli::command().debug_assert();
    }
}
