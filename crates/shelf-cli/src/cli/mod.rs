use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `shelf` binary.
#[derive(Debug, Parser)]
#[command(name = "shelf", version, about = "Shelf - book catalog and lending desk")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw [default: json]
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Database file (overrides `database.path` from config)
    #[arg(short, long, global = true)]
    pub database: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format.unwrap_or_default(),
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
            database: self.database.clone(),
        }
    }

    /// Flags for one shell line: values given on the line win, the rest
    /// come from the session.
    #[must_use]
    pub fn global_flags_over(&self, session: &GlobalFlags) -> GlobalFlags {
        GlobalFlags {
            format: self.format.unwrap_or(session.format),
            limit: self.limit.or(session.limit),
            quiet: self.quiet || session.quiet,
            verbose: self.verbose || session.verbose,
            database: session.database.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, GlobalFlags, OutputFormat};
    use crate::cli::subcommands::{BookCommands, LendingCommands};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "shelf", "--format", "table", "--limit", "10", "--verbose", "book", "list",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, Some(OutputFormat::Table));
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Book {
                action: BookCommands::List { .. }
            }
        ));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["shelf", "lending", "list", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.global_flags().format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(
            cli.command,
            Commands::Lending {
                action: LendingCommands::List { .. }
            }
        ));
    }

    #[test]
    fn format_defaults_to_json() {
        let cli = Cli::try_parse_from(["shelf", "shell"]).expect("cli should parse");
        assert_eq!(cli.global_flags().format, OutputFormat::Json);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["shelf", "--format", "xml", "shell"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["shelf", "--database", "/tmp/demo.db", "shell"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.database.as_deref(), Some("/tmp/demo.db"));
    }

    #[test]
    fn line_flags_override_session_flags() {
        let session = GlobalFlags {
            format: OutputFormat::Table,
            limit: Some(5),
            quiet: false,
            verbose: false,
            database: Some("lib.db".into()),
        };

        let line = Cli::try_parse_from(["shelf", "book", "list", "--format", "raw"]).unwrap();
        let flags = line.global_flags_over(&session);
        assert_eq!(flags.format, OutputFormat::Raw);
        assert_eq!(flags.limit, Some(5));
        assert_eq!(flags.database.as_deref(), Some("lib.db"));

        let line = Cli::try_parse_from(["shelf", "book", "list"]).unwrap();
        assert_eq!(line.global_flags_over(&session).format, OutputFormat::Table);
    }
}
