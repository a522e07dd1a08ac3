use std::io::Write;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::{Cli, Commands, GlobalFlags};
use crate::commands::dispatch::dispatch;
use crate::context::AppContext;

const SHELL_HELP: &str = "\
Type commands without the leading `shelf`, for example:
  book list --title dune
  lending borrow --book 1 --name \"Ada Lovelace\"
Shell commands: help, exit, quit";

/// One line of shell input, classified.
#[derive(Debug)]
enum ShellInput {
    Empty,
    Exit,
    Help,
    Command(Box<Cli>),
    Invalid(String),
}

/// Handle `shelf shell`: read commands from stdin until `exit` or end of input.
///
/// Each line is parsed with the same command tree as the binary and run
/// against the same context. Failures are printed and the loop goes on.
pub async fn run(ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    if !flags.quiet {
        eprintln!("shelf shell: type 'help' for commands, 'exit' to leave");
    }

    loop {
        prompt()?;
        let Some(line) = lines.next_line().await.context("failed to read from stdin")? else {
            break;
        };

        match interpret(&line) {
            ShellInput::Empty => {}
            ShellInput::Exit => break,
            ShellInput::Help => println!("{}\n{SHELL_HELP}", Cli::command().render_help()),
            ShellInput::Invalid(message) => eprintln!("{}", message.trim_end()),
            ShellInput::Command(cli) => {
                let line_flags = cli.global_flags_over(flags);
                let Cli { command, .. } = *cli;
                if let Err(error) = dispatch(command, ctx, &line_flags).await {
                    eprintln!("shelf error: {error:#}");
                }
            }
        }
    }

    tracing::debug!("shell closed");
    Ok(())
}

fn prompt() -> anyhow::Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "> ")?;
    stdout.flush().context("failed to flush prompt")
}

fn interpret(line: &str) -> ShellInput {
    let words = match shell_words::split(line) {
        Ok(words) => words,
        Err(error) => return ShellInput::Invalid(format!("could not parse line: {error}")),
    };

    match words.as_slice() {
        [] => ShellInput::Empty,
        [word] if word == "exit" || word == "quit" => ShellInput::Exit,
        [word] if word == "help" => ShellInput::Help,
        _ => match Cli::try_parse_from(
            std::iter::once("shelf").chain(words.iter().map(String::as_str)),
        ) {
            Ok(cli) if matches!(cli.command, Commands::Shell) => {
                ShellInput::Invalid("already in the shell".to_string())
            }
            Ok(cli) if cli.database.is_some() => ShellInput::Invalid(
                "--database cannot be changed inside the shell; restart with the new path"
                    .to_string(),
            ),
            Ok(cli) => ShellInput::Command(Box::new(cli)),
            Err(error) => ShellInput::Invalid(error.render().to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{ShellInput, interpret};
    use crate::cli::Commands;
    use crate::cli::subcommands::LendingCommands;

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_lines_are_ignored(#[case] line: &str) {
        assert!(matches!(interpret(line), ShellInput::Empty));
    }

    #[rstest]
    #[case("exit")]
    #[case("quit")]
    #[case("  quit  ")]
    fn exit_words_leave(#[case] line: &str) {
        assert!(matches!(interpret(line), ShellInput::Exit));
    }

    #[test]
    fn help_is_handled_by_the_shell() {
        assert!(matches!(interpret("help"), ShellInput::Help));
    }

    #[test]
    fn quoted_names_stay_whole() {
        let ShellInput::Command(cli) = interpret("lending borrow --book 3 --name \"Ada Lovelace\"")
        else {
            panic!("expected a command");
        };
        match cli.command {
            Commands::Lending {
                action: LendingCommands::Borrow { book, name },
            } => {
                assert_eq!(book, 3);
                assert_eq!(name, "Ada Lovelace");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[rstest]
    #[case("shell")]
    #[case("book list --database other.db")]
    #[case("lending borrow --book x --name Alice")]
    #[case("lending borrow --name \"unterminated")]
    #[case("frobnicate")]
    fn bad_lines_are_reported_not_run(#[case] line: &str) {
        assert!(matches!(interpret(line), ShellInput::Invalid(_)));
    }
}
