//! Line-oriented interactive session over [`Frontend`].
//!
//! Each command maps to one page event; after it runs, the panels the event
//! touched are printed.

use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use kensaku_api::traits::CatalogService;
use kensaku_core::error::KensakuError;
use kensaku_core::frontend::{Frontend, SuggestionBox};

const HELP: &str = "\
commands:
  type <text>   change the search input (shows suggestions)
  search        search for the current input
  random        show a random anime
  pick <n>      choose suggestion n
  open <n>      show recommendations for result card n
  dismiss       hide the suggestions
  show          print the whole page
  html <file>   write the page as HTML
  help          show this message
  quit          leave the shell
";

#[derive(Debug, PartialEq)]
pub enum ShellCommand {
    Type(String),
    Search,
    Random,
    /// Zero-based suggestion index.
    Pick(usize),
    /// Zero-based result card index.
    Open(usize),
    Dismiss,
    Show,
    Html(PathBuf),
    Help,
    Quit,
}

/// Parse a 1-based position typed by the user into an index.
fn parse_position(arg: &str) -> Result<usize, String> {
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(format!("expected a number starting at 1, got {arg:?}")),
    }
}

impl FromStr for ShellCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg),
            None => (line.trim_end(), ""),
        };

        match name {
            // Keep the rest of the line verbatim: surrounding spaces are input too.
            "type" => Ok(Self::Type(arg.to_string())),
            "search" => Ok(Self::Search),
            "random" => Ok(Self::Random),
            "pick" => parse_position(arg.trim()).map(Self::Pick),
            "open" => parse_position(arg.trim()).map(Self::Open),
            "dismiss" => Ok(Self::Dismiss),
            "show" => Ok(Self::Show),
            "html" if !arg.trim().is_empty() => Ok(Self::Html(PathBuf::from(arg.trim()))),
            "html" => Err("usage: html <file>".into()),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(format!("unknown command {other:?} (try `help`)")),
        }
    }
}

fn write_suggestions(out: &mut impl Write, suggestions: &SuggestionBox) -> std::io::Result<()> {
    if !suggestions.visible {
        return Ok(());
    }
    writeln!(out, "suggestions:")?;
    for (i, item) in suggestions.items.iter().enumerate() {
        writeln!(out, "  {}) {}", i + 1, item.title)?;
    }
    Ok(())
}

/// Run the session until `quit` or end of input.
pub async fn run_shell<S, R>(
    frontend: &Frontend<S>,
    input: R,
    out: &mut impl Write,
) -> Result<(), KensakuError>
where
    S: CatalogService,
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    writeln!(out, "kensaku shell; type `help` for commands")?;

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<ShellCommand>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "{e}")?;
                continue;
            }
        };
        tracing::debug!(?command, "shell command");

        match command {
            ShellCommand::Type(text) => {
                frontend.input_changed(&text).await;
                write_suggestions(out, &frontend.page().suggestions)?;
            }
            ShellCommand::Search => {
                frontend.search_clicked().await;
                write!(out, "{}", frontend.page().results)?;
            }
            ShellCommand::Random => {
                frontend.random_clicked().await;
                write!(out, "{}", frontend.page().results)?;
            }
            ShellCommand::Pick(index) => {
                frontend.suggestion_clicked(index).await;
                let page = frontend.page();
                writeln!(out, "input: {}", page.input)?;
                write!(out, "{}", page.results)?;
            }
            ShellCommand::Open(index) => {
                frontend.card_clicked(index).await;
                writeln!(out, "recommended:")?;
                write!(out, "{}", frontend.page().recommendations)?;
            }
            ShellCommand::Dismiss => frontend.outside_clicked(),
            ShellCommand::Show => {
                let page = frontend.page();
                writeln!(out, "input: {}", page.input)?;
                write_suggestions(out, &page.suggestions)?;
                writeln!(out, "results:")?;
                write!(out, "{}", page.results)?;
                writeln!(out, "recommended:")?;
                write!(out, "{}", page.recommendations)?;
            }
            ShellCommand::Html(path) => {
                tokio::fs::write(&path, frontend.page().to_html()).await?;
                writeln!(out, "wrote {}", path.display())?;
            }
            ShellCommand::Help => write!(out, "{HELP}")?,
            ShellCommand::Quit => break,
        }
    }

    Ok(())
}
