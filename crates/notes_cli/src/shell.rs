//! Line-oriented command shell over the notes app.
//!
//! # Responsibility
//! - Parse one input line into a `Command`.
//! - Drive the app the way a browser host would: link clicks, history
//!   moves, form submits.

use notes_core::{
    App, History, KeyValueStorage, MemoryMount, StoreError, SubmitOutcome,
};
use std::io::{self, Write};

pub const HELP: &str = "\
commands:
  go <path>                 navigate to a path
  click <href>              follow a data-link in the current page
  back | forward            move through history
  links                     list links bound in the current page
  new <title> | <content>   submit the create form
  rm <id>                   delete a note
  list                      list notes (id and title)
  show                      print the current page again
  help                      this text
  quit                      exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Go(String),
    Click(String),
    Back,
    Forward,
    Links,
    New { title: String, content: String },
    Remove(String),
    List,
    Show,
    Help,
    Quit,
}

/// Whether the loop should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Parses one line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim()));

    let require = |name: &str| -> Result<String, String> {
        if rest.is_empty() {
            Err(format!("`{name}` needs an argument"))
        } else {
            Ok(rest.to_string())
        }
    };

    let command = match word {
        "go" => Command::Go(require("go")?),
        "click" => Command::Click(require("click")?),
        "back" => Command::Back,
        "forward" => Command::Forward,
        "links" => Command::Links,
        "new" => {
            let (title, content) = rest.split_once('|').unwrap_or((rest, ""));
            Command::New {
                title: title.trim().to_string(),
                content: content.trim().to_string(),
            }
        }
        "rm" => Command::Remove(require("rm")?),
        "list" | "ls" => Command::List,
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command `{other}`; try `help`")),
    };
    Ok(Some(command))
}

/// Runs one command and writes its output.
pub fn execute<S, H>(
    app: &mut App<S, H, MemoryMount>,
    command: Command,
    out: &mut impl Write,
) -> io::Result<Flow>
where
    S: KeyValueStorage + 'static,
    H: History,
{
    match command {
        Command::Go(path) => {
            app.navigate(&path);
            print_page(app, out)?;
        }
        Command::Click(href) => {
            if app.click(&href) {
                print_page(app, out)?;
            } else {
                writeln!(out, "no bound link `{href}` on this page")?;
            }
        }
        Command::Back => {
            if app.back() {
                print_page(app, out)?;
            } else {
                writeln!(out, "already at the first entry")?;
            }
        }
        Command::Forward => {
            if app.forward() {
                print_page(app, out)?;
            } else {
                writeln!(out, "already at the last entry")?;
            }
        }
        Command::Links => {
            for href in app.router().bound_links() {
                writeln!(out, "{href}")?;
            }
        }
        Command::New { title, content } => match app.submit_create(&title, &content) {
            Ok(SubmitOutcome::Created(note)) => {
                writeln!(out, "created {}", note.id)?;
                print_page(app, out)?;
            }
            Ok(SubmitOutcome::Rejected(message)) => writeln!(out, "{message}")?,
            Err(err) => report_store_error(&err, out)?,
        },
        Command::Remove(id) => match app.delete_note(&id) {
            Ok(note) => {
                writeln!(out, "deleted {}", note.id)?;
                print_page(app, out)?;
            }
            Err(err) => report_store_error(&err, out)?,
        },
        Command::List => {
            for note in app.store().get_all() {
                writeln!(out, "{}  {}", note.id, note.title)?;
            }
        }
        Command::Show => print_page(app, out)?,
        Command::Help => writeln!(out, "{HELP}")?,
        Command::Quit => return Ok(Flow::Exit),
    }
    Ok(Flow::Continue)
}

fn print_page<S, H>(app: &App<S, H, MemoryMount>, out: &mut impl Write) -> io::Result<()>
where
    S: KeyValueStorage + 'static,
    H: History,
{
    writeln!(out, "--- {} ---", app.router().current_path())?;
    writeln!(out, "{}", app.mount().content())
}

fn report_store_error(err: &StoreError, out: &mut impl Write) -> io::Result<()> {
    log::warn!("event=cli_command module=cli status=error error={err}");
    writeln!(out, "error: {err}")
}
