// src/menu.rs

//! Interactive front end: banner, runner choice and action choice.
//!
//! Reads from any `BufRead` and writes to any `Write` so the prompts can be
//! driven from tests. An empty answer (or end of input) means "quit".

use std::io::{BufRead, Write};

use crate::cli::Action;
use crate::discovery::Runner;
use crate::errors::Result;
use crate::run_id::RunId;

pub const BANNER: &str = r"
  ____
 / ___| __ _ _______ _ __
| |  _ / _` |_  / _ \ '__|
| |_| | (_| |/ /  __/ |
 \____|\__,_/___\___|_|
";

/// Indent that centres the run id line under the banner.
const RUN_ID_INDENT: &str = "                ";

pub fn print_banner<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "{BANNER}")?;
    Ok(())
}

/// Print `text`, then read one trimmed line. `None` on end of input.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, text: &str) -> Result<Option<String>> {
    write!(out, "{text}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Ask which runner to act on. A single runner is chosen without asking.
pub fn choose_runner<'a, R: BufRead, W: Write>(
    runners: &'a [Runner],
    input: &mut R,
    out: &mut W,
) -> Result<Option<&'a Runner>> {
    match runners {
        [] => return Ok(None),
        [only] => return Ok(Some(only)),
        _ => {}
    }

    writeln!(out, "Found multiple runner files:")?;
    for (i, runner) in runners.iter().enumerate() {
        writeln!(out, "{}) {}", i + 1, runner.file_name())?;
    }

    let question = format!("Choose a runner file (1-{}): ", runners.len());
    loop {
        let Some(answer) = prompt(input, out, &question)? else {
            return Ok(None);
        };
        if answer.is_empty() {
            return Ok(None);
        }
        match answer.parse::<usize>() {
            Ok(n) if (1..=runners.len()).contains(&n) => return Ok(Some(&runners[n - 1])),
            _ => writeln!(out, "Please choose a valid option.")?,
        }
    }
}

/// Ask what to do with `runner`.
///
/// With a record present the options are Restart and Stop, otherwise only
/// Start. `run_id` is shown above the menu when known.
pub fn choose_action<R: BufRead, W: Write>(
    runner: &Runner,
    has_record: bool,
    run_id: Option<&RunId>,
    input: &mut R,
    out: &mut W,
) -> Result<Option<Action>> {
    if let Some(id) = run_id {
        writeln!(out, "{RUN_ID_INDENT}> {id} <")?;
    }
    writeln!(out, "Actions for '{}':", runner.name)?;

    let (options, question): (&[Action], &str) = if has_record {
        writeln!(out, "1) Restart")?;
        writeln!(out, "2) Stop")?;
        (&[Action::Restart, Action::Stop], "Enter command number (1, 2): ")
    } else {
        writeln!(out, "1) Start")?;
        (&[Action::Start], "Enter command number (1): ")
    };

    loop {
        let Some(answer) = prompt(input, out, question)? else {
            return Ok(None);
        };
        if answer.is_empty() {
            return Ok(None);
        }
        match answer.parse::<usize>() {
            Ok(n) if (1..=options.len()).contains(&n) => return Ok(Some(options[n - 1])),
            _ => writeln!(out, "Please enter a valid number.")?,
        }
    }
}
