//! Line-oriented prompts on stdin.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context, Result, bail};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

/// Prints `label` and reads one line, without the line ending.
pub fn read_line(label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin()
        .lock()
        .read_line(&mut input)
        .context("read from stdin")?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}

/// Like [`read_line`], but typed characters are not echoed on a terminal.
///
/// Piped stdin is read as a plain line.
pub fn read_secret(label: &str) -> Result<String> {
    if !io::stdin().is_terminal() {
        return read_line(label);
    }

    print!("{label}");
    io::stdout().flush()?;

    enable_raw_mode().context("Failed to enable raw mode")?;
    let input = read_hidden();
    disable_raw_mode().context("Failed to disable raw mode")?;
    println!();
    input
}

fn read_hidden() -> Result<String> {
    let mut input = String::new();
    loop {
        let Event::Key(key) = event::read().context("read key")? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Enter => return Ok(input),
            KeyCode::Char('c') if ctrl => bail!("Cancelled"),
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Char(c) if !ctrl => input.push(c),
            _ => {}
        }
    }
}

/// Asks a yes/no question; anything but `y` means no.
pub fn confirm(question: &str) -> Result<bool> {
    let answer = read_line(&format!("{question} [y/N] "))?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}
