use std::io::{self, Write};
use std::sync::OnceLock;

use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

static JSON_MODE: OnceLock<bool> = OnceLock::new();

pub fn init(json: bool) {
    let _ = JSON_MODE.set(json);
}

pub fn is_json() -> bool {
    JSON_MODE.get().copied().unwrap_or(false)
}

pub fn print<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let s = if is_json() {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{s}");
    Ok(())
}

/// A `name: ok|FAIL  detail` line, colored when stdout is a terminal.
pub fn status_line(name: &str, ok: bool, detail: &str) -> io::Result<()> {
    let mut out = stdout();
    write!(out, "{name}: ")?;
    let (color, word) = if ok { (Color::Green, "ok") } else { (Color::Red, "FAIL") };
    out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(out, "{word}")?;
    out.reset()?;
    writeln!(out, "  {detail}")
}

pub fn stdout() -> StandardStream {
    StandardStream::stdout(ColorChoice::Auto)
}
