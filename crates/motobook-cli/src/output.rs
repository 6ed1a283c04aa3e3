//! Console styling helpers. Colors only when stdout is a terminal.

use is_terminal::IsTerminal;
use owo_colors::OwoColorize;

pub fn heading(text: &str) -> String {
    if std::io::stdout().is_terminal() {
        format!("{}", text.bold())
    } else {
        text.to_string()
    }
}

pub fn dim(text: &str) -> String {
    if std::io::stdout().is_terminal() {
        format!("{}", text.dimmed())
    } else {
        text.to_string()
    }
}

pub fn ok(text: &str) -> String {
    if std::io::stdout().is_terminal() {
        format!("{}", text.green())
    } else {
        text.to_string()
    }
}

pub fn warn(text: &str) -> String {
    if std::io::stdout().is_terminal() {
        format!("{}", text.red())
    } else {
        text.to_string()
    }
}
