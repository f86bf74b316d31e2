use std::fmt::Display;
use std::io::IsTerminal;
use std::sync::atomic::{AtomicBool, Ordering};

use console::{colors_enabled, style};

static VERBOSE: AtomicBool = AtomicBool::new(false);

pub fn brand_accent<D: Display>(value: D) -> console::StyledObject<D> {
    style(value).magenta()
}

pub fn brand_fg<D: Display>(value: D) -> console::StyledObject<D> {
    style(value)
}

pub fn brand_muted<D: Display>(value: D) -> console::StyledObject<D> {
    style(value).dim()
}

pub fn brand_success<D: Display>(value: D) -> console::StyledObject<D> {
    style(value).green()
}

pub fn brand_error<D: Display>(value: D) -> console::StyledObject<D> {
    style(value).red()
}

pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

pub fn section(title: &str) {
    println!();
    println!("{}", brand_accent(title).bold());
}

pub fn step(message: &str) {
    println!("{} {}", brand_accent("•").bold(), brand_fg(message));
}

pub fn success(message: &str) {
    println!("{} {}", brand_success("✓").bold(), brand_fg(message));
}

pub fn error_stderr(message: &str) {
    eprintln!("{} {}", brand_error("✗").bold(), brand_fg(message));
}

pub fn muted(message: &str) {
    println!("{}", brand_muted(message));
}

pub fn emphasized(value: &str) -> String {
    if std::io::stdout().is_terminal() && colors_enabled() {
        format!("\x1b[3m{}\x1b[23m", value)
    } else {
        format!("'{}'", value)
    }
}
