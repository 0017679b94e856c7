// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::io::IsTerminal;

use clap::builder::styling::{Ansi256Color, Color, Style, Styles};

pub mod codes {
    /// Section headers: steel blue
    pub const HEADER: u8 = 74;
    /// Commands and literals: light grey
    pub const LITERAL: u8 = 250;
    /// Placeholders and context: medium grey
    pub const CONTEXT: u8 = 245;
    /// Muted / secondary text: darker grey
    pub const MUTED: u8 = 240;
}

/// Determine if color output should be enabled.
///
/// Priority: `NO_COLOR=1` disables → `COLOR=1` forces → TTY check.
pub fn should_colorize() -> bool {
    if crate::env::no_color() {
        return false;
    }
    if crate::env::force_color() {
        return true;
    }
    std::io::stdout().is_terminal()
}

fn fg256(code: u8) -> String {
    format!("\x1b[38;5;{code}m")
}

const RESET: &str = "\x1b[0m";

fn style(code: u8) -> Style {
    Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(code))))
}

/// Clap help palette, plain when color is off.
pub fn styles() -> Styles {
    if !should_colorize() {
        return Styles::plain();
    }
    Styles::styled()
        .header(style(codes::HEADER))
        .usage(style(codes::HEADER))
        .literal(style(codes::LITERAL))
        .placeholder(style(codes::CONTEXT))
}

/// Apply header color unconditionally (caller decides whether to use this).
pub(crate) fn apply_header(text: &str) -> String {
    format!("{}{}{}", fg256(codes::HEADER), text, RESET)
}

/// Apply muted color unconditionally (caller decides whether to use this).
pub(crate) fn apply_muted(text: &str) -> String {
    format!("{}{}{}", fg256(codes::MUTED), text, RESET)
}

/// Apply status color unconditionally (caller decides whether to use this).
///
/// Green for `success`, red for `failed`, yellow for `unknown`/`never`.
/// Anything else is left alone.
pub(crate) fn apply_status(text: &str) -> String {
    let code = match text.trim() {
        "success" => "\x1b[32m",
        "unknown" | "never" => "\x1b[33m",
        "failed" => "\x1b[31m",
        _ => return text.to_string(),
    };
    format!("{code}{text}{RESET}")
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
