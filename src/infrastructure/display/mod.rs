//! Console rendering of processed chat lines

use crate::domain::traits::{DisplayEntry, Render};

const GREEN: &str = "\x1b[92m";
const BOLD: &str = "\x1b[1m";
const BLUE: &str = "\x1b[94m";
const END: &str = "\x1b[0m";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

fn colorize(text: &str, color: &str) -> String {
    format!("{}{}{}", color, text, END)
}

/// Green timestamp, bold sender, blue content when a rule matched
#[derive(Debug, Default, Clone, Copy)]
pub struct AnsiRenderer;

impl Render for AnsiRenderer {
    fn render(&self, entry: &DisplayEntry) -> String {
        let timestamp = entry.timestamp.format(TIMESTAMP_FORMAT).to_string();
        let content = if entry.matched {
            colorize(&entry.content, BLUE)
        } else {
            entry.content.clone()
        };

        format!(
            "{} {}: {}",
            colorize(&timestamp, GREEN),
            colorize(&entry.sender, BOLD),
            content
        )
    }
}

/// No escape codes; matched lines are marked with a leading `*`
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainRenderer;

impl Render for PlainRenderer {
    fn render(&self, entry: &DisplayEntry) -> String {
        let marker = if entry.matched { "* " } else { "" };
        format!(
            "{}{} {}: {}",
            marker,
            entry.timestamp.format(TIMESTAMP_FORMAT),
            entry.sender,
            entry.content
        )
    }
}

/// Pick the renderer for the `highlight` setting
pub fn renderer(highlight: bool) -> Box<dyn Render> {
    if highlight {
        Box::new(AnsiRenderer)
    } else {
        Box::new(PlainRenderer)
    }
}
