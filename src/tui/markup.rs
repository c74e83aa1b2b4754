//! Reply text → ratatui `Text` renderer.
//!
//! Replies are plain text with one piece of markup: `**...**` turns bold.
//! Every `\n` is a line break. Nothing else is interpreted, and control
//! characters are dropped so a reply can't move the cursor or recolor the
//! terminal.

use std::sync::LazyLock;

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use regex::Regex;

/// Non-greedy: `**a** and **b**` is two bold runs, not one.
/// `(?s)` lets a run cross a line break.
static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\*\*(.*?)\*\*").expect("bold pattern is valid"));

const TAB_WIDTH: usize = 4;

/// Drop control characters, keeping newlines. Tabs become spaces.
pub fn sanitize(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '\n' => out.push('\n'),
            '\t' => out.extend(std::iter::repeat_n(' ', TAB_WIDTH)),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

/// Render bot reply text: bold runs plus line breaks.
///
/// Bold is matched over the whole reply, then each run is split into lines,
/// so `**start\nend**` is bold on both lines.
///
/// Returns owned text (`'static`) so callers aren't constrained by input lifetime.
pub fn render(content: &str, base: Style) -> Text<'static> {
    let clean = sanitize(content);
    let bold = base.add_modifier(Modifier::BOLD);
    let mut lines = vec![Line::default()];
    let mut last = 0;

    for caps in BOLD.captures_iter(&clean) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push_run(&mut lines, &clean[last..whole.start()], base);
        push_run(&mut lines, inner.as_str(), bold);
        last = whole.end();
    }
    push_run(&mut lines, &clean[last..], base);

    Text::from(lines).style(base)
}

/// Render user text verbatim: line breaks only, `**` left as typed.
pub fn plain(content: &str, base: Style) -> Text<'static> {
    let clean = sanitize(content);
    let lines: Vec<Line<'static>> = clean
        .split('\n')
        .map(|line| Line::from(Span::styled(line.to_string(), base)))
        .collect();
    Text::from(lines).style(base)
}

/// Append `run` to the last line, starting a new line at every `\n`.
fn push_run(lines: &mut Vec<Line<'static>>, run: &str, style: Style) {
    for (i, part) in run.split('\n').enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        if part.is_empty() {
            continue;
        }
        if let Some(line) = lines.last_mut() {
            line.push_span(Span::styled(part.to_string(), style));
        }
    }
}
