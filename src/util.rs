//! Text escaping and formatting helpers shared by page renderers

use chrono::{DateTime, FixedOffset, Utc};
use maud::Render;

use crate::git::Time;

/// Escapes text for inclusion in HTML or XML.
///
/// Replaces the five markup-significant characters with entity references.
/// Unlike maud's built-in escaping this also covers the apostrophe.
///
/// # Examples
///
/// ```
/// use gitscroll::escape;
///
/// assert_eq!(escape("<b>&\"'"), "&lt;b&gt;&amp;&quot;&apos;");
/// ```
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(text, &mut out);
    out
}

fn escape_into(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
}

/// Repository-sourced text rendered through [`escape`].
///
/// Use inside `html!` blocks in place of a bare `&str` so every piece of
/// text coming out of the repository receives the full escaping.
#[derive(Debug, Clone, Copy)]
pub struct Escaped<'a>(pub &'a str);

impl Render for Escaped<'_> {
    fn render_to(&self, buffer: &mut String) {
        escape_into(self.0, buffer);
    }
}

fn to_datetime(time: Time) -> Option<DateTime<FixedOffset>> {
    let offset = FixedOffset::east_opt(time.offset_minutes() * 60)?;
    Some(DateTime::<Utc>::from_timestamp(time.seconds(), 0)?.with_timezone(&offset))
}

/// Formats a timestamp in the author's offset like `Mon Jan  2 15:04:05 2006`.
pub fn format_long(time: Time) -> String {
    to_datetime(time)
        .map(|dt| dt.format("%a %b %e %T %Y").to_string())
        .unwrap_or_default()
}

/// Formats a timestamp in the author's offset like `2006-01-02 15:04`.
pub fn format_short(time: Time) -> String {
    to_datetime(time)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

/// Formats a timestamp as UTC for Atom `updated` elements.
pub fn format_rfc3339_utc(time: Time) -> String {
    DateTime::<Utc>::from_timestamp(time.seconds(), 0)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%SZ").to_string())
        .unwrap_or_default()
}

/// Truncates a summary to at most `max` characters.
///
/// Longer text keeps its first `max - 1` characters followed by an ellipsis.
pub fn truncate_summary(summary: &str, max: usize) -> String {
    if summary.chars().count() <= max {
        return summary.to_string();
    }

    let mut out: String = summary.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
