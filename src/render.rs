// render.rs

use itertools::Itertools;

/// Notice shown after the view is cleared, wording kept from the web front
/// end.
pub const CLEARED_NOTICE: &str = "🧹 Terminal cleared. Type 'help' for available commands.";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EntryKind {
    Command,
    Output,
    Error,
    Notice,
}

#[derive(Clone, Debug)]
pub struct Entry {
    pub kind: EntryKind,
    pub text: String,
}

/// Capability seam over the display surface. The dispatcher and session only
/// talk to this trait, so tests can substitute a recording implementation.
pub trait Render {
    fn show_command_line(&mut self, raw: &str);
    fn show_output(&mut self, text: &str, is_error: bool);
    fn clear(&mut self);
}

/// View model the terminal draws from.
///
/// Entries hold plain text; the terminal surface never interprets them as
/// markup, and the HTML snapshot escapes on the way out. Every render
/// operation snaps scrollback to the live bottom so the newest entry is
/// always visible.
#[derive(Default)]
pub struct View {
    entries: Vec<Entry>,
    // rows above the live bottom; 0 means following new output
    scrollback: usize,
}

impl View {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn show_notice(&mut self, text: &str) {
        self.entries.push(Entry {
            kind: EntryKind::Notice,
            text: text.to_string(),
        });
        self.scroll_to_bottom();
    }

    pub fn scrollback(&self) -> usize {
        self.scrollback
    }

    pub fn scroll_up(&mut self, rows: usize) {
        self.scrollback += rows;
    }

    pub fn scroll_down(&mut self, rows: usize) {
        self.scrollback = self.scrollback.saturating_sub(rows);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scrollback = 0;
    }

    /// The drawing layer knows how many rows the content actually occupies.
    pub fn clamp_scrollback(&mut self, max: usize) {
        self.scrollback = self.scrollback.min(max);
    }

    /// Serializes the view to the markup the original browser front end
    /// rendered live. User-supplied text is escaped so a command can never
    /// inject tags.
    pub fn to_html(&self) -> String {
        self.entries
            .iter()
            .map(|entry| match entry.kind {
                EntryKind::Command => format!(
                    "<div class=\"command-line\"><span class=\"prompt\">$ </span><span class=\"command\">{}</span></div>",
                    escape_html(&entry.text)
                ),
                EntryKind::Output => {
                    format!("<div class=\"output\">{}</div>", escape_html(&entry.text))
                }
                EntryKind::Error => {
                    format!("<div class=\"output error\">{}</div>", escape_html(&entry.text))
                }
                EntryKind::Notice => {
                    format!("<div class=\"welcome\">{}</div>", escape_html(&entry.text))
                }
            })
            .join("\n")
    }
}

impl Render for View {
    fn show_command_line(&mut self, raw: &str) {
        self.entries.push(Entry {
            kind: EntryKind::Command,
            text: raw.to_string(),
        });
        self.scroll_to_bottom();
    }

    fn show_output(&mut self, text: &str, is_error: bool) {
        let kind = if is_error { EntryKind::Error } else { EntryKind::Output };
        self.entries.push(Entry {
            kind,
            text: text.to_string(),
        });
        self.scroll_to_bottom();
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.entries.push(Entry {
            kind: EntryKind::Notice,
            text: CLEARED_NOTICE.to_string(),
        });
        self.scroll_to_bottom();
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn escape_covers_markup_significant_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#039;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain text"), "plain text");
    }

    #[test]
    fn command_echo_cannot_inject_markup() {
        let mut view = View::new();
        view.show_command_line("<script>alert(1)</script>");
        let html = view.to_html();
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn entries_map_to_the_original_markup_classes() {
        let mut view = View::new();
        view.show_command_line("ls");
        view.show_output("total 0", false);
        view.show_output("Error: nope", true);
        let html = view.to_html();
        assert!(html.contains("<span class=\"prompt\">$ </span>"));
        assert!(html.contains("<div class=\"output\">total 0</div>"));
        assert!(html.contains("<div class=\"output error\">Error: nope</div>"));
    }

    #[test]
    fn clear_leaves_a_single_notice() {
        let mut view = View::new();
        view.show_command_line("ls");
        view.show_output("total 0", false);
        view.clear();
        assert_eq!(view.entries().len(), 1);
        assert_eq!(view.entries()[0].kind, EntryKind::Notice);
        assert_eq!(view.entries()[0].text, CLEARED_NOTICE);
    }

    #[test]
    fn render_operations_snap_scrollback_to_the_bottom() {
        let mut view = View::new();
        view.show_output("one", false);
        view.scroll_up(5);
        assert_eq!(view.scrollback(), 5);
        view.show_output("two", false);
        assert_eq!(view.scrollback(), 0);
    }

    #[test]
    fn scrollback_clamps_and_never_underflows() {
        let mut view = View::new();
        view.scroll_down(3);
        assert_eq!(view.scrollback(), 0);
        view.scroll_up(100);
        view.clamp_scrollback(7);
        assert_eq!(view.scrollback(), 7);
    }
}
