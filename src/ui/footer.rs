use crate::ui::theme::{GLOBAL_BORDER, HEADER_TEXT};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const SEPARATOR: &str = " │ ";

const EDITOR_HINTS: &[&str] = &[
    "Enter: Send",
    "Ctrl+Q: Quit",
    "Shift+Enter: Newline",
    "Alt+1-9: Suggestion",
    "Ctrl+A: Sign in",
    "Ctrl+L: Sign out",
    "Ctrl+U: Clear",
];
// Without keyboard enhancement Shift+Enter is indistinguishable from Enter.
const EDITOR_HINTS_LEGACY: &[&str] = &[
    "Enter: Send",
    "Ctrl+Q: Quit",
    "Alt+Enter: Newline",
    "Alt+1-9: Suggestion",
    "Ctrl+A: Sign in",
    "Ctrl+L: Sign out",
    "Ctrl+U: Clear",
];
const DIALOG_HINTS: &[&str] = &[
    "Enter: Continue",
    "Esc: Cancel",
    "Tab: Next field",
    "Ctrl+T: Switch mode",
];

/// Key hints on the left, version on the right.
pub struct Footer {
    dialog_open: bool,
    keyboard_enhanced: bool,
}

impl Footer {
    pub fn new(dialog_open: bool, keyboard_enhanced: bool) -> Self {
        Self {
            dialog_open,
            keyboard_enhanced,
        }
    }

    fn hints(&self) -> &'static [&'static str] {
        match (self.dialog_open, self.keyboard_enhanced) {
            (true, _) => DIALOG_HINTS,
            (false, true) => EDITOR_HINTS,
            (false, false) => EDITOR_HINTS_LEGACY,
        }
    }

    pub fn widget(&self, area: Rect) -> Paragraph<'static> {
        let hints = self.hints();
        let version = format!("v{} ", VERSION);
        let content_width = area.width.saturating_sub(2) as usize;
        let room = content_width.saturating_sub(version.chars().count() + 1);
        let shown = fit_hints(hints, room);
        let padding = content_width
            .saturating_sub(shown.chars().count())
            .saturating_sub(version.chars().count());

        let text_style = Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM);
        let line = Line::from(vec![
            Span::styled(shown, text_style),
            Span::styled(" ".repeat(padding), text_style),
            Span::styled(version, text_style),
        ]);

        Paragraph::new(line).style(text_style).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}

/// Joins hints in priority order, dropping whole hints that don't fit.
fn fit_hints(hints: &[&str], width: usize) -> String {
    let mut shown = String::from(" ");
    let mut used = 1;
    for (idx, hint) in hints.iter().enumerate() {
        let separator = if idx == 0 { 0 } else { SEPARATOR.chars().count() };
        let extra = separator + hint.chars().count();
        if used + extra > width {
            break;
        }
        if idx > 0 {
            shown.push_str(SEPARATOR);
        }
        shown.push_str(hint);
        used += extra;
    }
    shown
}
