use crate::identity::Session;
use crate::ui::theme::{ACCENT, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT, MUTED_TEXT};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

pub struct Header;

impl Header {
    pub fn new() -> Self {
        Self
    }

    pub fn widget(&self, session: Option<&Session>) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT);
        let separator_style = Style::default().fg(HEADER_SEPARATOR);

        let mut spans = vec![
            Span::styled("  ", text_style),
            Span::styled("promptgate", text_style.add_modifier(Modifier::BOLD)),
            Span::styled("  │  ", separator_style),
        ];
        match session {
            Some(session) => {
                spans.push(Span::styled(
                    format!(" {} ", session.initials()),
                    Style::default().fg(HEADER_TEXT).bg(ACCENT),
                ));
                spans.push(Span::styled(format!("  {}", session.email), text_style));
            }
            None => spans.push(Span::styled(
                "Not signed in (Ctrl+A to sign in)",
                Style::default().fg(MUTED_TEXT),
            )),
        }

        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}
