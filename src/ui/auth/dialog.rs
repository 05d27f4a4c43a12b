//! Dialog rendering for the sign-in overlay.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::identity::AuthMode;
use crate::ui::layout::centered_rect_by_size;
use crate::ui::theme::{
    ACCENT, ACTIVE_HIGHLIGHT, HEADER_TEXT, MUTED_TEXT, POPUP_BORDER, SPINNER_FRAMES, STATUS_ERROR,
    STATUS_OK,
};

use super::state::{AuthDialogState, AuthField, AuthForm};

const DIALOG_WIDTH: u16 = 54;

fn dialog_height(state: &AuthDialogState) -> u16 {
    match state.form() {
        None => 0,
        // border + blank + fields + blank + status + blank + hints + border
        Some(form) => form.fields().len() as u16 + 7,
    }
}

/// Render the sign-in dialog on top of the entry screen.
pub fn render_auth_dialog(frame: &mut Frame, state: &AuthDialogState) {
    let Some(form) = state.form() else {
        return;
    };

    let area = centered_rect_by_size(DIALOG_WIDTH, dialog_height(state), frame.area());
    frame.render_widget(Clear, area);

    let title = format!(" {} to continue ", form.mode.label());
    let block = Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(POPUP_BORDER));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![Line::from("")];
    for field in form.fields() {
        lines.push(field_line(form, *field, state.is_verifying()));
    }
    lines.push(Line::from(""));
    lines.push(status_line(state));
    lines.push(Line::from(""));
    lines.push(hint_line(form.mode));

    render_lines(frame, inner, lines);
}

fn field_line(form: &AuthForm, field: AuthField, verifying: bool) -> Line<'static> {
    let (label, value) = match field {
        AuthField::Name => ("Name     ", form.name.clone()),
        AuthField::Email => ("Email    ", form.email.clone()),
        AuthField::Password => (
            "Password ",
            "•".repeat(form.password.expose().chars().count()),
        ),
    };

    let focused = form.focus == field && !verifying;
    let value_style = if focused {
        Style::default()
            .fg(HEADER_TEXT)
            .bg(ACTIVE_HIGHLIGHT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(HEADER_TEXT)
    };
    let cursor = if focused { "▏" } else { " " };

    Line::from(vec![
        Span::styled(format!("  {}", label), Style::default().fg(MUTED_TEXT)),
        Span::styled(format!(" {}{} ", truncate_left(&value, 34), cursor), value_style),
    ])
}

fn status_line(state: &AuthDialogState) -> Line<'static> {
    match state {
        AuthDialogState::Verifying { animation_tick, .. } => {
            let spinner = SPINNER_FRAMES[(*animation_tick as usize) % SPINNER_FRAMES.len()];
            Line::from(vec![
                Span::styled(format!("  {} ", spinner), Style::default().fg(STATUS_OK)),
                Span::styled("Checking credentials...", Style::default().fg(HEADER_TEXT)),
            ])
        }
        _ => match state.error_message() {
            Some(error) => Line::from(Span::styled(
                format!("  {}", error),
                Style::default().fg(STATUS_ERROR),
            )),
            None => Line::from(""),
        },
    }
}

fn hint_line(mode: AuthMode) -> Line<'static> {
    let switch = match mode {
        AuthMode::SignIn => "Ctrl+T: Create account",
        AuthMode::SignUp => "Ctrl+T: Have an account?",
    };
    Line::from(vec![
        Span::styled("  Enter: Continue │ Tab: Next │ ", Style::default().fg(MUTED_TEXT)),
        Span::styled(switch, Style::default().fg(ACCENT)),
        Span::styled(" │ Esc", Style::default().fg(MUTED_TEXT)),
    ])
}

fn render_lines(frame: &mut Frame, area: Rect, lines: Vec<Line<'static>>) {
    frame.render_widget(Paragraph::new(lines), area);
}

/// Keeps the tail of long values visible, like a scrolled text field.
fn truncate_left(value: &str, max_chars: usize) -> String {
    let count = value.chars().count();
    if count <= max_chars {
        return value.to_string();
    }
    let tail: String = value.chars().skip(count - max_chars + 1).collect();
    format!("…{}", tail)
}
