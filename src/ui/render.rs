use crate::gate::GateState;
use crate::ui::app::{App, StatusKind};
use crate::ui::auth::render_auth_dialog;
use crate::ui::footer::Footer;
use crate::ui::header::Header;
use crate::ui::layout::{body_regions, screen_regions};
use crate::ui::theme::{
    ACCENT, GLOBAL_BORDER, HEADER_TEXT, MUTED_TEXT, POPUP_BORDER, SPINNER_FRAMES, STATUS_ERROR,
    STATUS_OK,
};
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

const BODY_MAX_WIDTH: u16 = 80;
const EDITOR_MIN_LINES: u16 = 3;
const EDITOR_MAX_LINES: u16 = 8;
const PLACEHOLDER: &str = "Describe a website or app you want to make...";

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let regions = screen_regions(area);
    let (header, body, footer) = (regions.header, regions.body, regions.footer);
    let dispatcher = app.dispatcher();
    let session = dispatcher.session();

    frame.render_widget(Header::new().widget(session.as_ref()), header);
    frame.render_widget(Clear, body);

    let draft = dispatcher.draft();
    let editor_height = editor_height(&draft.text);
    let [greeting, editor, chips, status] = body_regions(body, editor_height, BODY_MAX_WIDTH);

    let first_name = session.as_ref().map(|s| s.first_name().to_string());
    frame.render_widget(greeting_widget(first_name.as_deref()), greeting);

    let can_submit = dispatcher.can_submit() && dispatcher.state().is_ready();
    render_editor(frame, editor, &draft.text, can_submit, !app.auth_dialog().is_visible());

    let suggestions = dispatcher.with_input(|input| input.suggestions().to_vec());
    frame.render_widget(suggestions_widget(&suggestions), chips);
    frame.render_widget(status_widget(app), status);

    let footer_bar = Footer::new(app.auth_dialog().is_visible(), app.keyboard_enhanced());
    frame.render_widget(footer_bar.widget(footer), footer);

    render_auth_dialog(frame, app.auth_dialog());
}

fn editor_height(text: &str) -> u16 {
    let lines = text.split('\n').count() as u16;
    lines.clamp(EDITOR_MIN_LINES, EDITOR_MAX_LINES) + 2
}

fn greeting_widget(first_name: Option<&str>) -> Paragraph<'static> {
    let hello = match first_name {
        Some(name) => format!("Hi {},", name),
        None => "Hi there,".to_string(),
    };
    Paragraph::new(vec![
        Line::from(Span::styled(hello, Style::default().fg(MUTED_TEXT))),
        Line::from(Span::styled(
            "what do you want to make?",
            Style::default().fg(HEADER_TEXT).add_modifier(Modifier::BOLD),
        )),
    ])
}

fn render_editor(frame: &mut Frame<'_>, area: Rect, text: &str, can_submit: bool, focused: bool) {
    let button_style = if can_submit {
        Style::default()
            .fg(HEADER_TEXT)
            .bg(ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(MUTED_TEXT).add_modifier(Modifier::DIM)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused { POPUP_BORDER } else { GLOBAL_BORDER }))
        .title_bottom(Line::from(Span::styled(" Send ↵ ", button_style)).right_aligned());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if text.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(PLACEHOLDER, Style::default().fg(MUTED_TEXT))),
            inner,
        );
        if focused && inner.width > 0 && inner.height > 0 {
            frame.set_cursor_position(Position::new(inner.x, inner.y));
        }
        return;
    }

    let lines: Vec<&str> = text.split('\n').collect();
    let scroll = (lines.len() as u16).saturating_sub(inner.height);
    let paragraph = Paragraph::new(
        lines
            .iter()
            .map(|line| Line::from(Span::styled(line.to_string(), Style::default().fg(HEADER_TEXT))))
            .collect::<Vec<_>>(),
    )
    .scroll((scroll, 0));
    frame.render_widget(paragraph, inner);

    if focused && inner.width > 0 && inner.height > 0 {
        let last = lines.last().map(|l| l.chars().count()).unwrap_or(0) as u16;
        let row = (lines.len() as u16 - 1 - scroll).min(inner.height - 1);
        let column = last.min(inner.width - 1);
        frame.set_cursor_position(Position::new(inner.x + column, inner.y + row));
    }
}

fn suggestions_widget(suggestions: &[String]) -> Paragraph<'static> {
    let mut spans = Vec::new();
    for (idx, suggestion) in suggestions.iter().take(9).enumerate() {
        spans.push(Span::styled(
            format!(" {} ", idx + 1),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!("{}   ", suggestion),
            Style::default().fg(MUTED_TEXT),
        ));
    }
    Paragraph::new(Line::from(spans)).wrap(Wrap { trim: true })
}

fn status_widget(app: &App) -> Paragraph<'static> {
    let state = app.dispatcher().state();
    let spinner = SPINNER_FRAMES[app.spinner_tick() % SPINNER_FRAMES.len()];
    let busy = match state {
        GateState::Idle | GateState::ProbingSession => Some("Checking your session..."),
        GateState::Dispatching => Some("Sending your prompt..."),
        GateState::AwaitingCredentials | GateState::Ready => None,
    };

    let line = if let Some(label) = busy {
        Line::from(vec![
            Span::styled(format!("{} ", spinner), Style::default().fg(STATUS_OK)),
            Span::styled(label, Style::default().fg(HEADER_TEXT)),
        ])
    } else if let Some(status) = app.status() {
        let color = match status.kind {
            StatusKind::Info => MUTED_TEXT,
            StatusKind::Error => STATUS_ERROR,
        };
        Line::from(Span::styled(status.text.clone(), Style::default().fg(color)))
    } else {
        Line::from("")
    };

    Paragraph::new(line)
}
