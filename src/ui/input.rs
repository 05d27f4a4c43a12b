use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::ui::app::App;
use crate::ui::auth::AuthIntent;

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if is_ctrl_char(key, 'q') || is_ctrl_char(key, 'c') {
        app.request_quit();
        return;
    }

    if app.auth_dialog().is_visible() {
        handle_dialog_key(app, key);
        return;
    }

    if is_ctrl_char(key, 'a') {
        app.request_sign_in();
        return;
    }
    if is_ctrl_char(key, 'l') {
        app.request_logout();
        return;
    }
    if is_ctrl_char(key, 'u') {
        app.edit_draft(|input| input.clear());
        return;
    }

    if let Some(index) = suggestion_index(key) {
        app.edit_draft(|input| {
            input.apply_suggestion_at(index);
        });
        return;
    }

    let (submit, newline) = app.dispatcher().with_input(|input| {
        (
            input.submit_key_detected(&key),
            input.newline_key_detected(&key),
        )
    });
    if submit {
        app.request_submit();
        return;
    }
    if newline {
        app.edit_draft(|input| input.insert_newline());
        return;
    }

    match key.code {
        KeyCode::Backspace => app.edit_draft(|input| input.backspace()),
        KeyCode::Char(ch) if !has_command_modifier(key.modifiers) => {
            app.edit_draft(|input| input.insert_char(ch))
        }
        _ => {}
    }
}

fn handle_dialog_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Esc {
        app.dismiss_auth();
        return;
    }
    if is_ctrl_char(key, 't') {
        app.dispatch_auth(AuthIntent::ToggleMode);
        return;
    }

    let intent = match key.code {
        KeyCode::Enter => AuthIntent::Submit,
        KeyCode::Tab | KeyCode::Down => AuthIntent::NextField,
        KeyCode::BackTab | KeyCode::Up => AuthIntent::PrevField,
        KeyCode::Backspace => AuthIntent::Backspace,
        KeyCode::Char(ch) if !has_command_modifier(key.modifiers) => AuthIntent::Input(ch),
        _ => return,
    };
    app.dispatch_auth(intent);
}

/// Alt+1..9 maps to suggestion 0..8.
fn suggestion_index(key: KeyEvent) -> Option<usize> {
    if !key.modifiers.contains(KeyModifiers::ALT) {
        return None;
    }
    match key.code {
        KeyCode::Char(ch @ '1'..='9') => ch.to_digit(10).map(|n| n as usize - 1),
        _ => None,
    }
}

fn has_command_modifier(modifiers: KeyModifiers) -> bool {
    modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
        && !key.modifiers.contains(KeyModifiers::SHIFT)
}
