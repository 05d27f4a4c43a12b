use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// The pending prompt and its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftIntent {
    pub text: String,
    pub category: String,
}

/// Owns the draft buffer and decides when submit is enabled.
#[derive(Debug, Clone)]
pub struct InputController {
    draft: DraftIntent,
    suggestions: Vec<String>,
}

impl InputController {
    pub fn new(category: impl Into<String>, suggestions: Vec<String>) -> Self {
        Self {
            draft: DraftIntent {
                text: String::new(),
                category: category.into(),
            },
            suggestions,
        }
    }

    pub fn draft(&self) -> &DraftIntent {
        &self.draft
    }

    pub fn text(&self) -> &str {
        &self.draft.text
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Replaces the buffer. No validation at set time.
    pub fn set_text(&mut self, value: impl Into<String>) {
        self.draft.text = value.into();
    }

    /// One-click population from the suggestion catalog.
    pub fn apply_suggestion(&mut self, value: &str) {
        self.set_text(value);
    }

    /// Applies the catalog entry at `index`. Returns false if out of range.
    pub fn apply_suggestion_at(&mut self, index: usize) -> bool {
        match self.suggestions.get(index).cloned() {
            Some(suggestion) => {
                self.apply_suggestion(&suggestion);
                true
            }
            None => false,
        }
    }

    /// True iff the trimmed text is non-empty.
    pub fn can_submit(&self) -> bool {
        !self.draft.text.trim().is_empty()
    }

    /// True for an Enter press without a newline modifier.
    ///
    /// Shift+Enter and Alt+Enter request a literal newline instead.
    pub fn submit_key_detected(&self, event: &KeyEvent) -> bool {
        event.kind == KeyEventKind::Press
            && event.code == KeyCode::Enter
            && !is_newline_modifier(event.modifiers)
    }

    /// True for Enter combined with a newline modifier.
    pub fn newline_key_detected(&self, event: &KeyEvent) -> bool {
        event.kind == KeyEventKind::Press
            && event.code == KeyCode::Enter
            && is_newline_modifier(event.modifiers)
    }

    pub fn insert_char(&mut self, ch: char) {
        self.draft.text.push(ch);
    }

    /// Appends pasted text, normalizing line endings.
    pub fn insert_str(&mut self, text: &str) {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        self.draft.text.push_str(&normalized);
    }

    pub fn insert_newline(&mut self) {
        self.draft.text.push('\n');
    }

    pub fn backspace(&mut self) {
        self.draft.text.pop();
    }

    pub fn clear(&mut self) {
        self.draft.text.clear();
    }
}

fn is_newline_modifier(modifiers: KeyModifiers) -> bool {
    modifiers.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT)
}
