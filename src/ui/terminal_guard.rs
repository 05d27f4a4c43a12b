use crossterm::cursor::Show;
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, Clear as TermClear,
    ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use parking_lot::Mutex;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::sync::Arc;

type Restore = Box<dyn FnOnce() + Send + 'static>;

/// Puts the terminal back exactly once: on drop, or from the panic hook if a
/// panic gets there first.
///
/// The handoff JSON is printed after the guard is dropped, so it lands on the
/// normal screen rather than the alternate one.
pub struct TerminalGuard {
    restore: Arc<Mutex<Option<Restore>>>,
    keyboard_enhanced: bool,
}

impl TerminalGuard {
    fn armed(restore: impl FnOnce() + Send + 'static, keyboard_enhanced: bool) -> Self {
        Self {
            restore: Arc::new(Mutex::new(Some(Box::new(restore)))),
            keyboard_enhanced,
        }
    }

    /// Whether the terminal reports modifiers on Enter, so Shift+Enter can be
    /// told apart from a plain Enter.
    pub fn keyboard_enhanced(&self) -> bool {
        self.keyboard_enhanced
    }

    fn install_panic_hook(&self) {
        let restore = Arc::clone(&self.restore);
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            run_once(&restore);
            previous(info);
        }));
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        run_once(&self.restore);
    }
}

fn run_once(slot: &Mutex<Option<Restore>>) {
    let restore = slot.lock().take();
    if let Some(restore) = restore {
        restore();
    }
}

fn leave_entry_screen(keyboard_enhanced: bool) {
    let mut stdout = io::stdout();
    if keyboard_enhanced {
        let _ = stdout.execute(PopKeyboardEnhancementFlags);
    }
    let _ = disable_raw_mode();
    let _ = stdout.execute(DisableBracketedPaste);
    let _ = stdout.execute(LeaveAlternateScreen);
    let _ = stdout.execute(Show);
}

/// Enters raw mode on the alternate screen with bracketed paste, so a
/// multi-line paste arrives as one event instead of a burst of Enter keys.
///
/// Where the terminal supports it, escape codes are disambiguated so that
/// Shift+Enter arrives with its modifier instead of as a plain Enter.
pub fn setup_terminal() -> io::Result<(Terminal<CrosstermBackend<Stdout>>, TerminalGuard)> {
    enable_raw_mode()?;
    let keyboard_enhanced = supports_keyboard_enhancement().unwrap_or(false);
    let guard = TerminalGuard::armed(
        move || leave_entry_screen(keyboard_enhanced),
        keyboard_enhanced,
    );
    guard.install_panic_hook();

    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableBracketedPaste)?;
    if keyboard_enhanced {
        stdout.execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES,
        ))?;
    }
    tracing::debug!(keyboard_enhanced, "Terminal ready");
    stdout.execute(TermClear(ClearType::All))?;

    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok((terminal, guard))
}
