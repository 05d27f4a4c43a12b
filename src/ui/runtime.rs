use std::io;
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Runtime;

use crate::config::Config;
use crate::gate::{AuthGate, InputController, SubmissionDispatcher};
use crate::identity::{HttpIdentityService, IdentityService};
use crate::pipeline::{CreationPipeline, Handoff, HttpCreationPipeline};
use crate::ui::app::App;
use crate::ui::auth::ModalAuthGate;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::handle_key;
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;

/// Runs the entry screen until the user quits or a prompt is accepted.
///
/// Returns the handoff of the accepted prompt, with the terminal already
/// restored.
pub fn run(config: &Config, runtime: &Runtime) -> io::Result<Option<Handoff>> {
    let tick_rate = Duration::from_millis(100);
    let events = EventHandler::new(tick_rate);

    // reqwest clients register with the ambient runtime
    let _enter = runtime.enter();
    let identity: Arc<dyn IdentityService> = Arc::new(HttpIdentityService::new(
        config.identity.clone(),
        &config.timeouts,
    ));
    let pipeline: Arc<dyn CreationPipeline> = Arc::new(HttpCreationPipeline::new(
        config.pipeline.clone(),
        &config.timeouts,
    ));
    let gate: Arc<dyn AuthGate> = Arc::new(ModalAuthGate::new(events.sender()));
    let input = InputController::new(
        config.pipeline.category.clone(),
        config.suggestions.clone(),
    );
    let dispatcher = Arc::new(SubmissionDispatcher::new(
        Arc::clone(&identity),
        gate,
        pipeline,
        input,
        config.timeouts.clone(),
    ));

    let (mut terminal, guard) = setup_terminal()?;
    let mut app = App::new(
        dispatcher,
        identity,
        runtime.handle().clone(),
        events.sender(),
        config.timeouts.verify(),
    );
    app.set_keyboard_enhanced(guard.keyboard_enhanced());
    app.start();

    loop {
        terminal.draw(|frame| draw(frame, &app))?;
        if app.should_quit() {
            break;
        }

        match events.next(tick_rate) {
            Ok(AppEvent::Key(key)) => handle_key(&mut app, key),
            Ok(AppEvent::Paste(text)) => app.on_paste(&text),
            Ok(AppEvent::Tick) => app.on_tick(),
            Ok(AppEvent::Resize(_, _)) => {}
            Ok(AppEvent::SessionProbed) => app.on_session_probed(),
            Ok(AppEvent::AuthRequested { respond_to }) => app.on_auth_requested(respond_to),
            Ok(AppEvent::CredentialsVerified { generation, result }) => {
                app.on_credentials_verified(generation, result)
            }
            Ok(AppEvent::SubmitFinished(outcome)) => app.on_submit_finished(outcome),
            Ok(AppEvent::SignInFinished(outcome)) => app.on_sign_in_finished(outcome),
            Ok(AppEvent::SignedOut) => app.on_signed_out(),
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    app.shutdown();
    drop(guard);
    Ok(app.take_handoff())
}
