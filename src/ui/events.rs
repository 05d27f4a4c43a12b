use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent};
use tokio::sync::oneshot;

use crate::gate::{AuthOutcome, SignInOutcome, SubmitOutcome};
use crate::identity::Session;

pub enum AppEvent {
    Key(KeyEvent),
    Paste(String),
    Tick,
    Resize(u16, u16),
    /// Startup session check finished.
    SessionProbed,
    /// The gate wants credentials; answer through `respond_to`.
    AuthRequested {
        respond_to: oneshot::Sender<AuthOutcome>,
    },
    /// Identity service answered the dialog's credentials. `generation`
    /// names the verification that produced the answer.
    CredentialsVerified {
        generation: u64,
        result: Result<Session, String>,
    },
    SubmitFinished(SubmitOutcome),
    SignInFinished(SignInOutcome),
    SignedOut,
}

pub struct EventHandler {
    rx: Receiver<AppEvent>,
    tx: mpsc::Sender<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let event_tx = tx.clone();

        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                // Use short poll timeout so a closed receiver is noticed quickly
                let timeout = tick_rate
                    .saturating_sub(last_tick.elapsed())
                    .min(Duration::from_millis(50));

                let forwarded = match event::poll(timeout) {
                    Ok(true) => match event::read() {
                        Ok(Event::Key(key)) => event_tx.send(AppEvent::Key(key)),
                        Ok(Event::Paste(text)) => event_tx.send(AppEvent::Paste(text)),
                        Ok(Event::Resize(cols, rows)) => {
                            event_tx.send(AppEvent::Resize(cols, rows))
                        }
                        Ok(_) => Ok(()),
                        Err(err) => {
                            tracing::error!(error = %err, "Terminal read failed");
                            break;
                        }
                    },
                    Ok(false) => Ok(()),
                    Err(err) => {
                        tracing::error!(error = %err, "Terminal poll failed");
                        break;
                    }
                };
                if forwarded.is_err() {
                    break;
                }

                if last_tick.elapsed() >= tick_rate {
                    if event_tx.send(AppEvent::Tick).is_err() {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Self { rx, tx }
    }

    pub fn next(&self, timeout: Duration) -> Result<AppEvent, mpsc::RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    pub fn sender(&self) -> mpsc::Sender<AppEvent> {
        self.tx.clone()
    }
}
