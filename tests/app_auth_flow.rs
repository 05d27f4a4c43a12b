//! Drives `App` and the sign-in dialog through the event channel, without a
//! terminal.

mod common;

use common::*;
use promptgate::config::TimeoutConfig;
use promptgate::gate::{GateState, InputController, SubmissionDispatcher};
use promptgate::identity::IdentityService;
use promptgate::pipeline::CreationPipeline;
use promptgate::ui::app::{App, StatusKind};
use promptgate::ui::auth::{AuthIntent, ModalAuthGate};
use promptgate::ui::events::AppEvent;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

struct Rig {
    app: App,
    events: mpsc::Receiver<AppEvent>,
    pipeline: Arc<FakePipeline>,
}

fn rig(identity: FakeIdentity, pipeline: FakePipeline) -> Rig {
    let (tx, rx) = mpsc::channel();
    let identity: Arc<FakeIdentity> = Arc::new(identity);
    let pipeline = Arc::new(pipeline);
    let dispatcher = Arc::new(SubmissionDispatcher::new(
        identity.clone() as Arc<dyn IdentityService>,
        Arc::new(ModalAuthGate::new(tx.clone())),
        pipeline.clone() as Arc<dyn CreationPipeline>,
        InputController::new("general", promptgate::config::default_suggestions()),
        TimeoutConfig::default(),
    ));
    let app = App::new(
        dispatcher,
        identity,
        tokio::runtime::Handle::current(),
        tx,
        Duration::from_secs(2),
    );
    Rig {
        app,
        events: rx,
        pipeline,
    }
}

/// Waits for the next app event without routing it.
async fn next_event(rig: &mut Rig) -> AppEvent {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(3);
    loop {
        match rig.events.try_recv() {
            Ok(event) => return event,
            Err(mpsc::TryRecvError::Empty) if tokio::time::Instant::now() < deadline => {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
            Err(err) => panic!("no app event: {:?}", err),
        }
    }
}

/// Waits for the next app event and routes it like the terminal loop does.
async fn pump(rig: &mut Rig) -> &'static str {
    let event = next_event(rig).await;
    route(&mut rig.app, event)
}

fn route(app: &mut App, event: AppEvent) -> &'static str {
    match event {
        AppEvent::SessionProbed => {
            app.on_session_probed();
            "probed"
        }
        AppEvent::AuthRequested { respond_to } => {
            app.on_auth_requested(respond_to);
            "auth"
        }
        AppEvent::CredentialsVerified { generation, result } => {
            app.on_credentials_verified(generation, result);
            "verified"
        }
        AppEvent::SubmitFinished(outcome) => {
            app.on_submit_finished(outcome);
            "submitted"
        }
        AppEvent::SignInFinished(outcome) => {
            app.on_sign_in_finished(outcome);
            "signed_in"
        }
        AppEvent::SignedOut => {
            app.on_signed_out();
            "signed_out"
        }
        _ => "other",
    }
}

fn type_into_dialog(app: &mut App, text: &str) {
    for ch in text.chars() {
        app.dispatch_auth(AuthIntent::Input(ch));
    }
}

async fn started(identity: FakeIdentity, pipeline: FakePipeline) -> Rig {
    let mut rig = rig(identity, pipeline);
    rig.app.start();
    assert_eq!(pump(&mut rig).await, "probed");
    rig
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn sign_in_through_dialog_then_handoff() {
    let mut rig = started(FakeIdentity::signed_out(), FakePipeline::accepting()).await;
    rig.app.edit_draft(|input| input.insert_str("Weather dashboard"));

    rig.app.request_submit();
    assert_eq!(pump(&mut rig).await, "auth");
    assert!(rig.app.auth_dialog().is_visible());

    type_into_dialog(&mut rig.app, "z@x.com");
    rig.app.dispatch_auth(AuthIntent::NextField);
    type_into_dialog(&mut rig.app, "pw");
    rig.app.dispatch_auth(AuthIntent::Submit);
    assert!(rig.app.auth_dialog().is_verifying());

    assert_eq!(pump(&mut rig).await, "verified");
    assert!(!rig.app.auth_dialog().is_visible());
    assert_eq!(pump(&mut rig).await, "submitted");

    assert!(rig.app.should_quit());
    let handoff = rig.app.take_handoff().expect("handoff");
    assert_eq!(handoff.prompt, "Weather dashboard");
    assert_eq!(
        rig.pipeline.calls(),
        vec![("Weather dashboard".to_string(), "general".to_string())]
    );
    assert_eq!(
        rig.app.dispatcher().session().map(|s| s.email),
        Some("z@x.com".to_string())
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn dismissing_dialog_keeps_draft() {
    let mut rig = started(FakeIdentity::signed_out(), FakePipeline::accepting()).await;
    rig.app.edit_draft(|input| input.insert_str("Recipe finder"));

    rig.app.request_submit();
    assert_eq!(pump(&mut rig).await, "auth");
    rig.app.dismiss_auth();
    assert_eq!(pump(&mut rig).await, "submitted");

    assert!(!rig.app.should_quit());
    assert_eq!(rig.app.dispatcher().draft().text, "Recipe finder");
    assert_eq!(rig.app.dispatcher().state(), GateState::Ready);
    assert_eq!(rig.app.status().map(|s| s.kind), Some(StatusKind::Info));
    assert!(rig.pipeline.calls().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn rejection_shows_error_until_next_edit() {
    let mut rig = started(
        FakeIdentity::signed_in(zo()),
        FakePipeline::rejecting_once(422, "Prompt too vague"),
    )
    .await;
    rig.app.edit_draft(|input| input.insert_str("app"));

    rig.app.request_submit();
    assert_eq!(pump(&mut rig).await, "submitted");

    let status = rig.app.status().cloned().expect("status");
    assert_eq!(status.kind, StatusKind::Error);
    assert_eq!(status.text, "Prompt too vague");
    assert_eq!(rig.app.dispatcher().draft().text, "app");

    rig.app.edit_draft(|input| input.insert_char('s'));
    assert!(rig.app.status().is_none());
    assert_eq!(rig.app.dispatcher().last_failure(), None);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn paste_goes_to_dialog_while_open() {
    let mut rig = started(FakeIdentity::signed_out(), FakePipeline::accepting()).await;
    rig.app.request_sign_in();
    assert_eq!(pump(&mut rig).await, "auth");

    rig.app.on_paste("z@x.com\n");
    rig.app.edit_draft(|input| input.insert_str("ignored"));

    let form = rig.app.auth_dialog().form().expect("form").clone();
    assert_eq!(form.email, "z@x.com");
    assert_eq!(rig.app.dispatcher().draft().text, "");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn shutdown_abandons_open_dialog() {
    let mut rig = started(FakeIdentity::signed_out(), FakePipeline::accepting()).await;
    rig.app.request_sign_in();
    assert_eq!(pump(&mut rig).await, "auth");

    rig.app.shutdown();

    assert_eq!(pump(&mut rig).await, "signed_in");
    assert!(rig.app.dispatcher().session().is_none());
    assert_eq!(rig.app.dispatcher().state(), GateState::Idle);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn logout_reports_signed_out() {
    let mut rig = started(FakeIdentity::signed_in(zo()), FakePipeline::accepting()).await;
    assert_eq!(
        rig.app.status().map(|s| s.text.as_str()),
        Some("Signed in as z@x.com")
    );

    rig.app.request_logout();
    assert_eq!(pump(&mut rig).await, "signed_out");

    assert!(rig.app.dispatcher().session().is_none());
    assert_eq!(rig.app.status().map(|s| s.text.as_str()), Some("Signed out"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn late_answer_from_dismissed_dialog_is_dropped() {
    let mut rig = started(FakeIdentity::signed_out(), FakePipeline::accepting()).await;

    rig.app.request_sign_in();
    assert_eq!(pump(&mut rig).await, "auth");
    type_into_dialog(&mut rig.app, "first@x.com");
    rig.app.dispatch_auth(AuthIntent::NextField);
    type_into_dialog(&mut rig.app, "pw");
    rig.app.dispatch_auth(AuthIntent::Submit);

    // Hold the first answer back while the user gives up and starts over.
    let first_answer = next_event(&mut rig).await;
    assert!(matches!(first_answer, AppEvent::CredentialsVerified { .. }));
    rig.app.dismiss_auth();
    assert_eq!(pump(&mut rig).await, "signed_in");
    assert!(rig.app.dispatcher().session().is_none());

    rig.app.request_sign_in();
    assert_eq!(pump(&mut rig).await, "auth");
    type_into_dialog(&mut rig.app, "second@x.com");
    rig.app.dispatch_auth(AuthIntent::NextField);
    type_into_dialog(&mut rig.app, "pw");
    rig.app.dispatch_auth(AuthIntent::Submit);
    assert!(rig.app.auth_dialog().is_verifying());

    route(&mut rig.app, first_answer);
    rig.app.on_credentials_verified(0, Err("Invalid email or password".to_string()));
    assert!(rig.app.auth_dialog().is_verifying());
    assert_eq!(rig.app.auth_dialog().error_message(), None);
    assert!(rig.app.dispatcher().session().is_none());

    assert_eq!(pump(&mut rig).await, "verified");
    assert!(!rig.app.auth_dialog().is_visible());
    assert_eq!(pump(&mut rig).await, "signed_in");
    assert_eq!(
        rig.app.dispatcher().session().map(|s| s.email),
        Some("second@x.com".to_string())
    );
}
