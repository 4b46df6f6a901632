//! Tests for code entry driving the workflow (focus, paste, auto-submit).

use crate::domain::entities::session::AttemptState;
use crate::errors::FlowError;
use crate::workflow::config::FlowConfig;
use crate::workflow::service::VerificationFlow;
use std::sync::Arc;

use super::mocks::{registration_fields, GatewayCall, MockGateway, RecordingView, ViewEvent};

async fn awaiting_flow(
    gateway: &Arc<MockGateway>,
    view: &Arc<RecordingView>,
) -> VerificationFlow<MockGateway, RecordingView> {
    let mut flow = VerificationFlow::new(
        Arc::clone(gateway),
        Arc::clone(view),
        FlowConfig::registration(),
    );
    flow.submit_form(registration_fields()).await.unwrap();
    view.clear_events();
    flow
}

#[tokio::test]
async fn test_digits_render_slots_and_advance_focus() {
    let gateway = MockGateway::new();
    let view = RecordingView::new();
    let mut flow = awaiting_flow(&gateway, &view).await;

    flow.press_digit('5').await.unwrap();
    flow.press_digit('9').await.unwrap();

    let focuses: Vec<usize> = view
        .events()
        .into_iter()
        .filter_map(|e| match e {
            ViewEvent::Focus(index) => Some(index),
            _ => None,
        })
        .collect();
    assert_eq!(focuses, vec![1, 2]);
    assert_eq!(flow.buffer().slots()[0], Some('5'));
    assert_eq!(flow.buffer().slots()[1], Some('9'));
}

#[tokio::test]
async fn test_non_digit_keystroke_changes_nothing() {
    let gateway = MockGateway::new();
    let view = RecordingView::new();
    let mut flow = awaiting_flow(&gateway, &view).await;

    flow.press_digit('x').await.unwrap();

    assert!(flow.buffer().slots().iter().all(Option::is_none));
    assert!(view.events().is_empty());
}

#[tokio::test]
async fn test_backspace_retreats_into_previous_slot() {
    let gateway = MockGateway::new();
    let view = RecordingView::new();
    let mut flow = awaiting_flow(&gateway, &view).await;

    flow.press_digit('5').await.unwrap();
    flow.press_backspace().unwrap(); // focused empty slot 1 -> retreat
    flow.press_backspace().unwrap(); // clears slot 0

    assert!(flow.buffer().slots().iter().all(Option::is_none));
    assert_eq!(flow.buffer().focused_slot(), 0);
}

#[tokio::test]
async fn test_full_width_paste_auto_submits() {
    let gateway = MockGateway::new();
    let view = RecordingView::new();
    let mut flow = awaiting_flow(&gateway, &view).await;

    flow.paste_code("code is 934 671, expires soon").await.unwrap();

    assert_eq!(flow.state(), AttemptState::Verified);
    match gateway.calls().last().unwrap() {
        GatewayCall::Verify { code, .. } => assert_eq!(code, "934671"),
        other => panic!("expected verify call, got {:?}", other),
    }
}

#[tokio::test]
async fn test_short_paste_does_not_auto_submit() {
    let gateway = MockGateway::new();
    let view = RecordingView::new();
    let mut flow = awaiting_flow(&gateway, &view).await;
    let calls = gateway.calls().len();

    flow.paste_code("123").await.unwrap();

    assert_eq!(flow.state(), AttemptState::AwaitingCode);
    assert_eq!(gateway.calls().len(), calls);
    assert_eq!(flow.buffer().focused_slot(), 2);
}

#[tokio::test]
async fn test_final_keystroke_auto_submits() {
    let gateway = MockGateway::new();
    let view = RecordingView::new();
    let mut flow = awaiting_flow(&gateway, &view).await;

    for ch in ['1', '2', '3', '4', '5'] {
        flow.press_digit(ch).await.unwrap();
        assert_eq!(flow.state(), AttemptState::AwaitingCode);
    }
    flow.press_digit('6').await.unwrap();

    assert_eq!(flow.state(), AttemptState::Verified);
}

#[tokio::test]
async fn test_code_entry_requires_awaiting_state() {
    let gateway = MockGateway::new();
    let view = RecordingView::new();
    let mut flow = VerificationFlow::new(
        Arc::clone(&gateway),
        Arc::clone(&view),
        FlowConfig::registration(),
    );

    let result = flow.press_digit('1').await;
    assert!(matches!(result, Err(FlowError::NotAllowed { .. })));
}
