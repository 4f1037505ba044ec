mod common;

use verify_dialog_core::{
    BannerCategory, CorrelationId, DialogError, DialogState, InboundEffect, OutboundMessage,
    VerifyDialog,
};

use common::{english, open_dialog, FakeSurface, RecordingConnector};

const ALICE_FRAME: &str = r#"{"event":"verified-message","message":"line1\nline2","signers":[{"keyid":"ABCD1234","userid":"Alice","valid":true}]}"#;

#[test]
fn open_announces_dialog_on_derived_channel() {
    let dialog = open_dialog(FakeSurface::ready());
    assert_eq!(dialog.session().channel_name, "vDialog-7f3a");
    assert_eq!(dialog.state(), DialogState::Loading);
    assert!(dialog.chrome().spinner_visible);
    assert_eq!(
        dialog.channel().sent(),
        vec![OutboundMessage::PopupInit {
            sender: "vDialog-7f3a".to_owned()
        }]
    );
}

#[test]
fn open_fails_when_channel_cannot_connect() {
    let result: Result<VerifyDialog<_, FakeSurface>, _> = VerifyDialog::open(
        CorrelationId::new("x"),
        &RecordingConnector { fail: true },
        FakeSurface::ready(),
        english(),
    );
    assert!(matches!(result, Err(DialogError::ChannelUnavailable(_))));
}

#[test]
fn verified_message_renders_success_banner_and_body() {
    let surface = FakeSurface::ready();
    let mut dialog = open_dialog(surface.clone());

    let effect = dialog.handle_frame(ALICE_FRAME).expect("handle");
    assert!(matches!(effect, InboundEffect::Transitioned(_)));
    assert_eq!(dialog.state(), DialogState::ShowingResult);
    assert!(!dialog.chrome().spinner_visible);
    assert!(dialog.chrome().copy_enabled);
    assert!(dialog.chrome().surface_visible);

    let banners = surface.banners();
    assert_eq!(banners.len(), 1);
    assert_eq!(banners[0].category, BannerCategory::Success);
    assert!(banners[0].plain_text().contains("Alice"));
    assert!(banners[0].plain_text().contains("(Key ID: ABCD1234)"));
    assert_eq!(surface.content(), "line1<br>line2");
}

#[test]
fn missing_user_id_yields_warning_regardless_of_validity() {
    let surface = FakeSurface::ready();
    let mut dialog = open_dialog(surface.clone());
    dialog
        .handle_frame(r#"{"event":"verified-message","signers":[{"keyid":"ABCD1234","valid":false}]}"#)
        .expect("handle");
    let banners = surface.banners();
    assert_eq!(banners.len(), 1);
    assert_eq!(banners[0].category, BannerCategory::Warning);
}

#[test]
fn n_signers_produce_n_banners_in_order() {
    let surface = FakeSurface::ready();
    let mut dialog = open_dialog(surface.clone());
    dialog
        .handle_frame(
            r#"{"event":"verified-message","message":"m","signers":[
                {"keyid":"01","userid":"A","valid":true},
                {"keyid":"02"},
                {"keyid":"03","userid":"C","valid":false}
            ]}"#,
        )
        .expect("handle");
    let categories: Vec<_> = surface.banners().iter().map(|b| b.category).collect();
    assert_eq!(
        categories,
        vec![
            BannerCategory::Success,
            BannerCategory::Warning,
            BannerCategory::Danger
        ]
    );

    dialog.dismiss_banner(1).expect("dismiss middle banner");
    let state = surface.state.borrow();
    assert_eq!(
        state.banners.iter().map(|(_, d)| *d).collect::<Vec<_>>(),
        vec![false, true, false]
    );
}

#[test]
fn error_message_hides_surface_and_disables_copy() {
    let surface = FakeSurface::ready();
    let mut dialog = open_dialog(surface.clone());
    dialog
        .handle_frame(r#"{"event":"error-message","error":"bad signature"}"#)
        .expect("handle");

    assert_eq!(dialog.state(), DialogState::ShowingError);
    let chrome = dialog.chrome();
    assert!(!chrome.spinner_visible);
    assert!(!chrome.surface_visible);
    assert!(!chrome.copy_enabled);
    assert!(!surface.state.borrow().visible);
    let banner = chrome.error_banner.as_ref().expect("error banner");
    assert_eq!(banner.category, BannerCategory::Danger);
    assert_eq!(banner.body[0].text(), "bad signature");
    assert!(surface.banners().is_empty());
}

#[test]
fn error_before_surface_ready_is_not_dropped() {
    let surface = FakeSurface::default();
    let mut dialog = open_dialog(surface.clone());
    dialog
        .handle_frame(r#"{"event":"error-message","error":"bad signature"}"#)
        .expect("handle");
    surface.finish_loading();
    assert_eq!(dialog.surface_ready().expect("ready"), 0);
    assert!(dialog.chrome().error_banner.is_some());
    assert!(!dialog.chrome().copy_enabled);
}

#[test]
fn result_before_surface_ready_is_buffered_then_rendered() {
    let surface = FakeSurface::default();
    let mut dialog = open_dialog(surface.clone());

    let effect = dialog.handle_frame(ALICE_FRAME).expect("handle");
    assert!(matches!(effect, InboundEffect::Deferred(_)));
    assert_eq!(dialog.state(), DialogState::ShowingResult);
    assert_eq!(dialog.pending_outcomes(), 1);
    assert!(surface.banners().is_empty());

    assert!(dialog.surface_ready().is_err());

    surface.finish_loading();
    assert_eq!(dialog.surface_ready().expect("ready"), 1);
    assert_eq!(dialog.pending_outcomes(), 0);
    assert_eq!(surface.banners().len(), 1);
    assert_eq!(surface.content(), "line1<br>line2");
}

#[test]
fn unknown_event_keeps_loading_state() {
    let mut dialog = open_dialog(FakeSurface::ready());
    let effect = dialog.handle_frame(r#"{"event":"ping"}"#).expect("handle");
    assert_eq!(effect, InboundEffect::Ignored);
    assert_eq!(dialog.state(), DialogState::Loading);
    assert!(dialog.chrome().spinner_visible);
}

#[test]
fn second_result_rerenders_without_chrome_change() {
    let surface = FakeSurface::ready();
    let mut dialog = open_dialog(surface.clone());
    dialog.handle_frame(ALICE_FRAME).expect("first");
    let chrome = dialog.chrome().clone();

    let effect = dialog.handle_frame(ALICE_FRAME).expect("second");
    assert_eq!(effect, InboundEffect::Rerendered);
    assert_eq!(dialog.chrome(), &chrome);
    assert_eq!(surface.banners().len(), 2);
}

#[test]
fn late_error_after_result_is_ignored() {
    let mut dialog = open_dialog(FakeSurface::ready());
    dialog.handle_frame(ALICE_FRAME).expect("result");
    let effect = dialog
        .handle_frame(r#"{"event":"error-message","error":"late"}"#)
        .expect("late error");
    assert_eq!(effect, InboundEffect::Ignored);
    assert_eq!(dialog.state(), DialogState::ShowingResult);
    assert!(dialog.chrome().copy_enabled);
    assert!(dialog.chrome().error_banner.is_none());
}

#[test]
fn response_timeout_only_fires_while_loading() {
    let mut dialog = open_dialog(FakeSurface::ready());
    assert!(matches!(
        dialog.response_timeout(),
        InboundEffect::Transitioned(_)
    ));
    assert_eq!(dialog.state(), DialogState::ShowingError);
    let banner = dialog.chrome().error_banner.clone().expect("timeout banner");
    assert_eq!(banner.body[0].text(), "No response from verification");

    let mut answered = open_dialog(FakeSurface::ready());
    answered.handle_frame(ALICE_FRAME).expect("result");
    assert_eq!(answered.response_timeout(), InboundEffect::Ignored);
    assert_eq!(answered.state(), DialogState::ShowingResult);
}

#[test]
fn explicit_cancel_suppresses_teardown_notification() {
    let mut dialog = open_dialog(FakeSurface::ready());
    dialog.cancel();
    dialog.teardown();
    dialog.teardown();

    assert_eq!(dialog.channel().count("verify-dialog-cancel"), 1);
    assert_eq!(
        dialog.channel().sent()[1],
        OutboundMessage::UserInput {
            sender: "vDialog-7f3a".to_owned(),
            source: "security_log_verify_dialog".to_owned(),
            log_type: "security_log_dialog_ok".to_owned(),
        }
    );
}

#[test]
fn teardown_without_cancel_notifies_once() {
    let mut dialog = open_dialog(FakeSurface::ready());
    dialog.teardown();
    dialog.teardown();
    assert_eq!(dialog.channel().count("verify-dialog-cancel"), 1);
    assert_eq!(dialog.channel().count("verify-user-input"), 0);
}

#[test]
fn copy_logs_and_returns_surface_text() {
    let surface = FakeSurface::ready();
    let mut dialog = open_dialog(surface.clone());
    dialog.handle_frame(ALICE_FRAME).expect("result");

    let text = dialog.copy().expect("copy");
    assert_eq!(text, "line1<br>line2");
    assert!(surface.state.borrow().selected.is_none());
    assert_eq!(dialog.channel().count("verify-user-input"), 1);
}

#[test]
fn repeated_cancel_sends_one_cancel() {
    let mut dialog = open_dialog(FakeSurface::ready());
    dialog.cancel();
    dialog.cancel();
    dialog.teardown();

    assert_eq!(dialog.channel().count("verify-dialog-cancel"), 1);
    assert_eq!(dialog.channel().count("verify-user-input"), 1);
}

#[test]
fn copy_is_refused_while_showing_error() {
    let surface = FakeSurface::ready();
    let mut dialog = open_dialog(surface.clone());
    dialog
        .handle_frame(r#"{"event":"error-message","error":"bad signature"}"#)
        .expect("handle");

    let err = dialog.copy().expect_err("copy disabled");
    assert!(matches!(err, DialogError::CopyDisabled(DialogState::ShowingError)));
    assert_eq!(dialog.channel().count("verify-user-input"), 0);
    assert!(surface.state.borrow().selected.is_none());
}

#[test]
fn known_event_with_bad_payload_shows_error() {
    let mut dialog = open_dialog(FakeSurface::ready());
    let effect = dialog
        .handle_frame(r#"{"event":"error-message"}"#)
        .expect("handled as error");

    assert!(matches!(effect, InboundEffect::Transitioned(_)));
    assert_eq!(dialog.state(), DialogState::ShowingError);
    let chrome = dialog.chrome();
    assert!(!chrome.spinner_visible);
    assert!(!chrome.copy_enabled);
    let banner = chrome.error_banner.as_ref().expect("error banner");
    assert!(banner.body[0].text().starts_with("error-message: "));
}

#[test]
fn malformed_json_leaves_dialog_loading() {
    let mut dialog = open_dialog(FakeSurface::ready());
    let err = dialog.handle_frame("not json").expect_err("malformed");
    assert!(matches!(err, DialogError::Protocol(_)));
    assert_eq!(dialog.state(), DialogState::Loading);
    assert!(dialog.chrome().spinner_visible);
}

#[test]
fn result_after_response_timeout_replaces_the_error() {
    let surface = FakeSurface::ready();
    let mut dialog = open_dialog(surface.clone());
    dialog.response_timeout();
    assert_eq!(dialog.state(), DialogState::ShowingError);

    let effect = dialog.handle_frame(ALICE_FRAME).expect("late result");
    assert!(matches!(effect, InboundEffect::Transitioned(_)));
    assert_eq!(dialog.state(), DialogState::ShowingResult);
    let chrome = dialog.chrome();
    assert!(chrome.surface_visible);
    assert!(chrome.copy_enabled);
    assert!(chrome.error_banner.is_none());
    assert!(surface.state.borrow().visible);
    assert_eq!(surface.banners().len(), 1);
}

#[test]
fn result_after_host_error_is_not_shown() {
    let surface = FakeSurface::ready();
    let mut dialog = open_dialog(surface.clone());
    dialog
        .handle_frame(r#"{"event":"error-message","error":"bad signature"}"#)
        .expect("error");

    let effect = dialog.handle_frame(ALICE_FRAME).expect("result");
    assert_eq!(effect, InboundEffect::Rerendered);
    assert_eq!(dialog.state(), DialogState::ShowingError);
    assert!(!dialog.chrome().copy_enabled);
    assert!(!surface.state.borrow().visible);
}
