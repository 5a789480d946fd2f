mod common;

use std::fs;
use std::sync::Arc;
use std::time::Duration;

use common::*;
use pretty_assertions::assert_eq;
use tgcast::error::BroadcastError;
use tgcast::models::method::SendMethod;
use tgcast::models::recipients::RecipientList;
use tgcast::models::types::{Attachment, BroadcastRequest, Payload};
use tgcast::services::dispatcher::Broadcaster;
use tgcast::services::logs::BroadcastLogs;
use tgcast::services::settings::{AppConfig, BroadcastConfig, OutputConfig, RecipientsConfig, TelegramConfig};
use tgcast::services::telegram_client::RealTelegramApi;
use tgcast::traits::presenter::NoticeLevel;
use wiremock::MockServer;

fn broadcaster(server: &MockServer, presenter: Arc<RecordingPresenter>) -> Broadcaster {
    let api = RealTelegramApi::new(server.uri(), Some(Duration::from_secs(5))).unwrap();
    Broadcaster::builder().api(Arc::new(api)).presenter(presenter).build()
}

#[tokio::test]
async fn text_broadcast_over_http() {
    let server = MockServer::start().await;
    mount_get_me(&server).await;
    mount_send(&server, "sendMessage", &["222"]).await;

    let presenter = Arc::new(RecordingPresenter::default());
    let request = BroadcastRequest::builder()
        .token(TOKEN)
        .payload(Payload::builder().text("Hello").build())
        .batch_size(2)
        .interval(Duration::ZERO)
        .build();
    let recipients = RecipientList::from_text("111\n222\n\n 333 ");

    let report = broadcaster(&server, presenter.clone())
        .start(&request, &recipients)
        .await
        .unwrap();

    assert_eq!(report.batches, 2);
    assert_eq!(report.state.success, 2);
    assert_eq!(report.state.failure, 1);
    assert_eq!(report.state.failed_ids, vec!["222".into()]);
    assert_eq!(
        report.state.failed_details,
        vec!["ID: 222, Error: Forbidden: bot was blocked by the user".to_string()]
    );

    let sent = requests_to(&server, "sendMessage").await;
    let mut chat_ids: Vec<String> = sent.iter().filter_map(|r| form_field(&r.body, "chat_id")).collect();
    chat_ids.sort();
    assert_eq!(chat_ids, vec!["111", "222", "333"]);
    assert_eq!(requests_to(&server, "getMe").await.len(), 1);

    let notices = presenter.notices();
    assert_eq!(
        notices.last().unwrap(),
        &(
            NoticeLevel::Success,
            "Broadcast Completed".to_string(),
            "Successfully sent to 2 users, failed for 1 users.".to_string()
        )
    );
}

#[tokio::test]
async fn photo_broadcast_uploads_to_everyone() {
    let server = MockServer::start().await;
    mount_get_me(&server).await;
    mount_send(&server, "sendPhoto", &[]).await;

    let presenter = Arc::new(RecordingPresenter::default());
    let request = BroadcastRequest::builder()
        .token(TOKEN)
        .method(SendMethod::SendPhoto)
        .payload(
            Payload::builder()
                .caption("new menu")
                .attachment(Attachment::new("menu.png", &b"png"[..]))
                .build(),
        )
        .interval(Duration::ZERO)
        .build();

    let report = broadcaster(&server, presenter)
        .start(&request, &RecipientList::from_ids(["1", "2"]))
        .await
        .unwrap();

    assert_eq!(report.state.success, 2);
    for r in requests_to(&server, "sendPhoto").await {
        assert_eq!(form_file_name(&r.body, "photo").as_deref(), Some("menu.png"));
        assert_eq!(form_field(&r.body, "caption").as_deref(), Some("new menu"));
    }
}

#[tokio::test]
async fn rejected_token_stops_before_any_send() {
    let server = MockServer::start().await;
    mount_get_me_unauthorized(&server).await;
    mount_send(&server, "sendMessage", &[]).await;

    let presenter = Arc::new(RecordingPresenter::default());
    let request = BroadcastRequest::builder()
        .token(TOKEN)
        .payload(Payload::builder().text("Hello").build())
        .interval(Duration::ZERO)
        .build();

    let err = broadcaster(&server, presenter.clone())
        .start(&request, &RecipientList::from_ids(["1"]))
        .await
        .unwrap_err();

    assert!(matches!(&err, BroadcastError::InvalidToken(d) if d == "Unauthorized"));
    assert!(requests_to(&server, "sendMessage").await.is_empty());
    assert!(presenter.events().contains(&Event::Aborted));
    assert_eq!(presenter.notices()[0].1, "Invalid Bot Token");
}

#[tokio::test]
async fn run_with_config_writes_logs_file() {
    let server = MockServer::start().await;
    mount_get_me(&server).await;
    mount_send(&server, "sendMessage", &["3"]).await;

    let dir = tempfile::tempdir().unwrap();
    let export = dir.path().join("result.json");
    fs::write(&export, r#"{"chats":[{"id":1},{"id":0}],"users":[{"id":2},{"id":3}]}"#).unwrap();
    let logs_path = dir.path().join("out").join("broadcast_logs.json");

    let cfg = AppConfig {
        telegram: Some(TelegramConfig {
            api_base_url: Some(server.uri()),
            bot_token: Some(TOKEN.to_string()),
            request_timeout_secs: Some(5),
        }),
        broadcast: Some(BroadcastConfig {
            text: Some("Hello".to_string()),
            interval_ms: Some(0),
            ..BroadcastConfig::default()
        }),
        recipients: Some(RecipientsConfig {
            ids: Some(vec!["999".to_string()]),
            export_file: Some(export),
            ..RecipientsConfig::default()
        }),
        output: Some(OutputConfig { logs_path: Some(logs_path.clone()), ..OutputConfig::default() }),
    };

    tgcast::run_with_config(cfg).await.unwrap();

    let logs: BroadcastLogs = serde_json::from_str(&fs::read_to_string(&logs_path).unwrap()).unwrap();
    let mut success = logs.success_ids.clone();
    success.sort();
    assert_eq!(success, vec!["1", "2"]);
    assert_eq!(logs.failed_ids, vec!["3"]);
    assert_eq!(logs.failed_details.len(), 1);
}
