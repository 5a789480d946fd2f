#![allow(dead_code)]

use std::sync::Mutex;

use serde_json::{Value, json};
use tgcast::models::run_state::{Progress, RunState};
use tgcast::traits::presenter::{NoticeLevel, Presenter};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const TOKEN: &str = "123:abc";

pub fn bot_path(method_name: &str) -> String {
    format!("/bot{}/{}", TOKEN, method_name)
}

pub fn ok_body(result: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "result": result }))
}

pub fn error_body(status: u16, code: i64, description: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({
        "ok": false,
        "error_code": code,
        "description": description,
    }))
}

pub async fn mount_get_me(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(bot_path("getMe")))
        .respond_with(ok_body(json!({ "id": 42, "is_bot": true, "username": "cast_bot" })))
        .mount(server)
        .await;
}

pub async fn mount_get_me_unauthorized(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(bot_path("getMe")))
        .respond_with(error_body(401, 401, "Unauthorized"))
        .mount(server)
        .await;
}

/// Responds with `ok: true` for every chat except `failing`, which gets a 403.
pub async fn mount_send(server: &MockServer, method_name: &str, failing: &'static [&'static str]) {
    Mock::given(method("POST"))
        .and(path(bot_path(method_name)))
        .respond_with(move |req: &Request| {
            let chat_id = form_field(&req.body, "chat_id").unwrap_or_default();
            if failing.contains(&chat_id.as_str()) {
                error_body(403, 403, "Forbidden: bot was blocked by the user")
            } else {
                ok_body(json!({ "message_id": 1 }))
            }
        })
        .mount(server)
        .await;
}

/// Value of a multipart field, good enough for the small text parts the client sends.
pub fn form_field(body: &[u8], name: &str) -> Option<String> {
    let body = String::from_utf8_lossy(body);
    let marker = format!("form-data; name=\"{}\"", name);
    let start = body.find(&marker)?;
    let rest = &body[start..];
    let value_start = rest.find("\r\n\r\n")? + 4;
    let value = &rest[value_start..];
    let value_end = value.find("\r\n--")?;
    Some(value[..value_end].to_string())
}

/// Filename attribute of a multipart file field.
pub fn form_file_name(body: &[u8], name: &str) -> Option<String> {
    let body = String::from_utf8_lossy(body);
    let marker = format!("form-data; name=\"{}\"; filename=\"", name);
    let start = body.find(&marker)? + marker.len();
    let rest = &body[start..];
    Some(rest[..rest.find('"')?].to_string())
}

pub async fn requests_to(server: &MockServer, method_name: &str) -> Vec<Request> {
    let wanted = bot_path(method_name);
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.url.path() == wanted)
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Notice(NoticeLevel, String, String),
    Started(usize),
    Progress(Progress),
    Finished { success: usize, failure: usize },
    Aborted,
}

#[derive(Default)]
pub struct RecordingPresenter {
    pub events: Mutex<Vec<Event>>,
}

impl RecordingPresenter {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn notices(&self) -> Vec<(NoticeLevel, String, String)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Notice(level, title, text) => Some((level, title, text)),
                _ => None,
            })
            .collect()
    }
}

impl Presenter for RecordingPresenter {
    fn notify(&self, level: NoticeLevel, title: &str, text: &str) {
        self.events.lock().unwrap().push(Event::Notice(level, title.to_string(), text.to_string()));
    }

    fn started(&self, total: usize) {
        self.events.lock().unwrap().push(Event::Started(total));
    }

    fn progress(&self, progress: &Progress) {
        self.events.lock().unwrap().push(Event::Progress(progress.clone()));
    }

    fn finished(&self, state: &RunState) {
        self.events.lock().unwrap().push(Event::Finished { success: state.success, failure: state.failure });
    }

    fn aborted(&self) {
        self.events.lock().unwrap().push(Event::Aborted);
    }
}
