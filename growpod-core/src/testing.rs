//! Test doubles for the transport, sign-in and calendar seams.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::api::{ApiRequest, ApiResponse, GrowPodClient, Method, Transport};
use crate::calendar::{CalendarEvent, CalendarProvider, DayRange, ProviderEvent};
use crate::error::{GrowPodError, GrowPodResult};
use crate::session::{SignInProvider, SocialUser};

#[derive(Clone)]
enum Reply {
    Response(ApiResponse),
    NetworkError(String),
    Hang,
}

/// Scripted transport recording every request it receives.
///
/// Replies are queued per (method, path); the last queued reply repeats.
/// Unscripted routes answer 404.
#[derive(Default)]
pub struct FakeTransport {
    routes: Mutex<HashMap<(Method, String), VecDeque<Reply>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(FakeTransport::default())
    }

    pub fn client(self: &Arc<Self>) -> GrowPodClient {
        GrowPodClient::new(self.clone())
    }

    fn push(&self, method: Method, path: &str, reply: Reply) {
        self.routes
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
    }

    pub fn respond_json(&self, method: Method, path: &str, status: u16, body: serde_json::Value) {
        self.push(
            method,
            path,
            Reply::Response(ApiResponse {
                status,
                status_text: "OK".into(),
                body: body.to_string(),
            }),
        );
    }

    pub fn respond_status(&self, method: Method, path: &str, status: u16, status_text: &str) {
        self.push(
            method,
            path,
            Reply::Response(ApiResponse {
                status,
                status_text: status_text.into(),
                body: String::new(),
            }),
        );
    }

    pub fn fail_network(&self, method: Method, path: &str) {
        self.push(method, path, Reply::NetworkError("connection refused".into()));
    }

    /// The request never completes.
    pub fn hang(&self, method: Method, path: &str) {
        self.push(method, path, Reply::Hang);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    fn next_reply(&self, method: Method, path: &str) -> Option<Reply> {
        let mut routes = self.routes.lock().unwrap();
        let queue = routes.get_mut(&(method, path.to_string()))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> GrowPodResult<ApiResponse> {
        let reply = self.next_reply(request.method, &request.path);
        self.requests.lock().unwrap().push(request);

        match reply {
            Some(Reply::Response(resp)) => Ok(resp),
            Some(Reply::NetworkError(msg)) => Err(GrowPodError::Network(msg)),
            Some(Reply::Hang) => std::future::pending().await,
            None => Ok(ApiResponse {
                status: 404,
                status_text: "Not Found".into(),
                body: String::new(),
            }),
        }
    }
}

pub fn social_user(id: &str) -> SocialUser {
    SocialUser {
        provider: "fake".into(),
        id: id.into(),
        email: format!("{id}@example.com"),
        name: format!("User {id}"),
        photo_url: String::new(),
        first_name: "User".into(),
        last_name: id.into(),
        id_token: format!("token-{id}"),
    }
}

/// Sign-in provider that signs in as a fixed user.
pub struct FakeSignIn {
    pub user: SocialUser,
    pub persisted: Mutex<Option<SocialUser>>,
    pub sign_ins: AtomicUsize,
    pub sign_outs: AtomicUsize,
}

impl FakeSignIn {
    pub fn new(user: SocialUser) -> Arc<Self> {
        Arc::new(FakeSignIn {
            user,
            persisted: Mutex::new(None),
            sign_ins: AtomicUsize::new(0),
            sign_outs: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl SignInProvider for FakeSignIn {
    fn name(&self) -> &str {
        "fake"
    }

    async fn sign_in(&self) -> GrowPodResult<SocialUser> {
        self.sign_ins.fetch_add(1, Ordering::SeqCst);
        *self.persisted.lock().unwrap() = Some(self.user.clone());
        Ok(self.user.clone())
    }

    async fn restore(&self) -> GrowPodResult<Option<SocialUser>> {
        Ok(self.persisted.lock().unwrap().clone())
    }

    async fn sign_out(&self, _user: &SocialUser) -> GrowPodResult<()> {
        self.sign_outs.fetch_add(1, Ordering::SeqCst);
        *self.persisted.lock().unwrap() = None;
        Ok(())
    }
}

/// Calendar provider serving a fixed event list.
#[derive(Default)]
pub struct FakeCalendar {
    pub events: Vec<ProviderEvent>,
    /// Access was granted in an earlier session.
    pub stored_consent: bool,
    pub consents: AtomicUsize,
    pub inserted: Mutex<Vec<(String, CalendarEvent)>>,
    pub listed: Mutex<Vec<(String, DayRange)>>,
}

#[async_trait]
impl CalendarProvider for FakeCalendar {
    async fn has_consent(&self) -> bool {
        self.stored_consent
    }

    async fn request_consent(&self) -> GrowPodResult<()> {
        self.consents.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn list_events(
        &self,
        calendar_id: &str,
        range: &DayRange,
    ) -> GrowPodResult<Vec<ProviderEvent>> {
        self.listed
            .lock()
            .unwrap()
            .push((calendar_id.to_string(), range.clone()));
        Ok(self.events.clone())
    }

    async fn insert_event(&self, calendar_id: &str, event: &CalendarEvent) -> GrowPodResult<()> {
        self.inserted
            .lock()
            .unwrap()
            .push((calendar_id.to_string(), event.clone()));
        Ok(())
    }
}
