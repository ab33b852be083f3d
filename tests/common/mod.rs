//! Shared wiring for the HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use datatracker::adapters::http::HttpSettings;
use datatracker::adapters::mail::RecordingMailer;
use datatracker::domain::foundation::{GroupAcronym, PersonId};
use datatracker::domain::group::{Group, GroupState, GroupType, Role, RoleName};
use datatracker::domain::mail::{MailSettings, MessageComposer};
use datatracker::domain::person::Person;
use datatracker::server::Services;

pub struct TestApp {
    pub router: Router,
    pub services: Services,
    pub mailer: Arc<RecordingMailer>,
    pub secretary: PersonId,
    pub ads: Vec<PersonId>,
    pub chair: PersonId,
}

pub fn acronym(value: &str) -> GroupAcronym {
    GroupAcronym::new(value).unwrap()
}

impl TestApp {
    /// An IESG of three ADs, the `art` area led by the first one, and a
    /// `foo` working group in BOF state.
    pub async fn new() -> Self {
        let mailer = Arc::new(RecordingMailer::new());
        let services = Services::in_memory(mailer.clone());
        let app = Self {
            router: services.router(composer(), &HttpSettings::default()),
            services,
            mailer,
            secretary: PersonId::new(),
            ads: (0..3).map(|_| PersonId::new()).collect(),
            chair: PersonId::new(),
        };
        app.seed().await;
        app
    }

    async fn seed(&self) {
        self.person(self.secretary, "Sec Retary", "secretary@ietf.org").await;
        self.person(self.chair, "Wendy Chair", "wendy@example.com").await;

        let mut iesg = Group::new(acronym("iesg"), "IESG", GroupType::Ietf, GroupState::Active).unwrap();
        for (i, ad) in self.ads.iter().enumerate() {
            let email = format!("ad{}@ietf.org", i);
            self.person(*ad, &format!("Area Director {}", i), &email).await;
            iesg.add_role(Role::new(RoleName::Ad, *ad, email));
        }
        self.services.groups.save(&iesg).await.unwrap();

        let area = Group::new(acronym("art"), "Applications and Real-Time Area", GroupType::Area, GroupState::Active)
            .unwrap()
            .with_role(Role::new(RoleName::Ad, self.ads[0], "ad0@ietf.org"));
        self.services.groups.save(&area).await.unwrap();

        let wg = Group::new(acronym("foo"), "Foo Protocol", GroupType::Wg, GroupState::Bof)
            .unwrap()
            .with_parent(acronym("art"))
            .with_list_email("foo@ietf.org")
            .with_role(Role::new(RoleName::Chair, self.chair, "wendy@example.com"));
        self.services.groups.save(&wg).await.unwrap();
    }

    async fn person(&self, id: PersonId, name: &str, email: &str) {
        self.services
            .people
            .save(&Person::new(id, name, email).unwrap())
            .await
            .unwrap();
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn post(&self, actor: PersonId, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .header("x-person-id", actor.to_string())
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }
}

pub fn composer() -> MessageComposer {
    MessageComposer::new(MailSettings {
        from: "IETF Secretariat <ietf-secretariat-reply@ietf.org>".to_string(),
        announce_from: "The IESG <iesg-secretary@ietf.org>".to_string(),
        base_url: "https://datatracker.ietf.org".to_string(),
    })
}

/// Event `type` tags of a command response.
pub fn event_types(response: &Value) -> Vec<String> {
    response["events"]
        .as_array()
        .map(|events| {
            events
                .iter()
                .filter_map(|e| e["kind"]["type"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
