//! Extractor for the person performing a request.
//!
//! Authentication happens in front of this service; the upstream proxy
//! forwards the authenticated person's id in `X-Person-Id`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::{CommandMetadata, PersonId};

pub const PERSON_HEADER: &str = "x-person-id";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// The acting person, plus the request id for correlation.
#[derive(Debug, Clone)]
pub struct Actor {
    pub person: PersonId,
    pub request_id: Option<String>,
}

impl Actor {
    pub fn metadata(&self) -> CommandMetadata {
        let metadata = CommandMetadata::new(self.person).with_source("api");
        match &self.request_id {
            Some(id) => metadata.with_correlation_id(id.clone()),
            None => metadata,
        }
    }
}

impl<S> axum::extract::FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = ActorRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let header = parts
                .headers
                .get(PERSON_HEADER)
                .and_then(|h| h.to_str().ok())
                .ok_or(ActorRejection::Missing)?;
            let person = header
                .trim()
                .parse::<PersonId>()
                .map_err(|_| ActorRejection::Invalid)?;
            let request_id = parts
                .headers
                .get(REQUEST_ID_HEADER)
                .and_then(|h| h.to_str().ok())
                .map(str::to_string);
            Ok(Actor { person, request_id })
        })
    }
}

/// Rejection when the acting person cannot be determined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActorRejection {
    Missing,
    Invalid,
}

impl IntoResponse for ActorRejection {
    fn into_response(self) -> Response {
        let message = match self {
            ActorRejection::Missing => "X-Person-Id header required",
            ActorRejection::Invalid => "X-Person-Id is not a valid person id",
        };
        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({
                "code": "UNAUTHENTICATED",
                "message": message
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::FromRequestParts;
    use axum::http::Request;

    async fn extract(headers: &[(&str, &str)]) -> Result<Actor, ActorRejection> {
        let mut builder = Request::builder().uri("/");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        Actor::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn reads_person_and_request_id() {
        let person = PersonId::new();
        let actor = extract(&[
            ("X-Person-Id", &person.to_string()),
            ("X-Request-Id", "req-1"),
        ])
        .await
        .unwrap();

        assert_eq!(actor.person, person);
        let metadata = actor.metadata();
        assert_eq!(metadata.actor, person);
        assert_eq!(metadata.correlation_id_opt(), Some("req-1"));
        assert_eq!(metadata.source(), Some("api"));
    }

    #[tokio::test]
    async fn missing_header_is_rejected() {
        assert_eq!(extract(&[]).await.unwrap_err(), ActorRejection::Missing);
    }

    #[tokio::test]
    async fn malformed_id_is_rejected() {
        assert_eq!(
            extract(&[("X-Person-Id", "not-a-uuid")]).await.unwrap_err(),
            ActorRejection::Invalid
        );
        assert_eq!(
            ActorRejection::Invalid.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }
}
