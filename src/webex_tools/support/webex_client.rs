//! Platform client facade for the Webex REST API
//!
//! This module defines the seam between tool handling and the network: the
//! [`WebexApi`] trait exposes exactly one method per [`Operation`], each taking
//! the validated parameter map, and [`execute`] dispatches a normalized call to
//! the matching method. Failures come back as a [`PlatformError`] whose kind is
//! stable across transports so the response shaper can translate it losslessly.
//!
//! Nothing here retries. A mutating call is issued at most once per invocation.

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use super::types::{Membership, Message, Person, Room};
use crate::webex_tools::operation::{NormalizedOperationCall, Operation};

/// Validated parameters, keyed by Webex wire name
pub type Params = Map<String, Value>;

pub type PlatformResult<T> = Result<T, PlatformError>;

/// Failure categories surfaced by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformErrorKind {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    RateLimited,
    ServerError,
    NetworkError,
    InvalidResponse,
}

impl PlatformErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BadRequest => "BadRequest",
            Self::Unauthorized => "Unauthorized",
            Self::Forbidden => "Forbidden",
            Self::NotFound => "NotFound",
            Self::RateLimited => "RateLimited",
            Self::ServerError => "ServerError",
            Self::NetworkError => "NetworkError",
            Self::InvalidResponse => "InvalidResponse",
        }
    }

    /// Classify a non-success HTTP status
    pub const fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            429 => Self::RateLimited,
            500..=599 => Self::ServerError,
            _ => Self::BadRequest,
        }
    }
}

/// Error information from a Webex API call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct PlatformError {
    pub kind:             PlatformErrorKind,
    pub message:          String,
    pub status:           Option<u16>,
    pub tracking_id:      Option<String>,
    pub retry_after_secs: Option<u64>,
}

impl PlatformError {
    pub fn new(kind: PlatformErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            tracking_id: None,
            retry_after_secs: None,
        }
    }

    #[must_use]
    pub const fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn with_tracking_id(mut self, tracking_id: Option<String>) -> Self {
        self.tracking_id = tracking_id;
        self
    }

    #[must_use]
    pub const fn with_retry_after(mut self, retry_after_secs: Option<u64>) -> Self {
        self.retry_after_secs = retry_after_secs;
        self
    }
}

/// One method per operation; implemented over HTTP in production and by a
/// recording mock in tests
#[async_trait]
pub trait WebexApi: Send + Sync {
    async fn list_rooms(&self, params: &Params) -> PlatformResult<Vec<Room>>;
    async fn create_room(&self, params: &Params) -> PlatformResult<Room>;
    async fn update_room(&self, params: &Params) -> PlatformResult<Room>;
    async fn get_room(&self, params: &Params) -> PlatformResult<Room>;
    async fn send_message(&self, params: &Params) -> PlatformResult<Message>;
    async fn list_messages(&self, params: &Params) -> PlatformResult<Vec<Message>>;
    async fn list_memberships(&self, params: &Params) -> PlatformResult<Vec<Membership>>;
    async fn add_membership(&self, params: &Params) -> PlatformResult<Membership>;
    async fn update_membership(&self, params: &Params) -> PlatformResult<Membership>;
    async fn get_me(&self, params: &Params) -> PlatformResult<Person>;
    async fn list_people(&self, params: &Params) -> PlatformResult<Vec<Person>>;
}

/// Raw platform payload, before shaping
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformResponse {
    Room(Room),
    Rooms(Vec<Room>),
    Message(Message),
    Messages(Vec<Message>),
    Membership(Membership),
    Memberships(Vec<Membership>),
    Person(Person),
    People(Vec<Person>),
}

/// Issue exactly one platform call for a normalized invocation
pub async fn execute(
    api: &dyn WebexApi,
    call: &NormalizedOperationCall,
) -> PlatformResult<PlatformResponse> {
    let params = &call.parameters;
    match call.operation {
        Operation::ListRooms => api.list_rooms(params).await.map(PlatformResponse::Rooms),
        Operation::CreateRoom => api.create_room(params).await.map(PlatformResponse::Room),
        Operation::UpdateRoom => api.update_room(params).await.map(PlatformResponse::Room),
        Operation::GetRoom => api.get_room(params).await.map(PlatformResponse::Room),
        Operation::SendMessage => api.send_message(params).await.map(PlatformResponse::Message),
        Operation::ListMessages => api
            .list_messages(params)
            .await
            .map(PlatformResponse::Messages),
        Operation::ListMemberships => api
            .list_memberships(params)
            .await
            .map(PlatformResponse::Memberships),
        Operation::AddMembership => api
            .add_membership(params)
            .await
            .map(PlatformResponse::Membership),
        Operation::UpdateMembership => api
            .update_membership(params)
            .await
            .map(PlatformResponse::Membership),
        Operation::GetMe => api.get_me(params).await.map(PlatformResponse::Person),
        Operation::ListPeople => api.list_people(params).await.map(PlatformResponse::People),
    }
}
