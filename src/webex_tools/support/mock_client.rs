//! Recording [`WebexApi`] used by unit tests

use std::sync::Mutex;

use async_trait::async_trait;

use super::types::{Membership, Message, Person, Room};
use super::webex_client::{Params, PlatformError, PlatformResult, WebexApi};
use crate::webex_tools::operation::Operation;

/// Answers every call with a fixed fixture (or a fixed error) and records what it was asked
pub struct MockWebexApi {
    calls:      Mutex<Vec<(Operation, Params)>>,
    failure:    Option<PlatformError>,
    room:       Room,
    message:    Message,
    membership: Membership,
    person:     Person,
}

impl MockWebexApi {
    pub fn new() -> Self {
        Self {
            calls:      Mutex::new(Vec::new()),
            failure:    None,
            room:       fixture_room(),
            message:    fixture_message(),
            membership: fixture_membership(),
            person:     fixture_person(),
        }
    }

    pub fn failing(error: PlatformError) -> Self {
        Self {
            failure: Some(error),
            ..Self::new()
        }
    }

    pub fn calls(&self) -> Vec<(Operation, Params)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record<T: Clone>(
        &self,
        operation: Operation,
        params: &Params,
        value: &T,
    ) -> PlatformResult<T> {
        self.calls.lock().unwrap().push((operation, params.clone()));
        self.failure
            .as_ref()
            .map_or_else(|| Ok(value.clone()), |err| Err(err.clone()))
    }
}

#[async_trait]
impl WebexApi for MockWebexApi {
    async fn list_rooms(&self, params: &Params) -> PlatformResult<Vec<Room>> {
        self.record(Operation::ListRooms, params, &vec![self.room.clone()])
    }

    async fn create_room(&self, params: &Params) -> PlatformResult<Room> {
        self.record(Operation::CreateRoom, params, &self.room)
    }

    async fn update_room(&self, params: &Params) -> PlatformResult<Room> {
        self.record(Operation::UpdateRoom, params, &self.room)
    }

    async fn get_room(&self, params: &Params) -> PlatformResult<Room> {
        self.record(Operation::GetRoom, params, &self.room)
    }

    async fn send_message(&self, params: &Params) -> PlatformResult<Message> {
        self.record(Operation::SendMessage, params, &self.message)
    }

    async fn list_messages(&self, params: &Params) -> PlatformResult<Vec<Message>> {
        self.record(Operation::ListMessages, params, &vec![self.message.clone()])
    }

    async fn list_memberships(&self, params: &Params) -> PlatformResult<Vec<Membership>> {
        self.record(
            Operation::ListMemberships,
            params,
            &vec![self.membership.clone()],
        )
    }

    async fn add_membership(&self, params: &Params) -> PlatformResult<Membership> {
        self.record(Operation::AddMembership, params, &self.membership)
    }

    async fn update_membership(&self, params: &Params) -> PlatformResult<Membership> {
        self.record(Operation::UpdateMembership, params, &self.membership)
    }

    async fn get_me(&self, params: &Params) -> PlatformResult<Person> {
        self.record(Operation::GetMe, params, &self.person)
    }

    async fn list_people(&self, params: &Params) -> PlatformResult<Vec<Person>> {
        self.record(Operation::ListPeople, params, &vec![self.person.clone()])
    }
}

pub fn fixture_room() -> Room {
    Room {
        id: "room-1".to_string(),
        title: Some("Launch planning".to_string()),
        room_type: Some("group".to_string()),
        is_locked: Some(false),
        last_activity: Some("2024-05-02T10:15:00.000Z".to_string()),
        creator_id: Some("person-1".to_string()),
        created: Some("2024-05-01T09:00:00.000Z".to_string()),
        ..Room::default()
    }
}

pub fn fixture_message() -> Message {
    Message {
        id: "message-1".to_string(),
        room_id: Some("room-1".to_string()),
        room_type: Some("group".to_string()),
        text: Some("Ship it".to_string()),
        markdown: Some("**Ship it**".to_string()),
        person_id: Some("person-1".to_string()),
        person_email: Some("ada@example.com".to_string()),
        created: Some("2024-05-02T10:15:00.000Z".to_string()),
        ..Message::default()
    }
}

pub fn fixture_membership() -> Membership {
    Membership {
        id: "membership-1".to_string(),
        room_id: Some("room-1".to_string()),
        room_type: Some("group".to_string()),
        person_id: Some("person-2".to_string()),
        person_email: Some("grace@example.com".to_string()),
        person_display_name: Some("Grace".to_string()),
        person_org_id: Some("org-1".to_string()),
        is_moderator: Some(false),
        is_monitor: Some(false),
        created: Some("2024-05-01T09:05:00.000Z".to_string()),
    }
}

pub fn fixture_person() -> Person {
    Person {
        id: "person-1".to_string(),
        emails: vec!["ada@example.com".to_string()],
        display_name: Some("Ada".to_string()),
        first_name: Some("Ada".to_string()),
        last_name: Some("Lovelace".to_string()),
        org_id: Some("org-1".to_string()),
        created: Some("2023-01-01T00:00:00.000Z".to_string()),
        status: Some("active".to_string()),
        person_type: Some("bot".to_string()),
        ..Person::default()
    }
}
