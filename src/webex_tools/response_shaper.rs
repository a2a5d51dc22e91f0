//! Response shaper: platform payloads become the declared tool output
//!
//! Only the fields listed on the output structs leave the process. Single
//! entities are flat under `data`; lists are wrapped as `{<plural>: [...], count}`
//! and echo the normalized request parameters as `filtersApplied`.

use serde::Serialize;
use tracing::warn;

use super::operation::NormalizedOperationCall;
use super::support::types::{Address, Membership, Message, Person, PhoneNumber, Room};
use super::support::{Params, PlatformError, PlatformErrorKind, PlatformResponse};
use crate::error::Error;
use crate::support::response::ToolResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomOutput {
    pub id:                   String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title:                Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub room_type:            Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_locked:            Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id:              Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_activity:        Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created:              Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_id:           Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id:             Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description:          Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sip_address:          Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public:            Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_announcement_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification_id:    Option<String>,
}

impl From<Room> for RoomOutput {
    fn from(room: Room) -> Self {
        Self {
            id:                   room.id,
            title:                room.title,
            room_type:            room.room_type,
            is_locked:            room.is_locked,
            team_id:              room.team_id,
            last_activity:        room.last_activity,
            created:              room.created,
            creator_id:           room.creator_id,
            owner_id:             room.owner_id,
            description:          room.description,
            sip_address:          room.sip_address,
            is_public:            room.is_public,
            is_announcement_only: room.is_announcement_only,
            classification_id:    room.classification_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageOutput {
    pub id:               String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id:          Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_type:        Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id:        Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text:             Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown:         Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html:             Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_id:        Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_email:     Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files:            Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mentioned_people: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mentioned_groups: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created:          Option<String>,
}

impl From<Message> for MessageOutput {
    fn from(message: Message) -> Self {
        Self {
            id:               message.id,
            room_id:          message.room_id,
            room_type:        message.room_type,
            parent_id:        message.parent_id,
            text:             message.text,
            markdown:         message.markdown,
            html:             message.html,
            person_id:        message.person_id,
            person_email:     message.person_email,
            files:            message.files,
            mentioned_people: message.mentioned_people,
            mentioned_groups: message.mentioned_groups,
            created:          message.created,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipOutput {
    pub id:                  String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id:             Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_type:           Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_id:           Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_email:        Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_org_id:       Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_moderator:        Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_monitor:          Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created:             Option<String>,
}

impl From<Membership> for MembershipOutput {
    fn from(membership: Membership) -> Self {
        Self {
            id:                  membership.id,
            room_id:             membership.room_id,
            room_type:           membership.room_type,
            person_id:           membership.person_id,
            person_email:        membership.person_email,
            person_display_name: membership.person_display_name,
            person_org_id:       membership.person_org_id,
            is_moderator:        membership.is_moderator,
            is_monitor:          membership.is_monitor,
            created:             membership.created,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonOutput {
    pub id:            String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub emails:        Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name:  Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nick_name:     Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name:    Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name:     Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar:        Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_id:        Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub person_type:   Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status:        Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created:       Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone:      Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id:   Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name:     Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub roles:         Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub licenses:      Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub phone_numbers: Vec<PhoneNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension:     Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub addresses:     Vec<Address>,
}

impl From<Person> for PersonOutput {
    fn from(person: Person) -> Self {
        Self {
            id:            person.id,
            emails:        person.emails,
            display_name:  person.display_name,
            nick_name:     person.nick_name,
            first_name:    person.first_name,
            last_name:     person.last_name,
            avatar:        person.avatar,
            org_id:        person.org_id,
            person_type:   person.person_type,
            status:        person.status,
            created:       person.created,
            last_modified: person.last_modified,
            timezone:      person.timezone,
            location_id:   person.location_id,
            user_name:     person.user_name,
            roles:         person.roles,
            licenses:      person.licenses,
            phone_numbers: person.phone_numbers,
            extension:     person.extension,
            addresses:     person.addresses,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomList {
    pub rooms: Vec<RoomOutput>,
    pub count: usize,
    /// Normalized parameters the list was requested with
    #[serde(skip_serializing_if = "Params::is_empty")]
    pub filters_applied: Params,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageList {
    pub messages: Vec<MessageOutput>,
    pub count:    usize,
    #[serde(skip_serializing_if = "Params::is_empty")]
    pub filters_applied: Params,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipList {
    pub memberships: Vec<MembershipOutput>,
    pub count:       usize,
    #[serde(skip_serializing_if = "Params::is_empty")]
    pub filters_applied: Params,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeopleList {
    pub people: Vec<PersonOutput>,
    pub count:  usize,
    #[serde(skip_serializing_if = "Params::is_empty")]
    pub filters_applied: Params,
}

fn outputs<T, O: From<T>>(items: Vec<T>) -> Vec<O> {
    items.into_iter().map(O::from).collect()
}

/// Turn the outcome of one platform call into the tool's result
pub fn shape(
    call: &NormalizedOperationCall,
    outcome: Result<PlatformResponse, PlatformError>,
) -> ToolResult {
    let operation = call.operation;
    let response = match outcome {
        Ok(response) => response,
        Err(err) => {
            warn!(
                operation = %operation,
                kind = err.kind.as_str(),
                status = ?err.status,
                tracking_id = ?err.tracking_id,
                "Webex call failed: {}",
                err.message
            );
            return ToolResult::from_error(&Error::Platform(err));
        }
    };

    let data = match response {
        PlatformResponse::Room(room) => serde_json::to_value(RoomOutput::from(room)),
        PlatformResponse::Rooms(rooms) => {
            let rooms: Vec<RoomOutput> = outputs(rooms);
            serde_json::to_value(RoomList {
                count: rooms.len(),
                rooms,
                filters_applied: call.parameters.clone(),
            })
        }
        PlatformResponse::Message(message) => serde_json::to_value(MessageOutput::from(message)),
        PlatformResponse::Messages(messages) => {
            let messages: Vec<MessageOutput> = outputs(messages);
            serde_json::to_value(MessageList {
                count: messages.len(),
                messages,
                filters_applied: call.parameters.clone(),
            })
        }
        PlatformResponse::Membership(membership) => {
            serde_json::to_value(MembershipOutput::from(membership))
        }
        PlatformResponse::Memberships(memberships) => {
            let memberships: Vec<MembershipOutput> = outputs(memberships);
            serde_json::to_value(MembershipList {
                count: memberships.len(),
                memberships,
                filters_applied: call.parameters.clone(),
            })
        }
        PlatformResponse::Person(person) => serde_json::to_value(PersonOutput::from(person)),
        PlatformResponse::People(people) => {
            let people: Vec<PersonOutput> = outputs(people);
            serde_json::to_value(PeopleList {
                count: people.len(),
                people,
                filters_applied: call.parameters.clone(),
            })
        }
    };

    match data {
        Ok(data) => ToolResult::success(data),
        Err(e) => ToolResult::from_error(&Error::Platform(PlatformError::new(
            PlatformErrorKind::InvalidResponse,
            format!("Failed to serialize {operation} result: {e}"),
        ))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::webex_tools::Operation;
    use crate::webex_tools::support::mock_client::{
        fixture_membership, fixture_message, fixture_person, fixture_room,
    };

    fn call_for(operation: Operation) -> NormalizedOperationCall {
        NormalizedOperationCall {
            operation,
            parameters: Params::new(),
        }
    }

    fn data(result: ToolResult) -> Value {
        assert!(result.success, "expected success, got {result:?}");
        result.data.unwrap()
    }

    #[test]
    fn test_room_is_flat_and_omits_absent_fields() {
        let data = data(shape(
            &call_for(Operation::GetRoom),
            Ok(PlatformResponse::Room(fixture_room())),
        ));

        assert_eq!(
            data,
            json!({
                "id": "room-1",
                "title": "Launch planning",
                "type": "group",
                "isLocked": false,
                "lastActivity": "2024-05-02T10:15:00.000Z",
                "created": "2024-05-01T09:00:00.000Z",
                "creatorId": "person-1"
            })
        );
    }

    #[test]
    fn test_room_list_has_count() {
        let rooms = vec![fixture_room(), fixture_room()];
        let data = data(shape(
            &call_for(Operation::ListRooms),
            Ok(PlatformResponse::Rooms(rooms)),
        ));

        assert_eq!(data["count"], json!(2));
        assert_eq!(data["rooms"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_empty_list_is_success() {
        let data = data(shape(
            &call_for(Operation::ListMessages),
            Ok(PlatformResponse::Messages(Vec::new())),
        ));
        assert_eq!(data, json!({"messages": [], "count": 0}));
    }

    #[test]
    fn test_message_output_fields() {
        let data = data(shape(
            &call_for(Operation::SendMessage),
            Ok(PlatformResponse::Message(fixture_message())),
        ));

        assert_eq!(data["markdown"], json!("**Ship it**"));
        assert_eq!(data["personEmail"], json!("ada@example.com"));
        assert!(data.get("files").is_none());
        assert!(data.get("parentId").is_none());
    }

    #[test]
    fn test_membership_and_people_lists() {
        let memberships = data(shape(
            &call_for(Operation::ListMemberships),
            Ok(PlatformResponse::Memberships(vec![fixture_membership()])),
        ));
        assert_eq!(memberships["memberships"][0]["personDisplayName"], json!("Grace"));
        assert_eq!(memberships["count"], json!(1));

        let people = data(shape(
            &call_for(Operation::ListPeople),
            Ok(PlatformResponse::People(vec![fixture_person()])),
        ));
        assert_eq!(people["people"][0]["type"], json!("bot"));
        assert!(people["people"][0].get("avatar").is_none());
    }

    #[test]
    fn test_get_me_is_flat_person() {
        let data = data(shape(
            &call_for(Operation::GetMe),
            Ok(PlatformResponse::Person(fixture_person())),
        ));
        assert_eq!(data["displayName"], json!("Ada"));
        assert_eq!(data["emails"], json!(["ada@example.com"]));
        assert!(data.get("phoneNumbers").is_none());
        assert!(data.get("roles").is_none());
    }

    #[test]
    fn test_get_me_keeps_contact_details() {
        let person = Person {
            user_name: Some("ada".to_string()),
            roles: vec!["role-admin".to_string()],
            licenses: vec!["license-messaging".to_string()],
            phone_numbers: vec![PhoneNumber {
                number_type: Some("work".to_string()),
                value:       Some("+1 408 526 7209".to_string()),
            }],
            extension: Some("7209".to_string()),
            addresses: vec![Address {
                address_type: Some("work".to_string()),
                locality: Some("San Jose".to_string()),
                ..Address::default()
            }],
            ..fixture_person()
        };

        let data = data(shape(
            &call_for(Operation::GetMe),
            Ok(PlatformResponse::Person(person)),
        ));

        assert_eq!(data["userName"], json!("ada"));
        assert_eq!(data["roles"], json!(["role-admin"]));
        assert_eq!(data["licenses"], json!(["license-messaging"]));
        assert_eq!(
            data["phoneNumbers"],
            json!([{"type": "work", "value": "+1 408 526 7209"}])
        );
        assert_eq!(data["extension"], json!("7209"));
        assert_eq!(data["addresses"], json!([{"type": "work", "locality": "San Jose"}]));
    }

    #[test]
    fn test_list_echoes_filters_applied() {
        let mut parameters = Params::new();
        parameters.insert("type".to_string(), json!("group"));
        parameters.insert("max".to_string(), json!(50));
        let call = NormalizedOperationCall {
            operation: Operation::ListRooms,
            parameters,
        };

        let data = data(shape(&call, Ok(PlatformResponse::Rooms(vec![fixture_room()]))));

        assert_eq!(data["count"], json!(1));
        assert_eq!(data["filtersApplied"], json!({"type": "group", "max": 50}));
    }

    #[test]
    fn test_single_entity_has_no_filters_applied() {
        let mut parameters = Params::new();
        parameters.insert("roomId".to_string(), json!("room-1"));
        let call = NormalizedOperationCall {
            operation: Operation::GetRoom,
            parameters,
        };

        let data = data(shape(&call, Ok(PlatformResponse::Room(fixture_room()))));
        assert!(data.get("filtersApplied").is_none());
    }

    #[test]
    fn test_not_found_translates_to_failed_result() {
        let result = shape(
            &call_for(Operation::GetRoom),
            Err(
                PlatformError::new(PlatformErrorKind::NotFound, "Room not found")
                    .with_status(404),
            ),
        );

        assert!(!result.success);
        assert!(result.data.is_none());
        let error = result.error.unwrap();
        assert_eq!(error.kind, "NotFound");
        assert_eq!(error.message, "Room not found");
    }
}
