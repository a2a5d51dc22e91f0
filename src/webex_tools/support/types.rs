//! Webex REST resources as returned by the platform
//!
//! Only the fields some tool exposes are kept; serde skips the rest.

use serde::{Deserialize, Serialize};

/// `{"items": [...]}` envelope used by every Webex list endpoint
#[derive(Debug, Deserialize)]
pub struct ItemsEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Room {
    pub id:                   String,
    pub title:                Option<String>,
    #[serde(rename = "type")]
    pub room_type:            Option<String>,
    pub is_locked:            Option<bool>,
    pub team_id:              Option<String>,
    pub last_activity:        Option<String>,
    pub creator_id:           Option<String>,
    pub owner_id:             Option<String>,
    pub created:              Option<String>,
    pub description:          Option<String>,
    pub sip_address:          Option<String>,
    pub classification_id:    Option<String>,
    pub is_public:            Option<bool>,
    pub is_announcement_only: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Message {
    pub id:               String,
    pub room_id:          Option<String>,
    pub room_type:        Option<String>,
    pub parent_id:        Option<String>,
    pub text:             Option<String>,
    pub markdown:         Option<String>,
    pub html:             Option<String>,
    pub files:            Vec<String>,
    pub person_id:        Option<String>,
    pub person_email:     Option<String>,
    pub mentioned_people: Vec<String>,
    pub mentioned_groups: Vec<String>,
    pub created:          Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Membership {
    pub id:                  String,
    pub room_id:             Option<String>,
    pub room_type:           Option<String>,
    pub person_id:           Option<String>,
    pub person_email:        Option<String>,
    pub person_display_name: Option<String>,
    pub person_org_id:       Option<String>,
    pub is_moderator:        Option<bool>,
    pub is_monitor:          Option<bool>,
    pub created:             Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Person {
    pub id:            String,
    pub emails:        Vec<String>,
    pub display_name:  Option<String>,
    pub nick_name:     Option<String>,
    pub first_name:    Option<String>,
    pub last_name:     Option<String>,
    pub avatar:        Option<String>,
    pub org_id:        Option<String>,
    pub created:       Option<String>,
    pub last_modified: Option<String>,
    pub timezone:      Option<String>,
    pub location_id:   Option<String>,
    pub status:        Option<String>,
    #[serde(rename = "type")]
    pub person_type:   Option<String>,
    pub user_name:     Option<String>,
    pub roles:         Vec<String>,
    pub licenses:      Vec<String>,
    pub phone_numbers: Vec<PhoneNumber>,
    pub extension:     Option<String>,
    pub addresses:     Vec<Address>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PhoneNumber {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub number_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value:       Option<String>,
}

/// Postal address attached to a person
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Address {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub address_type:   Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country:        Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locality:       Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region:         Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code:    Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_room_deserializes_webex_body() {
        let room: Room = serde_json::from_value(json!({
            "id": "Y2lzY29zcGFyazovL3VzL1JPT00vYmJjZWIxYWQ",
            "title": "Project Unicorn - Sprint 0",
            "type": "group",
            "isLocked": true,
            "teamId": "Y2lzY29zcGFyazovL3VzL1RFQU0vNjRlNDVhZTAt",
            "lastActivity": "2016-04-21T19:12:48.920Z",
            "creatorId": "Y2lzY29zcGFyazovL3VzL1BFT1BMRS9mNWIzNjE4Ny1j",
            "created": "2016-04-21T19:01:55.966Z",
            "ownerId": "Y2lzY29zcGFyazovL3VzL09SR0FOSVpBVElPTi85NmFiYzJh",
            "isReadOnly": false
        }))
        .unwrap();

        assert_eq!(room.room_type.as_deref(), Some("group"));
        assert_eq!(room.is_locked, Some(true));
        assert_eq!(room.team_id.as_deref(), Some("Y2lzY29zcGFyazovL3VzL1RFQU0vNjRlNDVhZTAt"));
        assert!(room.description.is_none());
    }

    #[test]
    fn test_items_envelope_tolerates_missing_items() {
        let envelope: ItemsEnvelope<Person> = serde_json::from_value(json!({})).unwrap();
        assert!(envelope.items.is_empty());
    }

    #[test]
    fn test_person_ignores_unknown_fields() {
        let person: Person = serde_json::from_value(json!({
            "id": "p1",
            "emails": ["ada@example.com"],
            "displayName": "Ada",
            "phoneNumbers": [{"type": "work", "value": "+1 408 526 7209"}],
            "invitePending": false,
            "type": "person"
        }))
        .unwrap();

        assert_eq!(person.emails, vec!["ada@example.com".to_string()]);
        assert_eq!(person.display_name.as_deref(), Some("Ada"));
        assert_eq!(person.person_type.as_deref(), Some("person"));
        assert_eq!(
            person.phone_numbers,
            vec![PhoneNumber {
                number_type: Some("work".to_string()),
                value:       Some("+1 408 526 7209".to_string()),
            }]
        );
    }

    #[test]
    fn test_person_reads_address_fields() {
        let person: Person = serde_json::from_value(json!({
            "id": "p1",
            "userName": "ada",
            "roles": ["role-1"],
            "addresses": [{"type": "work", "streetAddress": "170 W Tasman Dr", "postalCode": "95134"}]
        }))
        .unwrap();

        assert_eq!(person.user_name.as_deref(), Some("ada"));
        assert_eq!(person.roles, vec!["role-1".to_string()]);
        assert_eq!(person.addresses[0].street_address.as_deref(), Some("170 W Tasman Dr"));
        assert_eq!(person.addresses[0].postal_code.as_deref(), Some("95134"));
        assert!(person.licenses.is_empty());
    }
}
