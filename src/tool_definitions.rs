//! Declarative tool definitions for the Webex tools.
//!
//! Every tool is data: its parameters, the rules tying parameters together, and
//! the one platform [`Operation`] it reaches. Validation, schema generation and
//! dispatch are all driven from these definitions, so adding a tool means adding
//! a descriptor here plus a help text file.
//!
//! # Field groups
//!
//! Some constraints span several parameters:
//! - [`GroupRule::ExactlyOne`]: target selectors such as `roomId` / `toPersonId` /
//!   `toPersonEmail`. None given or more than one given are both errors.
//! - [`GroupRule::AtLeastOne`]: e.g. a message needs some content.
//! - [`GroupRule::Synonyms`]: two names for one Webex property. The first field is
//!   the wire name; the others are accepted and renamed to it.
//!
//! # Aliases
//!
//! The "space" names are registered from [`SPACE_ALIASES`] as copies of their
//! canonical room descriptors, see [`crate::registry::ToolRegistry::with_catalog`].

use serde_json::Value;

use crate::constants::{
    DEFAULT_MEMBERSHIP_PAGE_SIZE, DEFAULT_MESSAGE_FORMAT, DEFAULT_MESSAGE_PAGE_SIZE,
    DEFAULT_PEOPLE_PAGE_SIZE, DEFAULT_ROOM_PAGE_SIZE, DESC_ADD_MEMBERSHIP, DESC_CREATE_ROOM,
    DESC_GET_ME, DESC_GET_ROOM, DESC_LIST_MEMBERSHIPS, DESC_LIST_MESSAGES, DESC_LIST_PEOPLE,
    DESC_LIST_ROOMS, DESC_SEND_MESSAGE, DESC_UPDATE_MEMBERSHIP, DESC_UPDATE_ROOM, MAX_PAGE_SIZE,
    MESSAGE_FORMATS, PARAM_BEFORE, PARAM_BEFORE_MESSAGE, PARAM_CALLING_DATA,
    PARAM_CLASSIFICATION_ID, PARAM_DESCRIPTION, PARAM_DISPLAY_NAME, PARAM_EMAIL, PARAM_FILES,
    PARAM_FORMAT, PARAM_HTML, PARAM_ID, PARAM_IS_ANNOUNCEMENT_ONLY, PARAM_IS_LOCKED,
    PARAM_IS_MODERATED, PARAM_IS_MODERATOR, PARAM_IS_MONITOR, PARAM_IS_PUBLIC,
    PARAM_LOCATION_ID, PARAM_MARKDOWN, PARAM_MAX, PARAM_MEMBERSHIP_ID, PARAM_MENTIONED_PEOPLE,
    PARAM_ORG_ID, PARAM_PARENT_ID, PARAM_PERSON_EMAIL, PARAM_PERSON_ID, PARAM_ROOM_ID,
    PARAM_SORT_BY, PARAM_TEAM_ID, PARAM_TEXT, PARAM_TITLE, PARAM_TO_PERSON_EMAIL,
    PARAM_TO_PERSON_ID, PARAM_TYPE, ROOM_SORT_ORDERS, ROOM_TYPES, TOOL_ADD_MEMBERSHIP,
    TOOL_ADD_SPACE_MEMBERSHIP, TOOL_CREATE_ROOM, TOOL_CREATE_SPACE, TOOL_GET_ME, TOOL_GET_ROOM,
    TOOL_GET_SPACE, TOOL_LIST_MEMBERSHIPS, TOOL_LIST_MESSAGES, TOOL_LIST_PEOPLE,
    TOOL_LIST_ROOMS, TOOL_LIST_SPACE_MEMBERSHIPS, TOOL_LIST_SPACE_MESSAGES, TOOL_LIST_SPACES,
    TOOL_SEND_MESSAGE, TOOL_SEND_SPACE_MESSAGE, TOOL_UPDATE_MEMBERSHIP, TOOL_UPDATE_ROOM,
    TOOL_UPDATE_SPACE,
};
use crate::webex_tools::Operation;

/// Alias name paired with the canonical tool it copies
pub const SPACE_ALIASES: &[(&str, &str)] = &[
    (TOOL_LIST_SPACES, TOOL_LIST_ROOMS),
    (TOOL_CREATE_SPACE, TOOL_CREATE_ROOM),
    (TOOL_UPDATE_SPACE, TOOL_UPDATE_ROOM),
    (TOOL_GET_SPACE, TOOL_GET_ROOM),
    (TOOL_SEND_SPACE_MESSAGE, TOOL_SEND_MESSAGE),
    (TOOL_LIST_SPACE_MESSAGES, TOOL_LIST_MESSAGES),
    (TOOL_LIST_SPACE_MEMBERSHIPS, TOOL_LIST_MEMBERSHIPS),
    (TOOL_ADD_SPACE_MEMBERSHIP, TOOL_ADD_MEMBERSHIP),
];

/// Types of parameters that can be defined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    /// Any string
    String,
    /// A string that must look like an e-mail address
    Email,
    /// Non-negative integer; numeric strings are coerced
    Integer,
    /// JSON boolean or the strings "true"/"false"
    Boolean,
    /// An array of strings; a single string is accepted as a one-element array
    StringArray,
}

/// Closed set of accepted string values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedValues {
    pub values:         &'static [&'static str],
    /// When false, input is matched ignoring ASCII case and replaced by the listed spelling
    pub case_sensitive: bool,
}

/// Represents a parameter definition for a Webex tool
#[derive(Debug, Clone, PartialEq)]
pub struct ParamDef {
    /// Parameter name as it appears in the Webex API
    pub name:           &'static str,
    pub description:    &'static str,
    pub param_type:     ParamType,
    pub required:       bool,
    /// Filled in when the caller leaves the parameter out
    pub default:        Option<Value>,
    pub allowed_values: Option<AllowedValues>,
    /// Inclusive bounds for integers
    pub range:          Option<(u64, u64)>,
    /// An empty string is forwarded instead of treated as absent
    pub clearable:      bool,
}

impl ParamDef {
    const fn new(name: &'static str, description: &'static str, param_type: ParamType) -> Self {
        Self {
            name,
            description,
            param_type,
            required: false,
            default: None,
            allowed_values: None,
            range: None,
            clearable: false,
        }
    }

    pub const fn string(name: &'static str, description: &'static str) -> Self {
        Self::new(name, description, ParamType::String)
    }

    pub const fn email(name: &'static str, description: &'static str) -> Self {
        Self::new(name, description, ParamType::Email)
    }

    pub const fn integer(name: &'static str, description: &'static str) -> Self {
        Self::new(name, description, ParamType::Integer)
    }

    pub const fn boolean(name: &'static str, description: &'static str) -> Self {
        Self::new(name, description, ParamType::Boolean)
    }

    pub const fn string_array(name: &'static str, description: &'static str) -> Self {
        Self::new(name, description, ParamType::StringArray)
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    #[must_use]
    pub fn one_of(mut self, values: &'static [&'static str]) -> Self {
        self.allowed_values = Some(AllowedValues {
            values,
            case_sensitive: true,
        });
        self
    }

    #[must_use]
    pub fn one_of_ignore_case(mut self, values: &'static [&'static str]) -> Self {
        self.allowed_values = Some(AllowedValues {
            values,
            case_sensitive: false,
        });
        self
    }

    #[must_use]
    pub fn clearable(mut self) -> Self {
        self.clearable = true;
        self
    }

    #[must_use]
    pub fn bounded(mut self, min: u64, max: u64) -> Self {
        self.range = Some((min, max));
        self
    }
}

/// How the fields of a [`FieldGroup`] constrain each other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupRule {
    /// Exactly one field must be supplied, e.g. the message target
    ExactlyOne,
    /// One or more fields must be supplied
    AtLeastOne,
    /// Alternative names for one wire field; at most one may be supplied and
    /// the first name is sent
    Synonyms,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldGroup {
    pub fields: &'static [&'static str],
    pub rule:   GroupRule,
}

impl FieldGroup {
    pub const fn exactly_one(fields: &'static [&'static str]) -> Self {
        Self {
            fields,
            rule: GroupRule::ExactlyOne,
        }
    }

    pub const fn at_least_one(fields: &'static [&'static str]) -> Self {
        Self {
            fields,
            rule: GroupRule::AtLeastOne,
        }
    }

    pub const fn synonyms(fields: &'static [&'static str]) -> Self {
        Self {
            fields,
            rule: GroupRule::Synonyms,
        }
    }
}

/// Complete definition of a Webex tool
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDescriptor {
    pub name:        &'static str,
    /// Canonical tool this descriptor was copied from
    pub alias_of:    Option<&'static str>,
    pub description: String,
    /// Ordered; schema generation and validation follow this order
    pub params:      Vec<ParamDef>,
    /// Applied in order after per-field validation
    pub groups:      Vec<FieldGroup>,
    pub operation:   Operation,
}

impl ToolDescriptor {
    pub fn canonical_name(&self) -> &'static str {
        self.alias_of.unwrap_or(self.name)
    }

    pub fn param(&self, name: &str) -> Option<&ParamDef> {
        self.params.iter().find(|param| param.name == name)
    }
}

/// Configured defaults baked into the catalog at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDefaults {
    pub message_format: String,
    pub room_type:      Option<String>,
}

impl Default for ToolDefaults {
    fn default() -> Self {
        Self {
            message_format: DEFAULT_MESSAGE_FORMAT.to_string(),
            room_type:      None,
        }
    }
}

const MESSAGE_TARGETS: &[&str] = &[PARAM_ROOM_ID, PARAM_TO_PERSON_ID, PARAM_TO_PERSON_EMAIL];
const MESSAGE_CONTENT: &[&str] = &[PARAM_TEXT, PARAM_MARKDOWN, PARAM_HTML, PARAM_FILES];
const LOCKED_SYNONYMS: &[&str] = &[PARAM_IS_LOCKED, PARAM_IS_MODERATED];
const ROOM_UPDATES: &[&str] = &[
    PARAM_TITLE,
    PARAM_CLASSIFICATION_ID,
    PARAM_IS_LOCKED,
    PARAM_IS_MODERATED,
    PARAM_IS_PUBLIC,
    PARAM_IS_ANNOUNCEMENT_ONLY,
    PARAM_DESCRIPTION,
];
const MEMBERSHIP_PERSON: &[&str] = &[PARAM_PERSON_ID, PARAM_PERSON_EMAIL];
const MEMBERSHIP_UPDATES: &[&str] = &[PARAM_IS_MODERATOR, PARAM_IS_MONITOR];

fn page_size_param(default: u64) -> ParamDef {
    ParamDef::integer(PARAM_MAX, "Maximum number of items to return (1-1000)")
        .bounded(1, MAX_PAGE_SIZE)
        .with_default(default)
}

/// Room property parameters shared by create and update; `updating` lets a
/// blank description clear the existing one
fn room_property_params(updating: bool) -> Vec<ParamDef> {
    let description =
        ParamDef::string(PARAM_DESCRIPTION, "Room description, shown for public rooms");
    let description = if updating { description.clearable() } else { description };

    vec![
        ParamDef::string(
            PARAM_CLASSIFICATION_ID,
            "Data classification ID for the room",
        ),
        ParamDef::boolean(
            PARAM_IS_LOCKED,
            "Whether the room is locked (moderated); only moderators can post",
        ),
        ParamDef::boolean(
            PARAM_IS_MODERATED,
            "Same as isLocked, kept for compatibility; do not combine with isLocked",
        ),
        ParamDef::boolean(
            PARAM_IS_PUBLIC,
            "Whether the room is public and discoverable within the organization",
        ),
        ParamDef::boolean(
            PARAM_IS_ANNOUNCEMENT_ONLY,
            "Whether only moderators can post (announcement mode)",
        ),
        description,
    ]
}

/// Room tool definitions
pub fn get_room_tools(defaults: &ToolDefaults) -> Vec<ToolDescriptor> {
    let mut room_type = ParamDef::string(PARAM_TYPE, "Filter by room type").one_of(ROOM_TYPES);
    if let Some(default_type) = &defaults.room_type {
        room_type = room_type.with_default(default_type.clone());
    }

    let mut create_params = vec![
        ParamDef::string(PARAM_TITLE, "Room title").required(),
        ParamDef::string(PARAM_TEAM_ID, "ID of the team the room belongs to"),
    ];
    create_params.extend(room_property_params(false));

    let mut update_params = vec![
        ParamDef::string(PARAM_ROOM_ID, "ID of the room to update").required(),
        ParamDef::string(PARAM_TITLE, "New room title"),
    ];
    update_params.extend(room_property_params(true));

    vec![
        ToolDescriptor {
            name:        TOOL_LIST_ROOMS,
            alias_of:    None,
            description: DESC_LIST_ROOMS.to_string(),
            params:      vec![
                ParamDef::string(PARAM_TEAM_ID, "Only rooms belonging to this team"),
                room_type,
                ParamDef::string(PARAM_SORT_BY, "Sort order: id, lastactivity or created")
                    .one_of_ignore_case(ROOM_SORT_ORDERS),
                page_size_param(DEFAULT_ROOM_PAGE_SIZE),
            ],
            groups:      Vec::new(),
            operation:   Operation::ListRooms,
        },
        ToolDescriptor {
            name:        TOOL_CREATE_ROOM,
            alias_of:    None,
            description: DESC_CREATE_ROOM.to_string(),
            params:      create_params,
            groups:      vec![FieldGroup::synonyms(LOCKED_SYNONYMS)],
            operation:   Operation::CreateRoom,
        },
        ToolDescriptor {
            name:        TOOL_UPDATE_ROOM,
            alias_of:    None,
            description: DESC_UPDATE_ROOM.to_string(),
            params:      update_params,
            groups:      vec![
                FieldGroup::synonyms(LOCKED_SYNONYMS),
                FieldGroup::at_least_one(ROOM_UPDATES),
            ],
            operation:   Operation::UpdateRoom,
        },
        ToolDescriptor {
            name:        TOOL_GET_ROOM,
            alias_of:    None,
            description: DESC_GET_ROOM.to_string(),
            params:      vec![ParamDef::string(PARAM_ROOM_ID, "ID of the room").required()],
            groups:      Vec::new(),
            operation:   Operation::GetRoom,
        },
    ]
}

/// Message tool definitions
pub fn get_message_tools(defaults: &ToolDefaults) -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor {
            name:        TOOL_SEND_MESSAGE,
            alias_of:    None,
            description: DESC_SEND_MESSAGE.to_string(),
            params:      vec![
                ParamDef::string(PARAM_ROOM_ID, "Room to post into"),
                ParamDef::string(PARAM_TO_PERSON_ID, "Person ID for a direct message"),
                ParamDef::email(PARAM_TO_PERSON_EMAIL, "E-mail address for a direct message"),
                ParamDef::string(PARAM_TEXT, "Plain text content"),
                ParamDef::string(PARAM_MARKDOWN, "Markdown content"),
                ParamDef::string(PARAM_HTML, "HTML content"),
                ParamDef::string_array(PARAM_FILES, "Public URLs of files to attach"),
                ParamDef::string(PARAM_PARENT_ID, "Parent message ID to reply in a thread"),
                ParamDef::string(
                    PARAM_FORMAT,
                    "How plain text content is rendered: text, markdown or html",
                )
                .one_of(MESSAGE_FORMATS)
                .with_default(defaults.message_format.clone()),
            ],
            groups:      vec![
                FieldGroup::exactly_one(MESSAGE_TARGETS),
                FieldGroup::at_least_one(MESSAGE_CONTENT),
            ],
            operation:   Operation::SendMessage,
        },
        ToolDescriptor {
            name:        TOOL_LIST_MESSAGES,
            alias_of:    None,
            description: DESC_LIST_MESSAGES.to_string(),
            params:      vec![
                ParamDef::string(PARAM_ROOM_ID, "Room to read messages from").required(),
                ParamDef::string(
                    PARAM_MENTIONED_PEOPLE,
                    "Only messages mentioning this person ID, or 'me'",
                ),
                ParamDef::string(PARAM_BEFORE, "Only messages sent before this ISO 8601 time"),
                ParamDef::string(
                    PARAM_BEFORE_MESSAGE,
                    "Only messages sent before this message ID",
                ),
                page_size_param(DEFAULT_MESSAGE_PAGE_SIZE),
            ],
            groups:      Vec::new(),
            operation:   Operation::ListMessages,
        },
    ]
}

/// Membership tool definitions
pub fn get_membership_tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor {
            name:        TOOL_LIST_MEMBERSHIPS,
            alias_of:    None,
            description: DESC_LIST_MEMBERSHIPS.to_string(),
            params:      vec![
                ParamDef::string(PARAM_ROOM_ID, "Only memberships of this room"),
                ParamDef::string(PARAM_PERSON_ID, "Only memberships of this person"),
                ParamDef::email(PARAM_PERSON_EMAIL, "Only memberships of this e-mail address"),
                page_size_param(DEFAULT_MEMBERSHIP_PAGE_SIZE),
            ],
            groups:      Vec::new(),
            operation:   Operation::ListMemberships,
        },
        ToolDescriptor {
            name:        TOOL_ADD_MEMBERSHIP,
            alias_of:    None,
            description: DESC_ADD_MEMBERSHIP.to_string(),
            params:      vec![
                ParamDef::string(PARAM_ROOM_ID, "Room to add the person to").required(),
                ParamDef::string(PARAM_PERSON_ID, "ID of the person to add"),
                ParamDef::email(PARAM_PERSON_EMAIL, "E-mail address of the person to add"),
                ParamDef::boolean(PARAM_IS_MODERATOR, "Make the person a moderator"),
            ],
            groups:      vec![FieldGroup::exactly_one(MEMBERSHIP_PERSON)],
            operation:   Operation::AddMembership,
        },
        ToolDescriptor {
            name:        TOOL_UPDATE_MEMBERSHIP,
            alias_of:    None,
            description: DESC_UPDATE_MEMBERSHIP.to_string(),
            params:      vec![
                ParamDef::string(PARAM_MEMBERSHIP_ID, "ID of the membership to update")
                    .required(),
                ParamDef::boolean(PARAM_IS_MODERATOR, "Whether the person is a moderator"),
                ParamDef::boolean(PARAM_IS_MONITOR, "Whether the person is a monitor"),
            ],
            groups:      vec![FieldGroup::at_least_one(MEMBERSHIP_UPDATES)],
            operation:   Operation::UpdateMembership,
        },
    ]
}

/// People tool definitions
pub fn get_people_tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor {
            name:        TOOL_GET_ME,
            alias_of:    None,
            description: DESC_GET_ME.to_string(),
            params:      Vec::new(),
            groups:      Vec::new(),
            operation:   Operation::GetMe,
        },
        ToolDescriptor {
            name:        TOOL_LIST_PEOPLE,
            alias_of:    None,
            description: DESC_LIST_PEOPLE.to_string(),
            params:      vec![
                ParamDef::email(PARAM_EMAIL, "Look up a person by e-mail address"),
                ParamDef::string(PARAM_DISPLAY_NAME, "Search by display name prefix"),
                ParamDef::string_array(PARAM_ID, "Look up people by ID"),
                ParamDef::string(PARAM_ORG_ID, "Organization to search in"),
                ParamDef::boolean(PARAM_CALLING_DATA, "Include Webex Calling details"),
                ParamDef::string(PARAM_LOCATION_ID, "Only people at this location"),
                page_size_param(DEFAULT_PEOPLE_PAGE_SIZE),
            ],
            groups:      Vec::new(),
            operation:   Operation::ListPeople,
        },
    ]
}

/// Get all canonical tool definitions in catalog order
pub fn get_all_tools(defaults: &ToolDefaults) -> Vec<ToolDescriptor> {
    let mut tools = Vec::new();

    tools.extend(get_room_tools(defaults));
    tools.extend(get_message_tools(defaults));
    tools.extend(get_membership_tools());
    tools.extend(get_people_tools());

    tools
}
