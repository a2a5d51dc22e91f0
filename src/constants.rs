// This file contains constants for the MCP server and the tool catalog
// Webex REST specifics (endpoints, status handling) live in src/webex_tools

// Macro to include help text files
macro_rules! include_help_text {
    ($file:expr) => {
        include_str!(concat!("../help_text/", $file))
    };
}

// Server info
pub const WEBEX_MCP_INFO: &str = include_help_text!("webex_mcp_info.txt");

// Room tool descriptions
pub const DESC_LIST_ROOMS: &str = include_help_text!("room_tools/list_rooms.txt");
pub const DESC_CREATE_ROOM: &str = include_help_text!("room_tools/create_room.txt");
pub const DESC_UPDATE_ROOM: &str = include_help_text!("room_tools/update_room.txt");
pub const DESC_GET_ROOM: &str = include_help_text!("room_tools/get_room.txt");

// Message tool descriptions
pub const DESC_SEND_MESSAGE: &str = include_help_text!("message_tools/send_message.txt");
pub const DESC_LIST_MESSAGES: &str = include_help_text!("message_tools/list_messages.txt");

// Membership tool descriptions
pub const DESC_LIST_MEMBERSHIPS: &str = include_help_text!("membership_tools/list_memberships.txt");
pub const DESC_ADD_MEMBERSHIP: &str = include_help_text!("membership_tools/add_membership.txt");
pub const DESC_UPDATE_MEMBERSHIP: &str =
    include_help_text!("membership_tools/update_membership.txt");

// People tool descriptions
pub const DESC_GET_ME: &str = include_help_text!("people_tools/get_me.txt");
pub const DESC_LIST_PEOPLE: &str = include_help_text!("people_tools/list_people.txt");

// Tool name constants
pub const TOOL_LIST_ROOMS: &str = "list_rooms";
pub const TOOL_CREATE_ROOM: &str = "create_room";
pub const TOOL_UPDATE_ROOM: &str = "update_room";
pub const TOOL_GET_ROOM: &str = "get_room";
pub const TOOL_SEND_MESSAGE: &str = "send_message";
pub const TOOL_LIST_MESSAGES: &str = "list_messages";
pub const TOOL_LIST_MEMBERSHIPS: &str = "list_memberships";
pub const TOOL_ADD_MEMBERSHIP: &str = "add_membership";
pub const TOOL_UPDATE_MEMBERSHIP: &str = "update_membership";
pub const TOOL_GET_ME: &str = "get_me";
pub const TOOL_LIST_PEOPLE: &str = "list_people";

// "Space" terminology aliases
pub const TOOL_LIST_SPACES: &str = "list_spaces";
pub const TOOL_CREATE_SPACE: &str = "create_space";
pub const TOOL_UPDATE_SPACE: &str = "update_space";
pub const TOOL_GET_SPACE: &str = "get_space";
pub const TOOL_SEND_SPACE_MESSAGE: &str = "send_space_message";
pub const TOOL_LIST_SPACE_MESSAGES: &str = "list_space_messages";
pub const TOOL_LIST_SPACE_MEMBERSHIPS: &str = "list_space_memberships";
pub const TOOL_ADD_SPACE_MEMBERSHIP: &str = "add_space_membership";

// Parameter name constants (Webex wire names)
pub const PARAM_ROOM_ID: &str = "roomId";
pub const PARAM_TEAM_ID: &str = "teamId";
pub const PARAM_TYPE: &str = "type";
pub const PARAM_SORT_BY: &str = "sortBy";
pub const PARAM_MAX: &str = "max";
pub const PARAM_TITLE: &str = "title";
pub const PARAM_CLASSIFICATION_ID: &str = "classificationId";
pub const PARAM_IS_LOCKED: &str = "isLocked";
pub const PARAM_IS_MODERATED: &str = "isModerated";
pub const PARAM_IS_PUBLIC: &str = "isPublic";
pub const PARAM_IS_ANNOUNCEMENT_ONLY: &str = "isAnnouncementOnly";
pub const PARAM_DESCRIPTION: &str = "description";
pub const PARAM_TO_PERSON_ID: &str = "toPersonId";
pub const PARAM_TO_PERSON_EMAIL: &str = "toPersonEmail";
pub const PARAM_TEXT: &str = "text";
pub const PARAM_MARKDOWN: &str = "markdown";
pub const PARAM_HTML: &str = "html";
pub const PARAM_FILES: &str = "files";
pub const PARAM_PARENT_ID: &str = "parentId";
pub const PARAM_FORMAT: &str = "format";
pub const PARAM_MENTIONED_PEOPLE: &str = "mentionedPeople";
pub const PARAM_BEFORE: &str = "before";
pub const PARAM_BEFORE_MESSAGE: &str = "beforeMessage";
pub const PARAM_PERSON_ID: &str = "personId";
pub const PARAM_PERSON_EMAIL: &str = "personEmail";
pub const PARAM_IS_MODERATOR: &str = "isModerator";
pub const PARAM_IS_MONITOR: &str = "isMonitor";
pub const PARAM_MEMBERSHIP_ID: &str = "membershipId";
pub const PARAM_EMAIL: &str = "email";
pub const PARAM_DISPLAY_NAME: &str = "displayName";
pub const PARAM_ID: &str = "id";
pub const PARAM_ORG_ID: &str = "orgId";
pub const PARAM_CALLING_DATA: &str = "callingData";
pub const PARAM_LOCATION_ID: &str = "locationId";

// Enumerated values
pub const FORMAT_TEXT: &str = "text";
pub const FORMAT_MARKDOWN: &str = "markdown";
pub const FORMAT_HTML: &str = "html";
pub const MESSAGE_FORMATS: &[&str] = &[FORMAT_TEXT, FORMAT_MARKDOWN, FORMAT_HTML];
pub const DEFAULT_MESSAGE_FORMAT: &str = FORMAT_MARKDOWN;

pub const ROOM_TYPE_DIRECT: &str = "direct";
pub const ROOM_TYPE_GROUP: &str = "group";
pub const ROOM_TYPES: &[&str] = &[ROOM_TYPE_DIRECT, ROOM_TYPE_GROUP];

pub const ROOM_SORT_ORDERS: &[&str] = &["id", "lastactivity", "created"];

// Page sizes
pub const MAX_PAGE_SIZE: u64 = 1000;
pub const DEFAULT_ROOM_PAGE_SIZE: u64 = 100;
pub const DEFAULT_MESSAGE_PAGE_SIZE: u64 = 50;
pub const DEFAULT_MEMBERSHIP_PAGE_SIZE: u64 = 100;
pub const DEFAULT_PEOPLE_PAGE_SIZE: u64 = 100;

// Configuration defaults
pub const DEFAULT_API_BASE_URL: &str = "https://webexapis.com/v1";
pub const DEFAULT_TIMEOUT_SECONDS: u32 = 30;
pub const DEFAULT_RATE_LIMIT_MESSAGES_PER_SECOND: u32 = 10;
pub const DEFAULT_RATE_LIMIT_API_CALLS_PER_MINUTE: u32 = 300;
pub const ENV_PREFIX: &str = "WEBEX";
