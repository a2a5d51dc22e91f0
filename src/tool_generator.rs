//! Tool generation and invocation from declarative definitions.
//!
//! This module is the bridge between the static descriptors in
//! `tool_definitions.rs` and the running server:
//!
//! ```text
//! ToolDescriptor → generate_tool_registration() → rmcp::model::Tool
//! InvocationRequest → resolve → validate → map_call → execute → shape → ToolResult
//! ```
//!
//! Every step before `execute` is local and pure, so an invalid invocation never
//! reaches the platform. `execute` issues exactly one platform call.

use rmcp::model::{CallToolRequestParam, Tool};
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::registry::ToolRegistry;
use crate::support::params::validate;
use crate::support::response::ToolResult;
use crate::support::schema::SchemaBuilder;
use crate::tool_definitions::ToolDescriptor;
use crate::webex_tools::support::{Params, WebexApi, execute};
use crate::webex_tools::{NormalizedOperationCall, map_call, shape};

/// Generate tool registration from a declarative definition
pub fn generate_tool_registration(def: &ToolDescriptor) -> Tool {
    let schema = def
        .params
        .iter()
        .fold(SchemaBuilder::new(), SchemaBuilder::add_param)
        .build();

    Tool {
        name:         def.name.into(),
        description:  def.description.clone().into(),
        input_schema: schema,
    }
}

/// A tool call as received from the client
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationRequest {
    pub tool_name: String,
    pub arguments: Params,
}

impl From<CallToolRequestParam> for InvocationRequest {
    fn from(request: CallToolRequestParam) -> Self {
        Self {
            tool_name: request.name.into_owned(),
            arguments: request.arguments.unwrap_or_default(),
        }
    }
}

/// Resolve, validate and map an invocation without touching the platform
pub fn prepare(
    registry: &ToolRegistry,
    request: &InvocationRequest,
) -> Result<NormalizedOperationCall> {
    let descriptor = registry.resolve(&request.tool_name)?;
    let parameters = validate(descriptor, &request.arguments)?;
    Ok(map_call(descriptor, parameters))
}

/// Run one tool call end to end; always yields a well-formed result
pub async fn invoke(
    registry: &ToolRegistry,
    api: &dyn WebexApi,
    request: InvocationRequest,
) -> ToolResult {
    let span = info_span!(
        "tool_call",
        tool = %request.tool_name,
        call_id = %Uuid::new_v4()
    );

    async move {
        let call = match prepare(registry, &request) {
            Ok(call) => call,
            Err(err) => {
                log_rejection(&err);
                return ToolResult::from_error(&err);
            }
        };

        let operation = call.operation;
        debug!(
            operation = %operation,
            mutating = operation.is_mutating(),
            "Dispatching to Webex"
        );
        let result = shape(&call, execute(api, &call).await);

        if result.success {
            info!(operation = %operation, "Tool call succeeded");
        } else {
            debug!(operation = %operation, kind = result.error_kind(), "Tool call failed");
        }
        result
    }
    .instrument(span)
    .await
}

fn log_rejection(err: &Error) {
    if err.is_validation() {
        debug!(kind = err.kind(), field = err.field(), "Tool call rejected: {err}");
    } else {
        warn!(kind = err.kind(), "Tool call rejected: {err}");
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::constants::{
        TOOL_ADD_MEMBERSHIP, TOOL_CREATE_ROOM, TOOL_CREATE_SPACE, TOOL_GET_ROOM, TOOL_GET_SPACE,
        TOOL_LIST_ROOMS, TOOL_LIST_SPACES, TOOL_SEND_MESSAGE, TOOL_SEND_SPACE_MESSAGE,
    };
    use crate::registry::ToolRegistry;
    use crate::tool_definitions::{SPACE_ALIASES, ToolDefaults};
    use crate::webex_tools::Operation;
    use crate::webex_tools::support::mock_client::MockWebexApi;
    use crate::webex_tools::support::{PlatformError, PlatformErrorKind};

    fn registry() -> ToolRegistry {
        ToolRegistry::with_catalog(&ToolDefaults::default()).unwrap()
    }

    fn request(tool_name: &str, arguments: Value) -> InvocationRequest {
        let arguments = match arguments {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        };
        InvocationRequest {
            tool_name: tool_name.to_string(),
            arguments,
        }
    }

    fn sample_arguments(operation: Operation) -> Value {
        match operation {
            Operation::CreateRoom => json!({"title": "Launch"}),
            Operation::UpdateRoom => json!({"roomId": "room-1", "title": "Launch"}),
            Operation::GetRoom | Operation::ListMessages => json!({"roomId": "room-1"}),
            Operation::SendMessage => json!({"roomId": "room-1", "text": "hi"}),
            Operation::AddMembership => json!({"roomId": "room-1", "personId": "person-2"}),
            _ => json!({}),
        }
    }

    #[test]
    fn test_every_alias_maps_like_its_canonical() {
        let registry = registry();
        for (alias, canonical) in SPACE_ALIASES {
            let operation = registry.resolve(canonical).unwrap().operation;
            let arguments = sample_arguments(operation);

            let via_canonical = prepare(&registry, &request(canonical, arguments.clone())).unwrap();
            let via_alias = prepare(&registry, &request(alias, arguments)).unwrap();

            assert_eq!(via_canonical, via_alias, "{alias} differs from {canonical}");
        }
    }

    #[test]
    fn test_create_space_matches_create_room() {
        let registry = registry();
        let arguments = json!({"title": "Launch", "isPublic": true, "description": "Go"});

        let room = prepare(&registry, &request(TOOL_CREATE_ROOM, arguments.clone())).unwrap();
        let space = prepare(&registry, &request(TOOL_CREATE_SPACE, arguments)).unwrap();

        assert_eq!(room, space);
        assert_eq!(room.operation, Operation::CreateRoom);
        assert_eq!(
            Value::Object(room.parameters),
            json!({"title": "Launch", "isPublic": true, "description": "Go"})
        );
    }

    #[test]
    fn test_invocation_request_from_call_without_arguments() {
        let call = CallToolRequestParam {
            name:      TOOL_LIST_ROOMS.into(),
            arguments: None,
        };
        let request = InvocationRequest::from(call);
        assert_eq!(request.tool_name, TOOL_LIST_ROOMS);
        assert!(request.arguments.is_empty());
    }

    #[test]
    fn test_registration_uses_descriptor_schema() {
        let registry = registry();
        let tool = generate_tool_registration(registry.resolve(TOOL_SEND_MESSAGE).unwrap());

        assert_eq!(tool.name, TOOL_SEND_MESSAGE);
        assert_eq!(
            tool.input_schema["properties"]["format"]["default"],
            json!("markdown")
        );
        assert!(tool.input_schema.get("required").is_none());
    }

    #[tokio::test]
    async fn test_list_spaces_reaches_list_rooms() {
        let registry = registry();
        let mock = MockWebexApi::new();

        let by_room = invoke(&registry, &mock, request(TOOL_LIST_ROOMS, json!({"max": 10}))).await;
        let by_space =
            invoke(&registry, &mock, request(TOOL_LIST_SPACES, json!({"max": 10}))).await;

        assert_eq!(by_room, by_space);
        let calls = mock.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], calls[1]);
        assert_eq!(calls[0].0, Operation::ListRooms);
        assert_eq!(by_room.data.unwrap()["count"], json!(1));
    }

    #[tokio::test]
    async fn test_missing_required_field_never_calls_platform() {
        let mock = MockWebexApi::new();

        let result = invoke(&registry(), &mock, request(TOOL_GET_ROOM, json!({}))).await;

        assert!(!result.success);
        assert_eq!(result.error_kind(), Some("MissingParameter"));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_send_message_without_target() {
        let mock = MockWebexApi::new();

        let result = invoke(&registry(), &mock, request(TOOL_SEND_MESSAGE, json!({"text": "hi"})))
            .await;

        assert_eq!(result.error_kind(), Some("MissingTarget"));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_send_message_with_room_and_person() {
        let mock = MockWebexApi::new();

        let result = invoke(
            &registry(),
            &mock,
            request(
                TOOL_SEND_SPACE_MESSAGE,
                json!({"roomId": "room-1", "toPersonId": "person-2", "text": "hi"}),
            ),
        )
        .await;

        assert_eq!(result.error_kind(), Some("AmbiguousTarget"));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_add_membership_without_person() {
        let mock = MockWebexApi::new();

        let result = invoke(
            &registry(),
            &mock,
            request(TOOL_ADD_MEMBERSHIP, json!({"roomId": "room-1"})),
        )
        .await;

        assert_eq!(result.error_kind(), Some("MissingTarget"));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_get_room_is_repeatable() {
        let registry = registry();
        let mock = MockWebexApi::new();

        let first = invoke(&registry, &mock, request(TOOL_GET_SPACE, json!({"roomId": "room-1"})))
            .await;
        let second =
            invoke(&registry, &mock, request(TOOL_GET_SPACE, json!({"roomId": "room-1"}))).await;

        assert!(first.success);
        assert_eq!(first, second);
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn test_send_message_defaults_to_markdown() {
        let mock = MockWebexApi::new();

        let result = invoke(
            &registry(),
            &mock,
            request(TOOL_SEND_MESSAGE, json!({"roomId": "room-1", "text": "**hi**"})),
        )
        .await;

        assert!(result.success);
        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, Operation::SendMessage);
        assert_eq!(calls[0].1["format"], json!("markdown"));
    }

    #[tokio::test]
    async fn test_configured_message_format_is_used() {
        let registry = ToolRegistry::with_catalog(&ToolDefaults {
            message_format: "text".to_string(),
            room_type:      None,
        })
        .unwrap();
        let mock = MockWebexApi::new();

        invoke(
            &registry,
            &mock,
            request(TOOL_SEND_MESSAGE, json!({"roomId": "room-1", "text": "hi"})),
        )
        .await;

        assert_eq!(mock.calls()[0].1["format"], json!("text"));
    }

    #[tokio::test]
    async fn test_not_found_is_translated() {
        let mock = MockWebexApi::failing(
            PlatformError::new(PlatformErrorKind::NotFound, "Room not found").with_status(404),
        );

        let result = invoke(
            &registry(),
            &mock,
            request(TOOL_GET_ROOM, json!({"roomId": "missing"})),
        )
        .await;

        assert!(!result.success);
        let error = result.error.unwrap();
        assert_eq!(error.kind, "NotFound");
        assert_eq!(error.message, "Room not found");
        assert_eq!(error.details["status"], json!(404));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_unknown_tool_is_a_failed_result() {
        let mock = MockWebexApi::new();

        let result = invoke(&registry(), &mock, request("delete_room", json!({}))).await;

        assert_eq!(result.error_kind(), Some("UnknownTool"));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_mutating_call_is_issued_once_even_on_failure() {
        let mock = MockWebexApi::failing(PlatformError::new(
            PlatformErrorKind::ServerError,
            "Internal error",
        ));

        let result = invoke(
            &registry(),
            &mock,
            request(TOOL_CREATE_ROOM, json!({"title": "Launch"})),
        )
        .await;

        assert_eq!(result.error_kind(), Some("ServerError"));
        assert_eq!(mock.call_count(), 1);
    }
}
