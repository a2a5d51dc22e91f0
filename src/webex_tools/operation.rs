//! Operation mapper: a validated tool invocation becomes exactly one platform call

use std::fmt;

use serde::Serialize;

use super::support::Params;
use crate::tool_definitions::ToolDescriptor;

/// The closed set of platform operations the catalog can reach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Operation {
    ListRooms,
    CreateRoom,
    UpdateRoom,
    GetRoom,
    SendMessage,
    ListMessages,
    ListMemberships,
    AddMembership,
    UpdateMembership,
    GetMe,
    ListPeople,
}

impl Operation {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ListRooms => "ListRooms",
            Self::CreateRoom => "CreateRoom",
            Self::UpdateRoom => "UpdateRoom",
            Self::GetRoom => "GetRoom",
            Self::SendMessage => "SendMessage",
            Self::ListMessages => "ListMessages",
            Self::ListMemberships => "ListMemberships",
            Self::AddMembership => "AddMembership",
            Self::UpdateMembership => "UpdateMembership",
            Self::GetMe => "GetMe",
            Self::ListPeople => "ListPeople",
        }
    }

    /// Mutating operations are not safe to repeat
    pub const fn is_mutating(self) -> bool {
        matches!(
            self,
            Self::CreateRoom
                | Self::UpdateRoom
                | Self::SendMessage
                | Self::AddMembership
                | Self::UpdateMembership
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Platform-ready form of an invocation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedOperationCall {
    pub operation:  Operation,
    pub parameters: Params,
}

/// Pair validated parameters with the descriptor's target operation
///
/// Aliases carry the canonical operation, so `create_space` and `create_room`
/// produce identical calls for identical arguments.
pub fn map_call(descriptor: &ToolDescriptor, parameters: Params) -> NormalizedOperationCall {
    NormalizedOperationCall {
        operation: descriptor.operation,
        parameters,
    }
}
