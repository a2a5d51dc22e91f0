//! Webex-facing half of the server: operations, the platform client and result shaping

pub mod operation;
pub mod response_shaper;
pub mod support;

pub use operation::{NormalizedOperationCall, Operation, map_call};
pub use response_shaper::shape;
