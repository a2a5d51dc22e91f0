use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Error;

/// Uniform envelope returned by every tool call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data:    Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error:   Option<ToolError>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolError {
    pub kind:    String,
    pub message: String,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub details: Map<String, Value>,
}

impl ToolResult {
    pub const fn success(data: Value) -> Self {
        Self {
            success: true,
            data:    Some(data),
            error:   None,
        }
    }

    /// Failure result carrying the error's kind, message and diagnostics
    pub fn from_error(error: &Error) -> Self {
        Self {
            success: false,
            data:    None,
            error:   Some(ToolError {
                kind:    error.kind().to_string(),
                message: error.to_string(),
                details: error_details(error),
            }),
        }
    }

    pub fn error_kind(&self) -> Option<&str> {
        self.error.as_ref().map(|error| error.kind.as_str())
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| {
            r#"{"success":false,"error":{"kind":"InvalidResponse","message":"Failed to serialize response"}}"#
                .to_string()
        })
    }
}

fn error_details(error: &Error) -> Map<String, Value> {
    let mut details = Map::new();

    if let Some(field) = error.field() {
        details.insert("field".to_string(), field.into());
    }

    match error {
        Error::InvalidValue { allowed, .. } if !allowed.is_empty() => {
            details.insert("allowed".to_string(), allowed.clone().into());
        }
        Error::AmbiguousTarget {
            candidates,
            supplied,
        } => {
            details.insert("candidates".to_string(), candidates.clone().into());
            details.insert("supplied".to_string(), supplied.clone().into());
        }
        Error::MissingTarget { candidates } => {
            details.insert("candidates".to_string(), candidates.clone().into());
        }
        Error::ConflictingParameters { fields } => {
            details.insert("fields".to_string(), fields.clone().into());
        }
        Error::Platform(platform) => {
            if let Some(status) = platform.status {
                details.insert("status".to_string(), status.into());
            }
            if let Some(tracking_id) = &platform.tracking_id {
                details.insert("trackingId".to_string(), tracking_id.clone().into());
            }
            if let Some(retry_after) = platform.retry_after_secs {
                details.insert("retryAfterSeconds".to_string(), retry_after.into());
            }
        }
        _ => {}
    }

    details
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::webex_tools::support::{PlatformError, PlatformErrorKind};

    #[test]
    fn test_success_omits_error() {
        let result = ToolResult::success(json!({"id": "room-1"}));
        let value: Value = serde_json::from_str(&result.to_json()).unwrap();
        assert_eq!(value, json!({"success": true, "data": {"id": "room-1"}}));
    }

    #[test]
    fn test_missing_target_lists_candidates() {
        let result = ToolResult::from_error(&Error::MissingTarget {
            candidates: vec!["personId".to_string(), "personEmail".to_string()],
        });

        assert!(!result.success);
        assert_eq!(result.error_kind(), Some("MissingTarget"));
        let error = result.error.unwrap();
        assert_eq!(error.details["candidates"], json!(["personId", "personEmail"]));
    }

    #[test]
    fn test_platform_error_details() {
        let platform = PlatformError::new(PlatformErrorKind::RateLimited, "Slow down")
            .with_status(429)
            .with_tracking_id(Some("ROUTER_1".to_string()))
            .with_retry_after(Some(30));
        let result = ToolResult::from_error(&Error::Platform(platform));

        let value: Value = serde_json::from_str(&result.to_json()).unwrap();
        assert_eq!(
            value,
            json!({
                "success": false,
                "error": {
                    "kind": "RateLimited",
                    "message": "Slow down",
                    "details": {"status": 429, "trackingId": "ROUTER_1", "retryAfterSeconds": 30}
                }
            })
        );
    }

    #[test]
    fn test_missing_parameter_without_extra_details() {
        let result = ToolResult::from_error(&Error::MissingParameter {
            field: "roomId".to_string(),
        });
        let value: Value = serde_json::from_str(&result.to_json()).unwrap();
        assert_eq!(value["error"]["details"], json!({"field": "roomId"}));
    }
}
