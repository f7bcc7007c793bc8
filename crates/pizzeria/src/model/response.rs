//! The `{result, detail?, payload?}` envelope returned by client operations.
//!
//! Expected domain failures (unknown pizza, duplicate name, ...) are *results*, not errors:
//! they come back as [`ApiResponse::fail`] with a human readable `detail`. Errors are
//! reserved for infrastructure trouble such as a dead actor or a broken database.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    Ok,
    Fail,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub result: ResultStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Success carrying `payload`.
    pub fn ok(payload: T) -> Self {
        Self {
            result: ResultStatus::Ok,
            detail: None,
            payload: Some(payload),
        }
    }

    /// Success without payload.
    pub fn done() -> Self {
        Self {
            result: ResultStatus::Ok,
            detail: None,
            payload: None,
        }
    }

    /// Success without payload but with an explanatory detail.
    pub fn notice(detail: impl Into<String>) -> Self {
        Self {
            result: ResultStatus::Ok,
            detail: Some(detail.into()),
            payload: None,
        }
    }

    pub fn fail(detail: impl Into<String>) -> Self {
        Self {
            result: ResultStatus::Fail,
            detail: Some(detail.into()),
            payload: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.result == ResultStatus::Ok
    }

    pub fn is_fail(&self) -> bool {
        self.result == ResultStatus::Fail
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    pub fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }

    pub fn into_payload(self) -> Option<T> {
        self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fail_serializes_without_payload() {
        let response: ApiResponse<u32> = ApiResponse::fail("No such pizza");
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"result": "fail", "detail": "No such pizza"})
        );
    }

    #[test]
    fn test_ok_serializes_payload_only() {
        let response = ApiResponse::ok(vec![1, 2]);
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"result": "ok", "payload": [1, 2]})
        );
    }

    #[test]
    fn test_notice_is_ok_without_payload() {
        let response: ApiResponse<Vec<u32>> = ApiResponse::notice("No active orders");
        assert!(response.is_ok());
        assert_eq!(response.detail(), Some("No active orders"));
        assert!(response.payload().is_none());
    }

    #[test]
    fn test_deserializes_minimal_body() {
        let response: ApiResponse<String> = serde_json::from_str(r#"{"result":"ok"}"#).unwrap();
        assert_eq!(response, ApiResponse::done());
    }
}
