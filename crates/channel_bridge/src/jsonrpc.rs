use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::message::MethodResponse;

/// JSON‑RPC 2.0 frames exchanged with a bridge host over a line-delimited stream.
///
/// These structs mirror the [JSON‑RPC 2.0 spec](https://www.jsonrpc.org/specification)
/// and know nothing about the transport underneath.
///
/// ```ignore
/// use serde_json::json;
/// use channel_bridge::jsonrpc::{Id, Request};
///
/// let req = Request::call(Id::Number(1), "getPlatformVersion", None);
/// let line = serde_json::to_string(&req)?;
/// ```
pub const JSONRPC_VERSION: &str = "2.0";

/// Invalid JSON was received.
pub const PARSE_ERROR: i64 = -32700;
/// The JSON is not a valid request object.
pub const INVALID_REQUEST: i64 = -32600;
/// The method has no handler on this channel.
pub const METHOD_NOT_IMPLEMENTED: i64 = -32601;
/// The handler failed while producing its answer.
pub const INTERNAL_ERROR: i64 = -32603;

/// `id` MAY be a string, number or null. We support all forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Id {
    Number(i64),
    String(String),
    Null,
}

/// JSON‑RPC 2.0 Request object.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Request {
    #[serde(default = "default_version")]
    pub jsonrpc: String,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    /// Omitted for *notifications*.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
}

fn default_version() -> String {
    JSONRPC_VERSION.to_owned()
}

/// JSON‑RPC 2.0 Error object.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Error {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// JSON‑RPC 2.0 Response object.
/// Exactly one of `result` or `error` **must** be present.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Response {
    #[serde(default = "default_version")]
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Error>,
    pub id: Id,
}

/// Lets callers `serde_json::from_str::<Message>()` without inspecting the frame first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Message {
    Request(Request),
    Response(Response),
}

// -----------------------------------------------------------------------------
// Helper constructors
// -----------------------------------------------------------------------------
impl Request {
    /// Create a *call* expecting a response.
    pub fn call(id: Id, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_owned(),
            method: method.into(),
            params,
            id: Some(id),
        }
    }

    /// Create a *notification*. The bridge runtime still answers it, with a null id.
    pub fn notification(method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_owned(),
            method: method.into(),
            params,
            id: None,
        }
    }
}

impl Response {
    pub fn success(id: Id, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_owned(),
            result: Some(result),
            error: None,
            id,
        }
    }

    pub fn fail(id: Id, code: i64, message: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_owned(),
            result: None,
            error: Some(Error {
                code,
                message: message.into(),
                data,
            }),
            id,
        }
    }

    /// Render a channel answer as a wire frame.
    ///
    /// A value travels in `result`; not-implemented travels as error `-32601`
    /// carrying the method name so the caller can tell which feature is missing.
    pub fn from_method_response(id: Id, method: &str, response: MethodResponse) -> Self {
        match response {
            MethodResponse::Value(value) => Self::success(id, json!(value)),
            MethodResponse::NotImplemented => Self::fail(
                id,
                METHOD_NOT_IMPLEMENTED,
                "Method not implemented",
                Some(json!({ "method": method })),
            ),
        }
    }

    pub fn is_not_implemented(&self) -> bool {
        self.error
            .as_ref()
            .is_some_and(|e| e.code == METHOD_NOT_IMPLEMENTED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_without_jsonrpc_field_gets_default_version() {
        let req: Request =
            serde_json::from_str(r#"{"method":"getPlatformVersion","id":7}"#).unwrap();
        assert_eq!(req.jsonrpc, JSONRPC_VERSION);
        assert_eq!(req.id, Some(Id::Number(7)));
        assert!(req.params.is_none());
    }

    #[test]
    fn message_distinguishes_requests_from_responses() {
        let req =
            serde_json::from_str::<Message>(r#"{"jsonrpc":"2.0","method":"foo","id":"a"}"#)
                .unwrap();
        assert!(matches!(req, Message::Request(r) if r.method == "foo"));

        let rsp =
            serde_json::from_str::<Message>(r#"{"jsonrpc":"2.0","result":"ok","id":1}"#).unwrap();
        assert!(matches!(rsp, Message::Response(_)));
    }

    #[test]
    fn value_answer_becomes_result() {
        let rsp = Response::from_method_response(
            Id::Number(1),
            "getPlatformVersion",
            MethodResponse::Value("macOS 14.0".into()),
        );
        assert_eq!(rsp.result, Some(json!("macOS 14.0")));
        assert!(rsp.error.is_none());
        assert!(!rsp.is_not_implemented());
    }

    #[test]
    fn not_implemented_answer_becomes_method_error() {
        let rsp =
            Response::from_method_response(Id::Null, "foo", MethodResponse::NotImplemented);
        assert!(rsp.result.is_none());
        assert!(rsp.is_not_implemented());
        let err = rsp.error.unwrap();
        assert_eq!(err.data, Some(json!({"method": "foo"})));

        let parse_error = Response::fail(Id::Null, PARSE_ERROR, "Parse error", None);
        let line = serde_json::to_string(&parse_error).unwrap();
        assert!(line.contains(r#""id":null"#));
        assert!(!line.contains("result"));
    }
}
