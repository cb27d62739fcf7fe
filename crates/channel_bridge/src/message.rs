use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{AsRefStr, Display, EnumString};

/// A single inbound method call on a channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Invocation {
    pub method: String,
    /// Method-defined payload. Passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Value>,
}

impl Invocation {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            arguments: None,
        }
    }

    pub fn with_arguments(method: impl Into<String>, arguments: Value) -> Self {
        Self {
            method: method.into(),
            arguments: Some(arguments),
        }
    }
}

/// The one answer every invocation gets.
///
/// `NotImplemented` is a regular outcome, not a failure: the channel is alive
/// but has nothing bound to that method name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum MethodResponse {
    Value(String),
    NotImplemented,
}

impl MethodResponse {
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, MethodResponse::NotImplemented)
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            MethodResponse::Value(v) => Some(v),
            MethodResponse::NotImplemented => None,
        }
    }

    /// Short label used in structured request events.
    pub fn outcome(&self) -> &'static str {
        match self {
            MethodResponse::Value(_) => "value",
            MethodResponse::NotImplemented => "not_implemented",
        }
    }
}

/// What log levels are supported?
/// Higher‐value variants are more severe.
#[derive(
    Debug, Copy, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, PartialOrd, Ord,
    Default, EnumString, AsRefStr, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    #[default]
    Info = 2,
    Warn = 3,
    Error = 4,
    Critical = 5,
}

impl LogLevel {
    /// `EnvFilter` directive for this level. `tracing` has nothing above error.
    pub const fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error | LogLevel::Critical => "error",
        }
    }
}
