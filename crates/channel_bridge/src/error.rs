use thiserror::Error;

/// Errors raised by channel registration and the bridge runtime.
///
/// Unknown methods are not errors; they come back as
/// [`MethodResponse::NotImplemented`](crate::message::MethodResponse).
#[derive(Error, Debug)]
pub enum BridgeError {
    /// A second handler tried to bind a name that is already taken on this messenger.
    #[error("channel `{channel}` is already registered on this messenger")]
    AlreadyRegistered { channel: String },

    #[error("channel name must not be empty")]
    EmptyChannelName,

    /// The bound handler panicked while answering.
    #[error("handler for channel `{channel}` panicked on method `{method}`")]
    HandlerPanicked { channel: String, method: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BridgeError {
    /// Configuration errors must stop startup; everything else happens per call.
    pub fn is_configuration(&self) -> bool {
        matches!(self, BridgeError::AlreadyRegistered { .. } | BridgeError::EmptyChannelName)
    }
}
