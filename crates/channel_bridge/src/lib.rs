pub mod dispatcher;
pub mod error;
pub mod host;
pub mod jsonrpc;
pub mod message;
pub mod messenger;
pub mod method;
pub mod runtime;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_util;

pub use dispatcher::{BridgeDispatcher, MethodCallHandler};
pub use error::BridgeError;
pub use host::{HostEnvironment, StaticHost, SystemHost};
pub use message::{Invocation, LogLevel, MethodResponse};
pub use messenger::{BinaryMessenger, RegistrationHandle};
pub use method::BridgeMethod;
