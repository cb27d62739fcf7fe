use channel_bridge::{
    BinaryMessenger, BridgeDispatcher, BridgeError, HostEnvironment, RegistrationHandle, SystemHost,
};
use tracing::info;

/// Name of the channel the Wiredash bridge answers on.
pub const CHANNEL_NAME: &str = "wiredash";

/// Binds the bridge dispatcher to the `wiredash` channel of a host messenger.
pub struct WiredashPlugin;

impl WiredashPlugin {
    /// Register against the machine we are running on.
    ///
    /// Fails when `wiredash` is already bound on this messenger; call this once
    /// at startup and treat an error as fatal.
    pub fn register(messenger: &BinaryMessenger) -> Result<RegistrationHandle, BridgeError> {
        Self::register_with_host(messenger, SystemHost)
    }

    pub fn register_with_host<H: HostEnvironment + 'static>(
        messenger: &BinaryMessenger,
        host: H,
    ) -> Result<RegistrationHandle, BridgeError> {
        let handle = messenger.register(CHANNEL_NAME, BridgeDispatcher::new(host))?;
        info!(channel = CHANNEL_NAME, "wiredash plugin registered");
        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use channel_bridge::{Invocation, MethodResponse, StaticHost};

    #[test]
    fn answers_platform_version_on_wiredash_channel() {
        let messenger = BinaryMessenger::new();
        let host = StaticHost::new("macOS", "14.0");
        let handle = WiredashPlugin::register_with_host(&messenger, host).unwrap();
        assert_eq!(handle.channel(), CHANNEL_NAME);

        let rsp = messenger
            .invoke(CHANNEL_NAME, &Invocation::new("getPlatformVersion"))
            .unwrap();
        assert_eq!(rsp, MethodResponse::Value("macOS 14.0".into()));
        let rsp = messenger.invoke(CHANNEL_NAME, &Invocation::new("foo")).unwrap();
        assert_eq!(rsp, MethodResponse::NotImplemented);
    }

    #[test]
    fn registering_twice_fails_before_any_call() {
        let messenger = BinaryMessenger::new();
        let _handle = WiredashPlugin::register(&messenger).unwrap();

        let err = WiredashPlugin::register(&messenger).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains(CHANNEL_NAME));
    }

    #[test]
    fn system_host_answer_is_prefixed_with_platform() {
        let messenger = BinaryMessenger::new();
        let _handle = WiredashPlugin::register(&messenger).unwrap();
        let rsp = messenger
            .invoke(CHANNEL_NAME, &Invocation::new("getPlatformVersion"))
            .unwrap();
        let value = rsp.value().expect("value response");
        assert!(value.starts_with(&SystemHost.platform_name()));
    }
}
