use std::{
    panic::{AssertUnwindSafe, catch_unwind},
    sync::Arc,
    time::Instant,
};

use dashmap::{DashMap, mapref::entry::Entry};
use tracing::{info, warn};

use crate::{
    dispatcher::MethodCallHandler,
    error::BridgeError,
    message::{Invocation, MethodResponse},
};

type HandlerTable = Arc<DashMap<String, Arc<dyn MethodCallHandler>>>;

/// The host's message transport: a table of named channels and their handlers.
///
/// Clones share the same table. Two separate `BinaryMessenger::new()` values
/// are independent transports, so tests can each build their own.
#[derive(Clone, Default)]
pub struct BinaryMessenger {
    channels: HandlerTable,
}

impl std::fmt::Debug for BinaryMessenger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinaryMessenger")
            .field("channels", &self.channels())
            .finish()
    }
}

/// Proof that a channel was bound. Owned by whoever registered it.
///
/// Dropping the handle leaves the registration in place; call
/// [`RegistrationHandle::unregister`] to release the name.
#[derive(Debug)]
#[must_use = "the handle is the only way to release the channel name"]
pub struct RegistrationHandle {
    channel: String,
    messenger: BinaryMessenger,
}

impl RegistrationHandle {
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Remove the binding so the name can be registered again.
    pub fn unregister(self) {
        if self.messenger.channels.remove(&self.channel).is_some() {
            info!(channel = %self.channel, "channel unregistered");
        }
    }
}

impl BinaryMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `handler` as the only handler for `name` on this messenger.
    ///
    /// Fails if the name is empty or already bound; an existing binding is
    /// never replaced.
    pub fn register<H: MethodCallHandler>(
        &self,
        name: impl Into<String>,
        handler: H,
    ) -> Result<RegistrationHandle, BridgeError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(BridgeError::EmptyChannelName);
        }
        match self.channels.entry(name.clone()) {
            Entry::Occupied(_) => {
                warn!(channel = %name, "refusing duplicate channel registration");
                Err(BridgeError::AlreadyRegistered { channel: name })
            }
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(handler));
                info!(channel = %name, "channel registered");
                Ok(RegistrationHandle {
                    channel: name,
                    messenger: self.clone(),
                })
            }
        }
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.channels.contains_key(name)
    }

    /// Names of all bound channels, sorted.
    pub fn channels(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .channels
            .iter()
            .map(|kv| kv.key().clone())
            .collect();
        names.sort();
        names
    }

    /// Deliver one invocation and return its single answer.
    ///
    /// A channel nobody registered answers not-implemented, like a method
    /// nobody handles. A panicking handler is contained and reported as
    /// [`BridgeError::HandlerPanicked`].
    pub fn invoke(
        &self,
        channel: &str,
        invocation: &Invocation,
    ) -> Result<MethodResponse, BridgeError> {
        let start = Instant::now();

        // clone the Arc out so no map shard stays locked while the handler runs
        let handler = self
            .channels
            .get(channel)
            .map(|entry| Arc::clone(entry.value()));

        let result = match handler {
            Some(handler) => catch_unwind(AssertUnwindSafe(|| handler.handle(invocation)))
                .map_err(|_| BridgeError::HandlerPanicked {
                    channel: channel.to_string(),
                    method: invocation.method.clone(),
                }),
            None => {
                warn!(%channel, method = %invocation.method, "call on unregistered channel");
                Ok(MethodResponse::NotImplemented)
            }
        };

        let latency_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);
        tracing::event!(
            target: "request",
            tracing::Level::INFO,
            channel,
            method = %invocation.method,
            outcome = match &result {
                Ok(rsp) => rsp.outcome(),
                Err(_) => "panicked",
            },
            latency_us
        );

        result
    }
}
