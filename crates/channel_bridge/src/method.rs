use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Methods the bridge dispatcher knows how to answer.
///
/// Adding a method means adding a variant here *and* an arm in
/// [`BridgeDispatcher::handle`](crate::dispatcher::BridgeDispatcher); anything
/// that fails to parse falls through to not-implemented.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, AsRefStr, Display, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum BridgeMethod {
    GetPlatformVersion,
}

impl BridgeMethod {
    /// Every recognised method name, in declaration order.
    pub fn names() -> Vec<&'static str> {
        use strum::IntoEnumIterator;
        Self::iter().map(|m| m.as_static()).collect()
    }

    pub const fn as_static(&self) -> &'static str {
        match self {
            BridgeMethod::GetPlatformVersion => "getPlatformVersion",
        }
    }
}
