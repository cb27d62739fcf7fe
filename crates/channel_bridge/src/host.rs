//! Read-only view of the machine the bridge runs on.

use std::env;

use sysinfo::System;

/// OS version reported when the host cannot tell us.
pub const UNKNOWN_VERSION: &str = "unknown";

pub trait HostEnvironment: Send + Sync {
    /// Human readable platform name, e.g. `macOS`.
    fn platform_name(&self) -> String;
    /// Human readable OS version string as the host reports it.
    fn os_version(&self) -> String;

    /// `"<PlatformName> <OSVersion>"`, the answer to `getPlatformVersion`.
    fn platform_version(&self) -> String {
        let version = self.os_version();
        let version = version.trim();
        let version = if version.is_empty() { UNKNOWN_VERSION } else { version };
        format!("{} {}", self.platform_name(), version)
    }
}

/// The machine we were compiled for and are running on.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHost;

impl HostEnvironment for SystemHost {
    fn platform_name(&self) -> String {
        platform_display_name(env::consts::OS)
    }

    fn os_version(&self) -> String {
        System::os_version().unwrap_or_else(|| UNKNOWN_VERSION.to_string())
    }
}

/// Fixed answers, for tests and for hosts that already know their version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticHost {
    pub platform: String,
    pub version: String,
}

impl StaticHost {
    pub fn new(platform: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            version: version.into(),
        }
    }
}

impl HostEnvironment for StaticHost {
    fn platform_name(&self) -> String {
        self.platform.clone()
    }

    fn os_version(&self) -> String {
        self.version.clone()
    }
}

/// Maps `std::env::consts::OS` to the name users expect to read.
pub fn platform_display_name(os: &str) -> String {
    match os {
        "macos" => "macOS",
        "ios" => "iOS",
        "linux" => "Linux",
        "windows" => "Windows",
        "android" => "Android",
        "freebsd" => "FreeBSD",
        other => other,
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names() {
        assert_eq!(platform_display_name("macos"), "macOS");
        assert_eq!(platform_display_name("windows"), "Windows");
        assert_eq!(platform_display_name("haiku"), "haiku");
    }

    #[test]
    fn static_host_formats_platform_then_version() {
        assert_eq!(StaticHost::new("macOS", "14.0").platform_version(), "macOS 14.0");
    }

    #[test]
    fn blank_version_reads_unknown() {
        assert_eq!(StaticHost::new("Linux", "  ").platform_version(), "Linux unknown");
    }

    #[test]
    fn system_host_is_prefixed_by_platform() {
        let host = SystemHost;
        let answer = host.platform_version();
        assert!(answer.starts_with(&format!("{} ", host.platform_name())));
        assert!(answer.len() > host.platform_name().len() + 1);
    }
}
