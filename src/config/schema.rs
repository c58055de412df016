//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files, and
//! every field has a default: out of the box the decoy binds 0.0.0.0:8080,
//! reads probes into a 1 KiB window under a 2 s I/O timeout, and skips
//! provisioning.

use serde::{Deserialize, Serialize};

/// Root configuration for the decoy listener.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DecoyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Probe read window.
    pub probe: ProbeConfig,

    /// Startup provisioning of the host monitoring agent.
    pub provisioning: ProvisioningConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Per-connection read/write timeout in milliseconds. Bounds how long a
    /// slow or silent peer can hold a handler.
    pub io_ms: u64,

    /// How long shutdown waits for in-flight handlers before giving up.
    pub drain_secs: u64,

    /// Upper bound on the provisioning step at startup.
    pub provisioning_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            io_ms: 2_000,
            drain_secs: 5,
            provisioning_secs: 30,
        }
    }
}

/// Probe read window.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Maximum bytes read from a connection before classification.
    pub max_bytes: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self { max_bytes: 1_024 }
    }
}

/// Startup provisioning of the host monitoring agent.
///
/// Disabled by default; the URL and command are deployment-specific.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProvisioningConfig {
    /// Run the provisioning step before binding the listener.
    pub enabled: bool,

    /// HTTPS source of the monitoring-agent configuration file.
    pub url: String,

    /// Local path the downloaded configuration is written to.
    pub file_path: String,

    /// Executable launched once the configuration file is in place.
    pub command: String,

    /// Arguments passed to the executable.
    pub args: Vec<String>,
}

impl Default for ProvisioningConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: String::new(),
            file_path: "monitor-config.xml".to_string(),
            command: String::new(),
            args: Vec::new(),
        }
    }
}
