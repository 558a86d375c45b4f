// -
// Heartbeat retention

/// Maximum number of heartbeats kept per monitor.
pub const DEFAULT_HEARTBEAT_CAPACITY: usize = 150;
/// Maximum number of important (status transition) heartbeats kept per monitor.
pub const DEFAULT_IMPORTANT_HEARTBEAT_CAPACITY: usize = 25;

// -
// Timeouts

/// Default acknowledgement timeout for emitted requests
pub const DEFAULT_EMIT_TIMEOUT_MS: u64 = 5000;
/// Default deadline for awaiting a push event
pub const DEFAULT_AWAIT_TIMEOUT_MS: u64 = 5000;
/// Interval at which `await_event` polls an occurrence predicate
pub const DEFAULT_AWAIT_POLL_INTERVAL_MS: u64 = 100;

// -
// Connection

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 3001;
pub(crate) const SOCKET_IO_PATH: &str = "/socket.io/?EIO=4&transport=websocket";

/// Environment variable prefix for configuration overrides
pub(crate) const ENV_PREFIX: &str = "UPTIME_KUMA";

// -
// Not-found kinds

pub(crate) const KIND_MONITOR: &str = "monitor";
pub(crate) const KIND_TAG: &str = "tag";
pub(crate) const KIND_HEARTBEATS: &str = "heartbeats";
pub(crate) const KIND_IMPORTANT_HEARTBEATS: &str = "important heartbeats";
