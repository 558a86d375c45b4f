//! Pre-store validation of entities the client sends to the server.
//!
//! The store never validates; actions run these checks before emitting.


use std::collections::HashSet;

use crate::Monitor;
use crate::Result;
use crate::Tag;
use crate::ValidationError;

pub const MIN_MONITOR_INTERVAL_SECS: i64 = 20;
pub const MAX_MONITOR_INTERVAL_SECS: i64 = 86_400;

const MONITOR_TYPES: &[&str] = &[
    "group",
    "http",
    "port",
    "ping",
    "keyword",
    "json-query",
    "grpc-keyword",
    "dns",
    "docker",
    "real-browser",
    "push",
    "steam",
    "gamedig",
    "mqtt",
    "kafka-producer",
    "sqlserver",
    "postgres",
    "mysql",
    "mongodb",
    "radius",
    "redis",
    "tailscale-ping",
];

const URL_TYPES: &[&str] = &["http", "keyword", "json-query", "real-browser"];
const KEYWORD_TYPES: &[&str] = &["keyword", "grpc-keyword"];
const HOST_TYPES: &[&str] = &["port", "ping", "dns", "steam", "gamedig", "mqtt", "radius", "tailscale-ping"];

/// Stateless rule set, built once at wiring time and passed to the actions
/// that need it.
#[derive(Debug, Clone)]
pub struct Validator {
    monitor_types: HashSet<&'static str>,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    pub fn new() -> Self {
        Self {
            monitor_types: MONITOR_TYPES.iter().copied().collect(),
        }
    }

    pub fn is_known_monitor_type(
        &self,
        monitor_type: &str,
    ) -> bool {
        self.monitor_types.contains(monitor_type)
    }

    pub fn validate_tag(
        &self,
        tag: &Tag,
    ) -> Result<()> {
        if tag.id < 0 {
            return Err(ValidationError::new("id", format!("must not be negative, got {}", tag.id)).into());
        }
        if tag.name.trim().is_empty() {
            return Err(ValidationError::new("name", "must not be empty").into());
        }
        if !is_hex_color(&tag.color) {
            return Err(ValidationError::new("color", format!("'{}' is not a hex color", tag.color)).into());
        }
        Ok(())
    }

    pub fn validate_monitor(
        &self,
        monitor: &Monitor,
    ) -> Result<()> {
        let kind = monitor.monitor_type.as_str();

        if monitor.name.trim().is_empty() {
            return Err(ValidationError::new("name", "must not be empty").into());
        }
        if !self.is_known_monitor_type(kind) {
            return Err(ValidationError::new("type", format!("unknown monitor type '{kind}'")).into());
        }
        if !(MIN_MONITOR_INTERVAL_SECS..=MAX_MONITOR_INTERVAL_SECS).contains(&monitor.interval) {
            return Err(ValidationError::new(
                "interval",
                format!(
                    "must be within [{MIN_MONITOR_INTERVAL_SECS}, {MAX_MONITOR_INTERVAL_SECS}], got {}",
                    monitor.interval
                ),
            )
            .into());
        }
        if monitor.maxretries < 0 {
            return Err(ValidationError::new("maxretries", "must not be negative").into());
        }
        if let Some(port) = monitor.port {
            if !(0..=65535).contains(&port) {
                return Err(ValidationError::new("port", format!("{port} is out of range")).into());
            }
        }

        if URL_TYPES.contains(&kind) {
            match monitor.url.as_deref().map(str::trim) {
                Some(url) if url.starts_with("http://") || url.starts_with("https://") => {}
                Some("") | None => {
                    return Err(ValidationError::new("url", format!("required for {kind} monitors")).into())
                }
                Some(url) => {
                    return Err(ValidationError::new("url", format!("'{url}' is not an http(s) URL")).into())
                }
            }
        }
        if KEYWORD_TYPES.contains(&kind) && is_blank(monitor.keyword.as_deref()) {
            return Err(ValidationError::new("keyword", format!("required for {kind} monitors")).into());
        }
        if HOST_TYPES.contains(&kind) && is_blank(monitor.hostname.as_deref()) {
            return Err(ValidationError::new("hostname", format!("required for {kind} monitors")).into());
        }
        Ok(())
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map(str::trim).map_or(true, str::is_empty)
}

/// `#rgb` or `#rrggbb`.
fn is_hex_color(color: &str) -> bool {
    match color.strip_prefix('#') {
        Some(digits) => (digits.len() == 3 || digits.len() == 6) && digits.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}
