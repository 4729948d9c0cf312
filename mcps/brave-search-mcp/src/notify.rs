//! Notifications sent back to the MCP client
//!
//! Tool calls served over a transport carry a [`Peer`] and forward log lines
//! (`notifications/message`) and resource list changes to the client.
//! In-process calls through `EmbeddableMcp` have no peer and use
//! [`SilentNotifier`].

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::{LoggingLevel, LoggingMessageNotificationParam};
use rmcp::{Peer, RoleServer};
use serde_json::Value;

const LOGGER: &str = "brave-search-mcp";

#[async_trait]
pub trait ClientNotifier: Send + Sync {
    /// Send a log line to the client, if its level passes the client's filter
    async fn log(&self, level: LoggingLevel, message: String);

    /// Tell the client the resource list changed
    async fn resource_list_changed(&self);
}

/// Notifier for calls without a connected client
pub struct SilentNotifier;

#[async_trait]
impl ClientNotifier for SilentNotifier {
    async fn log(&self, _level: LoggingLevel, _message: String) {}

    async fn resource_list_changed(&self) {}
}

fn severity(level: &LoggingLevel) -> u8 {
    match level {
        LoggingLevel::Debug => 0,
        LoggingLevel::Info => 1,
        LoggingLevel::Notice => 2,
        LoggingLevel::Warning => 3,
        LoggingLevel::Error => 4,
        LoggingLevel::Critical => 5,
        LoggingLevel::Alert => 6,
        LoggingLevel::Emergency => 7,
    }
}

/// Minimum level a client asked for with `logging/setLevel`, shared by clones
#[derive(Clone)]
pub struct LogLevelFilter(Arc<AtomicU8>);

impl Default for LogLevelFilter {
    fn default() -> Self {
        Self(Arc::new(AtomicU8::new(severity(&LoggingLevel::Info))))
    }
}

impl LogLevelFilter {
    pub fn set(&self, level: &LoggingLevel) {
        self.0.store(severity(level), Ordering::Relaxed);
    }

    pub fn allows(&self, level: &LoggingLevel) -> bool {
        severity(level) >= self.0.load(Ordering::Relaxed)
    }
}

/// Notifier backed by the peer of the current request
pub struct PeerNotifier {
    peer: Peer<RoleServer>,
    filter: LogLevelFilter,
}

impl PeerNotifier {
    pub fn new(peer: Peer<RoleServer>, filter: LogLevelFilter) -> Self {
        Self { peer, filter }
    }
}

#[async_trait]
impl ClientNotifier for PeerNotifier {
    async fn log(&self, level: LoggingLevel, message: String) {
        if !self.filter.allows(&level) {
            return;
        }

        let param = LoggingMessageNotificationParam {
            level,
            logger: Some(LOGGER.to_string()),
            data: Value::String(message),
        };
        if let Err(e) = self.peer.notify_logging_message(param).await {
            tracing::debug!(error = %e, "Failed to forward log message to client");
        }
    }

    async fn resource_list_changed(&self) {
        if let Err(e) = self.peer.notify_resource_list_changed().await {
            tracing::debug!(error = %e, "Failed to send resource list change");
        }
    }
}
