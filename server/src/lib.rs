pub mod api;

use std::sync::Arc;

use labelscan_core::GatewayClient;

/// Application state shared across all handlers: the one Gateway client,
/// constructed at startup and reused read-only.
pub type AppState = Arc<dyn GatewayClient>;
