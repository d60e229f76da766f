use async_trait::async_trait;

use crate::error::FixtureError;

/// Probe for the number of currently open database connections.
///
/// The counting itself is backend-specific and lives in the implementation;
/// the interceptor only compares a before/after snapshot pair.
#[async_trait]
pub trait LeakHunter {
    async fn open_connections(&self) -> Result<u32, FixtureError>;
}
