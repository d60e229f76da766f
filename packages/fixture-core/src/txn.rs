use async_trait::async_trait;

use crate::error::FixtureError;

/// The transactional resource wrapped around the intercepted call.
///
/// At most one transaction is live at a time. `begin` while active and
/// `commit`/`rollback` while inactive are errors.
#[async_trait]
pub trait Transactor {
    async fn begin(&mut self) -> Result<(), FixtureError>;

    async fn commit(&mut self) -> Result<(), FixtureError>;

    async fn rollback(&mut self) -> Result<(), FixtureError>;

    fn is_active(&self) -> bool;
}
