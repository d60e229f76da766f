use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};
use tracing::debug;

use fixture_core::{FixtureError, Transactor};

/// Cloneable view of the transactor's live transaction.
///
/// A test body captures a handle before the interceptor runs and reads the
/// current transaction through it while the lifecycle is in flight. The Arc
/// clone must be dropped before the interceptor commits or rolls back.
#[derive(Clone, Default)]
pub struct TxnHandle {
    slot: Arc<Mutex<Option<Arc<DatabaseTransaction>>>>,
}

impl TxnHandle {
    /// The live transaction, if one is open.
    pub fn current(&self) -> Option<Arc<DatabaseTransaction>> {
        self.slot.lock().expect("txn slot poisoned").clone()
    }
}

/// [`Transactor`] backed by a sea-orm connection, holding at most one live
/// transaction and publishing it through a [`TxnHandle`].
pub struct SeaOrmTransactor {
    conn: DatabaseConnection,
    handle: TxnHandle,
}

impl SeaOrmTransactor {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self {
            conn,
            handle: TxnHandle::default(),
        }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// A handle the test body can capture to run its writes inside the
    /// interceptor's transaction.
    pub fn handle(&self) -> TxnHandle {
        self.handle.clone()
    }

    /// Pop the live transaction and reclaim exclusive ownership of it.
    /// If a body-side clone is still alive the transaction is put back and
    /// the operation fails.
    fn take_exclusive(&mut self, op: &str) -> Result<DatabaseTransaction, FixtureError> {
        let mut slot = self.handle.slot.lock().expect("txn slot poisoned");
        let txn = slot.take().ok_or_else(|| {
            FixtureError::transaction(format!("{op} called without an active transaction"))
        })?;
        Arc::try_unwrap(txn).map_err(|still_shared| {
            *slot = Some(still_shared);
            FixtureError::transaction(format!("cannot {op}: transaction handle is still shared"))
        })
    }
}

fn txn_err(err: DbErr) -> FixtureError {
    FixtureError::transaction(err.to_string())
}

#[async_trait]
impl Transactor for SeaOrmTransactor {
    async fn begin(&mut self) -> Result<(), FixtureError> {
        {
            let slot = self.handle.slot.lock().expect("txn slot poisoned");
            if slot.is_some() {
                return Err(FixtureError::transaction(
                    "begin called while a transaction is already active",
                ));
            }
        }

        let txn = self.conn.begin().await.map_err(txn_err)?;
        debug!("transaction opened");
        *self.handle.slot.lock().expect("txn slot poisoned") = Some(Arc::new(txn));
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), FixtureError> {
        let txn = self.take_exclusive("commit")?;
        txn.commit().await.map_err(txn_err)?;
        debug!("transaction committed");
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), FixtureError> {
        let txn = self.take_exclusive("rollback")?;
        txn.rollback().await.map_err(txn_err)?;
        debug!("transaction rolled back");
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.handle
            .slot
            .lock()
            .expect("txn slot poisoned")
            .is_some()
    }
}
