//! sea-orm adapter for the fixture lifecycle: a [`fixture_core::Transactor`]
//! over a [`sea_orm::DatabaseConnection`], plus the shared handle a test
//! body uses to write inside the interceptor's transaction.

pub mod transactor;

pub use transactor::{SeaOrmTransactor, TxnHandle};
