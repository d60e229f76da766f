//! Test-lifecycle interceptor for database-backed tests.
//!
//! Around each intercepted test body this crate seeds a dataset, optionally
//! wraps the body in a transaction, watches for leaked connections, asserts
//! an expected post-state dataset, and always runs teardown/export no matter
//! which exit path the test took. Dataset parsing, comparison, and the
//! connection probes live behind the [`processor::DataSetProcessor`] and
//! [`leak::LeakHunter`] trait seams.

pub mod config;
pub mod context;
pub mod error;
pub mod interceptor;
pub mod leak;
pub mod processor;
pub mod txn;

pub use config::{DataSet, DataSetConfig, ExpectedDataSet, HarnessConfig, SeedStrategy};
pub use context::TestContext;
pub use error::FixtureError;
pub use interceptor::Interceptor;
pub use leak::LeakHunter;
pub use processor::DataSetProcessor;
pub use txn::Transactor;
