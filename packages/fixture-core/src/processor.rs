use async_trait::async_trait;

use crate::config::{DataSetConfig, HarnessConfig};
use crate::error::FixtureError;

/// The dataset engine the interceptor sequences calls into.
///
/// Implementations own parsing, seeding, comparison, and export; the
/// interceptor only decides when each operation runs. `process` is expected
/// to honor the whole setup side of the config: clean-before, the
/// before-scripts and before-statements, and the seed strategy.
#[async_trait]
pub trait DataSetProcessor {
    /// Prepare the database fixture for the test about to run.
    async fn process(
        &self,
        config: &DataSetConfig,
        harness: &HarnessConfig,
    ) -> Result<(), FixtureError>;

    /// Compare the current database state against the expected dataset,
    /// skipping the given columns.
    async fn compare_current_dataset_with(
        &self,
        expected: &DataSetConfig,
        ignore_cols: &[String],
    ) -> Result<(), FixtureError>;

    /// Export the current database state for the named test, if export is
    /// configured. Invoked unconditionally during teardown.
    async fn export_dataset(&self, test_name: &str) -> Result<(), FixtureError>;

    async fn execute_statements(&self, statements: &[String]) -> Result<(), FixtureError>;

    async fn execute_script(&self, script: &str) -> Result<(), FixtureError>;

    /// Clear the tables touched by the config.
    async fn clear_database(&self, config: &DataSetConfig) -> Result<(), FixtureError>;

    /// Re-enable referential constraints. Runs at the end of every teardown.
    async fn enable_constraints(&self) -> Result<(), FixtureError>;
}
