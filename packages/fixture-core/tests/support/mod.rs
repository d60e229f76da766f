#![allow(dead_code)]

// In-memory doubles for the interceptor's collaborators. Every call lands in
// a shared, ordered log so tests can assert the exact lifecycle sequence.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use fixture_core::{
    DataSetConfig, DataSetProcessor, FixtureError, HarnessConfig, LeakHunter, Transactor,
};

// Logging is auto-installed for this test binary
#[ctor::ctor]
fn init_logging() {
    test_support::logging::init();
}

/// Shared, ordered record of every collaborator call made during a test.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().expect("call log poisoned").push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().expect("call log poisoned").clone()
    }

    pub fn contains(&self, entry: &str) -> bool {
        self.entries().iter().any(|e| e == entry)
    }

    pub fn count_of(&self, entry: &str) -> usize {
        self.entries().iter().filter(|e| *e == entry).count()
    }
}

/// Processor double that records calls and can fail one named step.
pub struct RecordingProcessor {
    log: CallLog,
    fail_on: Mutex<Option<String>>,
}

impl RecordingProcessor {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            fail_on: Mutex::new(None),
        }
    }

    /// Make the named step (`process`, `compare`, `export`, `statements`,
    /// `script`, `clear`, `enable_constraints`) return an error.
    pub fn fail_on(&self, step: &str) {
        *self.fail_on.lock().expect("fail_on poisoned") = Some(step.to_string());
    }

    fn step(&self, name: &str, entry: String) -> Result<(), FixtureError> {
        self.log.push(entry);
        let fail = self.fail_on.lock().expect("fail_on poisoned");
        if fail.as_deref() == Some(name) {
            return Err(FixtureError::dataset(format!("injected failure in {name}")));
        }
        Ok(())
    }
}

#[async_trait]
impl DataSetProcessor for RecordingProcessor {
    async fn process(
        &self,
        config: &DataSetConfig,
        _harness: &HarnessConfig,
    ) -> Result<(), FixtureError> {
        self.step("process", format!("process:{}", config.datasets().join(",")))
    }

    async fn compare_current_dataset_with(
        &self,
        expected: &DataSetConfig,
        ignore_cols: &[String],
    ) -> Result<(), FixtureError> {
        self.step(
            "compare",
            format!(
                "compare:{}:constraints_disabled={}:ignore={}",
                expected.datasets().join(","),
                expected.constraints_disabled(),
                ignore_cols.join(",")
            ),
        )
    }

    async fn export_dataset(&self, test_name: &str) -> Result<(), FixtureError> {
        self.step("export", format!("export:{test_name}"))
    }

    async fn execute_statements(&self, statements: &[String]) -> Result<(), FixtureError> {
        self.step("statements", format!("statements:{}", statements.join(";")))
    }

    async fn execute_script(&self, script: &str) -> Result<(), FixtureError> {
        self.step("script", format!("script:{script}"))
    }

    async fn clear_database(&self, _config: &DataSetConfig) -> Result<(), FixtureError> {
        self.step("clear", "clear".to_string())
    }

    async fn enable_constraints(&self) -> Result<(), FixtureError> {
        self.step("enable_constraints", "enable_constraints".to_string())
    }
}

/// Transactor double tracking active state in memory.
pub struct RecordingTransactor {
    log: CallLog,
    active: bool,
    fail_on_commit: bool,
}

impl RecordingTransactor {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            active: false,
            fail_on_commit: false,
        }
    }

    /// Make `commit` fail while leaving the transaction active, like a real
    /// commit that errored server-side before releasing the transaction.
    pub fn fail_on_commit(mut self) -> Self {
        self.fail_on_commit = true;
        self
    }
}

#[async_trait]
impl Transactor for RecordingTransactor {
    async fn begin(&mut self) -> Result<(), FixtureError> {
        if self.active {
            return Err(FixtureError::transaction("already active"));
        }
        self.active = true;
        self.log.push("begin");
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), FixtureError> {
        if !self.active {
            return Err(FixtureError::transaction("commit without active transaction"));
        }
        self.log.push("commit");
        if self.fail_on_commit {
            return Err(FixtureError::transaction("injected commit failure"));
        }
        self.active = false;
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), FixtureError> {
        if !self.active {
            return Err(FixtureError::transaction(
                "rollback without active transaction",
            ));
        }
        self.active = false;
        self.log.push("rollback");
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

/// Hunter double backed by a shared counter the test body can bump.
pub struct CountingHunter {
    log: CallLog,
    open: Arc<AtomicU32>,
}

impl CountingHunter {
    pub fn new(log: CallLog, open: Arc<AtomicU32>) -> Self {
        Self { log, open }
    }
}

#[async_trait]
impl LeakHunter for CountingHunter {
    async fn open_connections(&self) -> Result<u32, FixtureError> {
        self.log.push("open_connections");
        Ok(self.open.load(Ordering::SeqCst))
    }
}
