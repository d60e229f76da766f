//! Sequences fixture setup, the test body, post-state assertions, and
//! teardown around each intercepted test invocation.

use std::future::Future;

use tracing::{debug, warn};

use crate::config::DataSetConfig;
use crate::context::TestContext;
use crate::error::FixtureError;
use crate::leak::LeakHunter;
use crate::processor::DataSetProcessor;
use crate::txn::Transactor;

/// Wraps a test body with the full fixture lifecycle.
///
/// With a dataset declared the order is: seed, begin transaction (if
/// requested), snapshot open connections (if leak hunting), run the body,
/// commit, compare the expected dataset, then teardown. Teardown runs
/// exactly once on every exit path: rollback-if-active, leak re-check,
/// export, after-statements, after-scripts, clean-after, re-enable
/// constraints.
///
/// Without a dataset the body still runs under the interceptor so the
/// expected-dataset assertion and the export happen.
pub struct Interceptor<P, T> {
    processor: P,
    transactor: T,
    leak_hunter: Option<Box<dyn LeakHunter + Send + Sync>>,
}

impl<P, T> Interceptor<P, T>
where
    P: DataSetProcessor,
    T: Transactor,
{
    pub fn new(processor: P, transactor: T) -> Self {
        Self {
            processor,
            transactor,
            leak_hunter: None,
        }
    }

    pub fn with_leak_hunter(mut self, hunter: impl LeakHunter + Send + Sync + 'static) -> Self {
        self.leak_hunter = Some(Box::new(hunter));
        self
    }

    /// Run `body` inside the fixture lifecycle described by `ctx`.
    ///
    /// A setup failure (seeding, opening the transaction) propagates
    /// immediately with no teardown, matching a fixture that never came up.
    /// Once the protected region starts, teardown always runs; a
    /// protected-region error takes precedence over teardown errors, and a
    /// teardown error (a detected leak included) fails an otherwise passing
    /// test.
    pub async fn around<F, Fut, R>(
        &mut self,
        ctx: &TestContext,
        body: F,
    ) -> Result<R, FixtureError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<R, FixtureError>>,
    {
        let Some(declaration) = ctx.resolve_dataset().cloned() else {
            return self.around_without_dataset(ctx, body).await;
        };

        let config = DataSetConfig::from(&declaration);
        debug!(
            test = ctx.test_name(),
            datasets = ?config.datasets(),
            transactional = config.is_transactional(),
            "preparing dataset"
        );
        self.processor.process(&config, ctx.harness()).await?;

        let transactional = config.is_transactional();
        if transactional {
            self.transactor.begin().await?;
        }

        let mut open_before: Option<u32> = None;
        let outcome = self
            .run_protected(ctx, transactional, &mut open_before, body)
            .await;
        let teardown = self.teardown(ctx, &config, transactional, open_before).await;

        match outcome {
            Ok(value) => teardown.map(|_| value),
            Err(err) => {
                if let Err(teardown_err) = teardown {
                    warn!(
                        test = ctx.test_name(),
                        error = %teardown_err,
                        "teardown failed after test error"
                    );
                }
                Err(err)
            }
        }
    }

    /// No dataset declared: run the body, assert the expected dataset if one
    /// is declared, and always export afterwards.
    async fn around_without_dataset<F, Fut, R>(
        &mut self,
        ctx: &TestContext,
        body: F,
    ) -> Result<R, FixtureError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<R, FixtureError>>,
    {
        let outcome = match body().await {
            Ok(value) => match ctx.expected() {
                Some(expected) => self
                    .compare_expected(expected.datasets(), expected.ignored_cols())
                    .await
                    .map(|_| value),
                None => Ok(value),
            },
            Err(err) => Err(err),
        };

        let export = self.processor.export_dataset(ctx.test_name()).await;
        match outcome {
            Ok(value) => export.map(|_| value),
            Err(err) => {
                if let Err(export_err) = export {
                    warn!(
                        test = ctx.test_name(),
                        error = %export_err,
                        "dataset export failed after test error"
                    );
                }
                Err(err)
            }
        }
    }

    /// Everything between setup and teardown: leak snapshot, body, commit,
    /// expected-dataset assertion.
    async fn run_protected<F, Fut, R>(
        &mut self,
        ctx: &TestContext,
        transactional: bool,
        open_before: &mut Option<u32>,
        body: F,
    ) -> Result<R, FixtureError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<R, FixtureError>>,
    {
        if ctx.harness().is_leak_hunter() {
            match &self.leak_hunter {
                Some(hunter) => *open_before = Some(hunter.open_connections().await?),
                None => warn!(
                    test = ctx.test_name(),
                    "leak hunting enabled but no hunter installed; skipping"
                ),
            }
        }

        let value = body().await?;

        if transactional {
            self.transactor.commit().await?;
        }

        if let Some(expected) = ctx.expected() {
            self.compare_expected(expected.datasets(), expected.ignored_cols())
                .await?;
        }

        Ok(value)
    }

    async fn compare_expected(
        &self,
        datasets: &[String],
        ignore_cols: &[String],
    ) -> Result<(), FixtureError> {
        // Constraints are always disabled for the comparison read.
        let compare = DataSetConfig::new(datasets.iter().cloned()).disable_constraints(true);
        self.processor
            .compare_current_dataset_with(&compare, ignore_cols)
            .await
    }

    /// The teardown sequence. Best-effort: the first failure is kept and the
    /// remaining steps still run, so a leaked connection cannot skip the
    /// export or leave constraints disabled.
    async fn teardown(
        &mut self,
        ctx: &TestContext,
        config: &DataSetConfig,
        transactional: bool,
        open_before: Option<u32>,
    ) -> Result<(), FixtureError> {
        let mut first_err: Option<FixtureError> = None;

        if transactional && self.transactor.is_active() {
            if let Err(err) = self.transactor.rollback().await {
                note(&mut first_err, err);
            }
        }

        if let (Some(before), Some(hunter)) = (open_before, self.leak_hunter.as_ref()) {
            match hunter.open_connections().await {
                Ok(after) if after > before => {
                    note(
                        &mut first_err,
                        FixtureError::connection_leak(ctx.test_name(), after - before),
                    );
                }
                Ok(_) => {}
                Err(err) => note(&mut first_err, err),
            }
        }

        if let Err(err) = self.processor.export_dataset(ctx.test_name()).await {
            note(&mut first_err, err);
        }

        if !config.statements_after().is_empty() {
            if let Err(err) = self
                .processor
                .execute_statements(config.statements_after())
                .await
            {
                note(&mut first_err, err);
            }
        }

        for script in config.scripts_after() {
            if let Err(err) = self.processor.execute_script(script).await {
                note(&mut first_err, err);
            }
        }

        if config.is_clean_after() {
            if let Err(err) = self.processor.clear_database(config).await {
                note(&mut first_err, err);
            }
        }

        if let Err(err) = self.processor.enable_constraints().await {
            note(&mut first_err, err);
        }

        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Keep the first teardown failure; later ones are only logged.
fn note(slot: &mut Option<FixtureError>, err: FixtureError) {
    if slot.is_none() {
        *slot = Some(err);
    } else {
        warn!(error = %err, "additional teardown failure");
    }
}
