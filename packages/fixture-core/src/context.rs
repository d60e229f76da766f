use crate::config::{DataSet, ExpectedDataSet, HarnessConfig};

/// Everything the interceptor knows about the test it wraps.
///
/// Mirrors what the test site declares: an optional method-level dataset, an
/// optional suite-level fallback, an optional expected post-state, and the
/// harness settings.
#[derive(Debug, Clone)]
pub struct TestContext {
    test_name: String,
    dataset: Option<DataSet>,
    suite_dataset: Option<DataSet>,
    expected: Option<ExpectedDataSet>,
    harness: HarnessConfig,
}

impl TestContext {
    pub fn new(test_name: impl Into<String>) -> Self {
        Self {
            test_name: test_name.into(),
            dataset: None,
            suite_dataset: None,
            expected: None,
            harness: HarnessConfig::default(),
        }
    }

    pub fn with_dataset(mut self, dataset: DataSet) -> Self {
        self.dataset = Some(dataset);
        self
    }

    pub fn with_suite_dataset(mut self, dataset: DataSet) -> Self {
        self.suite_dataset = Some(dataset);
        self
    }

    pub fn with_expected(mut self, expected: ExpectedDataSet) -> Self {
        self.expected = Some(expected);
        self
    }

    pub fn with_harness(mut self, harness: HarnessConfig) -> Self {
        self.harness = harness;
        self
    }

    pub fn test_name(&self) -> &str {
        &self.test_name
    }

    pub fn expected(&self) -> Option<&ExpectedDataSet> {
        self.expected.as_ref()
    }

    pub fn harness(&self) -> &HarnessConfig {
        &self.harness
    }

    /// The effective dataset declaration: method level wins, suite level is
    /// the fallback.
    pub fn resolve_dataset(&self) -> Option<&DataSet> {
        self.dataset.as_ref().or(self.suite_dataset.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DataSetConfig;

    #[test]
    fn method_level_declaration_wins() {
        let ctx = TestContext::new("t")
            .with_suite_dataset(DataSet::new(["suite.yml"]))
            .with_dataset(DataSet::new(["method.yml"]));
        let config = DataSetConfig::from(ctx.resolve_dataset().unwrap());
        assert_eq!(config.datasets(), ["method.yml".to_string()]);
    }

    #[test]
    fn suite_level_declaration_is_the_fallback() {
        let ctx = TestContext::new("t").with_suite_dataset(DataSet::new(["suite.yml"]));
        let config = DataSetConfig::from(ctx.resolve_dataset().unwrap());
        assert_eq!(config.datasets(), ["suite.yml".to_string()]);
    }

    #[test]
    fn no_declaration_resolves_to_none() {
        let ctx = TestContext::new("t");
        assert!(ctx.resolve_dataset().is_none());
    }
}
