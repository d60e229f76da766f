/// Per-test harness settings resolved alongside the dataset declaration.
#[derive(Debug, Clone, Default)]
pub struct HarnessConfig {
    leak_hunter: bool,
}

impl HarnessConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot open connections before the body and fail the test if the
    /// count grew by the time teardown runs.
    pub fn leak_hunter(mut self, enabled: bool) -> Self {
        self.leak_hunter = enabled;
        self
    }

    pub fn is_leak_hunter(&self) -> bool {
        self.leak_hunter
    }
}
