//! Dataset declarations and the value object handed to the processor.

/// How the processor seeds the declared dataset into the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedStrategy {
    /// Clear the touched tables, then insert (default behavior).
    #[default]
    CleanInsert,
    Insert,
    Refresh,
    Update,
    TruncateInsert,
}

/// Per-test (or per-suite) fixture declaration.
///
/// This is the declarative side: what a test states about the fixture it
/// needs. The interceptor resolves the effective declaration
/// (method level first, suite level as fallback) and builds a
/// [`DataSetConfig`] from it before calling the processor.
#[derive(Debug, Clone)]
pub struct DataSet {
    datasets: Vec<String>,
    strategy: SeedStrategy,
    use_sequence_filtering: bool,
    table_ordering: Vec<String>,
    disable_constraints: bool,
    clean_before: bool,
    clean_after: bool,
    transactional: bool,
    execute_scripts_before: Vec<String>,
    execute_scripts_after: Vec<String>,
    execute_statements_before: Vec<String>,
    execute_statements_after: Vec<String>,
}

impl DataSet {
    pub fn new<I, S>(datasets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            datasets: datasets.into_iter().map(Into::into).collect(),
            strategy: SeedStrategy::default(),
            use_sequence_filtering: true,
            table_ordering: Vec::new(),
            disable_constraints: false,
            clean_before: false,
            clean_after: false,
            transactional: false,
            execute_scripts_before: Vec::new(),
            execute_scripts_after: Vec::new(),
            execute_statements_before: Vec::new(),
            execute_statements_after: Vec::new(),
        }
    }

    pub fn strategy(mut self, strategy: SeedStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn use_sequence_filtering(mut self, enabled: bool) -> Self {
        self.use_sequence_filtering = enabled;
        self
    }

    pub fn table_ordering<I, S>(mut self, tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.table_ordering = tables.into_iter().map(Into::into).collect();
        self
    }

    pub fn disable_constraints(mut self, disable: bool) -> Self {
        self.disable_constraints = disable;
        self
    }

    pub fn clean_before(mut self, clean: bool) -> Self {
        self.clean_before = clean;
        self
    }

    pub fn clean_after(mut self, clean: bool) -> Self {
        self.clean_after = clean;
        self
    }

    pub fn transactional(mut self, transactional: bool) -> Self {
        self.transactional = transactional;
        self
    }

    pub fn execute_scripts_before<I, S>(mut self, scripts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.execute_scripts_before = scripts.into_iter().map(Into::into).collect();
        self
    }

    pub fn execute_scripts_after<I, S>(mut self, scripts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.execute_scripts_after = scripts.into_iter().map(Into::into).collect();
        self
    }

    pub fn execute_statements_before<I, S>(mut self, statements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.execute_statements_before = statements.into_iter().map(Into::into).collect();
        self
    }

    pub fn execute_statements_after<I, S>(mut self, statements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.execute_statements_after = statements.into_iter().map(Into::into).collect();
        self
    }
}

/// The value object the interceptor hands to the processor.
///
/// Built from a resolved [`DataSet`] declaration; blank script and statement
/// entries are dropped at construction so downstream code never has to guard
/// against them.
#[derive(Debug, Clone)]
pub struct DataSetConfig {
    datasets: Vec<String>,
    strategy: SeedStrategy,
    use_sequence_filtering: bool,
    table_ordering: Vec<String>,
    disable_constraints: bool,
    clean_before: bool,
    clean_after: bool,
    transactional: bool,
    scripts_before: Vec<String>,
    scripts_after: Vec<String>,
    statements_before: Vec<String>,
    statements_after: Vec<String>,
}

fn drop_blank(entries: &[String]) -> Vec<String> {
    entries
        .iter()
        .filter(|e| !e.trim().is_empty())
        .cloned()
        .collect()
}

impl DataSetConfig {
    pub fn new<I, S>(datasets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            datasets: datasets.into_iter().map(Into::into).collect(),
            strategy: SeedStrategy::default(),
            use_sequence_filtering: true,
            table_ordering: Vec::new(),
            disable_constraints: false,
            clean_before: false,
            clean_after: false,
            transactional: false,
            scripts_before: Vec::new(),
            scripts_after: Vec::new(),
            statements_before: Vec::new(),
            statements_after: Vec::new(),
        }
    }

    pub fn disable_constraints(mut self, disable: bool) -> Self {
        self.disable_constraints = disable;
        self
    }

    pub fn datasets(&self) -> &[String] {
        &self.datasets
    }

    pub fn seed_strategy(&self) -> SeedStrategy {
        self.strategy
    }

    pub fn uses_sequence_filtering(&self) -> bool {
        self.use_sequence_filtering
    }

    pub fn table_ordering(&self) -> &[String] {
        &self.table_ordering
    }

    pub fn constraints_disabled(&self) -> bool {
        self.disable_constraints
    }

    pub fn is_clean_before(&self) -> bool {
        self.clean_before
    }

    pub fn is_clean_after(&self) -> bool {
        self.clean_after
    }

    pub fn is_transactional(&self) -> bool {
        self.transactional
    }

    pub fn scripts_before(&self) -> &[String] {
        &self.scripts_before
    }

    pub fn scripts_after(&self) -> &[String] {
        &self.scripts_after
    }

    pub fn statements_before(&self) -> &[String] {
        &self.statements_before
    }

    pub fn statements_after(&self) -> &[String] {
        &self.statements_after
    }
}

impl From<&DataSet> for DataSetConfig {
    fn from(declaration: &DataSet) -> Self {
        Self {
            datasets: declaration.datasets.clone(),
            strategy: declaration.strategy,
            use_sequence_filtering: declaration.use_sequence_filtering,
            table_ordering: declaration.table_ordering.clone(),
            disable_constraints: declaration.disable_constraints,
            clean_before: declaration.clean_before,
            clean_after: declaration.clean_after,
            transactional: declaration.transactional,
            scripts_before: drop_blank(&declaration.execute_scripts_before),
            scripts_after: drop_blank(&declaration.execute_scripts_after),
            statements_before: drop_blank(&declaration.execute_statements_before),
            statements_after: drop_blank(&declaration.execute_statements_after),
        }
    }
}

/// Post-state assertion: datasets the database must match after the body ran.
#[derive(Debug, Clone)]
pub struct ExpectedDataSet {
    datasets: Vec<String>,
    ignore_cols: Vec<String>,
}

impl ExpectedDataSet {
    pub fn new<I, S>(datasets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            datasets: datasets.into_iter().map(Into::into).collect(),
            ignore_cols: Vec::new(),
        }
    }

    pub fn ignore_cols<I, S>(mut self, cols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_cols = cols.into_iter().map(Into::into).collect();
        self
    }

    pub fn datasets(&self) -> &[String] {
        &self.datasets
    }

    pub fn ignored_cols(&self) -> &[String] {
        &self.ignore_cols
    }
}
