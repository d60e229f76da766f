use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Dataset processing failed: {detail}")]
    DataSet { detail: String },
    #[error("Expected dataset mismatch: {detail}")]
    Comparison { detail: String },
    #[error("`{test}` leaked {leaked} database connection(s)")]
    ConnectionLeak { test: String, leaked: u32 },
    #[error("Transaction error: {detail}")]
    Transaction { detail: String },
    #[error("Script execution failed: {detail}")]
    Script { detail: String },
    #[error("Statement execution failed: {detail}")]
    Statement { detail: String },
    #[error("Dataset export failed: {detail}")]
    Export { detail: String },
    #[error("Test body failed: {detail}")]
    Body { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl FixtureError {
    pub fn dataset(detail: impl Into<String>) -> Self {
        Self::DataSet {
            detail: detail.into(),
        }
    }

    pub fn comparison(detail: impl Into<String>) -> Self {
        Self::Comparison {
            detail: detail.into(),
        }
    }

    pub fn connection_leak(test: impl Into<String>, leaked: u32) -> Self {
        Self::ConnectionLeak {
            test: test.into(),
            leaked,
        }
    }

    pub fn transaction(detail: impl Into<String>) -> Self {
        Self::Transaction {
            detail: detail.into(),
        }
    }

    pub fn script(detail: impl Into<String>) -> Self {
        Self::Script {
            detail: detail.into(),
        }
    }

    pub fn statement(detail: impl Into<String>) -> Self {
        Self::Statement {
            detail: detail.into(),
        }
    }

    pub fn export(detail: impl Into<String>) -> Self {
        Self::Export {
            detail: detail.into(),
        }
    }

    pub fn body(detail: impl Into<String>) -> Self {
        Self::Body {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }
}
