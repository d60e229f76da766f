pub mod dataset;
pub mod harness;

pub use dataset::{DataSet, DataSetConfig, ExpectedDataSet, SeedStrategy};
pub use harness::HarnessConfig;
