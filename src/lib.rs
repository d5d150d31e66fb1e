pub mod core;
pub mod ingest;
pub mod logging;
pub mod optim;
pub mod summary;
pub mod synthetic;
pub mod tasks;
pub mod ui;
pub mod utils;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;
