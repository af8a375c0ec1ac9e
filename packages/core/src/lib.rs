// Library root: exposes internal modules for integration tests in `tests/`.
// Production entry point remains `src/main.rs`.

pub mod api;
pub mod error;
pub mod metrics;
pub mod relay;
pub mod scheduler;
pub mod services;

// Startup plumbing used by the binary.
pub mod cli;
pub mod config;
pub mod logging;
