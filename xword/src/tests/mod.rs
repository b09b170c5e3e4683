//! Integration-level tests that exercise more than one module together.
//! Per-module unit tests live alongside each module in its own
//! `#[cfg(test)] mod tests`; this directory is for end-to-end scenarios.

mod scenarios;
