//! changeset-html command-line library
//!
//! This module exports the configuration and command execution of the
//! `changeset-html` binary for use in integration tests.

pub mod config;
pub mod run;
