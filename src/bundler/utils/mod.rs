//! Shared helpers for the deploy pipeline.

pub mod fs;
