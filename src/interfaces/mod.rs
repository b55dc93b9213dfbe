//! Outer surfaces driving the lifecycle manager.

pub mod csv;
