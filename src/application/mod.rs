//! Application layer containing the payment lifecycle orchestration.
//!
//! `PaymentLifecycle` validates input, enforces the status edge table and
//! coordinates the repository and gateway ports for each operation.

pub mod lifecycle;
