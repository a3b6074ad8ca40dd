//! Shared types used across the SDK.

pub mod fixed;

pub use fixed::{native_amount, FixedError, PatchField, I80F48};
