//! Common utilities and types used throughout the predictor.
//!
//! This module provides the building blocks shared by the table, the engine and
//! the configuration layer. It includes:
//! 1. **Address Types:** A strong type for physical addresses with block and page helpers.
//! 2. **Constants:** Page geometry and the reserved sentinel values.
//! 3. **Error Handling:** The configuration error type.

/// Address type definitions.
pub mod addr;

/// Common constants used throughout the predictor.
pub mod constants;

/// Error types.
pub mod error;

pub use addr::PhysAddr;
pub use constants::{EMPTY_SLOT, NO_PREVIOUS_MISS, PAGE_SIZE};
pub use error::ConfigError;
