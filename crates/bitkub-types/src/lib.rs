//! Shared types for the Bitkub REST API
//!
//! This crate provides the core type definitions used across the Bitkub SDK.
//! It has minimal dependencies and can be used independently.
//!
//! # Key Types
//!
//! - [`Symbol`] - Trading pair symbols (e.g., "BTC_THB")
//! - [`Method`], [`OrderSide`], [`OrderType`], [`OrderStatus`] - Request and order enums
//! - [`BitkubErrorCode`] - Static mapping of Bitkub's numeric error codes
//! - [`validation`] - Client-side checks applied before a request is sent

pub mod enums;
pub mod error;
pub mod error_codes;
pub mod symbol;
pub mod validation;

// Re-export commonly used types
pub use enums::*;
pub use error::*;
pub use error_codes::*;
pub use symbol::*;

// Re-export rust_decimal for users
pub use rust_decimal::Decimal;
