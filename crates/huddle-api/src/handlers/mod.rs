//! Route handlers
//!
//! HTTP request handlers organized by domain.

pub mod devices;
pub mod health;
pub mod keys;
pub mod typing;
