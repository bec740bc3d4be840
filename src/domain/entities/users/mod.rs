//! Users Entity Module

pub mod identity;

pub use identity::{AccountRole, Identity};
