//! Flyercraft Core - Shared types library.
//!
//! This crate provides the domain types used across the Flyercraft
//! components:
//! - `client` - Session, credential and resource-sync machinery
//! - `cli` - Command-line client
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, email, auth token, user profile and the
//!   product/flyer entities with their draft (form) counterparts

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
