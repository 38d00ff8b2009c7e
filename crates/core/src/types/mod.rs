//! Core types for Flyercraft.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod flyer;
pub mod id;
pub mod product;
pub mod token;
pub mod user;

pub use email::{Email, EmailError};
pub use flyer::{
    Flyer, FlyerColors, FlyerDraft, FlyerFonts, FlyerLayout, FlyerProductRef, FlyerStatus,
    FlyerTemplate,
};
pub use id::*;
pub use product::{Product, ProductDraft};
pub use token::AuthToken;
pub use user::UserProfile;
