//! Corsite is a multi-tenant platform for hosting company websites.
//!
//! This crate implements the settings subsystem and the site-level feature
//! modules that plug into it:
//!
//! - Settings registry with per-definition scope sets
//!   (application/tenant/user), client visibility, and permission levels
//! - Override resolution service (user -> tenant -> application -> default)
//!   with LRU caching
//! - Supplier interface for feature modules to declare their settings
//! - HTTP API for reading and changing settings, including the
//!   client-visible settings transport
//! - Site module: UI theme and contact/career mail routing
//! - Email module: settings-driven SMTP dispatch

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod core;
pub mod email;
pub mod prelude;
pub mod routes;
pub mod settings;
pub mod site;

pub use crate::core::app::{App, AppBuilder, AppState};
pub use crate::core::extract::{Auth, OptionalAuth};
pub use corsite_types::settings_adapter::SettingsAdapter;

// vim: ts=4
