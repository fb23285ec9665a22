//! Settings subsystem with scoped override resolution and client visibility
//!
//! # Architecture
//!
//! - **Types** (`types.rs`): Core type definitions and registry
//! - **Provider** (`provider.rs`): Supplier interface for feature modules
//! - **Service** (`service.rs`): SettingsService with caching and validation
//! - **Handler** (`handler.rs`): HTTP API endpoints
//!
//! # Scope sets
//!
//! Every definition carries a SET of scopes drawn from
//! {application, tenant, user}. The set determines at which levels an
//! override may be stored; resolution walks the levels from most specific
//! (user) to least specific (application) and falls back to the default.
//!
//! Independently of scope, each definition has:
//! - **Visibility**: whether the resolved value may be sent to client code
//! - **Permission**: who may change the stored value

pub mod handler;
pub mod provider;
pub mod service;
pub mod types;

pub use provider::{SettingDefinitionProvider, SettingProviderContext};
pub use types::{
	ClientVisibility, FrozenSettingsRegistry, PermissionLevel, ScopeLevel, Setting,
	SettingDefinition, SettingDefinitionBuilder, SettingScopes, SettingValue, SettingsRegistry,
};

// vim: ts=4
