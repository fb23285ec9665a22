//! Supplier interface for setting definitions
//!
//! Feature modules declare their settings by implementing
//! `SettingDefinitionProvider` and registering the supplier on the app
//! builder. The registry bootstrap calls each supplier exactly once and
//! owns the returned descriptors from then on.

use super::types::SettingDefinition;
use crate::prelude::*;

/// Opaque context handed to suppliers during registry bootstrap.
///
/// Carries nothing a supplier is required to look at; suppliers producing a
/// fixed definition list ignore it entirely.
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct SettingProviderContext {
	/// Instance name of the booting server, for suppliers that want to
	/// derive instance-specific descriptions.
	pub instance: Option<String>,
}

impl SettingProviderContext {
	pub fn new() -> Self {
		Self::default()
	}
}

/// A source of setting definitions.
///
/// Implementations must be pure producers: no I/O, no shared mutable state,
/// a fresh independent `Vec` on every call. The registry deduplicates
/// nothing - duplicate keys across suppliers fail registration.
pub trait SettingDefinitionProvider: Send + Sync {
	fn setting_definitions(
		&self,
		ctx: &SettingProviderContext,
	) -> ClResult<Vec<SettingDefinition>>;
}

// vim: ts=4
