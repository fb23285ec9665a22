//! Core server settings registration
//!
//! Registers instance-level settings owned by no feature module.

use crate::prelude::*;
use crate::settings::{
	PermissionLevel, SettingDefinition, SettingDefinitionProvider, SettingProviderContext,
	SettingScopes, SettingValue,
};

pub struct CoreSettingsProvider;

impl SettingDefinitionProvider for CoreSettingsProvider {
	fn setting_definitions(
		&self,
		_ctx: &SettingProviderContext,
	) -> ClResult<Vec<SettingDefinition>> {
		Ok(vec![
			// Tenant registration enabled
			SettingDefinition::builder("server.registration_enabled")
				.description("Allow new tenant registrations")
				.default(SettingValue::Bool(true))
				.scopes(SettingScopes::APPLICATION)
				.permission(PermissionLevel::Admin)
				.build()?,
		])
	}
}

// vim: ts=4
