//! Email settings registration
//!
//! Registers SMTP and sender-identity configuration settings.

use crate::prelude::*;
use crate::settings::{
	ClientVisibility, PermissionLevel, SettingDefinition, SettingDefinitionProvider,
	SettingProviderContext, SettingScopes, SettingValue,
};

pub struct EmailSettingsProvider;

impl SettingDefinitionProvider for EmailSettingsProvider {
	fn setting_definitions(
		&self,
		ctx: &SettingProviderContext,
	) -> ClResult<Vec<SettingDefinition>> {
		let from_name = ctx.instance.clone().unwrap_or_else(|| "Corsite".into());

		Ok(vec![
			// Email enabled flag
			SettingDefinition::builder("email.enabled")
				.description("Enable email sending (disable for testing)")
				.default(SettingValue::Bool(false))
				.scopes(SettingScopes::APPLICATION)
				.permission(PermissionLevel::Admin)
				.build()?,

			// SMTP host; when empty, emails are silently skipped
			SettingDefinition::builder("email.smtp.host")
				.description("SMTP server hostname (e.g., smtp.gmail.com). If not set, emails will be silently skipped.")
				.default(SettingValue::String(String::new()))
				.scopes(SettingScopes::APPLICATION)
				.permission(PermissionLevel::Admin)
				.build()?,

			// SMTP port
			SettingDefinition::builder("email.smtp.port")
				.description("SMTP server port (typically 25, 465, or 587)")
				.default(SettingValue::Int(587))
				.scopes(SettingScopes::APPLICATION)
				.permission(PermissionLevel::Admin)
				.validator(|v| {
					if let SettingValue::Int(port) = v {
						if *port > 0 && *port < 65536 {
							return Ok(());
						}
					}
					Err(Error::ValidationError("Port must be between 1 and 65535".into()))
				})
				.build()?,

			// SMTP username
			SettingDefinition::builder("email.smtp.username")
				.description("SMTP authentication username")
				.default(SettingValue::String(String::new()))
				.scopes(SettingScopes::APPLICATION)
				.permission(PermissionLevel::Admin)
				.build()?,

			// SMTP password
			SettingDefinition::builder("email.smtp.password")
				.description("SMTP authentication password")
				.default(SettingValue::String(String::new()))
				.scopes(SettingScopes::APPLICATION)
				.permission(PermissionLevel::Admin)
				.build()?,

			// From address
			SettingDefinition::builder("email.from.address")
				.description("Email sender address (e.g., noreply@example.com)")
				.default(SettingValue::String("noreply@8dge.com.my".into()))
				.scopes(SettingScopes::APPLICATION)
				.permission(PermissionLevel::Admin)
				.validator(|v| {
					if let SettingValue::String(email) = v {
						// Basic email validation
						if email.contains('@') && email.contains('.') {
							return Ok(());
						}
					}
					Err(Error::ValidationError("Invalid email address format".into()))
				})
				.build()?,

			// From name
			SettingDefinition::builder("email.from.name")
				.description("Email sender display name")
				.default(SettingValue::String(from_name))
				.scopes(SettingScopes::APPLICATION | SettingScopes::TENANT)
				.visibility(ClientVisibility::Visible)
				.permission(PermissionLevel::Admin)
				.build()?,
		])
	}
}

// vim: ts=4
