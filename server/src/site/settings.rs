//! Site settings registration
//!
//! Registers the site-level settings: the UI theme and the recipient
//! address lists for the contact and career forms. All three can be
//! overridden at every level and are visible to client code.

use super::keys;
use crate::prelude::*;
use crate::settings::{
	ClientVisibility, PermissionLevel, SettingDefinition, SettingDefinitionProvider,
	SettingProviderContext, SettingScopes, SettingValue,
};

/// Validate a comma-separated list of email addresses
fn validate_email_list(value: &SettingValue) -> ClResult<()> {
	if let SettingValue::String(list) = value {
		let valid = !list.is_empty()
			&& list.split(',').all(|addr| {
				let addr = addr.trim();
				addr.contains('@') && addr.contains('.')
			});
		if valid {
			return Ok(());
		}
	}
	Err(Error::ValidationError(
		"Value must be a comma-separated list of email addresses".into(),
	))
}

pub struct SiteSettingsProvider;

impl SettingDefinitionProvider for SiteSettingsProvider {
	fn setting_definitions(
		&self,
		_ctx: &SettingProviderContext,
	) -> ClResult<Vec<SettingDefinition>> {
		Ok(vec![
			// UI theme used by the hosted site's front end
			SettingDefinition::builder(keys::UI_THEME)
				.description("Color theme of the site user interface")
				.default(SettingValue::String("red".into()))
				.scopes(SettingScopes::ALL)
				.visibility(ClientVisibility::Visible)
				.permission(PermissionLevel::User)
				.validator(|v| match v {
					SettingValue::String(theme) if !theme.is_empty() => Ok(()),
					_ => Err(Error::ValidationError("Theme must be a non-empty string".into())),
				})
				.build()?,

			// Where career form submissions are mailed
			SettingDefinition::builder(keys::CAREER_RECIPIENT_EMAIL_ADDRESSES)
				.description("Comma-separated recipient addresses for career form submissions")
				.default(SettingValue::String("HR@8dge.com.my".into()))
				.scopes(SettingScopes::ALL)
				.visibility(ClientVisibility::Visible)
				.permission(PermissionLevel::User)
				.validator(validate_email_list)
				.build()?,

			// Where contact-us form submissions are mailed
			SettingDefinition::builder(keys::CONTACT_US_RECIPIENT_EMAIL_ADDRESSES)
				.description("Comma-separated recipient addresses for contact form submissions")
				.default(SettingValue::String("info@8dge.com.my".into()))
				.scopes(SettingScopes::ALL)
				.visibility(ClientVisibility::Visible)
				.permission(PermissionLevel::User)
				.validator(validate_email_list)
				.build()?,
		])
	}
}

// vim: ts=4
