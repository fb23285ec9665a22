//! Site settings supplier tests

use corsite::settings::{
	ClientVisibility, PermissionLevel, ScopeLevel, SettingDefinitionProvider,
	SettingProviderContext, SettingValue,
};
use corsite::site::keys;
use corsite::site::settings::SiteSettingsProvider;

#[test]
fn test_returns_exactly_three_definitions() {
	let defs = SiteSettingsProvider
		.setting_definitions(&SettingProviderContext::new())
		.expect("Supplier should not fail");

	assert_eq!(defs.len(), 3);
}

#[test]
fn test_keys_and_defaults() {
	let defs = SiteSettingsProvider
		.setting_definitions(&SettingProviderContext::new())
		.expect("Supplier should not fail");

	let expected = [
		(keys::UI_THEME, "red"),
		(keys::CAREER_RECIPIENT_EMAIL_ADDRESSES, "HR@8dge.com.my"),
		(keys::CONTACT_US_RECIPIENT_EMAIL_ADDRESSES, "info@8dge.com.my"),
	];

	for ((def, (key, default)), position) in defs.iter().zip(expected).zip(0..) {
		assert_eq!(def.key, key, "Key order differs at position {}", position);
		assert_eq!(def.default, SettingValue::String(default.into()));
	}

	// Keys are unique
	let mut keys: Vec<&str> = defs.iter().map(|d| d.key.as_str()).collect();
	keys.sort_unstable();
	keys.dedup();
	assert_eq!(keys.len(), 3);
}

#[test]
fn test_scopes_visibility_permission() {
	let defs = SiteSettingsProvider
		.setting_definitions(&SettingProviderContext::new())
		.expect("Supplier should not fail");

	for def in &defs {
		assert!(def.scopes.contains(ScopeLevel::Application), "{} missing application", def.key);
		assert!(def.scopes.contains(ScopeLevel::Tenant), "{} missing tenant", def.key);
		assert!(def.scopes.contains(ScopeLevel::User), "{} missing user", def.key);
		assert_eq!(def.visibility, ClientVisibility::Visible);
		assert_eq!(def.permission, PermissionLevel::User);
	}
}

#[test]
fn test_repeated_invocations_are_value_equal() {
	let first = SiteSettingsProvider
		.setting_definitions(&SettingProviderContext::new())
		.expect("Supplier should not fail");
	let second = SiteSettingsProvider
		.setting_definitions(&SettingProviderContext::new())
		.expect("Supplier should not fail");

	assert_eq!(first.len(), second.len());
	for (a, b) in first.iter().zip(&second) {
		assert_eq!(a.key, b.key);
		assert_eq!(a.description, b.description);
		assert_eq!(a.default, b.default);
		assert_eq!(a.scopes, b.scopes);
		assert_eq!(a.visibility, b.visibility);
		assert_eq!(a.permission, b.permission);
	}
}

#[test]
fn test_context_contents_are_ignored() {
	let mut ctx = SettingProviderContext::new();
	ctx.instance = Some("SomethingElse".into());

	let with_instance = SiteSettingsProvider
		.setting_definitions(&ctx)
		.expect("Supplier should not fail");
	let without = SiteSettingsProvider
		.setting_definitions(&SettingProviderContext::new())
		.expect("Supplier should not fail");

	for (a, b) in with_instance.iter().zip(&without) {
		assert_eq!(a.key, b.key);
		assert_eq!(a.default, b.default);
	}
}

// vim: ts=4
