//! Settings subsystem tests: registry, builder, resolution, permissions

mod common;

use std::sync::Arc;

use common::adapters::MemorySettingsAdapter;
use corsite::settings::service::SettingsService;
use corsite::settings::{
	PermissionLevel, ScopeLevel, SettingDefinition, SettingProviderContext, SettingScopes,
	SettingValue, SettingsRegistry,
};
use corsite::site::settings::SiteSettingsProvider;
use corsite_types::error::Error;
use corsite_types::types::{TnId, UserId};

const ADMIN: &[&str] = &["ADM"];
const NO_ROLES: &[&str] = &[];

fn site_service() -> Arc<SettingsService> {
	let mut registry = SettingsRegistry::new();
	registry
		.register_provider(&SiteSettingsProvider, &SettingProviderContext::new())
		.expect("Should register site settings");
	Arc::new(SettingsService::new(
		Arc::new(registry.freeze()),
		Arc::new(MemorySettingsAdapter::new()),
		100,
	))
}

#[test]
fn test_registry_rejects_duplicate_keys() {
	let mut registry = SettingsRegistry::new();
	registry
		.register_provider(&SiteSettingsProvider, &SettingProviderContext::new())
		.expect("Should register site settings");

	let result = registry.register_provider(&SiteSettingsProvider, &SettingProviderContext::new());

	assert!(matches!(result, Err(Error::ConfigError(_))), "Duplicate keys should be rejected");
}

#[test]
fn test_builder_requires_description() {
	let result = SettingDefinition::builder("a.b").default(SettingValue::Bool(true)).build();
	assert!(matches!(result, Err(Error::ConfigError(_))));
}

#[test]
fn test_builder_requires_default() {
	let result = SettingDefinition::builder("a.b").description("No default here").build();
	assert!(matches!(result, Err(Error::ConfigError(_))));
}

#[test]
fn test_builder_rejects_empty_scopes() {
	let result = SettingDefinition::builder("a.b")
		.description("No scopes")
		.default(SettingValue::Bool(true))
		.scopes(SettingScopes::empty())
		.build();
	assert!(matches!(result, Err(Error::ConfigError(_))));
}

#[test]
fn test_scope_set_operations() {
	let scopes = SettingScopes::APPLICATION | SettingScopes::USER;

	assert!(scopes.contains(ScopeLevel::Application));
	assert!(!scopes.contains(ScopeLevel::Tenant));
	assert!(scopes.contains(ScopeLevel::User));

	// Most specific level first
	let levels: Vec<ScopeLevel> = scopes.levels().collect();
	assert_eq!(levels, vec![ScopeLevel::User, ScopeLevel::Application]);

	assert!(SettingScopes::empty().is_empty());
	assert!(!SettingScopes::ALL.is_empty());
}

#[tokio::test]
async fn test_resolution_defaults() {
	let service = site_service();

	let value = service
		.get_string(TnId(1), UserId(5), "UiTheme")
		.await
		.expect("Should resolve default");
	assert_eq!(value, "red");

	// Same result on a second (cached) read
	let value = service
		.get_string(TnId(1), UserId(5), "UiTheme")
		.await
		.expect("Should resolve from cache");
	assert_eq!(value, "red");
}

#[tokio::test]
async fn test_resolution_precedence() {
	let service = site_service();

	// Application override
	service
		.set(
			TnId(1),
			UserId(5),
			"UiTheme",
			SettingValue::String("green".into()),
			Some(ScopeLevel::Application),
			ADMIN,
		)
		.await
		.expect("Should set application override");
	assert_eq!(
		service.get_string(TnId(1), UserId(5), "UiTheme").await.expect("resolve"),
		"green"
	);

	// Tenant override shadows application
	service
		.set(
			TnId(1),
			UserId(5),
			"UiTheme",
			SettingValue::String("blue".into()),
			Some(ScopeLevel::Tenant),
			ADMIN,
		)
		.await
		.expect("Should set tenant override");
	assert_eq!(service.get_string(TnId(1), UserId(5), "UiTheme").await.expect("resolve"), "blue");

	// Other tenants still see the application override
	assert_eq!(service.get_string(TnId(2), UserId(1), "UiTheme").await.expect("resolve"), "green");

	// User override shadows tenant
	service
		.set(
			TnId(1),
			UserId(5),
			"UiTheme",
			SettingValue::String("black".into()),
			Some(ScopeLevel::User),
			NO_ROLES,
		)
		.await
		.expect("Should set user override");
	assert_eq!(service.get_string(TnId(1), UserId(5), "UiTheme").await.expect("resolve"), "black");

	// Other users of the tenant still see the tenant override
	assert_eq!(service.get_string(TnId(1), UserId(6), "UiTheme").await.expect("resolve"), "blue");
}

#[tokio::test]
async fn test_delete_falls_back() {
	let service = site_service();

	service
		.set(
			TnId(1),
			UserId(5),
			"UiTheme",
			SettingValue::String("blue".into()),
			Some(ScopeLevel::Tenant),
			ADMIN,
		)
		.await
		.expect("Should set tenant override");
	service
		.set(
			TnId(1),
			UserId(5),
			"UiTheme",
			SettingValue::String("black".into()),
			Some(ScopeLevel::User),
			NO_ROLES,
		)
		.await
		.expect("Should set user override");

	service
		.delete(TnId(1), UserId(5), "UiTheme", Some(ScopeLevel::User))
		.await
		.expect("Should clear user override");
	assert_eq!(service.get_string(TnId(1), UserId(5), "UiTheme").await.expect("resolve"), "blue");

	service
		.delete(TnId(1), UserId(5), "UiTheme", Some(ScopeLevel::Tenant))
		.await
		.expect("Should clear tenant override");
	assert_eq!(service.get_string(TnId(1), UserId(5), "UiTheme").await.expect("resolve"), "red");
}

#[tokio::test]
async fn test_scope_set_enforced_on_write() {
	let mut registry = SettingsRegistry::new();
	registry
		.register(
			SettingDefinition::builder("app.only")
				.description("Application-scoped flag")
				.default(SettingValue::Bool(false))
				.scopes(SettingScopes::APPLICATION)
				.build()
				.expect("Should build definition"),
		)
		.expect("Should register definition");
	let service = SettingsService::new(
		Arc::new(registry.freeze()),
		Arc::new(MemorySettingsAdapter::new()),
		100,
	);

	let result = service
		.set(
			TnId(1),
			UserId(5),
			"app.only",
			SettingValue::Bool(true),
			Some(ScopeLevel::Tenant),
			ADMIN,
		)
		.await;
	assert!(matches!(result, Err(Error::ValidationError(_))));
}

#[tokio::test]
async fn test_admin_permission_enforced() {
	let mut registry = SettingsRegistry::new();
	registry
		.register(
			SettingDefinition::builder("quota.files")
				.description("Per-tenant file quota")
				.default(SettingValue::Int(100))
				.permission(PermissionLevel::Admin)
				.build()
				.expect("Should build definition"),
		)
		.expect("Should register definition");
	let service = SettingsService::new(
		Arc::new(registry.freeze()),
		Arc::new(MemorySettingsAdapter::new()),
		100,
	);

	let result = service
		.set(TnId(1), UserId(5), "quota.files", SettingValue::Int(200), None, NO_ROLES)
		.await;
	assert!(matches!(result, Err(Error::PermissionDenied)));

	service
		.set(TnId(1), UserId(5), "quota.files", SettingValue::Int(200), None, ADMIN)
		.await
		.expect("Admin should be allowed");
}

#[tokio::test]
async fn test_application_write_requires_admin_role() {
	let service = site_service();

	// UiTheme is user-changeable, but the application-wide fallback is not
	let result = service
		.set(
			TnId(1),
			UserId(5),
			"UiTheme",
			SettingValue::String("green".into()),
			Some(ScopeLevel::Application),
			NO_ROLES,
		)
		.await;
	assert!(matches!(result, Err(Error::PermissionDenied)));
}

#[tokio::test]
async fn test_type_mismatch_rejected() {
	let service = site_service();

	let result = service
		.set(TnId(1), UserId(5), "UiTheme", SettingValue::Int(7), None, NO_ROLES)
		.await;
	assert!(matches!(result, Err(Error::ValidationError(_))));
}

#[tokio::test]
async fn test_validator_runs_on_write() {
	let service = site_service();

	let result = service
		.set(
			TnId(1),
			UserId(5),
			"ContactUsRecipientEmailAddresses",
			SettingValue::String("not an address".into()),
			None,
			NO_ROLES,
		)
		.await;
	assert!(matches!(result, Err(Error::ValidationError(_))));

	service
		.set(
			TnId(1),
			UserId(5),
			"ContactUsRecipientEmailAddresses",
			SettingValue::String("a@b.example, c@d.example".into()),
			None,
			NO_ROLES,
		)
		.await
		.expect("Valid address list should be accepted");
}

#[tokio::test]
async fn test_unknown_setting() {
	let service = site_service();

	let result = service.get(TnId(1), UserId(5), "no.such.setting").await;
	assert!(matches!(result, Err(Error::ValidationError(_))));

	let result = service
		.set(TnId(1), UserId(5), "no.such.setting", SettingValue::Bool(true), None, ADMIN)
		.await;
	assert!(matches!(result, Err(Error::ValidationError(_))));
}

// vim: ts=4
