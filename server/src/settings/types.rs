//! Settings types and definitions
//!
//! Core types for the settings subsystem: value, scope set, visibility,
//! permission, definition builder, and the registry.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::prelude::*;

/// Type alias for setting validator function
pub type SettingValidator = Box<dyn Fn(&SettingValue) -> ClResult<()> + Send + Sync>;

// Scopes //
//********//

/// One concrete level at which an override is stored or queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScopeLevel {
	/// Instance-wide, applies to all tenants unless overridden
	#[serde(rename = "application")]
	Application,
	/// Per-tenant values
	#[serde(rename = "tenant")]
	Tenant,
	/// Per-user values within a tenant
	#[serde(rename = "user")]
	User,
}

impl ScopeLevel {
	fn bit(self) -> u8 {
		match self {
			ScopeLevel::Application => 0b001,
			ScopeLevel::Tenant => 0b010,
			ScopeLevel::User => 0b100,
		}
	}
}

/// Set of levels at which a setting may be overridden.
///
/// A bitmask with set semantics: union via `|`, membership via `contains`.
/// Serialized as a list of level tags.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SettingScopes(u8);

impl SettingScopes {
	pub const APPLICATION: SettingScopes = SettingScopes(0b001);
	pub const TENANT: SettingScopes = SettingScopes(0b010);
	pub const USER: SettingScopes = SettingScopes(0b100);
	pub const ALL: SettingScopes = SettingScopes(0b111);

	pub fn empty() -> SettingScopes {
		SettingScopes(0)
	}

	pub fn contains(&self, level: ScopeLevel) -> bool {
		self.0 & level.bit() != 0
	}

	pub fn is_empty(&self) -> bool {
		self.0 == 0
	}

	/// Levels present in this set, most specific first.
	pub fn levels(&self) -> impl Iterator<Item = ScopeLevel> + '_ {
		[ScopeLevel::User, ScopeLevel::Tenant, ScopeLevel::Application]
			.into_iter()
			.filter(|l| self.contains(*l))
	}
}

impl std::ops::BitOr for SettingScopes {
	type Output = SettingScopes;

	fn bitor(self, rhs: SettingScopes) -> SettingScopes {
		SettingScopes(self.0 | rhs.0)
	}
}

impl From<ScopeLevel> for SettingScopes {
	fn from(level: ScopeLevel) -> Self {
		SettingScopes(level.bit())
	}
}

impl Debug for SettingScopes {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_set().entries(self.levels()).finish()
	}
}

impl Serialize for SettingScopes {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.collect_seq(self.levels())
	}
}

impl<'de> Deserialize<'de> for SettingScopes {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		let levels = Vec::<ScopeLevel>::deserialize(deserializer)?;
		Ok(levels.into_iter().fold(SettingScopes::empty(), |acc, l| acc | l.into()))
	}
}

// Visibility / permission //
//*************************//

/// Whether a setting's resolved value may be exposed to untrusted client code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientVisibility {
	#[serde(rename = "visible")]
	Visible,
	#[serde(rename = "hidden")]
	Hidden,
}

/// Setting permission level defines who can modify a setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionLevel {
	/// Only users with the admin role can change
	#[serde(rename = "admin")]
	Admin,
	/// Any authenticated user can change values within their own context
	#[serde(rename = "user")]
	User,
}

impl PermissionLevel {
	/// Check if the given roles satisfy this permission level
	pub fn check<S: AsRef<str>>(&self, roles: &[S]) -> bool {
		match self {
			PermissionLevel::Admin => roles.iter().any(|r| r.as_ref() == "ADM"),
			PermissionLevel::User => true,
		}
	}
}

// Values //
//********//

/// Setting value types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)] // No type tag - type inferred from SettingDefinition
pub enum SettingValue {
	Bool(bool), // Must be before Int to avoid bool -> int coercion
	Int(i64),
	String(String),
	Json(serde_json::Value),
}

impl SettingValue {
	/// Check if this value matches the type of another value
	pub fn matches_type(&self, other: &SettingValue) -> bool {
		matches!(
			(self, other),
			(SettingValue::String(_), SettingValue::String(_))
				| (SettingValue::Int(_), SettingValue::Int(_))
				| (SettingValue::Bool(_), SettingValue::Bool(_))
				| (SettingValue::Json(_), SettingValue::Json(_))
		)
	}

	/// Get the type name for error messages
	pub fn type_name(&self) -> &'static str {
		match self {
			SettingValue::String(_) => "string",
			SettingValue::Int(_) => "int",
			SettingValue::Bool(_) => "bool",
			SettingValue::Json(_) => "json",
		}
	}
}

// Definitions //
//*************//

/// Setting definition - defines metadata for each setting
pub struct SettingDefinition {
	/// Unique key within the registry (e.g. "UiTheme", "email.smtp.host")
	pub key: String,

	/// Human-readable description
	pub description: String,

	/// Default value, used when no override is stored at any level
	pub default: SettingValue,

	/// Levels at which an override may be stored
	pub scopes: SettingScopes,

	/// Whether the resolved value is sent to client code
	pub visibility: ClientVisibility,

	/// Permission level required to modify this setting
	pub permission: PermissionLevel,

	/// Optional validation function, run on writes
	pub validator: Option<SettingValidator>,
}

impl Clone for SettingDefinition {
	fn clone(&self) -> Self {
		SettingDefinition {
			key: self.key.clone(),
			description: self.description.clone(),
			default: self.default.clone(),
			scopes: self.scopes,
			visibility: self.visibility,
			permission: self.permission,
			validator: None, // Don't clone the validator function
		}
	}
}

impl Debug for SettingDefinition {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SettingDefinition")
			.field("key", &self.key)
			.field("description", &self.description)
			.field("default", &self.default)
			.field("scopes", &self.scopes)
			.field("visibility", &self.visibility)
			.field("permission", &self.permission)
			.field("validator", &self.validator.is_some())
			.finish()
	}
}

impl SettingDefinition {
	/// Create a builder for constructing a SettingDefinition
	pub fn builder(key: impl Into<String>) -> SettingDefinitionBuilder {
		SettingDefinitionBuilder::new(key)
	}
}

/// Builder for SettingDefinition with fluent API
pub struct SettingDefinitionBuilder {
	key: String,
	description: Option<String>,
	default: Option<SettingValue>,
	scopes: SettingScopes,
	visibility: ClientVisibility,
	permission: PermissionLevel,
	validator: Option<SettingValidator>,
}

impl SettingDefinitionBuilder {
	pub fn new(key: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			description: None,
			default: None,
			scopes: SettingScopes::TENANT,      // Default to per-tenant
			visibility: ClientVisibility::Hidden, // Default to hidden for safety
			permission: PermissionLevel::Admin, // Default to admin-only for safety
			validator: None,
		}
	}

	/// Set the description (required)
	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	/// Set the default value (required - every setting resolves to something)
	pub fn default(mut self, value: SettingValue) -> Self {
		self.default = Some(value);
		self
	}

	/// Set the scope set (defaults to tenant only)
	pub fn scopes(mut self, scopes: SettingScopes) -> Self {
		self.scopes = scopes;
		self
	}

	/// Set the client visibility (defaults to hidden)
	pub fn visibility(mut self, visibility: ClientVisibility) -> Self {
		self.visibility = visibility;
		self
	}

	/// Set the permission level (defaults to Admin for safety)
	pub fn permission(mut self, permission: PermissionLevel) -> Self {
		self.permission = permission;
		self
	}

	/// Set a validation function
	pub fn validator<F>(mut self, f: F) -> Self
	where
		F: Fn(&SettingValue) -> ClResult<()> + Send + Sync + 'static,
	{
		self.validator = Some(Box::new(f));
		self
	}

	/// Build the SettingDefinition
	pub fn build(self) -> ClResult<SettingDefinition> {
		let description = self
			.description
			.ok_or_else(|| Error::ConfigError("Setting description is required".into()))?;

		let default = self.default.ok_or_else(|| {
			Error::ConfigError(format!("Setting '{}' must declare a default value", self.key))
		})?;

		if self.scopes.is_empty() {
			return Err(Error::ConfigError(format!(
				"Setting '{}' must allow at least one scope",
				self.key
			)));
		}

		Ok(SettingDefinition {
			key: self.key,
			description,
			default,
			scopes: self.scopes,
			visibility: self.visibility,
			permission: self.permission,
			validator: self.validator,
		})
	}
}

/// Runtime setting instance (a stored override)
#[derive(Debug, Clone)]
pub struct Setting {
	pub key: String,
	pub value: SettingValue,
	pub tn_id: TnId,
	pub user_id: UserId,
	pub updated_at: Timestamp,
}

// Registry //
//**********//

/// Mutable registry used during app initialization
pub struct SettingsRegistry {
	definitions: std::collections::HashMap<String, SettingDefinition>,
}

impl SettingsRegistry {
	pub fn new() -> Self {
		Self { definitions: std::collections::HashMap::new() }
	}

	/// Register a new setting definition
	pub fn register(&mut self, def: SettingDefinition) -> ClResult<()> {
		if self.definitions.contains_key(&def.key) {
			return Err(Error::ConfigError(format!("Setting '{}' is already registered", def.key)));
		}

		tracing::debug!("Registering setting: {}", def.key);
		self.definitions.insert(def.key.clone(), def);
		Ok(())
	}

	/// Register every definition produced by a supplier
	pub fn register_provider(
		&mut self,
		provider: &dyn super::provider::SettingDefinitionProvider,
		ctx: &super::provider::SettingProviderContext,
	) -> ClResult<()> {
		for def in provider.setting_definitions(ctx)? {
			self.register(def)?;
		}
		Ok(())
	}

	/// Freeze the registry (make it immutable)
	pub fn freeze(self) -> FrozenSettingsRegistry {
		tracing::info!("Freezing settings registry with {} definitions", self.definitions.len());
		FrozenSettingsRegistry { definitions: self.definitions }
	}

	/// Get number of registered settings
	pub fn len(&self) -> usize {
		self.definitions.len()
	}

	/// Check if registry is empty
	pub fn is_empty(&self) -> bool {
		self.definitions.is_empty()
	}
}

impl Default for SettingsRegistry {
	fn default() -> Self {
		Self::new()
	}
}

/// Immutable registry stored in AppState
pub struct FrozenSettingsRegistry {
	definitions: std::collections::HashMap<String, SettingDefinition>,
}

impl FrozenSettingsRegistry {
	/// Get a setting definition by key
	pub fn get(&self, key: &str) -> Option<&SettingDefinition> {
		self.definitions.get(key)
	}

	/// List all registered settings
	pub fn list(&self) -> impl Iterator<Item = &SettingDefinition> {
		self.definitions.values()
	}

	/// Get number of registered settings
	pub fn len(&self) -> usize {
		self.definitions.len()
	}

	/// Check if registry is empty
	pub fn is_empty(&self) -> bool {
		self.definitions.is_empty()
	}
}

// vim: ts=4
