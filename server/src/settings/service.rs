//! Settings service with caching, validation, and permission checks

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use corsite_types::error::{ClResult, Error};
use corsite_types::settings_adapter::SettingsAdapter;
use corsite_types::types::{Timestamp, TnId, UserId};

use super::types::{FrozenSettingsRegistry, ScopeLevel, Setting, SettingDefinition, SettingValue};

/// LRU cache for resolved settings values
pub struct SettingsCache {
	cache: Arc<parking_lot::RwLock<LruCache<(TnId, UserId, String), SettingValue>>>,
}

impl SettingsCache {
	pub fn new(capacity: usize) -> Self {
		let non_zero = NonZeroUsize::new(capacity)
			.unwrap_or(NonZeroUsize::MIN.saturating_add(99));
		Self { cache: Arc::new(parking_lot::RwLock::new(LruCache::new(non_zero))) }
	}

	pub fn get(&self, tn_id: TnId, user_id: UserId, key: &str) -> Option<SettingValue> {
		let mut cache = self.cache.write();
		cache.get(&(tn_id, user_id, key.to_string())).cloned()
	}

	pub fn put(&self, tn_id: TnId, user_id: UserId, key: String, value: SettingValue) {
		let mut cache = self.cache.write();
		cache.put((tn_id, user_id, key), value);
	}

	/// Invalidate all cached settings
	pub fn clear(&self) {
		let mut cache = self.cache.write();
		cache.clear();
	}
}

/// Settings service - main interface for accessing and managing settings
pub struct SettingsService {
	registry: Arc<FrozenSettingsRegistry>,
	cache: SettingsCache,
	adapter: Arc<dyn SettingsAdapter>,
}

impl SettingsService {
	pub fn new(
		registry: Arc<FrozenSettingsRegistry>,
		adapter: Arc<dyn SettingsAdapter>,
		cache_size: usize,
	) -> Self {
		Self { registry, cache: SettingsCache::new(cache_size), adapter }
	}

	/// Get setting value with full resolution
	/// (user -> tenant -> application -> default)
	///
	/// Each level is consulted only when the definition's scope set contains
	/// it. Pass `UserId::NONE` and/or `TnId::APPLICATION` for contexts
	/// without a user or tenant.
	pub async fn get(&self, tn_id: TnId, user_id: UserId, key: &str) -> ClResult<SettingValue> {
		// Check cache
		if let Some(value) = self.cache.get(tn_id, user_id, key) {
			debug!("Setting cache hit: {}/{} {}", tn_id, user_id, key);
			return Ok(value);
		}

		// Get definition
		let def = self
			.registry
			.get(key)
			.ok_or_else(|| Error::ValidationError(format!("Unknown setting: {}", key)))?;

		// Try user-specific override
		if def.scopes.contains(ScopeLevel::User)
			&& tn_id != TnId::APPLICATION
			&& !user_id.is_none()
		{
			if let Some(value) = self.read_level(tn_id, user_id, key).await? {
				self.cache.put(tn_id, user_id, key.to_string(), value.clone());
				return Ok(value);
			}
		}

		// Try tenant override
		if def.scopes.contains(ScopeLevel::Tenant) && tn_id != TnId::APPLICATION {
			if let Some(value) = self.read_level(tn_id, UserId::NONE, key).await? {
				self.cache.put(tn_id, user_id, key.to_string(), value.clone());
				return Ok(value);
			}
		}

		// Try application override
		if def.scopes.contains(ScopeLevel::Application) {
			if let Some(value) = self.read_level(TnId::APPLICATION, UserId::NONE, key).await? {
				self.cache.put(tn_id, user_id, key.to_string(), value.clone());
				return Ok(value);
			}
		}

		// Fall back to the declared default
		let value = def.default.clone();
		self.cache.put(tn_id, user_id, key.to_string(), value.clone());
		Ok(value)
	}

	async fn read_level(
		&self,
		tn_id: TnId,
		user_id: UserId,
		key: &str,
	) -> ClResult<Option<SettingValue>> {
		match self.adapter.read_setting(tn_id, user_id, key).await? {
			Some(json_value) => {
				let value = serde_json::from_value::<SettingValue>(json_value)
					.map_err(|e| Error::ValidationError(format!("Invalid setting value: {}", e)))?;
				Ok(Some(value))
			}
			None => Ok(None),
		}
	}

	/// Pick the override level a write targets when none was requested:
	/// the most specific level in the definition's scope set that the
	/// calling context can address.
	fn default_level(def: &SettingDefinition, tn_id: TnId, user_id: UserId) -> ScopeLevel {
		for level in def.scopes.levels() {
			match level {
				ScopeLevel::User if tn_id != TnId::APPLICATION && !user_id.is_none() => {
					return level;
				}
				ScopeLevel::Tenant if tn_id != TnId::APPLICATION => return level,
				ScopeLevel::Application => return level,
				_ => {}
			}
		}
		ScopeLevel::Application
	}

	/// Map a scope level to the storage coordinates for the calling context
	fn storage_coords(
		tn_id: TnId,
		user_id: UserId,
		level: ScopeLevel,
	) -> ClResult<(TnId, UserId)> {
		match level {
			ScopeLevel::Application => Ok((TnId::APPLICATION, UserId::NONE)),
			ScopeLevel::Tenant => {
				if tn_id == TnId::APPLICATION {
					return Err(Error::ValidationError(
						"No tenant in context for tenant-scoped write".into(),
					));
				}
				Ok((tn_id, UserId::NONE))
			}
			ScopeLevel::User => {
				if tn_id == TnId::APPLICATION || user_id.is_none() {
					return Err(Error::ValidationError(
						"No user in context for user-scoped write".into(),
					));
				}
				Ok((tn_id, user_id))
			}
		}
	}

	/// Set setting value with validation and permission checks
	/// The `roles` parameter should be the authenticated user's roles
	pub async fn set<S: AsRef<str>>(
		&self,
		tn_id: TnId,
		user_id: UserId,
		key: &str,
		value: SettingValue,
		level: Option<ScopeLevel>,
		roles: &[S],
	) -> ClResult<Setting> {
		// Get definition
		let def = self
			.registry
			.get(key)
			.ok_or_else(|| Error::ValidationError(format!("Unknown setting: {}", key)))?;

		// Check permission level
		if !def.permission.check(roles) {
			warn!("Permission denied for setting '{}': requires {:?}", key, def.permission);
			return Err(Error::PermissionDenied);
		}

		// Determine and validate the target level
		let level = level.unwrap_or_else(|| Self::default_level(def, tn_id, user_id));
		if !def.scopes.contains(level) {
			return Err(Error::ValidationError(format!(
				"Setting '{}' cannot be overridden at {:?} scope",
				key, level
			)));
		}

		// Application-level writes change every tenant's fallback
		if level == ScopeLevel::Application && !roles.iter().any(|r| r.as_ref() == "ADM") {
			return Err(Error::PermissionDenied);
		}

		let (store_tn_id, store_user_id) = Self::storage_coords(tn_id, user_id, level)?;

		// Validate type matches the declared default
		if !value.matches_type(&def.default) {
			return Err(Error::ValidationError(format!(
				"Type mismatch for setting '{}': expected {}, got {}",
				key,
				def.default.type_name(),
				value.type_name()
			)));
		}

		// Run custom validator if present
		if let Some(validator) = &def.validator {
			validator(&value)?;
		}

		// Convert to JSON and save through the adapter
		let json_value = serde_json::to_value(&value)
			.map_err(|e| Error::ValidationError(format!("Failed to serialize setting: {}", e)))?;
		self.adapter.update_setting(store_tn_id, store_user_id, key, Some(json_value)).await?;

		self.cache.clear();

		info!("Setting '{}' updated at {:?} scope ({}/{})", key, level, store_tn_id, store_user_id);

		Ok(Setting {
			key: key.to_string(),
			value,
			tn_id: store_tn_id,
			user_id: store_user_id,
			updated_at: Timestamp::now(),
		})
	}

	/// Delete an override at one level (resolution falls back to the next)
	pub async fn delete(
		&self,
		tn_id: TnId,
		user_id: UserId,
		key: &str,
		level: Option<ScopeLevel>,
	) -> ClResult<bool> {
		let def = self
			.registry
			.get(key)
			.ok_or_else(|| Error::ValidationError(format!("Unknown setting: {}", key)))?;

		let level = level.unwrap_or_else(|| Self::default_level(def, tn_id, user_id));
		if !def.scopes.contains(level) {
			return Err(Error::ValidationError(format!(
				"Setting '{}' has no {:?} scope to clear",
				key, level
			)));
		}
		let (store_tn_id, store_user_id) = Self::storage_coords(tn_id, user_id, level)?;

		self.adapter.update_setting(store_tn_id, store_user_id, key, None).await?;
		self.cache.clear();

		info!("Setting '{}' cleared at {:?} scope ({}/{})", key, level, store_tn_id, store_user_id);
		Ok(true)
	}

	/// Type-safe getters (returns error on type mismatch)
	pub async fn get_string(&self, tn_id: TnId, user_id: UserId, key: &str) -> ClResult<String> {
		match self.get(tn_id, user_id, key).await? {
			SettingValue::String(s) => Ok(s),
			v => Err(Error::ValidationError(format!(
				"Setting '{}' is not a string, got {}",
				key,
				v.type_name()
			))),
		}
	}

	pub async fn get_int(&self, tn_id: TnId, user_id: UserId, key: &str) -> ClResult<i64> {
		match self.get(tn_id, user_id, key).await? {
			SettingValue::Int(i) => Ok(i),
			v => Err(Error::ValidationError(format!(
				"Setting '{}' is not an integer, got {}",
				key,
				v.type_name()
			))),
		}
	}

	pub async fn get_bool(&self, tn_id: TnId, user_id: UserId, key: &str) -> ClResult<bool> {
		match self.get(tn_id, user_id, key).await? {
			SettingValue::Bool(b) => Ok(b),
			v => Err(Error::ValidationError(format!(
				"Setting '{}' is not a boolean, got {}",
				key,
				v.type_name()
			))),
		}
	}

	/// Get reference to registry (for listing all settings)
	pub fn registry(&self) -> &Arc<FrozenSettingsRegistry> {
		&self.registry
	}
}

// vim: ts=4
