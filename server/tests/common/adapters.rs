//! Test adapter builders and helpers
//!
//! Provides an in-memory `SettingsAdapter` so service and router tests can
//! run without touching a database.

use async_trait::async_trait;
use std::collections::HashMap;

use corsite_types::error::ClResult;
use corsite_types::settings_adapter::SettingsAdapter;
use corsite_types::types::{TnId, UserId};

#[derive(Debug, Default)]
pub struct MemorySettingsAdapter {
	store: parking_lot::RwLock<HashMap<(TnId, UserId, String), serde_json::Value>>,
}

impl MemorySettingsAdapter {
	pub fn new() -> Self {
		Self::default()
	}
}

#[async_trait]
impl SettingsAdapter for MemorySettingsAdapter {
	async fn read_setting(
		&self,
		tn_id: TnId,
		user_id: UserId,
		name: &str,
	) -> ClResult<Option<serde_json::Value>> {
		let store = self.store.read();
		Ok(store.get(&(tn_id, user_id, name.to_string())).cloned())
	}

	async fn update_setting(
		&self,
		tn_id: TnId,
		user_id: UserId,
		name: &str,
		value: Option<serde_json::Value>,
	) -> ClResult<()> {
		let mut store = self.store.write();
		match value {
			Some(value) => {
				store.insert((tn_id, user_id, name.to_string()), value);
			}
			None => {
				store.remove(&(tn_id, user_id, name.to_string()));
			}
		}
		Ok(())
	}

	async fn list_settings(
		&self,
		tn_id: TnId,
		user_id: UserId,
		prefix: Option<&[String]>,
	) -> ClResult<HashMap<String, serde_json::Value>> {
		let store = self.store.read();
		Ok(store
			.iter()
			.filter(|((tn, user, name), _)| {
				*tn == tn_id
					&& *user == user_id
					&& prefix.is_none_or(|prefixes| {
						prefixes.iter().any(|p| name.starts_with(p.as_str()))
					})
			})
			.map(|((_, _, name), value)| (name.clone(), value.clone()))
			.collect())
	}
}

/// Common test setup helper
pub fn setup_test_logging() {
	let _ = tracing_subscriber::fmt()
		.with_test_writer()
		.with_max_level(tracing::Level::DEBUG)
		.try_init();
}

// vim: ts=4
