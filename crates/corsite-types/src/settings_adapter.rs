//! Storage adapter trait for setting overrides.
//!
//! Overrides are addressed by `(tn_id, user_id, name)`:
//! - application level: `(TnId(0), UserId(0), name)`
//! - tenant level: `(tn_id, UserId(0), name)`
//! - user level: `(tn_id, user_id, name)`
//!
//! Values are stored as JSON; interpretation against the registered
//! definition happens in the settings service, not here.

use async_trait::async_trait;
use std::{collections::HashMap, fmt::Debug};

use crate::error::ClResult;
use crate::types::{TnId, UserId};

#[async_trait]
pub trait SettingsAdapter: Debug + Send + Sync {
	/// Read a single override. `Ok(None)` when no row exists at this level.
	async fn read_setting(
		&self,
		tn_id: TnId,
		user_id: UserId,
		name: &str,
	) -> ClResult<Option<serde_json::Value>>;

	/// Upsert an override, or delete the row when `value` is `None`.
	async fn update_setting(
		&self,
		tn_id: TnId,
		user_id: UserId,
		name: &str,
		value: Option<serde_json::Value>,
	) -> ClResult<()>;

	/// List overrides stored at one level, optionally filtered by name prefixes.
	async fn list_settings(
		&self,
		tn_id: TnId,
		user_id: UserId,
		prefix: Option<&[String]>,
	) -> ClResult<HashMap<String, serde_json::Value>>;
}

// vim: ts=4
