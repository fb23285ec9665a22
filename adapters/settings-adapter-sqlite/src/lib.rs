//! SQLite-backed settings adapter
//!
//! Stores setting overrides as JSON values keyed by `(tn_id, user_id, name)`.
//! Application-level rows use `tn_id=0`, tenant-level rows `user_id=0`.

use async_trait::async_trait;
use sqlx::sqlite::{self, SqlitePool};
use std::{collections::HashMap, path::Path};

use corsite_types::prelude::*;
use corsite_types::settings_adapter::SettingsAdapter;

mod setting;

fn inspect(err: &sqlx::Error) {
	warn!("DB: {:#?}", err);
}

#[derive(Debug)]
pub struct SettingsAdapterSqlite {
	db: SqlitePool,
}

impl SettingsAdapterSqlite {
	pub async fn new(path: impl AsRef<Path>) -> ClResult<Self> {
		let opts = sqlite::SqliteConnectOptions::new()
			.filename(path.as_ref())
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.inspect_err(inspect)
			.map_err(|_| Error::DbError)?;

		init_db(&db).await.inspect_err(inspect).map_err(|_| Error::DbError)?;

		Ok(Self { db })
	}
}

#[async_trait]
impl SettingsAdapter for SettingsAdapterSqlite {
	async fn read_setting(
		&self,
		tn_id: TnId,
		user_id: UserId,
		name: &str,
	) -> ClResult<Option<serde_json::Value>> {
		setting::read(&self.db, tn_id, user_id, name).await
	}

	async fn update_setting(
		&self,
		tn_id: TnId,
		user_id: UserId,
		name: &str,
		value: Option<serde_json::Value>,
	) -> ClResult<()> {
		setting::update(&self.db, tn_id, user_id, name, value).await
	}

	async fn list_settings(
		&self,
		tn_id: TnId,
		user_id: UserId,
		prefix: Option<&[String]>,
	) -> ClResult<HashMap<String, serde_json::Value>> {
		setting::list(&self.db, tn_id, user_id, prefix).await
	}
}

async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS settings (
		tn_id integer NOT NULL,
		user_id integer NOT NULL DEFAULT 0,
		name text NOT NULL,
		value text,
		updated_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(tn_id, user_id, name)
	)",
	)
	.execute(&mut *tx)
	.await?;

	tx.commit().await?;

	Ok(())
}

// vim: ts=4
