use std::{env, path, sync::Arc};

use corsite::AppBuilder;
use corsite_settings_adapter_sqlite::SettingsAdapterSqlite;

pub struct Config {
	pub db_dir: path::PathBuf,
	pub listen: String,
	pub jwt_secret: String,
	pub instance: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let config = Config {
		db_dir: path::PathBuf::from(env::var("DB_DIR").unwrap_or("./data".to_string())),
		listen: env::var("LISTEN").unwrap_or("127.0.0.1:8080".to_string()),
		jwt_secret: env::var("JWT_SECRET").unwrap_or_default(),
		instance: env::var("INSTANCE").unwrap_or("Corsite".to_string()),
	};

	std::fs::create_dir_all(&config.db_dir)?;
	let settings_adapter =
		Arc::new(SettingsAdapterSqlite::new(config.db_dir.join("settings.db")).await?);

	let mut builder = AppBuilder::new();
	builder
		.listen(config.listen)
		.instance(config.instance)
		.jwt_secret(config.jwt_secret)
		.settings_adapter(settings_adapter);
	builder.run().await?;

	Ok(())
}

// vim: ts=4
