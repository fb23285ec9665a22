//! Settings adapter CRUD operation tests
//!
//! Tests read, update, list, and delete of overrides across the three
//! storage levels.

use corsite_settings_adapter_sqlite::SettingsAdapterSqlite;
use corsite_types::settings_adapter::SettingsAdapter;
use corsite_types::types::{TnId, UserId};
use tempfile::TempDir;

async fn create_test_adapter() -> (SettingsAdapterSqlite, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");

	let adapter = SettingsAdapterSqlite::new(temp_dir.path().join("settings.db"))
		.await
		.expect("Failed to create adapter");

	(adapter, temp_dir)
}

#[tokio::test]
async fn test_read_missing_setting() {
	let (adapter, _temp) = create_test_adapter().await;

	let value = adapter
		.read_setting(TnId(1), UserId::NONE, "UiTheme")
		.await
		.expect("Read should succeed");

	assert!(value.is_none());
}

#[tokio::test]
async fn test_update_and_read_roundtrip() {
	let (adapter, _temp) = create_test_adapter().await;

	adapter
		.update_setting(TnId(1), UserId::NONE, "UiTheme", Some(serde_json::json!("blue")))
		.await
		.expect("Update should succeed");

	let value = adapter
		.read_setting(TnId(1), UserId::NONE, "UiTheme")
		.await
		.expect("Read should succeed");

	assert_eq!(value, Some(serde_json::json!("blue")));
}

#[tokio::test]
async fn test_levels_are_isolated() {
	let (adapter, _temp) = create_test_adapter().await;

	adapter
		.update_setting(TnId::APPLICATION, UserId::NONE, "UiTheme", Some(serde_json::json!("red")))
		.await
		.expect("Application write should succeed");
	adapter
		.update_setting(TnId(1), UserId::NONE, "UiTheme", Some(serde_json::json!("blue")))
		.await
		.expect("Tenant write should succeed");
	adapter
		.update_setting(TnId(1), UserId(7), "UiTheme", Some(serde_json::json!("black")))
		.await
		.expect("User write should succeed");

	let app = adapter
		.read_setting(TnId::APPLICATION, UserId::NONE, "UiTheme")
		.await
		.expect("Read should succeed");
	let tenant =
		adapter.read_setting(TnId(1), UserId::NONE, "UiTheme").await.expect("Read should succeed");
	let user =
		adapter.read_setting(TnId(1), UserId(7), "UiTheme").await.expect("Read should succeed");

	assert_eq!(app, Some(serde_json::json!("red")));
	assert_eq!(tenant, Some(serde_json::json!("blue")));
	assert_eq!(user, Some(serde_json::json!("black")));

	// Other tenants and users see nothing
	let other =
		adapter.read_setting(TnId(2), UserId::NONE, "UiTheme").await.expect("Read should succeed");
	assert!(other.is_none());
}

#[tokio::test]
async fn test_update_overwrites() {
	let (adapter, _temp) = create_test_adapter().await;

	adapter
		.update_setting(TnId(1), UserId::NONE, "email.smtp.port", Some(serde_json::json!(587)))
		.await
		.expect("Update should succeed");
	adapter
		.update_setting(TnId(1), UserId::NONE, "email.smtp.port", Some(serde_json::json!(465)))
		.await
		.expect("Second update should succeed");

	let value = adapter
		.read_setting(TnId(1), UserId::NONE, "email.smtp.port")
		.await
		.expect("Read should succeed");
	assert_eq!(value, Some(serde_json::json!(465)));
}

#[tokio::test]
async fn test_delete_with_none() {
	let (adapter, _temp) = create_test_adapter().await;

	adapter
		.update_setting(TnId(1), UserId(7), "UiTheme", Some(serde_json::json!("blue")))
		.await
		.expect("Update should succeed");
	adapter
		.update_setting(TnId(1), UserId(7), "UiTheme", None)
		.await
		.expect("Delete should succeed");

	let value =
		adapter.read_setting(TnId(1), UserId(7), "UiTheme").await.expect("Read should succeed");
	assert!(value.is_none());
}

#[tokio::test]
async fn test_list_settings_with_prefix() {
	let (adapter, _temp) = create_test_adapter().await;

	adapter
		.update_setting(TnId(1), UserId::NONE, "email.enabled", Some(serde_json::json!(true)))
		.await
		.expect("Update should succeed");
	adapter
		.update_setting(
			TnId(1),
			UserId::NONE,
			"email.smtp.host",
			Some(serde_json::json!("smtp.example.com")),
		)
		.await
		.expect("Update should succeed");
	adapter
		.update_setting(TnId(1), UserId::NONE, "UiTheme", Some(serde_json::json!("blue")))
		.await
		.expect("Update should succeed");

	let all = adapter
		.list_settings(TnId(1), UserId::NONE, None)
		.await
		.expect("List should succeed");
	assert_eq!(all.len(), 3);

	let email = adapter
		.list_settings(TnId(1), UserId::NONE, Some(&["email.".to_string()]))
		.await
		.expect("List should succeed");
	assert_eq!(email.len(), 2);
	assert!(email.contains_key("email.enabled"));
	assert!(email.contains_key("email.smtp.host"));
}

// vim: ts=4
