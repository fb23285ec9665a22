//! Settings management handlers

use axum::{
	Json,
	extract::{Path, Query, State},
	http::StatusCode,
};
use serde::Deserialize;

use crate::{
	core::extract::{Auth, OptionalAuth, OptionalRequestId},
	prelude::*,
	settings::types::{ClientVisibility, PermissionLevel, ScopeLevel, SettingScopes, SettingValue},
};

/// Response for a single setting with metadata
#[derive(serde::Serialize)]
pub struct SettingResponse {
	pub key: String,
	pub value: SettingValue,
	pub scopes: SettingScopes,
	pub visibility: ClientVisibility,
	pub permission: PermissionLevel,
	pub description: String,
}

/// GET /api/settings - List all settings resolved for the caller's context
pub async fn list_settings(
	State(app): State<App>,
	Auth(auth): Auth,
	OptionalRequestId(req_id): OptionalRequestId,
) -> ClResult<(StatusCode, Json<ApiResponse<Vec<SettingResponse>>>)> {
	let mut settings_response = Vec::new();

	for definition in app.settings_registry.list() {
		let value = app.settings.get(auth.tn_id, auth.user_id, &definition.key).await?;
		settings_response.push(SettingResponse {
			key: definition.key.clone(),
			value,
			scopes: definition.scopes,
			visibility: definition.visibility,
			permission: definition.permission,
			description: definition.description.clone(),
		});
	}
	settings_response.sort_by(|a, b| a.key.cmp(&b.key));

	let total = settings_response.len();
	let response = ApiResponse::with_pagination(settings_response, 0, total, total)
		.with_req_id(req_id.unwrap_or_default());

	Ok((StatusCode::OK, Json(response)))
}

/// GET /api/settings/{key} - Get a specific setting with metadata
pub async fn get_setting(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(name): Path<String>,
	OptionalRequestId(req_id): OptionalRequestId,
) -> ClResult<(StatusCode, Json<ApiResponse<SettingResponse>>)> {
	let definition = app.settings_registry.get(&name).ok_or(Error::NotFound)?;

	let value = app.settings.get(auth.tn_id, auth.user_id, &name).await?;

	let response_data = SettingResponse {
		key: definition.key.clone(),
		value,
		scopes: definition.scopes,
		visibility: definition.visibility,
		permission: definition.permission,
		description: definition.description.clone(),
	};

	let response = ApiResponse::new(response_data).with_req_id(req_id.unwrap_or_default());

	Ok((StatusCode::OK, Json(response)))
}

/// PUT /api/settings/{key} - Update a setting
///
/// `scope` picks the override level; when omitted the most specific level
/// allowed by the definition and addressable by the caller is used.
#[derive(Deserialize)]
pub struct UpdateSettingRequest {
	pub value: SettingValue,
	#[serde(default)]
	pub scope: Option<ScopeLevel>,
}

pub async fn update_setting(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(name): Path<String>,
	OptionalRequestId(req_id): OptionalRequestId,
	Json(req): Json<UpdateSettingRequest>,
) -> ClResult<(StatusCode, Json<ApiResponse<SettingResponse>>)> {
	let definition = app.settings_registry.get(&name).ok_or(Error::NotFound)?;

	// The service re-checks; failing early keeps the log clean
	if !definition.permission.check(&auth.roles) {
		warn!("User {} attempted to update setting {} without permission", auth.user_id, name);
		return Err(Error::PermissionDenied);
	}

	app.settings
		.set(auth.tn_id, auth.user_id, &name, req.value, req.scope, &auth.roles)
		.await?;

	info!("User {} updated setting {} in tenant {}", auth.user_id, name, auth.tn_id);

	// Return the re-resolved setting
	let value = app.settings.get(auth.tn_id, auth.user_id, &name).await?;

	let response_data = SettingResponse {
		key: definition.key.clone(),
		value,
		scopes: definition.scopes,
		visibility: definition.visibility,
		permission: definition.permission,
		description: definition.description.clone(),
	};

	let response = ApiResponse::new(response_data).with_req_id(req_id.unwrap_or_default());

	Ok((StatusCode::OK, Json(response)))
}

/// DELETE /api/settings/{key}?scope= - Clear an override level
#[derive(Deserialize)]
pub struct DeleteSettingQuery {
	#[serde(default)]
	pub scope: Option<ScopeLevel>,
}

pub async fn delete_setting(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(name): Path<String>,
	Query(query): Query<DeleteSettingQuery>,
	OptionalRequestId(req_id): OptionalRequestId,
) -> ClResult<(StatusCode, Json<ApiResponse<bool>>)> {
	let definition = app.settings_registry.get(&name).ok_or(Error::NotFound)?;

	if !definition.permission.check(&auth.roles) {
		warn!("User {} attempted to clear setting {} without permission", auth.user_id, name);
		return Err(Error::PermissionDenied);
	}

	let deleted = app.settings.delete(auth.tn_id, auth.user_id, &name, query.scope).await?;

	let response = ApiResponse::new(deleted).with_req_id(req_id.unwrap_or_default());

	Ok((StatusCode::OK, Json(response)))
}

/// GET /api/settings/client - Client-visible settings transport
///
/// Returns a flat key/value map of settings whose visibility is `Visible`,
/// resolved for the caller's context. Anonymous callers resolve at
/// application level. Hidden settings never appear here.
pub async fn client_settings(
	State(app): State<App>,
	OptionalAuth(auth): OptionalAuth,
	OptionalRequestId(req_id): OptionalRequestId,
) -> ClResult<(StatusCode, Json<ApiResponse<serde_json::Map<String, serde_json::Value>>>)> {
	let (tn_id, user_id) = match &auth {
		Some(auth) => (auth.tn_id, auth.user_id),
		None => (TnId::APPLICATION, UserId::NONE),
	};

	let mut values = serde_json::Map::new();
	for definition in app.settings_registry.list() {
		if definition.visibility != ClientVisibility::Visible {
			continue;
		}
		let value = app.settings.get(tn_id, user_id, &definition.key).await?;
		values.insert(definition.key.clone(), serde_json::to_value(&value)?);
	}

	let response = ApiResponse::new(values).with_req_id(req_id.unwrap_or_default());

	Ok((StatusCode::OK, Json(response)))
}

// vim: ts=4
