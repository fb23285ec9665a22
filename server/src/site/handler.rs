//! Site endpoints: theme lookup and contact/career form submission

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use super::keys;
use crate::{
	core::extract::{OptionalAuth, OptionalRequestId},
	prelude::*,
};

#[derive(Serialize)]
pub struct ThemeResponse {
	pub theme: String,
}

/// GET /api/site/theme - Resolved UI theme for the caller's context
pub async fn get_theme(
	State(app): State<App>,
	OptionalAuth(auth): OptionalAuth,
	OptionalRequestId(req_id): OptionalRequestId,
) -> ClResult<(StatusCode, Json<ApiResponse<ThemeResponse>>)> {
	let (tn_id, user_id) = match &auth {
		Some(auth) => (auth.tn_id, auth.user_id),
		None => (TnId::APPLICATION, UserId::NONE),
	};

	let theme = app.settings.get_string(tn_id, user_id, keys::UI_THEME).await?;

	let response = ApiResponse::new(ThemeResponse { theme }).with_req_id(req_id.unwrap_or_default());

	Ok((StatusCode::OK, Json(response)))
}

#[derive(Deserialize)]
pub struct ContactRequest {
	pub name: String,
	pub email: String,
	pub message: String,
}

#[derive(Deserialize)]
pub struct CareerRequest {
	pub name: String,
	pub email: String,
	#[serde(default)]
	pub position: Option<String>,
	pub message: String,
}

#[derive(Serialize)]
pub struct FormReceipt {
	pub recipients: usize,
}

fn check_form(name: &str, email: &str, message: &str) -> ClResult<()> {
	if name.is_empty() || message.is_empty() {
		return Err(Error::ValidationError("Name and message are required".into()));
	}
	if !email.contains('@') {
		return Err(Error::ValidationError("Invalid sender email address".into()));
	}
	Ok(())
}

/// Dispatch one mail per configured recipient address
async fn mail_recipients(
	app: &App,
	tn_id: TnId,
	recipients_key: &str,
	reply_to: &str,
	subject: &str,
	body: String,
) -> ClResult<usize> {
	let recipients = app.settings.get_string(tn_id, UserId::NONE, recipients_key).await?;

	let mut sent = 0;
	for to in recipients.split(',').map(str::trim).filter(|s| !s.is_empty()) {
		app.email.send(tn_id, to, Some(reply_to), subject, body.clone()).await?;
		sent += 1;
	}

	Ok(sent)
}

/// POST /api/site/contact - Contact form submission
pub async fn post_contact(
	State(app): State<App>,
	OptionalAuth(auth): OptionalAuth,
	OptionalRequestId(req_id): OptionalRequestId,
	Json(req): Json<ContactRequest>,
) -> ClResult<(StatusCode, Json<ApiResponse<FormReceipt>>)> {
	check_form(&req.name, &req.email, &req.message)?;

	let tn_id = auth.map(|a| a.tn_id).unwrap_or(TnId::APPLICATION);
	let subject = format!("Contact form message from {}", req.name);
	let body = format!("From: {} <{}>\n\n{}", req.name, req.email, req.message);

	let recipients = mail_recipients(
		&app,
		tn_id,
		keys::CONTACT_US_RECIPIENT_EMAIL_ADDRESSES,
		&req.email,
		&subject,
		body,
	)
	.await?;

	info!("Contact form submission routed to {} recipients", recipients);

	let response =
		ApiResponse::new(FormReceipt { recipients }).with_req_id(req_id.unwrap_or_default());

	Ok((StatusCode::ACCEPTED, Json(response)))
}

/// POST /api/site/career - Job application form submission
pub async fn post_career(
	State(app): State<App>,
	OptionalAuth(auth): OptionalAuth,
	OptionalRequestId(req_id): OptionalRequestId,
	Json(req): Json<CareerRequest>,
) -> ClResult<(StatusCode, Json<ApiResponse<FormReceipt>>)> {
	check_form(&req.name, &req.email, &req.message)?;

	let tn_id = auth.map(|a| a.tn_id).unwrap_or(TnId::APPLICATION);
	let subject = match &req.position {
		Some(position) => format!("Job application from {} ({})", req.name, position),
		None => format!("Job application from {}", req.name),
	};
	let body = format!("From: {} <{}>\n\n{}", req.name, req.email, req.message);

	let recipients = mail_recipients(
		&app,
		tn_id,
		keys::CAREER_RECIPIENT_EMAIL_ADDRESSES,
		&req.email,
		&subject,
		body,
	)
	.await?;

	info!("Career form submission routed to {} recipients", recipients);

	let response =
		ApiResponse::new(FormReceipt { recipients }).with_req_id(req_id.unwrap_or_default());

	Ok((StatusCode::ACCEPTED, Json(response)))
}

// vim: ts=4
