//! Bearer-token authentication middleware

const TOKEN_EXPIRE: u64 = 8; /* hours */

use axum::{
	body::Body,
	extract::State,
	http::{Request, response::Response},
	middleware::Next,
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use std::time;

use crate::prelude::*;

/// Authentication context derived from a validated token
#[derive(Clone, Debug)]
pub struct AuthCtx {
	pub tn_id: TnId,
	pub user_id: UserId,
	pub roles: Vec<Box<str>>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AuthToken<S> {
	pub sub: u32,
	pub tn: u32,
	pub exp: u64,
	pub r: Option<S>,
}

pub fn generate_access_token(
	secret: &str,
	tn_id: TnId,
	user_id: UserId,
	roles: Option<&str>,
) -> ClResult<Box<str>> {
	let expire = time::SystemTime::now()
		.duration_since(time::UNIX_EPOCH)
		.map_err(|_| Error::PermissionDenied)?
		.as_secs() + 3600 * TOKEN_EXPIRE;

	let token = jsonwebtoken::encode(
		&jsonwebtoken::Header::new(Algorithm::HS256),
		&AuthToken::<&str> { sub: user_id.0, tn: tn_id.0, exp: expire, r: roles },
		&jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
	)
	.map_err(|_| Error::PermissionDenied)?
	.into();

	Ok(token)
}

fn validate_token(secret: &str, token: &str) -> ClResult<AuthCtx> {
	let decoding_key = DecodingKey::from_secret(secret.as_bytes());

	let token_data = decode::<AuthToken<Box<str>>>(
		token,
		&decoding_key,
		&Validation::new(Algorithm::HS256),
	)
	.map_err(|_| Error::PermissionDenied)?;

	Ok(AuthCtx {
		tn_id: TnId(token_data.claims.tn),
		user_id: UserId(token_data.claims.sub),
		roles: token_data
			.claims
			.r
			.unwrap_or_default()
			.split(',')
			.filter(|r| !r.is_empty())
			.map(Box::from)
			.collect(),
	})
}

pub async fn require_auth(
	State(app): State<App>,
	mut req: Request<Body>,
	next: Next,
) -> ClResult<Response<Body>> {
	let auth_header = req
		.headers()
		.get("Authorization")
		.and_then(|h| h.to_str().ok())
		.ok_or(Error::PermissionDenied)?;

	let token = auth_header.strip_prefix("Bearer ").ok_or(Error::PermissionDenied)?;
	let ctx = validate_token(&app.opts.jwt_secret, token)?;

	req.extensions_mut().insert(ctx);

	Ok(next.run(req).await)
}

pub async fn optional_auth(
	State(app): State<App>,
	mut req: Request<Body>,
	next: Next,
) -> ClResult<Response<Body>> {
	if let Some(auth_header) = req.headers().get("Authorization").and_then(|h| h.to_str().ok()) {
		if let Some(token) = auth_header.strip_prefix("Bearer ") {
			if let Ok(ctx) = validate_token(&app.opts.jwt_secret, token) {
				req.extensions_mut().insert(ctx);
			}
		}
	}

	Ok(next.run(req).await)
}

// vim: ts=4
