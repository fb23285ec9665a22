//! Custom Axum extractors
//!
//! `Auth`/`OptionalAuth` read the authentication context placed into request
//! extensions by the auth middleware. `OptionalRequestId` picks up the
//! client-supplied request correlation id.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::core::route_auth::AuthCtx;
use crate::prelude::*;

// Auth //
//******//
#[derive(Debug, Clone)]
pub struct Auth(pub AuthCtx);

impl<S> FromRequestParts<S> for Auth
where
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		if let Some(auth) = parts.extensions.get::<AuthCtx>().cloned() {
			Ok(Auth(auth))
		} else {
			Err(Error::PermissionDenied)
		}
	}
}

// OptionalAuth //
//**************//
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<AuthCtx>);

impl<S> FromRequestParts<S> for OptionalAuth
where
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		Ok(OptionalAuth(parts.extensions.get::<AuthCtx>().cloned()))
	}
}

// OptionalRequestId //
//*******************//
#[derive(Debug, Clone)]
pub struct OptionalRequestId(pub Option<String>);

impl<S> FromRequestParts<S> for OptionalRequestId
where
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		let req_id = parts
			.headers
			.get("x-request-id")
			.and_then(|h| h.to_str().ok())
			.map(|s| s.to_string());
		Ok(OptionalRequestId(req_id))
	}
}

// vim: ts=4
