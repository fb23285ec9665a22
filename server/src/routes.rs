use axum::{
	Router, middleware,
	routing::{delete, get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::core::route_auth::{optional_auth, require_auth};
use crate::prelude::*;
use crate::{settings, site};

pub fn init(app: App) -> Router {
	let protected_router = Router::new()
		.route("/api/settings", get(settings::handler::list_settings))
		.route("/api/settings/{key}", get(settings::handler::get_setting))
		.route("/api/settings/{key}", put(settings::handler::update_setting))
		.route("/api/settings/{key}", delete(settings::handler::delete_setting))
		.layer(middleware::from_fn_with_state(app.clone(), require_auth));

	let public_router = Router::new()
		.route("/api/settings/client", get(settings::handler::client_settings))
		.route("/api/site/theme", get(site::handler::get_theme))
		.route("/api/site/contact", post(site::handler::post_contact))
		.route("/api/site/career", post(site::handler::post_career))
		.route_layer(middleware::from_fn_with_state(app.clone(), optional_auth));

	Router::new()
		.merge(public_router)
		.merge(protected_router)
		.layer(TraceLayer::new_for_http())
		.layer(CorsLayer::permissive())
		.with_state(app)
}

// vim: ts=4
