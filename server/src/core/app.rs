//! App state and builder - constructs and runs the Corsite application

use std::sync::Arc;

use crate::email::{EmailSender, EmailSettingsProvider};
use crate::prelude::*;
use crate::routes;
use crate::settings::SettingsRegistry;
use crate::settings::provider::{SettingDefinitionProvider, SettingProviderContext};
use crate::settings::service::SettingsService;
use crate::settings::types::FrozenSettingsRegistry;
use crate::site::settings::SiteSettingsProvider;
use corsite_types::settings_adapter::SettingsAdapter;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct AppState {
	pub opts: AppBuilderOpts,

	// Settings subsystem
	pub settings: Arc<SettingsService>,
	pub settings_registry: Arc<FrozenSettingsRegistry>,

	// Email dispatch
	pub email: Arc<EmailSender>,
}

pub type App = Arc<AppState>;

#[derive(Debug)]
pub struct AppBuilderOpts {
	pub listen: Box<str>,
	pub instance: Box<str>,
	pub jwt_secret: Box<str>,
	/// Capacity of the resolved-settings LRU cache
	pub settings_cache_size: usize,
}

pub struct AppBuilder {
	opts: AppBuilderOpts,
	settings_adapter: Option<Arc<dyn SettingsAdapter>>,
	providers: Vec<Box<dyn SettingDefinitionProvider>>,
}

impl AppBuilder {
	pub fn new() -> Self {
		let _ = tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
			.with_target(false)
			.try_init();
		AppBuilder {
			opts: AppBuilderOpts {
				listen: "127.0.0.1:8080".into(),
				instance: "Corsite".into(),
				jwt_secret: "".into(),
				settings_cache_size: 1000,
			},
			settings_adapter: None,
			providers: Vec::new(),
		}
	}

	// Opts
	pub fn listen(&mut self, listen: impl Into<Box<str>>) -> &mut Self {
		self.opts.listen = listen.into();
		self
	}
	pub fn instance(&mut self, instance: impl Into<Box<str>>) -> &mut Self {
		self.opts.instance = instance.into();
		self
	}
	pub fn jwt_secret(&mut self, jwt_secret: impl Into<Box<str>>) -> &mut Self {
		self.opts.jwt_secret = jwt_secret.into();
		self
	}
	pub fn settings_cache_size(&mut self, size: usize) -> &mut Self {
		self.opts.settings_cache_size = size;
		self
	}

	// Adapters
	pub fn settings_adapter(&mut self, settings_adapter: Arc<dyn SettingsAdapter>) -> &mut Self {
		self.settings_adapter = Some(settings_adapter);
		self
	}

	/// Register an additional setting definition supplier.
	///
	/// The built-in core, site, and email suppliers are always registered;
	/// this adds deployment-specific ones.
	pub fn settings_provider(
		&mut self,
		provider: impl SettingDefinitionProvider + 'static,
	) -> &mut Self {
		self.providers.push(Box::new(provider));
		self
	}

	/// Construct the application state without serving.
	pub fn build(self) -> ClResult<App> {
		if self.opts.jwt_secret.is_empty() {
			error!("FATAL: No JWT secret configured");
			return Err(Error::ConfigError("No JWT secret configured".into()));
		}
		let Some(settings_adapter) = self.settings_adapter else {
			error!("FATAL: No settings adapter configured");
			return Err(Error::ConfigError("No settings adapter configured".into()));
		};

		// Collect definitions from all suppliers
		let ctx = SettingProviderContext { instance: Some(self.opts.instance.to_string()) };
		let mut settings_registry = SettingsRegistry::new();
		settings_registry.register_provider(&crate::core::settings::CoreSettingsProvider, &ctx)?;
		settings_registry.register_provider(&SiteSettingsProvider, &ctx)?;
		settings_registry.register_provider(&EmailSettingsProvider, &ctx)?;
		for provider in &self.providers {
			settings_registry.register_provider(provider.as_ref(), &ctx)?;
		}

		info!("Registered {} settings", settings_registry.len());

		// Freeze the registry
		let frozen_registry = Arc::new(settings_registry.freeze());

		// Create settings service
		let settings_service = Arc::new(SettingsService::new(
			frozen_registry.clone(),
			settings_adapter,
			self.opts.settings_cache_size,
		));

		let email = Arc::new(EmailSender::new(settings_service.clone()));

		Ok(Arc::new(AppState {
			opts: self.opts,
			settings: settings_service,
			settings_registry: frozen_registry,
			email,
		}))
	}

	pub async fn run(self) -> ClResult<()> {
		let app = self.build()?;
		info!("Corsite v{}", VERSION);

		let router = routes::init(app.clone());

		let listener = tokio::net::TcpListener::bind(app.opts.listen.as_ref()).await?;
		info!("Listening on {}", app.opts.listen);
		axum::serve(listener, router)
			.await
			.map_err(|e| Error::Internal(format!("Server error: {}", e)))?;

		Ok(())
	}
}

impl Default for AppBuilder {
	fn default() -> Self {
		Self::new()
	}
}

// vim: ts=4
