//! SMTP sending via lettre, configured from resolved settings

use lettre::{
	AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
	message::Mailbox,
	transport::smtp::authentication::Credentials,
};
use std::sync::Arc;

use crate::prelude::*;
use crate::settings::service::SettingsService;

pub struct EmailSender {
	settings: Arc<SettingsService>,
}

impl EmailSender {
	pub fn new(settings: Arc<SettingsService>) -> Self {
		Self { settings }
	}

	/// Send a plain-text email.
	///
	/// Configuration is resolved per send, so runtime setting changes take
	/// effect immediately. Returns `Ok(())` without sending when email is
	/// disabled or no SMTP host is configured.
	pub async fn send(
		&self,
		tn_id: TnId,
		to: &str,
		reply_to: Option<&str>,
		subject: &str,
		text_body: String,
	) -> ClResult<()> {
		let enabled = self.settings.get_bool(tn_id, UserId::NONE, "email.enabled").await?;
		let host = self.settings.get_string(tn_id, UserId::NONE, "email.smtp.host").await?;

		if !enabled || host.is_empty() {
			debug!("Email sending skipped (disabled or no SMTP host): to={} subject={}", to, subject);
			return Ok(());
		}

		let port = self.settings.get_int(tn_id, UserId::NONE, "email.smtp.port").await?;
		let username = self.settings.get_string(tn_id, UserId::NONE, "email.smtp.username").await?;
		let password = self.settings.get_string(tn_id, UserId::NONE, "email.smtp.password").await?;
		let from_address =
			self.settings.get_string(tn_id, UserId::NONE, "email.from.address").await?;
		let from_name = self.settings.get_string(tn_id, UserId::NONE, "email.from.name").await?;

		let from = Mailbox::new(
			Some(from_name),
			from_address
				.parse()
				.map_err(|_| Error::ConfigError("Invalid email.from.address".into()))?,
		);
		let to_mailbox: Mailbox = to
			.parse()
			.map_err(|_| Error::ValidationError(format!("Invalid recipient address: {}", to)))?;

		let mut builder = Message::builder().from(from).to(to_mailbox).subject(subject);
		if let Some(reply_to) = reply_to {
			if let Ok(mailbox) = reply_to.parse::<Mailbox>() {
				builder = builder.reply_to(mailbox);
			}
		}
		let message = builder
			.body(text_body)
			.map_err(|e| Error::Internal(format!("Failed to build email: {}", e)))?;

		let mut transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&host)
			.map_err(|e| Error::ConfigError(format!("Invalid SMTP configuration: {}", e)))?
			.port(port.clamp(1, u16::MAX as i64) as u16);
		if !username.is_empty() {
			transport = transport.credentials(Credentials::new(username, password));
		}
		let transport = transport.build();

		transport
			.send(message)
			.await
			.map_err(|e| Error::Internal(format!("SMTP send failed: {}", e)))?;

		info!("Email sent: to={} subject={}", to, subject);
		Ok(())
	}
}

// vim: ts=4
