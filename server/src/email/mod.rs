//! Email dispatch driven by the settings subsystem
//!
//! SMTP configuration lives in application-scoped settings, so it can be
//! changed at runtime without a restart. When email is disabled or no SMTP
//! host is configured, sends are silently skipped.

pub mod sender;
pub mod settings;

pub use sender::EmailSender;
pub use settings::EmailSettingsProvider;

// vim: ts=4
