//! Setting keys owned by the site module

pub const UI_THEME: &str = "UiTheme";
pub const CAREER_RECIPIENT_EMAIL_ADDRESSES: &str = "CareerRecipientEmailAddresses";
pub const CONTACT_US_RECIPIENT_EMAIL_ADDRESSES: &str = "ContactUsRecipientEmailAddresses";

// vim: ts=4
