pub use crate::core::app::App;
pub use corsite_types::error::{ClResult, Error};
pub use corsite_types::types::{ApiResponse, Timestamp, TnId, UserId};

pub use tracing::{debug, debug_span, error, error_span, info, info_span, warn, warn_span};

// vim: ts=4
