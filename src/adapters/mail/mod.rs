//! Mail transport adapters.
//!
//! - **ResendMailer** - delivers through the Resend HTTP API
//! - **LogMailer** - logs messages instead of sending them
//! - **RecordingMailer** - keeps an in-memory outbox (testing)

mod log_mailer;
mod recording_mailer;
mod resend_mailer;

pub use log_mailer::LogMailer;
pub use recording_mailer::RecordingMailer;
pub use resend_mailer::{ResendConfig, ResendMailer};
