//! Notifications sent in response to published DocEvents.

mod mail_notifier;

pub use mail_notifier::MailNotifier;
