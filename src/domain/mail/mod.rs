//! Mail notifications: triggers, recipient rules and message composition.

mod composer;
mod mailtrigger;
mod message;
mod recipients;

pub use composer::{MailSettings, MessageComposer};
pub use mailtrigger::MailTrigger;
pub use message::OutgoingMessage;
pub use recipients::{
    gather_address_lists, AddressList, Recipient, RecipientContext, IAB, IESG, IESG_SECRETARY,
    IETF_ANNOUNCE, IRSG, NEW_WORK, RSAB,
};
