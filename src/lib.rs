//! A terminal chat widget: the user types a message, it is shown in the
//! transcript, sent to a reply service over HTTP, and the reply (or a
//! fallback error message) is appended once it arrives.

pub mod app;
pub mod config;
pub mod controller;
pub mod delay;
pub mod error;
pub mod handler;
pub mod input;
pub mod message;
pub mod reply;
pub mod transcript;
pub mod tui;
pub mod ui;

pub use controller::{ChatController, Submission, TurnEvent};
pub use error::RequestFailed;
pub use message::{Message, Sender};
pub use reply::{HttpReplyService, ReplyService};
