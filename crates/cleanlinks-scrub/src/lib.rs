//! Link scrubbing engine: decides which URLs in a message can be cleaned,
//! rewrites them, and rebuilds the message text around the cleaned URLs.
//!
//! Nothing in here knows about a chat platform. Inbound messages arrive as
//! [`cleanlinks_core::types::IncomingMessage`] and side effects go through
//! [`cleanlinks_core::outbound::Outbound`].

pub mod clean;
pub mod dedup;
pub mod extract;
pub mod host;
pub mod intro;
pub mod pipeline;
pub mod query;
pub mod rebuild;

pub use clean::clean_url;
pub use dedup::DedupGate;
pub use intro::IntroPicker;
pub use pipeline::{Outcome, Scrubber};
