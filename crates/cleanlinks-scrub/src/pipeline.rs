//! Message pipeline: dedup → eligibility → extract → clean → rebuild →
//! attribute → dispatch.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info, warn};

use cleanlinks_core::outbound::{ChatModes, Outbound};
use cleanlinks_core::types::IncomingMessage;

use crate::dedup::DedupGate;
use crate::extract::extract_urls;
use crate::intro::{attribution, compose, IntroPicker};
use crate::rebuild::{cleaned_mapping, rebuild};

/// Why an eligible-looking message was skipped before cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Sent by a bot, including this one.
    FromBot,
    /// No text and no caption.
    NoText,
    /// No URL or text-link entities.
    NoLinks,
}

/// Terminal state of one message's trip through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Duplicate,
    Ignored(IgnoreReason),
    /// URLs were found but none of them changed.
    NothingToClean,
    /// Cleaned text posted as a reply to the original.
    Replied,
    /// Cleaned text posted standalone; the original was deleted unless the
    /// platform refused.
    Reposted { original_deleted: bool },
    /// The cleaned text could not be posted.
    SendFailed,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Duplicate => write!(f, "duplicate"),
            Outcome::Ignored(IgnoreReason::FromBot) => write!(f, "ignored_from_bot"),
            Outcome::Ignored(IgnoreReason::NoText) => write!(f, "ignored_no_text"),
            Outcome::Ignored(IgnoreReason::NoLinks) => write!(f, "ignored_no_links"),
            Outcome::NothingToClean => write!(f, "nothing_to_clean"),
            Outcome::Replied => write!(f, "replied"),
            Outcome::Reposted { original_deleted: true } => write!(f, "reposted"),
            Outcome::Reposted { original_deleted: false } => write!(f, "reposted_original_kept"),
            Outcome::SendFailed => write!(f, "send_failed"),
        }
    }
}

/// Result of the side-effect-free half of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    Skip(Outcome),
    Post(String),
}

/// Stateful message processor.
///
/// Owns the dedup gate and intro picker; reads per-chat delete mode through
/// the injected [`ChatModes`]. Shared across dispatcher tasks behind an `Arc`.
pub struct Scrubber {
    dedup: Mutex<DedupGate>,
    intros: IntroPicker,
    modes: Arc<dyn ChatModes>,
}

impl Scrubber {
    pub fn new(modes: Arc<dyn ChatModes>, intros: IntroPicker, dedup_capacity: usize) -> Self {
        Self {
            dedup: Mutex::new(DedupGate::new(dedup_capacity)),
            intros,
            modes,
        }
    }

    /// Decide what, if anything, to post for `msg`.
    ///
    /// The only state touched is the dedup gate.
    pub fn prepare(&self, msg: &IncomingMessage) -> Plan {
        let admitted = self
            .dedup
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .admit(msg.key());
        if !admitted {
            return Plan::Skip(Outcome::Duplicate);
        }

        if msg.author.as_ref().is_some_and(|a| a.is_bot) {
            return Plan::Skip(Outcome::Ignored(IgnoreReason::FromBot));
        }

        let text = match msg.text.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => return Plan::Skip(Outcome::Ignored(IgnoreReason::NoText)),
        };

        let urls = extract_urls(text, &msg.entities);
        if urls.is_empty() {
            return Plan::Skip(Outcome::Ignored(IgnoreReason::NoLinks));
        }

        let mapping = cleaned_mapping(&urls);
        let Some(rebuilt) = rebuild(text, &urls, &mapping) else {
            return Plan::Skip(Outcome::NothingToClean);
        };

        let author = attribution(msg.author.as_ref());
        Plan::Post(compose(self.intros.pick(), &author, &rebuilt.render()))
    }

    /// Run the full pipeline for `msg`, posting through `out`.
    pub async fn process(&self, msg: &IncomingMessage, out: &dyn Outbound) -> Outcome {
        let outcome = match self.prepare(msg) {
            Plan::Skip(outcome) => outcome,
            Plan::Post(text) => self.dispatch(msg, &text, out).await,
        };

        match outcome {
            Outcome::Replied | Outcome::Reposted { .. } => {
                info!(chat = %msg.chat, message = %msg.id, %outcome, "posted cleaned links");
            }
            Outcome::SendFailed => {}
            _ => debug!(chat = %msg.chat, message = %msg.id, %outcome, "message skipped"),
        }
        outcome
    }

    async fn dispatch(&self, msg: &IncomingMessage, text: &str, out: &dyn Outbound) -> Outcome {
        if self.modes.delete_original(msg.chat) {
            let original_deleted = match out.delete_message(msg.chat, msg.id).await {
                Ok(()) => true,
                Err(e) => {
                    warn!(chat = %msg.chat, message = %msg.id, error = %e, code = e.code(),
                        "could not delete original message, posting anyway");
                    false
                }
            };
            match out.send_text(msg.chat, text, None).await {
                Ok(()) => Outcome::Reposted { original_deleted },
                Err(e) => {
                    warn!(chat = %msg.chat, message = %msg.id, error = %e, code = e.code(),
                        "failed to post cleaned message");
                    Outcome::SendFailed
                }
            }
        } else {
            match out.send_text(msg.chat, text, Some(msg.id)).await {
                Ok(()) => Outcome::Replied,
                Err(e) => {
                    warn!(chat = %msg.chat, message = %msg.id, error = %e, code = e.code(),
                        "failed to reply with cleaned message");
                    Outcome::SendFailed
                }
            }
        }
    }
}
