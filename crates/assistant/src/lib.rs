//! `marketlens-assistant`
//!
//! **Responsibility:** deterministic natural-language answers over the
//! derived facts.
//!
//! This is not a language model: questions are classified by an ordered
//! list of keyword rules and answered from templates. The router holds no
//! conversation state; the transcript is an explicit, caller-owned log.

pub mod chat;
pub mod router;

pub use chat::{ChatLog, ChatTurn};
pub use router::{Answer, FALLBACK_ANSWER, Intent, Router};
