#![deny(missing_docs)]
//! The chain editing session.
//!
//! Glue between the chain model and the collaborator boundaries:
//! applies edits, keeps the single open-connector pointer, drives the
//! connector state machine, runs transform tests and code generation
//! against the simulation backend, mirrors every mutation into the
//! draft slot, and turns a finished chain into a publishable
//! composite agent.
//!
//! Single-threaded by construction: one session, one `&mut self` at a
//! time. Backend calls suspend the initiating action; they never race
//! each other within a session because only one connector can be open.

mod publish;
mod session;

pub use publish::{can_publish, DEFAULT_CREDITS_PER_RUN};
pub use session::{ChainSession, EditorError};
