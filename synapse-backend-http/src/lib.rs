#![deny(missing_docs)]
//! HTTPS JSON client for the synapse backend.
//!
//! Implements link0's [`link0::AgentCatalog`] against the catalog
//! contracts (`GET team`, `GET agent/{id}`, `POST agents`) and
//! [`link0::SimulationBackend`] against the environment-resolution and
//! code-generation contracts under `context/simulation/chain/`.
//!
//! No client-side timeout or cancellation: the editor relies on these
//! calls being read-only and idempotent, discarding superseded
//! responses instead of cancelling them.

mod catalog;
mod client;
mod error;
mod simulation;
mod types;

pub use client::SynapseBackend;
