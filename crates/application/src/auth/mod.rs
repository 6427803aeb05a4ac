//! Authorization for the network-access layer.
//!
//! This module provides:
//! - The coordinator that attaches bearer tokens and recovers from 401s
//! - Single-flight renewal waves shared by every rejected request
//! - An in-memory credential store

mod coordinator;
mod token_store;
mod wave;

pub use coordinator::AuthCoordinator;
pub use token_store::TokenStore;
