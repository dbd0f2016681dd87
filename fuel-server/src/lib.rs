//! Gas station directory server.
//!
//! An HTTP API for recording fuel stations and the prices reported
//! at them, backed by a document store.

pub mod config;
pub mod domain;
pub mod store;
pub mod web;
