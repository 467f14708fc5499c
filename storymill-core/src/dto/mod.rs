//! Data Transfer Objects for the book service API
//!
//! This module contains the wire-format bodies exchanged with the book
//! service. DTOs carry statuses as plain strings so that a server
//! rollout introducing a new lifecycle state never breaks
//! deserialization; conversion into domain types happens afterwards.

pub mod book;
