//! Storymill Core
//!
//! Core types shared across the Storymill client crates.
//!
//! This crate contains:
//! - Domain types: book lifecycle snapshots and phase handling
//! - DTOs: wire-format bodies for the book service API

pub mod domain;
pub mod dto;
