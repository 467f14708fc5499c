//! Core domain types
//!
//! This module contains the domain structures shared by the Storymill
//! client and CLI. These types represent the book lifecycle as the
//! client observes it, independent of the wire format.

pub mod book;
