//! # quiz-core
//!
//! Core types shared across the quiz crates.
//!
//! This crate provides:
//! - Entity structs for categories, questions, and answers, plus the nested
//!   read projections returned to HTTP clients
//! - Slug derivation from category titles
//! - Field validation and identifier parsing
//! - The ingestion report envelope

pub mod entities;
pub mod errors;
pub mod responses;
pub mod slug;
pub mod validate;
