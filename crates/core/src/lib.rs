//! Core business logic for Shelf.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `budget` - Monthly periods, domain records, spend aggregation, and rollover planning
//! - `auth` - Password hashing for stored credentials

pub mod auth;
pub mod budget;
