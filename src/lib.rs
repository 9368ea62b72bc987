//! Core library for the Inkpress category engine.
//!
//! This crate owns the hierarchical category tree of the Inkpress publishing
//! platform: a bounded-depth taxonomy persisted as a flat list, with
//! structural mutations (create, update, move, delete) that keep depth,
//! acyclicity and uniqueness invariants intact, and aggregate queries that
//! annotate categories with post counts. HTTP routing, authentication and
//! rendering live in the consuming application; they talk to this crate
//! through the service functions in [`services::categories`].

pub mod activity;
pub mod cache;
pub mod db;
pub mod domain;
pub mod dto;
pub mod error_conversions;
pub mod forms;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod schema;
pub mod services;
