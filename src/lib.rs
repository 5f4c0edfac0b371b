//! Decision rules for an agricultural insurance and assistance records platform.
//!
//! The crate holds the deterministic core of the system: damage compensation
//! formulas, farmer/insurance attribute matching, lazily-evaluated insurance
//! windows, and assistance eligibility gating. Persistence, HTTP routing, file
//! handling, and notifications live in the surrounding services; everything
//! here operates on already-loaded entities and returns structured results.

pub mod config;
pub mod domain;
pub mod rules;
pub mod services;
pub mod telemetry;
