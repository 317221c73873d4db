//! Floodgate - Dual-Window Admission Control
//!
//! This crate implements the request-admission gate for an expensive
//! downstream operation. Each client is tracked against two independent
//! fixed-window counters (per-minute and per-hour); a request is admitted
//! only when both windows still have quota. The calling layer derives the
//! client identifier (typically the request's source address) and translates
//! a denied result into its own "too many requests" signal.

pub mod config;
pub mod error;
pub mod ratelimit;
