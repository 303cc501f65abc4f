//! Duration engine for part-time vocational training in Germany.
//!
//! This crate calculates the duration of a part-time vocational training
//! under § 7a and § 8 BBiG: shortening reasons are applied to the base
//! duration, the result is extended in proportion to the part-time share,
//! capped at 1.5 times the base and rounded down to whole months, and small
//! extensions are disregarded. An axum API exposes the calculation over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
