//! # IO Module
//!
//! The interface layer between callers and the domain services. The only
//! transport is a local JSON-over-HTTP API (see [`rest`]); handlers translate
//! requests into service calls and domain errors into status codes, and hold
//! no business logic of their own.

pub mod rest;

pub use rest::*;
