//! Core processing building blocks: regime classification, box finders,
//! crop geometry, resize, pipeline, and save helpers. These are internal
//! primitives consumed by the high-level `api` module.
pub mod params;
pub mod processing;
