//! Single-user task management service: an in-memory task repository
//! with validation, a pure filter/paginate query engine, and a JSON
//! HTTP surface.

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;
