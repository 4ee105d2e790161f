//! HTTP REST API interfaces
//!
//! - `common`: response wrapper, error mapping, validated JSON extractor
//! - `modules`: per-resource DTOs and handlers, plus cross-cutting middleware
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::{api_routes, create_api_router, ApiDoc};
