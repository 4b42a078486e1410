//! Route Configuration Module
//!
//! - **`router`** - Main router creation and route assembly
//! - **`api_routes`** - Public and protected `/api` route tables

/// Main router creation
pub mod router;

/// API route tables
pub mod api_routes;

pub use router::create_router;
