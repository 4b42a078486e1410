//! Server Module
//!
//! Initialization and configuration of the Axum HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Configuration and store loading
//! └── init.rs         - Server initialization and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `load_config` reads the environment
//! 2. **Store**: `load_database` opens the pool and applies migrations
//! 3. **State Creation**: token service and GitHub client are built once
//! 4. **Router Creation**: all routes and middleware are configured

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use state::AppState;
pub use init::{build_state, create_app, StartupError};
