//! Authentication Module
//!
//! User registration, login and token handling.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model and store operations
//! ├── sessions.rs     - Token issuing and verification
//! ├── password.rs     - bcrypt hashing
//! └── handlers/       - HTTP handlers
//!     ├── types.rs    - Request/response types
//!     ├── signup.rs   - Registration handler
//!     ├── login.rs    - Login handler
//!     └── me.rs       - Current user handler
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: name, email and password → user created → token returned
//! 2. **Login**: email and password → credentials checked → token returned
//! 3. **Protected routes**: `x-auth-token` header → verified by middleware
//!
//! Tokens carry `{ user: { id } }` and are signed HS256 with the server
//! secret. There is no revocation; a token is good until it expires.

/// User data model and store operations
pub mod users;

/// Token generation and validation
pub mod sessions;

/// Password hashing
pub mod password;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{get_me, login, register};
pub use sessions::{AuthError, TokenService};
