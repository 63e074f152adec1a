//! User directory.
//!
//! Users are identified by their token subject. Records hold display data
//! shown next to donations and in donor rankings.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/me` | Current user, upserted from token claims |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::UserService;
