//! Donation recommendations.
//!
//! A recommendation is built from a region's severity and loss figures plus
//! the organizations active there, answered by an external completion
//! service and strictly validated. Nothing is stored.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/regions/{id}/recommendation` | Recommendation for a region |

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{PgContextSource, RecommendationService};
