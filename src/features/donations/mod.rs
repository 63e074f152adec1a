//! Donations feature.
//!
//! Donations are immutable once recorded. Totals, donor rankings and
//! date-range statistics are pure reducers in [`models`] applied to the
//! fetched rows.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/me/donations` | Caller's donations |
//! | GET | `/api/users/{user_id}/donations` | A user's donations |
//! | GET | `/api/regions/{id}/donations` | Donations to a region |
//! | GET | `/api/regions/{id}/donations/stats` | Region totals by type |
//! | GET | `/api/regions/{id}/donations/top-donors` | Largest donors |
//! | GET | `/api/donations/stats` | Totals within a time window |
//! | GET | `/api/donations/recent` | Paginated newest donations |
//! | POST | `/api/donations` | Record a donation |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::DonationService;
