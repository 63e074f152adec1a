//! Aid organizations.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/organizations` | List, optionally verified-only or by name |
//! | POST | `/api/organizations` | Register an organization (unverified) |
//! | GET | `/api/organizations/{id}` | Get organization |
//! | PATCH | `/api/organizations/{id}` | Partial update |
//! | GET | `/api/organizations/{id}/stats` | Donation statistics |
//! | PUT | `/api/organizations/{id}/verification` | Set verification (admin) |
//! | GET | `/api/regions/{id}/organizations` | Organizations in a region |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::OrganizationService;
