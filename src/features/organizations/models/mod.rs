mod organization;

pub use organization::{Organization, OrganizationStats, TypeTotal};
