/// Default page size for cursor pagination
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: usize = 100;

/// Number of donors returned by the top donors ranking when no limit is given
pub const DEFAULT_TOP_DONORS_LIMIT: usize = 5;

/// Display name used when an individual's region does not resolve
pub const UNKNOWN_REGION_NAME: &str = "Unknown Region";

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Admin role - can verify organizations and edit region figures
pub const ROLE_ADMIN: &str = "admin";
