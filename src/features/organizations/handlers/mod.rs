mod organization_handler;

pub use organization_handler::*;
