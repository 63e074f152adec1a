mod individual_dto;

pub use individual_dto::*;
