mod macros;

pub mod error;
pub mod logger;
pub mod validation;
