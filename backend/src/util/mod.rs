pub mod bound;
pub mod error;
