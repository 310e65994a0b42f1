pub mod errors;
pub mod memory;
