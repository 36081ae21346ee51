pub mod builtin;
pub mod engine;
pub mod errors;
pub mod lifecycle;
