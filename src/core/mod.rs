pub mod boundary;
pub mod classifier;
pub mod engine;
pub mod highlight;
pub mod types;
