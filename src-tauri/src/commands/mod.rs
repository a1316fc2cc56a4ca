pub mod classifier;
pub mod service;
