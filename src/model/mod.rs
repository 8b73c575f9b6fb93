//! Pretrained win classifier
//!
//! Loads the exported logistic model artifact and runs inference.

pub mod classifier;

pub use classifier::Classifier;
