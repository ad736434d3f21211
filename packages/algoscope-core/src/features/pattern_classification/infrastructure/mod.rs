//! Infrastructure layer for pattern classification

pub mod classifier;

pub use classifier::PatternClassifier;
