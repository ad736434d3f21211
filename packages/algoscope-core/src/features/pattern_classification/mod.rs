//! Pattern Classification
//!
//! Names the classical algorithm a recursive procedure implements
//! (binary search, merge sort, Fibonacci, ...) from its recursion shape and
//! solved recurrence. Best-effort metadata: a failed classification never
//! affects the complexity result.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ Domain Layer                            │
//! │  - AlgorithmPattern                     │
//! │  - PatternClassification                │
//! └─────────────────────────────────────────┘
//!                   ▲
//!                   │
//! ┌─────────────────────────────────────────┐
//! │ Infrastructure Layer                    │
//! │  - PatternClassifier (ordered table)    │
//! └─────────────────────────────────────────┘
//! ```

pub mod domain;
pub mod infrastructure;

pub use domain::{AlgorithmPattern, PatternClassification};
pub use infrastructure::PatternClassifier;
