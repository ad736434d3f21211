//! Analysis features
//!
//! Leaves first: recursion analysis feeds recurrence solving, case analysis
//! is consulted per loop, cost analysis orchestrates, pattern
//! classification runs last.

pub mod case_analysis;
pub mod cost_analysis;
pub mod pattern_classification;
pub mod recurrence;
pub mod recursion_analysis;
