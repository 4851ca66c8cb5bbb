//! Repayment prioritization.

pub mod selector;
