//! The repayment simulation: accrual, driver loop, sampling and reports.

pub mod accrual;
pub mod comparison;
pub mod driver;
pub mod generator;
pub mod timeline;
