//! Payroll Simulation Engine for the Justiça Militar da União
//!
//! This crate simulates the monthly paycheck of federal judiciary employees:
//! base salary and bonuses from period-adjusted tables, progressive
//! social-security and income tax withholding, day-prorated allowances and
//! the month-dependent vacation and 13th-salary branches.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
