//! Core business rules for Contas.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `account` - Payable/receivable kinds, the monthly creation limit,
//!   settlement and the monthly expense report

pub mod account;
