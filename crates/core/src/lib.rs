//! Quantity takeoff domain logic.
//!
//! Everything in this crate is pure: the structural element calculators,
//! the earthwork calculator, the BOQ unit converter and the budget reminder
//! date arithmetic. Persistence lives in `takeoff-db`, HTTP in `takeoff-api`.

pub mod boq;
pub mod budget;
pub mod earthwork;
pub mod error;
pub mod structural;
pub mod types;
pub mod units;
pub mod validation;
