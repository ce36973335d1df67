//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod budget_repo;
pub mod calculation_repo;
pub mod earthwork_repo;

pub use budget_repo::BudgetRepo;
pub use calculation_repo::CalculationRepo;
pub use earthwork_repo::EarthworkRepo;
