pub mod boq;
pub mod budgets;
pub mod earthwork;
pub mod structures;
