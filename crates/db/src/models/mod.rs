//! Row structs, client-facing records and request DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - The `Serialize` record handed to clients (camelCase)
//! - The insert / update DTOs

pub mod budget;
pub mod calculation;
pub mod earthwork;
