//! Business rules computed on the client from fetched records.

pub mod assembly;
pub mod maintenance;
pub mod pricing;
