//! Maintenance Hub client library
//!
//! Typed records and CRUD services for a maintenance/asset management REST
//! API, document pricing, budget assembly trees, and a generic data table
//! used by list screens and the command line.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod client;
pub mod config;
pub mod errors;
pub mod logging;
pub mod mock;
pub mod models;
pub mod services;
pub mod table;
pub mod views;

pub use client::{ApiClient, CrudApi, Resource, ResourceKind, ResourceService};
pub use errors::ServiceError;
