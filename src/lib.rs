#![doc = "The `todoforge` library crate."]
#![doc = ""]
#![doc = "This crate contains the domain models, authentication and authorization"]
#![doc = "mechanisms, persistence layer, routing configuration, and error handling"]
#![doc = "for the to-do service. It is used by the main binary (`main.rs`) to"]
#![doc = "construct and run the application."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;
