//! Octopus Energy API Client Library
//!
//! This library provides a typed client for the Octopus Energy metering and
//! account REST API: authenticated lookups of electricity meter points and
//! accounts, decoded into a nested domain model.
//!
//! # Modules
//!
//! - `config`: Configuration management.
//! - `credentials`: API key storage and Basic auth header generation.
//! - `decode`: Response body decoding and serde helpers.
//! - `flexible_date`: Lenient date type for mixed date/timestamp fields.
//! - `models`: Meter point and account data models.
//! - `octopus_client`: Octopus API client.
//! - `transport`: HTTP transport abstraction.

pub mod config;
pub mod credentials;
pub mod decode;
pub mod flexible_date;
pub mod models;
pub mod octopus_client;
pub mod transport;

pub use credentials::Credentials;
pub use flexible_date::FlexibleDate;
pub use models::{
    Account, Agreement, ElectricityMeterPoint, Meter, MeterPoint, Property, PropertyId, Register,
};
pub use octopus_client::OctopusClient;
pub use transport::{Transport, TransportResponse};
