//! Configuration for the Nexus API, loaded from environment variables.
//!
//! - [`database`]: PostgreSQL connection pool initialization
//! - [`jwt`]: JWT authentication configuration
//! - [`cors`]: CORS allowed origins
//! - [`media`]: storage root for uploaded files

pub mod cors;
pub mod database;
pub mod jwt;
pub mod media;
