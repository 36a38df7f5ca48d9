//! Biodex hosted backend layer
//!
//! This crate talks to the hosted backend-as-a-service that owns persistence,
//! authentication and row-level security. It provides a small PostgREST-style
//! table client plus one repository per table.
//!
//! # Example
//!
//! ```rust,no_run
//! use biodex_db::{BackendClient, SpeciesRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BackendClient::new("https://project.supabase.co", "anon-key");
//!     let species = SpeciesRepository::new(client).list().await?;
//!     println!("{} species", species.len());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod rest;
pub mod auth;
pub mod species;
pub mod profiles;
pub mod comments;

pub use auth::AuthUser;
pub use comments::CommentRepository;
pub use error::{DbError, Result};
pub use profiles::ProfileRepository;
pub use rest::{BackendClient, TableQuery, TABLE_COMMENTS, TABLE_PROFILES, TABLE_SPECIES};
pub use species::SpeciesRepository;
