//! biodex-web — web front end for the Biodex species catalogue.
//! Serves:
//!   - Species catalogue with search, add/edit/delete and comments
//!   - Registered users directory
//!   - Species chatbot backed by a generative-language API
//!   - Animal speed chart
//!   - Wikipedia autofill for the add-species form

pub mod router;
pub mod handlers;
pub mod state;
pub mod session;
pub mod pages;
pub mod wikipedia;
