//! biodex-common — Shared types, errors, and validation used across all Biodex crates.

pub mod error;
pub mod entities;
pub mod validation;
pub mod search;

// Re-export commonly used types
pub use entities::{
    Kingdom, Species, SpeciesFields, NewSpecies, Profile, ProfileName,
    Comment, NewComment, CommentWithAuthor,
};
pub use error::ApiError;
pub use validation::{SpeciesForm, FieldError};
pub use search::filter_species;
