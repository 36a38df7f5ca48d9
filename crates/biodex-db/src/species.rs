//! Species repository.
//!
//! Provides CRUD operations for species records. Writes are only attempted
//! when the acting user is the record's author; the backend's row-level
//! security remains the final word.

use biodex_common::{NewSpecies, Species, SpeciesFields};
use uuid::Uuid;

use crate::error::{DbError, Result};
use crate::rest::{BackendClient, TABLE_SPECIES};

#[derive(Clone)]
pub struct SpeciesRepository {
    client: BackendClient,
}

impl SpeciesRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// All species, oldest first.
    pub async fn list(&self) -> Result<Vec<Species>> {
        self.client
            .table(TABLE_SPECIES)
            .select("*")
            .order("id", true)
            .fetch()
            .await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Species>> {
        self.client
            .table(TABLE_SPECIES)
            .select("*")
            .eq("id", id)
            .fetch_one()
            .await
    }

    pub async fn insert(&self, species: &NewSpecies) -> Result<Species> {
        let created: Species = self.client.table(TABLE_SPECIES).insert(species).await?;
        tracing::info!(id = created.id, name = %created.scientific_name, "species created");
        Ok(created)
    }

    /// Replace the editable fields of a species owned by `user`.
    pub async fn update(&self, id: i64, user: Uuid, fields: &SpeciesFields) -> Result<Species> {
        self.require_author(id, user).await?;

        let updated: Vec<Species> = self
            .client
            .table(TABLE_SPECIES)
            .eq("id", id)
            .eq("author", user)
            .update(fields)
            .await?;

        updated.into_iter().next().ok_or_else(|| {
            DbError::Forbidden(format!("Not allowed to edit species {}", id))
        })
    }

    /// Delete a species owned by `user`.
    pub async fn delete(&self, id: i64, user: Uuid) -> Result<Species> {
        self.require_author(id, user).await?;

        let removed: Vec<Species> = self
            .client
            .table(TABLE_SPECIES)
            .eq("id", id)
            .eq("author", user)
            .delete()
            .await?;

        let species = removed.into_iter().next().ok_or_else(|| {
            DbError::Forbidden(format!("Not allowed to delete species {}", id))
        })?;
        tracing::info!(id, name = %species.scientific_name, "species deleted");
        Ok(species)
    }

    async fn require_author(&self, id: i64, user: Uuid) -> Result<Species> {
        let species = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| DbError::NotFound(format!("species {}", id)))?;

        if !species.is_authored_by(user) {
            tracing::warn!(id, %user, author = %species.author, "species write refused: not the author");
            return Err(DbError::Forbidden(
                "Only the author of this species can change it".to_string(),
            ));
        }
        Ok(species)
    }
}
