//! Comment repository.
//!
//! Comments hang off a species. Listing resolves author names with a single
//! batched profile lookup; deletion is only attempted by the comment's author.

use std::collections::{HashMap, HashSet};

use biodex_common::entities::UNKNOWN_AUTHOR;
use biodex_common::{Comment, CommentWithAuthor, NewComment};
use uuid::Uuid;

use crate::error::{DbError, Result};
use crate::profiles::ProfileRepository;
use crate::rest::{BackendClient, TABLE_COMMENTS};

#[derive(Clone)]
pub struct CommentRepository {
    client: BackendClient,
}

impl CommentRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// Comments on a species, newest first, with author names attached.
    pub async fn list_for_species(&self, species_id: i64) -> Result<Vec<CommentWithAuthor>> {
        let comments: Vec<Comment> = self
            .client
            .table(TABLE_COMMENTS)
            .select("*")
            .eq("species_id", species_id)
            .order("created_at", false)
            .fetch()
            .await?;

        if comments.is_empty() {
            return Ok(Vec::new());
        }

        let mut seen = HashSet::new();
        let author_ids: Vec<Uuid> = comments
            .iter()
            .map(|c| c.author)
            .filter(|id| seen.insert(*id))
            .collect();

        let names = ProfileRepository::new(self.client.clone())
            .display_names(&author_ids)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(species_id, error = %e, "author lookup failed, showing comments without names");
                HashMap::new()
            });

        Ok(comments
            .into_iter()
            .map(|comment| {
                let author_display_name = names
                    .get(&comment.author)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());
                CommentWithAuthor { comment, author_display_name }
            })
            .collect())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>> {
        self.client
            .table(TABLE_COMMENTS)
            .select("*")
            .eq("id", id)
            .fetch_one()
            .await
    }

    pub async fn insert(&self, comment: &NewComment) -> Result<Comment> {
        let created: Comment = self.client.table(TABLE_COMMENTS).insert(comment).await?;
        tracing::info!(id = %created.id, species_id = created.species_id, "comment posted");
        Ok(created)
    }

    /// Delete a comment written by `user`. Anyone else gets `Forbidden` and
    /// nothing is sent to the backend.
    pub async fn delete(&self, id: Uuid, user: Uuid) -> Result<()> {
        let comment = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| DbError::NotFound(format!("comment {}", id)))?;

        if comment.author != user {
            tracing::warn!(%id, %user, author = %comment.author, "comment delete refused: not the author");
            return Err(DbError::Forbidden(
                "Only the author of this comment can delete it".to_string(),
            ));
        }

        let removed: Vec<Comment> = self
            .client
            .table(TABLE_COMMENTS)
            .eq("id", id)
            .eq("author", user)
            .delete()
            .await?;

        if removed.is_empty() {
            return Err(DbError::Forbidden(format!("Not allowed to delete comment {}", id)));
        }
        tracing::info!(%id, "comment deleted");
        Ok(())
    }
}
