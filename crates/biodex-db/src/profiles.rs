//! Profile repository (read-only).

use std::collections::HashMap;

use biodex_common::{Profile, ProfileName};
use uuid::Uuid;

use crate::error::Result;
use crate::rest::{BackendClient, TABLE_PROFILES};

#[derive(Clone)]
pub struct ProfileRepository {
    client: BackendClient,
}

impl ProfileRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// All profiles ordered by display name.
    pub async fn list(&self) -> Result<Vec<Profile>> {
        self.client
            .table(TABLE_PROFILES)
            .select("*")
            .order("display_name", true)
            .fetch()
            .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>> {
        self.client
            .table(TABLE_PROFILES)
            .select("*")
            .eq("id", id)
            .fetch_one()
            .await
    }

    /// Display names for a set of profiles, fetched in one request.
    pub async fn display_names(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let names: Vec<ProfileName> = self
            .client
            .table(TABLE_PROFILES)
            .select("id,display_name")
            .in_list("id", ids)
            .fetch()
            .await?;
        Ok(names.into_iter().map(|p| (p.id, p.display_name)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use biodex_test_utils::{profile, ALICE, BOB};
    use mockito::Matcher;

    #[tokio::test]
    async fn test_list_orders_by_display_name() {
        let mut server = mockito::Server::new_async().await;
        let body = serde_json::to_string(&vec![profile(ALICE, "Ada"), profile(BOB, "Bob")]).unwrap();
        let mock = server
            .mock("GET", "/rest/v1/profiles")
            .match_query(Matcher::UrlEncoded("order".into(), "display_name.asc".into()))
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let repo = ProfileRepository::new(BackendClient::new(server.url(), "anon"));
        let all = repo.list().await.unwrap();
        mock.assert_async().await;
        assert_eq!(all[0].display_name, "Ada");
        assert_eq!(all[0].email, "ada@example.org");
    }

    #[tokio::test]
    async fn test_no_ids_means_no_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let repo = ProfileRepository::new(BackendClient::new(server.url(), "anon"));
        assert!(repo.display_names(&[]).await.unwrap().is_empty());
        mock.assert_async().await;
    }
}
