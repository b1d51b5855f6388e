use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde_json::from_str;
use tracing::error;

use crate::{
    models::posts::{NewPostRow, Post, PostPatch},
    Error, Result,
};

use super::SupabaseRepo;

#[async_trait]
pub trait PostsRepository: Sync + Send {
    async fn get_posts(&self) -> Result<Vec<Post>>;
    async fn get_post_by_id(&self, id: &str) -> Result<Option<Post>>;
    async fn get_posts_by_category(&self, category: &str) -> Result<Vec<Post>>;
    async fn insert_post(&self, row: NewPostRow) -> Result<Option<Post>>;
    async fn patch_post(&self, id: &str, patch: PostPatch) -> Result<Option<Post>>;
    async fn delete_post(&self, id: &str) -> Result<()>;
}

#[async_trait]
impl PostsRepository for SupabaseRepo {
    async fn get_posts(&self) -> Result<Vec<Post>> {
        let request = self
            .request(Method::GET, "/posts")
            .query(&[("select", "*"), ("order", "date.desc")]);

        fetch_rows(request).await
    }

    async fn get_post_by_id(&self, id: &str) -> Result<Option<Post>> {
        let request = self
            .request(Method::GET, "/posts")
            .query(&[("select", "*".to_string()), ("id", format!("eq.{}", id))]);

        let rows = fetch_rows(request).await?;
        Ok(rows.into_iter().next())
    }

    async fn get_posts_by_category(&self, category: &str) -> Result<Vec<Post>> {
        let request = self.request(Method::GET, "/posts").query(&[
            ("select", "*".to_string()),
            ("category", format!("eq.{}", category)),
            ("order", "date.desc".to_string()),
        ]);

        fetch_rows(request).await
    }

    async fn insert_post(&self, row: NewPostRow) -> Result<Option<Post>> {
        // Prefer: return=representation faz o PostgREST devolver a linha criada
        let request = self.request(Method::POST, "/posts").json(&row);

        let rows = fetch_rows(request).await?;
        Ok(rows.into_iter().next())
    }

    async fn patch_post(&self, id: &str, patch: PostPatch) -> Result<Option<Post>> {
        let request = self
            .request(Method::PATCH, "/posts")
            .query(&[("id", format!("eq.{}", id))])
            .json(&patch);

        // Zero linhas alteradas = id desconhecido
        let rows = fetch_rows(request).await?;
        Ok(rows.into_iter().next())
    }

    async fn delete_post(&self, id: &str) -> Result<()> {
        let response = self
            .request(Method::DELETE, "/posts")
            .query(&[("id", format!("eq.{}", id))])
            .send()
            .await?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            let body = response.text().await.unwrap_or_default();
            error!("Supabase delete failed with status {}: {}", status, body);
            return Err(Error::Upstream { status, body });
        }

        Ok(())
    }
}

async fn fetch_rows(request: RequestBuilder) -> Result<Vec<Post>> {
    let response = request.send().await?;
    let status = response.status().as_u16();
    let body = response.text().await?;

    rows_from_response(status, &body)
}

fn rows_from_response(status: u16, body: &str) -> Result<Vec<Post>> {
    if !(200..300).contains(&status) {
        error!("Supabase returned status {}: {}", status, body);
        return Err(Error::Upstream { status, body: body.to_string() });
    }

    from_str(body).map_err(|err| {
        error!("Failed to decode Supabase rows: {:?}", err);
        Error::Persistence
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_from_success_response() {
        let body = r#"[{
            "id": "p1",
            "title": "Primeiro post",
            "category": "Programação",
            "tags": ["rust"],
            "image": "/uploads/capa.png",
            "date": "2025-02-10T14:30:00Z",
            "reading_time": "3 min de leitura",
            "excerpt": "resumo",
            "conteudo": [{ "tipo": "intro", "content": "olá" }]
        }]"#;

        let rows = rows_from_response(200, body).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "p1");
    }

    #[test]
    fn test_rows_from_empty_response() {
        assert!(rows_from_response(200, "[]").unwrap().is_empty());
    }

    #[test]
    fn test_error_status_carries_body() {
        let result = rows_from_response(409, r#"{"message":"duplicate key"}"#);

        match result {
            Err(Error::Upstream { status, body }) => {
                assert_eq!(status, 409);
                assert!(body.contains("duplicate key"));
            }
            other => panic!("expected upstream error, got {:?}", other),
        }
    }

    #[test]
    fn test_undecodable_success_body() {
        let result = rows_from_response(201, "não é json");
        assert!(matches!(result, Err(Error::Persistence)));
    }
}
