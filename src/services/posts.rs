use std::sync::Arc;

use chrono::Utc;

use crate::{
    models::posts::{CreatePost, NewPostRow, Post, PostPatch, UpdatePost},
    repositories::posts_repo::PostsRepository,
    services::content::estimate_reading_time,
    Error, Result,
};

#[derive(Clone)]
pub struct PostsService {
    repo: Arc<dyn PostsRepository>,
}

impl PostsService {
    pub fn new(repo: Arc<dyn PostsRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_posts(&self) -> Result<Vec<Post>> {
        self.repo.get_posts().await
    }

    pub async fn get_post(&self, id: &str) -> Result<Post> {
        self.repo.get_post_by_id(id).await?.ok_or(Error::NotFound)
    }

    pub async fn get_posts_by_category(&self, category: &str) -> Result<Vec<Post>> {
        self.repo.get_posts_by_category(category).await
    }

    pub async fn create_post(&self, post: CreatePost) -> Result<Post> {
        let reading_time = post
            .reading_time
            .filter(|rt| !rt.is_empty())
            .unwrap_or_else(|| estimate_reading_time(&post.conteudo));

        let row = NewPostRow {
            title: post.title,
            category: post.category,
            tags: post.tags,
            image: post.image,
            excerpt: post.excerpt,
            conteudo: post.conteudo,
            reading_time,
            date: Utc::now(),
        };

        self.repo.insert_post(row).await?.ok_or(Error::Persistence)
    }

    pub async fn update_post(&self, id: &str, update: UpdatePost) -> Result<Post> {
        let mut patch = PostPatch {
            title: update.title,
            category: update.category,
            tags: update.tags,
            image: update.image,
            excerpt: update.excerpt,
            conteudo: update.conteudo,
            reading_time: update.reading_time,
        };

        // Corpo novo sem readingTime do cliente: recalcular
        if patch.reading_time.is_none() {
            if let Some(conteudo) = &patch.conteudo {
                patch.reading_time = Some(estimate_reading_time(conteudo));
            }
        }

        if patch.is_empty() {
            return self.get_post(id).await;
        }

        self.repo.patch_post(id, patch).await?.ok_or(Error::NotFound)
    }

    pub async fn delete_post(&self, id: &str) -> Result<()> {
        if !self.exists(id).await? {
            return Err(Error::NotFound);
        }
        self.repo.delete_post(id).await
    }

    pub async fn exists(&self, id: &str) -> Result<bool> {
        Ok(self.repo.get_post_by_id(id).await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::models::content::ContentBlock;

    #[derive(Default)]
    struct MockRepo {
        stored: Mutex<Vec<Post>>,
        inserted: Mutex<Vec<NewPostRow>>,
        patched: Mutex<Vec<(String, PostPatch)>>,
        deleted: Mutex<Vec<String>>,
        insert_returns_nothing: bool,
    }

    #[async_trait]
    impl PostsRepository for MockRepo {
        async fn get_posts(&self) -> Result<Vec<Post>> {
            Ok(self.stored.lock().unwrap().clone())
        }

        async fn get_post_by_id(&self, id: &str) -> Result<Option<Post>> {
            Ok(self.stored.lock().unwrap().iter().find(|p| p.id == id).cloned())
        }

        async fn get_posts_by_category(&self, category: &str) -> Result<Vec<Post>> {
            Ok(self
                .stored
                .lock()
                .unwrap()
                .iter()
                .filter(|p| p.category == category)
                .cloned()
                .collect())
        }

        async fn insert_post(&self, row: NewPostRow) -> Result<Option<Post>> {
            self.inserted.lock().unwrap().push(row.clone());
            if self.insert_returns_nothing {
                return Ok(None);
            }
            Ok(Some(Post {
                id: "novo".to_string(),
                title: row.title,
                category: row.category,
                tags: row.tags,
                image: row.image,
                date: row.date,
                reading_time: row.reading_time,
                excerpt: row.excerpt,
                conteudo: row.conteudo,
                created_at: None,
                updated_at: None,
            }))
        }

        async fn patch_post(&self, id: &str, patch: PostPatch) -> Result<Option<Post>> {
            self.patched.lock().unwrap().push((id.to_string(), patch));
            Ok(self.stored.lock().unwrap().iter().find(|p| p.id == id).cloned())
        }

        async fn delete_post(&self, id: &str) -> Result<()> {
            self.deleted.lock().unwrap().push(id.to_string());
            Ok(())
        }
    }

    fn sample_post(id: &str) -> Post {
        Post {
            id: id.to_string(),
            title: "Rust para backends".to_string(),
            category: "Programação".to_string(),
            tags: vec!["rust".to_string()],
            image: "https://cdn.exemplo.com/capa.png".to_string(),
            date: Utc::now(),
            reading_time: "4 min de leitura".to_string(),
            excerpt: "Resumo.".to_string(),
            conteudo: vec![ContentBlock::Intro("Olá".to_string())],
            created_at: None,
            updated_at: None,
        }
    }

    fn create_record(reading_time: Option<&str>) -> CreatePost {
        CreatePost {
            title: "Rust para backends".to_string(),
            category: "Programação".to_string(),
            tags: vec!["rust".to_string()],
            image: "https://cdn.exemplo.com/capa.png".to_string(),
            excerpt: "Resumo.".to_string(),
            conteudo: vec![ContentBlock::Paragraph("um dois três".to_string())],
            reading_time: reading_time.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_create_computes_reading_time_and_date() {
        let repo = Arc::new(MockRepo::default());
        let service = PostsService::new(repo.clone());

        let before = Utc::now();
        let post = service.create_post(create_record(None)).await.unwrap();
        let after = Utc::now();

        assert_eq!(post.reading_time, "1 min de leitura");
        let row = repo.inserted.lock().unwrap()[0].clone();
        assert_eq!(row.reading_time, "1 min de leitura");
        assert!(row.date >= before && row.date <= after);
    }

    #[tokio::test]
    async fn test_create_prefers_client_reading_time() {
        let repo = Arc::new(MockRepo::default());
        let service = PostsService::new(repo.clone());

        let post = service.create_post(create_record(Some("12 min de leitura"))).await.unwrap();

        assert_eq!(post.reading_time, "12 min de leitura");
    }

    #[tokio::test]
    async fn test_create_fails_when_store_returns_nothing() {
        let repo = Arc::new(MockRepo { insert_returns_nothing: true, ..Default::default() });
        let service = PostsService::new(repo);

        let result = service.create_post(create_record(None)).await;
        assert!(matches!(result, Err(Error::Persistence)));
    }

    #[tokio::test]
    async fn test_update_without_body_keeps_stored_reading_time() {
        let repo = Arc::new(MockRepo::default());
        repo.stored.lock().unwrap().push(sample_post("p1"));
        let service = PostsService::new(repo.clone());

        let update = UpdatePost { title: Some("Novo título".to_string()), ..Default::default() };
        service.update_post("p1", update).await.unwrap();

        let (_, patch) = repo.patched.lock().unwrap()[0].clone();
        assert_eq!(patch.title.as_deref(), Some("Novo título"));
        assert_eq!(patch.reading_time, None);
    }

    #[tokio::test]
    async fn test_update_with_body_recomputes_reading_time() {
        let repo = Arc::new(MockRepo::default());
        repo.stored.lock().unwrap().push(sample_post("p1"));
        let service = PostsService::new(repo.clone());

        let conteudo = vec![ContentBlock::Paragraph(vec!["palavra"; 450].join(" "))];
        let update = UpdatePost { conteudo: Some(conteudo), ..Default::default() };
        service.update_post("p1", update).await.unwrap();

        let (_, patch) = repo.patched.lock().unwrap()[0].clone();
        assert_eq!(patch.reading_time.as_deref(), Some("3 min de leitura"));
    }

    #[tokio::test]
    async fn test_update_keeps_client_reading_time() {
        let repo = Arc::new(MockRepo::default());
        repo.stored.lock().unwrap().push(sample_post("p1"));
        let service = PostsService::new(repo.clone());

        let update = UpdatePost {
            conteudo: Some(vec![ContentBlock::Intro("Olá".to_string())]),
            reading_time: Some("9 min de leitura".to_string()),
            ..Default::default()
        };
        service.update_post("p1", update).await.unwrap();

        let (_, patch) = repo.patched.lock().unwrap()[0].clone();
        assert_eq!(patch.reading_time.as_deref(), Some("9 min de leitura"));
    }

    #[tokio::test]
    async fn test_empty_update_is_a_plain_read() {
        let repo = Arc::new(MockRepo::default());
        repo.stored.lock().unwrap().push(sample_post("p1"));
        let service = PostsService::new(repo.clone());

        let post = service.update_post("p1", UpdatePost::default()).await.unwrap();

        assert_eq!(post.id, "p1");
        assert!(repo.patched.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let repo = Arc::new(MockRepo::default());
        let service = PostsService::new(repo);

        let update = UpdatePost { title: Some("x".to_string()), ..Default::default() };
        let result = service.update_post("inexistente", update).await;
        assert!(matches!(result, Err(Error::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_checks_existence_first() {
        let repo = Arc::new(MockRepo::default());
        let service = PostsService::new(repo.clone());

        let result = service.delete_post("inexistente").await;
        assert!(matches!(result, Err(Error::NotFound)));
        assert!(repo.deleted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_existing_post() {
        let repo = Arc::new(MockRepo::default());
        repo.stored.lock().unwrap().push(sample_post("p1"));
        let service = PostsService::new(repo.clone());

        service.delete_post("p1").await.unwrap();

        assert_eq!(*repo.deleted.lock().unwrap(), vec!["p1".to_string()]);
    }

    #[tokio::test]
    async fn test_get_post_unknown_id_is_not_found() {
        let repo = Arc::new(MockRepo::default());
        let service = PostsService::new(repo);

        assert!(matches!(service.get_post("nada").await, Err(Error::NotFound)));
    }

    #[tokio::test]
    async fn test_exists() {
        let repo = Arc::new(MockRepo::default());
        repo.stored.lock().unwrap().push(sample_post("p1"));
        let service = PostsService::new(repo);

        assert!(service.exists("p1").await.unwrap());
        assert!(!service.exists("p2").await.unwrap());
    }
}
