use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder};

use crate::config::Config;

pub mod posts_repo;

#[derive(Clone)]
pub struct SupabaseRepo {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SupabaseRepo {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            base_url: format!("{}/rest/v1", config.supabase_url.trim_end_matches('/')),
            api_key: config.supabase_anon_key.clone(),
        }
    }

    // Todas as chamadas PostgREST levam os mesmos headers de autenticação.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .header("apikey", &self.api_key)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header("Prefer", "return=representation")
    }
}
