use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::content::ContentBlock;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub image: String,
    pub date: DateTime<Utc>,
    pub reading_time: String,
    pub excerpt: String,
    #[serde(default)]
    pub conteudo: Vec<ContentBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

// Registro canônico produzido pelo sanitizador no create.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatePost {
    pub title: String,
    pub category: String,
    pub tags: Vec<String>,
    pub image: String,
    pub excerpt: String,
    pub conteudo: Vec<ContentBlock>,
    pub reading_time: Option<String>,
}

// Registro canônico do update: campo ausente = não mexer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdatePost {
    pub title: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub image: Option<String>,
    pub excerpt: Option<String>,
    pub conteudo: Option<Vec<ContentBlock>>,
    pub reading_time: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewPostRow {
    pub title: String,
    pub category: String,
    pub tags: Vec<String>,
    pub image: String,
    pub excerpt: String,
    pub conteudo: Vec<ContentBlock>,
    pub reading_time: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PostPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conteudo: Option<Vec<ContentBlock>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading_time: Option<String>,
}

impl PostPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.category.is_none()
            && self.tags.is_none()
            && self.image.is_none()
            && self.excerpt.is_none()
            && self.conteudo.is_none()
            && self.reading_time.is_none()
    }
}
