use serde_json::Value;

use crate::config::BodyPolicy;
use crate::models::content::ContentBlock;
use crate::models::posts::{CreatePost, UpdatePost};
use crate::services::content::{is_valid_category, validate_blocks};

const TITLE_MAX_CHARS: usize = 200;
const IMAGE_MAX_CHARS: usize = 500;
const EXCERPT_MAX_CHARS: usize = 500;
const TAGS_MAX: usize = 20;

#[derive(Debug)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

// null e ausente são tratados da mesma forma
fn field<'a>(payload: &'a Value, name: &str) -> Option<&'a Value> {
    match payload.get(name) {
        Some(Value::Null) | None => None,
        Some(value) => Some(value),
    }
}

pub fn validate_create(payload: &Value, policy: BodyPolicy) -> ValidationReport {
    let mut errors = Vec::new();

    match field(payload, "title").and_then(Value::as_str) {
        None | Some("") => errors.push("title é obrigatório e deve ser string".to_string()),
        Some(title) if title.trim().is_empty() => {
            errors.push("title não pode estar vazio".to_string())
        }
        Some(title) if title.chars().count() > TITLE_MAX_CHARS => {
            errors.push("title não pode ter mais de 200 caracteres".to_string())
        }
        Some(_) => {}
    }

    match field(payload, "category").and_then(Value::as_str) {
        None | Some("") => errors.push("category é obrigatória e deve ser string".to_string()),
        Some(category) if !is_valid_category(category) => {
            errors.push("category deve ser uma das opções válidas".to_string())
        }
        Some(_) => {}
    }

    if let Some(tags) = field(payload, "tags") {
        match tags.as_array() {
            None => errors.push("tags deve ser um array".to_string()),
            Some(tags) if tags.len() > TAGS_MAX => {
                errors.push("tags não pode ter mais de 20 itens".to_string())
            }
            Some(tags) if !tags.iter().all(Value::is_string) => {
                errors.push("todas as tags devem ser strings".to_string())
            }
            Some(_) => {}
        }
    }

    match field(payload, "image").and_then(Value::as_str) {
        Some(image) if !image.trim().is_empty() => {
            if image.chars().count() > IMAGE_MAX_CHARS {
                errors.push("URL da image não pode ter mais de 500 caracteres".to_string());
            }
        }
        _ => errors.push("image é obrigatória (URL ou arquivo)".to_string()),
    }

    match field(payload, "excerpt").and_then(Value::as_str) {
        None | Some("") => errors.push("excerpt é obrigatória e deve ser string".to_string()),
        Some(excerpt) if excerpt.trim().is_empty() => {
            errors.push("excerpt não pode estar vazia".to_string())
        }
        Some(excerpt) if excerpt.chars().count() > EXCERPT_MAX_CHARS => {
            errors.push("excerpt não pode ter mais de 500 caracteres".to_string())
        }
        Some(_) => {}
    }

    match field(payload, "conteudo") {
        None => errors.push("conteudo é obrigatório".to_string()),
        Some(conteudo) => match conteudo.as_array() {
            None => errors.push("conteudo deve ser um array".to_string()),
            Some(blocks) if blocks.is_empty() => {
                errors.push("conteudo deve ter pelo menos um bloco".to_string())
            }
            Some(blocks) => {
                if policy == BodyPolicy::Strict && !validate_blocks(blocks) {
                    errors.push("alguns blocos de conteudo são inválidos".to_string());
                }
            }
        },
    }

    if let Some(reading_time) = field(payload, "readingTime") {
        if !reading_time.is_string() {
            errors.push("readingTime deve ser string".to_string());
        }
    }

    ValidationReport { valid: errors.is_empty(), errors }
}

pub fn validate_update(payload: &Value, policy: BodyPolicy) -> ValidationReport {
    let mut errors = Vec::new();

    if let Some(title) = field(payload, "title") {
        match title.as_str() {
            None => errors.push("title deve ser string".to_string()),
            Some(title) if title.trim().is_empty() => {
                errors.push("title não pode estar vazio".to_string())
            }
            Some(title) if title.chars().count() > TITLE_MAX_CHARS => {
                errors.push("title não pode ter mais de 200 caracteres".to_string())
            }
            Some(_) => {}
        }
    }

    if let Some(category) = field(payload, "category") {
        match category.as_str() {
            None => errors.push("category deve ser string".to_string()),
            Some(category) if !is_valid_category(category) => {
                errors.push("category deve ser uma das opções válidas".to_string())
            }
            Some(_) => {}
        }
    }

    if let Some(tags) = field(payload, "tags") {
        match tags.as_array() {
            None => errors.push("tags deve ser um array".to_string()),
            Some(tags) if tags.len() > TAGS_MAX => {
                errors.push("tags não pode ter mais de 20 itens".to_string())
            }
            Some(tags) if !tags.iter().all(Value::is_string) => {
                errors.push("todas as tags devem ser strings".to_string())
            }
            Some(_) => {}
        }
    }

    if let Some(image) = field(payload, "image") {
        match image.as_str() {
            None => errors.push("image deve ser string".to_string()),
            Some(image) if image.trim().is_empty() => {
                errors.push("image não pode estar vazia".to_string())
            }
            Some(image) if image.chars().count() > IMAGE_MAX_CHARS => {
                errors.push("URL da image não pode ter mais de 500 caracteres".to_string())
            }
            Some(_) => {}
        }
    }

    if let Some(excerpt) = field(payload, "excerpt") {
        match excerpt.as_str() {
            None => errors.push("excerpt deve ser string".to_string()),
            Some(excerpt) if excerpt.trim().is_empty() => {
                errors.push("excerpt não pode estar vazia".to_string())
            }
            Some(excerpt) if excerpt.chars().count() > EXCERPT_MAX_CHARS => {
                errors.push("excerpt não pode ter mais de 500 caracteres".to_string())
            }
            Some(_) => {}
        }
    }

    if let Some(conteudo) = field(payload, "conteudo") {
        match conteudo.as_array() {
            None => errors.push("conteudo deve ser um array".to_string()),
            Some(blocks) if blocks.is_empty() => {
                errors.push("conteudo deve ter pelo menos um bloco".to_string())
            }
            Some(blocks) => {
                if policy == BodyPolicy::Strict && !validate_blocks(blocks) {
                    errors.push("alguns blocos de conteudo são inválidos".to_string());
                }
            }
        }
    }

    if let Some(reading_time) = field(payload, "readingTime") {
        if !reading_time.is_string() {
            errors.push("readingTime deve ser string".to_string());
        }
    }

    ValidationReport { valid: errors.is_empty(), errors }
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

fn sanitize_text(value: Option<&Value>, max: usize) -> String {
    truncate_chars(value.and_then(Value::as_str).unwrap_or_default().trim(), max)
}

fn sanitize_tags(value: Option<&Value>) -> Vec<String> {
    match value.and_then(Value::as_array) {
        Some(tags) => tags
            .iter()
            .map(|tag| tag.as_str().unwrap_or_default().trim().to_string())
            .take(TAGS_MAX)
            .collect(),
        None => Vec::new(),
    }
}

fn sanitize_blocks(value: Option<&Value>) -> Vec<ContentBlock> {
    match value.and_then(Value::as_array) {
        Some(blocks) => blocks.iter().cloned().map(ContentBlock::from_value).collect(),
        None => Vec::new(),
    }
}

fn sanitize_reading_time(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|rt| !rt.is_empty())
        .map(str::to_string)
}

pub fn sanitize_create(payload: &Value) -> CreatePost {
    CreatePost {
        title: sanitize_text(field(payload, "title"), TITLE_MAX_CHARS),
        // category já foi conferida contra o catálogo, entra como está
        category: field(payload, "category")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        tags: sanitize_tags(field(payload, "tags")),
        image: sanitize_text(field(payload, "image"), IMAGE_MAX_CHARS),
        excerpt: sanitize_text(field(payload, "excerpt"), EXCERPT_MAX_CHARS),
        conteudo: sanitize_blocks(field(payload, "conteudo")),
        reading_time: sanitize_reading_time(field(payload, "readingTime")),
    }
}

pub fn sanitize_update(payload: &Value) -> UpdatePost {
    UpdatePost {
        title: field(payload, "title").map(|title| sanitize_text(Some(title), TITLE_MAX_CHARS)),
        category: field(payload, "category")
            .map(|category| category.as_str().unwrap_or_default().to_string()),
        tags: field(payload, "tags").map(|tags| sanitize_tags(Some(tags))),
        image: field(payload, "image").map(|image| sanitize_text(Some(image), IMAGE_MAX_CHARS)),
        excerpt: field(payload, "excerpt")
            .map(|excerpt| sanitize_text(Some(excerpt), EXCERPT_MAX_CHARS)),
        conteudo: field(payload, "conteudo").map(|conteudo| sanitize_blocks(Some(conteudo))),
        reading_time: sanitize_reading_time(field(payload, "readingTime")),
    }
}
