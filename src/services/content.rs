use serde_json::Value;

use crate::models::content::ContentBlock;

// Mesmas listas usadas pelo frontend.
pub const AVAILABLE_CATEGORIES: [&str; 4] =
    ["Programação", "Tecnologia", "Design", "Negócios"];

pub const AVAILABLE_BLOCK_KINDS: [&str; 6] =
    ["intro", "imagem", "titulo", "codigo", "conclusao", "paragrafo"];

const WORDS_PER_MINUTE: f64 = 200.0;
const CODE_WORD_WEIGHT: f64 = 0.5;
const DEFAULT_READING_TIME: &str = "5 min de leitura";

pub fn is_valid_category(category: &str) -> bool {
    AVAILABLE_CATEGORIES.contains(&category)
}

pub fn is_valid_block_kind(kind: &str) -> bool {
    AVAILABLE_BLOCK_KINDS.contains(&kind)
}

pub fn validate_block(block: &Value) -> bool {
    if !block.is_object() {
        return false;
    }

    let tipo = block.get("tipo").unwrap_or(&Value::Null);
    if tipo.is_null() || tipo.as_str().map_or(false, str::is_empty) {
        return false;
    }

    let content = match block.get("content") {
        Some(content) if !content.is_null() => content,
        _ => return false,
    };

    // tipo não-string cai no caso genérico
    match tipo.as_str().unwrap_or_default() {
        "imagem" => {
            content.get("src").map_or(false, Value::is_string)
                && content.get("alt").map_or(false, Value::is_string)
        }
        "titulo" => content.get("text").map_or(false, Value::is_string),
        "codigo" => match content.get("examples").and_then(Value::as_array) {
            Some(examples) => examples.iter().all(|example| {
                example.get("language").map_or(false, Value::is_string)
                    && example.get("code").map_or(false, Value::is_string)
            }),
            None => false,
        },
        _ => content.is_string(),
    }
}

pub fn validate_blocks(blocks: &[Value]) -> bool {
    blocks.iter().all(validate_block)
}

// Heurística de ~200 palavras por minuto; código conta metade.
pub fn estimate_reading_time(blocks: &[ContentBlock]) -> String {
    if blocks.is_empty() {
        return DEFAULT_READING_TIME.to_string();
    }

    let mut total_words = 0.0;
    for block in blocks {
        match block {
            ContentBlock::Intro(text)
            | ContentBlock::Paragraph(text)
            | ContentBlock::Conclusion(text) => {
                total_words += count_words(text) as f64;
            }
            ContentBlock::Title(title) => {
                total_words += count_words(&title.text) as f64;
            }
            ContentBlock::Code(code) => {
                for example in &code.examples {
                    total_words += count_words(&example.code) as f64 * CODE_WORD_WEIGHT;
                }
            }
            ContentBlock::Image(_) => {}
            ContentBlock::Other(value) => {
                if let Some(text) = value.get("content").and_then(Value::as_str) {
                    total_words += count_words(text) as f64;
                }
            }
        }
    }

    let minutes = (total_words / WORDS_PER_MINUTE).ceil().max(1.0) as u32;
    format!("{} min de leitura", minutes)
}

fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}
