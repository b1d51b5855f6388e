use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleContent {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(rename = "iconColor", skip_serializing_if = "Option::is_none")]
    pub icon_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageContent {
    pub src: String,
    pub alt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<i64>,
    #[serde(rename = "className", skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeExample {
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub examples: Vec<CodeExample>,
}

// Bloco de conteúdo no formato `{"tipo": ..., "content": ...}`. Tipos
// desconhecidos ou com payload fora do esperado não são rejeitados:
// ficam em `Other` exatamente como chegaram.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    Intro(String),
    Paragraph(String),
    Conclusion(String),
    Title(TitleContent),
    Image(ImageContent),
    Code(CodeContent),
    Other(Value),
}

impl ContentBlock {
    pub fn from_value(value: Value) -> ContentBlock {
        let tipo = match value.get("tipo").and_then(Value::as_str) {
            Some(tipo) => tipo.to_owned(),
            None => return ContentBlock::Other(value),
        };
        let content = match value.get("content") {
            Some(content) => content.clone(),
            None => return ContentBlock::Other(value),
        };

        match (tipo.as_str(), content) {
            ("intro", Value::String(text)) => ContentBlock::Intro(text),
            ("paragrafo", Value::String(text)) => ContentBlock::Paragraph(text),
            ("conclusao", Value::String(text)) => ContentBlock::Conclusion(text),
            ("titulo", content) => match serde_json::from_value(content) {
                Ok(title) => ContentBlock::Title(title),
                Err(_) => ContentBlock::Other(value),
            },
            ("imagem", content) => match serde_json::from_value(content) {
                Ok(image) => ContentBlock::Image(image),
                Err(_) => ContentBlock::Other(value),
            },
            ("codigo", content) => match serde_json::from_value(content) {
                Ok(code) => ContentBlock::Code(code),
                Err(_) => ContentBlock::Other(value),
            },
            _ => ContentBlock::Other(value),
        }
    }
}

#[derive(Serialize)]
struct TaggedContent<'a, T> {
    tipo: &'static str,
    content: &'a T,
}

impl Serialize for ContentBlock {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ContentBlock::Intro(text) => TaggedContent {
                tipo: "intro",
                content: text,
            }
            .serialize(serializer),
            ContentBlock::Paragraph(text) => TaggedContent {
                tipo: "paragrafo",
                content: text,
            }
            .serialize(serializer),
            ContentBlock::Conclusion(text) => TaggedContent {
                tipo: "conclusao",
                content: text,
            }
            .serialize(serializer),
            ContentBlock::Title(title) => TaggedContent {
                tipo: "titulo",
                content: title,
            }
            .serialize(serializer),
            ContentBlock::Image(image) => TaggedContent {
                tipo: "imagem",
                content: image,
            }
            .serialize(serializer),
            ContentBlock::Code(code) => TaggedContent {
                tipo: "codigo",
                content: code,
            }
            .serialize(serializer),
            ContentBlock::Other(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for ContentBlock {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(ContentBlock::from_value(value))
    }
}
