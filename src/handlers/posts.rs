use std::sync::Arc;

use axum::{
    extract::{FromRequest, Multipart, Path, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use serde_json::{from_str, Map, Value};

use crate::{
    services::post_validator::{
        sanitize_create, sanitize_update, validate_create, validate_update,
    },
    AppState, Error, Result,
};

pub fn posts_handler() -> Router {
    Router::new()
        .route("/", get(get_posts).post(create_post))
        .route("/categoria/{categoria}", get(get_posts_by_category))
        .route("/{id}", get(get_post).put(update_post).delete(delete_post))
}

async fn get_posts(Extension(app_state): Extension<Arc<AppState>>) -> Result<impl IntoResponse> {
    let posts = app_state.posts_service.get_posts().await?;
    Ok((StatusCode::OK, Json(posts)))
}

async fn get_post(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let post = app_state.posts_service.get_post(&id).await?;
    Ok((StatusCode::OK, Json(post)))
}

async fn get_posts_by_category(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(categoria): Path<String>,
) -> Result<impl IntoResponse> {
    let posts = app_state.posts_service.get_posts_by_category(&categoria).await?;
    Ok((StatusCode::OK, Json(posts)))
}

async fn create_post(
    Extension(app_state): Extension<Arc<AppState>>,
    req: Request,
) -> Result<impl IntoResponse> {
    let payload = extract_post_payload(&app_state, req).await?;
    let payload = normalize_payload(payload)?;

    let report = validate_create(&payload, app_state.config.body_policy);
    if !report.valid {
        return Err(Error::ValidationFailed(report.errors));
    }

    let record = sanitize_create(&payload);
    let post = app_state.posts_service.create_post(record).await?;

    Ok((StatusCode::CREATED, Json(post)))
}

async fn update_post(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
    req: Request,
) -> Result<impl IntoResponse> {
    let payload = extract_post_payload(&app_state, req).await?;
    let payload = normalize_payload(payload)?;

    let report = validate_update(&payload, app_state.config.body_policy);
    if !report.valid {
        return Err(Error::ValidationFailed(report.errors));
    }

    let record = sanitize_update(&payload);
    let post = app_state.posts_service.update_post(&id, record).await?;

    Ok((StatusCode::OK, Json(post)))
}

async fn delete_post(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    app_state.posts_service.delete_post(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// O mesmo endpoint aceita JSON puro e multipart/form-data com arquivo.
async fn extract_post_payload(app_state: &AppState, req: Request) -> Result<Value> {
    let is_multipart = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map_or(false, |ct| ct.starts_with("multipart/form-data"));

    if is_multipart {
        let multipart = Multipart::from_request(req, &())
            .await
            .map_err(|_| Error::BadRequest("Invalid multipart body".to_string()))?;
        return payload_from_multipart(app_state, multipart).await;
    }

    let Json(payload) = Json::<Value>::from_request(req, &())
        .await
        .map_err(|_| Error::BadRequest("Invalid JSON body".to_string()))?;

    if !payload.is_object() {
        return Err(Error::BadRequest("Request body must be a JSON object".to_string()));
    }

    Ok(payload)
}

async fn payload_from_multipart(app_state: &AppState, mut multipart: Multipart) -> Result<Value> {
    let mut fields = Map::new();
    let mut uploaded_image: Option<String> = None;
    let mut image_url: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| Error::BadRequest("Invalid multipart body".to_string()))?
    {
        let name = match field.name() {
            Some(name) => name.to_string(),
            None => continue,
        };

        if name == "image" && field.file_name().is_some() {
            let file_name = field.file_name().map(str::to_string);
            let content_type =
                field.content_type().unwrap_or("application/octet-stream").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|_| Error::BadRequest("Invalid multipart body".to_string()))?;

            // campo de arquivo vazio = sem arquivo
            if data.is_empty() {
                continue;
            }

            let saved = app_state
                .upload_service
                .save_image(file_name.as_deref(), &content_type, &data)
                .await?;
            uploaded_image = Some(saved.url);
            continue;
        }

        let text = field
            .text()
            .await
            .map_err(|_| Error::BadRequest("Invalid multipart body".to_string()))?;

        if name == "imageUrl" {
            image_url = Some(text);
        } else {
            fields.insert(name, Value::String(text));
        }
    }

    // Arquivo enviado vence imageUrl, que vence o campo image
    if let Some(url) = uploaded_image {
        fields.insert("image".to_string(), Value::String(url));
    } else if let Some(url) = image_url {
        if !url.trim().is_empty() {
            fields.insert("image".to_string(), Value::String(url));
        }
    }

    Ok(Value::Object(fields))
}

fn normalize_payload(mut payload: Value) -> Result<Value> {
    // tags pode chegar como JSON codificado em string ou lista com vírgulas
    let tags_string = payload.get("tags").and_then(Value::as_str).map(str::to_string);
    if let Some(raw) = tags_string {
        let parsed = from_str::<Value>(&raw).unwrap_or_else(|_| {
            Value::Array(
                raw.split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .map(|tag| Value::String(tag.to_string()))
                    .collect(),
            )
        });
        payload["tags"] = parsed;
    }

    let conteudo_string = payload.get("conteudo").and_then(Value::as_str).map(str::to_string);
    if let Some(raw) = conteudo_string {
        let parsed = from_str::<Value>(&raw)
            .map_err(|_| Error::BadRequest("conteudo deve ser um JSON válido".to_string()))?;
        payload["conteudo"] = parsed;
    }

    // `{ "blocks": [...] }` também é aceito como corpo
    let blocks = match payload.get("conteudo") {
        Some(Value::Object(obj)) => Some(
            obj.get("blocks")
                .and_then(Value::as_array)
                .cloned()
                .map(Value::Array)
                .unwrap_or_else(|| Value::Array(Vec::new())),
        ),
        _ => None,
    };
    if let Some(blocks) = blocks {
        payload["conteudo"] = blocks;
    }

    Ok(payload)
}
