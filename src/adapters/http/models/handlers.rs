//! HTTP handlers for the model server.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    extract::{Path, Request, State},
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use tower::ServiceExt;
use tower_http::services::ServeFile;

use super::dto::MessageResponse;
use super::listing::render_listing;
use crate::adapters::http::middleware::{ApiKeyPresented, ApiKeyRejection, RequireApiKey};
use crate::application::{
    ArtifactView, BrowseArtifactsHandler, BrowseArtifactsQuery, UploadArtifactCommand,
    UploadArtifactHandler,
};
use crate::domain::artifacts::ArtifactError;

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ModelHandlers {
    browse_handler: Arc<BrowseArtifactsHandler>,
    upload_handler: Arc<UploadArtifactHandler>,
}

impl ModelHandlers {
    pub fn new(
        browse_handler: Arc<BrowseArtifactsHandler>,
        upload_handler: Arc<UploadArtifactHandler>,
    ) -> Self {
        Self {
            browse_handler,
            upload_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET / - Listing of the models directory (API key required)
pub async fn browse_root(
    State(handlers): State<ModelHandlers>,
    ApiKeyPresented(authorized): ApiKeyPresented,
    request: Request,
) -> Response {
    browse(handlers, String::new(), authorized, request).await
}

/// GET /*path - Download a file or list a directory; `@latest` selects the
/// most recently modified entry
pub async fn browse_path(
    State(handlers): State<ModelHandlers>,
    ApiKeyPresented(authorized): ApiKeyPresented,
    Path(path): Path<String>,
    request: Request,
) -> Response {
    browse(handlers, path, authorized, request).await
}

async fn browse(handlers: ModelHandlers, path: String, authorized: bool, request: Request) -> Response {
    let query = BrowseArtifactsQuery {
        path: path.clone(),
        authorized,
    };

    match handlers.browse_handler.handle(query).await {
        Ok(ArtifactView::Download { path, filename }) => serve_download(path, &filename, request).await,
        Ok(ArtifactView::Listing {
            rel_path,
            parent_path,
            entries,
        }) => Html(render_listing(&rel_path, parent_path.as_deref(), &entries)).into_response(),
        Err(e) => {
            tracing::info!(path = %path, error = %e, "Model request refused");
            handle_artifact_error(e)
        }
    }
}

/// Streams the file and marks it as an attachment.
async fn serve_download(path: PathBuf, filename: &str, request: Request) -> Response {
    let response = match ServeFile::new(&path).oneshot(request).await {
        Ok(response) => response.map(Body::new),
        Err(never) => match never {},
    };

    let mut response = response.into_response();
    if response.status().is_success() {
        let disposition = format!("attachment; filename=\"{}\"", filename.replace('"', ""));
        if let Ok(value) = HeaderValue::from_str(&disposition) {
            response
                .headers_mut()
                .insert(header::CONTENT_DISPOSITION, value);
        }
        tracing::info!(file = %path.display(), "Serving model");
    }
    response
}

/// POST /upload/:filename - Store the raw request body (API key required)
pub async fn upload(
    State(handlers): State<ModelHandlers>,
    _key: RequireApiKey,
    Path(filename): Path<String>,
    body: Bytes,
) -> Response {
    let cmd = UploadArtifactCommand {
        filename,
        bytes: body.to_vec(),
    };

    match handlers.upload_handler.handle(cmd).await {
        Ok(_) => (StatusCode::CREATED, Json(MessageResponse::uploaded())).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Upload rejected");
            handle_artifact_error(e)
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_artifact_error(error: ArtifactError) -> Response {
    match error {
        ArtifactError::NotFound(_) => (StatusCode::NOT_FOUND, "Not Found").into_response(),
        ArtifactError::NoArtifacts(_) => (StatusCode::NOT_FOUND, "No Models Found").into_response(),
        ArtifactError::NotAllowed(_) => {
            (StatusCode::BAD_REQUEST, Json(MessageResponse::not_allowed())).into_response()
        }
        ArtifactError::Unauthorized => ApiKeyRejection.into_response(),
        ArtifactError::Io(msg) => {
            tracing::error!(error = %msg, "Model storage failure");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let response = handle_artifact_error(ArtifactError::NotFound("x".to_string()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn not_allowed_maps_to_400() {
        let response = handle_artifact_error(ArtifactError::NotAllowed("m.exe".to_string()));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unauthorized_maps_to_401() {
        let response = handle_artifact_error(ArtifactError::Unauthorized);
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn io_maps_to_500() {
        let response = handle_artifact_error(ArtifactError::io("disk full"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
