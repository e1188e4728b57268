use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chess_core::read_games;
use serde::{Deserialize, Serialize};
use skill_analysis::{parse_player_color, resolve_guide, run_analysis, AnalysisReport};
use uuid::Uuid;

use crate::response::{analysis_error, guide_error, json_error_with_code};
use crate::store::{UploadSummary, UploadedFile};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub(crate) struct UploadQuery {
    player_color: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GuideQuery {
    category: Option<String>,
}

#[derive(Serialize)]
struct UploadResponse {
    success: bool,
    upload: UploadSummary,
    games: usize,
}

#[derive(Serialize)]
struct AnalysisResponse {
    success: bool,
    upload_id: Uuid,
    #[serde(flatten)]
    report: AnalysisReport,
}

/// Returns `(error_message, error_code)` on failure.
pub(crate) fn validate_upload_size(
    size: usize,
    max_upload_bytes: usize,
) -> Result<(), (String, &'static str)> {
    if size == 0 {
        return Err(("upload is empty".to_string(), "upload_empty"));
    }
    if size > max_upload_bytes {
        return Err((
            format!("upload too large: {size} bytes (max {max_upload_bytes})"),
            "upload_too_large",
        ));
    }
    Ok(())
}

pub(crate) async fn health(State(state): State<AppState>) -> Response {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "skill-server",
        "uploads": state.uploads.count().await,
        "max_upload_bytes": state.max_upload_bytes,
    }))
    .into_response()
}

/// Accepts a raw PGN body. The file is parsed up front so that malformed
/// uploads are rejected before anything is stored.
pub(crate) async fn upload_pgn(
    State(state): State<AppState>,
    Query(query): Query<UploadQuery>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return json_error_with_code(
                StatusCode::BAD_REQUEST,
                format!("upload too large (max {} bytes)", state.max_upload_bytes),
                Some("upload_too_large"),
            );
        }
        Err(rejection) => {
            return json_error_with_code(
                StatusCode::BAD_REQUEST,
                rejection.body_text(),
                Some("invalid_body"),
            );
        }
    };
    if let Err((msg, code)) = validate_upload_size(body.len(), state.max_upload_bytes) {
        return json_error_with_code(StatusCode::BAD_REQUEST, msg, Some(code));
    }

    let color = query.player_color.as_deref().unwrap_or("white");
    let player_color = match parse_player_color(color) {
        Ok(color) => color,
        Err(err) => {
            return json_error_with_code(
                StatusCode::BAD_REQUEST,
                err.to_string(),
                Some("invalid_player_color"),
            );
        }
    };

    let Ok(text) = std::str::from_utf8(&body) else {
        return json_error_with_code(
            StatusCode::BAD_REQUEST,
            "upload is not valid UTF-8 text",
            Some("invalid_encoding"),
        );
    };
    let games = match read_games(text) {
        Ok(games) if games.is_empty() => {
            return json_error_with_code(
                StatusCode::BAD_REQUEST,
                "upload contains no games",
                Some("no_games"),
            );
        }
        Ok(games) => games.len(),
        Err(err) => {
            return json_error_with_code(
                StatusCode::BAD_REQUEST,
                format!("invalid PGN: {err}"),
                Some("invalid_pgn"),
            );
        }
    };

    match state.uploads.save(text, player_color).await {
        Ok(upload) => (
            StatusCode::CREATED,
            Json(UploadResponse {
                success: true,
                upload: UploadSummary::from(&upload),
                games,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to store upload: {e}");
            json_error_with_code(
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to store upload",
                Some("internal_error"),
            )
        }
    }
}

pub(crate) async fn latest_analysis(State(state): State<AppState>) -> Response {
    match state.uploads.latest().await {
        Some(upload) => analyze_upload(state, upload).await,
        None => json_error_with_code(
            StatusCode::NOT_FOUND,
            "no games have been uploaded yet",
            Some("no_uploads"),
        ),
    }
}

pub(crate) async fn upload_analysis(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Response {
    match find_upload(&state, path).await {
        Ok(upload) => analyze_upload(state, upload).await,
        Err(response) => response,
    }
}

pub(crate) async fn download_guide(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    Query(query): Query<GuideQuery>,
) -> Response {
    if let Err(response) = find_upload(&state, path).await {
        return response;
    }

    let (category, guide_path) =
        match resolve_guide(&state.guides_dir, query.category.as_deref()) {
            Ok(found) => found,
            Err(err) => return guide_error(&err),
        };

    match tokio::fs::read(&guide_path).await {
        Ok(bytes) => {
            let file_name = guide_path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            tracing::info!(%category, file = %file_name, "serving guide");
            (
                [
                    (header::CONTENT_TYPE, "application/pdf".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{file_name}\""),
                    ),
                ],
                bytes,
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(path = %guide_path.display(), "failed to read guide: {e}");
            json_error_with_code(
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to read guide",
                Some("internal_error"),
            )
        }
    }
}

async fn find_upload(
    state: &AppState,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<UploadedFile, Response> {
    let Ok(Path(id)) = path else {
        return Err(json_error_with_code(
            StatusCode::BAD_REQUEST,
            "upload id must be a UUID",
            Some("invalid_upload_id"),
        ));
    };
    state.uploads.get(id).await.ok_or_else(|| {
        json_error_with_code(
            StatusCode::NOT_FOUND,
            format!("upload not found: {id}"),
            Some("upload_not_found"),
        )
    })
}

/// Runs the blocking engine analysis off the async workers.
async fn analyze_upload(state: AppState, upload: UploadedFile) -> Response {
    let text = match state.uploads.read_pgn(&upload).await {
        Ok(text) => text,
        Err(e) => {
            tracing::error!(upload_id = %upload.id, "failed to read upload: {e}");
            return json_error_with_code(
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to read upload",
                Some("internal_error"),
            );
        }
    };

    let launcher = state.launcher.clone();
    let thresholds = state.thresholds;
    let side = upload.player_color;
    let result =
        tokio::task::spawn_blocking(move || run_analysis(&text, side, &thresholds, launcher.as_ref()))
            .await;

    match result {
        Ok(Ok(report)) => Json(AnalysisResponse {
            success: true,
            upload_id: upload.id,
            report,
        })
        .into_response(),
        Ok(Err(err)) => {
            tracing::warn!(upload_id = %upload.id, "analysis failed: {err}");
            analysis_error(&err)
        }
        Err(err) => {
            tracing::error!(upload_id = %upload.id, "analysis worker failure: {err}");
            json_error_with_code(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("analysis worker failure: {err}"),
                Some("internal_error"),
            )
        }
    }
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod handlers_tests;
