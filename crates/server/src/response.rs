use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use skill_analysis::{AnalysisError, EvaluatorError, GuideError};

pub(crate) fn json_error_with_code(
    status: StatusCode,
    message: impl Into<String>,
    error_code: Option<&str>,
) -> Response {
    let mut body = serde_json::json!({
        "success": false,
        "error": message.into(),
    });
    if let Some(code) = error_code {
        body["error_code"] = serde_json::Value::String(code.to_string());
    }
    (status, Json(body)).into_response()
}

/// Status and error code for a failed analysis run.
pub(crate) fn analysis_error_status(err: &AnalysisError) -> (StatusCode, &'static str) {
    match err {
        AnalysisError::Pgn(_) | AnalysisError::NoGames => (StatusCode::BAD_REQUEST, "invalid_pgn"),
        AnalysisError::InvalidColor(_) => (StatusCode::BAD_REQUEST, "invalid_player_color"),
        AnalysisError::InsufficientData(_) => {
            (StatusCode::UNPROCESSABLE_ENTITY, "insufficient_data")
        }
        AnalysisError::Engine(EvaluatorError::Launch { .. }) => {
            (StatusCode::SERVICE_UNAVAILABLE, "engine_unavailable")
        }
        AnalysisError::Engine(_) => (StatusCode::BAD_GATEWAY, "engine_failed"),
        AnalysisError::Read { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
    }
}

pub(crate) fn analysis_error(err: &AnalysisError) -> Response {
    let (status, code) = analysis_error_status(err);
    json_error_with_code(status, err.to_string(), Some(code))
}

pub(crate) fn guide_error(err: &GuideError) -> Response {
    let code = match err {
        GuideError::MissingCategory => "missing_category",
        GuideError::UnknownCategory(_) => "unknown_category",
        GuideError::NotFound { .. } => "guide_not_found",
    };
    json_error_with_code(StatusCode::BAD_REQUEST, err.to_string(), Some(code))
}
