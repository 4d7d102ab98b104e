use std::io;
use std::path::PathBuf;

use axum::extract::multipart::Field;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use futures::TryStreamExt;
use serde::Serialize;
use uuid::Uuid;

use crate::application::ports::UploadStore;
use crate::application::services::LipSyncError;
use crate::domain::{
    GuidanceScale, InferenceParams, InferenceSteps, MediaKind, ParamError, Seed, UploadPath,
};
use crate::infrastructure::observability::RequestId;
use crate::presentation::state::AppState;
use crate::presentation::ui::{
    AUDIO_FIELD, GUIDANCE_SCALE_FIELD, INFERENCE_STEPS_FIELD, SEED_FIELD, VIDEO_FIELD,
};

#[derive(Serialize)]
pub struct ProcessResponse {
    pub output_path: String,
    pub video_url: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}

/// Fields collected from one multipart submission.
#[derive(Default)]
struct Submission {
    video: Option<UploadPath>,
    audio: Option<UploadPath>,
    guidance_scale: Option<GuidanceScale>,
    inference_steps: Option<InferenceSteps>,
    seed: Option<Seed>,
}

impl Submission {
    fn uploads(&self) -> impl Iterator<Item = &UploadPath> {
        self.video.iter().chain(self.audio.iter())
    }
}

#[tracing::instrument(skip_all, fields(request_id = %request_id.0))]
pub async fn process_handler(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    multipart: Multipart,
) -> Response {
    // Each submission gets its own upload directory, whatever x-request-id the client sent.
    let upload_id = Uuid::new_v4();
    tracing::debug!(upload_id = %upload_id, "Accepting submission");
    let mut submission = Submission::default();

    let response = match read_submission(&state, upload_id, multipart, &mut submission).await {
        Ok(()) => run(&state, &submission).await,
        Err(response) => response,
    };

    for path in submission.uploads() {
        discard(&state, path).await;
    }

    response
}

async fn discard(state: &AppState, path: &UploadPath) {
    if let Err(e) = state.upload_store.delete(path).await {
        tracing::warn!(error = %e, path = %path, "Failed to delete upload");
    }
}

/// Keeps the latest upload for a field; an earlier one stored under another key is deleted.
async fn replace_upload(state: &AppState, slot: &mut Option<UploadPath>, path: UploadPath) {
    if let Some(previous) = slot.replace(path) {
        if slot.as_ref() != Some(&previous) {
            discard(state, &previous).await;
        }
    }
}

async fn run(state: &AppState, submission: &Submission) -> Response {
    let (Some(video), Some(audio)) = (&submission.video, &submission.audio) else {
        let missing = if submission.video.is_none() {
            VIDEO_FIELD
        } else {
            AUDIO_FIELD
        };
        tracing::warn!(field = missing, "Submission missing file");
        return error_response(
            StatusCode::BAD_REQUEST,
            format!("No {} file uploaded", missing),
        );
    };

    let params = InferenceParams::new(
        submission.guidance_scale.unwrap_or_default(),
        submission.inference_steps.unwrap_or_default(),
        submission.seed.unwrap_or(state.default_seed),
    );

    let (video_path, audio_path) = match (
        state.upload_store.local_path(video),
        state.upload_store.local_path(audio),
    ) {
        (Ok(video_path), Ok(audio_path)) => (video_path, audio_path),
        (Err(e), _) | (_, Err(e)) => {
            tracing::error!(error = %e, "Failed to resolve upload");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
        }
    };

    match state
        .lipsync_service
        .process_video(&video_path, &audio_path, params)
        .await
    {
        Ok(output) => (StatusCode::OK, Json(to_response(output))).into_response(),
        Err(e @ LipSyncError::MissingInput(_)) => {
            error_response(StatusCode::BAD_REQUEST, e.to_string())
        }
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

fn to_response(output: PathBuf) -> ProcessResponse {
    let file_name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    ProcessResponse {
        output_path: output.to_string_lossy().into_owned(),
        video_url: format!("/outputs/{}", file_name),
    }
}

async fn read_submission(
    state: &AppState,
    upload_id: Uuid,
    mut multipart: Multipart,
    submission: &mut Submission,
) -> Result<(), Response> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => return Ok(()),
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return Err(error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Failed to read multipart: {}", e),
                ));
            }
        };

        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            VIDEO_FIELD => {
                let path = store_upload(state, upload_id, field, MediaKind::Video).await?;
                replace_upload(state, &mut submission.video, path).await;
            }
            AUDIO_FIELD => {
                let path = store_upload(state, upload_id, field, MediaKind::Audio).await?;
                replace_upload(state, &mut submission.audio, path).await;
            }
            GUIDANCE_SCALE_FIELD => {
                submission.guidance_scale = Some(parse_text(field).await?);
            }
            INFERENCE_STEPS_FIELD => {
                submission.inference_steps = Some(parse_text(field).await?);
            }
            SEED_FIELD => {
                submission.seed = Some(parse_text(field).await?);
            }
            other => {
                tracing::debug!(field = %other, "Ignoring unknown multipart field");
            }
        }
    }
}

async fn parse_text<T>(field: Field<'_>) -> Result<T, Response>
where
    T: std::str::FromStr<Err = ParamError>,
{
    let text = field.text().await.map_err(|e| {
        error_response(
            StatusCode::BAD_REQUEST,
            format!("Failed to read field: {}", e),
        )
    })?;
    text.parse().map_err(|e: ParamError| {
        tracing::warn!(error = %e, "Invalid parameter");
        error_response(StatusCode::BAD_REQUEST, e.to_string())
    })
}

async fn store_upload(
    state: &AppState,
    upload_id: Uuid,
    field: Field<'_>,
    expected: MediaKind,
) -> Result<UploadPath, Response> {
    let file_name = field.file_name().unwrap_or_default().to_string();
    let content_type = field.content_type().map(str::to_string);

    if file_name.is_empty() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            format!("No {} file uploaded", expected.as_str()),
        ));
    }

    match MediaKind::detect(content_type.as_deref(), &file_name) {
        Some(kind) if kind == expected => {}
        _ => {
            tracing::warn!(
                filename = %file_name,
                content_type = ?content_type,
                expected = expected.as_str(),
                "Unsupported media upload"
            );
            return Err(error_response(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                format!(
                    "Unsupported {} file: {} ({})",
                    expected.as_str(),
                    file_name,
                    content_type.as_deref().unwrap_or("unknown type")
                ),
            ));
        }
    }

    let path = UploadPath::new(upload_id, expected, &file_name);
    let stream = Box::pin(field.map_err(io::Error::other));

    match state.upload_store.store(&path, stream).await {
        Ok(bytes) => {
            tracing::debug!(path = %path, bytes, "Upload received");
            Ok(path)
        }
        Err(e) => {
            tracing::error!(error = %e, path = %path, "Failed to store upload");
            if let Err(del) = state.upload_store.delete(&path).await {
                tracing::debug!(error = %del, "Nothing to clean up after failed upload");
            }
            Err(error_response(
                StatusCode::BAD_REQUEST,
                format!("Failed to store {} upload: {}", expected.as_str(), e),
            ))
        }
    }
}
