//! Axum route handlers for the screening API.

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::pipeline::extract::extract_pdf_text;
use crate::pipeline::runner::{process_resumes, RunMode, RunParams, RunSummary, UploadedResume};
use crate::presets::{self, JobProfile};
use crate::runs::RunOutcome;
use crate::state::AppState;

const DEFAULT_BEST_THRESHOLD: f64 = 0.8;
const DEFAULT_GOOD_THRESHOLD: f64 = 0.6;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CreateRunResponse {
    pub run_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct RunStatusResponse {
    pub run_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub status: String,
    pub progress: f32,
    pub processing: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<RunSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExtractTextResponse {
    pub text: String,
}

/// Everything the upload form can carry. Text fields left empty fall back to
/// the preset (when one is named), matching the original tool's form logic.
#[derive(Default)]
struct NewRunForm {
    resumes: Vec<UploadedResume>,
    mode: Option<String>,
    job_preset: Option<String>,
    job_description: Option<String>,
    job_description_pdf: Option<bytes::Bytes>,
    high_fit_resume: Option<String>,
    high_fit_resume_pdf: Option<bytes::Bytes>,
    low_fit_resume: Option<String>,
    low_fit_resume_pdf: Option<bytes::Bytes>,
    best_threshold: Option<f64>,
    good_threshold: Option<f64>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/jobs
///
/// Names of the built-in job presets a run can start from.
pub async fn handle_list_jobs() -> Json<serde_json::Value> {
    Json(json!({ "jobs": presets::PRESET_NAMES }))
}

/// POST /api/v1/extract-text
///
/// Standalone extraction endpoint: one `pdf` multipart field in, plain text
/// out. Also what the run form uses internally for PDF job descriptions.
pub async fn handle_extract_text(
    mut multipart: Multipart,
) -> Result<Json<ExtractTextResponse>, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        if field.name() == Some("pdf") {
            let bytes = field.bytes().await.map_err(bad_multipart)?;
            let text = extract_pdf_text(&bytes)?;
            return Ok(Json(ExtractTextResponse { text }));
        }
    }
    Err(AppError::Validation(
        "expected a 'pdf' form field".to_string(),
    ))
}

/// POST /api/v1/runs
///
/// Accepts the batch upload, validates the form, and spawns the screening run
/// in the background. Poll `GET /api/v1/runs/:id` for progress.
pub async fn handle_create_run(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<CreateRunResponse>), AppError> {
    let form = read_form(&mut multipart).await?;

    if form.resumes.is_empty() {
        return Err(AppError::Validation(
            "upload at least one resume in the 'resumes' field".to_string(),
        ));
    }

    let mode = parse_mode(&form)?;
    let profile = resolve_profile(&form)?;
    let model = match mode {
        RunMode::Score { .. } => state.config.scoring_model.clone(),
        RunMode::Questions => state.config.questions_model.clone(),
    };
    let params = RunParams { mode, model };

    let handle = state.runs.create().await;
    info!(run_id = %handle.id, resumes = form.resumes.len(), "starting screening run");

    let analyzer = state.analyzer.clone();
    let task_handle = handle.clone();
    let resumes = form.resumes;
    tokio::spawn(async move {
        let ctx = task_handle.ctx.clone();
        ctx.set_processing(true).await;
        ctx.set_status("Starting the process...").await;

        let result = process_resumes(analyzer.as_ref(), &ctx, &resumes, &profile, &params).await;

        let mut outcome = task_handle.outcome.write().await;
        match result {
            Ok(output) => {
                if !output.summary.stopped {
                    ctx.set_status("Process completed. Download the scores below.")
                        .await;
                }
                *outcome = RunOutcome::Finished {
                    archive: output.archive.into(),
                    summary: output.summary,
                };
            }
            Err(e) => {
                error!(run_id = %task_handle.id, error = %e, "screening run failed");
                ctx.set_status(format!("Run failed: {e}")).await;
                *outcome = RunOutcome::Failed {
                    error: e.to_string(),
                };
            }
        }
        ctx.set_processing(false).await;
    });

    Ok((
        StatusCode::ACCEPTED,
        Json(CreateRunResponse { run_id: handle.id }),
    ))
}

/// GET /api/v1/runs/:id
pub async fn handle_run_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RunStatusResponse>, AppError> {
    let handle = state
        .runs
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("run {id} not found")))?;

    let progress = handle.ctx.snapshot().await;
    let (summary, error) = match &*handle.outcome.read().await {
        RunOutcome::Pending => (None, None),
        RunOutcome::Finished { summary, .. } => (Some(summary.clone()), None),
        RunOutcome::Failed { error } => (None, Some(error.clone())),
    };

    Ok(Json(RunStatusResponse {
        run_id: handle.id,
        created_at: handle.created_at,
        status: progress.status,
        progress: progress.progress,
        processing: progress.processing,
        summary,
        error,
    }))
}

/// POST /api/v1/runs/:id/stop
///
/// Raises the cooperative stop flag. The run halts before its next resume;
/// whatever was already processed stays downloadable.
pub async fn handle_stop_run(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let handle = state
        .runs
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("run {id} not found")))?;

    if handle.ctx.snapshot().await.processing {
        handle.ctx.set_status("Stopping the process...").await;
    }
    handle.ctx.request_stop();
    info!(run_id = %id, "stop requested");

    Ok(StatusCode::ACCEPTED)
}

/// GET /api/v1/runs/:id/archive
pub async fn handle_download_archive(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let handle = state
        .runs
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("run {id} not found")))?;

    let outcome = handle.outcome.read().await;
    match &*outcome {
        RunOutcome::Finished { archive, .. } => Ok((
            [
                (header::CONTENT_TYPE, "application/zip".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"scores.zip\"".to_string(),
                ),
            ],
            archive.clone(),
        )),
        RunOutcome::Pending => Err(AppError::NotFound(format!(
            "run {id} is still processing; no archive yet"
        ))),
        RunOutcome::Failed { error } => Err(AppError::NotFound(format!(
            "run {id} produced no archive: {error}"
        ))),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Form parsing
// ────────────────────────────────────────────────────────────────────────────

async fn read_form(multipart: &mut Multipart) -> Result<NewRunForm, AppError> {
    let mut form = NewRunForm::default();

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "resumes" => {
                let filename = field.file_name().unwrap_or("resume.pdf").to_string();
                let bytes = field.bytes().await.map_err(bad_multipart)?;
                form.resumes.push(UploadedResume { filename, bytes });
            }
            "mode" => form.mode = non_empty(field.text().await.map_err(bad_multipart)?),
            "job_preset" => form.job_preset = non_empty(field.text().await.map_err(bad_multipart)?),
            "job_description" => {
                form.job_description = non_empty(field.text().await.map_err(bad_multipart)?)
            }
            "job_description_pdf" => {
                form.job_description_pdf = Some(field.bytes().await.map_err(bad_multipart)?)
            }
            "high_fit_resume" => {
                form.high_fit_resume = non_empty(field.text().await.map_err(bad_multipart)?)
            }
            "high_fit_resume_pdf" => {
                form.high_fit_resume_pdf = Some(field.bytes().await.map_err(bad_multipart)?)
            }
            "low_fit_resume" => {
                form.low_fit_resume = non_empty(field.text().await.map_err(bad_multipart)?)
            }
            "low_fit_resume_pdf" => {
                form.low_fit_resume_pdf = Some(field.bytes().await.map_err(bad_multipart)?)
            }
            "best_threshold" => {
                form.best_threshold =
                    Some(parse_threshold(&name, field.text().await.map_err(bad_multipart)?)?)
            }
            "good_threshold" => {
                form.good_threshold =
                    Some(parse_threshold(&name, field.text().await.map_err(bad_multipart)?)?)
            }
            other => debug!(field = other, "ignoring unknown form field"),
        }
    }

    Ok(form)
}

fn parse_mode(form: &NewRunForm) -> Result<RunMode, AppError> {
    match form.mode.as_deref().unwrap_or("score") {
        "score" => Ok(RunMode::Score {
            best_threshold: form.best_threshold.unwrap_or(DEFAULT_BEST_THRESHOLD),
            good_threshold: form.good_threshold.unwrap_or(DEFAULT_GOOD_THRESHOLD),
        }),
        "questions" => Ok(RunMode::Questions),
        other => Err(AppError::Validation(format!(
            "unknown mode '{other}' (expected 'score' or 'questions')"
        ))),
    }
}

/// Resolves the job profile the run scores against. Uploaded PDFs are run
/// through the extractor; explicit inputs override the named preset; a
/// missing job description is a hard validation error.
fn resolve_profile(form: &NewRunForm) -> Result<JobProfile, AppError> {
    let base = match &form.job_preset {
        Some(name) => Some(
            presets::preset(name)
                .ok_or_else(|| AppError::NotFound(format!("unknown job preset '{name}'")))?,
        ),
        None => None,
    };

    let jd_from_pdf = form
        .job_description_pdf
        .as_deref()
        .map(extract_pdf_text)
        .transpose()?;
    let high_from_pdf = form
        .high_fit_resume_pdf
        .as_deref()
        .map(extract_pdf_text)
        .transpose()?;
    let low_from_pdf = form
        .low_fit_resume_pdf
        .as_deref()
        .map(extract_pdf_text)
        .transpose()?;

    let job_description = form
        .job_description
        .clone()
        .or(jd_from_pdf)
        .or_else(|| base.as_ref().map(|p| p.job_description.clone()))
        .ok_or_else(|| {
            AppError::Validation(
                "a job description is required (job_description, job_description_pdf, or job_preset)"
                    .to_string(),
            )
        })?;

    let high_fit_resume = form
        .high_fit_resume
        .clone()
        .or(high_from_pdf)
        .or_else(|| base.as_ref().and_then(|p| p.high_fit_resume.clone()));
    let low_fit_resume = form
        .low_fit_resume
        .clone()
        .or(low_from_pdf)
        .or_else(|| base.as_ref().and_then(|p| p.low_fit_resume.clone()));

    Ok(JobProfile {
        job_description,
        high_fit_resume,
        low_fit_resume,
    })
}

fn parse_threshold(field: &str, raw: String) -> Result<f64, AppError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| AppError::Validation(format!("{field} must be a number, got {raw:?}")))
}

fn non_empty(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

fn bad_multipart(e: axum::extract::multipart::MultipartError) -> AppError {
    AppError::Validation(format!("malformed multipart request: {e}"))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
