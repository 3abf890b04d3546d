//! The run controller: a sequential loop over the uploaded batch with
//! cooperative cancellation and per-resume failure containment.
//!
//! One run processes each resume to completion before starting the next.
//! Cancellation is checked once per resume, before any work on it begins; an
//! in-flight model call is never aborted. Extraction, upstream, and parse
//! failures skip the one resume and are recorded in the summary; archive
//! failures abort the run.

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::pipeline::analyzer::Analyzer;
use crate::pipeline::archive::ArchiveBuilder;
use crate::pipeline::extract::extract_pdf_text;
use crate::pipeline::prompts::{build_questions_prompt, build_scoring_prompt};
use crate::pipeline::score::{categorize, parse_score_response, Category};
use crate::pipeline::PipelineError;
use crate::presets::JobProfile;

/// Archive group for interview-question runs, which have no score tiers.
const QUESTIONS_GROUP: &str = "questions";

/// One uploaded resume. The applicant name is the filename minus extension.
#[derive(Debug, Clone)]
pub struct UploadedResume {
    pub filename: String,
    pub bytes: bytes::Bytes,
}

impl UploadedResume {
    pub fn applicant_name(&self) -> String {
        std::path::Path::new(&self.filename)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.filename.clone())
    }
}

/// What a run does with each model response.
#[derive(Debug, Clone, Copy)]
pub enum RunMode {
    Score {
        best_threshold: f64,
        good_threshold: f64,
    },
    Questions,
}

#[derive(Debug, Clone)]
pub struct RunParams {
    pub mode: RunMode,
    pub model: String,
}

/// Per-run mutable state, owned by the controller loop and shared with the
/// HTTP layer through the run registry. Replaces the original tool's
/// process-wide session flags with an explicit object.
pub struct RunContext {
    stop: AtomicBool,
    progress: RwLock<RunProgress>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunProgress {
    pub status: String,
    /// Fraction of the batch handled so far, in [0, 1].
    pub progress: f32,
    pub processing: bool,
}

impl RunContext {
    pub fn new() -> Self {
        Self {
            stop: AtomicBool::new(false),
            progress: RwLock::new(RunProgress::default()),
        }
    }

    /// Requests cooperative cancellation; honored before the next resume.
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    pub fn stop_requested(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    pub async fn snapshot(&self) -> RunProgress {
        self.progress.read().await.clone()
    }

    pub async fn set_processing(&self, processing: bool) {
        self.progress.write().await.processing = processing;
    }

    pub async fn set_status(&self, status: impl Into<String>) {
        self.progress.write().await.status = status.into();
    }

    async fn set_fraction(&self, fraction: f32) {
        self.progress.write().await.progress = fraction;
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A resume the run gave up on, with the applicant identity attached.
#[derive(Debug, Clone, Serialize)]
pub struct FailedResume {
    pub applicant_name: String,
    pub error: String,
}

/// Final report of a run: who landed where, who failed, and whether the user
/// stopped early.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    /// Archive group → applicant names, in processing order.
    pub categorized: BTreeMap<String, Vec<String>>,
    pub failures: Vec<FailedResume>,
    pub processed: usize,
    pub total: usize,
    pub stopped: bool,
}

/// A finished run: the zip bytes plus the summary the caller renders.
pub struct RunOutput {
    pub archive: Vec<u8>,
    pub summary: RunSummary,
}

struct ScreenOutcome {
    group: &'static str,
    response: String,
    score: Option<f64>,
}

/// Processes the batch in upload order. Returns `Ok` for completed and
/// stopped runs alike — a partial archive is still a deliverable — and `Err`
/// only for batch-fatal failures (archive writes).
pub async fn process_resumes(
    analyzer: &dyn Analyzer,
    ctx: &RunContext,
    resumes: &[UploadedResume],
    profile: &JobProfile,
    params: &RunParams,
) -> Result<RunOutput, PipelineError> {
    let total = resumes.len();
    let mut archive = ArchiveBuilder::new();
    let mut summary = RunSummary {
        total,
        ..Default::default()
    };
    if let RunMode::Score { .. } = params.mode {
        for category in Category::ALL {
            summary
                .categorized
                .insert(category.as_str().to_string(), Vec::new());
        }
    }

    let mut used_names: HashSet<String> = HashSet::new();

    for (i, resume) in resumes.iter().enumerate() {
        if ctx.stop_requested() {
            summary.stopped = true;
            ctx.set_status("Process stopped by user.").await;
            break;
        }

        ctx.set_status(format!("Processing resume {}/{}...", i + 1, total))
            .await;

        let applicant_name = resume.applicant_name();
        match screen_one(analyzer, resume, profile, params).await {
            Ok(outcome) => {
                // Colliding applicant names get a run-scoped suffix instead of
                // silently overwriting earlier archive entries.
                let archived_name = disambiguate(&applicant_name, &mut used_names);
                archive.add_applicant(
                    outcome.group,
                    &archived_name,
                    &resume.bytes,
                    &outcome.response,
                )?;
                summary
                    .categorized
                    .entry(outcome.group.to_string())
                    .or_default()
                    .push(archived_name.clone());
                summary.processed += 1;

                match outcome.score {
                    Some(score) => {
                        info!(applicant = %archived_name, score, group = outcome.group, "resume screened")
                    }
                    None => info!(applicant = %archived_name, "interview questions generated"),
                }
            }
            Err(e) => {
                warn!(applicant = %applicant_name, error = %e, "resume failed, continuing with the batch");
                summary.failures.push(FailedResume {
                    applicant_name,
                    error: e.to_string(),
                });
            }
        }

        ctx.set_fraction((i + 1) as f32 / total as f32).await;
    }

    Ok(RunOutput {
        archive: archive.finish()?,
        summary,
    })
}

/// The per-resume pipeline: extract → prompt → model → (parse → categorize).
/// Any error here fails only this resume.
async fn screen_one(
    analyzer: &dyn Analyzer,
    resume: &UploadedResume,
    profile: &JobProfile,
    params: &RunParams,
) -> Result<ScreenOutcome, PipelineError> {
    let resume_text = extract_pdf_text(&resume.bytes)?;

    match params.mode {
        RunMode::Score {
            best_threshold,
            good_threshold,
        } => {
            let prompt = build_scoring_prompt(&resume_text, profile);
            let response = analyzer.complete(&params.model, &prompt).await?;
            let result = parse_score_response(&response)?;
            let category = categorize(result.score, best_threshold, good_threshold);
            Ok(ScreenOutcome {
                group: category.as_str(),
                response,
                score: Some(result.score),
            })
        }
        RunMode::Questions => {
            let prompt = build_questions_prompt(&resume_text, &profile.job_description);
            let response = analyzer.complete(&params.model, &prompt).await?;
            Ok(ScreenOutcome {
                group: QUESTIONS_GROUP,
                response,
                score: None,
            })
        }
    }
}

fn disambiguate(name: &str, used: &mut HashSet<String>) -> String {
    if used.insert(name.to_string()) {
        return name.to_string();
    }
    let mut n = 2;
    loop {
        let candidate = format!("{name}-{n}");
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}
