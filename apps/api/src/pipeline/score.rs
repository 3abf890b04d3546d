//! Score parsing and tier bucketing.

use serde::{Deserialize, Serialize};

use crate::pipeline::PipelineError;

/// Parsed model verdict for one resume.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    /// Expected to lie in [0, 1]; the model is trusted, not range-checked.
    pub score: f64,
    pub explanation: String,
}

/// The three ordered screening tiers. Archive group names derive from these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Best,
    Good,
    Rest,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Best, Category::Good, Category::Rest];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Best => "best",
            Category::Good => "good",
            Category::Rest => "rest",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Splits the raw model response into score (line 0) and explanation (line 1).
///
/// The two-line contract follows the prompt's RESPONSE FORMAT and is strict on
/// purpose: a response that does not lead with a bare float fails this resume
/// rather than being guessed at.
pub fn parse_score_response(raw: &str) -> Result<ScoreResult, PipelineError> {
    let mut lines = raw.lines();
    let first = lines.next().unwrap_or_default();
    let score: f64 = first.trim().parse().map_err(|_| {
        PipelineError::Parse(format!(
            "expected a numeric score on the first line, got {first:?}"
        ))
    })?;
    let explanation = lines.next().unwrap_or_default().to_string();
    Ok(ScoreResult { score, explanation })
}

/// Buckets a score using strict greater-than on both thresholds: a score
/// exactly at `best_threshold` lands in Good, not Best.
pub fn categorize(score: f64, best_threshold: f64, good_threshold: f64) -> Category {
    if score > best_threshold {
        Category::Best
    } else if score > good_threshold {
        Category::Good
    } else {
        Category::Rest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_score_and_explanation() {
        let result = parse_score_response("0.83\nStrong leadership background").unwrap();
        assert_eq!(result.score, 0.83);
        assert_eq!(result.explanation, "Strong leadership background");
    }

    #[test]
    fn missing_explanation_is_empty_string() {
        let result = parse_score_response("0.4").unwrap();
        assert_eq!(result.score, 0.4);
        assert_eq!(result.explanation, "");
    }

    #[test]
    fn prose_before_the_score_is_a_parse_error() {
        let err = parse_score_response("Looks good, 0.83").unwrap_err();
        assert!(matches!(err, PipelineError::Parse(_)));
    }

    #[test]
    fn empty_response_is_a_parse_error() {
        let err = parse_score_response("").unwrap_err();
        assert!(matches!(err, PipelineError::Parse(_)));
    }

    #[test]
    fn out_of_range_scores_are_not_rejected() {
        // Range enforcement is deliberately absent.
        assert_eq!(parse_score_response("1.7\nover-eager model").unwrap().score, 1.7);
        assert_eq!(parse_score_response("-0.2").unwrap().score, -0.2);
    }

    #[test]
    fn categorize_uses_strict_greater_than() {
        assert_eq!(categorize(0.81, 0.8, 0.6), Category::Best);
        // Exactly at the best threshold → Good, not Best.
        assert_eq!(categorize(0.8, 0.8, 0.6), Category::Good);
        assert_eq!(categorize(0.61, 0.8, 0.6), Category::Good);
        // Exactly at the good threshold → Rest.
        assert_eq!(categorize(0.6, 0.8, 0.6), Category::Rest);
        assert_eq!(categorize(0.0, 0.8, 0.6), Category::Rest);
    }

    #[test]
    fn threshold_scenario_from_the_screening_form_defaults() {
        let buckets: Vec<Category> = [0.95, 0.6, 0.3]
            .iter()
            .map(|&s| categorize(s, 0.8, 0.5))
            .collect();
        assert_eq!(buckets, vec![Category::Best, Category::Good, Category::Rest]);
    }

    #[test]
    fn category_names_match_archive_groups() {
        assert_eq!(Category::Best.to_string(), "best");
        assert_eq!(Category::Good.to_string(), "good");
        assert_eq!(Category::Rest.to_string(), "rest");
    }
}
