//! Prompt templates for the scoring and interview-question calls.
//!
//! The wording is part of the contract: the closing lines prime the model to
//! answer with the score on the first line and the explanation on the second,
//! which is exactly what `score::parse_score_response` expects. When an
//! exemplar resume is absent its whole section — heading and delimiters — is
//! omitted, not left as an empty placeholder.

use std::fmt::Write;

use crate::presets::JobProfile;

const DIVIDER: &str = "-----------------";

const SCORING_PREAMBLE: &str = "\
You are an Industrial-Organizational Psychologist who specializes in personnel selection and assessment. \
Your discipline of study, Industrial-Organizational Psychology, would best prepare you to answer the \
question or perform the task of determining a job fit score based on a resume and a job description.

You will review the following resume and job description and determine a job fit score as a float \
between 0 and 1 (Example: 0.75) and a short explanation for the score.";

const SCORING_CLOSING: &str = "\
Remember, your task is to determine a job fit score as a float between 0 and 1 (Example: 0.99) and a short explanation for the score.
Respond with only the score and explanation. Do not include the resume or job description in your response.

RESPONSE FORMAT:
Job Fit Score:
Explanation:

Job Fit Score:
";

const QUESTIONS_PREAMBLE: &str = "\
You are an Industrial-Organizational Psychologist who is preparing to analyze an applicant based on a \
job description and resume, and create a selection of interview questions specific to the applicant in \
order to determine their potential success in the role.";

const QUESTIONS_CLOSING: &str = "\
Based on the job description and the information provided in the resume, please respond with an analysis \
of this applicant and a selection of interview questions specific to this applicant and designed to \
understand better if this person will succeed in this role.

Your Response Format:
Applicant Name

List of positive attributes for the position

List of negative attributes for the position

List of questions for the interview
";

/// Builds the job-fit scoring prompt. Exemplar sections carry fixed reference
/// scores (0.99 high, 0.10 low) to anchor the model's scale.
pub fn build_scoring_prompt(resume_text: &str, profile: &JobProfile) -> String {
    let mut prompt = format!(
        "{SCORING_PREAMBLE}\n\n\
         Applicant Resume:\n{DIVIDER}\n{resume_text}\n{DIVIDER}\n\n\
         Job Key Areas of Responsibility:\n{DIVIDER}\n{}\n{DIVIDER}\n",
        profile.job_description
    );

    if let Some(high_fit) = &profile.high_fit_resume {
        let _ = write!(
            prompt,
            "\nExample 'high-fit' resume with a score of 0.99 for reference:\n\
             {DIVIDER}\n{high_fit}\n{DIVIDER}\n"
        );
    }

    if let Some(low_fit) = &profile.low_fit_resume {
        let _ = write!(
            prompt,
            "\nExample 'low-fit' resume with a score of 0.10 for reference:\n\
             {DIVIDER}\n{low_fit}\n{DIVIDER}\n"
        );
    }

    prompt.push('\n');
    prompt.push_str(SCORING_CLOSING);
    prompt
}

/// Builds the interview-question prompt. The response is archived verbatim,
/// so no format stricter than the section headings is requested.
pub fn build_questions_prompt(resume_text: &str, job_description: &str) -> String {
    format!(
        "{QUESTIONS_PREAMBLE}\n\n\
         Applicant Resume:\n{DIVIDER}\n{resume_text}\n{DIVIDER}\n\n\
         Job Key Areas of Responsibility:\n{DIVIDER}\n{job_description}\n{DIVIDER}\n\n\
         {QUESTIONS_CLOSING}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(high: Option<&str>, low: Option<&str>) -> JobProfile {
        JobProfile {
            job_description: "Owns CPG account strategy end to end.".to_string(),
            high_fit_resume: high.map(str::to_string),
            low_fit_resume: low.map(str::to_string),
        }
    }

    #[test]
    fn scoring_prompt_embeds_resume_and_job_description() {
        let prompt = build_scoring_prompt("Ten years of brand strategy.", &profile(None, None));
        assert!(prompt.contains("Ten years of brand strategy."));
        assert!(prompt.contains("Owns CPG account strategy end to end."));
        assert!(prompt.ends_with("Job Fit Score:\n"));
    }

    #[test]
    fn absent_exemplars_are_omitted_entirely() {
        let prompt = build_scoring_prompt("resume text", &profile(None, None));
        assert!(!prompt.contains("high-fit"));
        assert!(!prompt.contains("low-fit"));
        // Only the resume and JD sections contribute delimiters.
        assert_eq!(prompt.matches(DIVIDER).count(), 4);
    }

    #[test]
    fn present_exemplars_get_their_own_delimited_sections() {
        let prompt = build_scoring_prompt(
            "resume text",
            &profile(Some("stellar resume"), Some("weak resume")),
        );
        assert!(prompt.contains("Example 'high-fit' resume with a score of 0.99 for reference:"));
        assert!(prompt.contains("Example 'low-fit' resume with a score of 0.10 for reference:"));
        assert!(prompt.contains("stellar resume"));
        assert!(prompt.contains("weak resume"));
        assert_eq!(prompt.matches(DIVIDER).count(), 8);
    }

    #[test]
    fn high_fit_alone_adds_exactly_one_section() {
        let prompt = build_scoring_prompt("resume text", &profile(Some("stellar resume"), None));
        assert!(prompt.contains("high-fit"));
        assert!(!prompt.contains("low-fit"));
        assert_eq!(prompt.matches(DIVIDER).count(), 6);
    }

    #[test]
    fn questions_prompt_embeds_both_inputs_and_format() {
        let prompt = build_questions_prompt("resume text here", "job description here");
        assert!(prompt.contains("resume text here"));
        assert!(prompt.contains("job description here"));
        assert!(prompt.contains("List of questions for the interview"));
    }
}
