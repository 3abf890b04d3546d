//! Built-in job presets.
//!
//! A preset bundles a job description with optional high/low-fit exemplar
//! resumes that anchor the model's scoring scale. Runs can start from a
//! preset and override any piece through the upload form, or skip presets
//! entirely and supply everything ad hoc.

/// The inputs one screening run scores against. Immutable for the duration
/// of a run.
#[derive(Debug, Clone)]
pub struct JobProfile {
    pub job_description: String,
    pub high_fit_resume: Option<String>,
    pub low_fit_resume: Option<String>,
}

pub const SENIOR_CPG_STRATEGIST: &str = "Senior CPG Account Strategist";
pub const ADVERTISING_ASSISTANT: &str = "Advertising Assistant";

pub const PRESET_NAMES: [&str; 2] = [SENIOR_CPG_STRATEGIST, ADVERTISING_ASSISTANT];

/// Looks up a preset by its exact display name.
pub fn preset(name: &str) -> Option<JobProfile> {
    match name {
        SENIOR_CPG_STRATEGIST => Some(JobProfile {
            job_description: CPG_STRATEGIST_JOB_DESCRIPTION.to_string(),
            high_fit_resume: Some(CPG_STRATEGIST_HIGH_FIT_RESUME.to_string()),
            low_fit_resume: Some(CPG_STRATEGIST_LOW_FIT_RESUME.to_string()),
        }),
        ADVERTISING_ASSISTANT => Some(JobProfile {
            job_description: ADVERTISING_ASSISTANT_JOB_DESCRIPTION.to_string(),
            high_fit_resume: Some(ADVERTISING_ASSISTANT_HIGH_FIT_RESUME.to_string()),
            low_fit_resume: Some(ADVERTISING_ASSISTANT_LOW_FIT_RESUME.to_string()),
        }),
        _ => None,
    }
}

const CPG_STRATEGIST_JOB_DESCRIPTION: &str = "\
Summary of Position:
This in-house position leads account strategy for our consumer packaged goods clients. The strategist \
owns the annual media plan across retail media networks, negotiates co-marketing commitments with \
national retailers, and translates syndicated sales data (Nielsen, IRI) into quarterly growth \
recommendations the client presents to their executive team.

Key Areas of Responsibility:
- Build and defend annual trade and shopper marketing budgets for 3-5 CPG accounts.
- Turn category, panel, and POS data into actionable brand strategy.
- Lead quarterly business reviews with director-level client stakeholders.
- Coordinate creative, media, and analytics teams against a shared account roadmap.
- Mentor associate strategists and review their client-facing deliverables.

Requirements: 6+ years in CPG brand or account strategy, demonstrated ownership of a seven-figure \
media budget, fluency with syndicated data tools, and a track record of retaining and growing \
enterprise accounts.";

const CPG_STRATEGIST_HIGH_FIT_RESUME: &str = "\
Account Director, national shopper-marketing agency (8 years). Owned $4.2M annual trade budget across \
four CPG brands; grew flagship snack account 23% in two years using IRI panel data to re-weight retail \
media spend. Led quarterly business reviews for VP-level clients, managed a pod of two associate \
strategists and an analyst, and built the agency's syndicated-data playbook now used on every grocery \
account. Earlier: category analyst at a top-5 food manufacturer.";

const CPG_STRATEGIST_LOW_FIT_RESUME: &str = "\
Recent marketing graduate with one internship at a regional social-media boutique. Coursework in \
consumer behavior and brand management; capstone project built a mock influencer campaign for a local \
coffee roaster. Proficient in Canva and Instagram analytics. Seeking a first full-time role to learn \
account management fundamentals.";

const ADVERTISING_ASSISTANT_JOB_DESCRIPTION: &str = "\
Summary of Position:
Entry-level support role on the advertising operations team. The assistant keeps campaign trafficking \
sheets current, proofs insertion orders before they go to vendors, assembles the weekly pacing report \
from the ad server, and handles meeting notes and follow-ups for two account leads.

Key Areas of Responsibility:
- Maintain campaign calendars, trafficking sheets, and asset trackers.
- Proof insertion orders and creative specs against vendor requirements.
- Pull weekly delivery and pacing numbers from the ad server into the client report template.
- Schedule status meetings, capture notes, and chase action items.

Requirements: strong attention to detail, working knowledge of spreadsheets, clear written \
communication, and interest in media or advertising. Prior internship experience is a plus but not \
required.";

const ADVERTISING_ASSISTANT_HIGH_FIT_RESUME: &str = "\
Advertising intern for two summers at a mid-size media agency: maintained trafficking sheets for 14 \
concurrent campaigns, reconciled delivery reports against insertion orders, and built the Excel \
template the team still uses for weekly pacing. Campus newspaper ad-sales coordinator managing \
placement deadlines for 30 local advertisers. Detail-oriented references available from both roles.";

const ADVERTISING_ASSISTANT_LOW_FIT_RESUME: &str = "\
Senior software architect with 15 years designing distributed payment systems. Extensive leadership of \
platform engineering teams, no media or advertising exposure, compensation expectations at principal \
engineer level. Looking for a hands-on technical role in fintech.";
