//! Lead score and qualification types

use serde::{Deserialize, Serialize};

/// Lead qualification tier derived from the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Qualification {
    /// High intent, ready to act
    Hot,
    /// Showing interest, gathering information
    Warm,
    /// Just exploring, low intent
    Cold,
}

impl Qualification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Qualification::Hot => "hot",
            Qualification::Warm => "warm",
            Qualification::Cold => "cold",
        }
    }
}

/// Recommended contact-time SLA bucket for a qualified lead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactWindow {
    TwoHours,
    OneDay,
    TwoDays,
}

impl ContactWindow {
    /// Window length in hours, for follow-up task due dates
    pub fn hours(&self) -> i64 {
        match self {
            ContactWindow::TwoHours => 2,
            ContactWindow::OneDay => 24,
            ContactWindow::TwoDays => 48,
        }
    }
}

/// Per-component score breakdown, kept for observability
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Bonus from matched hot keywords (uncapped accumulation)
    pub hot_keywords: u32,
    /// Bonus from matched warm keywords
    pub warm_keywords: u32,
    /// Bonus for pages visited above threshold
    pub pages: u32,
    /// Bonus for visit count above threshold
    pub visits: u32,
    /// Bonus for time on site above threshold
    pub time_on_site: u32,
    /// Bonus for declared urgency
    pub urgency: u32,
    /// Penalty applied when the spam detector flagged the sender
    pub spam_penalty: i32,
}

/// Computed lead score with its qualification tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadScore {
    /// Total score clamped to 0-100
    pub total: u32,
    pub qualification: Qualification,
    pub contact_window: ContactWindow,
    pub breakdown: ScoreBreakdown,
}
