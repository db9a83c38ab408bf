//! Claim aggregate

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::ClaimId;
use crate::error::ClaimError;

/// Claim status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimStatus {
    /// Submitted and awaiting review
    Pending,
    /// Approved for payment
    Approved,
    /// Rejected by a reviewer
    Rejected,
}

impl ClaimStatus {
    /// Approved and Rejected are final
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ClaimStatus::Pending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "Pending",
            ClaimStatus::Approved => "Approved",
            ClaimStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ClaimStatus {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(ClaimStatus::Pending),
            "Approved" => Ok(ClaimStatus::Approved),
            "Rejected" => Ok(ClaimStatus::Rejected),
            other => Err(ClaimError::UnknownStatus(other.to_string())),
        }
    }
}

/// A lecturer's claim for hours worked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    /// Unique identifier
    pub id: ClaimId,
    /// Username of the submitting lecturer
    pub lecturer: String,
    /// Submission date
    pub date: DateTime<Utc>,
    /// Hours worked
    pub hours: Decimal,
    /// Hourly rate
    pub rate: Decimal,
    pub notes: Option<String>,
    /// Reference to the supporting document, if one was uploaded
    pub document: Option<String>,
    pub status: ClaimStatus,
    /// Who approved the claim
    pub approved_by: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub review_notes: Option<String>,
}

impl Claim {
    /// Creates a new pending claim dated now
    pub fn new(lecturer: impl Into<String>, hours: Decimal, rate: Decimal) -> Self {
        Self {
            id: ClaimId::new_v7(),
            lecturer: lecturer.into(),
            date: Utc::now(),
            hours,
            rate,
            notes: None,
            document: None,
            status: ClaimStatus::Pending,
            approved_by: None,
            reviewed_at: None,
            review_notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_document(mut self, reference: impl Into<String>) -> Self {
        self.document = Some(reference.into());
        self
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    /// Hours multiplied by rate
    ///
    /// Always recomputed so it can never drift from its inputs.
    pub fn total(&self) -> Decimal {
        self.hours * self.rate
    }

    /// True when a non-empty document reference is attached
    pub fn has_document(&self) -> bool {
        self.document.as_deref().is_some_and(|d| !d.trim().is_empty())
    }

    /// File name part of the document reference
    pub fn document_file_name(&self) -> Option<&str> {
        self.document
            .as_deref()
            .filter(|d| !d.is_empty())
            .and_then(|d| d.rsplit(['/', '\\']).next())
    }

    /// Marks the claim approved
    pub fn approve(&mut self, approver: impl Into<String>) -> Result<(), ClaimError> {
        self.update_status(ClaimStatus::Approved)?;
        self.approved_by = Some(approver.into());
        Ok(())
    }

    /// Marks the claim rejected, keeping the reviewer's notes
    pub fn reject(&mut self, notes: Option<String>) -> Result<(), ClaimError> {
        self.update_status(ClaimStatus::Rejected)?;
        self.review_notes = notes.filter(|n| !n.trim().is_empty());
        Ok(())
    }

    /// Updates the status
    fn update_status(&mut self, status: ClaimStatus) -> Result<(), ClaimError> {
        if !self.can_transition_to(status) {
            return Err(ClaimError::InvalidStatusTransition {
                from: self.status.to_string(),
                to: status.to_string(),
            });
        }
        self.status = status;
        self.reviewed_at = Some(Utc::now());
        Ok(())
    }

    /// Checks if transition is valid
    fn can_transition_to(&self, target: ClaimStatus) -> bool {
        use ClaimStatus::*;
        matches!((self.status, target), (Pending, Approved) | (Pending, Rejected))
    }
}

/// Upper bound on hours accepted at submission
pub const MAX_SUBMITTED_HOURS: Decimal = dec!(100);
/// Upper bound on hourly rate accepted at submission
pub const MAX_SUBMITTED_RATE: Decimal = dec!(1000);
/// Maximum length of the notes field, in characters
pub const MAX_NOTES_LENGTH: usize = 1000;

/// What a lecturer fills in when submitting a claim
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimSubmission {
    pub hours: Decimal,
    pub rate: Decimal,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub document: Option<String>,
}

impl ClaimSubmission {
    pub fn new(hours: Decimal, rate: Decimal) -> Self {
        Self {
            hours,
            rate,
            notes: None,
            document: None,
        }
    }

    /// Checks the submission bounds, returning every violated rule
    pub fn validate(&self) -> Result<(), ClaimError> {
        let mut problems = Vec::new();

        if self.hours <= Decimal::ZERO || self.hours > MAX_SUBMITTED_HOURS {
            problems.push("Hours must be between 0.1 and 100.".to_string());
        }
        if self.rate <= Decimal::ZERO || self.rate > MAX_SUBMITTED_RATE {
            problems.push("Rate must be between $0.1 and $1000.".to_string());
        }
        if self
            .notes
            .as_deref()
            .is_some_and(|n| n.chars().count() > MAX_NOTES_LENGTH)
        {
            problems.push("Notes cannot exceed 1000 characters.".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ClaimError::InvalidSubmission(problems))
        }
    }

    /// Validates and turns the submission into a pending claim for `lecturer`
    pub fn into_claim(self, lecturer: impl Into<String>) -> Result<Claim, ClaimError> {
        self.validate()?;
        let mut claim = Claim::new(lecturer, self.hours, self.rate);
        claim.notes = self.notes.filter(|n| !n.trim().is_empty());
        claim.document = self.document.filter(|d| !d.trim().is_empty());
        Ok(claim)
    }
}
