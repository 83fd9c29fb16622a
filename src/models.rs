//! Core data models for the loan intake flow

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

//
// ================= Enums =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    Salaried,
    SelfEmployed,
    Unemployed,
    Student,
    Other,
}

impl EmploymentStatus {
    /// Parse a user answer, case-insensitively. Anything unrecognized maps
    /// to `Other`; the flow continues without extra detail collection.
    pub fn parse(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "salaried" => EmploymentStatus::Salaried,
            "self employed" | "self-employed" => EmploymentStatus::SelfEmployed,
            "unemployed" => EmploymentStatus::Unemployed,
            "student" => EmploymentStatus::Student,
            _ => EmploymentStatus::Other,
        }
    }
}

impl fmt::Display for EmploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EmploymentStatus::Salaried => "salaried",
            EmploymentStatus::SelfEmployed => "self employed",
            EmploymentStatus::Unemployed => "unemployed",
            EmploymentStatus::Student => "student",
            EmploymentStatus::Other => "other",
        };
        write!(f, "{}", s)
    }
}

//
// ================= Employment Details =================
//

/// Per-status detail record. Each variant carries exactly the fields the
/// flow collects for that employment status, so a branch cannot end up with
/// a partial or misspelled field set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "employment", rename_all = "snake_case")]
pub enum EmploymentDetails {
    Salaried {
        net_income: String,
        current_obligations: String,
    },
    SelfEmployed {
        monthly_gross_income: String,
        type_of_business: String,
        location: String,
        business_proof_doc: String,
        bank_statement: String,
        itrs: String,
        current_obligations: String,
    },
    Unemployed {
        unemployment_reason: String,
        savings: String,
    },
    Student {
        institution: String,
        course: String,
        current_funding: String,
    },
    /// Unrecognized employment status: nothing collected.
    Unspecified,
}

//
// ================= Co-applicant =================
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CoApplicant {
    pub relation: String,
    pub employment_status: EmploymentStatus,
    #[serde(flatten)]
    pub details: EmploymentDetails,
}

//
// ================= Session =================
//

/// The single mutable record threaded through the dialogue. Created at flow
/// start, mutated field-by-field as states advance, discarded at the
/// terminal search state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Canonical category once classified, else the user's raw follow-up text.
    pub loan_type: Option<String>,
    pub employment: EmploymentStatus,
    pub cibil_score: Option<u32>,
    pub details: EmploymentDetails,
    pub co_applicant: Option<CoApplicant>,
    pub collateral_value: Option<u64>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            created_at: Utc::now(),
            loan_type: None,
            employment: EmploymentStatus::Other,
            cibil_score: None,
            details: EmploymentDetails::Unspecified,
            co_applicant: None,
            collateral_value: None,
        }
    }

    /// Record the CIBIL score. The score is collected once; later calls are
    /// ignored so the value stays immutable for the rest of the session.
    pub fn record_cibil_score(&mut self, score: u32) {
        if self.cibil_score.is_none() {
            self.cibil_score = Some(score);
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employment_status_parsing() {
        assert_eq!(EmploymentStatus::parse("Salaried"), EmploymentStatus::Salaried);
        assert_eq!(
            EmploymentStatus::parse("  Self Employed "),
            EmploymentStatus::SelfEmployed
        );
        assert_eq!(
            EmploymentStatus::parse("self-employed"),
            EmploymentStatus::SelfEmployed
        );
        assert_eq!(EmploymentStatus::parse("STUDENT"), EmploymentStatus::Student);
        assert_eq!(EmploymentStatus::parse("retired"), EmploymentStatus::Other);
        assert_eq!(EmploymentStatus::parse(""), EmploymentStatus::Other);
    }

    #[test]
    fn test_cibil_score_set_once() {
        let mut session = Session::new();
        session.record_cibil_score(700);
        session.record_cibil_score(500);
        assert_eq!(session.cibil_score, Some(700));
    }
}
