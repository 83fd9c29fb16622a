//! LendBot — guided loan-eligibility intake
//!
//! A conversational intake flow that:
//! - Classifies a free-text loan purpose into a canonical category
//! - Collects employment-specific financial details
//! - Evaluates a CIBIL score threshold for eligibility
//! - Offers a co-applicant/collateral fallback on ineligibility
//! - Searches for matching lenders via the Gemini API
//!
//! FLOW:
//! START → LOAN TYPE → EMPLOYMENT → SCORE → EVALUATE → (FALLBACK?) → SEARCH

pub mod classifier;
pub mod console;
pub mod engine;
pub mod error;
pub mod models;
pub mod search;

pub use error::Result;

// Re-export common types
pub use classifier::LoanClassifier;
pub use engine::{DialogueEngine, DialogueState};
pub use models::*;
