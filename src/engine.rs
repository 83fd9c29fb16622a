//! Dialogue engine - implements the intake state machine
//!
//! START → LOAN TYPE → EMPLOYMENT → SCORE → EVALUATE → (FALLBACK?) → SEARCH
//!
//! The session value is threaded through explicit state transitions, so each
//! handler can be exercised in tests with a scripted console instead of a
//! live input channel.

use crate::classifier::LoanClassifier;
use crate::console::Console;
use crate::models::{CoApplicant, EmploymentDetails, EmploymentStatus, Session};
use crate::search::LenderSearch;
use crate::Result;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// CIBIL score at or above which the applicant is eligible.
pub const CIBIL_THRESHOLD: u32 = 650;

/// Fraction of the collateral market value offered as a loan.
pub const COLLATERAL_LTV: f64 = 0.65;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueState {
    Start,
    InquireLoanType,
    InquireEmployment,
    InquireScore,
    Evaluate,
    Fallback,
    Search,
    Done,
}

/// Eligibility transition: hard threshold on the CIBIL score, no partial
/// credit and no other factors.
pub fn evaluate(score: u32) -> DialogueState {
    if score >= CIBIL_THRESHOLD {
        DialogueState::Search
    } else {
        DialogueState::Fallback
    }
}

/// Whose details are being collected; picks the your/their prompt wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Subject {
    Applicant,
    CoApplicant,
}

pub struct DialogueEngine<C: Console, S: LenderSearch> {
    console: C,
    search: S,
}

impl<C: Console, S: LenderSearch> DialogueEngine<C, S> {
    pub fn new(console: C, search: S) -> Self {
        Self { console, search }
    }

    /// Run one intake session from greeting to lender search.
    pub async fn run(&mut self) -> Result<Session> {
        let mut session = Session::new();
        info!(session_id = %session.session_id, "Starting intake session");

        let mut state = DialogueState::Start;
        while state != DialogueState::Done {
            state = self.step(state, &mut session).await?;
            debug!(?state, "State transition");
        }

        info!(session_id = %session.session_id, "Intake session complete");
        Ok(session)
    }

    async fn step(&mut self, state: DialogueState, session: &mut Session) -> Result<DialogueState> {
        match state {
            DialogueState::Start => {
                self.console.say(
                    "Hi, I am the LendBot and will help you with your loan concerns. \
                     How may I help you today?",
                );
                Ok(DialogueState::InquireLoanType)
            }
            DialogueState::InquireLoanType => self.inquire_loan_type(session),
            DialogueState::InquireEmployment => self.inquire_employment(session),
            DialogueState::InquireScore => self.inquire_score(session),
            DialogueState::Evaluate => Ok(self.evaluate_eligibility(session)),
            DialogueState::Fallback => self.inquire_additional_options(session),
            DialogueState::Search => {
                self.search_lenders(session).await;
                Ok(DialogueState::Done)
            }
            DialogueState::Done => Ok(DialogueState::Done),
        }
    }

    fn inquire_loan_type(&mut self, session: &mut Session) -> Result<DialogueState> {
        let purpose = self
            .console
            .prompt("Please describe the type of loan you need or its purpose:")?;

        match LoanClassifier::classify(&purpose) {
            Some(loan_type) => {
                self.console
                    .say(&format!("You are interested in a {}.", loan_type));
                session.loan_type = Some(loan_type.to_string());
            }
            None => {
                // Unclassified: the user's explicit label becomes the category.
                let explicit = self
                    .console
                    .prompt("Could you be more specific about the loan's purpose?")?;
                session.loan_type = Some(explicit);
            }
        }

        Ok(DialogueState::InquireEmployment)
    }

    fn inquire_employment(&mut self, session: &mut Session) -> Result<DialogueState> {
        let answer = self.console.prompt(
            "What is your employment status? Salaried/Self Employed/Unemployed/Student:",
        )?;

        session.employment = EmploymentStatus::parse(&answer);
        session.details = self.collect_details(session.employment, Subject::Applicant)?;

        Ok(DialogueState::InquireScore)
    }

    fn inquire_score(&mut self, session: &mut Session) -> Result<DialogueState> {
        let score: u32 = self.prompt_integer("Please enter your CIBIL score:")?;
        session.record_cibil_score(score);
        Ok(DialogueState::Evaluate)
    }

    fn evaluate_eligibility(&mut self, session: &Session) -> DialogueState {
        let score = session.cibil_score.unwrap_or(0);
        let next = evaluate(score);

        match next {
            DialogueState::Search => {
                self.console
                    .say("You are eligible for the loan. Proceeding to search for banks...");
            }
            _ => {
                self.console.say(&format!(
                    "Your CIBIL score is less than {}. Let's explore alternative loan solutions.",
                    CIBIL_THRESHOLD
                ));
            }
        }

        next
    }

    /// FALLBACK sub-flow: co-applicant question, then collateral question,
    /// then on to the lender search regardless of the answers.
    fn inquire_additional_options(&mut self, session: &mut Session) -> Result<DialogueState> {
        let add_family_member = self.console.prompt(
            "Do you have any additional earning family members who can be added \
             as co-applicants? (yes/no):",
        )?;

        if is_yes(&add_family_member) {
            let relation = self
                .console
                .prompt("What is your relation with the family member?")?;
            let status_answer = self
                .console
                .prompt("What is their employment status? (Salaried/Self Employed):")?;
            let status = EmploymentStatus::parse(&status_answer);

            // Only salaried/self-employed shapes are offered for co-applicants.
            let details = match status {
                EmploymentStatus::Salaried | EmploymentStatus::SelfEmployed => {
                    self.collect_details(status, Subject::CoApplicant)?
                }
                _ => EmploymentDetails::Unspecified,
            };

            let co_applicant = CoApplicant {
                relation,
                employment_status: status,
                details,
            };

            self.console.say(&format!(
                "Collected co-applicant details: {}",
                serde_json::to_string(&co_applicant)?
            ));
            session.co_applicant = Some(co_applicant);
        }

        let add_collateral = self
            .console
            .prompt("Do you have any collateral (e.g., property, gold)? (Yes/No):")?;

        if is_yes(&add_collateral) {
            let value: u64 =
                self.prompt_integer("Please enter the estimated market value of the collateral:")?;
            session.collateral_value = Some(value);

            let loan_offer = value as f64 * COLLATERAL_LTV;
            self.console.say(&format!(
                "You can get a loan amount of up to 65% of the collateral value, \
                 which is approximately {}.",
                format_offer(loan_offer)
            ));
        } else {
            self.console.say("No collateral details provided.");
        }

        self.console
            .say("Now, let's search for banks that offer alternative loan solutions.");

        Ok(DialogueState::Search)
    }

    /// Terminal state: invoke the lender search collaborator. A failure or an
    /// empty result list ends the session with a "no results" message rather
    /// than an error.
    async fn search_lenders(&mut self, session: &Session) {
        let category = session.loan_type.clone().unwrap_or_default();

        self.console
            .say(&format!("Searching for banks that offer {}...", category));

        match self.search.search(&category).await {
            Ok(lenders) if !lenders.is_empty() => {
                self.console
                    .say("Here are some banks that might match your criteria:");
                for lender in lenders {
                    self.console.say(&format!("- {}", lender));
                }
            }
            Ok(_) => {
                self.console
                    .say("No relevant results found. Please try again or refine your search.");
            }
            Err(e) => {
                warn!("Lender search failed: {}", e);
                self.console
                    .say("No relevant results found. Please try again or refine your search.");
            }
        }
    }

    /// Collect the category-specific field set for an employment status.
    /// Field order is fixed per status; unrecognized status collects nothing.
    fn collect_details(
        &mut self,
        status: EmploymentStatus,
        subject: Subject,
    ) -> Result<EmploymentDetails> {
        let their = subject == Subject::CoApplicant;

        match status {
            EmploymentStatus::Salaried => {
                let net_income = self.console.prompt(if their {
                    "Please enter their net monthly income:"
                } else {
                    "Please enter your net monthly income:"
                })?;
                let current_obligations = self.console.prompt(if their {
                    "Do they have any current financial obligations (e.g., EMIs)?"
                } else {
                    "Do you have any current financial obligations (e.g., EMIs)?"
                })?;
                Ok(EmploymentDetails::Salaried {
                    net_income,
                    current_obligations,
                })
            }
            EmploymentStatus::SelfEmployed => {
                let monthly_gross_income = self.console.prompt(if their {
                    "Please enter their monthly gross income:"
                } else {
                    "Please enter your monthly gross income:"
                })?;
                let type_of_business = self.console.prompt(if their {
                    "What type of business do they run?"
                } else {
                    "What type of business do you run?"
                })?;
                let location = self.console.prompt(if their {
                    "Where are they located?"
                } else {
                    "Where are you located?"
                })?;
                let business_proof_doc = self.console.prompt(if their {
                    "Do they have a valid business proof document? (Yes/No):"
                } else {
                    "Do you have a valid business proof document? (Yes/No):"
                })?;
                let bank_statement = self.console.prompt(if their {
                    "Can they provide their banking statement for the last 1 year? (Yes/No):"
                } else {
                    "Can you provide your banking statement for the last 1 year? (Yes/No):"
                })?;
                let itrs = self.console.prompt(if their {
                    "Do they have ITRs for the past 2 years? (yes/no):"
                } else {
                    "Do you have ITRs for the past 2 years? (yes/no):"
                })?;
                let current_obligations = self.console.prompt(if their {
                    "Do they have any current financial obligations (e.g., EMIs)?"
                } else {
                    "Do you have any current financial obligations (e.g., EMIs)?"
                })?;
                Ok(EmploymentDetails::SelfEmployed {
                    monthly_gross_income,
                    type_of_business,
                    location,
                    business_proof_doc,
                    bank_statement,
                    itrs,
                    current_obligations,
                })
            }
            EmploymentStatus::Unemployed => {
                let unemployment_reason = self.console.prompt(
                    "Please specify the reason for unemployment (e.g., recent layoff, \
                     health issues, etc.):",
                )?;
                let savings = self
                    .console
                    .prompt("Do you have any savings or investments? (Yes/No):")?;
                Ok(EmploymentDetails::Unemployed {
                    unemployment_reason,
                    savings,
                })
            }
            EmploymentStatus::Student => {
                let institution = self
                    .console
                    .prompt("Please enter the name of your educational institution:")?;
                let course = self.console.prompt("What course are you pursuing?")?;
                let current_funding = self.console.prompt(
                    "How are you funding your studies currently? (e.g., Family support, \
                     Scholarships, Part-time job):",
                )?;
                Ok(EmploymentDetails::Student {
                    institution,
                    course,
                    current_funding,
                })
            }
            EmploymentStatus::Other => Ok(EmploymentDetails::Unspecified),
        }
    }

    /// Prompt until the answer parses as an integer. Malformed input is
    /// recovered locally, never coerced to zero.
    fn prompt_integer<T: FromStr>(&mut self, text: &str) -> Result<T> {
        loop {
            let answer = self.console.prompt(text)?;
            match answer.trim().parse::<T>() {
                Ok(value) => return Ok(value),
                Err(_) => self.console.say("Please enter a valid number."),
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    answer.trim().to_lowercase() == "yes"
}

/// Render a loan offer the way the user expects to read it: whole amounts
/// keep a single trailing decimal ("650000.0"), anything else prints in full.
fn format_offer(offer: f64) -> String {
    if offer.fract() == 0.0 {
        format!("{:.1}", offer)
    } else {
        offer.to_string()
    }
}
