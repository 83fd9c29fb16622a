//! Loan type classifier
//!
//! Maps free-text loan purposes to canonical loan categories via ordered
//! keyword matching (e.g., "I need money for my gold jewelry" → "Gold Loan").

/// Static keyword table — zero allocation. Order matters: the first keyword
/// found in the input wins, so the table must stay in this exact order for
/// reproducible classification.
const KEYWORD_LOAN_TYPES: &[(&str, &str)] = &[
    ("home", "Home Loan"),
    ("property", "Loan Against Property (LAP)"),
    ("insurance", "Loan Against Insurance Policies"),
    ("gold", "Gold Loan"),
    ("mutual funds", "Loan Against Mutual Funds and Shares"),
    ("fixed deposit", "Loan Against Fixed Deposit"),
    ("personal", "Personal Loan"),
    ("business", "Business Loan"),
    ("education", "Education Loan"),
];

/// Loan type classifier
pub struct LoanClassifier;

impl LoanClassifier {
    /// Classify a free-text loan purpose into a canonical category.
    ///
    /// Case-insensitive substring match in table order; returns the category
    /// of the first keyword found, or `None` if no keyword matches.
    pub fn classify(purpose: &str) -> Option<&'static str> {
        let purpose = purpose.to_lowercase();

        KEYWORD_LOAN_TYPES
            .iter()
            .find(|(keyword, _)| purpose.contains(keyword))
            .map(|(_, loan_type)| *loan_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_keyword_matches() {
        let cases = vec![
            ("I want to buy a home", "Home Loan"),
            ("loan against my property", "Loan Against Property (LAP)"),
            ("I have an insurance policy", "Loan Against Insurance Policies"),
            ("I need money for my gold jewelry", "Gold Loan"),
            ("I hold mutual funds", "Loan Against Mutual Funds and Shares"),
            ("borrow against my fixed deposit", "Loan Against Fixed Deposit"),
            ("a personal emergency", "Personal Loan"),
            ("expanding my business", "Business Loan"),
            ("funding my education abroad", "Education Loan"),
        ];

        for (purpose, expected) in cases {
            assert_eq!(LoanClassifier::classify(purpose), Some(expected));
        }
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(LoanClassifier::classify("GOLD necklace"), Some("Gold Loan"));
        assert_eq!(LoanClassifier::classify("EdUcAtIoN fees"), Some("Education Loan"));
    }

    #[test]
    fn test_no_keyword_returns_none() {
        assert_eq!(LoanClassifier::classify("I want a car"), None);
        assert_eq!(LoanClassifier::classify(""), None);
    }

    #[test]
    fn test_first_listed_keyword_wins() {
        // gold precedes personal in the table
        assert_eq!(
            LoanClassifier::classify("a personal loan against my gold"),
            Some("Gold Loan")
        );
        // home precedes everything else
        assert_eq!(
            LoanClassifier::classify("education loan for my home town college, home included"),
            Some("Home Loan")
        );
        // property precedes gold even when gold appears earlier in the text
        assert_eq!(
            LoanClassifier::classify("gold or property backed loan"),
            Some("Loan Against Property (LAP)")
        );
    }
}
