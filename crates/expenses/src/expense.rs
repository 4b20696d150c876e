use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shopledger_core::{Cents, DocumentId, DomainError, DomainResult, Entity};
use shopledger_invoicing::PaymentMethod;

/// Expense entry form input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseDraft {
    pub category: String,
    pub amount: Cents,
    pub spent_on: NaiveDate,
    pub vendor: String,
    pub payment_method: PaymentMethod,
}

/// Expense document: one per category per owner.
///
/// Submitting an entry for an existing category accumulates into it instead
/// of creating a second document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: DocumentId,
    pub category: String,
    pub amount: Cents,
    pub spent_on: NaiveDate,
    pub vendor: String,
    pub payment_method: PaymentMethod,
}

impl Entity for Expense {
    type Id = DocumentId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Expense {
    pub fn create(draft: ExpenseDraft) -> DomainResult<Self> {
        if draft.category.trim().is_empty() {
            return Err(DomainError::validation("category cannot be empty"));
        }
        if draft.amount == 0 {
            return Err(DomainError::validation("amount must be greater than zero"));
        }

        Ok(Self {
            id: DocumentId::new(),
            category: draft.category,
            amount: draft.amount,
            spent_on: draft.spent_on,
            vendor: draft.vendor,
            payment_method: draft.payment_method,
        })
    }

    /// Accumulation key comparison: same category, case-insensitive.
    pub fn matches_category(&self, category: &str) -> bool {
        self.category.eq_ignore_ascii_case(category.trim())
    }

    /// Add the entered amount into this category and refresh the latest
    /// vendor / date / payment method.
    pub fn accumulate(&mut self, draft: &ExpenseDraft) -> DomainResult<()> {
        if draft.amount == 0 {
            return Err(DomainError::validation("amount must be greater than zero"));
        }
        self.amount = self
            .amount
            .checked_add(draft.amount)
            .ok_or_else(|| DomainError::invariant("amount overflow"))?;
        self.spent_on = draft.spent_on;
        self.vendor = draft.vendor.clone();
        self.payment_method = draft.payment_method;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(category: &str, amount: Cents) -> ExpenseDraft {
        ExpenseDraft {
            category: category.to_string(),
            amount,
            spent_on: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            vendor: "City Utilities".to_string(),
            payment_method: PaymentMethod::Card,
        }
    }

    #[test]
    fn create_records_the_entry() {
        let e = Expense::create(draft("Electricity", 4_500)).unwrap();
        assert_eq!(e.category, "Electricity");
        assert_eq!(e.amount, 4_500);
    }

    #[test]
    fn create_rejects_blank_category_and_zero_amount() {
        assert!(Expense::create(draft("  ", 100)).is_err());
        assert!(Expense::create(draft("Rent", 0)).is_err());
    }

    #[test]
    fn matching_is_case_insensitive() {
        let e = Expense::create(draft("Electricity", 4_500)).unwrap();
        assert!(e.matches_category("electricity"));
        assert!(e.matches_category(" ELECTRICITY "));
        assert!(!e.matches_category("Rent"));
    }

    #[test]
    fn accumulate_adds_amount_and_refreshes_details() {
        let mut e = Expense::create(draft("Electricity", 4_500)).unwrap();
        let mut second = draft("Electricity", 1_500);
        second.vendor = "Metro Power".to_string();
        second.spent_on = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();

        e.accumulate(&second).unwrap();
        assert_eq!(e.amount, 6_000);
        assert_eq!(e.vendor, "Metro Power");
        assert_eq!(e.spent_on, second.spent_on);
    }

    #[test]
    fn accumulate_rejects_zero_amount() {
        let mut e = Expense::create(draft("Electricity", 4_500)).unwrap();
        assert!(e.accumulate(&draft("Electricity", 0)).is_err());
        assert_eq!(e.amount, 4_500);
    }
}
