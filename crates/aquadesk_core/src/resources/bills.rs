use serde::{Deserialize, Serialize};

use super::{Column, Resource, ResourceKind, money, opt_text};
use crate::form::rules::BILLING_PERIOD;
use crate::form::{FieldRule, RuleSet};
use crate::list::{ListConfig, SortDirection, SortValue};
use crate::record::Record;

pub const BILL_STATUSES: [&str; 3] = ["Unpaid", "Paid", "Overdue"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Bill {
    #[serde(rename = "BillID")]
    pub id: i64,
    #[serde(rename = "ConnectionID")]
    pub connection_id: String,
    pub billing_period: String,
    pub amount: f64,
    pub due_date: String,
    pub issue_date: Option<String>,
    pub status: String,
}

impl Record for Bill {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }
}

impl Resource for Bill {
    const KIND: ResourceKind = ResourceKind::Bills;

    fn list_config() -> ListConfig<Self> {
        ListConfig::<Self>::new()
            .search(|b| b.connection_id.as_str())
            .search(|b| b.billing_period.as_str())
            .filter_on(|b| b.status.as_str(), &BILL_STATUSES)
            .sort_key("due", "Due", |b| SortValue::date(&b.due_date))
            .sort_key("amount", "Amount", |b| SortValue::number(b.amount))
            .sort_key("issued", "Issued", |b| SortValue::opt_date(b.issue_date.as_deref()))
            .default_sort("due", SortDirection::Desc)
    }

    fn form_rules() -> RuleSet {
        RuleSet::new()
            .text("ConnectionID", "Connection", FieldRule::required())
            .text(
                "BillingPeriod",
                "Billing period",
                FieldRule::required().pattern(&BILLING_PERIOD, "Billing period must be YYYY-MM"),
            )
            .number("Amount", "Amount", FieldRule::required().range(0.0, 1_000_000.0))
            .text("DueDate", "Due date", FieldRule { required: true, ..FieldRule::date() })
            .text("IssueDate", "Issue date", FieldRule::date())
            .select("Status", "Status", &BILL_STATUSES, FieldRule::required())
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("ID", 6, |b: &Self| b.id.to_string()),
            Column::new("Connection", 11, |b: &Self| b.connection_id.clone()),
            Column::new("Period", 8, |b: &Self| b.billing_period.clone()),
            Column::new("Amount", 11, |b: &Self| money(b.amount)),
            Column::new("Due", 11, |b: &Self| b.due_date.clone()),
            Column::new("Issued", 11, |b: &Self| opt_text(&b.issue_date)),
            Column::new("Status", 9, |b: &Self| b.status.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{Draft, validate};

    #[test]
    fn test_negative_amount_rejected() {
        let draft = Draft::from_pairs(&[
            ("ConnectionID", "CONN-001"),
            ("BillingPeriod", "2024-13"),
            ("Amount", "-4"),
            ("DueDate", ""),
            ("Status", "Paid"),
        ]);
        let errors = validate(&draft, &Bill::form_rules());
        assert_eq!(errors.get("BillingPeriod"), Some("Billing period must be YYYY-MM"));
        assert_eq!(errors.get("Amount"), Some("Amount must be between 0 and 1000000"));
        assert_eq!(errors.get("DueDate"), Some("Due date is required"));
        assert_eq!(errors.get("IssueDate"), None);
    }
}
