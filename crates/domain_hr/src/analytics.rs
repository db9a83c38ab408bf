//! Roster and payment analytics

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use core_kernel::{Currency, DateRange, Money, Timezone};
use domain_claims::{Claim, ClaimStatus};

use crate::lecturer::Lecturer;

/// Per-department figures for the current month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentSummary {
    pub department: String,
    pub lecturer_count: usize,
    pub total_payments: Money,
    pub total_claims: usize,
}

/// Snapshot shown on the HR dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HrAnalytics {
    pub period: DateRange,
    pub total_lecturers: usize,
    pub active_lecturers: usize,
    pub inactive_lecturers: usize,
    pub total_payments_this_month: Money,
    pub total_claims_this_month: usize,
    /// Zero when there were no claims
    pub average_claim_amount: Money,
    pub department_summaries: Vec<DepartmentSummary>,
}

impl HrAnalytics {
    /// Computes the snapshot
    ///
    /// # Arguments
    ///
    /// * `lecturers` - The full roster, active or not
    /// * `claims` - Candidate claims; only approved ones dated in `month` count
    /// * `month` - The month being summarised, in local dates
    /// * `tz` - Institution timezone used to place claims on local dates
    /// * `currency` - Currency of the payment figures
    pub fn compute(
        lecturers: &[Lecturer],
        claims: &[Claim],
        month: DateRange,
        tz: &Timezone,
        currency: Currency,
    ) -> Self {
        let this_month: Vec<&Claim> = claims
            .iter()
            .filter(|c| c.status == ClaimStatus::Approved)
            .filter(|c| month.contains_instant(c.date, tz))
            .collect();
        let totals: Vec<_> = this_month.iter().map(|c| c.total()).collect();

        let active = lecturers.iter().filter(|l| l.is_active).count();

        let mut departments: BTreeMap<&str, Vec<&Lecturer>> = BTreeMap::new();
        for lecturer in lecturers {
            departments
                .entry(lecturer.department_name())
                .or_default()
                .push(lecturer);
        }

        let department_summaries = departments
            .into_iter()
            .map(|(department, members)| {
                let usernames: HashSet<&str> =
                    members.iter().map(|l| l.username.as_str()).collect();
                let own: Vec<_> = this_month
                    .iter()
                    .filter(|c| usernames.contains(c.lecturer.as_str()))
                    .map(|c| c.total())
                    .collect();

                DepartmentSummary {
                    department: department.to_string(),
                    lecturer_count: members.len(),
                    total_claims: own.len(),
                    total_payments: Money::sum(own, currency),
                }
            })
            .collect();

        Self {
            period: month,
            total_lecturers: lecturers.len(),
            active_lecturers: active,
            inactive_lecturers: lecturers.len() - active,
            total_payments_this_month: Money::sum(totals.iter().copied(), currency),
            total_claims_this_month: this_month.len(),
            average_claim_amount: Money::average(&totals, currency).round_to_currency(),
            department_summaries,
        }
    }
}
