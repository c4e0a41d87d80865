//! Expense categories and per-driver expense records
//!
//! Categories are statically split into fixed costs (do not scale with miles in
//! the short term) and variable costs (scale with operation). Factoring fee and
//! driver pay are variable too, but they are computed by the metrics engine and
//! never stored as categories.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Whether a category counts toward fixed or variable cost per mile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseKind {
    Fixed,
    Variable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    // fixed
    Insurance,
    TruckPayment,
    TrailerPayment,
    GeneralAdmin,
    Eld,
    PrePass,
    LoadBoard,
    Ifta,
    Compliance,
    PayrollTax,
    BusinessTax,
    InterestPayments,
    // variable
    Repair,
    Maintenance,
    Fuel,
    Misc,
    Food,
    Lumper,
    Toll,
    Scales,
}

impl ExpenseCategory {
    pub const FIXED: [ExpenseCategory; 12] = [
        ExpenseCategory::Insurance,
        ExpenseCategory::TruckPayment,
        ExpenseCategory::TrailerPayment,
        ExpenseCategory::GeneralAdmin,
        ExpenseCategory::Eld,
        ExpenseCategory::PrePass,
        ExpenseCategory::LoadBoard,
        ExpenseCategory::Ifta,
        ExpenseCategory::Compliance,
        ExpenseCategory::PayrollTax,
        ExpenseCategory::BusinessTax,
        ExpenseCategory::InterestPayments,
    ];

    pub const VARIABLE: [ExpenseCategory; 8] = [
        ExpenseCategory::Repair,
        ExpenseCategory::Maintenance,
        ExpenseCategory::Fuel,
        ExpenseCategory::Misc,
        ExpenseCategory::Food,
        ExpenseCategory::Lumper,
        ExpenseCategory::Toll,
        ExpenseCategory::Scales,
    ];

    pub fn all() -> impl Iterator<Item = ExpenseCategory> {
        Self::FIXED.into_iter().chain(Self::VARIABLE)
    }

    pub fn kind(&self) -> ExpenseKind {
        if Self::FIXED.contains(self) {
            ExpenseKind::Fixed
        } else {
            ExpenseKind::Variable
        }
    }

    /// Storage key used in expense records and CSV files
    pub fn key(&self) -> &'static str {
        match self {
            ExpenseCategory::Insurance => "insurance",
            ExpenseCategory::TruckPayment => "truck_payment",
            ExpenseCategory::TrailerPayment => "trailer_payment",
            ExpenseCategory::GeneralAdmin => "cpa",
            ExpenseCategory::Eld => "eld",
            ExpenseCategory::PrePass => "prepass",
            ExpenseCategory::LoadBoard => "load_board",
            ExpenseCategory::Ifta => "ifta",
            ExpenseCategory::Compliance => "compliance",
            ExpenseCategory::PayrollTax => "payroll_tax",
            ExpenseCategory::BusinessTax => "business_tax",
            ExpenseCategory::InterestPayments => "interest_payments",
            ExpenseCategory::Repair => "repair",
            ExpenseCategory::Maintenance => "maintenance",
            ExpenseCategory::Fuel => "fuel",
            ExpenseCategory::Misc => "misc",
            ExpenseCategory::Food => "food",
            ExpenseCategory::Lumper => "lumper",
            ExpenseCategory::Toll => "toll",
            ExpenseCategory::Scales => "scales",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::Insurance => "Insurance",
            ExpenseCategory::TruckPayment => "Truck Payment",
            ExpenseCategory::TrailerPayment => "Trailer Payment",
            ExpenseCategory::GeneralAdmin => "G/A",
            ExpenseCategory::Eld => "Logbook (ELD)",
            ExpenseCategory::PrePass => "Pre-Pass",
            ExpenseCategory::LoadBoard => "Load Board",
            ExpenseCategory::Ifta => "IFTA",
            ExpenseCategory::Compliance => "Compliance",
            ExpenseCategory::PayrollTax => "Payroll Tax",
            ExpenseCategory::BusinessTax => "Business Tax",
            ExpenseCategory::InterestPayments => "Interest Payments",
            ExpenseCategory::Repair => "Repair",
            ExpenseCategory::Maintenance => "Maintenance",
            ExpenseCategory::Fuel => "Fuel",
            ExpenseCategory::Misc => "Misc",
            ExpenseCategory::Food => "Food",
            ExpenseCategory::Lumper => "Lumper",
            ExpenseCategory::Toll => "Toll",
            ExpenseCategory::Scales => "Scales",
        }
    }
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown expense category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for ExpenseCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        if let Some(category) = ExpenseCategory::all()
            .find(|c| c.key() == needle || c.label().to_lowercase() == needle)
        {
            return Ok(category);
        }
        match needle.as_str() {
            "g&a" | "ga" | "general admin" | "administrative" => Ok(ExpenseCategory::GeneralAdmin),
            "logbook" | "elog" => Ok(ExpenseCategory::Eld),
            "pre pass" | "pre_pass" => Ok(ExpenseCategory::PrePass),
            "repair & maintenance" | "repairs" => Ok(ExpenseCategory::Repair),
            "tolls" => Ok(ExpenseCategory::Toll),
            "interest" => Ok(ExpenseCategory::InterestPayments),
            _ => Err(UnknownCategory(s.trim().to_string())),
        }
    }
}

/// Amounts by category key, the engine's `expensesByCategory` input.
///
/// Missing categories read as zero. Keys that name no known category are kept
/// for display but counted in neither the fixed nor the variable total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseBreakdown(BTreeMap<String, f64>);

impl ExpenseBreakdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add to the running amount for a key
    pub fn add(&mut self, key: &str, amount: f64) {
        *self.0.entry(key.to_string()).or_insert(0.0) += amount;
    }

    pub fn with(mut self, category: ExpenseCategory, amount: f64) -> Self {
        self.add(category.key(), amount);
        self
    }

    pub fn amount(&self, category: ExpenseCategory) -> f64 {
        self.0.get(category.key()).copied().unwrap_or(0.0)
    }

    /// Sum over every known category of the given kind
    pub fn total_of(&self, kind: ExpenseKind) -> f64 {
        ExpenseCategory::all()
            .filter(|c| c.kind() == kind)
            .map(|c| self.amount(c))
            .sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<String, f64>> for ExpenseBreakdown {
    fn from(map: BTreeMap<String, f64>) -> Self {
        Self(map)
    }
}

impl<'a> FromIterator<(&'a str, f64)> for ExpenseBreakdown {
    fn from_iter<I: IntoIterator<Item = (&'a str, f64)>>(iter: I) -> Self {
        let mut breakdown = ExpenseBreakdown::new();
        for (key, amount) in iter {
            breakdown.add(key, amount);
        }
        breakdown
    }
}

/// A persisted expense line for one driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseEntry {
    pub id: u64,
    pub driver_name: String,
    /// Category storage key (see [`ExpenseCategory::key`])
    pub category: String,
    pub amount: f64,
    /// Undated entries are standing amounts and count in every period
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub batch_id: Option<String>,
}
