//! Staffing cost comparison: current headcount versus a target shift plan.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One service line with its current and target headcount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffingRow {
    /// Row label as it appears in the source sheet.
    pub no: String,
    pub description: String,
    pub existing_staff: f64,
    pub target_staff: f64,
}

impl StaffingRow {
    /// Headcount released by the target plan.
    pub fn difference(&self) -> f64 {
        self.existing_staff - self.target_staff
    }
}

/// Reporting period for the cost comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FinancialPeriod {
    #[default]
    Monthly,
    Quarterly,
    Annually,
}

impl FinancialPeriod {
    /// Months covered by the period.
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Monthly => 1.0,
            Self::Quarterly => 3.0,
            Self::Annually => 12.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "Monthly",
            Self::Quarterly => "Quarterly",
            Self::Annually => "Annually",
        }
    }
}

impl FromStr for FinancialPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Monthly" => Ok(Self::Monthly),
            "Quarterly" => Ok(Self::Quarterly),
            "Annually" => Ok(Self::Annually),
            other => Err(format!(
                "unknown period \"{other}\", expected Monthly, Quarterly or Annually"
            )),
        }
    }
}

impl fmt::Display for FinancialPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Headcount and cost comparison over one financial period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaffingMetrics {
    pub period: FinancialPeriod,
    pub avg_salary: f64,
    pub existing_count: f64,
    pub target_count: f64,
    pub diff: f64,
    pub current_cost: f64,
    pub new_cost: f64,
    pub savings: f64,
}

impl StaffingMetrics {
    /// Computes the comparison.
    ///
    /// # Arguments
    ///
    /// * `rows` - Service lines
    /// * `avg_salary` - Average monthly salary per head
    /// * `period` - Reporting period
    pub fn compute(rows: &[StaffingRow], avg_salary: f64, period: FinancialPeriod) -> Self {
        let existing_count: f64 = rows.iter().map(|r| r.existing_staff).sum();
        let target_count: f64 = rows.iter().map(|r| r.target_staff).sum();
        let current_cost = existing_count * avg_salary * period.multiplier();
        let new_cost = target_count * avg_salary * period.multiplier();
        Self {
            period,
            avg_salary,
            existing_count,
            target_count,
            diff: existing_count - target_count,
            current_cost,
            new_cost,
            savings: current_cost - new_cost,
        }
    }
}

impl fmt::Display for StaffingMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Staffing Comparison ({}) ---", self.period)?;
        writeln!(
            f,
            "Existing setup:        {} staff, {:.2}",
            self.existing_count, self.current_cost
        )?;
        writeln!(
            f,
            "Single-shift plan:     {} staff, {:.2}",
            self.target_count, self.new_cost
        )?;
        writeln!(f, "Headcount delta:       {}", self.diff)?;
        write!(f, "Total {} savings: {:.2}", self.period, self.savings)
    }
}
