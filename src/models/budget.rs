use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetRecord {
    pub monthly_earning: f64,
    pub daily_earning: f64,
    pub daily_saving: f64,
    pub daily_spending: f64,
}

impl Default for BudgetRecord {
    fn default() -> Self {
        Self {
            monthly_earning: 5000.0,
            daily_earning: 167.0,
            daily_saving: 50.0,
            daily_spending: 80.0,
        }
    }
}

impl BudgetRecord {
    /// Replaces negative or non-finite amounts with 0, the same coercion the
    /// edit form applies to unparsable input.
    pub fn sanitized(self) -> Self {
        Self {
            monthly_earning: coerce_amount(self.monthly_earning),
            daily_earning: coerce_amount(self.daily_earning),
            daily_saving: coerce_amount(self.daily_saving),
            daily_spending: coerce_amount(self.daily_spending),
        }
    }

    pub fn daily_total(&self) -> f64 {
        self.daily_earning + self.daily_saving + self.daily_spending
    }
}

fn coerce_amount(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SliceCategory {
    Earning,
    Saving,
    Spending,
}

impl SliceCategory {
    pub const ORDER: [SliceCategory; 3] = [
        SliceCategory::Earning,
        SliceCategory::Saving,
        SliceCategory::Spending,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SliceCategory::Earning => "Daily Earning",
            SliceCategory::Saving => "Daily Saving",
            SliceCategory::Spending => "Daily Spending",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            SliceCategory::Earning => "#10b981",
            SliceCategory::Saving => "#f59e0b",
            SliceCategory::Spending => "#ef4444",
        }
    }

    pub fn amount(&self, budget: &BudgetRecord) -> f64 {
        match self {
            SliceCategory::Earning => budget.daily_earning,
            SliceCategory::Saving => budget.daily_saving,
            SliceCategory::Spending => budget.daily_spending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub category: SliceCategory,
    pub value: f64,
    pub percentage: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub large_arc: bool,
    pub start: Point,
    pub end: Point,
}

impl PieSlice {
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    pub fn is_empty(&self) -> bool {
        self.span() <= 0.0
    }
}
