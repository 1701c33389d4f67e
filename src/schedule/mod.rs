pub mod monthly;
pub mod yearly;

use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::engine::PeriodRecord;

pub use monthly::MonthlyAggregator;
pub use yearly::YearlyAggregator;

/// a schedule row that can be rendered or exported
pub trait ScheduleRow {
    /// value of the first column, e.g. `3` or `Y1-M4`
    fn label(&self) -> String;
    fn start_balance(&self) -> &Money;
    fn contributions(&self) -> &Money;
    fn interest(&self) -> &Money;
    fn end_balance(&self) -> &Money;
}

/// one year of the projection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyRow {
    pub year: u32,
    #[serde(default)]
    pub start_balance: Money,
    #[serde(default)]
    pub contributions: Money,
    #[serde(default)]
    pub interest: Money,
    #[serde(default)]
    pub end_balance: Money,
}

/// one display month of the projection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyRow {
    pub month: String,
    #[serde(default)]
    pub start_balance: Money,
    #[serde(default)]
    pub contributions: Money,
    #[serde(default)]
    pub interest: Money,
    #[serde(default)]
    pub end_balance: Money,
}

impl MonthlyRow {
    /// label for a zero-based month index, e.g. 13 -> `Y2-M2`
    pub fn label_for(month_index: u32) -> String {
        format!("Y{}-M{}", month_index / 12 + 1, month_index % 12 + 1)
    }
}

impl ScheduleRow for YearlyRow {
    fn label(&self) -> String {
        self.year.to_string()
    }

    fn start_balance(&self) -> &Money {
        &self.start_balance
    }

    fn contributions(&self) -> &Money {
        &self.contributions
    }

    fn interest(&self) -> &Money {
        &self.interest
    }

    fn end_balance(&self) -> &Money {
        &self.end_balance
    }
}

impl ScheduleRow for MonthlyRow {
    fn label(&self) -> String {
        self.month.clone()
    }

    fn start_balance(&self) -> &Money {
        &self.start_balance
    }

    fn contributions(&self) -> &Money {
        &self.contributions
    }

    fn interest(&self) -> &Money {
        &self.interest
    }

    fn end_balance(&self) -> &Money {
        &self.end_balance
    }
}

/// running totals for the row currently being built
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RowTotals {
    pub start_balance: Money,
    pub contributions: Money,
    pub interest: Money,
    pub end_balance: Money,
}

impl RowTotals {
    pub fn opening(balance: Money) -> Self {
        Self {
            start_balance: balance.clone(),
            contributions: Money::zero(),
            interest: Money::zero(),
            end_balance: balance,
        }
    }

    pub fn absorb(&mut self, record: &PeriodRecord) {
        self.contributions += &record.contribution;
        self.interest += &record.interest;
        self.end_balance = record.balance_after.clone();
    }

    /// hand back the finished totals and start a new row at the closing balance
    pub fn close(&mut self) -> RowTotals {
        let opening = RowTotals::opening(self.end_balance.clone());
        std::mem::replace(self, opening)
    }
}
