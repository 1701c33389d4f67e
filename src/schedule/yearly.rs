use crate::decimal::Money;
use crate::engine::PeriodRecord;
use crate::schedule::{RowTotals, YearlyRow};

/// reduces period records into one row per projection year
#[derive(Debug, Clone)]
pub struct YearlyAggregator {
    periods_per_year: u32,
    total_periods: u32,
    open: RowTotals,
    rows: Vec<YearlyRow>,
}

impl YearlyAggregator {
    pub fn new(starting_amount: Money, periods_per_year: u32, total_periods: u32) -> Self {
        Self {
            periods_per_year,
            total_periods,
            open: RowTotals::opening(starting_amount),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, record: &PeriodRecord) {
        self.open.absorb(record);

        let year_end = self.periods_per_year > 0 && record.period % self.periods_per_year == 0;
        if year_end || record.period == self.total_periods {
            let totals = self.open.close();
            self.rows.push(YearlyRow {
                year: self.rows.len() as u32 + 1,
                start_balance: totals.start_balance,
                contributions: totals.contributions,
                interest: totals.interest,
                end_balance: totals.end_balance,
            });
        }
    }

    pub fn finish(self) -> Vec<YearlyRow> {
        self.rows
    }
}
