use crate::decimal::Money;
use crate::engine::PeriodRecord;
use crate::schedule::{MonthlyRow, RowTotals};

/// maps compounding periods onto a 12-month display grid
///
/// After period `p` the grid has closed `floor(p * 12 / periods_per_year)`
/// months. When one period spans several display months (fewer than twelve
/// periods a year) its activity is booked in the month where the period ends;
/// the months before it get flat rows with no contributions or interest.
#[derive(Debug, Clone)]
pub struct MonthlyAggregator {
    periods_per_year: u32,
    closed_months: u32,
    open: RowTotals,
    rows: Vec<MonthlyRow>,
}

impl MonthlyAggregator {
    pub fn new(starting_amount: Money, periods_per_year: u32) -> Self {
        Self {
            periods_per_year,
            closed_months: 0,
            open: RowTotals::opening(starting_amount),
            rows: Vec::new(),
        }
    }

    /// month boundary reached after `period`, in exact integer arithmetic
    fn month_index(&self, period: u32) -> u32 {
        if self.periods_per_year == 0 {
            return 0;
        }
        (u64::from(period) * 12 / u64::from(self.periods_per_year)) as u32
    }

    pub fn push(&mut self, record: &PeriodRecord) {
        self.open.absorb(record);

        let target = self.month_index(record.period);
        if target <= self.closed_months {
            return;
        }

        let flat_balance = self.open.start_balance.clone();
        while self.closed_months + 1 < target {
            let flat = RowTotals::opening(flat_balance.clone());
            self.emit(flat);
        }
        let totals = self.open.close();
        self.emit(totals);
    }

    fn emit(&mut self, totals: RowTotals) {
        self.rows.push(MonthlyRow {
            month: MonthlyRow::label_for(self.closed_months),
            start_balance: totals.start_balance,
            contributions: totals.contributions,
            interest: totals.interest,
            end_balance: totals.end_balance,
        });
        self.closed_months += 1;
    }

    pub fn finish(self) -> Vec<MonthlyRow> {
        self.rows
    }
}
