pub mod accumulator;
pub mod scheduler;

use log::{debug, info};

use crate::config::InvestmentParameters;
use crate::decimal::Money;
use crate::errors::Result;
use crate::result::InvestmentResult;
use crate::schedule::{MonthlyAggregator, YearlyAggregator};

pub use accumulator::{PeriodAccumulator, PeriodRecord};
pub use scheduler::{ContributionScheduler, ScheduledContribution};

/// per-period trace of a projection with its running totals
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionTrace {
    pub records: Vec<PeriodRecord>,
    pub final_balance: Money,
    /// starting amount plus every contribution
    pub total_contributions: Money,
    pub total_interest: Money,
    pub contribution_events: u64,
}

/// engine for compound-interest projections
///
/// Pure and stateless: independent parameter sets may be projected
/// concurrently from any number of threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectionEngine;

impl ProjectionEngine {
    pub fn new() -> Self {
        Self
    }

    /// run the period loop and return every period record
    pub fn trace(&self, params: &InvestmentParameters) -> Result<ProjectionTrace> {
        params.validate()?;

        let periods_per_year = params.periods_per_year();
        let total_periods = params.total_periods();
        let periodic_rate = params.annual_rate().periodic(periods_per_year);
        debug!(
            "projecting {} periods at periodic rate {}",
            total_periods,
            periodic_rate.as_decimal()
        );

        let mut scheduler = ContributionScheduler::from_parameters(params);
        let mut accumulator =
            PeriodAccumulator::new(params.starting_amount(), periodic_rate, params.timing());
        let mut records = Vec::with_capacity(total_periods as usize);

        for _ in 0..total_periods {
            let scheduled = scheduler.next_period();
            records.push(accumulator.step(scheduled));
        }

        Ok(ProjectionTrace {
            records,
            final_balance: accumulator.balance(),
            total_contributions: accumulator.total_contributions(),
            total_interest: accumulator.total_interest(),
            contribution_events: accumulator.contribution_events(),
        })
    }

    /// project and aggregate into yearly and monthly schedules
    pub fn project(&self, params: &InvestmentParameters) -> Result<InvestmentResult> {
        let trace = self.trace(params)?;

        let mut yearly = YearlyAggregator::new(
            params.starting_amount(),
            params.periods_per_year(),
            params.total_periods(),
        );
        let mut monthly = MonthlyAggregator::new(params.starting_amount(), params.periods_per_year());
        for record in &trace.records {
            yearly.push(record);
            monthly.push(record);
        }

        info!(
            "projection complete: {} years, final balance {}, contributions {}, interest {}",
            params.years(),
            trace.final_balance.round_dp(2),
            trace.total_contributions.round_dp(2),
            trace.total_interest.round_dp(2)
        );

        Ok(InvestmentResult::from_parts(
            params.clone(),
            trace.final_balance,
            trace.total_contributions,
            trace.total_interest,
            yearly.finish(),
            monthly.finish(),
        ))
    }
}
