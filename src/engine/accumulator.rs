use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::engine::scheduler::ScheduledContribution;
use crate::types::ContributionTiming;

/// one compounding period of the projection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRecord {
    /// 1-based period index
    pub period: u32,
    pub balance_before: Money,
    pub contribution: Money,
    pub contribution_events: u32,
    pub interest: Money,
    pub balance_after: Money,
}

/// advances the balance one compounding period at a time
#[derive(Debug, Clone)]
pub struct PeriodAccumulator {
    periodic_rate: Rate,
    timing: ContributionTiming,
    period: u32,
    balance: Money,
    total_contributions: Money,
    total_interest: Money,
    contribution_events: u64,
}

impl PeriodAccumulator {
    pub fn new(starting_amount: Money, periodic_rate: Rate, timing: ContributionTiming) -> Self {
        Self {
            periodic_rate,
            timing,
            period: 0,
            balance: starting_amount.clone(),
            total_contributions: starting_amount,
            total_interest: Money::zero(),
            contribution_events: 0,
        }
    }

    /// apply one period's contribution and interest
    ///
    /// A beginning-of-period contribution earns interest in its own period; an
    /// end-of-period contribution does not.
    pub fn step(&mut self, scheduled: ScheduledContribution) -> PeriodRecord {
        let period = self.period + 1;
        let balance_before = self.balance.clone();

        let mut balance = balance_before.clone();
        if self.timing.is_beginning() {
            balance += &scheduled.amount;
        }
        let interest = balance.apply(self.periodic_rate);
        balance += &interest;
        if !self.timing.is_beginning() {
            balance += &scheduled.amount;
        }

        self.total_contributions += &scheduled.amount;
        self.total_interest += &interest;
        self.contribution_events += u64::from(scheduled.events);
        self.balance = balance.clone();
        self.period = period;

        PeriodRecord {
            period,
            balance_before,
            contribution: scheduled.amount,
            contribution_events: scheduled.events,
            interest,
            balance_after: balance,
        }
    }

    pub fn balance(&self) -> Money {
        self.balance.clone()
    }

    /// starting amount plus every contribution applied so far
    pub fn total_contributions(&self) -> Money {
        self.total_contributions.clone()
    }

    pub fn total_interest(&self) -> Money {
        self.total_interest.clone()
    }

    pub fn contribution_events(&self) -> u64 {
        self.contribution_events
    }

    pub fn periods_elapsed(&self) -> u32 {
        self.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn contribution(amount: i64) -> ScheduledContribution {
        ScheduledContribution {
            events: 1,
            amount: Money::from_major(amount),
        }
    }

    #[test]
    fn test_end_of_period_ordering() {
        let rate = Rate::from_percentage(dec!(5));
        let mut acc = PeriodAccumulator::new(Money::from_major(1_000), rate, ContributionTiming::End);

        let record = acc.step(contribution(100));
        assert_eq!(record.interest, Money::from_major(50));
        assert_eq!(record.balance_after, Money::from_major(1_150));

        let record = acc.step(contribution(100));
        assert_eq!(record.balance_before, Money::from_major(1_150));
        assert_eq!(record.interest, Money::from_decimal(dec!(57.5)));
        assert_eq!(record.balance_after, Money::from_decimal(dec!(1307.5)));
        assert_eq!(acc.total_contributions(), Money::from_major(1_200));
        assert_eq!(acc.total_interest(), Money::from_decimal(dec!(107.5)));
    }

    #[test]
    fn test_beginning_of_period_ordering() {
        let rate = Rate::from_percentage(dec!(5));
        let mut acc =
            PeriodAccumulator::new(Money::from_major(1_000), rate, ContributionTiming::Beginning);

        let record = acc.step(contribution(100));
        assert_eq!(record.interest, Money::from_major(55));
        assert_eq!(record.balance_after, Money::from_major(1_155));
    }

    #[test]
    fn test_negative_rate_shrinks_balance() {
        let rate = Rate::from_percentage(dec!(-10)).periodic(4);
        let mut acc = PeriodAccumulator::new(Money::from_major(1_000), rate, ContributionTiming::End);

        let record = acc.step(ScheduledContribution::default());
        assert_eq!(record.interest, Money::from_major(-25));
        assert_eq!(record.balance_after, Money::from_major(975));
        assert!(acc.total_interest().is_negative());
    }

    #[test]
    fn test_total_loss_rate() {
        let rate = Rate::from_percentage(dec!(-100));
        let mut acc = PeriodAccumulator::new(Money::from_major(1_000), rate, ContributionTiming::End);
        let record = acc.step(ScheduledContribution::default());
        assert!(record.balance_after.is_zero());
    }

    #[test]
    fn test_balance_grows_past_fixed_width_range() {
        let rate = Rate::from_percentage(dec!(1000));
        let mut acc = PeriodAccumulator::new(
            Money::from_decimal(Decimal::MAX),
            rate,
            ContributionTiming::End,
        );
        let record = acc.step(ScheduledContribution::default());
        assert_eq!(record.interest, Money::from_decimal(Decimal::MAX).times(10));
        assert_eq!(acc.balance(), Money::from_decimal(Decimal::MAX).times(11));
        assert_eq!(acc.periods_elapsed(), 1);
    }

    #[test]
    fn test_row_identity_holds_each_period() {
        let rate = Rate::from_percentage(dec!(7)).periodic(365);
        let mut acc = PeriodAccumulator::new(Money::from_major(20_000), rate, ContributionTiming::Beginning);
        for _ in 0..365 {
            let r = acc.step(contribution(33));
            assert_eq!(r.balance_after, r.balance_before.clone() + &r.contribution + &r.interest);
        }
        assert_eq!(acc.contribution_events(), 365);
    }
}
