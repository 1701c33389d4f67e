use crate::config::InvestmentParameters;
use crate::decimal::Money;

/// contributions falling into one compounding period
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScheduledContribution {
    pub events: u32,
    pub amount: Money,
}

/// spreads an annual contribution total over compounding periods
///
/// The carry tracker holds the fractional event count as an exact fraction
/// `carry / periods_per_year`; each period adds `contributions_per_year` to the
/// numerator and every whole unit becomes one event. After `periods_per_year`
/// periods exactly `contributions_per_year` events have fired.
#[derive(Debug, Clone)]
pub struct ContributionScheduler {
    contributions_per_year: u32,
    periods_per_year: u32,
    per_event: Money,
    carry: u32,
}

impl ContributionScheduler {
    pub fn new(annual_total: Money, contributions_per_year: u32, periods_per_year: u32) -> Self {
        Self {
            contributions_per_year,
            periods_per_year,
            per_event: annual_total.split(contributions_per_year),
            carry: 0,
        }
    }

    pub fn from_parameters(params: &InvestmentParameters) -> Self {
        Self::new(
            params.annual_contribution(),
            params.contributions_per_year(),
            params.periods_per_year(),
        )
    }

    pub fn per_event(&self) -> Money {
        self.per_event.clone()
    }

    /// advance one compounding period
    pub fn next_period(&mut self) -> ScheduledContribution {
        if self.contributions_per_year == 0 || self.periods_per_year == 0 {
            return ScheduledContribution::default();
        }

        self.carry += self.contributions_per_year;
        let mut events = 0;
        while self.carry >= self.periods_per_year {
            self.carry -= self.periods_per_year;
            events += 1;
        }

        ScheduledContribution {
            events,
            amount: self.per_event.times(events),
        }
    }
}

impl Iterator for ContributionScheduler {
    type Item = ScheduledContribution;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_period())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events_per_period(cpy: u32, ppy: u32, periods: usize) -> Vec<u32> {
        ContributionScheduler::new(Money::from_major(1_200), cpy, ppy)
            .take(periods)
            .map(|c| c.events)
            .collect()
    }

    #[test]
    fn test_aligned_monthly() {
        assert_eq!(events_per_period(12, 12, 12), vec![1; 12]);
    }

    #[test]
    fn test_quarterly_into_monthly_periods() {
        assert_eq!(
            events_per_period(4, 12, 12),
            vec![0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1]
        );
    }

    #[test]
    fn test_many_events_per_period() {
        // twelve monthly contributions all land in the single annual period
        let scheduled: Vec<ScheduledContribution> =
            ContributionScheduler::new(Money::from_major(1_200), 12, 1).take(2).collect();
        assert_eq!(scheduled[0].events, 12);
        assert_eq!(scheduled[0].amount, Money::from_major(1_200));
        assert_eq!(scheduled[1].events, 12);
    }

    #[test]
    fn test_misaligned_counts_are_exact() {
        for &ppy in &[1u32, 2, 4, 12, 52, 365] {
            for cpy in 0..=365u32 {
                let total: u32 = events_per_period(cpy, ppy, (ppy * 3) as usize).iter().sum();
                assert_eq!(total, cpy * 3, "cpy={} ppy={}", cpy, ppy);
            }
        }
    }

    #[test]
    fn test_zero_contributions() {
        let mut scheduler = ContributionScheduler::new(Money::from_major(500), 0, 12);
        for _ in 0..24 {
            assert_eq!(scheduler.next_period(), ScheduledContribution::default());
        }
        assert_eq!(scheduler.per_event(), Money::zero());
    }

    #[test]
    fn test_per_event_amount() {
        let mut scheduler = ContributionScheduler::new(Money::from_major(100), 3, 12);
        let amounts: Vec<Money> = (0..12).map(|_| scheduler.next_period().amount).collect();
        let total: Money = amounts.iter().sum();
        assert_eq!(total, Money::from_str_exact("99.99999999").unwrap());
        assert_eq!(amounts.iter().filter(|a| !a.is_zero()).count(), 3);
    }
}
