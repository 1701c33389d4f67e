use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::decimal::Money;
use crate::export::header_for;
use crate::result::InvestmentResult;
use crate::schedule::ScheduleRow;
use crate::types::{Currency, Granularity};

const LABEL_WIDTH: usize = 8;
const AMOUNT_WIDTH: usize = 16;

/// two decimals with `,` between thousands, e.g. `-1,234,567.80`
pub fn group_thousands(amount: &Money) -> String {
    let fixed = amount.to_fixed(2);
    let (sign, digits) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}.{fraction}")
}

/// amount with currency symbol, sign in front: `-$190.00`
pub fn format_amount(amount: &Money, currency: Currency) -> String {
    if amount.is_negative() {
        format!("-{}{}", currency.symbol(), group_thousands(&amount.abs()))
    } else {
        format!("{}{}", currency.symbol(), group_thousands(amount))
    }
}

fn percent_2dp(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    format!("{rounded}%")
}

/// headline figures of a projection
pub struct SummaryReport<'a> {
    result: &'a InvestmentResult,
    currency: Currency,
}

impl<'a> SummaryReport<'a> {
    pub fn new(result: &'a InvestmentResult, currency: Currency) -> Self {
        Self { result, currency }
    }
}

impl fmt::Display for SummaryReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = self.result.parameters();
        let rate = params.annual_rate();
        let effective = rate
            .effective_annual(params.periods_per_year())
            .map(|r| percent_2dp(r.as_percentage()))
            .unwrap_or_else(|| "n/a".to_string());

        writeln!(f, "Investment summary")?;
        writeln!(f, "  {:<22}{}", "End balance:", format_amount(&self.result.final_balance(), self.currency))?;
        writeln!(f, "  {:<22}{}", "Starting amount:", format_amount(&self.result.starting_amount(), self.currency))?;
        writeln!(
            f,
            "  {:<22}{}",
            "Total contributions:",
            format_amount(&self.result.total_contributions(), self.currency)
        )?;
        writeln!(f, "  {:<22}{}", "Total interest:", format_amount(&self.result.total_interest(), self.currency))?;
        writeln!(f, "  {:<22}{}", "Compounding:", params.compounding())?;
        writeln!(f, "  {:<22}{} (effective {})", "Annual rate:", rate, effective)?;
        writeln!(f, "  {:<22}{}", "Contribution timing:", params.timing())?;
        writeln!(f, "  {:<22}{}", "Years:", params.years())?;
        write!(f, "  {:<22}{}", "Currency:", self.currency)
    }
}

/// fixed-width rendering of the yearly or monthly schedule; every row is printed
pub struct ScheduleTable<'a> {
    result: &'a InvestmentResult,
    granularity: Granularity,
}

impl<'a> ScheduleTable<'a> {
    pub fn new(result: &'a InvestmentResult, granularity: Granularity) -> Self {
        Self { result, granularity }
    }

    fn render<R: ScheduleRow>(&self, f: &mut fmt::Formatter<'_>, rows: &[R]) -> fmt::Result {
        let header = header_for(self.granularity);
        write!(f, "{:<w$}", header[0], w = LABEL_WIDTH)?;
        for title in &header[1..] {
            write!(f, "{:>w$}", title, w = AMOUNT_WIDTH)?;
        }
        writeln!(f)?;
        writeln!(f, "{:-<w$}", "", w = LABEL_WIDTH + 4 * AMOUNT_WIDTH)?;

        for row in rows {
            writeln!(
                f,
                "{:<lw$}{:>w$}{:>w$}{:>w$}{:>w$}",
                row.label(),
                group_thousands(row.start_balance()),
                group_thousands(row.contributions()),
                group_thousands(row.interest()),
                group_thousands(row.end_balance()),
                lw = LABEL_WIDTH,
                w = AMOUNT_WIDTH
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for ScheduleTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.granularity {
            Granularity::Yearly => self.render(f, self.result.yearly_rows()),
            Granularity::Monthly => self.render(f, self.result.monthly_rows()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InvestmentParameters;
    use crate::decimal::Rate;
    use crate::engine::ProjectionEngine;
    use crate::types::{CompoundingFrequency, ContributionTiming};
    use rust_decimal_macros::dec;

    fn reference() -> InvestmentResult {
        let params = InvestmentParameters::new(
            Money::from_major(1_000),
            2,
            Rate::from_percentage(dec!(5)),
            CompoundingFrequency::Annually,
            Money::from_major(100),
            1,
            ContributionTiming::End,
        )
        .unwrap();
        ProjectionEngine::new().project(&params).unwrap()
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(&Money::from_decimal(dec!(1234567.891))), "1,234,567.89");
        assert_eq!(group_thousands(&Money::from_decimal(dec!(999.5))), "999.50");
        assert_eq!(group_thousands(&Money::from_major(-1_234)), "-1,234.00");
        assert_eq!(group_thousands(&Money::from_major(100_000)), "100,000.00");
        assert_eq!(group_thousands(&Money::zero()), "0.00");
    }

    #[test]
    fn test_format_amount_symbols() {
        assert_eq!(format_amount(&Money::from_decimal(dec!(1307.5)), Currency::Usd), "$1,307.50");
        assert_eq!(format_amount(&Money::from_major(2_500), Currency::Eur), "€2,500.00");
        assert_eq!(format_amount(&Money::from_major(-190), Currency::Gbp), "-£190.00");
    }

    #[test]
    fn test_summary_lines() {
        let result = reference();
        let text = SummaryReport::new(&result, Currency::Usd).to_string();

        assert!(text.contains("End balance:          $1,307.50"));
        assert!(text.contains("Starting amount:      $1,000.00"));
        assert!(text.contains("Total contributions:  $1,200.00"));
        assert!(text.contains("Total interest:       $107.50"));
        assert!(text.contains("Annual rate:          5% (effective 5.00%)"));
        assert!(text.contains("End of Period"));
        assert!(text.ends_with("USD ($)"));
    }

    #[test]
    fn test_effective_rate_for_monthly_compounding() {
        let params = InvestmentParameters::lump_sum(
            Money::from_major(1_000),
            dec!(12),
            1,
            CompoundingFrequency::Monthly,
        )
        .unwrap();
        let result = ProjectionEngine::new().project(&params).unwrap();
        let text = SummaryReport::new(&result, Currency::Usd).to_string();
        assert!(text.contains("(effective 12.68%)"));
    }

    #[test]
    fn test_yearly_table() {
        let result = reference();
        let text = ScheduleTable::new(&result, Granularity::Yearly).to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Year"));
        assert!(lines[0].ends_with("End Balance"));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(
            lines[2].split_whitespace().collect::<Vec<_>>(),
            vec!["1", "1,000.00", "100.00", "50.00", "1,150.00"]
        );
        assert_eq!(lines[2].len(), lines[0].len());
    }

    #[test]
    fn test_monthly_table_has_no_row_cap() {
        let params = InvestmentParameters::monthly_saver(
            Money::from_major(20_000),
            Money::from_major(12_000),
            dec!(7),
            100,
        )
        .unwrap();
        let result = ProjectionEngine::new().project(&params).unwrap();
        let text = ScheduleTable::new(&result, Granularity::Monthly).to_string();

        assert_eq!(text.lines().count(), 1_200 + 2);
        assert!(text.lines().last().unwrap().starts_with("Y100-M12"));
    }
}
