pub mod config;
pub mod decimal;
pub mod engine;
pub mod errors;
pub mod export;
pub mod report;
pub mod result;
pub mod schedule;
pub mod types;

use std::path::PathBuf;

// re-export key types
pub use config::{ExportOptions, InvestmentParameters, ParametersBuilder};
pub use decimal::{Money, Rate};
pub use engine::{PeriodRecord, ProjectionEngine, ProjectionTrace};
pub use errors::{ProjectionError, Result};
pub use export::{
    spawn_export, CancellationFlag, CsvExporter, ExportHandle, ExportSummary, ProgressSink,
};
pub use report::{ScheduleTable, SummaryReport};
pub use result::InvestmentResult;
pub use schedule::{MonthlyRow, ScheduleRow, YearlyRow};
pub use types::{CompoundingFrequency, ContributionTiming, Currency, Granularity};

// re-export external dependencies that users will need
pub use rust_decimal::Decimal;

/// project an investment from loose inputs
///
/// `compounding_frequency_name` accepts labels such as `"Monthly"` or
/// `"quarterly"`; unknown names fall back to monthly compounding.
pub fn calculate(
    starting_amount: Money,
    years: u32,
    annual_rate_percent: Decimal,
    compounding_frequency_name: &str,
    annual_contribution: Money,
    contributions_per_year: u32,
    contribute_at_beginning: bool,
) -> Result<InvestmentResult> {
    let params = InvestmentParameters::new(
        starting_amount,
        years,
        Rate::from_percentage(annual_rate_percent),
        CompoundingFrequency::from_name(compounding_frequency_name),
        annual_contribution,
        contributions_per_year,
        ContributionTiming::from_flag(contribute_at_beginning),
    )?;
    ProjectionEngine::new().project(&params)
}

/// export one schedule as csv in the background
///
/// Progress and completion are observed through the returned handle. Must be
/// called from within a tokio runtime.
pub fn export_csv(
    result: impl Into<std::sync::Arc<InvestmentResult>>,
    granularity: Granularity,
    destination: impl Into<PathBuf>,
) -> ExportHandle {
    spawn_export(result, ExportOptions::new(granularity, destination))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_calculate_reference_scenario() {
        let result = calculate(
            Money::from_major(1_000),
            2,
            dec!(5),
            "Annually",
            Money::from_major(100),
            1,
            false,
        )
        .unwrap();

        assert_eq!(result.final_balance(), Money::from_decimal(dec!(1307.50)));
        assert_eq!(result.total_contributions(), Money::from_major(1_200));
        assert_eq!(result.total_interest(), Money::from_decimal(dec!(107.50)));
        assert_eq!(result.yearly_rows().len(), 2);
        assert_eq!(result.monthly_rows().len(), 24);
    }

    #[test]
    fn test_calculate_unknown_frequency_defaults_to_monthly() {
        let result = calculate(Money::from_major(1_000), 1, dec!(6), "fortnightly", Money::zero(), 0, true)
            .unwrap();
        assert_eq!(result.parameters().compounding(), CompoundingFrequency::Monthly);
    }

    #[test]
    fn test_calculate_rejects_bad_input() {
        let err = calculate(Money::from_major(-1), 1, dec!(5), "Monthly", Money::zero(), 0, true)
            .unwrap_err();
        assert!(matches!(err, ProjectionError::InvalidParameter { .. }));

        let err = calculate(Money::from_major(1), 1, dec!(5), "Monthly", Money::zero(), 366, true)
            .unwrap_err();
        assert!(matches!(err, ProjectionError::InvalidParameter { .. }));
    }

    #[tokio::test]
    async fn test_export_csv_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedule.csv");
        let result = calculate(
            Money::from_major(20_000),
            10,
            dec!(7),
            "Monthly",
            Money::from_major(12_000),
            12,
            true,
        )
        .unwrap();

        let summary = export_csv(result, Granularity::Monthly, &path).wait().await.unwrap();
        assert_eq!(summary.rows_written, 120);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Month,Start Balance,Contributions,Interest,End Balance\n"));
        assert!(content.lines().nth(1).unwrap().starts_with("Y1-M1,20000.00,1000.00,"));
    }
}
