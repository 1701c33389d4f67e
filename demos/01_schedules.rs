/// schedules - yearly and monthly tables from one projection
use investment_projection_rs::{
    CompoundingFrequency, ContributionTiming, Currency, Granularity, InvestmentParameters, Money,
    ProjectionEngine, ScheduleTable, SummaryReport,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== yearly and monthly schedules ===\n");

    let params = InvestmentParameters::builder()
        .starting_amount(Money::from_major(5_000))
        .years(3)
        .rate_percent(dec!(6.5))
        .compounding(CompoundingFrequency::Quarterly)
        .contribution(Money::from_major(2_400), 4)
        .timing(ContributionTiming::End)
        .build()?;

    let result = ProjectionEngine::new().project(&params)?;

    println!("{}\n", SummaryReport::new(&result, Currency::Eur));

    println!("yearly");
    println!("{}", ScheduleTable::new(&result, Granularity::Yearly));

    // quarterly compounding: two flat months, then the quarter's activity
    println!("monthly");
    println!("{}", ScheduleTable::new(&result, Granularity::Monthly));

    Ok(())
}
