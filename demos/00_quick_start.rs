/// quick start - minimal example to get started
use investment_projection_rs::{calculate, Currency, Money, SummaryReport};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // $20,000 today, $12,000 a year paid monthly, 7% compounded monthly for 10 years
    let result = calculate(
        Money::from_major(20_000),
        10,
        dec!(7),
        "Monthly",
        Money::from_major(12_000),
        12,
        true,
    )?;

    println!("{}", SummaryReport::new(&result, Currency::Usd));

    Ok(())
}
