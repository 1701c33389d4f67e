/// frequency alignment - contribution events land exactly on the compounding grid
use investment_projection_rs::{
    CompoundingFrequency, ContributionTiming, InvestmentParameters, Money, ProjectionEngine, Rate,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== contribution alignment per compounding frequency ===\n");

    let engine = ProjectionEngine::new();

    // 12 monthly deposits of $100 against every compounding grid
    println!(
        "{:<14}{:>8}{:>10}{:>16}{:>16}",
        "compounding", "periods", "events", "contributed", "final balance"
    );
    for frequency in CompoundingFrequency::ALL {
        let params = InvestmentParameters::new(
            Money::from_major(1_000),
            5,
            Rate::from_percentage(dec!(5)),
            frequency,
            Money::from_major(1_200),
            12,
            ContributionTiming::Beginning,
        )?;
        let trace = engine.trace(&params)?;

        println!(
            "{:<14}{:>8}{:>10}{:>16}{:>16}",
            frequency.name(),
            trace.records.len(),
            trace.contribution_events,
            trace.total_contributions.to_fixed(2),
            trace.final_balance.to_fixed(2)
        );
    }

    // weekly compounding with monthly deposits: most weeks have no deposit
    let params = InvestmentParameters::builder()
        .starting_amount(Money::from_major(1_000))
        .years(1)
        .rate_percent(dec!(5))
        .compounding(CompoundingFrequency::Weekly)
        .contribution(Money::from_major(1_200), 12)
        .build()?;
    let trace = engine.trace(&params)?;

    println!("\nweeks with a deposit (weekly compounding, 12 deposits a year):");
    let weeks: Vec<String> = trace
        .records
        .iter()
        .filter(|r| r.contribution_events > 0)
        .map(|r| r.period.to_string())
        .collect();
    println!("{}", weeks.join(", "));

    Ok(())
}
