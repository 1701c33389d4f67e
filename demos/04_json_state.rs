/// json state - saving parameters and results for later inspection
use investment_projection_rs::{
    CompoundingFrequency, InvestmentParameters, InvestmentResult, Money, ProjectionEngine,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== json state serialization ===\n");

    let params = InvestmentParameters::lump_sum(
        Money::from_major(10_000),
        dec!(4.25),
        3,
        CompoundingFrequency::SemiAnnually,
    )?;

    // stage 1: parameters
    let saved = params.to_json_pretty()?;
    println!("stage 1: parameters");
    println!("-------------------");
    println!("{}\n", saved);

    // stage 2: reload and project
    let reloaded = InvestmentParameters::from_json(&saved)?;
    let result = ProjectionEngine::new().project(&reloaded)?;
    println!("stage 2: result");
    println!("---------------");
    let json = result.to_json_pretty()?;
    println!("{}\n", json);

    // stage 3: round trip
    let restored = InvestmentResult::from_json(&json)?;
    println!("stage 3: restored result matches: {}", restored == result);

    // invalid parameters are rejected on load
    let bad = saved.replace("\"years\": 3", "\"years\": 250");
    match InvestmentParameters::from_json(&bad) {
        Ok(_) => println!("unexpectedly accepted"),
        Err(e) => println!("rejected: {e}"),
    }

    Ok(())
}
