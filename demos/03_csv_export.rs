/// csv export - background export with progress, then a timed-out export
use std::time::Duration;

use investment_projection_rs::{calculate, export_csv, Granularity, Money};
use rust_decimal_macros::dec;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    println!("=== background csv export ===\n");

    let result = calculate(
        Money::from_major(20_000),
        100,
        dec!(7),
        "Daily",
        Money::from_major(12_000),
        12,
        true,
    )?;

    let out_dir = std::env::temp_dir();
    let monthly_path = out_dir.join("investment_monthly.csv");

    // watch progress while the monthly schedule is written
    let handle = export_csv(result.clone(), Granularity::Monthly, &monthly_path);
    let mut progress = handle.progress();
    let watcher = tokio::spawn(async move {
        while progress.changed().await.is_ok() {
            let percent = *progress.borrow_and_update();
            if percent % 25 == 0 {
                println!("progress: {percent}%");
            }
        }
    });

    let summary = handle.wait().await?;
    watcher.await?;
    println!(
        "wrote {} rows to {}\n",
        summary.rows_written,
        summary.destination.display()
    );

    // an export that does not finish in time is cancelled and leaves no file behind
    let yearly_path = out_dir.join("investment_yearly.csv");
    let handle = export_csv(result, Granularity::Yearly, &yearly_path);
    match handle.wait_timeout(Duration::from_millis(0)).await {
        Ok(summary) => println!("finished before the deadline: {} rows", summary.rows_written),
        Err(e) if e.is_cancelled() => println!("cancelled; {} exists: {}", yearly_path.display(), yearly_path.exists()),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
