use paddock::Paddock;
use paddock_demos::common::{get_connector, requested_date};
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize a human-friendly tracing subscriber with env-based filtering.
    // Suggested: RUST_LOG=info,paddock=debug,paddock_pf=debug
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    // Create connector (mock in CI when PADDOCK_DEMOS_USE_MOCK is set) and build the orchestrator
    let paddock = Paddock::builder()
        .with_connector(get_connector()?)
        .build()?;
    let date = requested_date();

    // Discovery on its own, then the full pipeline
    let _ = paddock.debug_meetings(&date).await?;
    let report = paddock.fetch_gear_for_date(&date).await?;
    tracing::info!(date = %report.date, meetings = report.meetings.len(), "done");

    Ok(())
}
