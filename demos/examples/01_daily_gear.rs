use paddock::Paddock;
use paddock_demos::common::{get_connector, requested_date};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Create connector (mock in CI when PADDOCK_DEMOS_USE_MOCK is set).
    let connector = get_connector()?;

    // 2. Build the orchestrator; a few meetings at a time keeps the upstream happy.
    let paddock = Paddock::builder()
        .with_connector(connector)
        .meeting_concurrency(4)
        .build()?;

    // 3. Date from argv, defaulting to today in Melbourne.
    let date = requested_date();
    println!("Fetching gear changes for {date}...");
    let report = paddock.fetch_gear_for_date(&date).await?;

    // 4. Print a compact summary, then the JSON the service would return.
    for m in &report.meetings {
        let label = m.meeting.as_deref().unwrap_or("(unknown venue)");
        println!("{label} [{:?}]", m.meeting_id);
        for race in &m.races {
            for r in &race.runners {
                let no = match r.runner_number {
                    Some(n) => n.to_string(),
                    None => "-".to_string(),
                };
                let name = r.horse_name.as_deref().unwrap_or("?");
                println!("  R{} #{no} {name}: {}", race.race_number, r.gear_change);
            }
        }
    }
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
