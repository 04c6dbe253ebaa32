use paddock::Paddock;
use paddock_demos::common::{get_connector, requested_date};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let paddock = Paddock::builder()
        .with_connector(get_connector()?)
        .build()?;
    let date = requested_date();

    // Both discovery sources, side by side.
    let discovery = paddock.debug_meetings(&date).await?;
    println!("{}", serde_json::to_string_pretty(&discovery)?);

    // Raw probe of the form endpoint for the first meeting with an id.
    let first_id = discovery
        .from_meeting_csv
        .iter()
        .chain(&discovery.from_updates)
        .find_map(|m| m.meeting_id);
    if let Some(id) = first_id {
        let probe = paddock.debug_form_csv(id).await;
        println!("{}", serde_json::to_string_pretty(&probe)?);
    } else {
        println!("No meeting ids discovered for {date}.");
    }

    Ok(())
}
