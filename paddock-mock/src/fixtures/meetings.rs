use paddock_core::RawRecord;

/// Fixture date served by the mock.
pub const DATE: &str = "2025-06-01";

/// The listing only answers to `meetingDate=YYYY-MM-DD`, like the live endpoint.
pub fn listing(param: &str, value: &str) -> Vec<RawRecord> {
    if param != "meetingDate" || value != DATE {
        return Vec::new();
    }
    vec![RawRecord::from_pairs([
        ("Meeting Id", "101"),
        ("Venue", "Caulfield"),
        ("Meeting Date", "01-06-2025"),
    ])]
}
