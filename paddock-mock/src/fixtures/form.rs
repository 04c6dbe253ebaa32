use paddock_core::RawRecord;

const COLUMNS: [&str; 8] = [
    "Track Name",
    "Race Number",
    "Tab No",
    "Horse Name",
    "Runner Id",
    "GearChanges",
    "Scratched",
    "Forms[0].GearChanges",
];

fn row(cells: [&str; 8]) -> RawRecord {
    RawRecord::from_pairs(COLUMNS.iter().copied().zip(cells))
}

pub fn race(meeting_id: &str, race_number: &str) -> Vec<RawRecord> {
    match (meeting_id, race_number) {
        ("101", "1") => vec![
            row([
                "Caulfield",
                "1",
                "4",
                "Fast Deer",
                "",
                "Blinkers ON",
                "false",
                "",
            ]),
            row([
                "Caulfield",
                "1",
                "2",
                "Quiet Lad",
                "8812",
                "",
                "false",
                "Blinkers OFF",
            ]),
            row([
                "Caulfield",
                "1",
                "7",
                "Swift Arrow",
                "9007",
                "Tongue tie OFF",
                "true",
                "",
            ]),
        ],
        ("101", "2") => vec![row([
            "Caulfield",
            "2",
            "1",
            "Bold Move",
            "8840",
            "Lugging bit first time",
            "false",
            "",
        ])],
        ("202", "1") => vec![
            row([
                "Randwick",
                "1",
                "3",
                "Harbour Light",
                "9101",
                "Winkers ON",
                "false",
                "",
            ]),
            row([
                "Randwick",
                "1",
                "5",
                "Old Salt",
                "9102",
                "",
                "false",
                "Winkers OFF",
            ]),
        ],
        _ => Vec::new(),
    }
}

/// Rows answered for the `raceNumber=0` diagnostic probe.
pub fn probe(meeting_id: &str) -> Vec<RawRecord> {
    race(meeting_id, "1")
}
