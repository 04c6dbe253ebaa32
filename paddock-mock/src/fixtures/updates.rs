use serde_json::{Value, json};

pub fn scratchings() -> Value {
    json!({
        "statusCode": 200,
        "payLoad": [
            {"meetingId": 101, "track": "Caulfield", "meetingDate": "2025-06-01T00:00:00", "runnerId": 9007, "tabNo": 7},
            {"meetingId": 202, "track": "Randwick", "meetingDate": "2025-06-01T00:00:00", "runnerId": 9120, "tabNo": 11},
            {"meetingId": 303, "track": "Eagle Farm", "meetingDate": "2025-05-31T00:00:00", "runnerId": 9311, "tabNo": 2}
        ]
    })
}

pub fn conditions() -> Value {
    json!({
        "statusCode": 200,
        "payLoad": [
            {"meetingId": 202, "track": "Randwick", "trackCondition": "Soft 5", "meetingDate": "01-06-2025"},
            {"meetingId": 404, "track": "Ascot", "trackCondition": "Good 4"}
        ]
    })
}
