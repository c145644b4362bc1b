use serde::Serialize;

/// Body of the walking-session start announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StartWalkingData {
    pub(crate) pedestrian_id: String,
    pub(crate) floor_map_id: String,
}

/// Body of the walking-session finish announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FinishWalkingData {
    pub(crate) trajectory_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_walking_wire_format() {
        let data = StartWalkingData {
            pedestrian_id: "p-1".to_string(),
            floor_map_id: "f-2".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            serde_json::json!({"pedestrianId": "p-1", "floorMapId": "f-2"})
        );
    }

    #[test]
    fn test_finish_walking_wire_format() {
        let data = FinishWalkingData {
            trajectory_id: String::new(),
        };
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            serde_json::json!({"trajectoryId": ""})
        );
    }
}
