use schemars::schema_for;

use crate::json::types;

pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&schema_for!(types::JsonFleet))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_mentions_departure_variants() {
        let schema = generate_json_schema().unwrap();

        assert!(schema.contains("\"Fleet\""));
        assert!(schema.contains("first_completion_of"));
        assert!(schema.contains("speed_mph"));
    }
}
