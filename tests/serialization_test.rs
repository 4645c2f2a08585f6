use chrono::{NaiveDate, NaiveDateTime};
use enumflow::{Enumerable, Value};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars_serialize_natively() {
        assert_eq!(serde_json::to_string(&Value::Integer(42)).unwrap(), "42");
        assert_eq!(serde_json::to_string(&Value::Float(1.5)).unwrap(), "1.5");
        assert_eq!(
            serde_json::to_string(&Value::String("hi".into())).unwrap(),
            "\"hi\""
        );
        assert_eq!(
            serde_json::to_string(&Value::Boolean(true)).unwrap(),
            "true"
        );
        assert_eq!(serde_json::to_string(&Value::Null).unwrap(), "null");
    }

    #[test]
    fn test_temporal_values_serialize_as_formatted_strings() {
        let date = Value::Date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(serde_json::to_string(&date).unwrap(), "\"2024-01-15\"");

        let ts = Value::Timestamp(
            NaiveDateTime::parse_from_str("2024-01-15 08:30:00", "%Y-%m-%d %H:%M:%S").unwrap(),
        );
        assert_eq!(
            serde_json::to_string(&ts).unwrap(),
            "\"2024-01-15 08:30:00.000\""
        );
    }

    #[test]
    fn test_arrays_serialize_structurally() {
        let array = Value::Array(vec![
            Value::Integer(1),
            Value::String("x".into()),
            Value::Null,
        ]);
        assert_eq!(serde_json::to_string(&array).unwrap(), "[1,\"x\",null]");
    }

    #[test]
    fn test_materialized_pipeline_serializes() {
        let result = Enumerable::from_values(vec![
            Value::Integer(1),
            Value::Integer(2),
            Value::Integer(3),
        ])
        .select(|v, _k| v.add(&Value::Integer(1)))
        .to_values()
        .unwrap();

        assert_eq!(serde_json::to_string(&result).unwrap(), "[2,3,4]");
    }

    #[test]
    fn test_display_formats() {
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(
            Value::Array(vec![Value::Integer(1), Value::Integer(2)]).to_string(),
            "[1, 2]"
        );
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(Value::from(3i64), Value::Integer(3));
        assert_eq!(Value::from(2.5), Value::Float(2.5));
        assert_eq!(Value::from("s"), Value::String("s".into()));
        assert_eq!(Value::from(true), Value::Boolean(true));
        assert_eq!(
            Value::from(vec![Value::Integer(1)]),
            Value::Array(vec![Value::Integer(1)])
        );
    }
}
