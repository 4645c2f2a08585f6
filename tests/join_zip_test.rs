use enumflow::{Comparer, Enumerable, Value};

fn ints(values: &[i64]) -> Enumerable {
    Enumerable::from_values(values.iter().copied().map(Value::Integer).collect())
}

fn pair(key: i64, tag: &str) -> Value {
    Value::Array(vec![Value::Integer(key), Value::String(tag.to_string())])
}

fn array_field(value: &Value, index: usize) -> Value {
    match value {
        Value::Array(items) => items[index].clone(),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_cardinality() {
        let outer = ints(&[1, 2]);
        let inner = Enumerable::from_values(vec![pair(1, "a"), pair(1, "b"), pair(3, "c")]);

        let result = outer
            .join_with(
                &inner,
                |v, _k| Ok(v.clone()),
                |v, _k| Ok(array_field(v, 0)),
                |outer_v, inner_v| {
                    Ok(Value::Array(vec![
                        outer_v.clone(),
                        array_field(inner_v, 1),
                    ]))
                },
                Comparer::identity(),
            )
            .to_values()
            .unwrap();

        assert_eq!(
            result,
            vec![
                Value::Array(vec![Value::Integer(1), Value::String("a".into())]),
                Value::Array(vec![Value::Integer(1), Value::String("b".into())]),
            ]
        );
    }

    #[test]
    fn test_join_emits_nothing_without_matches() {
        let outer = ints(&[7, 8]);
        let inner = Enumerable::from_values(vec![pair(1, "a")]);

        let result = outer
            .join(
                &inner,
                |v, _k| Ok(v.clone()),
                |v, _k| Ok(array_field(v, 0)),
                |o, i| Ok(Value::Array(vec![o.clone(), i.clone()])),
            )
            .to_values()
            .unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_join_result_carries_outer_key() {
        let outer = ints(&[1]);
        let inner = Enumerable::from_values(vec![pair(1, "a")]);

        let pairs = outer
            .join(
                &inner,
                |v, _k| Ok(v.clone()),
                |v, _k| Ok(array_field(v, 0)),
                |o, _i| Ok(o.clone()),
            )
            .to_pairs()
            .unwrap();
        assert_eq!(pairs, vec![(Value::Integer(0), Value::Integer(1))]);
    }

    #[test]
    fn test_zip_stops_at_shorter_sequence() {
        let left = ints(&[1, 2, 3]);
        let right = ints(&[1, 2]);

        let result = left
            .zip(&right, |a, b| Ok(Value::Array(vec![a.clone(), b.clone()])))
            .to_values()
            .unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(
            result[1],
            Value::Array(vec![Value::Integer(2), Value::Integer(2)])
        );
    }

    #[test]
    fn test_zip_with_empty_is_empty() {
        let result = ints(&[1, 2, 3])
            .zip(&Enumerable::empty(), |a, _b| Ok(a.clone()))
            .to_values()
            .unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_sequence_equal_length_mismatch() {
        assert!(!ints(&[1, 2]).sequence_equal(&ints(&[1, 2, 3])).unwrap());
        assert!(!ints(&[1, 2, 3]).sequence_equal(&ints(&[1, 2])).unwrap());
    }

    #[test]
    fn test_sequence_equal_matches() {
        assert!(ints(&[1, 2, 3]).sequence_equal(&ints(&[1, 2, 3])).unwrap());
        assert!(Enumerable::empty()
            .sequence_equal(&Enumerable::empty())
            .unwrap());
    }

    #[test]
    fn test_sequence_equal_value_mode_coerces() {
        let floats = Enumerable::from_values(vec![Value::Float(1.0), Value::Float(2.0)]);
        assert!(ints(&[1, 2]).sequence_equal(&floats).unwrap());
        assert!(!ints(&[1, 2])
            .sequence_equal_with(&floats, Comparer::identity())
            .unwrap());
    }

    #[test]
    fn test_join_against_one_shot_inner() {
        let inner = Enumerable::from_iter(vec![pair(2, "x")]);
        let result = ints(&[1, 2, 3])
            .join(
                &inner,
                |v, _k| Ok(v.clone()),
                |v, _k| Ok(array_field(v, 0)),
                |o, i| Ok(Value::Array(vec![o.clone(), array_field(i, 1)])),
            )
            .to_values()
            .unwrap();
        assert_eq!(
            result,
            vec![Value::Array(vec![
                Value::Integer(2),
                Value::String("x".into())
            ])]
        );
    }
}
