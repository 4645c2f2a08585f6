use enumflow::{Comparer, Enumerable, Value};

fn ints(values: &[i64]) -> Enumerable {
    Enumerable::from_values(values.iter().copied().map(Value::Integer).collect())
}

fn int_values(values: &[i64]) -> Vec<Value> {
    values.iter().copied().map(Value::Integer).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_suppresses_duplicates() {
        let result = ints(&[1, 1, 2, 2, 3]).distinct().to_values().unwrap();
        assert_eq!(result, int_values(&[1, 2, 3]));
    }

    #[test]
    fn test_distinct_first_seen_wins() {
        let result = ints(&[1, 2, 3, 4])
            .distinct_by(|v, _k| match v {
                Value::Integer(i) => Ok(Value::Integer(i % 2)),
                other => Ok(other.clone()),
            })
            .to_values()
            .unwrap();
        assert_eq!(result, int_values(&[1, 2]));
    }

    #[test]
    fn test_distinct_identity_mode_keeps_coercible_values() {
        // Identity equality is strict: Integer(1) and Float(1.0) both stay.
        let result = Enumerable::from_values(vec![
            Value::Integer(1),
            Value::Float(1.0),
            Value::Integer(1),
        ])
        .distinct()
        .to_values()
        .unwrap();
        assert_eq!(result, vec![Value::Integer(1), Value::Float(1.0)]);
    }

    #[test]
    fn test_distinct_with_value_comparer_coerces() {
        let result = Enumerable::from_values(vec![
            Value::Integer(1),
            Value::Float(1.0),
            Value::Integer(2),
        ])
        .distinct_with(|v, _k| Ok(v.clone()), Comparer::value())
        .to_values()
        .unwrap();
        assert_eq!(result, vec![Value::Integer(1), Value::Integer(2)]);
    }

    #[test]
    fn test_intersect() {
        let a = ints(&[1, 2, 3]);
        let b = ints(&[2, 3, 4]);
        assert_eq!(a.intersect(&b).to_values().unwrap(), int_values(&[2, 3]));
    }

    #[test]
    fn test_except() {
        let a = ints(&[1, 2, 3]);
        let b = ints(&[2, 3, 4]);
        assert_eq!(a.except(&b).to_values().unwrap(), int_values(&[1]));
    }

    #[test]
    fn test_union_preserves_first_seen_order() {
        let a = ints(&[1, 2, 3]);
        let b = ints(&[2, 3, 4]);
        assert_eq!(
            a.union(&b).to_values().unwrap(),
            int_values(&[1, 2, 3, 4])
        );
    }

    #[test]
    fn test_union_by_projected_key() {
        let a = ints(&[1, 2]);
        let b = ints(&[3, 4]);
        // Key by parity: 1 and 2 cover both classes, so 3 and 4 are dupes.
        let result = a
            .union_by(
                &b,
                |v, _k| match v {
                    Value::Integer(i) => Ok(Value::Integer(i % 2)),
                    other => Ok(other.clone()),
                },
                Comparer::identity(),
            )
            .to_values()
            .unwrap();
        assert_eq!(result, int_values(&[1, 2]));
    }

    #[test]
    fn test_except_by_streams_against_buffered_keys() {
        let a = ints(&[1, 2, 3, 4, 5, 6]);
        let b = ints(&[2]);
        // Drop everything sharing parity with 2.
        let result = a
            .except_by(
                &b,
                |v, _k| match v {
                    Value::Integer(i) => Ok(Value::Integer(i % 2)),
                    other => Ok(other.clone()),
                },
                Comparer::identity(),
            )
            .to_values()
            .unwrap();
        assert_eq!(result, int_values(&[1, 3, 5]));
    }

    #[test]
    fn test_concat_preserves_both_sides_keys() {
        let pairs = ints(&[1, 2]).concat(&ints(&[3])).to_pairs().unwrap();
        assert_eq!(
            pairs,
            vec![
                (Value::Integer(0), Value::Integer(1)),
                (Value::Integer(1), Value::Integer(2)),
                (Value::Integer(0), Value::Integer(3)),
            ]
        );
    }

    #[test]
    fn test_set_ops_are_lazy() {
        // Composing against an erroring pipeline must not traverse it.
        let poisoned = ints(&[1]).select(|_v, _k| {
            Err(enumflow::EngineError::evaluation_error("boom", None))
        });
        let _composed = ints(&[1, 2]).except(&poisoned);
        let _also = ints(&[1, 2]).union(&poisoned);
    }
}
