use enumflow::{Comparer, Enumerable, Value};

fn ints(values: &[i64]) -> Enumerable {
    Enumerable::from_values(values.iter().copied().map(Value::Integer).collect())
}

fn int_values(values: &[i64]) -> Vec<Value> {
    values.iter().copied().map(Value::Integer).collect()
}

fn person(name: &str, age: i64) -> Value {
    Value::Array(vec![Value::String(name.to_string()), Value::Integer(age)])
}

fn field(value: &Value, index: usize) -> Value {
    match value {
        Value::Array(items) => items[index].clone(),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_by_ascending() {
        let result = ints(&[3, 1, 2]).order_by(|v, _k| Ok(v.clone())).to_values().unwrap();
        assert_eq!(result, int_values(&[1, 2, 3]));
    }

    #[test]
    fn test_order_by_descending_is_inverted_ascending() {
        let result = ints(&[3, 1, 2])
            .order_by_descending(|v, _k| Ok(v.clone()))
            .to_values()
            .unwrap();
        assert_eq!(result, int_values(&[3, 2, 1]));
    }

    #[test]
    fn test_full_tie_is_stable() {
        let result = ints(&[1, 2, 3])
            .order_by(|_v, _k| Ok(Value::Integer(0)))
            .to_values()
            .unwrap();
        assert_eq!(result, int_values(&[1, 2, 3]));
    }

    #[test]
    fn test_sorted_keys_are_renumbered_from_zero() {
        let pairs = ints(&[30, 10, 20])
            .order_by(|v, _k| Ok(v.clone()))
            .to_pairs()
            .unwrap();
        assert_eq!(
            pairs,
            vec![
                (Value::Integer(0), Value::Integer(10)),
                (Value::Integer(1), Value::Integer(20)),
                (Value::Integer(2), Value::Integer(30)),
            ]
        );
    }

    #[test]
    fn test_then_by_is_a_stable_secondary_sort() {
        let people = Enumerable::from_values(vec![
            person("carol", 30),
            person("alice", 25),
            person("bob", 30),
            person("dave", 25),
        ]);

        let result = people
            .order_by(|v, _k| Ok(field(v, 1)))
            .then_by(|v, _k| Ok(field(v, 0)))
            .to_values()
            .unwrap();

        assert_eq!(
            result,
            vec![
                person("alice", 25),
                person("dave", 25),
                person("bob", 30),
                person("carol", 30),
            ]
        );
    }

    #[test]
    fn test_then_by_descending() {
        let result = ints(&[1, 2, 3, 4, 5])
            .order_by(|v, _k| match v {
                Value::Integer(i) => Ok(Value::Integer(i % 2)),
                other => Ok(other.clone()),
            })
            .then_by_descending(|v, _k| Ok(v.clone()))
            .to_values()
            .unwrap();
        // Evens (parity 0) first, each parity class descending.
        assert_eq!(result, int_values(&[4, 2, 5, 3, 1]));
    }

    #[test]
    fn test_then_by_does_not_mutate_the_receiver() {
        let by_parity = ints(&[1, 2, 3, 4]).order_by(|v, _k| match v {
            Value::Integer(i) => Ok(Value::Integer(i % 2)),
            other => Ok(other.clone()),
        });
        let refined = by_parity.then_by_descending(|v, _k| Ok(v.clone()));

        assert_eq!(refined.to_values().unwrap(), int_values(&[4, 2, 3, 1]));
        // The original ordering still answers with its single rule.
        assert_eq!(by_parity.to_values().unwrap(), int_values(&[2, 4, 1, 3]));
    }

    #[test]
    fn test_order_by_with_custom_comparer() {
        // Order strings by length through a callback comparer.
        let words = Enumerable::from_values(vec![
            Value::String("sequoia".to_string()),
            Value::String("oak".to_string()),
            Value::String("maple".to_string()),
        ]);
        let result = words
            .order_by_with(
                |v, _k| Ok(v.clone()),
                Comparer::from_fn(|a, b| match (a, b) {
                    (Value::String(x), Value::String(y)) => Ok(x.len().cmp(&y.len())),
                    _ => Ok(std::cmp::Ordering::Equal),
                }),
            )
            .to_values()
            .unwrap();
        assert_eq!(
            result,
            vec![
                Value::String("oak".to_string()),
                Value::String("maple".to_string()),
                Value::String("sequoia".to_string()),
            ]
        );
    }

    #[test]
    fn test_ordering_chains_into_plain_operators() {
        let result = ints(&[5, 3, 4, 1, 2])
            .order_by(|v, _k| Ok(v.clone()))
            .take(3)
            .to_values()
            .unwrap();
        assert_eq!(result, int_values(&[1, 2, 3]));
    }

    #[test]
    fn test_incomparable_sort_key_aborts() {
        let mixed = Enumerable::from_values(vec![
            Value::Integer(1),
            Value::String("two".to_string()),
        ]);
        let result = mixed.order_by(|v, _k| Ok(v.clone())).to_values();
        assert!(matches!(
            result,
            Err(enumflow::EngineError::TypeError { .. })
        ));
    }
}
