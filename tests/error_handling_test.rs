use enumflow::{Enumerable, EngineError, Value};

fn ints(values: &[i64]) -> Enumerable {
    Enumerable::from_values(values.iter().copied().map(Value::Integer).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_over_empty_is_empty_sequence() {
        assert!(matches!(
            Enumerable::empty().first(),
            Err(EngineError::EmptySequence { .. })
        ));
    }

    #[test]
    fn test_single_over_empty_is_empty_sequence() {
        assert!(matches!(
            Enumerable::empty().single(),
            Err(EngineError::EmptySequence { .. })
        ));
    }

    #[test]
    fn test_single_over_two_is_ambiguous_match() {
        assert!(matches!(
            ints(&[1, 1]).single(),
            Err(EngineError::AmbiguousMatch { .. })
        ));
    }

    #[test]
    fn test_single_or_default_still_rejects_multiple() {
        assert!(matches!(
            ints(&[1, 2]).single_or_default(),
            Err(EngineError::AmbiguousMatch { .. })
        ));
    }

    #[test]
    fn test_min_max_over_empty() {
        assert!(matches!(
            Enumerable::empty().min(),
            Err(EngineError::EmptySequence { .. })
        ));
        assert!(matches!(
            Enumerable::empty().max(),
            Err(EngineError::EmptySequence { .. })
        ));
    }

    #[test]
    fn test_reduce_over_empty() {
        assert!(matches!(
            Enumerable::empty().reduce(|acc, v| acc.add(v)),
            Err(EngineError::EmptySequence { .. })
        ));
    }

    #[test]
    fn test_average_over_empty() {
        assert!(matches!(
            Enumerable::empty().average(),
            Err(EngineError::EmptySequence { .. })
        ));
    }

    #[test]
    fn test_to_map_with_array_key_is_invalid_key() {
        let bad = Enumerable::from_pairs(vec![(
            Value::Array(vec![Value::Integer(1)]),
            Value::Integer(1),
        )]);
        assert!(matches!(
            bad.to_map(),
            Err(EngineError::InvalidKey { .. })
        ));
    }

    #[test]
    fn test_sum_over_non_numeric_is_type_error() {
        let words = Enumerable::from_values(vec![Value::String("a".into())]);
        assert!(matches!(
            words.sum(),
            Err(EngineError::TypeError { .. })
        ));
    }

    #[test]
    fn test_average_over_non_numeric_is_type_error() {
        let mixed = Enumerable::from_values(vec![Value::Integer(1), Value::Boolean(true)]);
        assert!(matches!(
            mixed.average(),
            Err(EngineError::TypeError { .. })
        ));
    }

    #[test]
    fn test_errors_are_lazy_not_compositional() {
        // Building an invalid pipeline succeeds; only traversal fails.
        let pipeline = Enumerable::empty().chunk(0).take(5).skip(1);
        assert!(matches!(
            pipeline.to_values(),
            Err(EngineError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_failed_terminal_discards_combinator_state() {
        // A distinct buffer built before the error is not reused: the same
        // facade traversed again sees the full sequence fresh.
        let counter = std::rc::Rc::new(std::cell::Cell::new(0));
        let c = counter.clone();
        let flaky = ints(&[1, 1, 2, 3]).select(move |v, _k| {
            c.set(c.get() + 1);
            if c.get() == 3 {
                Err(EngineError::evaluation_error("transient", None))
            } else {
                Ok(v.clone())
            }
        });

        let deduped = flaky.distinct();
        assert!(deduped.to_values().is_err());
        // The retry starts from a fresh cursor chain with an empty buffer.
        assert_eq!(
            deduped.to_values().unwrap(),
            vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)]
        );
    }

    #[test]
    fn test_error_display_formats() {
        assert_eq!(
            EngineError::empty_sequence("first").to_string(),
            "Empty sequence: 'first' requires at least one element"
        );
        assert_eq!(
            EngineError::type_error("numeric", "String", Some("abc".to_string())).to_string(),
            "Type error: expected numeric, got String for value 'abc'"
        );
        assert_eq!(
            EngineError::ambiguous_match("single", 2).to_string(),
            "Ambiguous match: 'single' expected exactly one element, found 2"
        );
    }
}
