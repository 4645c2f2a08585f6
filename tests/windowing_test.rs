use enumflow::{Enumerable, EngineError, Value};
use std::cell::Cell;
use std::rc::Rc;

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
    fn test_take_bounds() {
        let source = ints(&[1, 2, 3, 4, 5]);
        assert_eq!(source.take(2).to_values().unwrap(), int_values(&[1, 2]));
        assert_eq!(source.take(0).to_values().unwrap(), int_values(&[]));
        assert_eq!(
            source.take(10).to_values().unwrap(),
            int_values(&[1, 2, 3, 4, 5])
        );
    }

    #[test]
    fn test_skip_bounds() {
        let source = ints(&[1, 2, 3, 4, 5]);
        assert_eq!(source.skip(3).to_values().unwrap(), int_values(&[4, 5]));
        assert_eq!(
            source.skip(0).to_values().unwrap(),
            int_values(&[1, 2, 3, 4, 5])
        );
        assert_eq!(source.skip(10).to_values().unwrap(), int_values(&[]));
    }

    #[test]
    fn test_take_skip_preserve_keys() {
        let pairs = ints(&[10, 20, 30, 40]).skip(2).to_pairs().unwrap();
        assert_eq!(
            pairs,
            vec![
                (Value::Integer(2), Value::Integer(30)),
                (Value::Integer(3), Value::Integer(40)),
            ]
        );
    }

    #[test]
    fn test_take_last_window() {
        let source = ints(&[1, 2, 3, 4, 5]);
        assert_eq!(source.take_last(2).to_values().unwrap(), int_values(&[4, 5]));
    }

    #[test]
    fn test_take_last_clamps_to_whole_sequence() {
        let source = ints(&[1, 2, 3, 4, 5]);
        assert_eq!(
            source.take_last(10).to_values().unwrap(),
            int_values(&[1, 2, 3, 4, 5])
        );
    }

    #[test]
    fn test_skip_last_zero_is_unchanged() {
        let source = ints(&[1, 2, 3, 4, 5]);
        assert_eq!(
            source.skip_last(0).to_values().unwrap(),
            int_values(&[1, 2, 3, 4, 5])
        );
    }

    #[test]
    fn test_skip_last_clamps_to_empty() {
        let source = ints(&[1, 2, 3, 4, 5]);
        assert_eq!(source.skip_last(10).to_values().unwrap(), int_values(&[]));
        assert_eq!(source.skip_last(3).to_values().unwrap(), int_values(&[1, 2]));
    }

    #[test]
    fn test_take_while_stops_at_first_failure() {
        let calls = Rc::new(Cell::new(0));
        let c = calls.clone();
        let result = ints(&[1, 2, 3, 4, 5])
            .take_while(move |v, _k| {
                c.set(c.get() + 1);
                Ok(matches!(v, Value::Integer(i) if *i < 3))
            })
            .to_values()
            .unwrap();

        assert_eq!(result, int_values(&[1, 2]));
        assert_eq!(calls.get(), 3, "predicate runs once per examined element");
    }

    #[test]
    fn test_skip_while_yields_remainder_including_boundary() {
        let result = ints(&[1, 2, 3, 4, 1])
            .skip_while(|v, _k| Ok(matches!(v, Value::Integer(i) if *i < 3)))
            .to_values()
            .unwrap();
        assert_eq!(result, int_values(&[3, 4, 1]));
    }

    #[test]
    fn test_skip_while_never_reevaluates_after_skip() {
        let calls = Rc::new(Cell::new(0));
        let c = calls.clone();
        let result = ints(&[1, 2, 3, 4, 5])
            .skip_while(move |v, _k| {
                c.set(c.get() + 1);
                Ok(matches!(v, Value::Integer(i) if *i < 3))
            })
            .to_values()
            .unwrap();

        assert_eq!(result, int_values(&[3, 4, 5]));
        assert_eq!(
            calls.get(),
            3,
            "predicate stops running at the first non-match"
        );
    }

    #[test]
    fn test_chunk_sizes() {
        let chunks = ints(&[1, 2, 3, 4, 5]).chunk(2).to_values().unwrap();
        assert_eq!(
            chunks,
            vec![
                Value::Array(int_values(&[1, 2])),
                Value::Array(int_values(&[3, 4])),
                Value::Array(int_values(&[5])),
            ]
        );
    }

    #[test]
    fn test_chunk_keys_are_chunk_indexes() {
        let pairs = ints(&[1, 2, 3]).chunk(2).to_pairs().unwrap();
        assert_eq!(pairs[0].0, Value::Integer(0));
        assert_eq!(pairs[1].0, Value::Integer(1));
    }

    #[test]
    fn test_chunk_zero_is_invalid_lazily() {
        let pipeline = ints(&[1, 2, 3]).chunk(0);
        // Composition succeeded; the error surfaces on first pull.
        let err = pipeline.to_values().unwrap_err();
        assert!(matches!(err, EngineError::InvalidArgument { .. }));
    }

    #[test]
    fn test_windowing_composes() {
        let result = ints(&[1, 2, 3, 4, 5, 6, 7, 8])
            .skip(1)
            .take(6)
            .skip_last(2)
            .take_last(3)
            .to_values()
            .unwrap();
        // skip(1)    -> 2..=8
        // take(6)    -> 2..=7
        // skip_last  -> 2..=5
        // take_last  -> 3..=5
        assert_eq!(result, int_values(&[3, 4, 5]));
    }
}
