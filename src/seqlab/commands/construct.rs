use crate::bindings::Bindings;
use crate::capture::Accumulator;
use crate::error::Result;
use crate::seq::Seq;

pub fn nil() -> Seq<i64> {
    Seq::new()
}

pub fn literal(values: &[i64]) -> Seq<i64> {
    Seq::from_vec(values.to_vec())
}

/// `make LEN` or `make LEN CAP`: zero-filled, length `len`.
pub fn make(len: usize, cap: Option<usize>) -> Result<Seq<i64>> {
    match cap {
        Some(cap) => Ok(Seq::with_len_and_capacity(len, cap)?),
        None => Ok(Seq::with_len(len)?),
    }
}

pub fn copy(bindings: &Bindings, source: &str) -> Result<Seq<i64>> {
    Ok(bindings.seq(source)?.copy_of())
}

pub fn accumulator(start: i64, step: i64) -> Accumulator {
    Accumulator::new(start, step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::Value;
    use crate::error::SeqlabError;
    use crate::seq::{SeqError, SeqErrorKind};

    #[test]
    fn literal_sizes_capacity_to_elements() {
        let s = literal(&[1, 2, 3]);
        assert_eq!(s.len(), 3);
        assert_eq!(s.capacity(), 3);
    }

    #[test]
    fn make_with_capacity() {
        let s = make(3, Some(5)).unwrap();
        assert_eq!(s.to_vec(), vec![0, 0, 0]);
        assert_eq!(s.capacity(), 5);
    }

    #[test]
    fn make_rejects_small_capacity() {
        match make(3, Some(1)) {
            Err(SeqlabError::Seq(e)) => assert_eq!(e.kind(), SeqErrorKind::Capacity),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn copy_detaches_from_source() {
        let mut bindings = Bindings::new();
        bindings.bind("a", Value::Seq(literal(&[1, 2])));
        let c = copy(&bindings, "a").unwrap();
        assert!(!c.shares_store_with(bindings.seq("a").unwrap()));
        assert_eq!(
            c.get(2).unwrap_err(),
            SeqError::IndexOutOfRange { index: 2, len: 2 }
        );
    }

    #[test]
    fn nil_is_nil() {
        assert!(nil().is_nil());
    }
}
