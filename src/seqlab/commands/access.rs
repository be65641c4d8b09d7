use crate::bindings::Bindings;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;

use super::helpers::index;

pub fn get(bindings: &Bindings, target: &str, raw_index: i64) -> Result<CmdResult> {
    let seq = bindings.seq(target)?;
    let value = seq.get(index(raw_index, seq.len())?)?;
    let mut result = CmdResult::default().with_value(value);
    result.add_message(CmdMessage::info(format!(
        "{}[{}] = {}",
        target, raw_index, value
    )));
    Ok(result)
}

/// Writes through the binding's store. Every binding sharing the slot sees
/// the new value.
pub fn set(bindings: &Bindings, target: &str, raw_index: i64, value: i64) -> Result<CmdResult> {
    let seq = bindings.seq(target)?;
    seq.set(index(raw_index, seq.len())?, value)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "{}[{}] = {}",
        target, raw_index, value
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::Value;
    use crate::error::SeqlabError;
    use crate::seq::{Seq, SeqError};

    fn made() -> Bindings {
        let mut bindings = Bindings::new();
        bindings.bind(
            "m",
            Value::Seq(Seq::with_len_and_capacity(3, 5).unwrap()),
        );
        bindings
    }

    #[test]
    fn set_then_get() {
        let bindings = made();
        set(&bindings, "m", 1, 20).unwrap();
        let result = get(&bindings, "m", 1).unwrap();
        assert_eq!(result.values, vec![20]);
        assert_eq!(result.messages[0].content, "m[1] = 20");
    }

    #[test]
    fn spare_capacity_is_not_addressable() {
        let bindings = made();
        for i in [3, 4] {
            match set(&bindings, "m", i, 40) {
                Err(SeqlabError::Seq(e)) => {
                    assert_eq!(e, SeqError::IndexOutOfRange { index: i, len: 3 })
                }
                other => panic!("unexpected: {:?}", other),
            }
        }
    }

    #[test]
    fn negative_index_fails_before_any_write() {
        let bindings = made();
        assert!(matches!(
            get(&bindings, "m", -1),
            Err(SeqlabError::Seq(SeqError::IndexOutOfRange { index: -1, len: 3 }))
        ));
        assert_eq!(bindings.seq("m").unwrap().to_vec(), vec![0, 0, 0]);
    }

    #[test]
    fn set_through_view_reaches_owner() {
        let mut bindings = Bindings::new();
        let owner: Seq<i64> = Seq::from(vec![1, 2, 3, 4, 5]);
        bindings.bind("v", Value::Seq(owner.slice(1, 4).unwrap()));
        bindings.bind("arr", Value::Seq(owner));

        set(&bindings, "v", 0, 200).unwrap();
        let result = get(&bindings, "arr", 1).unwrap();
        assert_eq!(result.values, vec![200]);
    }
}
