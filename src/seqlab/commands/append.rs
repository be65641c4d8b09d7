use crate::bindings::Bindings;
use crate::commands::CmdMessage;
use crate::error::Result;
use crate::seq::{GrowthPolicy, Seq};

/// Result of an append, with what happened to the store.
#[derive(Debug)]
pub struct Appended {
    pub seq: Seq<i64>,
    pub reallocated: bool,
    pub old_cap: usize,
}

impl Appended {
    pub fn message(&self, source: &str) -> CmdMessage {
        if self.reallocated {
            CmdMessage::info(format!(
                "reallocated: cap {} -> {}",
                self.old_cap,
                self.seq.capacity()
            ))
        } else {
            CmdMessage::warning(format!(
                "appended in place: shares a store with {}",
                source
            ))
        }
    }
}

pub fn run(
    bindings: &Bindings,
    policy: &GrowthPolicy,
    source: &str,
    values: &[i64],
) -> Result<Appended> {
    let base = bindings.seq(source)?;
    let seq = base.append_with(policy, values.iter().copied());
    let reallocated = !values.is_empty() && !seq.shares_store_with(base);
    Ok(Appended {
        reallocated,
        old_cap: base.capacity(),
        seq,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::Value;
    use crate::commands::MessageLevel;
    use crate::seq::AppendMode;

    fn bindings_with(name: &str, seq: Seq<i64>) -> Bindings {
        let mut bindings = Bindings::new();
        bindings.bind(name, Value::Seq(seq));
        bindings
    }

    #[test]
    fn bulk_append_to_nil() {
        let bindings = bindings_with("s", Seq::new());
        let out = run(&bindings, &GrowthPolicy::default(), "s", &[1, 2, 3, 4, 5]).unwrap();
        assert!(out.reallocated);
        assert_eq!(out.seq.len(), 5);
        assert_eq!(out.seq.capacity(), 5);
        assert_eq!(out.message("s").content, "reallocated: cap 0 -> 5");
    }

    #[test]
    fn incremental_append_to_nil() {
        let bindings = bindings_with("s", Seq::new());
        let policy = GrowthPolicy::default().with_mode(AppendMode::Incremental);
        let out = run(&bindings, &policy, "s", &[1, 2, 3, 4, 5]).unwrap();
        assert_eq!(out.seq.capacity(), 8);
    }

    #[test]
    fn in_place_append_warns_about_sharing() {
        let bindings = bindings_with("m", Seq::with_len_and_capacity(1, 4).unwrap());
        let out = run(&bindings, &GrowthPolicy::default(), "m", &[9]).unwrap();
        assert!(!out.reallocated);
        let message = out.message("m");
        assert_eq!(message.level, MessageLevel::Warning);
        assert!(message.content.contains("shares a store with m"));
    }

    #[test]
    fn empty_append_is_not_a_reallocation() {
        let bindings = bindings_with("a", Seq::from(vec![1, 2]));
        let out = run(&bindings, &GrowthPolicy::default(), "a", &[]).unwrap();
        assert!(!out.reallocated);
        assert!(out.seq.shares_store_with(bindings.seq("a").unwrap()));
    }

    #[test]
    fn unknown_source_is_an_error() {
        let bindings = Bindings::new();
        assert!(run(&bindings, &GrowthPolicy::default(), "nope", &[1]).is_err());
    }
}
