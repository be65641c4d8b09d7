//! `expect` statements.
//!
//! A failed expectation is not an error: it produces a failing [`Verdict`] and
//! the script goes on. Errors are reserved for expectations that cannot be
//! evaluated at all, such as an unknown name.

use crate::bindings::Bindings;
use crate::commands::{CmdMessage, CmdResult, Verdict};
use crate::error::{Result, SeqlabError};
use crate::script::{Expectation, Statement};
use crate::seq::{GrowthPolicy, SeqErrorKind};

use super::helpers::index;

pub fn run(
    bindings: &mut Bindings,
    policy: &GrowthPolicy,
    expectation: &Expectation,
) -> Result<CmdResult> {
    let verdict = match expectation {
        Expectation::Len { target, expected } => {
            compare(&format!("len {}", target), *expected, bindings.seq(target)?.len())
        }
        Expectation::Cap { target, expected } => compare(
            &format!("cap {}", target),
            *expected,
            bindings.seq(target)?.capacity(),
        ),
        Expectation::Items { target, expected } => {
            let seq = bindings.seq(target)?;
            let actual = seq.to_vec();
            if &actual == expected {
                Verdict::pass(format!("items {} = {}", target, seq))
            } else {
                Verdict::fail(format!(
                    "items {}: expected {:?}, got {:?}",
                    target, expected, actual
                ))
            }
        }
        Expectation::Get {
            target,
            index: raw,
            expected,
        } => {
            let seq = bindings.seq(target)?;
            let actual = seq.get(index(*raw, seq.len())?)?;
            compare(&format!("{}[{}]", target, raw), *expected, actual)
        }
        Expectation::Value { target, expected } => compare(
            &format!("value {}", target),
            *expected,
            bindings.accumulator(target)?.total(),
        ),
        Expectation::Shared { left, right } => {
            let shared = bindings.seq(left)?.shares_store_with(bindings.seq(right)?);
            if shared {
                Verdict::pass(format!("{} and {} share a store", left, right))
            } else {
                Verdict::fail(format!("{} and {} do not share a store", left, right))
            }
        }
        Expectation::Distinct { left, right } => {
            let shared = bindings.seq(left)?.shares_store_with(bindings.seq(right)?);
            if shared {
                Verdict::fail(format!("{} and {} share a store", left, right))
            } else {
                Verdict::pass(format!("{} and {} use distinct stores", left, right))
            }
        }
        Expectation::Fails { kind, statement } => fails(bindings, policy, *kind, statement)?,
    };

    let message = if verdict.passed {
        CmdMessage::success(format!("ok: {}", verdict.detail))
    } else {
        CmdMessage::error(format!("FAILED: {}", verdict.detail))
    };
    let mut result = CmdResult::default().with_verdict(verdict);
    result.add_message(message);
    Ok(result)
}

fn compare<T>(what: &str, expected: T, actual: T) -> Verdict
where
    T: PartialEq + std::fmt::Display,
{
    if expected == actual {
        Verdict::pass(format!("{} = {}", what, actual))
    } else {
        Verdict::fail(format!("{}: expected {}, got {}", what, expected, actual))
    }
}

/// Runs `statement` and checks that it fails with a bounds error of `kind`.
/// Errors other than bounds errors propagate.
fn fails(
    bindings: &mut Bindings,
    policy: &GrowthPolicy,
    kind: SeqErrorKind,
    statement: &Statement,
) -> Result<Verdict> {
    match super::execute(bindings, policy, statement) {
        Ok(_) => Ok(Verdict::fail(format!(
            "expected {} error from `{}`, but it succeeded",
            kind, statement
        ))),
        Err(SeqlabError::Seq(err)) if err.kind() == kind => Ok(Verdict::pass(format!(
            "`{}` failed: {}",
            statement, err
        ))),
        Err(SeqlabError::Seq(err)) => Ok(Verdict::fail(format!(
            "expected {} error from `{}`, got {} error: {}",
            kind,
            statement,
            err.kind(),
            err
        ))),
        Err(other) => Err(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::Value;
    use crate::capture::Accumulator;
    use crate::seq::Seq;

    fn check(bindings: &mut Bindings, src: &str) -> Verdict {
        let expectation = match src.parse::<Statement>().unwrap() {
            Statement::Expect(e) => e,
            other => panic!("not an expectation: {}", other),
        };
        run(bindings, &GrowthPolicy::default(), &expectation)
            .unwrap()
            .verdict
            .unwrap()
    }

    fn arr() -> Bindings {
        let mut bindings = Bindings::new();
        let owner: Seq<i64> = Seq::from(vec![1, 2, 3, 4, 5]);
        bindings.bind("s", Value::Seq(owner.slice(1, 4).unwrap()));
        bindings.bind("copy", Value::Seq(owner.copy_of()));
        bindings.bind("arr", Value::Seq(owner));
        bindings
    }

    #[test]
    fn len_and_cap() {
        let mut bindings = arr();
        assert!(check(&mut bindings, "expect len s 3").passed);
        assert!(check(&mut bindings, "expect cap s 4").passed);

        let verdict = check(&mut bindings, "expect cap s 5");
        assert!(!verdict.passed);
        assert_eq!(verdict.detail, "cap s: expected 5, got 4");
    }

    #[test]
    fn items_and_get() {
        let mut bindings = arr();
        assert!(check(&mut bindings, "expect items s [2 3 4]").passed);
        assert!(!check(&mut bindings, "expect items s [2 3]").passed);
        assert!(check(&mut bindings, "expect get s 2 4").passed);
    }

    #[test]
    fn get_out_of_range_is_an_error_not_a_verdict() {
        let mut bindings = arr();
        let expectation = Expectation::Get {
            target: "s".into(),
            index: 3,
            expected: 0,
        };
        assert!(run(&mut bindings, &GrowthPolicy::default(), &expectation).is_err());
    }

    #[test]
    fn sharing() {
        let mut bindings = arr();
        assert!(check(&mut bindings, "expect shared s arr").passed);
        assert!(check(&mut bindings, "expect distinct copy arr").passed);
        assert!(!check(&mut bindings, "expect distinct s arr").passed);
    }

    #[test]
    fn failure_kinds() {
        let mut bindings = arr();
        assert!(check(&mut bindings, "expect fails range slice arr 2 1").passed);
        assert!(check(&mut bindings, "expect fails index get s 3").passed);
        assert!(check(&mut bindings, "expect fails index set s -1 0").passed);
        assert!(check(&mut bindings, "expect fails capacity make 3 1").passed);
        assert!(
            check(&mut bindings, "expect fails capacity make 0 18446744073709551615").passed
        );
        assert!(check(&mut bindings, "expect fails capacity make 18446744073709551615").passed);

        let wrong_kind = check(&mut bindings, "expect fails index slice arr 2 1");
        assert!(!wrong_kind.passed);
        assert!(wrong_kind.detail.contains("got range error"));

        let no_error = check(&mut bindings, "expect fails range slice arr 0 5");
        assert!(!no_error.passed);
    }

    #[test]
    fn failure_expectation_propagates_unknown_names() {
        let mut bindings = arr();
        let expectation = match "expect fails range slice ghost 0 1"
            .parse::<Statement>()
            .unwrap()
        {
            Statement::Expect(e) => e,
            _ => unreachable!(),
        };
        assert!(matches!(
            run(&mut bindings, &GrowthPolicy::default(), &expectation),
            Err(SeqlabError::UnknownBinding(_))
        ));
    }

    #[test]
    fn accumulator_value() {
        let mut bindings = Bindings::new();
        let mut acc = Accumulator::new(100, 30);
        acc.call();
        bindings.bind("f", Value::Accumulator(acc));
        assert!(check(&mut bindings, "expect value f 130").passed);
    }
}
