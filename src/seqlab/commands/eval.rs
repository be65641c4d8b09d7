use crate::bindings::{Bindings, Value};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::script::Expr;
use crate::seq::GrowthPolicy;

use super::{append, construct, slice};

/// Evaluates an expression against the current bindings without changing
/// them. Append notes (reallocated or in place) come back as messages.
pub fn evaluate(
    bindings: &Bindings,
    policy: &GrowthPolicy,
    expr: &Expr,
) -> Result<(Value, Vec<CmdMessage>)> {
    let value = match expr {
        Expr::Nil => Value::Seq(construct::nil()),
        Expr::Literal(values) => Value::Seq(construct::literal(values)),
        Expr::Make { len, cap } => Value::Seq(construct::make(*len, *cap)?),
        Expr::Copy { source } => Value::Seq(construct::copy(bindings, source)?),
        Expr::Accumulator { start, step } => {
            Value::Accumulator(construct::accumulator(*start, *step))
        }
        Expr::Slice { source, start, end } => {
            Value::Seq(slice::run(bindings, source, *start, *end)?)
        }
        Expr::Append { source, values } => {
            let appended = append::run(bindings, policy, source, values)?;
            let note = appended.message(source);
            return Ok((Value::Seq(appended.seq), vec![note]));
        }
    };
    Ok((value, Vec::new()))
}

/// `let NAME = EXPR`
pub fn bind(
    bindings: &mut Bindings,
    policy: &GrowthPolicy,
    name: &str,
    expr: &Expr,
) -> Result<CmdResult> {
    let (value, notes) = evaluate(bindings, policy, expr)?;
    bindings.bind(name, value);
    let mut result = describe(bindings, name)?;
    result.messages.extend(notes);
    Ok(result)
}

/// A bare expression: evaluated and shown under its own source text.
pub fn show(bindings: &mut Bindings, policy: &GrowthPolicy, expr: &Expr) -> Result<CmdResult> {
    let (value, notes) = evaluate(bindings, policy, expr)?;
    let label = expr.to_string();
    let mut result = match value {
        Value::Seq(seq) => {
            let snapshot = bindings.snapshot_of(&label, &seq);
            let message = CmdMessage::info(snapshot.to_string());
            let mut result = CmdResult::default().with_snapshot(snapshot);
            result.add_message(message);
            result
        }
        Value::Accumulator(acc) => {
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::info(format!("{} = {}", label, acc)));
            result
        }
    };
    result.messages.extend(notes);
    Ok(result)
}

/// Snapshot and message for a bound name.
pub fn describe(bindings: &mut Bindings, name: &str) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if let Value::Accumulator(acc) = bindings.get(name)? {
        result.add_message(CmdMessage::info(format!("{} = {}", name, acc)));
        return Ok(result);
    }
    let snapshot = bindings.snapshot(name)?;
    result.add_message(CmdMessage::info(snapshot.to_string()));
    Ok(result.with_snapshot(snapshot))
}
