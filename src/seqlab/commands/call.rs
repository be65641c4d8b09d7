use crate::bindings::Bindings;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;

pub fn run(bindings: &mut Bindings, target: &str) -> Result<CmdResult> {
    let acc = bindings.accumulator_mut(target)?;
    let total = acc.call();
    let calls = acc.calls();
    let mut result = CmdResult::default().with_value(total);
    result.add_message(CmdMessage::info(format!(
        "{}() = {} (call #{})",
        target, total, calls
    )));
    Ok(result)
}
