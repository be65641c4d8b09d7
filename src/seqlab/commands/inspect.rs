use crate::bindings::Bindings;
use crate::commands::CmdResult;
use crate::error::Result;

use super::eval::describe;

pub fn run(bindings: &mut Bindings, target: &str) -> Result<CmdResult> {
    describe(bindings, target)
}
