use crate::bindings::Bindings;
use crate::error::Result;
use crate::seq::Seq;

use super::helpers::bounds;

pub fn run(bindings: &Bindings, source: &str, start: i64, end: i64) -> Result<Seq<i64>> {
    let base = bindings.seq(source)?;
    let (start, end) = bounds(start, end, base.len())?;
    Ok(base.slice(start, end)?)
}
