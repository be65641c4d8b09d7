use crate::seq::SeqError;

/// Script indexes are signed; negatives fail the same way an index past the
/// end does.
pub fn index(raw: i64, len: usize) -> Result<usize, SeqError> {
    usize::try_from(raw).map_err(|_| SeqError::IndexOutOfRange { index: raw, len })
}

pub fn bounds(start: i64, end: i64, len: usize) -> Result<(usize, usize), SeqError> {
    match (usize::try_from(start), usize::try_from(end)) {
        (Ok(start), Ok(end)) => Ok((start, end)),
        _ => Err(SeqError::Range { start, end, len }),
    }
}
