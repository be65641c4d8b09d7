use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, SeqlabError};
use crate::seq::GrowthPolicy;

pub const DEFAULT_COUNT: usize = 2000;
/// `reallocations` walks every length up to the count.
pub const MAX_COUNT: usize = 1_000_000;

/// Reallocation table for `count` single-element appends to an empty
/// sequence, plus the capacity one append of `count` elements would get under
/// the policy's append mode.
pub fn run(policy: &GrowthPolicy, count: usize) -> Result<CmdResult> {
    if count == 0 || count > MAX_COUNT {
        return Err(SeqlabError::Api(format!(
            "count must be between 1 and {}, got {}",
            MAX_COUNT, count
        )));
    }

    let steps = policy.reallocations(count);
    let final_cap = steps.last().map(|s| s.to).unwrap_or(0);
    let one_shot = policy.grow(0, 0, count);

    let mut result = CmdResult::default().with_reallocations(steps);
    result.add_message(CmdMessage::info(format!(
        "{} single appends: {} reallocations, final cap {}",
        count,
        result.reallocations.len(),
        final_cap
    )));
    result.add_message(CmdMessage::info(format!(
        "one append of {} ({}): cap {}",
        count, policy.mode, one_shot
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seq::AppendMode;

    #[test]
    fn table_crosses_threshold() {
        let result = run(&GrowthPolicy::default(), 1600).unwrap();
        let caps: Vec<usize> = result.reallocations.iter().map(|r| r.to).collect();
        assert_eq!(
            caps,
            vec![1, 2, 4, 8, 16, 32, 64, 128, 256, 512, 1024, 1280, 1600]
        );
        assert_eq!(result.reallocations[11].len, 1025);
        assert_eq!(result.reallocations[11].from, 1024);
    }

    #[test]
    fn summary_reflects_mode() {
        let bulk = run(&GrowthPolicy::default(), 5).unwrap();
        assert_eq!(bulk.messages[0].content, "5 single appends: 4 reallocations, final cap 8");
        assert_eq!(bulk.messages[1].content, "one append of 5 (bulk): cap 5");

        let incremental =
            run(&GrowthPolicy::default().with_mode(AppendMode::Incremental), 5).unwrap();
        assert_eq!(
            incremental.messages[1].content,
            "one append of 5 (incremental): cap 8"
        );
    }

    #[test]
    fn count_outside_limits_is_rejected() {
        assert!(run(&GrowthPolicy::default(), 0).is_err());
        assert!(run(&GrowthPolicy::default(), MAX_COUNT + 1).is_err());
        assert!(run(&GrowthPolicy::default(), MAX_COUNT).is_ok());
    }
}
