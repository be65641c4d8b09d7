//! Script execution.
//!
//! Lines run in order against one [`Bindings`]. A failing expectation is
//! counted and execution continues; any error halts the script at that line.

use crate::bindings::Bindings;
use crate::commands::{execute, Halt, ScriptReport, StepReport};
use crate::script::Line;
use crate::seq::GrowthPolicy;

pub fn run(bindings: &mut Bindings, policy: &GrowthPolicy, lines: &[Line]) -> ScriptReport {
    let mut report = ScriptReport::default();

    for line in lines {
        match execute(bindings, policy, &line.statement) {
            Ok(result) => {
                match &result.verdict {
                    Some(v) if v.passed => report.passed += 1,
                    Some(_) => report.failed += 1,
                    None => {}
                }
                report.steps.push(StepReport {
                    line: line.number,
                    source: line.source.clone(),
                    messages: result.messages,
                    verdict: result.verdict,
                });
            }
            Err(e) => {
                tracing::debug!(line = line.number, error = %e, "script halted");
                report.halted = Some(Halt {
                    line: line.number,
                    source: line.source.clone(),
                    message: e.to_string(),
                });
                break;
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::parse_script;

    fn run_src(src: &str) -> ScriptReport {
        let lines = parse_script(src).unwrap();
        run(&mut Bindings::new(), &GrowthPolicy::default(), &lines)
    }

    #[test]
    fn counts_passes_and_failures() {
        let report = run_src(
            "let a = [1 2 3]\n\
             expect len a 3\n\
             expect cap a 4\n\
             expect items a [1 2 3]\n",
        );
        assert_eq!(report.steps.len(), 4);
        assert_eq!(report.passed, 2);
        assert_eq!(report.failed, 1);
        assert!(report.halted.is_none());
        assert!(!report.succeeded());
    }

    #[test]
    fn hard_error_halts_at_its_line() {
        let report = run_src(
            "let a = [1 2 3]\n\
             \n\
             get a 3\n\
             expect len a 3\n",
        );
        let halt = report.halted.as_ref().unwrap();
        assert_eq!(halt.line, 3);
        assert_eq!(halt.source, "get a 3");
        assert_eq!(halt.message, "index out of range [3] with length 3");
        assert_eq!(report.steps.len(), 1);
        assert_eq!(report.passed, 0);
    }

    #[test]
    fn expected_failure_does_not_halt() {
        let report = run_src(
            "let a = [1 2 3]\n\
             expect fails range slice a 2 1\n\
             expect len a 3\n",
        );
        assert!(report.succeeded());
        assert_eq!(report.passed, 2);
    }
}
