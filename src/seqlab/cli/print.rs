use colored::Colorize;
use seqlab::api::{CmdMessage, MessageLevel, ScriptReport};
use seqlab::config::{SeqlabConfig, KEYS};
use seqlab::seq::Reallocation;

const STEP_INDENT: &str = "      ";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        println!("{}", styled(message));
    }
}

fn styled(message: &CmdMessage) -> String {
    match message.level {
        MessageLevel::Info => message.content.dimmed().to_string(),
        MessageLevel::Success => format!("✓ {}", message.content).green().to_string(),
        MessageLevel::Warning => message.content.yellow().to_string(),
        MessageLevel::Error => format!("✗ {}", message.content).red().to_string(),
    }
}

pub(super) fn print_report(report: &ScriptReport) {
    for step in &report.steps {
        println!(
            "{} {}",
            format!("{:>4}", step.line).dimmed(),
            step.source.bold()
        );
        for message in &step.messages {
            println!("{}{}", STEP_INDENT, styled(message));
        }
    }

    if let Some(halt) = &report.halted {
        println!(
            "{} {}",
            format!("{:>4}", halt.line).dimmed(),
            halt.source.bold()
        );
        println!(
            "{}{}",
            STEP_INDENT,
            format!("halted: {}", halt.message).red().bold()
        );
    }

    let summary = format!("{} passed, {} failed", report.passed, report.failed);
    if report.succeeded() {
        println!("{}", summary.green());
    } else {
        println!("{}", summary.red());
    }
}

pub(super) fn print_reallocations(steps: &[Reallocation]) {
    println!("{}", format!("{:>8} {:>8} {:>8}", "len", "from", "to").bold());
    for step in steps {
        println!("{:>8} {:>8} {:>8}", step.len, step.from, step.to);
    }
}

pub(super) fn print_config(config: &SeqlabConfig) {
    for key in KEYS {
        let value = config.get(key).unwrap_or_default();
        println!("{} = {}", key.bold(), value);
    }
}
