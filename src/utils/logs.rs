use console::{measure_text_width, Style};
use std::net::SocketAddr;

use crate::error::ValidationError;
use crate::record::{NewStudentRecord, Outcome, StudentInput, StudentRecord};
use crate::settings::StoreKind;

pub const TREE_BRANCH: char = '\u{251C}';
pub const TREE_END: char = '\u{2514}';
pub const TREE_HORIZ: char = '\u{2500}';

const TREE_PREFIX_WIDTH: usize = 4;
const VALUE_COLUMN: usize = 22;

fn tree_branch() -> String {
    dim()
        .apply_to(format!("{}{}{} ", TREE_BRANCH, TREE_HORIZ, TREE_HORIZ))
        .to_string()
}

fn tree_end() -> String {
    dim()
        .apply_to(format!("{}{}{} ", TREE_END, TREE_HORIZ, TREE_HORIZ))
        .to_string()
}

pub fn dim() -> Style {
    Style::new().dim()
}

fn blue() -> Style {
    Style::new().blue()
}

fn magenta() -> Style {
    Style::new().magenta()
}

fn cyan() -> Style {
    Style::new().cyan()
}

fn green() -> Style {
    Style::new().green()
}

fn red() -> Style {
    Style::new().red()
}

fn yellow() -> Style {
    Style::new().yellow()
}

fn bold() -> Style {
    Style::new().bold()
}

fn init_prefix() -> String {
    blue().apply_to("[INIT]").to_string()
}

fn db_prefix() -> String {
    magenta().apply_to("[DB]").to_string()
}

fn student_prefix() -> String {
    cyan().apply_to("[STUDENT]").to_string()
}

pub fn pad_label(label: &str, depth: usize) -> String {
    let prefix_width = depth * TREE_PREFIX_WIDTH;
    let target_width = VALUE_COLUMN.saturating_sub(prefix_width);
    let current_width = measure_text_width(label);
    if current_width < target_width {
        format!("{}{}", label, " ".repeat(target_width - current_width))
    } else {
        format!("{} ", label)
    }
}

fn outcome_style(outcome: Outcome) -> Style {
    match outcome {
        Outcome::Pass => green(),
        Outcome::Fail => yellow(),
    }
}

fn full_name(first: &str, last: &str) -> String {
    format!("{first} {last}")
}

pub fn log_startup_config(host: &str, port: u16, store: StoreKind, database_url: &str) {
    println!(
        "{} starting student-records on {}...",
        init_prefix(),
        cyan().apply_to(format!("{host}:{port}")),
    );
    match store {
        StoreKind::Sqlite => println!(
            "{} store is {} at {}.",
            init_prefix(),
            green().apply_to(store),
            dim().apply_to(database_url)
        ),
        StoreKind::Memory => println!(
            "{} store is {} (records are lost on exit).",
            init_prefix(),
            yellow().apply_to(store)
        ),
    }
}

pub fn log_db_status(message: &str) {
    println!("{} {}", db_prefix(), message);
}

pub fn log_db_ready() {
    println!("{} schema ready!", db_prefix());
}

pub fn log_db_error(error: &str) {
    println!(
        "{} {} {}",
        db_prefix(),
        red().apply_to("error:"),
        dim().apply_to(error)
    );
}

pub fn log_server_starting(addr: SocketAddr) {
    println!(
        "{} listening on {}",
        init_prefix(),
        bold().apply_to(format!("http://{addr}"))
    );
}

pub fn log_student_created(record: &StudentRecord) {
    println!(
        "{} {} #{} {} (total {}, {})",
        student_prefix(),
        green().apply_to("created"),
        bold().apply_to(record.id),
        full_name(&record.first_name, &record.last_name),
        record.total,
        outcome_style(record.outcome).apply_to(record.outcome)
    );
}

pub fn log_student_rejected(first_name: Option<&str>, reason: &str) {
    println!(
        "{} {} {}: {}",
        student_prefix(),
        red().apply_to("rejected"),
        dim().apply_to(first_name.unwrap_or("<unnamed>")),
        reason
    );
}

pub fn log_marks_updated(record: &StudentRecord) {
    println!(
        "{} {} #{} marks {}/{}/{} (total {}, {})",
        student_prefix(),
        cyan().apply_to("updated"),
        bold().apply_to(record.id),
        record.mark1,
        record.mark2,
        record.mark3,
        record.total,
        outcome_style(record.outcome).apply_to(record.outcome)
    );
}

pub fn log_marks_rejected(id: i64, reason: &str) {
    println!(
        "{} {} #{}: {}",
        student_prefix(),
        red().apply_to("update rejected"),
        bold().apply_to(id),
        dim().apply_to(reason)
    );
}

pub fn log_student_not_found(id: i64) {
    println!(
        "{} {} #{}",
        student_prefix(),
        yellow().apply_to("not found"),
        bold().apply_to(id)
    );
}

pub fn log_store_error(error: &str) {
    log_db_error(error);
}

pub fn log_assessment(
    input: &StudentInput,
    age: Option<i32>,
    result: &Result<NewStudentRecord, ValidationError>,
) {
    let mut lines: Vec<String> = Vec::new();

    let name = full_name(
        input.first_name.as_deref().unwrap_or(""),
        input.last_name.as_deref().unwrap_or(""),
    );
    lines.push(format!(
        "{} \"{}\"",
        magenta().apply_to(bold().apply_to("[ASSESSMENT]")),
        dim().apply_to(name.trim())
    ));

    lines.push(String::new());
    lines.push(format!("{}", bold().apply_to("INPUT")));
    let dob = input
        .date_of_birth
        .map(|d| d.to_string())
        .unwrap_or_else(|| "-".to_string());
    let age = age.map(|a| a.to_string()).unwrap_or_else(|| "-".to_string());
    let marks = [input.mark1, input.mark2, input.mark3]
        .iter()
        .map(|m| m.map(|m| m.to_string()).unwrap_or_else(|| "-".to_string()))
        .collect::<Vec<_>>()
        .join(" / ");
    lines.push(format!("{}{} {}", tree_branch(), pad_label("dob", 1), dim().apply_to(dob)));
    lines.push(format!("{}{} {}", tree_branch(), pad_label("age", 1), dim().apply_to(age)));
    lines.push(format!(
        "{}{} {}",
        tree_branch(),
        pad_label("section", 1),
        dim().apply_to(input.section.as_deref().unwrap_or("-"))
    ));
    lines.push(format!(
        "{}{} {}",
        tree_branch(),
        pad_label("gender", 1),
        dim().apply_to(input.gender.as_deref().unwrap_or("-"))
    ));
    lines.push(format!("{}{} {}", tree_end(), pad_label("marks", 1), dim().apply_to(marks)));

    lines.push(String::new());
    match result {
        Ok(record) => {
            lines.push(format!("{}", bold().apply_to("SCORE")));
            lines.push(format!(
                "{}{} {}",
                tree_branch(),
                pad_label("total", 1),
                bold().apply_to(record.total)
            ));
            lines.push(format!(
                "{}{} {:.2}",
                tree_branch(),
                pad_label("average", 1),
                record.average
            ));
            lines.push(format!(
                "{}{} {}",
                tree_end(),
                pad_label("outcome", 1),
                outcome_style(record.outcome).apply_to(record.outcome)
            ));
            lines.push(String::new());
            lines.push(format!("{}", green().apply_to(bold().apply_to("ACCEPTED"))));
        }
        Err(reason) => {
            lines.push(format!("{}", red().apply_to(bold().apply_to("REJECTED"))));
            lines.push(format!("{}{}", tree_end(), reason));
        }
    }

    println!("{}", lines.join("\n"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_label_aligns_values() {
        let padded = pad_label("total", 1);
        assert_eq!(measure_text_width(&padded), VALUE_COLUMN - TREE_PREFIX_WIDTH);

        let long = "x".repeat(40);
        assert_eq!(pad_label(&long, 1), format!("{long} "));
    }
}
