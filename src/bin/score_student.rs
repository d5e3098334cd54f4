use chrono::NaiveDate;
use student_records::clock::{Clock, FixedClock, SystemClock};
use student_records::record::StudentInput;
use student_records::scoring::{age_in_years, validate_and_score_for_create};
use student_records::utils::log_assessment;
use std::env;
use std::process;

fn print_usage() {
    eprintln!("Usage: score-student <first> <last> <dob> <section> <gender> <m1> <m2> <m3>");
    eprintln!("                     [--today <date>]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <dob>            Date of birth as YYYY-MM-DD, or '-' when unknown");
    eprintln!("  <m1> <m2> <m3>   Subject marks, or '-' when missing");
    eprintln!("  --today <date>   Evaluate ages as of this date instead of today");
}

fn optional(arg: &str) -> Option<&str> {
    (arg != "-").then_some(arg)
}

fn parse_date(arg: &str) -> Result<Option<NaiveDate>, String> {
    optional(arg)
        .map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d"))
        .transpose()
        .map_err(|e| format!("invalid date {arg:?}: {e}"))
}

fn parse_mark(arg: &str) -> Result<Option<i64>, String> {
    optional(arg)
        .map(str::parse::<i64>)
        .transpose()
        .map_err(|e| format!("invalid mark {arg:?}: {e}"))
}

fn parse_args(args: &[String]) -> Result<(StudentInput, Option<NaiveDate>), String> {
    let mut positional: Vec<&str> = Vec::new();
    let mut today = None;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--today" {
            let value = iter.next().ok_or("--today needs a date")?;
            today = parse_date(value)?;
        } else {
            positional.push(arg);
        }
    }

    let [first, last, dob, section, gender, m1, m2, m3] = positional[..] else {
        return Err(format!("expected 8 arguments, got {}", positional.len()));
    };

    let input = StudentInput {
        first_name: optional(first).map(String::from),
        last_name: optional(last).map(String::from),
        date_of_birth: parse_date(dob)?,
        section: optional(section).map(String::from),
        gender: optional(gender).map(String::from),
        mark1: parse_mark(m1)?,
        mark2: parse_mark(m2)?,
        mark3: parse_mark(m3)?,
    };
    Ok((input, today))
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let (input, today) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("{e}");
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    let today = match today {
        Some(date) => FixedClock(date).today(),
        None => SystemClock.today(),
    };

    let age = input.date_of_birth.map(|dob| age_in_years(dob, today));
    let result = validate_and_score_for_create(&input, today);
    log_assessment(&input, age, &result);

    if result.is_err() {
        process::exit(1);
    }
}
