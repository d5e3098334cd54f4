use super::age::age_in_years;
use super::score::{calculate_scorecard, mark_in_range};
use crate::error::ValidationError;
use crate::record::{
    Gender, Marks, MarksInput, NewStudentRecord, Section, StudentInput, StudentRecord,
};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

pub const MIN_NAME_LENGTH: usize = 3;
pub const MIN_AGE_EXCLUSIVE: i32 = 15;
pub const MAX_AGE: i32 = 20;

static ALPHABETIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z]+$").unwrap());

fn name_too_short(name: Option<&str>) -> bool {
    name.map_or(0, |n| n.chars().count()) < MIN_NAME_LENGTH
}

fn name_not_alphabetic(name: Option<&str>) -> bool {
    !name.is_some_and(|n| ALPHABETIC.is_match(n))
}

/// Checks a candidate record in a fixed order and derives its scores. The
/// first failing check decides the reason.
pub fn validate_and_score_for_create(
    input: &StudentInput,
    today: NaiveDate,
) -> Result<NewStudentRecord, ValidationError> {
    let first_name = input.first_name.as_deref();
    let last_name = input.last_name.as_deref();

    if name_too_short(first_name) || name_too_short(last_name) {
        return Err(ValidationError::NameTooShort);
    }
    let date_of_birth = input
        .date_of_birth
        .ok_or(ValidationError::MissingDateOfBirth)?;

    let age = age_in_years(date_of_birth, today);
    if age <= MIN_AGE_EXCLUSIVE || age > MAX_AGE {
        return Err(ValidationError::AgeOutOfRange);
    }

    let section: Section = input
        .section
        .as_deref()
        .and_then(|s| s.parse().ok())
        .ok_or(ValidationError::InvalidSection)?;

    let gender: Gender = input
        .gender
        .as_deref()
        .and_then(|g| g.parse().ok())
        .ok_or(ValidationError::InvalidGender)?;

    let marks = checked_marks(
        [input.mark1, input.mark2, input.mark3],
        mark_in_range,
        ValidationError::MarksOutOfRange,
    )?;

    if name_not_alphabetic(first_name) || name_not_alphabetic(last_name) {
        return Err(ValidationError::NameNotAlphabetic);
    }
    let scorecard = calculate_scorecard(&marks);

    Ok(NewStudentRecord {
        first_name: input.first_name.clone().unwrap_or_default(),
        last_name: input.last_name.clone().unwrap_or_default(),
        date_of_birth,
        section,
        gender,
        mark1: marks.mark1,
        mark2: marks.mark2,
        mark3: marks.mark3,
        total: scorecard.total,
        average: scorecard.average,
        outcome: scorecard.outcome,
    })
}

pub fn validate_and_score_for_update(
    existing: &StudentRecord,
    input: &MarksInput,
) -> Result<StudentRecord, ValidationError> {
    let marks = checked_marks(
        [input.mark1, input.mark2, input.mark3],
        |m| m != 0 && mark_in_range(m),
        ValidationError::InvalidMarks,
    )?;

    let mut updated = existing.clone();
    updated.apply_scores(marks, calculate_scorecard(&marks));
    Ok(updated)
}

fn checked_marks(
    raw: [Option<i64>; 3],
    accept: impl Fn(i64) -> bool,
    reason: ValidationError,
) -> Result<Marks, ValidationError> {
    let mut marks = [0i32; 3];
    for (slot, mark) in marks.iter_mut().zip(raw) {
        *slot = mark
            .filter(|&m| accept(m))
            .and_then(|m| i32::try_from(m).ok())
            .ok_or(reason)?;
    }
    Ok(Marks::new(marks[0], marks[1], marks[2]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Outcome;
    use chrono::Months;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn years_ago(years: u32) -> NaiveDate {
        today().checked_sub_months(Months::new(years * 12)).unwrap()
    }

    fn valid_input() -> StudentInput {
        StudentInput {
            first_name: Some("John".into()),
            last_name: Some("Doe".into()),
            date_of_birth: years_ago(20).succ_opt(),
            section: Some("A".into()),
            gender: Some("M".into()),
            mark1: Some(80),
            mark2: Some(40),
            mark3: Some(36),
        }
    }

    fn existing_record() -> StudentRecord {
        validate_and_score_for_create(&valid_input(), today())
            .unwrap()
            .with_id(7)
    }

    #[test]
    fn test_create_scenario_pass() {
        let record = validate_and_score_for_create(&valid_input(), today()).unwrap();
        assert_eq!(record.total, 156);
        assert_eq!(record.average, 52.0);
        assert_eq!(record.outcome, Outcome::Pass);
        assert_eq!(record.section, Section::A);
        assert_eq!(record.gender, Gender::M);
    }

    #[test]
    fn test_create_scenario_fail_still_scores() {
        let input = StudentInput {
            mark1: Some(30),
            ..valid_input()
        };
        let record = validate_and_score_for_create(&input, today()).unwrap();
        assert_eq!(record.total, 106);
        assert_eq!(record.average, 106.0 / 3.0);
        assert_eq!(record.outcome, Outcome::Fail);
    }

    #[test]
    fn test_short_name_wins_over_everything() {
        let input = StudentInput {
            last_name: Some("Li".into()),
            date_of_birth: None,
            section: Some("Z".into()),
            gender: None,
            mark1: Some(500),
            ..valid_input()
        };
        assert_eq!(
            validate_and_score_for_create(&input, today()),
            Err(ValidationError::NameTooShort)
        );

        let missing = StudentInput {
            first_name: None,
            ..valid_input()
        };
        assert_eq!(
            validate_and_score_for_create(&missing, today()),
            Err(ValidationError::NameTooShort)
        );
    }

    #[test]
    fn test_non_alphabetic_name() {
        let input = StudentInput {
            first_name: Some("J0hn".into()),
            ..valid_input()
        };
        assert_eq!(
            validate_and_score_for_create(&input, today()),
            Err(ValidationError::NameNotAlphabetic)
        );
    }

    #[test]
    fn test_non_alphabetic_name_checked_last() {
        let no_dob = StudentInput {
            first_name: Some("J0hn".into()),
            date_of_birth: None,
            ..valid_input()
        };
        assert_eq!(
            validate_and_score_for_create(&no_dob, today()),
            Err(ValidationError::MissingDateOfBirth)
        );

        let bad_section = StudentInput {
            first_name: Some("J0hn".into()),
            section: Some("Z".into()),
            ..valid_input()
        };
        assert_eq!(
            validate_and_score_for_create(&bad_section, today()),
            Err(ValidationError::InvalidSection)
        );

        let bad_marks = StudentInput {
            last_name: Some("D-e".into()),
            mark2: Some(101),
            ..valid_input()
        };
        assert_eq!(
            validate_and_score_for_create(&bad_marks, today()),
            Err(ValidationError::MarksOutOfRange)
        );
    }

    #[test]
    fn test_missing_dob_before_later_checks() {
        let input = StudentInput {
            date_of_birth: None,
            section: Some("D".into()),
            gender: Some("X".into()),
            mark2: None,
            ..valid_input()
        };
        assert_eq!(
            validate_and_score_for_create(&input, today()),
            Err(ValidationError::MissingDateOfBirth)
        );
    }

    #[test]
    fn test_age_bounds() {
        for (dob, ok) in [
            (years_ago(15), false),
            (years_ago(15).pred_opt().unwrap(), false),
            (years_ago(16), true),
            (years_ago(20), true),
            (years_ago(21).succ_opt().unwrap(), true),
            (years_ago(21), false),
            (years_ago(40), false),
            (today().succ_opt().unwrap(), false),
        ] {
            let input = StudentInput {
                date_of_birth: Some(dob),
                ..valid_input()
            };
            let result = validate_and_score_for_create(&input, today());
            if ok {
                assert!(result.is_ok(), "dob {dob} should be accepted");
            } else {
                assert_eq!(result, Err(ValidationError::AgeOutOfRange), "dob {dob}");
            }
        }
    }

    #[test]
    fn test_invalid_section_and_gender() {
        for section in [None, Some("D"), Some("a"), Some("")] {
            let input = StudentInput {
                section: section.map(String::from),
                gender: Some("X".into()),
                ..valid_input()
            };
            assert_eq!(
                validate_and_score_for_create(&input, today()),
                Err(ValidationError::InvalidSection)
            );
        }

        for gender in [None, Some("m"), Some("Male")] {
            let input = StudentInput {
                gender: gender.map(String::from),
                ..valid_input()
            };
            assert_eq!(
                validate_and_score_for_create(&input, today()),
                Err(ValidationError::InvalidGender)
            );
        }
    }

    #[test]
    fn test_marks_range_on_create() {
        for marks in [
            (None, Some(50), Some(50)),
            (Some(-1), Some(50), Some(50)),
            (Some(50), Some(101), Some(50)),
            (Some(50), Some(50), Some(i64::MAX)),
        ] {
            let input = StudentInput {
                mark1: marks.0,
                mark2: marks.1,
                mark3: marks.2,
                ..valid_input()
            };
            assert_eq!(
                validate_and_score_for_create(&input, today()),
                Err(ValidationError::MarksOutOfRange)
            );
        }

        let zero = StudentInput {
            mark1: Some(0),
            ..valid_input()
        };
        let record = validate_and_score_for_create(&zero, today()).unwrap();
        assert_eq!(record.total, 76);
        assert_eq!(record.outcome, Outcome::Fail);
    }

    #[test]
    fn test_update_recomputes_and_keeps_identity() {
        let existing = existing_record();
        let updated =
            validate_and_score_for_update(&existing, &MarksInput::new(90, 90, 30)).unwrap();

        assert_eq!(updated.id, 7);
        assert_eq!(updated.first_name, existing.first_name);
        assert_eq!(updated.date_of_birth, existing.date_of_birth);
        assert_eq!(updated.total, 210);
        assert_eq!(updated.average, 70.0);
        assert_eq!(updated.outcome, Outcome::Fail);
    }

    #[test]
    fn test_update_rejects_zero_out_of_range_or_missing() {
        let existing = existing_record();
        for marks in [
            MarksInput::new(0, 50, 60),
            MarksInput::new(-5, 50, 60),
            MarksInput::new(50, 101, 60),
            MarksInput {
                mark3: None,
                ..MarksInput::new(50, 50, 50)
            },
        ] {
            assert_eq!(
                validate_and_score_for_update(&existing, &marks),
                Err(ValidationError::InvalidMarks)
            );
        }
    }
}
