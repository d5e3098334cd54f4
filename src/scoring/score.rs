use crate::record::{Marks, Outcome, Scorecard};

pub const MIN_MARK: i64 = 0;
pub const MAX_MARK: i64 = 100;
pub const PASS_MARK: i32 = 35;

/// Total, average and outcome for three marks. A mark of zero adds nothing
/// to the total and never passes.
pub fn calculate_scorecard(marks: &Marks) -> Scorecard {
    let marks = marks.as_array();
    let total: i32 = marks.iter().filter(|&&m| m != 0).sum();
    let average = f64::from(total) / 3.0;
    let passed = marks.iter().all(|&m| m != 0 && m >= PASS_MARK);

    Scorecard {
        total,
        average,
        outcome: if passed { Outcome::Pass } else { Outcome::Fail },
    }
}

pub fn mark_in_range(mark: i64) -> bool {
    (MIN_MARK..=MAX_MARK).contains(&mark)
}
