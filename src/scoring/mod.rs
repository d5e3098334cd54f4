mod age;
pub mod score;
pub mod validation;

pub use age::age_in_years;
pub use score::{calculate_scorecard, mark_in_range, MAX_MARK, MIN_MARK, PASS_MARK};
pub use validation::{
    validate_and_score_for_create, validate_and_score_for_update, MAX_AGE, MIN_AGE_EXCLUSIVE,
    MIN_NAME_LENGTH,
};
