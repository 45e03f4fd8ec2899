/// All backend surrogate keys are integer row ids.
pub type DbId = i64;

/// Calendar dates travel as fixed-width `YYYY-MM-DD` strings.
pub type Date = chrono::NaiveDate;
