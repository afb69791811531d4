//! Successor functions for [`StartFinish`](crate::StartFinish).
//!
//! Each returns the period that directly follows `period`, or `None` when
//! there is none (wrong variant, unparsable text, overflow).

use crate::value::Value;
use chrono::{Months, NaiveDate};

const MONTH_FORMAT: &str = "%Y-%m";
const DAY_FORMAT: &str = "%Y-%m-%d";

/// Integer periods: `n` is followed by `n + 1`.
pub fn next_int(period: &Value) -> Option<Value> {
    period.as_int()?.checked_add(1).map(Value::Int)
}

/// Calendar months written `"YYYY-MM"`: `"2018-12"` is followed by `"2019-01"`.
pub fn next_month(period: &Value) -> Option<Value> {
    let first = NaiveDate::parse_from_str(&format!("{}-01", period.as_str()?), DAY_FORMAT).ok()?;
    let next = first.checked_add_months(Months::new(1))?;
    Some(Value::Str(next.format(MONTH_FORMAT).to_string()))
}

/// Calendar days written `"YYYY-MM-DD"`.
pub fn next_day(period: &Value) -> Option<Value> {
    let day = NaiveDate::parse_from_str(period.as_str()?, DAY_FORMAT).ok()?;
    Some(Value::Str(day.succ_opt()?.format(DAY_FORMAT).to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_int() {
        assert_eq!(next_int(&Value::Int(4)), Some(Value::Int(5)));
        assert_eq!(next_int(&Value::Int(i64::MAX)), None);
        assert_eq!(next_int(&Value::from("4")), None);
    }

    #[test]
    fn test_next_month() {
        assert_eq!(next_month(&Value::from("2018-01")), Some(Value::from("2018-02")));
        assert_eq!(next_month(&Value::from("2018-12")), Some(Value::from("2019-01")));
        assert_eq!(next_month(&Value::from("2018-13")), None);
        assert_eq!(next_month(&Value::Int(1)), None);
    }

    #[test]
    fn test_next_day() {
        assert_eq!(next_day(&Value::from("2020-02-28")), Some(Value::from("2020-02-29")));
        assert_eq!(next_day(&Value::from("2021-02-28")), Some(Value::from("2021-03-01")));
        assert_eq!(next_day(&Value::from("nope")), None);
    }
}
