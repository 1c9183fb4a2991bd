use chrono::{Datelike, NaiveDate, TimeDelta, Weekday};

use crate::error::PlannerError;

/// Parses a scenario date relative to `today`.
///
/// Accepts `YYYY-MM-DD`, `today`/`tod`, `tomorrow`/`tom`, `eow`, `eom`,
/// `+Nd`/`+Nw`/`+Nm` and weekday names (`fri`, `2:fri` for the one after).
pub fn parse_scenario_date_from(input: &str, today: NaiveDate) -> Result<NaiveDate, PlannerError> {
    let input = input.trim();
    let invalid = || PlannerError::InvalidDate(input.to_string());

    if input.is_empty() {
        return Err(invalid());
    }

    match input.to_lowercase().as_str() {
        "today" | "tod" => return Ok(today),
        "tomorrow" | "tom" => return today.succ_opt().ok_or_else(invalid),
        "eow" => {
            // Upcoming Sunday, today included
            let days = (7 - today.weekday().num_days_from_sunday() as i64) % 7;
            return shift_days(today, days).ok_or_else(invalid);
        }
        "eom" => return last_day_of_month(today.year(), today.month()).ok_or_else(invalid),
        _ => {}
    }

    if let Some(rest) = input.strip_prefix('+') {
        if rest.len() < 2 || !rest.is_char_boundary(rest.len() - 1) {
            return Err(invalid());
        }
        let (num_str, unit) = rest.split_at(rest.len() - 1);
        let count: i64 = num_str.parse().map_err(|_| invalid())?;

        let shifted = match unit {
            "d" => shift_days(today, count),
            "w" => TimeDelta::try_weeks(count).and_then(|delta| today.checked_add_signed(delta)),
            "m" => add_months(today, count),
            _ => None,
        };
        return shifted.ok_or_else(invalid);
    }

    if let Ok(d) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(d);
    }

    if let Some((count, day_str)) = parse_weekday_token(input) {
        if let Some(target) = parse_weekday_str(day_str) {
            let mut days_needed = target.num_days_from_sunday() as i64
                - today.weekday().num_days_from_sunday() as i64;
            if days_needed <= 0 {
                days_needed += 7;
            }
            // 1:fri is the next Friday, 2:fri the one after.
            return (count - 1)
                .checked_mul(7)
                .and_then(|extra| extra.checked_add(days_needed))
                .and_then(|days| shift_days(today, days))
                .ok_or_else(invalid);
        }
    }

    Err(invalid())
}

/// `None` when the offset leaves chrono's date range.
fn shift_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    TimeDelta::try_days(days).and_then(|delta| date.checked_add_signed(delta))
}

fn add_months(date: NaiveDate, count: i64) -> Option<NaiveDate> {
    let months = (date.year() as i64 * 12 + date.month0() as i64).checked_add(count)?;
    let year = i32::try_from(months.div_euclid(12)).ok()?;
    let month = months.rem_euclid(12) as u32 + 1;
    // Jan 31 + 1m lands on the last day of February
    NaiveDate::from_ymd_opt(year, month, date.day()).or_else(|| last_day_of_month(year, month))
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    first_of_next.pred_opt()
}

fn parse_weekday_token(input: &str) -> Option<(i64, &str)> {
    match input.split_once(':') {
        Some((count, day)) => count.parse::<i64>().ok().filter(|c| *c >= 1).map(|c| (c, day)),
        None => Some((1, input)),
    }
}

fn parse_weekday_str(s: &str) -> Option<Weekday> {
    match s.to_lowercase().as_str() {
        "mon" | "monday" => Some(Weekday::Mon),
        "tue" | "tuesday" => Some(Weekday::Tue),
        "wed" | "wednesday" => Some(Weekday::Wed),
        "thu" | "thursday" => Some(Weekday::Thu),
        "fri" | "friday" => Some(Weekday::Fri),
        "sat" | "saturday" => Some(Weekday::Sat),
        "sun" | "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}
