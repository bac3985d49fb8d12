use chrono::{Datelike, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Expand a period expression into inclusive date bounds.
/// Supports YYYY, YYYY-MM, YYYY-MM-DD.
pub fn period_bounds(p: &str) -> Result<(NaiveDate, NaiveDate), String> {
    // YYYY-MM-DD
    if let Ok(d) = NaiveDate::parse_from_str(p, "%Y-%m-%d") {
        return Ok((d, d));
    }

    // YYYY-MM
    if p.len() == 7
        && let Ok(first) = NaiveDate::parse_from_str(&(p.to_string() + "-01"), "%Y-%m-%d")
    {
        return Ok((first, last_day_of_month(first.year(), first.month())));
    }

    // YYYY
    if p.len() == 4
        && let Ok(year) = p.parse::<i32>()
    {
        let first = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(|| invalid(p))?;
        let last = NaiveDate::from_ymd_opt(year, 12, 31).ok_or_else(|| invalid(p))?;
        return Ok((first, last));
    }

    Err(invalid(p))
}

/// Expand "START:END" where both sides use the same period format.
pub fn range_bounds(start: &str, end: &str) -> Result<(NaiveDate, NaiveDate), String> {
    let (s, _) = period_bounds(start)?;
    let (_, e) = period_bounds(end)?;
    Ok((s, e))
}

fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let mut d = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
    while let Some(next) = d.succ_opt() {
        if next.month() != month {
            break;
        }
        d = next;
    }
    d
}

fn invalid(p: &str) -> String {
    format!("Invalid period: {}", p)
}
