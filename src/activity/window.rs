use crate::error::{PulseError, Result};
use crate::model::{CommitRecord, Window};
use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    Week,
    Month,
    Year,
    All,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 4] = [Self::Week, Self::Month, Self::Year, Self::All];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
            Self::All => "all",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Week => "This week",
            Self::Month => "This month",
            Self::Year => "This year",
            Self::All => "All time",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeWindow {
    type Err = PulseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace(['_', ' '], "-").as_str() {
            "week" | "this-week" => Ok(Self::Week),
            "month" | "this-month" => Ok(Self::Month),
            "year" | "this-year" => Ok(Self::Year),
            "all" | "all-time" => Ok(Self::All),
            _ => Err(PulseError::InvalidSelection(s.to_string())),
        }
    }
}

/// Resolve a selection into concrete bounds. `end` is always `now`.
pub fn resolve_window(
    selection: TimeWindow,
    commits: &[CommitRecord],
    now: DateTime<Utc>,
) -> Result<Window> {
    let today = now.date_naive();
    let start = match selection {
        TimeWindow::Week => {
            let back = today.weekday().num_days_from_monday() as u64;
            let monday = today
                .checked_sub_days(chrono::Days::new(back))
                .ok_or_else(|| PulseError::InvalidDate(format!("No week start for {today}")))?;
            midnight(monday)?
        }
        TimeWindow::Month => {
            let first = today
                .with_day(1)
                .ok_or_else(|| PulseError::InvalidDate(format!("No month start for {today}")))?;
            midnight(first)?
        }
        TimeWindow::Year => {
            let first = NaiveDate::from_ymd_opt(today.year(), 1, 1)
                .ok_or_else(|| PulseError::InvalidDate(format!("No year start for {today}")))?;
            midnight(first)?
        }
        TimeWindow::All => commits
            .iter()
            .map(|c| c.author_date)
            .min()
            .unwrap_or(now),
    };

    log::debug!("resolved window {selection}: {start} .. {now}");
    Ok(Window { selection, start, end: now })
}

fn midnight(date: NaiveDate) -> Result<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| Utc.from_utc_datetime(&dt))
        .ok_or_else(|| PulseError::InvalidDate(format!("No midnight for {date}")))
}

/// Parse a user-supplied reference time: RFC3339 or YYYY-MM-DD (midnight UTC).
pub fn parse_now(input: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return midnight(date);
    }

    Err(PulseError::InvalidDate(format!(
        "'{input}' is neither RFC3339 nor YYYY-MM-DD"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<Utc> {
        parse_now(s).unwrap()
    }

    fn commit(date: &str) -> CommitRecord {
        CommitRecord {
            sha: format!("sha-{date}"),
            author_date: at(date),
            author_login: None,
            author_display_name: "someone".to_string(),
            author_avatar_url: None,
            message: "msg".to_string(),
        }
    }

    #[test]
    fn week_starts_on_monday() {
        // 2024-01-10 is a Wednesday
        let w = resolve_window(TimeWindow::Week, &[], at("2024-01-10T15:30:00Z")).unwrap();
        assert_eq!(w.start, at("2024-01-08T00:00:00Z"));
        assert_eq!(w.end, at("2024-01-10T15:30:00Z"));
    }

    #[test]
    fn week_on_monday_is_same_day() {
        let w = resolve_window(TimeWindow::Week, &[], at("2024-01-08T09:00:00Z")).unwrap();
        assert_eq!(w.start, at("2024-01-08"));
    }

    #[test]
    fn week_on_sunday_reaches_back_six_days() {
        let w = resolve_window(TimeWindow::Week, &[], at("2024-01-14T23:00:00Z")).unwrap();
        assert_eq!(w.start, at("2024-01-08"));
    }

    #[test]
    fn month_and_year_start() {
        let now = at("2024-03-17T12:00:00Z");
        assert_eq!(resolve_window(TimeWindow::Month, &[], now).unwrap().start, at("2024-03-01"));
        assert_eq!(resolve_window(TimeWindow::Year, &[], now).unwrap().start, at("2024-01-01"));
    }

    #[test]
    fn all_time_uses_earliest_commit() {
        let commits = vec![commit("2023-05-02T10:00:00Z"), commit("2022-11-30T08:00:00Z")];
        let w = resolve_window(TimeWindow::All, &commits, at("2024-01-01")).unwrap();
        assert_eq!(w.start, at("2022-11-30T08:00:00Z"));
    }

    #[test]
    fn all_time_without_commits_is_now() {
        let now = at("2024-01-01T05:00:00Z");
        let w = resolve_window(TimeWindow::All, &[], now).unwrap();
        assert_eq!(w.start, now);
    }

    #[test]
    fn parses_selection_aliases() {
        assert_eq!("this week".parse::<TimeWindow>().unwrap(), TimeWindow::Week);
        assert_eq!("All_Time".parse::<TimeWindow>().unwrap(), TimeWindow::All);
        assert!(matches!(
            "fortnight".parse::<TimeWindow>(),
            Err(PulseError::InvalidSelection(s)) if s == "fortnight"
        ));
    }

    #[test]
    fn rejects_garbage_now() {
        assert!(matches!(parse_now("yesterday-ish"), Err(PulseError::InvalidDate(_))));
    }
}
