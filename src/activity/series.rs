use crate::model::{CommitRecord, DailyCount};
use chrono::{DateTime, NaiveDate, Utc};

/// Count commits per UTC day over `[start, end]`, emitting every day once.
///
/// An inverted window (`end` on an earlier day than `start`) yields a single
/// zero bucket for `end`'s day.
pub fn build_daily_series<'a, I>(commits: I, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<DailyCount>
where
    I: IntoIterator<Item = &'a CommitRecord>,
{
    let first = start.date_naive();
    let last = end.date_naive();

    if last < first {
        return vec![DailyCount { date: last, count: 0 }];
    }

    let mut buckets = day_buckets(first, last);
    for commit in commits {
        if let Some(idx) = bucket_index(first, last, commit.author_day()) {
            buckets[idx].count += 1;
        }
    }
    buckets
}

fn day_buckets(first: NaiveDate, last: NaiveDate) -> Vec<DailyCount> {
    let span = (last - first).num_days().max(0) as usize + 1;
    let mut buckets = Vec::with_capacity(span);
    let mut day = Some(first);
    while let Some(date) = day {
        if date > last {
            break;
        }
        buckets.push(DailyCount { date, count: 0 });
        day = date.succ_opt();
    }
    buckets
}

fn bucket_index(first: NaiveDate, last: NaiveDate, day: NaiveDate) -> Option<usize> {
    if day < first || day > last {
        return None;
    }
    Some((day - first).num_days() as usize)
}
