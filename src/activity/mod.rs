pub mod contributors;
pub mod exec;
pub mod output;
pub mod series;
pub mod window;

pub use contributors::build_contributor_summaries;
pub use exec::exec;
pub use output::{output_json, output_ndjson, output_summary};
pub use series::build_daily_series;
pub use window::{parse_now, resolve_window, TimeWindow};

use crate::error::Result;
use crate::model::{ActivityReport, CommitRecord};
use chrono::{DateTime, Utc};

/// Derive the full report for `selection` as of `now`. Pure: same inputs, same output.
pub fn aggregate(
    commits: &[CommitRecord],
    selection: TimeWindow,
    now: DateTime<Utc>,
) -> Result<ActivityReport> {
    let window = resolve_window(selection, commits, now)?;
    let daily_series = build_daily_series(commits, window.start, window.end);
    let contributors = build_contributor_summaries(commits, window.start, window.end);

    Ok(ActivityReport {
        window,
        daily_series,
        contributors,
    })
}
