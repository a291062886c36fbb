use crate::github::RepoRef;
use crate::model::{ActivityOutput, ActivityReport, ContributorSummary, DailyCount, SCHEMA_VERSION};
use crate::util::{sparkline, truncate};
use anyhow::Result;
use chrono::Utc;
use console::style;
use serde::Serialize;

const SPARK_WIDTH: usize = 60;
const RECENT_DAYS: usize = 14;

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ActivityLine<'a> {
    Day(&'a DailyCount),
    Contributor(&'a ContributorSummary),
}

pub fn build_output(report: &ActivityReport, repo: &RepoRef, total_commits: usize) -> ActivityOutput {
    ActivityOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repository: repo.to_string(),
        window: report.window.selection,
        start: report.window.start,
        end: report.window.end,
        total_commits,
        daily_series: report.daily_series.clone(),
        contributors: report.contributors.clone(),
    }
}

pub fn output_json(report: &ActivityReport, repo: &RepoRef, total_commits: usize) -> Result<()> {
    let output = build_output(report, repo, total_commits);
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn output_ndjson(report: &ActivityReport) -> Result<()> {
    for day in &report.daily_series {
        println!("{}", serde_json::to_string(&ActivityLine::Day(day))?);
    }
    for contributor in &report.contributors {
        println!("{}", serde_json::to_string(&ActivityLine::Contributor(contributor))?);
    }
    Ok(())
}

pub fn output_summary(
    report: &ActivityReport,
    repo: &RepoRef,
    total_commits: usize,
    top: usize,
) -> Result<()> {
    let window = &report.window;
    println!(
        "{} {}",
        style("Commit Activity").bold(),
        style(repo.to_string()).cyan()
    );
    println!("{}", "─".repeat(SPARK_WIDTH));

    if total_commits == 0 {
        println!("No commits found");
        return Ok(());
    }

    println!(
        "{}: {} to {}",
        window.selection.title(),
        window.start.format("%Y-%m-%d"),
        window.end.format("%Y-%m-%d")
    );
    println!(
        "Commits in window: {} of {} fetched",
        style(report.window_commits()).green(),
        total_commits
    );
    if let Some(day) = report.busiest_day() {
        println!("Busiest day: {} ({} commits)", day.label(), day.count);
    }

    let counts: Vec<u32> = report.daily_series.iter().map(|d| d.count).collect();
    println!("\n{}", style(sparkline(&counts, SPARK_WIDTH)).green());

    println!("\n{}", style("Recent days").bold());
    let recent = report.daily_series.len().saturating_sub(RECENT_DAYS);
    for day in &report.daily_series[recent..] {
        let bar = "■".repeat(day.count.min(40) as usize);
        println!("{} {:>4} {}", day.label(), day.count, style(bar).green());
    }

    if report.contributors.is_empty() {
        return Ok(());
    }

    println!("\n{}", style("Top contributors").bold());
    println!(
        "{:<24} {:>7} {:>7}  {}",
        style("Login").bold(),
        style("Total").bold(),
        style("Window").bold(),
        style("Activity").bold()
    );
    for contributor in report.contributors.iter().take(top) {
        let counts: Vec<u32> = contributor.daily_series.iter().map(|d| d.count).collect();
        println!(
            "{:<24} {:>7} {:>7}  {}",
            truncate(&contributor.login, 24),
            contributor.total_commits,
            contributor.window_commits(),
            style(sparkline(&counts, 30)).blue()
        );
    }
    if report.contributors.len() > top {
        println!("\n... and {} more contributors", report.contributors.len() - top);
    }

    Ok(())
}
