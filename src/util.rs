use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render counts as a block sparkline at most `width` cells wide, summing
/// neighbouring values when there are more counts than cells.
pub fn sparkline(counts: &[u32], width: usize) -> String {
    if counts.is_empty() || width == 0 {
        return String::new();
    }

    let cells = downsample(counts, width);
    let max = cells.iter().copied().max().unwrap_or(0);
    cells
        .iter()
        .map(|&c| {
            if c == 0 || max == 0 {
                ' '
            } else {
                let idx = ((c as f64 / max as f64) * (LEVELS.len() - 1) as f64).round() as usize;
                LEVELS[idx.min(LEVELS.len() - 1)]
            }
        })
        .collect()
}

pub fn downsample(counts: &[u32], width: usize) -> Vec<u64> {
    if counts.len() <= width {
        return counts.iter().map(|&c| c as u64).collect();
    }
    let chunk = counts.len().div_ceil(width);
    counts
        .chunks(chunk)
        .map(|group| group.iter().map(|&c| c as u64).sum())
        .collect()
}

/// Truncate to `max` characters with an ellipsis when necessary.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

pub fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
