const TEMPLATE: &str = "You are reviewing a git commit. Rewrite its commit message so it is clear \
and conventional: an imperative summary line of at most 72 characters, a blank line, then a short \
body explaining what changed and why. Reply with the commit message only.

Original message:
{message}

Diff:
{diff}
";

const TRUNCATION_MARKER: &str = "\n[diff truncated]";

pub fn build_prompt(original: &str, diff: &str, max_diff_chars: usize) -> String {
    TEMPLATE
        .replace("{message}", original.trim())
        .replace("{diff}", &truncate_diff(diff, max_diff_chars))
}

/// Cut `diff` to at most `max_chars` characters, marking the cut.
pub fn truncate_diff(diff: &str, max_chars: usize) -> String {
    match diff.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{TRUNCATION_MARKER}", &diff[..byte_idx]),
        None => diff.to_string(),
    }
}
