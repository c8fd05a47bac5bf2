//! Text heuristics over commit subjects, reflog entries and file contents.

use time::OffsetDateTime;

/// Leading verbs that mark a commit subject as descriptive.
const COMMIT_VERBS: [&str; 19] = [
    "add", "fix", "update", "remove", "delete", "create", "implement", "refactor", "improve",
    "enhance", "optimize", "clean", "bump", "merge", "revert", "upgrade", "downgrade", "move",
    "rename",
];

/// Subjects that say nothing on their own.
const NOISY_SUBJECTS: [&str; 10] = [
    "fix", "oops", "wip", "temp", "debug", "test", "typo", ".", "update", "change",
];

const WIP_MARKERS: [&str; 5] = ["wip", "temp", "debug", "todo", "fixme"];

/// Reflog actions that rewrite history.
const REWRITE_ACTIONS: [&str; 3] = ["rebase", "amend", "filter-branch"];

/// Reflog actions that need full history.
const HISTORY_ACTIONS: [&str; 3] = ["rebase", "bisect", "filter-branch"];

/// Share of noisy subjects above which squashing is suggested.
const NOISY_RATIO: f64 = 0.3;
const NOISY_MIN_COMMITS: usize = 3;

const MIN_SUBJECT_CHARS: usize = 5;

/// Seconds between the last two commits within which an amend is suggested.
pub const AMEND_WINDOW_SECS: i64 = 300;

/// Bytes inspected for NUL when deciding a file is binary.
pub const BINARY_SNIFF_BYTES: usize = 512;

pub fn starts_with_verb(subject: &str) -> bool {
    let lower = subject.to_lowercase();
    COMMIT_VERBS.iter().any(|verb| {
        lower == *verb
            || lower
                .strip_prefix(verb)
                .is_some_and(|rest| rest.starts_with(' '))
    })
}

/// Too short, or not led by a verb.
pub fn is_poor_subject(subject: &str) -> bool {
    let subject = subject.trim();
    subject.chars().count() < MIN_SUBJECT_CHARS || !starts_with_verb(subject)
}

pub fn is_noisy_subject(subject: &str) -> bool {
    let lower = subject.trim().to_lowercase();
    NOISY_SUBJECTS.iter().any(|pattern| {
        lower == *pattern
            || lower
                .strip_prefix(pattern)
                .is_some_and(|rest| rest.starts_with(' '))
    })
}

/// Number of noisy subjects, when there are enough of them to squash.
pub fn squash_candidates<'s>(subjects: impl IntoIterator<Item = &'s str>) -> Option<u32> {
    let subjects: Vec<&str> = subjects
        .into_iter()
        .filter(|s| !s.trim().is_empty())
        .collect();
    if subjects.len() <= NOISY_MIN_COMMITS {
        return None;
    }
    let noisy = subjects.iter().filter(|s| is_noisy_subject(s)).count();
    (noisy as f64 / subjects.len() as f64 > NOISY_RATIO).then_some(noisy as u32)
}

/// A WIP marker appears as a word in the subject.
pub fn is_wip_subject(subject: &str) -> bool {
    subject
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| WIP_MARKERS.contains(&word))
}

pub fn is_merge_subject(subject: &str) -> bool {
    subject.trim_start().to_lowercase().starts_with("merge")
}

pub fn reflog_shows_rewrite(subject: &str) -> bool {
    REWRITE_ACTIONS.iter().any(|a| subject.contains(a))
}

pub fn reflog_shows_reset(subject: &str) -> bool {
    subject.contains("reset:")
}

pub fn reflog_shows_history_op(subject: &str) -> bool {
    HISTORY_ACTIONS.iter().any(|a| subject.contains(a))
}

/// Both conflict fences appear at the start of a line.
pub fn has_conflict_markers(content: &str) -> bool {
    let mut open = false;
    for line in content.lines() {
        if line.starts_with("<<<<<<<") {
            open = true;
        } else if open && line.starts_with(">>>>>>>") {
            return true;
        }
    }
    false
}

pub fn looks_binary(head: &[u8]) -> bool {
    head.iter().take(BINARY_SNIFF_BYTES).any(|b| *b == 0)
}

/// Git's autocrlf warning, in either direction.
pub fn has_line_ending_warning(text: &str) -> bool {
    text.contains("CRLF will be replaced by LF") || text.contains("LF will be replaced by CRLF")
}

/// Whole days elapsed since a unix timestamp. Future timestamps count as 0.
pub fn age_days(unix: i64, now: OffsetDateTime) -> Option<u32> {
    let then = OffsetDateTime::from_unix_timestamp(unix).ok()?;
    let days = (now - then).whole_days().max(0);
    Some(u32::try_from(days).unwrap_or(u32::MAX))
}

/// The newer commit followed the older one within the amend window.
pub fn within_amend_window(newer: i64, older: i64) -> bool {
    let gap = newer - older;
    gap > 0 && gap < AMEND_WINDOW_SECS
}
