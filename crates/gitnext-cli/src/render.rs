use gitnext_core::{Advice, Snapshot, Summary};
use serde::Serialize;

const RULE: &str = "───────────────────────────────";

// ── Human ───────────────────────────────────────────────────────────

pub fn format_human(advice: &[Advice], snapshot: &Snapshot, show_suppressed: bool) -> String {
    if advice.is_empty() {
        return "✓ Repository is clean. No actions needed.\n".to_string();
    }

    let mut out = String::new();
    out.push_str("git-next ── suggested actions\n");
    out.push_str(RULE);
    out.push_str("\n\n");

    for a in advice {
        if a.is_suppressed() {
            if show_suppressed {
                out.push_str(&format!("  [{}] (suppressed)\n", a.rule_id()));
                out.push_str(&format!("  {}\n", a.description()));
                out.push_str(&format!("  Reason: {}\n\n", a.reason()));
            }
            continue;
        }

        out.push_str(&format!("→ [{}] {}\n", a.rule_id(), a.description()));
        for line in details(a.rule_id(), snapshot) {
            out.push_str(&format!("  {line}\n"));
        }
        out.push_str(&format!("  Command: {}\n\n", a.command()));
    }

    let summary = Summary::of(advice);
    out.push_str(RULE);
    out.push('\n');
    if summary.suppressed > 0 {
        out.push_str(&format!(
            "Active: {}  Suppressed: {}\n",
            summary.active, summary.suppressed
        ));
        if !show_suppressed {
            out.push_str("(Use --all to show suppressed advice)\n");
        }
    } else {
        out.push_str(&format!("Total: {} action(s)\n", summary.active));
    }
    out
}

/// Facts from the snapshot worth showing under a rule.
fn details(rule_id: &str, s: &Snapshot) -> Vec<String> {
    fn list(label: &str, items: &[String]) -> Option<String> {
        (!items.is_empty()).then(|| format!("{label}: {}", items.join(", ")))
    }
    fn text(label: &str, value: &str) -> Option<String> {
        (!value.is_empty()).then(|| format!("{label}: {value}"))
    }

    let line = match rule_id {
        "R035" => list("Branches", &s.merged_branches),
        "R036" => list("Branches", &s.gone_branches),
        "R057" => list("Branches", &s.inactive_branches),
        "R042" => list("Files", &s.conflicted_files),
        "R043" => list("Files", &s.large_binary_files),
        "R054" => list("Tags", &s.unpushed_tags),
        "R045" => text("Submodule", &s.submodule_name),
        "R050" => text("Message", &s.wip_commit_message),
        "R052" => text("Message", &s.last_commit_message),
        "R048" => Some(format!("Age: {} days", s.feature_branch_age_days)),
        "R049" => Some(format!("Noisy commits: {}", s.noisy_commit_count)),
        "R055" => Some(format!(
            "Stashes: {} (oldest {} days)",
            s.stash_count, s.oldest_stash_age_days
        )),
        "R056" => Some(format!("Size: {} MB", s.repo_size_mb)),
        _ => None,
    };
    line.into_iter().collect()
}

// ── JSON ────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct JsonReport<'a> {
    advice: &'a [Advice],
    stats: Summary,
}

pub fn format_json(advice: &[Advice]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        advice,
        stats: Summary::of(advice),
    })
}

// ── Compact ─────────────────────────────────────────────────────────

pub fn format_compact(advice: &[Advice]) -> String {
    let active: Vec<&str> = advice
        .iter()
        .filter(|a| a.is_active())
        .map(|a| a.rule_id())
        .collect();
    if active.is_empty() {
        "✓ clean".to_string()
    } else {
        format!("→ {}", active.join(", "))
    }
}
