use gitnext_core::{Advice, Advisor, RuleCatalog, RuleSettings, Snapshot, SuppressionResolver};

fn find<'a>(advice: &'a [Advice], id: &str) -> &'a Advice {
    advice
        .iter()
        .find(|a| a.rule_id() == id)
        .unwrap_or_else(|| panic!("{id} not in output"))
}

fn ids(advice: &[Advice]) -> Vec<&str> {
    advice.iter().map(|a| a.rule_id()).collect()
}

/// A snapshot that trips a wide spread of rules across every tier.
fn busy_snapshot() -> Snapshot {
    serde_json::from_value(serde_json::json!({
        "dirty": true,
        "staged_files": 2,
        "modified_files": 1,
        "untracked_files": 3,
        "ahead": 2,
        "behind": 1,
        "commit_count_since_push": 2,
        "rebase_in_progress": true,
        "has_merge_commits": true,
        "merged_branches": ["feat/old"],
        "gone_branches": ["feat/gone"],
        "inactive_branches": ["spike/2019"],
        "force_push_to_shared": true,
        "reset_on_protected_branch": true,
        "line_ending_conflict": true,
        "poor_commit_message": true,
        "last_commit_message": "x",
        "has_stash": true,
        "repo_size_growing_fast": true,
        "repo_size_mb": 240
    }))
    .unwrap()
}

#[test]
fn scenario_a_behind_and_clean_pulls_stay_active() {
    let snap = Snapshot {
        behind: 2,
        ..Default::default()
    };
    let advice = Advisor::default().advise(&snap);
    assert_eq!(ids(&advice), vec!["R005", "R030"]);
    assert!(advice.iter().all(|a| a.is_active()));
    assert_eq!(advice[0].priority(), 55);
    assert_eq!(advice[1].priority(), 48);
}

#[test]
fn scenario_b_merge_in_progress_suppresses_push() {
    let snap = Snapshot {
        merge_in_progress: true,
        ahead: 1,
        ..Default::default()
    };
    let advice = Advisor::default().advise(&snap);
    let merge = find(&advice, "R009");
    let push = find(&advice, "R004");
    assert_eq!(merge.priority(), 98);
    assert!(merge.is_active());
    assert!(push.is_suppressed());
    assert!(push.reason().contains("merge --continue"));
    assert!(push.reason().contains("98"));
}

#[test]
fn scenario_c_equal_priority_dangers_keep_declaration_order() {
    let snap = Snapshot {
        reset_on_protected_branch: true,
        force_push_to_shared: true,
        ..Default::default()
    };
    let advice = Advisor::default().advise(&snap);
    assert_eq!(ids(&advice), vec!["R037", "R039"]);
    assert!(advice.iter().all(|a| a.is_active()));
}

#[test]
fn scenario_d_empty_snapshot() {
    let advisor = Advisor::default();
    assert!(advisor.advise(&Snapshot::default()).is_empty());
    assert!(advisor.resolver().resolve(Vec::new()).is_empty());
}

#[test]
fn determinism() {
    let advisor = Advisor::default();
    let snap = busy_snapshot();
    let first = advisor.advise(&snap);
    let second = advisor.advise(&snap);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );

    // A freshly built advisor agrees as well.
    assert_eq!(first, Advisor::default().advise(&snap));
}

#[test]
fn priorities_non_increasing_with_catalog_ties() {
    let advisor = Advisor::default();
    let advice = advisor.advise(&busy_snapshot());
    let order: Vec<usize> = advice
        .iter()
        .map(|a| {
            advisor
                .catalog()
                .rules()
                .iter()
                .position(|r| r.id == a.rule_id())
                .unwrap()
        })
        .collect();

    for (i, pair) in advice.windows(2).enumerate() {
        assert!(pair[0].priority() >= pair[1].priority());
        if pair[0].priority() == pair[1].priority() {
            assert!(order[i] < order[i + 1], "{} / {}", pair[0].rule_id(), pair[1].rule_id());
        }
    }
}

#[test]
fn suppression_only_touches_flag_and_reason() {
    let catalog = RuleCatalog::default();
    let raw = gitnext_core::Evaluator::new(&catalog).evaluate(&busy_snapshot());
    let resolved = SuppressionResolver::default().resolve(raw.clone());
    assert_eq!(raw.len(), resolved.len());
    assert!(resolved.iter().any(|a| a.is_suppressed()));
    for (before, after) in raw.iter().zip(&resolved) {
        assert_eq!(before.rule_id(), after.rule_id());
        assert_eq!(before.command(), after.command());
        assert_eq!(before.description(), after.description());
        assert_eq!(before.priority(), after.priority());
        assert_eq!(after.is_suppressed(), !after.reason().is_empty());
    }
}

#[test]
fn suppressors_are_earlier_and_active() {
    let advice = Advisor::default().advise(&busy_snapshot());
    for (j, item) in advice.iter().enumerate().filter(|(_, a)| a.is_suppressed()) {
        let suppressor = advice[..j].iter().find(|a| {
            a.is_active()
                && item
                    .reason()
                    .starts_with(&format!(
                        "Suppressed by {} ",
                        gitnext_core::command_key(a.command()).unwrap_or_default()
                    ))
        });
        assert!(suppressor.is_some(), "{} has no active suppressor", item.rule_id());
        assert!(suppressor.unwrap().priority() >= item.priority());
    }
}

#[test]
fn rebase_in_progress_blocks_ordinary_commands() {
    let advice = Advisor::default().advise(&busy_snapshot());
    assert!(find(&advice, "R010").is_active());
    for id in ["R006", "R031", "R033", "R020", "R003", "R052"] {
        assert!(find(&advice, id).is_suppressed(), "{id} should be suppressed");
    }
    // Non-git warnings and unrelated commands survive.
    for id in ["R037", "R039", "R044", "R035", "R007", "R008", "R056"] {
        assert!(find(&advice, id).is_active(), "{id} should be active");
    }
}

#[test]
fn disabled_rule_excluded_everywhere() {
    let settings = RuleSettings {
        disabled: ["R004".to_string(), "R035".to_string()].into(),
        ..Default::default()
    };
    let advisor = Advisor::from_settings(&settings);
    for snap in [
        busy_snapshot(),
        Snapshot {
            merge_in_progress: true,
            ahead: 1,
            ..Default::default()
        },
    ] {
        let advice = advisor.advise(&snap);
        assert!(advice.iter().all(|a| a.rule_id() != "R004" && a.rule_id() != "R035"));
    }
}

#[test]
fn resolve_twice_is_idempotent() {
    let advisor = Advisor::default();
    let once = advisor.advise(&busy_snapshot());
    let twice = advisor.resolver().resolve(once.clone());
    assert_eq!(once, twice);
}

#[test]
fn protected_divergence_prefers_merge() {
    let snap = Snapshot {
        ahead: 1,
        behind: 2,
        on_protected_branch: true,
        ..Default::default()
    };
    let advice = Advisor::default().advise(&snap);
    assert_eq!(advice[0].rule_id(), "R032");
    assert!(advice[0].is_active());
    let sync = find(&advice, "R006");
    assert!(sync.is_suppressed());
    assert_eq!(sync.reason(), "Suppressed by merge (priority 90)");
    // R006 is suppressed, so its rebase key does not reach the pull.
    assert!(find(&advice, "R005").is_active());
}
