use gitnext_config::Config;
use gitnext_core::RuleCatalog;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct RuleRow<'a> {
    id: &'a str,
    tier: &'static str,
    priority: u32,
    command: &'a str,
    description: &'a str,
    enabled: bool,
}

fn rows(catalog: &RuleCatalog) -> Vec<RuleRow<'_>> {
    catalog
        .rules()
        .iter()
        .map(|r| RuleRow {
            id: r.id,
            tier: r.tier().as_str(),
            priority: r.priority,
            command: r.command,
            description: r.description,
            enabled: !catalog.is_disabled(r.id),
        })
        .collect()
}

fn format_table(rows: &[RuleRow<'_>]) -> String {
    let mut out = String::new();
    for row in rows {
        let flag = if row.enabled { "" } else { "  (disabled)" };
        out.push_str(&format!(
            "{}  {:<13} {:>3}  {}{flag}\n      {}\n",
            row.id, row.tier, row.priority, row.description, row.command
        ));
    }
    out
}

/// `git-next rules [--json]`
pub fn execute(cwd: &Path, config_path: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let (config, _) = Config::load(config_path, cwd)?;
    let catalog = RuleCatalog::new(&config.rule_settings());
    let rows = rows(&catalog);

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print!("{}", format_table(&rows));
    }
    Ok(())
}
