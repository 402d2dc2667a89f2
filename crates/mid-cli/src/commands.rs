use std::collections::HashSet;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use tracing::debug;

use mid_diff::{
    CollectionDiff, DiffConfig, Differ, FieldDiffs, MidReport, Normalization, PrincipalSubDiff,
    ReportEntry, ReportValue,
};
use mid_types::{Entity, Mid};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Command::Diff(args) => cmd_diff(args, config, &cli.format),
        Command::Check(args) => cmd_check(args, &cli.format),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<DiffConfig> {
    let Some(path) = path else {
        return Ok(DiffConfig::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = DiffConfig::from_toml_str(&raw)
        .with_context(|| format!("parsing config {}", path.display()))?;
    debug!(path = %path.display(), "loaded diff config");
    Ok(config)
}

fn load_record(path: &Path) -> anyhow::Result<Mid> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading record {}", path.display()))?;
    Mid::from_json(&raw).with_context(|| format!("loading record {}", path.display()))
}

fn cmd_diff(args: DiffArgs, mut config: DiffConfig, format: &OutputFormat) -> anyhow::Result<()> {
    if args.strict {
        config.normalization = Normalization::strict();
    }
    let kyc = load_record(&args.kyc)?;
    let adloc = load_record(&args.adloc)?;
    let report = Differ::new(config).diff_records(&kyc, &adloc);

    match format {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Text => print!("{}", render_report(&report)),
    }
    Ok(())
}

fn cmd_check(args: CheckArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let mid = load_record(&args.record)?;
    let info = &mid.principal_info;
    let duplicates = duplicate_keys(&mid);

    match format {
        OutputFormat::Json => {
            let summary = serde_json::json!({
                "mid_number": mid.mid_number,
                "principal_entities": info.principal_entities.len(),
                "intermediate_entities": info.intermediate_entities.len(),
                "duplicate_principal_keys": duplicates,
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Text => {
            println!("{} Loaded record {}", "✓".green().bold(), mid.mid_number.bold());
            println!("  Principal entities: {}", info.principal_entities.len());
            println!("  Intermediate entities: {}", info.intermediate_entities.len());
            for principal in &info.principal_entities {
                let key = principal.identity_key().as_str();
                if duplicates.iter().any(|d| d == key) {
                    println!("    {} {}", key.yellow(), "(duplicate key)".yellow());
                } else {
                    println!("    {}", key);
                }
            }
        }
    }
    Ok(())
}

/// Principal identity keys that occur more than once, in first-seen order.
fn duplicate_keys(mid: &Mid) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for principal in &mid.principal_info.principal_entities {
        let key = principal.identity_key().as_str();
        if !seen.insert(key) && !duplicates.iter().any(|d| d == key) {
            duplicates.push(key.to_string());
        }
    }
    duplicates
}

fn render_report(report: &MidReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Comparing {} (kyc) with {} (adloc)",
        report.kyc_id.bold(),
        report.adloc_id.bold()
    );
    if report.is_empty() {
        let _ = writeln!(out, "{} No differences.", "✓".green().bold());
        return out;
    }
    for entry in &report.diffs {
        let _ = writeln!(out, "{}", entry.kind().as_str().cyan().bold());
        match entry {
            ReportEntry::Section(diff) => render_fields(&mut out, &diff.fields, 1),
            ReportEntry::PrincipalInfo(diff) => {
                for sub in &diff.sub_sections {
                    match sub {
                        PrincipalSubDiff::ComplexStructure { vals } => {
                            let _ = writeln!(
                                out,
                                "  IsComplexStructure: {} → {}",
                                render_value(&vals.0),
                                render_value(&vals.1)
                            );
                        }
                        PrincipalSubDiff::IntermediateEntities(c)
                        | PrincipalSubDiff::PrincipalEntities(c) => {
                            render_collection(&mut out, c, report)
                        }
                    }
                }
            }
        }
    }
    out
}

fn render_collection(out: &mut String, diff: &CollectionDiff, report: &MidReport) {
    let mut header = format!("  {}", diff.kind);
    if diff.left_empty {
        header.push_str(&format!(" ({} empty)", report.kyc_id));
    }
    if diff.right_empty {
        header.push_str(&format!(" ({} empty)", report.adloc_id));
    }
    let _ = writeln!(out, "{}", header);
    let _ = writeln!(
        out,
        "    {} differing, {} only in {}, {} only in {}",
        diff.shared_diff_count(),
        diff.left_only_count(),
        report.kyc_id,
        diff.right_only_count(),
        report.adloc_id
    );
    for shared in &diff.shared_entity_diffs {
        let _ = writeln!(out, "    {}", shared.label.yellow());
        render_fields(out, &shared.fields, 3);
    }
    for flat in &diff.left_only_entities {
        let _ = writeln!(out, "    {} {}", "-".red(), render_tuple(flat));
    }
    for flat in &diff.right_only_entities {
        let _ = writeln!(out, "    {} {}", "+".green(), render_tuple(flat));
    }
}

fn render_fields(out: &mut String, fields: &FieldDiffs, depth: usize) {
    let indent = "  ".repeat(depth);
    for (name, (left, right)) in fields.iter() {
        let _ = writeln!(
            out,
            "{indent}{}: {} → {}",
            name,
            render_value(left),
            render_value(right)
        );
    }
}

fn render_tuple(values: &[ReportValue]) -> String {
    let parts: Vec<_> = values.iter().map(render_value).collect();
    format!("({})", parts.join(", "))
}

fn render_value(value: &ReportValue) -> String {
    match value {
        ReportValue::Text(Some(text)) => format!("{:?}", text),
        ReportValue::Text(None) => "null".to_string(),
        ReportValue::Tuple(values) => {
            let parts: Vec<_> = values
                .iter()
                .map(|v| v.as_deref().map_or("null".to_string(), |t| format!("{:?}", t)))
                .collect();
            format!("({})", parts.join(", "))
        }
    }
}
