use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::Context;
use colored::Colorize;

use cmpkit_diff::{
    dispatch, line_diff, parse_tree, similarity_report_with, structural_diff_with, DiffConfig,
    LineDiff, TreeChange, NO_NEWLINE_MARKER,
};
use cmpkit_types::ChangeKind;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_command_to(cli, &mut out)
}

pub fn run_command_to(cli: Cli, out: &mut impl Write) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => DiffConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DiffConfig::default(),
    };
    tracing::debug!(?config, "configuration loaded");
    let json = matches!(cli.format, OutputFormat::Json);

    match cli.command {
        Command::Similarity(args) => cmd_similarity(args, &config, json, out),
        Command::Lines(args) => cmd_lines(args, &config, json, out),
        Command::Tree(args) => cmd_tree(args, config, json, out),
        Command::Request(args) => cmd_request(args, &config, out),
    }
}

fn read_file(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn cmd_similarity(
    args: SimilarityArgs,
    config: &DiffConfig,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let report = similarity_report_with(&args.a, &args.b, config);
    if json {
        let mut value = serde_json::json!({ "score": report.score });
        if args.distance {
            value["distance"] = report.distance.into();
        }
        writeln!(out, "{value}")?;
    } else if args.distance {
        writeln!(
            out,
            "{} (distance {} over {} chars)",
            report.score.to_string().bold(),
            report.distance,
            report.max_len
        )?;
    } else {
        writeln!(out, "{}", report.score)?;
    }
    Ok(())
}

fn cmd_lines(
    args: LinesArgs,
    config: &DiffConfig,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let old = read_file(&args.old)?;
    let new = read_file(&args.new)?;
    let diff = line_diff(&old, &new);

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&diff)?)?;
        return Ok(());
    }

    if diff.is_identical() {
        writeln!(out, "No changes.")?;
        return Ok(());
    }

    let context = args.context.unwrap_or(config.context_lines);
    print_unified(&diff, &args.old, &args.new, context, out)?;
    let stats = diff.stats;
    writeln!(
        out,
        "{} added, {} removed, {} unchanged ({} total)",
        stats.added.to_string().green(),
        stats.removed.to_string().red(),
        stats.unchanged,
        stats.total
    )?;
    Ok(())
}

fn print_unified(
    diff: &LineDiff,
    old: &Path,
    new: &Path,
    context: usize,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    writeln!(out, "{}", format!("--- {}", old.display()).bold())?;
    writeln!(out, "{}", format!("+++ {}", new.display()).bold())?;
    for hunk in diff.hunks(context) {
        writeln!(out, "{}", hunk.header().cyan())?;
        let marks = hunk.missing_newline_after();
        for (idx, op) in hunk.lines.iter().enumerate() {
            match op.kind {
                ChangeKind::Added => writeln!(out, "{}", format!("+{}", op.value).green())?,
                ChangeKind::Removed => writeln!(out, "{}", format!("-{}", op.value).red())?,
                _ => writeln!(out, " {}", op.value)?,
            }
            if marks.contains(&idx) {
                writeln!(out, "{NO_NEWLINE_MARKER}")?;
            }
        }
    }
    Ok(())
}

fn cmd_tree(
    args: TreeArgs,
    mut config: DiffConfig,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if let Some(style) = args.path_style {
        config.path_style = style.into();
    }
    let old = parse_tree(&read_file(&args.old)?, "old")?;
    let new = parse_tree(&read_file(&args.new)?, "new")?;
    let diff = structural_diff_with(&old, &new, &config);

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&diff.changes)?)?;
        return Ok(());
    }

    if diff.is_empty() {
        writeln!(out, "No changes.")?;
        return Ok(());
    }

    for change in &diff.changes {
        let line = match change {
            TreeChange::Added { path, value } => format!("+ {path}: {value}").green(),
            TreeChange::Removed { path, value } => format!("- {path}: {value}").red(),
            TreeChange::Changed { path, from, to } => {
                format!("~ {path}: {from} → {to}").yellow()
            }
        };
        writeln!(out, "{line}")?;
    }
    writeln!(
        out,
        "{} added, {} removed, {} changed",
        diff.additions(),
        diff.removals(),
        diff.modifications()
    )?;
    Ok(())
}

fn cmd_request(
    args: RequestArgs,
    config: &DiffConfig,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let text = match &args.file {
        Some(path) => read_file(path)?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading request from stdin")?;
            buf
        }
    };
    let request: serde_json::Value =
        serde_json::from_str(&text).context("request is not valid JSON")?;
    let response = dispatch(&request, config)?;
    writeln!(out, "{}", serde_json::to_string_pretty(&response)?)?;
    Ok(())
}
