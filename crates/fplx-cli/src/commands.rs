use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing::{info, info_span};

use fplx_cli::pipeline::{CheckInputs, load_hierarchy, run_check};
use fplx_ingest::{CheckConfig, default_resources_dir, discover_config, load_config};
use fplx_model::{TableKind, Term};
use fplx_report::Report;

use crate::cli::{CheckArgs, LineageArgs, OutputFormatArg};
use crate::summary::render_table;

/// Run the full check and write the rendered report. Returns the report so
/// the caller can pick the exit status.
pub fn run_check_command(args: &CheckArgs, config_path: Option<&Path>) -> Result<Report> {
    let resources_dir = resolve_resources_dir(args.resources_dir.as_ref());
    let check_span = info_span!("check", resources_dir = %resources_dir.display());
    let _check_guard = check_span.enter();
    let config = resolve_config(&resources_dir, config_path)?;
    let inputs = CheckInputs::new(&resources_dir)
        .with_override(TableKind::Entities, args.entities.clone())
        .with_override(TableKind::Relations, args.relations.clone())
        .with_override(TableKind::GroundingMap, args.grounding_map.clone())
        .with_override(TableKind::GenePrefixes, args.gene_prefixes.clone());

    let run = run_check(&inputs, &config);
    let rendered = match args.format {
        OutputFormatArg::Text => run.report.render_text(),
        OutputFormatArg::Json => {
            let mut json = run.report.to_json().context("serialize report")?;
            json.push('\n');
            json
        }
        OutputFormatArg::Table => {
            let styled = args.output.is_none() && io::stdout().is_terminal();
            render_table(&run.report, styled)
        }
    };
    write_output(args.output.as_deref(), &rendered)?;
    Ok(run.report)
}

/// Print the parents and transitive ancestors of one term.
pub fn run_lineage(args: &LineageArgs, config_path: Option<&Path>) -> Result<()> {
    let term = Term::parse_qualified(&args.term)
        .ok_or_else(|| anyhow!("expected NAMESPACE:ID, got '{}'", args.term))?;
    let resources_dir = resolve_resources_dir(args.resources_dir.as_ref());
    let config = resolve_config(&resources_dir, config_path)?;
    let inputs = CheckInputs::new(&resources_dir);
    let graph = load_hierarchy(&inputs, &config)
        .with_context(|| format!("load hierarchy from {}", resources_dir.display()))?;
    if !graph.is_member(&term) {
        return Err(anyhow!("{term} does not appear in the relations table"));
    }

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{term}")?;
    let parents = graph.parents(&term);
    if parents.is_empty() {
        writeln!(stdout, "  parents: none")?;
    } else {
        writeln!(stdout, "  parents:")?;
        for (parent, relation) in parents {
            writeln!(stdout, "    {relation} {parent}")?;
        }
    }
    let ancestors = graph.ancestors(&term);
    if ancestors.is_empty() {
        writeln!(stdout, "  ancestors: none")?;
    } else {
        writeln!(stdout, "  ancestors:")?;
        for ancestor in ancestors {
            writeln!(stdout, "    {ancestor}")?;
        }
    }
    Ok(())
}

fn resolve_resources_dir(arg: Option<&PathBuf>) -> PathBuf {
    arg.cloned().unwrap_or_else(default_resources_dir)
}

fn resolve_config(resources_dir: &Path, config_path: Option<&Path>) -> Result<CheckConfig> {
    let config = match config_path {
        Some(path) => {
            load_config(path).with_context(|| format!("load config {}", path.display()))?
        }
        None => discover_config(resources_dir).context("load config")?,
    };
    info!(
        line_terminator = config.dialect.line_terminator.label(),
        local_namespaces = config.namespaces.local.len(),
        "configuration resolved"
    );
    Ok(config)
}

fn write_output(path: Option<&Path>, rendered: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("write report {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .context("write report to stdout")
        }
    }
}
