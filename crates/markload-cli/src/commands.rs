use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use chrono::Local;
use comfy_table::Table;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, info_span, trace, warn};

use markload_ingest::{SourceFormat, load_roster, parse};
use markload_model::{ImportProfile, Partition, Roster};
use markload_report::{write_error_report, write_template};
use markload_submit::{BackendClient, CancelToken, CommitSummary, build_records, commit_in_chunks};
use markload_validate::validate_rows;

use crate::cli::{ImportArgs, ProfileArg, TemplateArgs};
use crate::config::{resolve_api_key, resolve_base_url};
use crate::logging::redact_value;
use crate::summary::apply_table_style;

/// Result of an import run, for the final summary and exit code.
pub struct ImportOutcome {
    pub rows_parsed: usize,
    pub syntax_errors: Vec<String>,
    pub partition: Partition,
    pub error_report: Option<PathBuf>,
    pub committed: Option<CommitSummary>,
    pub dry_run: bool,
}

impl ImportOutcome {
    /// Any syntax or validation failure makes the run non-clean; the exit
    /// code reflects it even when a partial submission went through.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.syntax_errors.is_empty() || !self.partition.is_clean()
    }
}

pub fn run_import(args: &ImportArgs) -> Result<ImportOutcome> {
    let import_span = info_span!(
        "import",
        file = %args.file.display(),
        profile = profile_name(args.profile)
    );
    let _import_guard = import_span.enter();
    let start = Instant::now();

    let content =
        fs::read_to_string(&args.file).with_context(|| format!("read {}", args.file.display()))?;
    let format = source_format(args)?;
    let profile = build_profile(args)?;

    let parsed = parse(&content, format, profile.entity);
    let rows_parsed = parsed.rows.len();
    info!(
        rows = rows_parsed,
        syntax_errors = parsed.errors.len(),
        format = %format,
        "parse complete"
    );

    // A fatal parse (empty file, malformed JSON) leaves nothing to validate.
    if parsed.rows.is_empty() && !parsed.errors.is_empty() {
        return Ok(ImportOutcome {
            rows_parsed: 0,
            syntax_errors: parsed.errors,
            partition: Partition::default(),
            error_report: None,
            committed: None,
            dry_run: args.dry_run,
        });
    }

    let runtime = build_runtime()?;
    let roster = load_import_roster(args, &profile, &runtime)?;
    let partition = validate_rows(&parsed.rows, &profile, &roster);
    for invalid in &partition.invalid {
        trace!(
            row = invalid.row,
            subject = redact_value(&invalid.subject),
            errors = invalid.errors.len(),
            "row failed validation"
        );
    }

    let error_report = if partition.invalid.is_empty() {
        None
    } else {
        let dir = args
            .error_report
            .clone()
            .or_else(|| args.file.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));
        let today = Local::now().date_naive();
        let path = write_error_report(&dir, &profile, &args.owner, today, &partition.invalid)
            .context("write error report")?;
        Some(path)
    };

    if args.dry_run {
        info!(
            valid = partition.valid_count(),
            invalid = partition.invalid_count(),
            duration_ms = start.elapsed().as_millis(),
            "dry run complete"
        );
        return Ok(ImportOutcome {
            rows_parsed,
            syntax_errors: parsed.errors,
            partition,
            error_report,
            committed: None,
            dry_run: true,
        });
    }

    // Counts are surfaced before anything touches the backend.
    info!(
        valid = partition.valid_count(),
        invalid = partition.invalid_count(),
        "validation complete"
    );
    if !partition.is_clean() && !args.allow_partial {
        bail!(
            "{} of {} rows failed validation; nothing was submitted. Fix the \
             rows in the error report or re-run with --allow-partial to submit \
             the {} valid rows.",
            partition.invalid_count(),
            partition.total(),
            partition.valid_count()
        );
    }

    let records = build_records(&partition.valid, &profile, &args.owner);
    let chunk_size = NonZeroUsize::new(args.chunk_size).context("--chunk-size must be at least 1")?;
    let summary = if records.is_empty() {
        info!("no valid rows to submit");
        CommitSummary::default()
    } else {
        let base_url = resolve_base_url(args.base_url.clone())?;
        let api_key = resolve_api_key(args.api_key.clone());
        let client = BackendClient::new(base_url, api_key.as_deref())?;
        let sink = client.table_sink(&profile);

        let total_chunks = records.len().div_ceil(chunk_size.get());
        let bar = ProgressBar::new(total_chunks as u64);
        bar.set_style(
            ProgressStyle::with_template("[{bar:40}] {pos}/{len} chunks ({percent}%)")
                .context("progress bar template")?
                .progress_chars("=> "),
        );
        let cancel = CancelToken::new();
        let summary = runtime.block_on(commit_in_chunks(
            &sink,
            &records,
            chunk_size,
            |progress| bar.set_position(progress.chunks_completed as u64),
            &cancel,
        ))?;
        bar.finish();
        summary
    };

    info!(
        rows = summary.rows_submitted,
        chunks = summary.chunks_submitted,
        duration_ms = start.elapsed().as_millis(),
        "import complete"
    );
    Ok(ImportOutcome {
        rows_parsed,
        syntax_errors: parsed.errors,
        partition,
        error_report,
        committed: Some(summary),
        dry_run: false,
    })
}

pub fn run_template(args: &TemplateArgs) -> Result<()> {
    let profile = default_profile(args.profile);
    let roster = load_roster(&args.roster)?;
    if roster.is_empty() {
        warn!(roster = %args.roster.display(), "roster is empty; template will have no rows");
    }
    let out_dir = args.out.clone().unwrap_or_else(|| PathBuf::from("."));
    let today = Local::now().date_naive();
    let path = write_template(&out_dir, &profile, &args.owner, today, &roster)?;
    println!("Template written to {}", path.display());
    Ok(())
}

pub fn run_profiles() {
    let profiles = [
        ImportProfile::marks(100.0),
        ImportProfile::fees(None),
        ImportProfile::tests(None),
    ];
    let mut table = Table::new();
    table.set_header(vec!["Profile", "Table", "Natural key", "Columns"]);
    apply_table_style(&mut table);
    for profile in profiles {
        let columns: Vec<&str> = profile.fields.iter().map(|field| field.column).collect();
        table.add_row(vec![
            profile.name.to_string(),
            profile.table.to_string(),
            profile.natural_key.join(" + "),
            columns.join(", "),
        ]);
    }
    println!("{table}");
}

fn load_import_roster(
    args: &ImportArgs,
    profile: &ImportProfile,
    runtime: &tokio::runtime::Runtime,
) -> Result<Roster> {
    if !profile.requires_roster() {
        return Ok(Roster::default());
    }
    if let Some(path) = &args.roster {
        return load_roster(path);
    }
    let class_id = args
        .class_id
        .as_deref()
        .context("either --roster or --class-id is required for this profile")?;
    let base_url = resolve_base_url(args.base_url.clone())?;
    let api_key = resolve_api_key(args.api_key.clone());
    let client = BackendClient::new(base_url, api_key.as_deref())?;
    let roster = runtime.block_on(client.fetch_roster(class_id))?;
    if roster.is_empty() {
        warn!(class_id, "backend returned an empty roster");
    }
    Ok(roster)
}

fn build_profile(args: &ImportArgs) -> Result<ImportProfile> {
    match args.profile {
        ProfileArg::Marks => {
            let max = args
                .max
                .context("--max is required for the marks profile")?;
            Ok(ImportProfile::marks(max))
        }
        ProfileArg::Fees => Ok(ImportProfile::fees(args.max)),
        ProfileArg::Tests => Ok(ImportProfile::tests(args.max)),
    }
}

/// Profile with default caps, for commands that never validate numerics.
fn default_profile(arg: ProfileArg) -> ImportProfile {
    match arg {
        ProfileArg::Marks => ImportProfile::marks(100.0),
        ProfileArg::Fees => ImportProfile::fees(None),
        ProfileArg::Tests => ImportProfile::tests(None),
    }
}

fn profile_name(arg: ProfileArg) -> &'static str {
    match arg {
        ProfileArg::Marks => "marks",
        ProfileArg::Fees => "fees",
        ProfileArg::Tests => "tests",
    }
}

fn source_format(args: &ImportArgs) -> Result<SourceFormat> {
    if let Some(format) = args.format {
        return Ok(format.into());
    }
    SourceFormat::from_path(&args.file).with_context(|| {
        format!(
            "cannot infer format from {}; pass --format",
            args.file.display()
        )
    })
}

fn build_runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("build async runtime")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::FormatArg;

    fn import_args(file: &str) -> ImportArgs {
        ImportArgs {
            file: PathBuf::from(file),
            profile: ProfileArg::Marks,
            format: None,
            owner: "test-42".to_string(),
            max: Some(100.0),
            roster: None,
            class_id: None,
            chunk_size: 200,
            dry_run: true,
            allow_partial: false,
            error_report: None,
            base_url: None,
            api_key: None,
        }
    }

    #[test]
    fn format_falls_back_to_extension() {
        let args = import_args("marks.json");
        assert_eq!(source_format(&args).expect("format"), SourceFormat::Json);

        let mut args = import_args("marks.unknown");
        assert!(source_format(&args).is_err());
        args.format = Some(FormatArg::Text);
        assert_eq!(source_format(&args).expect("format"), SourceFormat::Text);
    }

    #[test]
    fn marks_profile_requires_a_cap() {
        let mut args = import_args("marks.csv");
        args.max = None;
        assert!(build_profile(&args).is_err());
        args.max = Some(50.0);
        let profile = build_profile(&args).expect("profile");
        assert_eq!(profile.name, "marks");
    }
}
