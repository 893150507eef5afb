use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::Table;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crm_cli::logging::redact_value;
use crm_core::{ImportOptions, ImportPipeline, JsonLinesBackend};
use crm_map::{Destination, MappingOverrides};
use crm_model::{EntityType, ImportReport, UserId};
use crm_validate::EnumMatching;

use crate::cli::{ImportArgs, MappingsArgs};
use crate::summary::apply_table_style;

const PROGRESS_TEMPLATE: &str = "{spinner} [{bar:40}] {pos}/{len} rows ({elapsed})";

pub fn run_entities() -> Result<()> {
    println!("{}", entities_table());
    Ok(())
}

pub fn run_mappings(args: &MappingsArgs) -> Result<()> {
    let overrides = load_overrides(args.mappings.as_deref())?;
    println!("{}", mappings_table(args.entity, &overrides));
    Ok(())
}

pub fn run_import(args: &ImportArgs) -> Result<ImportReport> {
    let options = import_options(args)?;
    let overrides = load_overrides(args.mappings.as_deref())?;
    let user_id = UserId::new(args.user_id.as_str()).context("invalid --user-id")?;
    let pipeline = ImportPipeline::new(options).with_overrides(overrides);
    let mut backend = JsonLinesBackend::new(&args.output_dir);

    let bar = if args.no_progress {
        ProgressBar::hidden()
    } else {
        progress_bar()
    };
    let mut on_progress = |processed: usize, total: usize| {
        bar.set_length(total as u64);
        bar.set_position(processed as u64);
    };
    let result = pipeline.import_file(
        args.entity,
        &user_id,
        &args.file,
        &mut backend,
        &mut on_progress,
    );
    bar.finish_and_clear();
    let report = result?;

    for rejection in report.ambiguous_rejections() {
        debug!(
            row = rejection.row_number,
            field = %rejection.field,
            value = redact_value(&rejection.value),
            reason = %rejection.reason,
            "heuristic rejection"
        );
    }
    if let Some(path) = &args.report_json {
        write_report(&report, path)?;
        info!(path = %path.display(), "wrote import report");
    }
    if !report.dry_run {
        info!(
            path = %backend.table_path(&report.table).display(),
            "records written"
        );
    }
    Ok(report)
}

/// Options file first, then flag overrides.
fn import_options(args: &ImportArgs) -> Result<ImportOptions> {
    let mut options = match &args.config {
        Some(path) => ImportOptions::load(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => ImportOptions::default(),
    };
    if args.dry_run {
        options = options.with_dry_run(true);
    }
    if args.strict_enums {
        options = options.with_enum_matching(EnumMatching::Strict);
    }
    Ok(options)
}

fn load_overrides(path: Option<&Path>) -> Result<MappingOverrides> {
    match path {
        Some(path) => MappingOverrides::load(path)
            .with_context(|| format!("load mappings {}", path.display())),
        None => Ok(MappingOverrides::default()),
    }
}

fn write_report(report: &ImportReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("serialize import report")?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))
}

fn progress_bar() -> ProgressBar {
    let bar = ProgressBar::new(0);
    match ProgressStyle::with_template(PROGRESS_TEMPLATE) {
        Ok(style) => bar.set_style(style.progress_chars("=> ")),
        Err(err) => debug!(error = %err, "default progress style"),
    }
    bar
}

fn entities_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Entity", "Table", "Required", "Enums"]);
    apply_table_style(&mut table);
    for entity in EntityType::ALL {
        let schema = entity.schema();
        let required = schema
            .required
            .iter()
            .map(|field| match field.default {
                Some(default) => format!("{} (default {default})", field.column),
                None => field.column.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ");
        let enums = schema
            .enums
            .iter()
            .map(|spec| spec.column)
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            entity.as_str().to_string(),
            schema.table.to_string(),
            required,
            enums,
        ]);
    }
    table
}

fn mappings_table(entity: EntityType, overrides: &MappingOverrides) -> Table {
    let mapper = ImportPipeline::default()
        .with_overrides(overrides.clone())
        .mapper(entity);
    let mut table = Table::new();
    table.set_header(vec!["Header", "Column"]);
    apply_table_style(&mut table);
    for (header, destination) in mapper.entries() {
        let column = match destination {
            Destination::Field(field) => field.clone(),
            Destination::Ignore => "(ignored)".to_string(),
        };
        table.add_row(vec![header.to_string(), column]);
    }
    table
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn import_args(dir: &Path, file: &Path) -> ImportArgs {
        ImportArgs {
            entity: EntityType::Companies,
            file: file.to_path_buf(),
            user_id: "user-1".to_string(),
            output_dir: dir.join("out"),
            dry_run: false,
            strict_enums: false,
            config: None,
            mappings: None,
            report_json: Some(dir.join("report.json")),
            no_progress: true,
        }
    }

    #[test]
    fn flags_override_the_config_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = dir.path().join("options.json");
        fs::write(&config, r#"{ "max_rows": 50, "enum_matching": "lenient" }"#).unwrap();
        let mut args = import_args(dir.path(), &PathBuf::from("companies.csv"));
        args.config = Some(config);
        args.strict_enums = true;
        args.dry_run = true;

        let options = import_options(&args).unwrap();
        assert_eq!(options.max_rows, 50);
        assert_eq!(options.enum_matching, EnumMatching::Strict);
        assert!(options.dry_run);
    }

    #[test]
    fn import_writes_records_and_report() {
        let dir = tempfile::TempDir::new().unwrap();
        let csv = dir.path().join("companies.csv");
        fs::write(&csv, "Company,Industry\nAcme,Manufacturing\n,Retail\n").unwrap();
        let args = import_args(dir.path(), &csv);

        let report = run_import(&args).unwrap();
        assert_eq!(report.rows_imported, 1);
        assert_eq!(report.rows_skipped, 1);

        let written = fs::read_to_string(dir.path().join("out").join("companies.jsonl")).unwrap();
        assert_eq!(written.lines().count(), 1);
        let saved: ImportReport =
            serde_json::from_str(&fs::read_to_string(dir.path().join("report.json")).unwrap())
                .unwrap();
        assert_eq!(saved, report);
    }

    #[test]
    fn rejected_file_surfaces_the_import_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("companies.txt");
        fs::write(&file, "Company\nAcme\n").unwrap();
        let err = run_import(&import_args(dir.path(), &file)).unwrap_err();
        let import_err = err.downcast_ref::<crm_core::ImportError>().unwrap();
        assert_eq!(import_err.category(), "wrong file type");
    }

    #[test]
    fn every_entity_is_listed() {
        assert_eq!(entities_table().row_count(), EntityType::ALL.len());
    }

    #[test]
    fn mapping_listing_includes_overrides() {
        let overrides =
            MappingOverrides::from_json(r#"{ "deals": { "Phase": "stage" } }"#).unwrap();
        let with = mappings_table(EntityType::Deals, &overrides).row_count();
        let without = mappings_table(EntityType::Deals, &MappingOverrides::default()).row_count();
        assert_eq!(with, without + 1);
    }
}
