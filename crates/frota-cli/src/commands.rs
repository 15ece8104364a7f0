//! Command handlers

use std::path::{Path, PathBuf};

use base64::prelude::*;
use frota_app::config::Config;
use frota_app::ReconcileService;
use frota_domain::model::{RoleAliases, Table};
use frota_domain::service::{generate_summary_report, ColumnResolver};
use frota_infra::{load_table, load_template};
use frota_types::{FieldRole, OutputFormat, Result, TableKind};
use tracing::{info, warn};

use crate::cli::{Cli, Commands};
use crate::output::{output_reconcile, output_roles, RoleMapping};

pub fn execute(cli: Cli) -> Result<()> {
    // Load config
    let config = Config::load()?;

    // Override from CLI args
    let output_format = cli.format.unwrap_or(config.output_format);

    match cli.command {
        Commands::Reconcile {
            fleet,
            availability,
            template,
            sheet,
            output,
            report,
            embed,
        } => {
            let config = with_template(config, template, sheet);
            cmd_reconcile(
                &config,
                &fleet,
                &availability,
                output,
                report,
                embed,
                output_format,
            )
        }

        Commands::Schema { template, sheet } => {
            let config = with_template(config, template, sheet);
            cmd_schema(&config, output_format)
        }

        Commands::Inspect { file, sheet, kind } => {
            cmd_inspect(&config, &file, sheet.as_deref(), kind.into(), output_format)
        }

        Commands::Config {
            show,
            set_template,
            set_sheet,
            set_output,
            set_output_dir,
            set_ttl,
            reset,
        } => cmd_config(
            config,
            show,
            set_template,
            set_sheet,
            set_output,
            set_output_dir,
            set_ttl,
            reset,
        ),
    }
}

fn with_template(mut config: Config, template: Option<PathBuf>, sheet: Option<String>) -> Config {
    if template.is_some() {
        config.template_path = template;
    }
    if let Some(sheet) = sheet {
        config.template_sheet = sheet;
    }
    config
}

fn cmd_reconcile(
    config: &Config,
    fleet: &Path,
    availability: &Path,
    output: Option<PathBuf>,
    report: Option<PathBuf>,
    embed: bool,
    output_format: OutputFormat,
) -> Result<()> {
    let service = ReconcileService::new(config)?;
    let outcome = service.process_files(fleet, availability)?;
    let artifact = service.download(&outcome.token)?;

    let output_path = output.unwrap_or_else(|| {
        config
            .output_dir
            .clone()
            .unwrap_or_default()
            .join(&artifact.filename)
    });
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&output_path, &artifact.bytes)?;
    info!(path = %output_path.display(), bytes = artifact.bytes.len(), "wrote correction workbook");

    if let Some(report_path) = report {
        let text = generate_summary_report(&outcome.summary, service.statuses());
        std::fs::write(&report_path, text)?;
        info!(path = %report_path.display(), "wrote summary report");
    }

    if embed && output_format != OutputFormat::Json {
        warn!("--embed only applies to JSON output");
    }
    let embedded = embed.then(|| BASE64_STANDARD.encode(&artifact.bytes));

    output_reconcile(
        output_format,
        &outcome,
        service.statuses(),
        &output_path,
        embedded.as_deref(),
    )
}

fn cmd_schema(config: &Config, output_format: OutputFormat) -> Result<()> {
    let schema = config.schema()?;
    let mapping = role_mapping(&schema.columns, &config.aliases.template);

    let source = config
        .template_path
        .as_ref()
        .map(|p| format!("{} [{}]", p.display(), schema.sheet_name))
        .unwrap_or_else(|| format!("built-in [{}]", schema.sheet_name));

    output_roles(output_format, TableKind::Template, &source, &schema.columns, &mapping)
}

fn cmd_inspect(
    config: &Config,
    file: &Path,
    sheet: Option<&str>,
    kind: TableKind,
    output_format: OutputFormat,
) -> Result<()> {
    let table = if kind == TableKind::Template {
        let schema = load_template(file, sheet)?;
        Table::new(schema.columns)
    } else {
        load_table(file, sheet)?
    };
    let headers = table.headers().to_vec();
    let mapping = role_mapping(&headers, config.aliases.for_table(kind));

    let source = format!("{} ({} rows)", file.display(), table.len());
    output_roles(output_format, kind, &source, &headers, &mapping)
}

fn role_mapping(headers: &[String], aliases: &RoleAliases) -> Vec<RoleMapping> {
    let resolver = ColumnResolver::new(headers);
    FieldRole::ALL
        .iter()
        .map(|&role| RoleMapping {
            role,
            required: role.is_required(),
            column: resolver.resolve(aliases.for_role(role)).map(str::to_string),
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn cmd_config(
    mut config: Config,
    show: bool,
    set_template: Option<PathBuf>,
    set_sheet: Option<String>,
    set_output: Option<OutputFormat>,
    set_output_dir: Option<PathBuf>,
    set_ttl: Option<u64>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut modified = false;

    if let Some(template) = set_template {
        // Fail early on a template that cannot be read
        load_template(&template, Some(&config.template_sheet))?;
        config.template_path = Some(template);
        modified = true;
    }

    if let Some(sheet) = set_sheet {
        config.template_sheet = sheet;
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(dir) = set_output_dir {
        config.output_dir = Some(dir);
        modified = true;
    }

    if let Some(ttl) = set_ttl {
        config.artifact_ttl_secs = ttl;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
