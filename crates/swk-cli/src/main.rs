use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use swk_core::config::{self, CONFIG_FILE_NAME, SwkConfig};
use swk_core::locate::PathLocator;
use swk_core::mock::{mock_script, mock_template};
use swk_core::model::OperationPlan;
use swk_core::{naming, parse};
use swk_core::parse::document::Document;
use swk_core::parse::operation::HttpMethod;
use swk_core::render_model::{RenderModel, RenderOptions};
use swk_core::resolve::{analyze, analyze_all};
use swk_core::{CodeGenerator, GeneratedFile};
use swk_ts_client::{TsClientConfig, TsClientGenerator};

#[derive(Parser)]
#[command(
    name = "swk",
    about = "Client functions and mock templates from Swagger/OpenAPI documents",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate client functions
    Code {
        /// Path to the Swagger/OpenAPI document (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,

        #[command(flatten)]
        target: OperationArgs,

        /// Write `<path>.ts` / `<path>.js` modules here instead of printing
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Which flavour to print when no output directory is given
        #[arg(long, default_value = "typed")]
        variant: VariantArg,
    },

    /// Print the mock template of an operation's 200 response
    Mock {
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Document path template, or a concrete request path
        #[arg(short, long)]
        path: String,

        #[arg(short, long, default_value = "get")]
        method: String,

        /// Emit a generator script instead of the JSON template
        #[arg(long)]
        script: bool,
    },

    /// Show the analysis of an operation: declarations, type names, diagnostics
    Plan {
        #[arg(short, long)]
        input: Option<PathBuf>,

        #[arg(short, long)]
        path: String,

        #[arg(short, long, default_value = "get")]
        method: String,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: PlanFormat,
    },

    /// List every operation with its derived name
    List {
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Initialize a new swk configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(clap::Args)]
struct OperationArgs {
    /// Only this path template (all operations when omitted)
    #[arg(short, long, requires = "method")]
    path: Option<String>,

    #[arg(short, long)]
    method: Option<String>,
}

#[derive(Clone, ValueEnum)]
enum VariantArg {
    Typed,
    Untyped,
}

#[derive(Clone, ValueEnum)]
enum PlanFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Code {
            input,
            target,
            out,
            variant,
        } => cmd_code(input, target, out, variant),

        Commands::Mock {
            input,
            path,
            method,
            script,
        } => cmd_mock(input, &path, &method, script),

        Commands::Plan {
            input,
            path,
            method,
            format,
        } => cmd_plan(input, &path, &method, format),

        Commands::List { input } => cmd_list(input),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "swk", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<SwkConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    Ok(config::load_config(&config_path)?)
}

fn load_document(input: Option<PathBuf>, cfg: &SwkConfig) -> Result<Document> {
    let path = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let content =
        fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");

    let doc = match ext {
        "json" => parse::from_json(&content),
        _ => parse::from_yaml(&content),
    }
    .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(doc)
}

fn parse_method(method: &str) -> Result<HttpMethod> {
    method.parse().map_err(anyhow::Error::msg)
}

/// Resolve `path` to a document path template: used as-is when the document
/// declares it, otherwise matched as a concrete request path under the base
/// path.
fn resolve_template<'a>(
    doc: &'a Document,
    path: &'a str,
    method: HttpMethod,
    options: &RenderOptions,
) -> Result<&'a str> {
    if doc.operation(path, method).is_some() {
        return Ok(path);
    }
    PathLocator::new(doc, options.base_path.as_deref())
        .locate(path, method)
        .or_else(|| PathLocator::new(doc, None).locate(path, method))
        .map(|found| found.template)
        .with_context(|| format!("no operation matches {method} {path}"))
}

/// Write generated files to disk under the given base directory.
fn write_files(base: &Path, files: &[GeneratedFile]) -> Result<()> {
    for file in files {
        let path = base.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, &file.content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("  wrote {}", path.display());
    }
    Ok(())
}

fn report_diagnostics(plan: &OperationPlan) {
    for diagnostic in plan.diagnostics.iter() {
        eprintln!("  note: {} {}: {diagnostic}", plan.method, plan.path);
    }
}

fn cmd_code(
    input: Option<PathBuf>,
    target: OperationArgs,
    out: Option<PathBuf>,
    variant: VariantArg,
) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let doc = load_document(input, &cfg)?;
    let options = RenderOptions::for_document(&doc, cfg.client.base_path.as_deref());
    let ts_config = TsClientConfig::load(&cfg.client)?;

    let plans = match (target.path, target.method) {
        (Some(path), Some(method)) => {
            let method = parse_method(&method)?;
            let template = resolve_template(&doc, &path, method, &options)?;
            let plan = analyze(&doc, template, method)
                .with_context(|| format!("no operation {method} {template}"))?;
            vec![plan]
        }
        _ => analyze_all(&doc),
    };

    for plan in &plans {
        report_diagnostics(plan);
    }

    match out {
        Some(out) => {
            let files = render_files(&doc, &plans, &options, &ts_config)?;
            write_files(&out, &files)?;
            eprintln!("Generated {} files in {}", files.len(), out.display());
        }
        None => {
            for plan in &plans {
                let model = RenderModel::from_plan(plan, &options);
                let code = TsClientGenerator
                    .generate(&model, &ts_config)
                    .with_context(|| format!("failed to render {}", model.name))?;
                match variant {
                    VariantArg::Typed => print!("{}", code.typed),
                    VariantArg::Untyped => print!("{}", code.untyped),
                }
            }
        }
    }
    Ok(())
}

/// Render `.ts`/`.js` modules for each plan, one pair per path and method.
fn render_files(
    doc: &Document,
    plans: &[OperationPlan],
    options: &RenderOptions,
    ts_config: &TsClientConfig,
) -> Result<Vec<GeneratedFile>> {
    let mut stems = HashSet::new();
    let mut files = Vec::new();
    for plan in plans {
        let shared_path = doc
            .paths
            .get(&plan.path)
            .is_some_and(|item| item.operations().count() > 1);
        let stem = naming::module_stem(
            options.base_path.as_deref(),
            &plan.path,
            plan.method,
            shared_path,
        );
        if !stems.insert(stem.clone()) {
            anyhow::bail!(
                "{} {} would overwrite the module {stem}; rename its path",
                plan.method,
                plan.path
            );
        }

        let model = RenderModel::from_plan(plan, options);
        let code = TsClientGenerator
            .generate(&model, ts_config)
            .with_context(|| format!("failed to render {}", model.name))?;
        files.extend(code.into_files(&stem));
    }
    Ok(files)
}

fn cmd_mock(input: Option<PathBuf>, path: &str, method: &str, script: bool) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let doc = load_document(input, &cfg)?;
    let method = parse_method(method)?;
    let options = RenderOptions::for_document(&doc, cfg.client.base_path.as_deref());
    let template = resolve_template(&doc, path, method, &options)?;

    let node = mock_template(&doc, template, method, &cfg.mock.options());
    if node.is_none() {
        log::warn!("{method} {template} has no $ref response schema; using an empty template");
    }

    if script {
        print!("{}", mock_script(node.as_ref()));
    } else {
        let value = node
            .map(|n| n.to_json())
            .unwrap_or_else(|| serde_json::json!({}));
        println!("{}", serde_json::to_string_pretty(&value)?);
    }
    Ok(())
}

fn cmd_plan(input: Option<PathBuf>, path: &str, method: &str, format: PlanFormat) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let doc = load_document(input, &cfg)?;
    let method = parse_method(method)?;
    let options = RenderOptions::for_document(&doc, cfg.client.base_path.as_deref());
    let template = resolve_template(&doc, path, method, &options)?;
    let plan = analyze(&doc, template, method)
        .with_context(|| format!("no operation {method} {template}"))?;

    match format {
        PlanFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&plan)?;
            print!("{}", yaml);
        }
        PlanFormat::Json => {
            let json = serde_json::to_string_pretty(&plan)?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn cmd_list(input: Option<PathBuf>) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let doc = load_document(input, &cfg)?;

    eprintln!(
        "{} {} ({} operations)",
        doc.info.title,
        doc.info.version,
        doc.operations().count()
    );
    for plan in analyze_all(&doc) {
        let notes = match plan.diagnostics.len() {
            0 => String::new(),
            n => format!("  [{n} notes]"),
        };
        println!(
            "{:<7} {:<40} {}{notes}",
            plan.method.as_str(),
            plan.path,
            plan.name
        );
    }
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
