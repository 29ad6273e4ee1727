use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use vcxgen_config::Config;
use vcxgen_engine::{ExportRequest, ExtensionMap, FilterOptions, export_project, parse_namespace};

const TEMPLATE_FILE: &str = "template.vcxproj";

#[derive(Parser, Debug)]
#[command(name = "vcxgen")]
#[command(about = "Generate a .vcxproj and .vcxproj.filters from a list of source files", long_about = None)]
struct Cli {
    /// Source and header files to list in the project
    #[arg(required = true)]
    files: Vec<String>,

    /// Project name; defaults to the output directory's name
    #[arg(short, long)]
    name: Option<String>,

    /// Directory to write the project files into
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Project template to rewrite
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Directory filter folders are relative to
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Config file to use instead of ~/.config/vcxgen/config.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // RUST_LOG overrides the default level
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    log::debug!("Config path: {}", config_path.display());
    let config = Config::load_or_default(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let request = build_request(cli, config)?;
    let outputs = export_project(&request).context("Failed to export project")?;

    println!("{}", outputs.project.display());
    println!("{}", outputs.filters.display());
    Ok(())
}

fn build_request(cli: Cli, config: Config) -> Result<ExportRequest> {
    // Parse the namespace before anything is written.
    let namespace = parse_namespace(&config.namespace)?;

    let template = match cli.template.or(config.template_path) {
        Some(path) => path,
        None => default_template()?,
    };
    let project_name = cli
        .name
        .unwrap_or_else(|| default_project_name(&cli.out_dir));
    let root = cli.root.unwrap_or(config.root_dir);

    Ok(ExportRequest {
        template,
        files: cli.files,
        out_dir: cli.out_dir,
        project_name,
        filters: FilterOptions::new(namespace, root),
        extensions: ExtensionMap::new(&config.source_extensions, &config.header_extensions),
    })
}

/// `template.vcxproj` in the directory holding the executable.
fn default_template() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed to locate the executable")?;
    let dir = exe
        .parent()
        .context("Executable path has no parent directory")?;
    Ok(dir.join(TEMPLATE_FILE))
}

fn default_project_name(out_dir: &Path) -> String {
    std::path::absolute(out_dir)
        .ok()
        .and_then(|dir| dir.file_name().map(|name| name.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "project".to_string())
}
