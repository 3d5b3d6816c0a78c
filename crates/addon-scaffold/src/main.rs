//! addon-scaffold CLI - generate Mozilla add-on skeletons from templates

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use scaffold_core::template::{check_compatibility, generator, ScaffoldManifest};
use scaffold_core::{slugify, write_xpi, Vars};

/// CLI version - compared against template manifest versions
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "addon-scaffold")]
#[command(about = "Generate Mozilla add-on skeletons from token-bearing templates")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve a template tree and write the scaffold
    Generate(GenerateArgs),
    /// List every token key a template tree references (dry-run aid)
    Tokens(TokensArgs),
}

#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Directory containing the template files
    #[arg(long = "template-dir")]
    pub template_dir: PathBuf,

    /// Directory to write the resolved scaffold into
    #[arg(long = "out-dir")]
    pub out_dir: PathBuf,

    /// Substitution entries (repeatable); overrides --vars entries
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// YAML or JSON file of substitution entries
    #[arg(long)]
    pub vars: Option<PathBuf>,

    /// Add-on display name; derives the slug when none is set explicitly
    #[arg(long)]
    pub name: Option<String>,

    /// Features to include (repeatable), as declared by scaffold.yaml
    #[arg(long = "feature")]
    pub features: Vec<String>,

    /// Additionally package the scaffold as an XPI at this path
    #[arg(long)]
    pub xpi: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct TokensArgs {
    /// Directory containing the template files
    #[arg(long = "template-dir")]
    pub template_dir: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    match args.command {
        Command::Generate(args) => run_generate(args),
        Command::Tokens(args) => run_tokens(args),
    }
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    let vars = build_vars(&args)?;
    if !vars.is_empty() {
        println!(
            "{} {}",
            "Substituting:".cyan().bold(),
            vars.keys().collect::<Vec<_>>().join(", ")
        );
    }

    if let Some(manifest) = ScaffoldManifest::load(&args.template_dir)? {
        println!(
            "{} {}",
            "Template:".cyan().bold(),
            manifest.name
        );
        if let Some(template_version) = &manifest.version {
            if let Some(warning) = check_compatibility(CLI_VERSION, template_version) {
                eprintln!("{}", warning.yellow());
            }
        }
    }

    let resolved = generator::resolve(&args.template_dir, &vars, &args.features)?;
    generator::write_tree(&resolved, &args.out_dir)?;
    for file in &resolved {
        println!("  {} {}", "->".blue(), file.path.display());
    }
    println!(
        "{} {} file(s) in {}",
        "Generated".green().bold(),
        resolved.len(),
        args.out_dir.display()
    );

    if let Some(xpi_path) = &args.xpi {
        write_xpi(&resolved, xpi_path)?;
        println!(
            "{} {}",
            "Packaged".green().bold(),
            xpi_path.display()
        );
    }

    Ok(())
}

/// Merge --vars file entries with --set flags (flags win). A slug is
/// derived from --name when none is given explicitly.
fn build_vars(args: &GenerateArgs) -> Result<Vars> {
    let mut vars = match &args.vars {
        Some(path) => Vars::load(path)
            .with_context(|| format!("failed to load vars file {}", path.display()))?,
        None => Vars::new(),
    };

    for pair in &args.set {
        vars.insert_pair(pair)?;
    }

    if let Some(name) = &args.name {
        if !vars.contains("name") {
            vars.insert("name", name.clone())?;
        }
        if !vars.contains("slug") {
            vars.insert("slug", slugify(name))?;
        }
    }

    Ok(vars)
}

fn run_tokens(args: TokensArgs) -> Result<()> {
    let found = generator::scan_tree(&args.template_dir)?;

    if found.is_empty() {
        println!("No tokens found in {}", args.template_dir.display());
        return Ok(());
    }

    for (key, files) in &found {
        println!("{}", key.cyan().bold());
        for file in files {
            println!("  {} {}", "->".blue(), file.display());
        }
    }
    println!(
        "{} {} distinct key(s)",
        "Found".green().bold(),
        found.len()
    );

    Ok(())
}
