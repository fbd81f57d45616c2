use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use apiport_core::config::{self, ApiportConfig, CONFIG_FILE_NAME, OutputFormat};
use apiport_core::import::{self, Import};
use apiport_core::model::SourceFormat;

#[derive(Parser)]
#[command(name = "apiport", about = "API spec import and normalization", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a spec and print the canonical model
    Import {
        /// Path to the input file (OpenAPI/Swagger/Postman JSON or a cURL command)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Declared format, validated against detection
        #[arg(long)]
        expect: Option<FormatArg>,

        /// Output serialization
        #[arg(long)]
        format: Option<OutputArg>,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Detect the format of an input file
    Detect {
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Import a spec and print a human-readable summary
    Inspect {
        #[arg(short, long)]
        input: PathBuf,

        /// Declared format, validated against detection
        #[arg(long)]
        expect: Option<FormatArg>,
    },

    /// Initialize a new apiport configuration
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

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Openapi,
    Swagger,
    Postman,
    Curl,
}

impl From<FormatArg> for SourceFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Openapi => SourceFormat::OpenApi,
            FormatArg::Swagger => SourceFormat::Swagger,
            FormatArg::Postman => SourceFormat::Postman,
            FormatArg::Curl => SourceFormat::Curl,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputArg {
    Json,
    Yaml,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Import {
            input,
            expect,
            format,
            output,
        } => cmd_import(input, expect, format, output),

        Commands::Detect { input } => cmd_detect(input),

        Commands::Inspect { input, expect } => cmd_inspect(input, expect),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "apiport", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<ApiportConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

fn read_input(path: &PathBuf) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn run_import(path: &PathBuf, expect: Option<SourceFormat>) -> Result<Import> {
    let raw = read_input(path)?;
    let import = import::parse_import(&raw, expect)?;
    for diagnostic in &import.diagnostics {
        eprintln!("  warning: {diagnostic}");
    }
    Ok(import)
}

fn cmd_import(
    input: Option<PathBuf>,
    expect: Option<FormatArg>,
    format: Option<OutputArg>,
    output: Option<PathBuf>,
) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let input = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let expect = expect.map(SourceFormat::from).or(cfg.expect);

    let import = run_import(&input, expect)?;

    let rendered = match format {
        Some(OutputArg::Yaml) => serde_yaml_ng::to_string(&import.spec)?,
        Some(OutputArg::Json) => serde_json::to_string_pretty(&import.spec)? + "\n",
        None => match cfg.output.format {
            OutputFormat::Yaml => serde_yaml_ng::to_string(&import.spec)?,
            OutputFormat::Json => serde_json::to_string_pretty(&import.spec)? + "\n",
        },
    };

    let output = output.or_else(|| cfg.output.path.as_deref().map(PathBuf::from));
    match output {
        Some(path) => {
            fs::write(&path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!(
                "Imported {} endpoint(s) from {} → {}",
                import.spec.endpoints.len(),
                import.format,
                path.display()
            );
        }
        None => print!("{rendered}"),
    }

    Ok(())
}

fn cmd_detect(input: PathBuf) -> Result<()> {
    let raw = read_input(&input)?;
    match import::detect(&raw) {
        Some(format) => {
            println!("{format}");
            Ok(())
        }
        None => anyhow::bail!("could not detect format of {}", input.display()),
    }
}

fn cmd_inspect(input: PathBuf, expect: Option<FormatArg>) -> Result<()> {
    let import = run_import(&input, expect.map(SourceFormat::from))?;
    let spec = &import.spec;

    eprintln!("{} {} ({})", spec.name, spec.version, import.format);
    if let Some(base_url) = &spec.base_url {
        eprintln!("  Base URL: {base_url}");
    }
    if !spec.variables.is_empty() {
        eprintln!("  Variables: {}", spec.variables.len());
    }
    eprintln!("  Endpoints: {}", spec.endpoints.len());
    for endpoint in &spec.endpoints {
        let auth = endpoint
            .auth
            .as_ref()
            .map(|a| format!(" [{:?}]", a.auth_type))
            .unwrap_or_default();
        eprintln!("    {:7} {}{}", endpoint.method.as_str(), endpoint.path, auth);
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
