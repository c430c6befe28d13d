//! vibelut - grade images and bake portable looks from the command line.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use vibelut_core::transform::blueprint::DEFAULT_NODE;
use vibelut_core::{
    CdlSop, ColorParams, InputColorSpace, Lut3D, NodeBlueprint, PipelineConfig, Rgb,
    estimate_balance,
};
use vibelut_engine::{Coordinator, CoordinatorEvent};

mod config;
mod image_loader;

use config::CliConfig;

#[derive(Parser)]
#[command(name = "vibelut")]
#[command(author, version, about = "Color grading pipeline: grade, bake .cube LUTs, export blueprints")]
#[command(long_about = "
Grades 8-bit images with a lift/gamma/gain + look pipeline and bakes the
same grade into a 33^3 .cube LUT.

Examples:
  vibelut grade shot.png -o graded.png --params look.json
  vibelut grade shot.png -o graded.png --input-space \"Sony S-Log3\" --auto-balance
  vibelut bake -o look.cube --params look.json --blueprint look.json.out
  vibelut balance shot.png
  vibelut cdl --params look.json
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade an image and write the result
    Grade(GradeArgs),
    /// Bake the grade into a .cube LUT
    Bake(BakeArgs),
    /// Print the grey-world white balance of an image
    Balance(BalanceArgs),
    /// Print the grade as a CDL node map
    Cdl(CdlArgs),
}

#[derive(Args)]
struct PipelineArgs {
    /// Input encoding label, e.g. "Rec.709", "Arri LogC3", "Sony S-Log3"
    #[arg(long = "input-space")]
    input_space: Option<String>,

    /// Compress highlights above the knee (default)
    #[arg(long = "safe-range", overrides_with = "no_safe_range")]
    safe_range: bool,

    /// Hard-clip highlights instead of compressing them
    #[arg(long = "no-safe-range")]
    no_safe_range: bool,
}

#[derive(Args)]
struct ParamArgs {
    /// Grade parameters (JSON, either a full record or a service suggestion)
    #[arg(short, long)]
    params: Option<PathBuf>,

    /// Clamp parameters into the documented suggestion ranges
    #[arg(long)]
    clamp: bool,

    /// Override skin protection strength (0..1)
    #[arg(long = "skin-protect")]
    skin_protect: Option<f32>,
}

#[derive(Args)]
struct GradeArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    #[command(flatten)]
    pipeline: PipelineArgs,

    #[command(flatten)]
    grade: ParamArgs,

    /// Estimate white balance from the input before grading
    #[arg(long = "auto-balance")]
    auto_balance: bool,
}

#[derive(Args)]
struct BakeArgs {
    /// Output .cube file
    #[arg(short, long)]
    output: PathBuf,

    /// Also write a JSON blueprint of the grade
    #[arg(long)]
    blueprint: Option<PathBuf>,

    /// LUT title (defaults to VIBELUT_LUT_TITLE)
    #[arg(long)]
    title: Option<String>,

    /// Reference image for --auto-balance
    #[arg(long)]
    input: Option<PathBuf>,

    /// Estimate white balance from --input before baking
    #[arg(long = "auto-balance", requires = "input")]
    auto_balance: bool,

    #[command(flatten)]
    pipeline: PipelineArgs,

    #[command(flatten)]
    grade: ParamArgs,
}

#[derive(Args)]
struct BalanceArgs {
    /// Input image
    input: PathBuf,

    #[command(flatten)]
    pipeline: PipelineArgs,
}

#[derive(Args)]
struct CdlArgs {
    /// Read the grade from a blueprint instead of --params
    #[arg(long, conflicts_with = "params")]
    blueprint: Option<PathBuf>,

    /// Host node index
    #[arg(long, default_value_t = DEFAULT_NODE)]
    node: u32,

    #[command(flatten)]
    grade: ParamArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = CliConfig::default();

    match cli.command {
        Commands::Grade(args) => cmd_grade(args, &config).await,
        Commands::Bake(args) => cmd_bake(args, &config),
        Commands::Balance(args) => cmd_balance(args, &config),
        Commands::Cdl(args) => cmd_cdl(args),
    }
}

async fn cmd_grade(args: GradeArgs, config: &CliConfig) -> Result<()> {
    let pipeline = pipeline_config(&args.pipeline, config)?;
    let source = image_loader::load_image(&args.input)
        .with_context(|| format!("failed to load {}", args.input.display()))?;

    let mut coordinator = Coordinator::spawn()?;
    coordinator.load_source(source);

    let balance = if args.auto_balance {
        coordinator.request_analyze(&pipeline)?;
        match coordinator.next_event().await {
            Some(CoordinatorEvent::Analyzed { balance, .. }) => Some(balance),
            _ => bail!("worker exited before returning a balance"),
        }
    } else {
        None
    };

    let params = resolve_params(&args.grade, balance)?;
    coordinator.request_process(&params, &pipeline)?;
    let output = match coordinator.next_event().await {
        Some(CoordinatorEvent::Processed { output, .. }) => output,
        _ => bail!("worker exited before returning an image"),
    };
    coordinator.shutdown();

    image_loader::save_image(&args.output, &output.image)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    tracing::info!(
        "histogram peak {}, vectorscope samples {}",
        output.scopes.peak(),
        output.scopes.vectorscope_total()
    );
    Ok(())
}

fn cmd_bake(args: BakeArgs, config: &CliConfig) -> Result<()> {
    let pipeline = pipeline_config(&args.pipeline, config)?;

    let balance = match (&args.input, args.auto_balance) {
        (Some(input), true) => {
            let source = image_loader::load_image(input)
                .with_context(|| format!("failed to load {}", input.display()))?;
            Some(estimate_balance(&source, &pipeline))
        }
        _ => None,
    };

    let params = resolve_params(&args.grade, balance)?;
    let title = args.title.unwrap_or_else(|| config.lut_title.clone());
    Lut3D::bake(&params, &pipeline)
        .with_title(title)
        .save_cube(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    if let Some(path) = &args.blueprint {
        NodeBlueprint::new(&params, &pipeline)
            .save(path)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(())
}

fn cmd_balance(args: BalanceArgs, config: &CliConfig) -> Result<()> {
    let pipeline = pipeline_config(&args.pipeline, config)?;
    let source = image_loader::load_image(&args.input)
        .with_context(|| format!("failed to load {}", args.input.display()))?;
    let balance = estimate_balance(&source, &pipeline);
    println!("{}", serde_json::to_string_pretty(&balance)?);
    Ok(())
}

fn cmd_cdl(args: CdlArgs) -> Result<()> {
    let cdl = match &args.blueprint {
        Some(path) => {
            let json = read_text(path)?;
            CdlSop::from_blueprint(&NodeBlueprint::from_json(&json)?)
        }
        None => CdlSop::from_params(&resolve_params(&args.grade, None)?),
    };
    println!("{}", serde_json::to_string_pretty(&cdl.to_node_map(args.node))?);
    Ok(())
}

/// Environment default, then flags.
fn pipeline_config(args: &PipelineArgs, config: &CliConfig) -> Result<PipelineConfig> {
    let input_color_space = match &args.input_space {
        Some(label) => InputColorSpace::from_label(label).with_context(|| {
            let known: Vec<_> = InputColorSpace::all().iter().map(|s| s.label()).collect();
            format!("unknown input space '{label}' (expected one of: {})", known.join(", "))
        })?,
        None => config.input_space,
    };
    Ok(PipelineConfig {
        input_color_space,
        safe_range: args.safe_range || !args.no_safe_range,
    })
}

/// Load the parameter file and apply manual overrides.
///
/// An estimated balance and `--skin-protect` win over whatever the file
/// carries.
fn resolve_params(args: &ParamArgs, estimated_balance: Option<Rgb>) -> Result<ColorParams> {
    let mut suggestion = match &args.params {
        Some(path) => ColorParams::from_suggestion_json(&read_text(path)?)
            .with_context(|| format!("invalid parameters in {}", path.display()))?,
        None => ColorParams::default(),
    };
    if args.clamp {
        suggestion = suggestion.clamp_to_suggestion_ranges();
    }
    if let Some(thought) = &suggestion.ai_thought {
        tracing::info!("suggestion: {thought}");
    }

    let manual = ColorParams {
        balance: estimated_balance.unwrap_or(suggestion.balance),
        skin_protect: args
            .skin_protect
            .map(|v| v.clamp(0.0, 1.0))
            .unwrap_or(suggestion.skin_protect),
        ..ColorParams::default()
    };
    Ok(manual.merge_suggestion(suggestion))
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
