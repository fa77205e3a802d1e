use anyhow::anyhow;
use clap::Parser;
use shaderbake::pack::{BakeOptions, BakeReport, ShaderBaker};
use shaderbake::reflect::front::{ExternalToolchain, ToolchainOptions, DEFAULT_TOOL_TIMEOUT};
use shaderbake::reflect::ReflectTables;
use std::path::PathBuf;
use std::time::Duration;

/// Compile every variant of a shader and normalize its reflection.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// The path to the GLSL shader source.
    ///
    /// Variants are read from the `.macro.json` file next to the source.
    shader: PathBuf,

    /// The number of variants to build at the same time.
    #[arg(short, long, default_value_t = 1)]
    jobs: usize,

    /// How long, in seconds, the compiler or reflector may run before it is killed.
    #[arg(short, long, default_value_t = DEFAULT_TOOL_TIMEOUT.as_secs())]
    timeout_secs: u64,

    /// The shader compiler executable.
    #[arg(long, default_value = "glslangValidator")]
    compiler: PathBuf,

    /// The reflection tool executable.
    #[arg(long, default_value = "spirv-cross")]
    reflector: PathBuf,

    /// A macro configuration to use instead of the one next to the source.
    #[arg(short, long)]
    macro_spec: Option<PathBuf>,

    /// A JSON file with additional stage, vector size or byte size table entries.
    #[arg(long)]
    tables: Option<PathBuf>,

    /// Keep the raw reflection report of each variant.
    #[arg(long)]
    keep_raw: bool,
}

pub fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    if args.jobs == 0 {
        return Err(anyhow!("--jobs must be at least 1"));
    }

    let toolchain = ExternalToolchain::new(ToolchainOptions {
        compiler: args.compiler,
        reflector: args.reflector,
        timeout: Duration::from_secs(args.timeout_secs),
    });

    let tables = match args.tables {
        Some(path) => ReflectTables::load_overrides(path)?,
        None => ReflectTables::default(),
    };

    let options = BakeOptions {
        jobs: args.jobs,
        macro_config: args.macro_spec,
        keep_raw_reflection: args.keep_raw,
    };

    let report = ShaderBaker::new(toolchain, tables, options).bake(&args.shader)?;
    print_summary(&report);

    if !report.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

fn print_summary(report: &BakeReport) {
    for variant in report.failures() {
        let defines = variant.defines.join(" ");
        for timeout in &variant.timeouts {
            eprintln!("{} [{defines}]: {timeout}", variant.key);
        }
        if let Err(e) = &variant.result {
            eprintln!("{} [{defines}]: {e}", variant.key);
        }
    }

    println!(
        "{}: {} of {} variants built",
        report.source.display(),
        report.variants.len() - report.failure_count(),
        report.variants.len()
    );
}
