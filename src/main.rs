use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{LevelFilter, error, info};

use mini_rosetta::report::{self, Summary};
use mini_rosetta::{
    PtfModelVariant, SampleLibrary, SampleOverrides, SoilSample, estimate, generate_curve,
};

/// Estimate soil hydraulic properties from texture and export the retention curve
#[derive(Parser, Debug)]
#[command(name = "mini_rosetta", version, about, long_about = None)]
struct Cli {
    /// Named sample from the sample library
    #[arg(long)]
    sample: Option<String>,

    /// TOML sample library
    #[arg(long, default_value = "soil_samples.toml")]
    library: PathBuf,

    /// Sand [%]
    #[arg(long)]
    sand: Option<f64>,

    /// Silt [%]
    #[arg(long)]
    silt: Option<f64>,

    /// Clay [%]
    #[arg(long)]
    clay: Option<f64>,

    /// Bulk density [g/cm³]
    #[arg(long)]
    bd: Option<f64>,

    /// Organic matter [%]
    #[arg(long)]
    om: Option<f64>,

    /// Field capacity / wilting point model (saxton1986, saxton_rawls2006);
    /// defaults to the sample's `model` key, then saxton1986
    #[arg(short, long)]
    model: Option<PtfModelVariant>,

    /// CSV output path for the retention curve
    #[arg(short, long, default_value = report::DEFAULT_CSV_NAME)]
    output: PathBuf,

    /// Log level (trace, debug, info, warn, error); falls back to RUST_LOG
    #[arg(long)]
    log_level: Option<String>,
}

fn init_logging(level: Option<&str>) {
    let log_level = level
        .and_then(|l| l.parse::<LevelFilter>().ok())
        .or_else(|| std::env::var("RUST_LOG").ok().and_then(|v| v.parse().ok()))
        .unwrap_or(LevelFilter::Info);
    env_logger::Builder::new().filter_level(log_level).init();
}

impl Cli {
    fn overrides(&self) -> SampleOverrides {
        SampleOverrides {
            sand: self.sand,
            silt: self.silt,
            clay: self.clay,
            bd: self.bd,
            om: self.om,
        }
    }
}

fn resolve_request(cli: &Cli) -> mini_rosetta::Result<(SoilSample, PtfModelVariant)> {
    let (base, stored_model) = match &cli.sample {
        Some(name) => {
            let library = SampleLibrary::from_file(&cli.library)?;
            info!("loaded {} samples from {}", library.len(), cli.library.display());
            (library.get(name)?, library.model(name)?)
        }
        None => (SoilSample::default(), None),
    };
    let model = cli.model.or(stored_model).unwrap_or_default();
    Ok((cli.overrides().apply(base), model))
}

fn try_run(cli: &Cli) -> mini_rosetta::Result<()> {
    let (sample, model) = resolve_request(cli)?;
    sample.check_ranges()?;

    let params = estimate(&sample, model);
    println!("{}", Summary(&params));

    let curve = generate_curve(&params);
    report::write_curve_csv_file(&curve, &cli.output)?;
    info!("wrote {} curve points to {}", curve.len(), cli.output.display());
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    match try_run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
