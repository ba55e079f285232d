use std::io::Read;

use clap::{Parser, ValueEnum};
use geo_privacy::survey::Survey;
use geo_privacy::{FilterConfig, Point, PrivacyFilter, ReleaseStrategy};

/// Encoding of the released points or submissions written to stdout
#[derive(ValueEnum, Debug, Copy, Clone, Default)]
pub enum Format {
    #[default]
    Json,

    #[cfg(feature = "message-pack")]
    MessagePack,
}
impl Format {
    /// Serialize the anonymized output in this format
    pub fn write(
        &self,
        mut writer: impl std::io::Write,
        data: &impl serde::Serialize,
    ) -> Result<(), String> {
        match self {
            Format::Json => serde_json::to_writer(writer, data).map_err(|error| error.to_string()),
            #[cfg(feature = "message-pack")]
            Format::MessagePack => {
                rmp_serde::encode::write(&mut writer, data).map_err(|error| error.to_string())
            }
        }
    }
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// JSON file to anonymize, read from stdin if omitted
    file: Option<String>,

    /// Read a survey with its submissions instead of plain `[x, y]` pairs
    #[clap(long)]
    survey: bool,

    /// JSON config for the filter
    #[clap(long)]
    config: Option<String>,

    /// Number of bins per axis
    #[clap(short, long)]
    resolution: Option<usize>,

    /// How a cell's representative is chosen
    #[clap(value_enum, long)]
    release: Option<ReleaseStrategy>,

    /// Drop cells holding less points
    #[clap(long)]
    min_occupancy: Option<usize>,

    /// Seed for the uniform jitter
    #[clap(long)]
    seed: Option<u64>,

    /// Data format when writing to stdout
    #[clap(value_enum, short, long, default_value_t = Default::default())]
    format: Format,
}

fn main() -> Result<(), String> {
    env_logger::init();

    let Args {
        file,
        survey,
        config,
        resolution,
        release,
        min_occupancy,
        seed,
        format,
    } = Args::parse();

    let mut config: FilterConfig = if let Some(config) = config {
        let file = std::fs::File::open(config).map_err(|err| err.to_string())?;
        serde_json::from_reader(file).map_err(|err| err.to_string())?
    } else {
        FilterConfig::default()
    };
    if let Some(resolution) = resolution {
        config.resolution = resolution;
    }
    if let Some(release) = release {
        config.release = release;
    }
    if let Some(min_occupancy) = min_occupancy {
        config.min_occupancy = min_occupancy;
    }
    if seed.is_some() {
        config.seed = seed;
    }
    log::debug!("{config:?}");
    let filter = PrivacyFilter::new(config);

    let input = if let Some(file) = file {
        std::fs::read_to_string(file).map_err(|err| err.to_string())?
    } else {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .map_err(|err| err.to_string())?;
        input
    };

    if survey {
        let survey: Survey = serde_json::from_str(&input).map_err(|err| err.to_string())?;
        let submissions = survey.privatize(&filter).map_err(|err| err.to_string())?;
        format.write(std::io::stdout(), &submissions)?;
    } else {
        let points: Vec<Point> = serde_json::from_str(&input).map_err(|err| err.to_string())?;
        let (released, report) = filter
            .anonymize_with_report(&points)
            .map_err(|err| err.to_string())?;
        report.log();
        format.write(std::io::stdout(), &released)?;
    }

    Ok(())
}
