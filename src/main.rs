use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use lsh_dedup::config::{BandingPolicy, ConfigError, LshConfig, ShingleStrategy};
use lsh_dedup::engine::{self, PipelineError};
use lsh_dedup::ops::{self, telemetry};
use lsh_dedup::persistence;

#[derive(Parser)]
#[command(version, about = "MinHash LSH near-duplicate detection and nearest-neighbour search")]
struct Opts {
    /// Increase verbosity (-v, -vv). Default INFO.
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Decrease verbosity (-q).
    #[arg(short = 'q', action = clap::ArgAction::Count, global = true)]
    quiet: u8,
    /// Emit JSON logs instead of the pretty development format
    #[arg(long, global = true)]
    json: bool,
    /// Print Prometheus metrics to stderr when the run finishes
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Group a collection into near-duplicate clusters
    Dedupe {
        input: PathBuf,
        output: PathBuf,
        /// Dynamic character shingles with two-probe buckets
        #[arg(long)]
        improved: bool,
        #[command(flatten)]
        lsh: LshOverrides,
    },
    /// Find the stored document closest to a query text
    Query {
        input: PathBuf,
        output: PathBuf,
        #[arg(long)]
        query: String,
        #[command(flatten)]
        lsh: LshOverrides,
    },
    /// Score banding layouts against exact-Jaccard ground truth, JSON on stdout
    Evaluate {
        input: PathBuf,
        /// Band counts to try
        #[arg(long = "bands-list", value_delimiter = ',', default_value = "5,10,15,20,25,30")]
        bands_list: Vec<usize>,
        /// Rows per band to try
        #[arg(long = "rows-list", value_delimiter = ',', default_value = "2,3,4,5")]
        rows_list: Vec<usize>,
        #[command(flatten)]
        lsh: LshOverrides,
    },
}

/// Parameter overrides applied on top of a preset or JSON config file
#[derive(Args, Debug, Default)]
struct LshOverrides {
    /// JSON config file replacing the preset
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    permutations: Option<usize>,
    #[arg(long)]
    bands: Option<usize>,
    #[arg(long)]
    rows: Option<usize>,
    /// Word shingle size
    #[arg(long)]
    shingle_size: Option<usize>,
    /// Character shingles sized by document length
    #[arg(long)]
    dynamic_shingles: bool,
    /// Probe this many neighbouring buckets per band
    #[arg(long)]
    probes: Option<u64>,
    #[arg(long)]
    seed: Option<u64>,
    /// Jaccard threshold for ground truth
    #[arg(long)]
    threshold: Option<f64>,
}

impl LshOverrides {
    fn resolve(&self, preset: LshConfig) -> Result<LshConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => LshConfig::load_json_file(path)?,
            None => preset,
        };

        if let Some(n) = self.permutations {
            config.num_permutations = n;
        }
        if let Some(n) = self.bands {
            config.num_bands = n;
        }
        if let Some(n) = self.rows {
            config.rows_per_band = n;
        }
        if let Some(k) = self.shingle_size {
            config.shingles = ShingleStrategy::Words { k };
        }
        if self.dynamic_shingles {
            config.shingles = ShingleStrategy::DynamicChars;
        }
        if let Some(num_probes) = self.probes {
            config.banding = BandingPolicy::MultiProbe { num_probes };
        }
        if let Some(seed) = self.seed {
            config.hash_seed = seed;
        }
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }

        config.validate()?;
        Ok(config)
    }
}

fn init_logging(opts: &Opts) {
    let level = match (1 + opts.verbose as i16 - opts.quiet as i16).max(0) {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    if opts.json {
        telemetry::init_tracing_with_level(level);
    } else {
        telemetry::init_tracing_pretty(level);
    }
}

fn run(command: Command) -> Result<(), PipelineError> {
    match command {
        Command::Dedupe {
            input,
            output,
            improved,
            lsh,
        } => {
            let preset = if improved {
                LshConfig::improved()
            } else {
                LshConfig::deduplication()
            };
            let config = lsh.resolve(preset)?;
            let (documents, stats) = persistence::read_corpus(&input)?;
            ops::record_documents("malformed", stats.malformed);

            let run = engine::deduplicate(documents, &config)?;
            persistence::save_dedup_report(&output, &run.result)?;
        }
        Command::Query {
            input,
            output,
            query,
            lsh,
        } => {
            let config = lsh.resolve(LshConfig::nearest_neighbor())?;
            let (documents, stats) = persistence::read_corpus(&input)?;
            ops::record_documents("malformed", stats.malformed);

            let run = engine::nearest_neighbor(documents, &query, &config)?;
            persistence::save_query_outcome(&output, &run.result)?;
        }
        Command::Evaluate {
            input,
            bands_list,
            rows_list,
            lsh,
        } => {
            let config = lsh.resolve(LshConfig::deduplication())?;
            let (documents, stats) = persistence::read_corpus(&input)?;
            ops::record_documents("malformed", stats.malformed);

            let layouts: Vec<(usize, usize)> = bands_list
                .iter()
                .flat_map(|&bands| rows_list.iter().map(move |&rows| (bands, rows)))
                .collect();
            let run = engine::evaluate_layouts(documents, &config, &layouts)?;
            serde_json::to_writer_pretty(std::io::stdout().lock(), &run.result)?;
            println!();
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let opts = Opts::parse();
    init_logging(&opts);

    let print_metrics = opts.metrics;
    let outcome = run(opts.command);

    if print_metrics {
        eprint!("{}", telemetry::get_metrics_string());
    }

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Run failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_overrides_repair_file_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"num_permutations": 40, "num_bands": 20, "rows_per_band": 5}}"#).unwrap();

        let overrides = LshOverrides {
            config: Some(file.path().to_path_buf()),
            bands: Some(8),
            ..LshOverrides::default()
        };
        let config = overrides.resolve(LshConfig::deduplication()).unwrap();
        assert_eq!(config.num_permutations, 40);
        assert_eq!(config.banded_width(), 40);
    }

    #[test]
    fn test_invalid_result_still_rejected() {
        let overrides = LshOverrides {
            rows: Some(9),
            ..LshOverrides::default()
        };
        let err = overrides.resolve(LshConfig::deduplication()).unwrap_err();
        assert!(matches!(err, ConfigError::BandingExceedsSignature { .. }));
    }
}
