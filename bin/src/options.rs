//! Command line options

use clap::Parser;
use volume::TRANSMITTANCE_EPSILON;

lazy_static! {
    /// The global application options.
    pub static ref OPTIONS: Options = Options::parse();
}

/// System wide options.
#[derive(Parser, Clone, Debug)]
#[command(author, version, about = "Composites samples along rays into color and opacity.", long_about = None)]
pub struct Options {
    /// Stabilizing term added to each transmittance factor.
    #[arg(
        long = "epsilon",
        short = 'e',
        value_name = "FLOAT",
        default_value_t = TRANSMITTANCE_EPSILON,
        help = "Stabilizing term added to each transmittance factor."
    )]
    pub epsilon: f64,

    /// Number of decimal places printed.
    #[arg(
        long = "precision",
        short = 'p',
        value_name = "NUM",
        default_value_t = 6,
        help = "Number of decimal places printed."
    )]
    pub precision: usize,

    /// Print per-sample weights.
    #[arg(long = "weights", short = 'w', help = "Also print the per-sample weights.")]
    pub weights: bool,

    /// Input file paths. Empty vector implies read from stdin.
    #[arg(help = "Ray sample files")]
    pub paths: Vec<String>,
}
