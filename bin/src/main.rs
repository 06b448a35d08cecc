#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate pest_derive;

mod options;
mod parser;
mod report;

use options::OPTIONS;
use std::fs;
use std::io::{self, Read};
use volume::RadianceCompositor;

fn main() {
    // Initialize `env_logger`.
    env_logger::init();

    let compositor = RadianceCompositor::new(OPTIONS.epsilon);

    // No paths means the samples come from stdin.
    if OPTIONS.paths.is_empty() {
        if let Err(e) = read_stdin().and_then(|input| composite(&input, &compositor)) {
            error!("{e}");
        }
    }

    for path in OPTIONS.paths.iter() {
        // In case of error report it and continue.
        info!("Compositing '{path}'");
        if let Err(e) = read_file(path).and_then(|input| composite(&input, &compositor)) {
            error!("'{path}': {e}");
        }
    }
}

fn read_file(path: &str) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("Unable to read file. {e}"))
}

fn read_stdin() -> Result<String, String> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .map_err(|e| format!("Unable to read stdin. {e}"))?;
    Ok(input)
}

fn composite(input: &str, compositor: &RadianceCompositor) -> Result<(), String> {
    let rays = parser::parse(input)?;
    let (samples, distances) = parser::to_tensors(&rays)?;
    let radiance = compositor
        .compute(&samples, &distances)
        .map_err(|e| e.to_string())?;

    for line in report::format_rays(&radiance, OPTIONS.precision, OPTIONS.weights) {
        println!("{line}");
    }
    Ok(())
}
