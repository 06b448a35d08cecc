//! Ray Sample File Parser

use numeric::common::Float;
use numeric::tensor::{tensor, Tensor};
use pest::iterators::*;
use pest::Parser;
use std::result::Result;
use volume::SAMPLE_CHANNELS;

/// The `pest` parser generated from a grammar.
#[derive(Parser)]
#[grammar = "parser/grammar.pest"]
struct RayFileParser;

/// A sample along a ray.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sample {
    /// Color of the sample.
    pub rgb: [Float; 3],

    /// Volume density `σ`.
    pub sigma: Float,

    /// Distance to the next sample.
    pub distance: Float,
}

/// Samples along a single ray in ray order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ray {
    pub samples: Vec<Sample>,
}

/// Parses the contents of a ray sample file.
///
/// * `input` - Contents of the file.
pub fn parse(input: &str) -> Result<Vec<Ray>, String> {
    let file = RayFileParser::parse(Rule::file, input)
        .map_err(|err| format!("Error parsing ray file. {err}"))?
        .next()
        .ok_or_else(|| String::from("Error parsing ray file. Empty input."))?;

    let mut rays = vec![];
    for pair in file.into_inner() {
        match pair.as_rule() {
            Rule::ray => rays.push(parse_ray(pair)?),
            Rule::EOI => (), // Done
            _ => unreachable!(),
        }
    }
    debug!("Parsed {} rays", rays.len());
    Ok(rays)
}

/// Parse a `ray` rule of the grammar.
///
/// * `pair` - The matched `ray` rule.
fn parse_ray(pair: Pair<Rule>) -> Result<Ray, String> {
    let samples = pair
        .into_inner()
        .filter(|p| p.as_rule() == Rule::sample)
        .map(parse_sample)
        .collect::<Result<Vec<_>, String>>()?;
    Ok(Ray { samples })
}

/// Parse a `sample` rule of the grammar.
///
/// * `pair` - The matched `sample` rule.
fn parse_sample(pair: Pair<Rule>) -> Result<Sample, String> {
    let (line, _) = pair.as_span().start_pos().line_col();
    let values = pair
        .into_inner()
        .filter(|p| p.as_rule() == Rule::number)
        .map(|p| {
            p.as_str()
                .parse::<Float>()
                .map_err(|err| format!("Invalid number '{}' on line {line}. {err}", p.as_str()))
        })
        .collect::<Result<Vec<_>, String>>()?;

    // The grammar guarantees five numbers.
    Ok(Sample {
        rgb: [values[0], values[1], values[2]],
        sigma: values[3],
        distance: values[4],
    })
}

/// Stacks rays into a `[rays, N, 4]` sample tensor and a `[rays, N]`
/// distance tensor. All rays must have the same number of samples.
///
/// * `rays` - The rays.
pub fn to_tensors(rays: &[Ray]) -> Result<(Tensor<Float>, Tensor<Float>), String> {
    let n = rays
        .first()
        .map(|ray| ray.samples.len())
        .ok_or_else(|| String::from("No rays to composite."))?;

    if let Some((i, ray)) = rays.iter().enumerate().find(|(_, ray)| ray.samples.len() != n) {
        return Err(format!(
            "Ray {i} has {} samples but ray 0 has {n}. Rays must have equal sample counts.",
            ray.samples.len()
        ));
    }

    let samples = rays.iter().flat_map(|ray| ray.samples.iter());
    let rgba: Vec<Float> = samples
        .clone()
        .flat_map(|s| [s.rgb[0], s.rgb[1], s.rgb[2], s.sigma])
        .collect();
    let distances: Vec<Float> = samples.map(|s| s.distance).collect();

    let rgba = tensor(&[rays.len(), n, SAMPLE_CHANNELS], rgba).map_err(|e| e.to_string())?;
    let distances = tensor(&[rays.len(), n], distances).map_err(|e| e.to_string())?;
    Ok((rgba, distances))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_RAYS: &str = "
        # Two rays with two samples each.
        Ray
            Sample 1 0 0  1.0 1.0   # red
            Sample 0 1 0  1.0 1.0   # green
        Ray
            Sample 0.5 .25 1.  2e-1 0.5
            Sample 0 0 1 1E2 -0.5
    ";

    #[test]
    fn parse_two_rays() {
        let rays = parse(TWO_RAYS).unwrap();
        assert_eq!(rays.len(), 2);
        assert_eq!(
            rays[0].samples[0],
            Sample {
                rgb: [1.0, 0.0, 0.0],
                sigma: 1.0,
                distance: 1.0,
            }
        );
        assert_eq!(
            rays[1].samples[0],
            Sample {
                rgb: [0.5, 0.25, 1.0],
                sigma: 0.2,
                distance: 0.5,
            }
        );
        assert_eq!(rays[1].samples[1].sigma, 100.0);
        assert_eq!(rays[1].samples[1].distance, -0.5);
    }

    #[test]
    fn parse_empty_file() {
        assert_eq!(parse("  # nothing here\n"), Ok(vec![]));
    }

    #[test]
    fn parse_empty_ray() {
        let rays = parse("Ray Ray").unwrap();
        assert_eq!(rays, vec![Ray::default(), Ray::default()]);
    }

    #[test]
    fn parse_special_values() {
        let rays = parse("Ray Sample 0 0 0 inf nan").unwrap();
        let s = rays[0].samples[0];
        assert!(s.sigma.is_infinite());
        assert!(s.distance.is_nan());
    }

    #[test]
    fn parse_too_few_numbers() {
        assert!(parse("Ray Sample 1 0 0 1").is_err());
    }

    #[test]
    fn parse_unknown_statement() {
        assert!(parse("Ray Smaple 1 0 0 1 1").is_err());
    }

    #[test]
    fn parse_malformed_numbers() {
        assert!(parse("Ray Sample 1 0 0 1.0.5").is_err());
        assert!(parse("Ray Sample 1 0 0 2-1").is_err());
        assert!(parse("Ray Sample 1 0 0 1 1x").is_err());
        assert!(parse("Ray Sample 1 0 0 1 1e").is_err());
        assert!(parse("Ray Sample 1 0 0 1 infinity").is_err());
    }

    #[test]
    fn parse_keywords_need_separators() {
        assert!(parse("RaySample1 0 0 1 1").is_err());
        assert!(parse("Ray Sample1 0 0 1 1").is_err());
        assert!(parse("Rays Sample 1 0 0 1 1").is_err());
    }

    #[test]
    fn parse_tokens_before_comment() {
        let rays = parse("Ray# first\nSample 1 0 0 2 0.5# end").unwrap();
        assert_eq!(rays[0].samples[0].sigma, 2.0);
        assert_eq!(rays[0].samples[0].distance, 0.5);
    }

    #[test]
    fn stack_rays() {
        let rays = parse(TWO_RAYS).unwrap();
        let (samples, distances) = to_tensors(&rays).unwrap();
        assert_eq!(samples.shape(), &[2, 2, 4]);
        assert_eq!(distances.shape(), &[2, 2]);
        assert_eq!(samples.iter().take(8).copied().collect::<Vec<_>>(), &[1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0]);
        assert_eq!(distances.iter().copied().collect::<Vec<_>>(), &[1.0, 1.0, 0.5, -0.5]);
    }

    #[test]
    fn stack_ragged_rays() {
        let rays = parse("Ray Sample 1 1 1 1 1 Ray").unwrap();
        let err = to_tensors(&rays).unwrap_err();
        assert!(err.contains("Ray 1 has 0 samples"));
    }

    #[test]
    fn stack_no_rays() {
        assert!(to_tensors(&[]).is_err());
    }
}
