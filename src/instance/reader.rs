//! Reader for the line-oriented problem file format.
//!
//! ```text
//! NAME: square
//! COMMENT: unit square
//! TYPE: TSP
//! DIMENSION: 4
//! EDGE_WEIGHT_TYPE: EUC_2D
//! NODE_COORD_SECTION
//! 1 0.0 0.0
//! 2 1.0 0.0
//! 3 1.0 1.0
//! 4 0.0 1.0
//! EOF
//! ```
//!
//! The header runs until the first line without a colon; that line only
//! marks the section change. Every later line with at least three
//! whitespace-separated fields is a point: identifier, x, y.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::point::Point;
use super::types::ProblemInstance;
use crate::error::{Result, TspError};

#[derive(Debug, Default)]
struct Header {
    name: String,
    comments: Vec<String>,
    problem_type: String,
    dimension: usize,
    edge_weight_type: String,
}

/// Opens `path` and parses it with [`parse_problem`].
pub fn read_problem_file(path: impl AsRef<Path>) -> Result<ProblemInstance> {
    let path = path.as_ref();
    log::debug!("reading problem file {}", path.display());
    let file = File::open(path)?;
    parse_problem(BufReader::new(file))
}

/// Parses a problem instance from any buffered reader.
///
/// # Errors
///
/// - [`TspError::Io`] if reading fails.
/// - [`TspError::Parse`] for a non-integer `DIMENSION` or a non-numeric
///   coordinate, with the 1-based line number.
/// - [`TspError::Validation`] if the number of points differs from
///   `DIMENSION`.
pub fn parse_problem<B: BufRead>(reader: B) -> Result<ProblemInstance> {
    let mut header = Header::default();
    let mut points = Vec::new();
    let mut in_body = false;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = index + 1;

        if in_body {
            if let Some(point) = parse_point(&line, line_no)? {
                points.push(point);
            }
            continue;
        }

        match line.split_once(':') {
            Some((key, value)) => {
                parse_header_entry(&mut header, key.trim(), value.trim(), line_no)?
            }
            None => in_body = true,
        }
    }

    log::debug!(
        "parsed {} points for instance '{}' (dimension {})",
        points.len(),
        header.name,
        header.dimension
    );

    let mut instance = ProblemInstance::new(header.dimension, points)?
        .with_name(header.name)
        .with_problem_type(header.problem_type)
        .with_edge_weight_type(header.edge_weight_type);
    for comment in header.comments {
        instance = instance.with_comment(comment);
    }
    Ok(instance)
}

fn parse_header_entry(header: &mut Header, key: &str, value: &str, line_no: usize) -> Result<()> {
    match key {
        "NAME" => header.name = value.to_string(),
        "COMMENT" => header.comments.push(value.to_string()),
        "TYPE" => header.problem_type = value.to_string(),
        "DIMENSION" => {
            header.dimension = value.parse().map_err(|e| {
                TspError::parse(line_no, format!("invalid DIMENSION '{value}': {e}"))
            })?;
        }
        "EDGE_WEIGHT_TYPE" => header.edge_weight_type = value.to_string(),
        _ => {
            log::warn!("ignoring unrecognized header key '{key}' at line {line_no}");
            return Ok(());
        }
    }
    log::debug!("{key}: {value}");
    Ok(())
}

fn parse_point(line: &str, line_no: usize) -> Result<Option<Point>> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 3 {
        return Ok(None);
    }

    let coordinate = |field: &str, axis: char| -> Result<f64> {
        field.parse().map_err(|e| {
            TspError::parse(line_no, format!("invalid {axis} coordinate '{field}': {e}"))
        })
    };

    Ok(Some(Point::new(
        fields[0],
        coordinate(fields[1], 'x')?,
        coordinate(fields[2], 'y')?,
    )))
}
