//! Instance text format and random instance generation.
//!
//! # Format
//!
//! ```text
//! n
//! d(0,0) d(0,1) ... d(0,n-1)
//! ...
//! d(n-1,0) ... d(n-1,n-1)
//! ```
//!
//! The first line holds the node count; each following line holds one
//! matrix row as whitespace-separated floats. Blank lines are skipped.

use std::fs;
use std::path::Path;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Result, TspError};
use crate::matrix::DistanceMatrix;

/// Side length of the square the generator draws points from.
pub const COORDINATE_RANGE: f64 = 100.0;

/// Parses an instance from its text form.
///
/// # Examples
///
/// ```
/// use u_twoopt::instance::parse_instance;
///
/// let dm = parse_instance("2\n0 1.5\n1.5 0\n").unwrap();
/// assert_eq!(dm.size(), 2);
/// assert_eq!(dm.distance(0, 1), 1.5);
/// ```
pub fn parse_instance(text: &str) -> Result<DistanceMatrix> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (header_line, header) = lines.next().ok_or_else(|| TspError::Parse {
        line: 1,
        message: "missing node count".into(),
    })?;
    let n: usize = header.parse().map_err(|_| TspError::Parse {
        line: header_line,
        message: format!("invalid node count {header:?}"),
    })?;
    if n == 0 {
        return Err(TspError::InvalidDimension(
            "node count must be positive".into(),
        ));
    }

    let expected = n.checked_mul(n).ok_or_else(|| {
        TspError::InvalidDimension(format!("node count {n} is too large"))
    })?;
    // Every value takes at least one byte of input.
    let mut data = Vec::with_capacity(expected.min(text.len()));
    let mut last_line = header_line;
    for row in 0..n {
        let (line_no, line) = lines.next().ok_or_else(|| TspError::Parse {
            line: last_line + 1,
            message: format!("expected {n} rows, found {row}"),
        })?;
        last_line = line_no;

        let before = data.len();
        for token in line.split_whitespace() {
            let value: f64 = token.parse().map_err(|_| TspError::Parse {
                line: line_no,
                message: format!("invalid distance {token:?}"),
            })?;
            data.push(value);
        }
        let found = data.len() - before;
        if found != n {
            return Err(TspError::Parse {
                line: line_no,
                message: format!("expected {n} values, found {found}"),
            });
        }
    }

    if let Some((line_no, _)) = lines.next() {
        return Err(TspError::Parse {
            line: line_no,
            message: format!("unexpected content after {n} rows"),
        });
    }

    DistanceMatrix::new(n, data)
}

/// Reads and parses an instance file.
pub fn read_instance<P: AsRef<Path>>(path: P) -> Result<DistanceMatrix> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let matrix = parse_instance(&text)?;
    debug!("loaded {} nodes from {}", matrix.size(), path.display());
    Ok(matrix)
}

/// Renders a matrix in the instance text format.
pub fn format_instance(matrix: &DistanceMatrix) -> String {
    let n = matrix.size();
    let mut out = format!("{n}\n");
    for i in 0..n {
        let row: Vec<String> = (0..n).map(|j| matrix.distance(i, j).to_string()).collect();
        out.push_str(&row.join(" "));
        out.push('\n');
    }
    out
}

/// Writes a matrix to `path` in the instance text format.
pub fn write_instance<P: AsRef<Path>>(path: P, matrix: &DistanceMatrix) -> Result<()> {
    fs::write(path, format_instance(matrix))?;
    Ok(())
}

/// Draws `n` points uniformly from `[0, 100)²`.
pub fn generate_points(n: usize, seed: u64) -> Vec<(f64, f64)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            (
                rng.random_range(0.0..COORDINATE_RANGE),
                rng.random_range(0.0..COORDINATE_RANGE),
            )
        })
        .collect()
}

/// Builds a random Euclidean instance of `n` nodes.
pub fn generate_instance(n: usize, seed: u64) -> Result<DistanceMatrix> {
    DistanceMatrix::from_points(&generate_points(n, seed))
}
