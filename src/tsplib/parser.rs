//! TSPLIB directive/section parser and Euclidean cost-table construction.

use std::path::Path;

use crate::cost_table::CostTable;
use crate::error::{Error, Result};
use crate::models::Coordinate;

/// The parsed contents of a static instance file: metadata plus 0-based
/// node coordinates, ready for cost-table construction.
#[derive(Debug, Clone)]
pub struct ParsedInstance {
    pub name: Option<String>,
    pub dimension: usize,
    pub nodes: Vec<Coordinate>,
}

impl ParsedInstance {
    /// Computes the truncated-Euclidean cost table for this instance
    /// (spec §4.1): `floor(sqrt(dx^2 + dy^2 [+ dz^2]))`, zero diagonal.
    pub fn cost_table(&self) -> CostTable {
        euclidean_cost_table(&self.nodes)
    }
}

/// Parses TSPLIB directive/section text into node coordinates.
///
/// Recognizes `NAME:`, `TYPE:`, `DIMENSION:`, `EDGE_WEIGHT_TYPE:`, and the
/// `NODE_COORD_SECTION` / `EDGE_WEIGHT_SECTION` / `DISPLAY_DATA_SECTION` /
/// `EOF` sections. Only `EUC_2D` is supported; any other weight type fails
/// with `BadInput("problem type not supported")`.
pub fn parse(text: &str) -> Result<ParsedInstance> {
    let mut name = None;
    let mut dimension = None;
    let mut edge_weight_type = None;
    let mut nodes: Vec<(usize, Coordinate)> = Vec::new();
    let mut in_node_coord_section = false;

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(value) = line.strip_prefix("NAME:") {
            name = Some(value.trim().to_string());
            continue;
        }
        if let Some(value) = line.strip_prefix("NAME :") {
            name = Some(value.trim().to_string());
            continue;
        }
        if line.starts_with("TYPE:") || line.starts_with("TYPE :") {
            continue;
        }
        if let Some(value) = line.strip_prefix("DIMENSION:") {
            dimension = Some(parse_dimension(value)?);
            continue;
        }
        if let Some(value) = line.strip_prefix("DIMENSION :") {
            dimension = Some(parse_dimension(value)?);
            continue;
        }
        if let Some(value) = line
            .strip_prefix("EDGE_WEIGHT_TYPE:")
            .or_else(|| line.strip_prefix("EDGE_WEIGHT_TYPE :"))
        {
            edge_weight_type = Some(value.trim().to_string());
            continue;
        }

        match line {
            "NODE_COORD_SECTION" => {
                in_node_coord_section = true;
                continue;
            }
            "EDGE_WEIGHT_SECTION" | "DISPLAY_DATA_SECTION" => {
                in_node_coord_section = false;
                continue;
            }
            "EOF" => {
                in_node_coord_section = false;
                continue;
            }
            _ => {}
        }

        if in_node_coord_section {
            nodes.push(parse_node_line(line)?);
        }
    }

    match edge_weight_type.as_deref() {
        Some("EUC_2D") => {}
        _ => {
            return Err(Error::BadInput("problem type not supported".to_string()));
        }
    }

    let dimension = dimension
        .ok_or_else(|| Error::BadInput("missing DIMENSION directive".to_string()))?;

    nodes.sort_by_key(|(index, _)| *index);
    let coordinates: Vec<Coordinate> = nodes.into_iter().map(|(_, coord)| coord).collect();

    if coordinates.len() != dimension {
        return Err(Error::BadInput(format!(
            "expected {} node coordinates, found {}",
            dimension,
            coordinates.len()
        )));
    }

    Ok(ParsedInstance {
        name,
        dimension,
        nodes: coordinates,
    })
}

/// Reads and parses a static instance file from the filesystem. I/O
/// failures become `MissingResource` via [`crate::error::Error`]'s
/// `From<std::io::Error>`.
pub fn parse_file(path: &Path) -> Result<ParsedInstance> {
    let text = std::fs::read_to_string(path)?;
    parse(&text)
}

fn parse_dimension(value: &str) -> Result<usize> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::BadInput(format!("invalid DIMENSION value: {value}")))
}

/// Parses a `<1-based index> x y [z]` line, returning a 0-based index.
fn parse_node_line(line: &str) -> Result<(usize, Coordinate)> {
    let mut fields = line.split_whitespace();
    let invalid = || Error::BadInput(format!("malformed NODE_COORD_SECTION line: {line}"));

    let index: usize = fields.next().ok_or_else(invalid)?.parse().map_err(|_| invalid())?;
    let x: f64 = fields.next().ok_or_else(invalid)?.parse().map_err(|_| invalid())?;
    let y: f64 = fields.next().ok_or_else(invalid)?.parse().map_err(|_| invalid())?;
    let coord = match fields.next() {
        Some(z_str) => Coordinate::xyz(x, y, z_str.parse().map_err(|_| invalid())?),
        None => Coordinate::xy(x, y),
    };

    if index == 0 {
        return Err(invalid());
    }
    Ok((index - 1, coord))
}

/// Truncated Euclidean distance cost table: `floor(sqrt(dx^2+dy^2+dz^2))`,
/// enumerating all N² ordered pairs including the zero diagonal.
pub fn euclidean_cost_table(nodes: &[Coordinate]) -> CostTable {
    let n = nodes.len();
    let mut table = CostTable::new(n);
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            table.set(i, j, truncated_euclidean(nodes[i], nodes[j]));
        }
    }
    table
}

fn truncated_euclidean(a: Coordinate, b: Coordinate) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let dz = match (a.z, b.z) {
        (Some(az), Some(bz)) => az - bz,
        _ => 0.0,
    };
    (dx * dx + dy * dy + dz * dz).sqrt().floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOY: &str = "NAME: toy\nTYPE: TSP\nDIMENSION: 3\nEDGE_WEIGHT_TYPE: EUC_2D\nNODE_COORD_SECTION\n1 0 0\n2 3 0\n3 0 4\nEOF";

    #[test]
    fn parses_toy_instance() {
        let instance = parse(TOY).unwrap();
        assert_eq!(instance.name.as_deref(), Some("toy"));
        assert_eq!(instance.dimension, 3);
        assert_eq!(instance.nodes[0], Coordinate::xy(0.0, 0.0));
        assert_eq!(instance.nodes[1], Coordinate::xy(3.0, 0.0));
        assert_eq!(instance.nodes[2], Coordinate::xy(0.0, 4.0));
    }

    #[test]
    fn toy_instance_cost_table_matches_spec_scenario_4() {
        let instance = parse(TOY).unwrap();
        let table = instance.cost_table();
        assert_eq!(table.get(0, 0), 0.0);
        assert_eq!(table.get(1, 1), 0.0);
        assert_eq!(table.get(2, 2), 0.0);
        assert_eq!(table.get(0, 1), 3.0);
        assert_eq!(table.get(1, 0), 3.0);
        assert_eq!(table.get(0, 2), 4.0);
        assert_eq!(table.get(2, 0), 4.0);
        assert_eq!(table.get(1, 2), 5.0);
        assert_eq!(table.get(2, 1), 5.0);
    }

    #[test]
    fn unsupported_weight_type_is_bad_input() {
        let text = "NAME: x\nTYPE: TSP\nDIMENSION: 2\nEDGE_WEIGHT_TYPE: GEO\nNODE_COORD_SECTION\n1 0 0\n2 1 1\nEOF";
        let err = parse(text).unwrap_err();
        assert!(matches!(err, Error::BadInput(msg) if msg == "problem type not supported"));
    }

    #[test]
    fn truncates_distance_not_rounds() {
        // 3-4-5 triangle scaled so the true distance is just under an integer.
        let a = Coordinate::xy(0.0, 0.0);
        let b = Coordinate::xy(2.9, 0.0);
        assert_eq!(truncated_euclidean(a, b), 2.0);
    }

    #[test]
    fn supports_three_dimensional_nodes() {
        let a = Coordinate::xyz(0.0, 0.0, 0.0);
        let b = Coordinate::xyz(0.0, 0.0, 5.0);
        assert_eq!(truncated_euclidean(a, b), 5.0);
    }

    #[test]
    fn parse_file_reports_missing_resource_on_missing_file() {
        let err = parse_file(Path::new("/nonexistent/instance.tsp")).unwrap_err();
        assert!(matches!(err, Error::MissingResource(_)));
    }

    #[test]
    fn parse_file_round_trips_a_real_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("toy.tsp");
        std::fs::write(&path, TOY).unwrap();
        let instance = parse_file(&path).unwrap();
        assert_eq!(instance.dimension, 3);
    }
}
