use std::fs;
use std::path::Path;

use serde_json::{Map, Number, Value};
use sgp4::Elements;

use super::error::ElementError;
use super::set::ElementSet;

/// Result of loading a snapshot: the usable element sets plus the count
/// of records that failed to parse and were skipped.
#[derive(Default)]
pub struct LoadOutcome {
    pub sets: Vec<ElementSet>,
    pub skipped: usize,
}

impl LoadOutcome {
    fn merge(&mut self, other: LoadOutcome) {
        self.sets.extend(other.sets);
        self.skipped += other.skipped;
    }
}

/// Load a snapshot file, or every recognized snapshot file in a
/// directory. Malformed records are skipped and counted, never fatal to
/// the batch.
pub fn load_path(path: &Path) -> Result<LoadOutcome, ElementError> {
    if !path.exists() {
        return Err(ElementError::PathNotFound(path.display().to_string()));
    }

    if !path.is_dir() {
        return load_file(path);
    }

    let mut outcome = LoadOutcome::default();
    for entry in fs::read_dir(path)? {
        let child = entry?.path();
        if !child.is_file() || !is_snapshot(&child) {
            continue;
        }
        match load_file(&child) {
            Ok(o) => outcome.merge(o),
            Err(e) => {
                log::warn!("failed to load {}: {}", child.display(), e);
            }
        }
    }
    Ok(outcome)
}

fn is_snapshot(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("csv" | "tle" | "txt")
    )
}

fn load_file(path: &Path) -> Result<LoadOutcome, ElementError> {
    let content = fs::read_to_string(path)?;
    let source = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => Ok(parse_gp_csv(&content, &source)),
        Some("tle") | Some("txt") => Ok(parse_tle_text(&content, &source)),
        other => Err(ElementError::UnsupportedFormat(
            other.unwrap_or("none").to_string(),
        )),
    }
}

/// Parse a GP tabular snapshot. The header row carries OMM field names,
/// so each row can be handed to the sgp4 OMM deserializer as a JSON
/// object.
pub fn parse_gp_csv(content: &str, source: &str) -> LoadOutcome {
    let mut lines = content.lines().filter(|l| !l.trim().is_empty());
    let headers: Vec<String> = match lines.next() {
        Some(h) => h.split(',').map(|s| s.trim().to_string()).collect(),
        None => return LoadOutcome::default(),
    };

    let mut outcome = LoadOutcome::default();
    for line in lines {
        match parse_gp_row(&headers, line, source) {
            Ok(set) => outcome.sets.push(set),
            Err(e) => {
                log::warn!("skipping record in {}: {}", source, e);
                outcome.skipped += 1;
            }
        }
    }
    outcome
}

fn parse_gp_row(headers: &[String], line: &str, source: &str) -> Result<ElementSet, ElementError> {
    let cells: Vec<&str> = line.split(',').map(|s| s.trim()).collect();
    if cells.len() != headers.len() {
        return Err(ElementError::InvalidRecord {
            file: source.to_string(),
            message: format!("expected {} fields, found {}", headers.len(), cells.len()),
        });
    }

    let mut row = Map::new();
    for (header, cell) in headers.iter().zip(&cells) {
        row.insert(header.clone(), cell_value(cell));
    }

    let elements: Elements =
        serde_json::from_value(Value::Object(row)).map_err(|e| ElementError::InvalidRecord {
            file: source.to_string(),
            message: e.to_string(),
        })?;

    ElementSet::from_elements(elements, source)
}

/// Numeric cells become JSON numbers so the OMM deserializer sees the
/// same shapes a JSON feed would give it; everything else stays text.
fn cell_value(cell: &str) -> Value {
    if let Ok(i) = cell.parse::<i64>() {
        return Value::Number(i.into());
    }
    if let Ok(f) = cell.parse::<f64>() {
        if let Some(n) = Number::from_f64(f) {
            return Value::Number(n);
        }
    }
    Value::String(cell.to_string())
}

/// Parse two/three-line element groups. Lines that belong to no group
/// are skipped; records that fail to parse are skipped and counted.
pub fn parse_tle_text(content: &str, source: &str) -> LoadOutcome {
    let lines: Vec<&str> = content
        .lines()
        .map(|l| l.trim_end())
        .filter(|l| !l.is_empty())
        .collect();

    let mut outcome = LoadOutcome::default();
    let mut i = 0;
    while i < lines.len() {
        let (name, line1, line2) = if lines[i].starts_with("1 ")
            && i + 1 < lines.len()
            && lines[i + 1].starts_with("2 ")
        {
            let group = (None, lines[i], lines[i + 1]);
            i += 2;
            group
        } else if i + 2 < lines.len()
            && lines[i + 1].starts_with("1 ")
            && lines[i + 2].starts_with("2 ")
        {
            let group = (Some(lines[i].trim().to_string()), lines[i + 1], lines[i + 2]);
            i += 3;
            group
        } else {
            i += 1;
            continue;
        };

        let parsed = Elements::from_tle(name, line1.as_bytes(), line2.as_bytes())
            .map_err(|e| ElementError::InvalidRecord {
                file: source.to_string(),
                message: e.to_string(),
            })
            .and_then(|elements| ElementSet::from_elements(elements, source));

        match parsed {
            Ok(set) => outcome.sets.push(set),
            Err(e) => {
                log::warn!("skipping record in {}: {}", source, e);
                outcome.skipped += 1;
            }
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    const ISS_TLE: &str = "ISS (ZARYA)
1 25544U 98067A   20194.88612269 -.00002218  00000-0 -31515-4 0  9992
2 25544  51.6461 221.2784 0001413  89.1723 280.4612 15.49507896236008";

    const GP_HEADER: &str = "OBJECT_NAME,OBJECT_ID,EPOCH,MEAN_MOTION,ECCENTRICITY,\
INCLINATION,RA_OF_ASC_NODE,ARG_OF_PERICENTER,MEAN_ANOMALY,EPHEMERIS_TYPE,\
CLASSIFICATION_TYPE,NORAD_CAT_ID,ELEMENT_SET_NO,REV_AT_EPOCH,BSTAR,\
MEAN_MOTION_DOT,MEAN_MOTION_DDOT";

    const GP_ROW: &str = "ISS (ZARYA),1998-067A,2020-07-12T01:19:07,15.49507896,\
0.0001413,51.6461,221.2784,89.1723,280.4612,0,U,25544,999,23600,\
-3.1515e-5,-2.218e-5,0";

    #[test]
    fn parses_three_line_tle_group() {
        let outcome = parse_tle_text(ISS_TLE, "iss.tle");
        assert_eq!(outcome.sets.len(), 1);
        assert_eq!(outcome.skipped, 0);
        let set = &outcome.sets[0];
        assert_eq!(set.info.catalog_id, 25544);
        assert_eq!(set.info.name, "ISS (ZARYA)");
    }

    #[test]
    fn skips_corrupted_tle_record_and_counts_it() {
        let good = ISS_TLE;
        let bad = "JUNK OBJECT
1 00001U
2 00001  51.6461 221.2784 0001413  89.1723 280.4612 15.49507896236001";
        let content = format!("{}\n{}", bad, good);
        let outcome = parse_tle_text(&content, "mixed.tle");
        assert_eq!(outcome.sets.len(), 1);
        assert_eq!(outcome.skipped, 1);
    }

    #[test]
    fn ignores_stray_lines_between_groups() {
        let content = format!("# celestrak snapshot\n{}\n", ISS_TLE);
        let outcome = parse_tle_text(&content, "iss.tle");
        assert_eq!(outcome.sets.len(), 1);
    }

    #[test]
    fn parses_gp_csv_row() {
        let content = format!("{}\n{}\n", GP_HEADER, GP_ROW);
        let outcome = parse_gp_csv(&content, "gp_active.csv");
        assert_eq!(outcome.sets.len(), 1);
        assert_eq!(outcome.skipped, 0);
        let set = &outcome.sets[0];
        assert_eq!(set.info.catalog_id, 25544);
        assert!((set.elements.mean_motion - 15.49507896).abs() < 1e-9);
        assert!((set.elements.drag_term - (-3.1515e-5)).abs() < 1e-12);
    }

    #[test]
    fn counts_malformed_csv_rows() {
        let content = format!("{}\n{}\nnot,enough,fields\n", GP_HEADER, GP_ROW);
        let outcome = parse_gp_csv(&content, "gp_active.csv");
        assert_eq!(outcome.sets.len(), 1);
        assert_eq!(outcome.skipped, 1);
    }

    #[test]
    fn empty_csv_yields_empty_outcome() {
        let outcome = parse_gp_csv("", "gp_active.csv");
        assert!(outcome.sets.is_empty());
        assert_eq!(outcome.skipped, 0);
    }
}
