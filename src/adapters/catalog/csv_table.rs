//! CSV Catalog Adapter
//!
//! Reads every part from one table: a `Names,<attr1>,...,<attrN>` header
//! followed by part rows. Slot membership comes from position. Each slot's
//! section starts at a known part name and runs until the next section
//! starts.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::adapters::csv_row::{records, split_row};
use crate::domain::catalog::{CatalogSet, PartCatalog};
use crate::domain::foundation::{AttributeSchema, Slot};
use crate::ports::{CatalogSource, CatalogSourceError};

/// First part name of each slot's section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionLayout {
    pub character: String,
    pub kart: String,
    pub wheel: String,
    pub glider: String,
}

impl SectionLayout {
    pub fn start_of(&self, slot: Slot) -> &str {
        match slot {
            Slot::Character => &self.character,
            Slot::Kart => &self.kart,
            Slot::Wheel => &self.wheel,
            Slot::Glider => &self.glider,
        }
    }

    fn slot_starting_at(&self, name: &str, started: &[bool; 4]) -> Option<Slot> {
        Slot::all()
            .iter()
            .copied()
            .find(|slot| !started[slot.order_index()] && self.start_of(*slot) == name)
    }
}

impl Default for SectionLayout {
    fn default() -> Self {
        Self {
            character: "Mario".to_string(),
            kart: "Standard Kart".to_string(),
            wheel: "Standard".to_string(),
            glider: "Super Glider".to_string(),
        }
    }
}

/// Catalog source backed by a sectioned CSV file.
#[derive(Debug, Clone)]
pub struct CsvCatalogSource {
    path: PathBuf,
    layout: SectionLayout,
}

impl CsvCatalogSource {
    /// Reads `path` with the default section layout.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            layout: SectionLayout::default(),
        }
    }

    pub fn with_layout(mut self, layout: SectionLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Parses CSV text already in memory.
    ///
    /// # Errors
    ///
    /// - `Malformed` for a missing header, a ragged row, a non-numeric cell,
    ///   a row before the first section, or a section that never starts
    /// - `Engine` if the resulting catalogs are rejected
    pub fn parse_str(text: &str, layout: &SectionLayout) -> Result<CatalogSet, CatalogSourceError> {
        let mut lines = records(text)
            .into_iter()
            .filter(|(_, line)| !line.trim().is_empty());

        let (header_line, header) = lines
            .next()
            .ok_or_else(|| CatalogSourceError::malformed(1, "missing header row"))?;
        let header = split_row(&header).map_err(|e| CatalogSourceError::malformed(header_line, e))?;
        let attributes: Vec<String> = header.iter().skip(1).map(|h| h.trim().to_string()).collect();
        let schema = AttributeSchema::new(attributes)?;

        let mut catalogs = Slot::all().map(|slot| PartCatalog::new(slot, schema.clone()));
        let mut started = [false; 4];
        let mut current: Option<Slot> = None;
        let mut last_line = header_line;
        let mut dropped = 0usize;

        for (line_no, line) in lines {
            last_line = line_no;
            let fields = split_row(&line).map_err(|e| CatalogSourceError::malformed(line_no, e))?;
            if fields.len() != header.len() {
                return Err(CatalogSourceError::malformed(
                    line_no,
                    format!("expected {} fields, got {}", header.len(), fields.len()),
                ));
            }

            let name = fields[0].trim();
            if name.is_empty() {
                return Err(CatalogSourceError::malformed(line_no, "missing part name"));
            }
            if let Some(slot) = layout.slot_starting_at(name, &started) {
                started[slot.order_index()] = true;
                current = Some(slot);
            }
            let slot = current.ok_or_else(|| {
                CatalogSourceError::malformed(
                    line_no,
                    format!("part '{}' appears before the first section", name),
                )
            })?;

            match parse_values(&fields[1..], line_no)? {
                Some(values) => catalogs[slot.order_index()].insert(name, values)?,
                None => {
                    dropped += 1;
                    warn!(line = line_no, part = name, "Dropping part row with missing values");
                }
            }
        }

        if let Some(slot) = Slot::all().iter().find(|s| !started[s.order_index()]) {
            return Err(CatalogSourceError::malformed(
                last_line,
                format!(
                    "no {} section: part '{}' not found",
                    slot.display_name().to_lowercase(),
                    layout.start_of(*slot)
                ),
            ));
        }

        info!(
            characters = catalogs[0].len(),
            karts = catalogs[1].len(),
            wheels = catalogs[2].len(),
            gliders = catalogs[3].len(),
            dropped,
            "Parsed CSV catalog"
        );

        let [character, kart, wheel, glider] = catalogs;
        Ok(CatalogSet::new(character, kart, wheel, glider)?)
    }
}

/// Parses a row's value cells; `None` if any cell is empty or `NaN`.
fn parse_values(cells: &[String], line_no: usize) -> Result<Option<Vec<f64>>, CatalogSourceError> {
    let mut values = Vec::with_capacity(cells.len());
    for cell in cells {
        let cell = cell.trim();
        if cell.is_empty() || cell.eq_ignore_ascii_case("nan") {
            return Ok(None);
        }
        let value = cell.parse::<f64>().map_err(|_| {
            CatalogSourceError::malformed(line_no, format!("'{}' is not a number", cell))
        })?;
        values.push(value);
    }
    Ok(Some(values))
}

impl CatalogSource for CsvCatalogSource {
    fn load(&self) -> Result<CatalogSet, CatalogSourceError> {
        let text = fs::read_to_string(&self.path).map_err(|e| CatalogSourceError::io(&self.path, e))?;
        Self::parse_str(&text, &self.layout)
    }

    fn describe(&self) -> String {
        format!("csv:{}", self.path.display())
    }
}
