//! Star catalog parsing from delimited text
//!
//! The catalog is a header-row CSV (or TSV, etc.) with at least `name`,
//! `ra`, `dec` and `mag` columns. Header names are matched after trimming
//! and lower-casing. Rows with a missing or non-numeric required field are
//! dropped, never defaulted.

use folio_core::StarRecord;
use rand::Rng;
use serde::Deserialize;
use std::path::Path;

use crate::error::DataResult;
use crate::http_adapter::ApiClient;

/// Field delimiter of the catalog text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Semicolon,
    Pipe,
    /// Pick whichever candidate appears most often in the header line
    Auto,
}

impl Delimiter {
    const CANDIDATES: [u8; 4] = [b',', b'\t', b';', b'|'];

    fn resolve(self, text: &str) -> u8 {
        match self {
            Self::Comma => b',',
            Self::Tab => b'\t',
            Self::Semicolon => b';',
            Self::Pipe => b'|',
            Self::Auto => {
                let header = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
                Self::CANDIDATES
                    .iter()
                    .copied()
                    .map(|c| (c, header.bytes().filter(|b| *b == c).count()))
                    .filter(|(_, n)| *n > 0)
                    // max_by_key keeps the last maximum; reverse so ties favour the earlier candidate
                    .rev()
                    .max_by_key(|(_, n)| *n)
                    .map(|(c, _)| c)
                    .unwrap_or(b',')
            }
        }
    }
}

/// Star catalog container
#[derive(Clone, Debug, Default)]
pub struct StarCatalog {
    stars: Vec<StarRecord>,
}

impl StarCatalog {
    /// Parse catalog text, keeping only valid rows in file order
    pub fn parse_str(text: &str, delimiter: Delimiter) -> DataResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter.resolve(text))
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = normalize_headers(reader.headers()?);
        reader.set_headers(headers);

        let mut stars = Vec::new();
        let mut dropped = 0usize;

        for (row, result) in reader.deserialize::<CatalogRow>().enumerate() {
            match result {
                Ok(record) => match record.to_star_record() {
                    Some(star) => stars.push(star),
                    None => dropped += 1,
                },
                Err(e) => {
                    tracing::debug!("Skipping catalog row {}: {}", row + 1, e);
                    dropped += 1;
                }
            }
        }

        if dropped > 0 {
            tracing::warn!("Dropped {} invalid catalog rows", dropped);
        }

        Ok(Self { stars })
    }

    /// Load from a local file
    pub fn load_path(path: &Path, delimiter: Delimiter) -> DataResult<Self> {
        tracing::info!("Loading star catalog from {:?}", path);
        let text = std::fs::read_to_string(path)?;
        let catalog = Self::parse_str(&text, delimiter)?;
        tracing::info!("Loaded {} valid stars", catalog.len());
        Ok(catalog)
    }

    /// Fetch over HTTP with the shared client
    pub async fn fetch(client: &ApiClient, url: &str, delimiter: Delimiter) -> DataResult<Self> {
        let url = client.resolve(url)?;
        tracing::info!("Fetching star catalog from {}", url);
        let text = client.get_text(&url).await?;
        let catalog = Self::parse_str(&text, delimiter)?;
        tracing::info!("Loaded {} valid stars", catalog.len());
        Ok(catalog)
    }

    pub fn from_records(stars: Vec<StarRecord>) -> Self {
        Self { stars }
    }

    pub fn len(&self) -> usize { self.stars.len() }
    pub fn is_empty(&self) -> bool { self.stars.is_empty() }
    pub fn iter(&self) -> impl Iterator<Item = &StarRecord> { self.stars.iter() }
    pub fn stars(&self) -> &[StarRecord] { &self.stars }
    pub fn into_stars(self) -> Vec<StarRecord> { self.stars }

    /// Keep only stars at or brighter than `max_mag`
    pub fn filter_by_magnitude(mut self, max_mag: f64) -> Self {
        self.stars.retain(|s| s.mag <= max_mag);
        self
    }

    /// The `n` brightest stars, brightest first; equal magnitudes keep file order
    pub fn take_brightest(mut self, n: usize) -> Self {
        self.stars.sort_by(|a, b| a.mag.total_cmp(&b.mag));
        self.stars.truncate(n);
        self
    }
}

/// Random subset of `count` stars (all of them if fewer), in original order
pub fn sample_in_order<R: Rng + ?Sized>(
    stars: &[StarRecord],
    count: usize,
    rng: &mut R,
) -> Vec<StarRecord> {
    let amount = count.min(stars.len());
    let mut picked = rand::seq::index::sample(rng, stars.len(), amount).into_vec();
    picked.sort_unstable();
    picked.into_iter().map(|i| stars[i].clone()).collect()
}

/// Trim and lower-case header names. A `magnitude` column stands in for
/// `mag` only when the file has no `mag` column of its own.
fn normalize_headers(raw: &csv::StringRecord) -> csv::StringRecord {
    let mut names: Vec<String> = raw.iter().map(|h| h.trim().to_lowercase()).collect();
    if !names.iter().any(|h| h == "mag") {
        if let Some(h) = names.iter_mut().find(|h| h.as_str() == "magnitude") {
            *h = "mag".to_string();
        }
    }
    names.into_iter().collect()
}

/// One catalog row with every field optional; validity is checked afterwards
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogRow {
    name: Option<String>,
    #[serde(deserialize_with = "csv::invalid_option")]
    ra: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    dec: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    mag: Option<f64>,
    constellation: Option<String>,
}

impl CatalogRow {
    fn to_star_record(&self) -> Option<StarRecord> {
        let name = self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())?;
        let finite = |v: Option<f64>| v.filter(|x| x.is_finite());

        Some(StarRecord {
            name: name.to_string(),
            ra: finite(self.ra)?,
            dec: finite(self.dec)?,
            mag: finite(self.mag)?,
            constellation: self.constellation
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
        })
    }
}
