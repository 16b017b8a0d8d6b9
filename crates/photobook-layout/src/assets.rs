//! Asset list import
//!
//! Accepts a JSON array of assets or a CSV file with a header row. Columns
//! are looked up by name, so order does not matter and only `id` is
//! required:
//!
//! ```text
//! id,width,height,rotated,caption,taken_at,kind
//! beach-01,4000,3000,false,Morning swim,2024-07-01T08:30:00Z,image
//! ```

use crate::types::*;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::path::Path;

/// Load assets from `path` and sort them by capture time.
///
/// The format is chosen by extension: `.json` or anything else as CSV.
pub async fn load_assets(path: impl AsRef<Path>) -> Result<Vec<Asset>> {
    let path = path.as_ref().to_owned();
    let contents = tokio::fs::read_to_string(&path).await?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let mut assets = if is_json {
        parse_json(&contents)?
    } else {
        tokio::task::spawn_blocking(move || parse_csv(&contents)).await??
    };

    let assets_before = assets.len();
    dedupe_ids(&mut assets);
    if assets.len() != assets_before {
        log::warn!(
            "Dropped {} assets with duplicate ids from {}",
            assets_before - assets.len(),
            path.display()
        );
    }

    sort_by_capture_time(&mut assets);
    log::info!("Loaded {} assets from {}", assets.len(), path.display());
    Ok(assets)
}

#[cfg(feature = "serde")]
fn parse_json(contents: &str) -> Result<Vec<Asset>> {
    Ok(serde_json::from_str(contents)?)
}

#[cfg(not(feature = "serde"))]
fn parse_json(_contents: &str) -> Result<Vec<Asset>> {
    Err(LayoutError::InvalidAsset(
        "JSON asset lists need the `serde` feature".to_string(),
    ))
}

/// Parse a headed CSV asset list
pub fn parse_csv(contents: &str) -> Result<Vec<Asset>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(contents.as_bytes());

    let headers = reader.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
    let id_col = column("id")
        .ok_or_else(|| LayoutError::InvalidAsset("CSV header has no `id` column".to_string()))?;
    let width_col = column("width");
    let height_col = column("height");
    let rotated_col = column("rotated");
    let caption_col = column("caption");
    let taken_col = column("taken_at");
    let kind_col = column("kind");

    let mut assets = Vec::new();
    for (line, result) in reader.records().enumerate() {
        let record = result?;
        let field = |col: Option<usize>| col.and_then(|c| record.get(c)).filter(|v| !v.is_empty());

        let Some(id) = field(Some(id_col)) else {
            return Err(LayoutError::InvalidAsset(format!(
                "row {} has an empty id",
                line + 1
            )));
        };

        let mut asset = Asset::new(
            id,
            field(width_col).map_or(0, parse_dimension),
            field(height_col).map_or(0, parse_dimension),
        );
        asset.rotated = field(rotated_col).is_some_and(parse_flag);
        asset.caption = field(caption_col).map(str::to_string);
        asset.taken_at = field(taken_col).and_then(|v| parse_timestamp(id, v));
        asset.kind = match field(kind_col) {
            Some(kind) if kind.eq_ignore_ascii_case("video") => MediaKind::Video,
            _ => MediaKind::Image,
        };
        assets.push(asset);
    }

    Ok(assets)
}

/// Unparseable dimensions count as unknown
fn parse_dimension(value: &str) -> u32 {
    value.parse().unwrap_or(0)
}

fn parse_flag(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}

fn parse_timestamp(id: &str, value: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(timestamp) => Some(timestamp.with_timezone(&Utc)),
        Err(e) => {
            log::warn!("Ignoring capture time '{}' for {}: {}", value, id, e);
            None
        }
    }
}

/// Keep the first asset for each id
fn dedupe_ids(assets: &mut Vec<Asset>) {
    let mut seen = HashSet::new();
    assets.retain(|asset| seen.insert(asset.id.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_reads_named_columns() {
        let csv = "kind,id,height,width,caption,rotated\n\
                   video,clip,1080,1920,,false\n\
                   image,pier,3000,4000,Pier at dusk,yes\n";
        let assets = parse_csv(csv).unwrap();
        assert_eq!(assets.len(), 2);
        assert!(assets[0].is_video());
        assert_eq!(assets[0].caption, None);
        assert_eq!((assets[1].width, assets[1].height), (4000, 3000));
        assert!(assets[1].rotated);
        assert_eq!(assets[1].caption_text(), Some("Pier at dusk"));
    }

    #[test]
    fn test_parse_csv_tolerates_bad_values() {
        let csv = "id,width,height,taken_at\na,wide,-3,yesterday\n";
        let assets = parse_csv(csv).unwrap();
        assert_eq!((assets[0].width, assets[0].height), (0, 0));
        assert_eq!(assets[0].taken_at, None);
    }

    #[test]
    fn test_parse_csv_requires_id() {
        assert!(parse_csv("width,height\n1,1\n").is_err());
        assert!(parse_csv("id,width\n,10\n").is_err());
    }

    #[test]
    fn test_dedupe_keeps_first() {
        let mut assets = vec![
            Asset::new("a", 1, 1),
            Asset::new("b", 1, 1),
            Asset::new("a", 2, 2),
        ];
        dedupe_ids(&mut assets);
        assert_eq!(assets.len(), 2);
        assert_eq!(assets[0].width, 1);
    }
}
