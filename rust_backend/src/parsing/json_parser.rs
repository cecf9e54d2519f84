use anyhow::{bail, Context, Result};
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::path::Path;

use crate::core::domain::{GameDocument, GameInfo, LogoRecord, ShotRecord};
use crate::core::table::sanitize_game_id;

/// Custom deserializer that accepts either string or integer for the game ID
fn deserialize_game_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrInt {
        String(String),
        Int(i64),
    }

    match StringOrInt::deserialize(deserializer)? {
        StringOrInt::String(s) => Ok(s),
        StringOrInt::Int(i) => Ok(i.to_string()),
    }
}

/// Raw JSON structure for game metadata
#[derive(Debug, Deserialize)]
struct RawGameInfo {
    #[serde(rename = "GameId", deserialize_with = "deserialize_game_id")]
    game_id: String,
    #[serde(rename = "Date")]
    date: Option<String>,
    #[serde(rename = "Home team")]
    home_team: Option<String>,
    #[serde(rename = "Away team")]
    away_team: Option<String>,
}

/// Raw JSON structure for a tracked logo
#[derive(Debug, Deserialize)]
struct RawLogo {
    #[serde(rename = "FileName")]
    file_name: String,
    #[serde(rename = "GroupId")]
    group_id: i64,
    #[serde(rename = "Placement", default)]
    placement: Option<String>,
}

/// Raw JSON structure for a detected shot
#[derive(Debug, Deserialize)]
struct RawShot {
    #[serde(rename = "FileName")]
    file_name: String,
    #[serde(rename = "GroupId")]
    group_id: i64,
    #[serde(rename = "Period", default)]
    period: Option<String>,
    #[serde(rename = "Duration", default)]
    duration: Option<f64>,
    #[serde(rename = "ScreenPercentage", default)]
    screen_percentage: Option<f64>,
}

/// Container for the JSON file structure
#[derive(Debug, Deserialize)]
struct RawGameDocument {
    #[serde(rename = "GameInfo")]
    game_info: Option<RawGameInfo>,
    #[serde(rename = "Logos", default)]
    logos: Vec<RawLogo>,
    #[serde(rename = "Shots", default)]
    shots: Vec<RawShot>,
}

/// Parse a game document file.
///
/// The file stem is used as the game id when the document has no
/// `GameInfo` block.
pub fn parse_game_document(json_path: &Path) -> Result<GameDocument> {
    let json_content = std::fs::read_to_string(json_path)
        .with_context(|| format!("Failed to read JSON file: {}", json_path.display()))?;

    let source_name = json_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default();

    parse_game_document_str(&json_content, source_name)
}

/// Parse a game document from raw bytes (uploads, archive members).
pub fn parse_game_document_slice(bytes: &[u8], source_name: &str) -> Result<GameDocument> {
    let json_str = std::str::from_utf8(bytes).context("Document is not valid UTF-8")?;
    parse_game_document_str(json_str, source_name)
}

/// Parse a game document from a string.
///
/// `source_name` identifies the document in error messages and supplies the
/// game id when `GameInfo` is missing. Deserialization errors carry the
/// JSON path of the offending field (e.g. `Shots[2].GroupId`).
pub fn parse_game_document_str(json_str: &str, source_name: &str) -> Result<GameDocument> {
    let mut deserializer = serde_json::Deserializer::from_str(json_str);
    let raw: RawGameDocument = serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| {
            let path = e.path().to_string();
            anyhow::anyhow!("JSON deserialization error at '{}': {}", path, e.into_inner())
        })?;
    deserializer
        .end()
        .context("Trailing characters after JSON document")?;

    convert_raw_to_domain(raw, source_name)
}

/// Convert raw JSON structure to domain model
fn convert_raw_to_domain(raw: RawGameDocument, source_name: &str) -> Result<GameDocument> {
    let info = match raw.game_info {
        Some(info) => GameInfo {
            game_id: sanitize_game_id(&info.game_id),
            date: info.date,
            home_team: info.home_team,
            away_team: info.away_team,
        },
        None => GameInfo {
            game_id: sanitize_game_id(source_name),
            ..GameInfo::default()
        },
    };

    if info.game_id.is_empty() {
        bail!("Document has no GameInfo.GameId and no source name to fall back on");
    }

    let logos: Vec<LogoRecord> = raw
        .logos
        .into_iter()
        .map(|logo| LogoRecord {
            file_name: logo.file_name,
            group_id: logo.group_id,
            placement: logo.placement.unwrap_or_default(),
        })
        .collect();

    // A shot only needs a period if it can join a logo
    let tracked: HashSet<(&str, i64)> = logos
        .iter()
        .map(|logo| (logo.file_name.as_str(), logo.group_id))
        .collect();

    let mut shots = Vec::with_capacity(raw.shots.len());
    let mut rejected = 0usize;
    let mut untimed_orphans = 0usize;
    for (index, shot) in raw.shots.into_iter().enumerate() {
        let period = match shot.period {
            Some(period) => period,
            None if tracked.contains(&(shot.file_name.as_str(), shot.group_id)) => {
                bail!("Shots[{}].Period: missing field `Period`", index);
            }
            None => {
                untimed_orphans += 1;
                continue;
            }
        };

        let duration_ms = shot.duration.unwrap_or(0.0);
        let screen_percentage = shot.screen_percentage.unwrap_or(0.0);
        if !duration_ms.is_finite() || duration_ms < 0.0 || !screen_percentage.is_finite() {
            rejected += 1;
            continue;
        }
        shots.push(ShotRecord {
            file_name: shot.file_name,
            group_id: shot.group_id,
            period,
            duration_ms,
            screen_percentage,
        });
    }

    if rejected > 0 {
        log::warn!(
            "Game {}: dropped {} shot(s) with negative or non-finite measurements",
            info.game_id,
            rejected
        );
    }
    if untimed_orphans > 0 {
        log::debug!(
            "Game {}: skipped {} untracked shot(s) without a period",
            info.game_id,
            untimed_orphans
        );
    }

    Ok(GameDocument {
        info,
        logos,
        shots,
    })
}
