//! Canonicalization of period, placement and sponsor labels.
//!
//! Telemetry producers spell the same period many ways (`"1T"`, `"1 top"`,
//! `"Top 1"`). The functions here map every spelling onto one canonical
//! label so statistics land in the same bucket.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::LabelConfig;

static TOP_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)(t|top)$").expect("valid top pattern"));
static BOTTOM_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)(b|bot|bottom)$").expect("valid bottom pattern"));
static DIGITS_THEN_LETTERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)(\p{Alphabetic}+)").expect("valid spacing pattern"));
static COPY_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(\d+\)$").expect("valid suffix pattern"));

/// Canonicalize a raw period label.
///
/// Resolution order:
/// 1. Configured canonical names and aliases (case-insensitive, first match wins)
/// 2. `<n>t` / `<n>top` → `"<n> Top"`, `<n>b` / `<n>bot` / `<n>bottom` → `"<n> Bottom"`
/// 3. Cosmetic fallback: space between a digit run and the letters after
///    it, then title case
///
/// A label produced by steps 2 or 3 is looked up in the alias map once more,
/// so `"over time"` still reaches a canonical `"OT"` configured with the
/// alias `"Overtime"`. This keeps the function idempotent.
///
/// # Examples
///
/// ```
/// use exposure_report::config::LabelConfig;
/// use exposure_report::normalization::normalize_period;
///
/// let config = LabelConfig::default();
/// assert_eq!(normalize_period("1T", &config), "1 Top");
/// assert_eq!(normalize_period("3 bot", &config), "3 Bottom");
/// assert_eq!(normalize_period("overtime", &config), "Overtime");
/// ```
pub fn normalize_period(raw: &str, config: &LabelConfig) -> String {
    if let Some(canonical) = config.periods.resolve(raw) {
        return canonical.to_string();
    }

    let candidate = pattern_period(raw);
    match config.periods.resolve(&candidate) {
        Some(canonical) => canonical.to_string(),
        None => candidate,
    }
}

fn pattern_period(raw: &str) -> String {
    let compact: String = raw.chars().filter(|c| *c != ' ').collect();
    let lowered = compact.to_lowercase();

    if let Some(caps) = TOP_PATTERN.captures(&lowered) {
        return format!("{} Top", &caps[1]);
    }
    if let Some(caps) = BOTTOM_PATTERN.captures(&lowered) {
        return format!("{} Bottom", &caps[1]);
    }

    let spaced = DIGITS_THEN_LETTERS.replace_all(&compact, "$1 $2");
    title_case(&spaced)
}

/// Canonicalize a raw placement label.
///
/// Only the configured alias map is consulted; unmatched input is returned
/// unchanged.
pub fn normalize_placement(raw: &str, config: &LabelConfig) -> String {
    match config.placements.resolve(raw) {
        Some(canonical) => canonical.to_string(),
        None => raw.to_string(),
    }
}

/// Derive the sponsor name from a logo file name.
///
/// Strips the extension, then a trailing `(<digits>)` copy marker, so that
/// `"Nike(2).png"` and `"Nike.png"` both belong to `"Nike"`.
///
/// # Examples
///
/// ```
/// use exposure_report::normalization::sponsor_name;
///
/// assert_eq!(sponsor_name("Nike(2).png"), "Nike");
/// assert_eq!(sponsor_name("Adidas.jpg"), "Adidas");
/// ```
pub fn sponsor_name(file_name: &str) -> String {
    let base = strip_extension(file_name);
    COPY_SUFFIX.replace(base, "").into_owned()
}

/// Remove the last extension the way a path stem would, keeping leading
/// dots of hidden files.
fn strip_extension(file_name: &str) -> &str {
    let name_start = file_name.rfind(['/', '\\']).map_or(0, |i| i + 1);
    match file_name[name_start..].rfind('.') {
        Some(0) | None => file_name,
        Some(dot) => {
            let dot = name_start + dot;
            // "..png" style names: a stem made only of dots is kept whole
            if file_name[name_start..dot].chars().all(|c| c == '.') {
                file_name
            } else {
                &file_name[..dot]
            }
        }
    }
}

/// Title case where a letter is uppercased when it follows a non-letter and
/// lowercased otherwise. Digits therefore start a new word: `"1st"` → `"1St"`.
///
/// Letters whose case mapping is more than one character (`ß` → `SS`) are
/// kept unchanged so that the result maps onto itself.
fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut previous_is_letter = false;
    for ch in input.chars() {
        if ch.is_alphabetic() {
            let mapped = if previous_is_letter {
                single_char(ch.to_lowercase())
            } else {
                single_char(ch.to_uppercase())
            };
            out.push(mapped.unwrap_or(ch));
            previous_is_letter = true;
        } else {
            out.push(ch);
            previous_is_letter = false;
        }
    }
    out
}

fn single_char(mut mapping: impl Iterator<Item = char>) -> Option<char> {
    let first = mapping.next()?;
    match mapping.next() {
        None => Some(first),
        Some(_) => None,
    }
}
