//! Integer list, search target, and symbol weight parsing

use super::InputError;

/// Smallest value the array views can display.
pub const VALUE_MIN: i64 = -999;

/// Largest value the array views can display.
pub const VALUE_MAX: i64 = 999;

/// Parse a comma- or whitespace-separated list of integers.
///
/// Positions in errors are 1-based, matching what the user typed.
pub fn parse_array(text: &str) -> Result<Vec<i64>, InputError> {
    let mut values = Vec::new();

    for (i, entry) in split_entries(text).enumerate() {
        let value = entry
            .parse::<i64>()
            .map_err(|_| InputError::BadEntry {
                text: entry.to_string(),
                position: i + 1,
            })?;

        if !(VALUE_MIN..=VALUE_MAX).contains(&value) {
            return Err(InputError::ValueOutOfRange {
                value,
                position: i + 1,
            });
        }

        values.push(value);
    }

    if values.is_empty() {
        return Err(InputError::Empty);
    }

    Ok(values)
}

/// Parse a search target and validate it against the declared value range.
pub fn parse_target(text: &str) -> Result<i64, InputError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }

    let target = trimmed.parse::<i64>().map_err(|_| InputError::BadEntry {
        text: trimmed.to_string(),
        position: 1,
    })?;

    if !(VALUE_MIN..=VALUE_MAX).contains(&target) {
        return Err(InputError::TargetOutOfRange { target });
    }

    Ok(target)
}

/// Parse symbol weights of the form `a:5, b:9, c:12`.
///
/// Duplicate symbols are rejected; weights must be positive.
pub fn parse_weights(text: &str) -> Result<Vec<(String, u64)>, InputError> {
    let mut weights: Vec<(String, u64)> = Vec::new();

    for (i, entry) in split_entries(text).enumerate() {
        let (symbol, weight_text) = entry.split_once(':').ok_or_else(|| InputError::BadEntry {
            text: entry.to_string(),
            position: i + 1,
        })?;

        let symbol = symbol.trim();
        let weight = weight_text.trim().parse::<u64>().ok().filter(|w| *w > 0);

        let weight = match (symbol.is_empty(), weight) {
            (false, Some(w)) => w,
            _ => {
                return Err(InputError::BadEntry {
                    text: entry.to_string(),
                    position: i + 1,
                });
            }
        };

        if weights.iter().any(|(s, _)| s == symbol) {
            return Err(InputError::BadEntry {
                text: entry.to_string(),
                position: i + 1,
            });
        }

        weights.push((symbol.to_string(), weight));
    }

    if weights.is_empty() {
        return Err(InputError::Empty);
    }

    Ok(weights)
}

fn split_entries(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
