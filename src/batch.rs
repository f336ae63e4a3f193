//! Sequential batch writes from a CSV input file.
//!
//! Each data row of the input becomes exactly one write call against the GMH
//! service, in file order. A failing row is reported and skipped; it never
//! aborts the rest of the batch. Between rows the loop pauses for a
//! configurable duration so bulk registrations do not hammer the service,
//! and a Ctrl-C received during that pause stops the batch with a distinct
//! exit code.

use std::path::Path;
use std::time::Duration;

use csv::ReaderBuilder;

use crate::client::{GmhClient, GmhError, NbnLocationsObject};
use crate::constants::{EXIT_INTERRUPTED, EXIT_OK, EXIT_USAGE};

/// Column headers the input file must carry. Case-sensitive; additional
/// columns are ignored.
const NBN_COLUMN: &str = "NBN";
const LOCATION_COLUMN: &str = "LOCATION";

/// Parse a wait-duration literal such as `2s`, `500ms` or `5m`.
///
/// A blank literal falls back to the one-second default. Returns `None` for
/// anything that is not a plain decimal number followed by `ms`, `s` or `m`.
pub fn parse_wait_duration(literal: &str) -> Option<Duration> {
    let literal = literal.trim();
    if literal.is_empty() {
        return Some(Duration::from_secs(1));
    }
    let (digits, unit): (&str, fn(u64) -> Duration) =
        if let Some(d) = literal.strip_suffix("ms") {
            (d, Duration::from_millis)
        } else if let Some(d) = literal.strip_suffix('s') {
            (d, Duration::from_secs)
        } else if let Some(d) = literal.strip_suffix('m') {
            (d, |n| Duration::from_secs(n * 60))
        } else {
            return None;
        };
    digits.parse::<u64>().ok().map(unit)
}

/// Split a raw LOCATION cell on `,` and `;` into the ordered non-empty
/// parts. Whitespace is deliberately not trimmed: a location registered with
/// incidental spaces must round-trip unchanged.
pub fn split_locations(raw: &str) -> Vec<String> {
    raw.split([',', ';'])
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Issue one write for `(identifier, locations)`: an upsert when `force` is
/// set, a plain create otherwise. On success a confirmation goes to stderr
/// unless `quiet` is set. This is the shared primitive behind both the
/// single write and every batch row.
pub async fn write_record(
    api: &GmhClient,
    identifier: &str,
    locations: &[String],
    force: bool,
    quiet: bool,
) -> Result<(), GmhError> {
    let action = if force {
        api.update_nbn_record(identifier, locations).await?;
        "Updated or created"
    } else {
        let record = NbnLocationsObject {
            identifier: identifier.to_string(),
            locations: locations.to_vec(),
        };
        api.create_nbn_locations(&record).await?;
        "Created"
    };
    if !quiet {
        eprintln!("OK. {action} NBN '{identifier}' to resolve to the following locations:");
        for location in locations {
            eprintln!("  <{location}>");
        }
    }
    Ok(())
}

/// Run the batch loop over `input_file` and return the process exit code.
///
/// File-level problems (unreadable file, missing header columns, a malformed
/// row) end the batch immediately with [`EXIT_USAGE`]; row-level remote
/// failures are reported and skipped. A Ctrl-C during the inter-row pause
/// yields [`EXIT_INTERRUPTED`] without starting the next row.
pub async fn run_batch(
    api: &GmhClient,
    input_file: &Path,
    wait: Duration,
    force: bool,
    quiet: bool,
) -> i32 {
    let mut reader = match ReaderBuilder::new().from_path(input_file) {
        Ok(reader) => reader,
        Err(e) => {
            eprintln!("Error reading input file: {e}");
            return EXIT_USAGE;
        }
    };
    let headers = match reader.headers() {
        Ok(headers) => headers.clone(),
        Err(e) => {
            eprintln!("Error reading input file: {e}");
            return EXIT_USAGE;
        }
    };
    let nbn_idx = headers.iter().position(|h| h == NBN_COLUMN);
    let location_idx = headers.iter().position(|h| h == LOCATION_COLUMN);
    let (Some(nbn_idx), Some(location_idx)) = (nbn_idx, location_idx) else {
        eprintln!(
            "Error reading input file: header must contain the columns '{NBN_COLUMN}' and '{LOCATION_COLUMN}'"
        );
        return EXIT_USAGE;
    };

    for row in reader.records() {
        let record = match row {
            Ok(record) => record,
            Err(e) => {
                eprintln!("Error reading input file: {e}");
                return EXIT_USAGE;
            }
        };
        let (Some(nbn), Some(raw_locations)) = (record.get(nbn_idx), record.get(location_idx))
        else {
            eprintln!("Error reading input file: row {} is missing fields", record.position().map_or(0, |p| p.line()));
            return EXIT_USAGE;
        };
        let locations = split_locations(raw_locations);
        if let Err(e) = write_record(api, nbn, &locations, force, quiet).await {
            eprintln!("Error for NBN '{nbn}': {e}");
        }
        if !wait.is_zero() {
            tokio::select! {
                _ = tokio::time::sleep(wait) => {}
                _ = tokio::signal::ctrl_c() => {
                    eprintln!("Interrupted.");
                    return EXIT_INTERRUPTED;
                }
            }
        }
    }
    EXIT_OK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seconds_and_millis() {
        assert_eq!(parse_wait_duration("2s"), Some(Duration::from_secs(2)));
        assert_eq!(parse_wait_duration("500ms"), Some(Duration::from_millis(500)));
        assert_eq!(parse_wait_duration("5m"), Some(Duration::from_secs(300)));
    }

    #[test]
    fn test_parse_zero_means_no_delay() {
        assert_eq!(parse_wait_duration("0s"), Some(Duration::ZERO));
        assert_eq!(parse_wait_duration("0ms"), Some(Duration::ZERO));
    }

    #[test]
    fn test_blank_literal_defaults_to_one_second() {
        assert_eq!(parse_wait_duration(""), Some(Duration::from_secs(1)));
        assert_eq!(parse_wait_duration("  "), Some(Duration::from_secs(1)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_wait_duration("fast"), None);
        assert_eq!(parse_wait_duration("2"), None);
        assert_eq!(parse_wait_duration("2 s"), None);
        assert_eq!(parse_wait_duration("-1s"), None);
        assert_eq!(parse_wait_duration("1.5s"), None);
    }

    #[test]
    fn test_split_on_both_delimiters_preserves_order() {
        assert_eq!(
            split_locations("http://a;http://b,http://c"),
            vec!["http://a", "http://b", "http://c"]
        );
    }

    #[test]
    fn test_split_drops_empty_parts() {
        assert_eq!(split_locations("http://a;;http://b,"), vec!["http://a", "http://b"]);
        assert!(split_locations("").is_empty());
    }

    #[test]
    fn test_split_does_not_trim_whitespace() {
        assert_eq!(
            split_locations("http://a, http://b"),
            vec!["http://a", " http://b"]
        );
    }
}
