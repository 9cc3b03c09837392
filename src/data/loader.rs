use std::io::Read;

use anyhow::{Context, Result};
use serde_json::Value as JsonValue;

use super::model::{Chromatogram, RecordError};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read the whole stream as UTF-8 and parse it as JSON.
///
/// Expected schema (the records emitted by the polymer search):
///
/// ```json
/// [
///   {
///     "filename": "run.mzML",
///     "ret_times": [0.01, 0.03, ...],
///     "polymers": [
///       { "name": "PEG+1H", "total": 1.2e9, "xic": [0.0, 1520.3, ...] },
///       ...
///     ],
///     "tic": [...],
///     "total": 5.3e11
///   }
/// ]
/// ```
pub fn read_document<R: Read>(mut reader: R) -> Result<JsonValue> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .context("reading JSON from input")?;
    serde_json::from_str(&text).context("parsing JSON")
}

/// Take record 0 of a parsed document and check it can be drawn.
///
/// Records after the first are ignored.
pub fn first_record(document: JsonValue) -> Result<Chromatogram> {
    let JsonValue::Array(records) = document else {
        return Err(RecordError::NotAnArray.into());
    };
    let first = records
        .into_iter()
        .next()
        .ok_or(RecordError::EmptyDocument)?;

    let record: Chromatogram =
        serde_json::from_value(first).context("Record 0 is not a valid chromatogram")?;
    record.check_lengths()?;

    log::debug!(
        "Loaded record 0: {} retention times, {} polymers",
        record.ret_times.len(),
        record.len()
    );
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(text: &str) -> Result<Chromatogram> {
        first_record(read_document(text.as_bytes())?)
    }

    #[test]
    fn test_load_minimal_record() {
        let record = load(
            r#"[{"ret_times": [1, 2, 3], "polymers": [{"name": "A", "xic": [0.1, 0.5, 0.2]}]}]"#,
        )
        .unwrap();

        assert_eq!(record.ret_times, vec![1.0, 2.0, 3.0]);
        assert_eq!(record.polymers[0].name, "A");
        assert_eq!(record.polymers[0].xic, vec![Some(0.1), Some(0.5), Some(0.2)]);
    }

    #[test]
    fn test_only_first_record_is_read() {
        let record = load(
            r#"[
                {"ret_times": [1], "polymers": []},
                {"ret_times": "not even valid"}
            ]"#,
        )
        .unwrap();
        assert!(record.is_empty());
    }

    #[test]
    fn test_null_intensity_is_a_gap() {
        let record = load(
            r#"[{"ret_times": [1, 2], "polymers": [{"name": "PPG", "xic": [null, 4.0]}]}]"#,
        )
        .unwrap();
        assert_eq!(record.polymers[0].xic, vec![None, Some(4.0)]);
    }

    #[test]
    fn test_empty_input_fails_to_parse() {
        let err = read_document("".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("parsing JSON"));
    }

    #[test]
    fn test_empty_document() {
        let err = load("[]").unwrap_err();
        assert_eq!(
            err.downcast_ref::<RecordError>(),
            Some(&RecordError::EmptyDocument)
        );
    }

    #[test]
    fn test_top_level_object_is_rejected() {
        let err = load(r#"{"ret_times": []}"#).unwrap_err();
        assert_eq!(
            err.downcast_ref::<RecordError>(),
            Some(&RecordError::NotAnArray)
        );
    }

    #[test]
    fn test_missing_key_names_the_key() {
        let err = load(r#"[{"polymers": []}]"#).unwrap_err();
        assert!(format!("{err:#}").contains("ret_times"));
    }

    #[test]
    fn test_length_mismatch() {
        let err = load(
            r#"[{"ret_times": [1, 2, 3], "polymers": [{"name": "A", "xic": [0.1]}]}]"#,
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RecordError>(),
            Some(RecordError::LengthMismatch { found: 1, expected: 3, .. })
        ));
    }
}
