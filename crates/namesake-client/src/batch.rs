use std::collections::HashMap;
use std::fs;
use std::io::{IsTerminal, Read};

use crate::{ClientError, ClientResult};

pub(crate) const BATCH_FIELDS: [&str; 5] = [
    "bill_first_name",
    "bill_last_name",
    "ship_first_name",
    "ship_last_name",
    "name_on_card",
];

#[derive(Debug, Clone)]
pub(crate) struct BatchRow {
    pub(crate) row: usize,
    pub(crate) bill_first_name: Option<String>,
    pub(crate) bill_last_name: Option<String>,
    pub(crate) ship_first_name: Option<String>,
    pub(crate) ship_last_name: Option<String>,
    pub(crate) name_on_card: Option<String>,
}

pub(crate) fn read_source(path: &str, stdin_override: Option<String>) -> ClientResult<String> {
    if path == "-" {
        let body = read_stdin(stdin_override)?;
        return match body {
            Some(content) if !content.trim().is_empty() => Ok(content),
            _ => Err(invalid_batch_input(
                "Path `-` means stdin input, but stdin was empty. Pipe CSV input or pass a file path.",
            )),
        };
    }

    fs::read_to_string(path).map_err(|error| {
        ClientError::invalid_argument_with_recovery(
            &format!("Could not read batch file `{path}`: {error}"),
            vec![
                "Verify the path exists and is readable.".to_string(),
                "Rerun namesake batch <path>.".to_string(),
            ],
        )
    })
}

fn read_stdin(stdin_override: Option<String>) -> ClientResult<Option<String>> {
    if stdin_override.is_some() {
        return Ok(stdin_override);
    }

    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut body = String::new();
    stdin
        .read_to_string(&mut body)
        .map_err(|_| invalid_batch_input("Could not read stdin as UTF-8 text."))?;
    Ok(Some(body))
}

pub(crate) fn parse_rows(content: &str) -> ClientResult<Vec<BatchRow>> {
    if content.trim().is_empty() {
        return Err(invalid_batch_input("Batch source is empty."));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|_| invalid_batch_input("CSV header row is missing or unreadable."))?
        .iter()
        .map(|value| value.trim().to_ascii_lowercase())
        .collect::<Vec<String>>();

    let missing = BATCH_FIELDS
        .iter()
        .filter(|field| !headers.iter().any(|header| header == *field))
        .map(|field| field.to_string())
        .collect::<Vec<String>>();
    if !missing.is_empty() {
        return Err(ClientError::invalid_argument_with_recovery(
            &format!("CSV headers are missing: {}.", missing.join(", ")),
            vec![format!("Use the header row `{}`.", BATCH_FIELDS.join(","))],
        )
        .with_data(serde_json::json!({
            "missing_headers": missing,
            "actual_headers": headers,
        })));
    }

    let index_by_name = headers
        .iter()
        .enumerate()
        .map(|(index, name)| (name.to_string(), index))
        .collect::<HashMap<String, usize>>();

    let mut rows = Vec::new();
    for (row_index, result_row) in reader.records().enumerate() {
        let record = result_row
            .map_err(|_| invalid_batch_input("CSV rows are malformed or not UTF-8."))?;

        rows.push(BatchRow {
            row: row_index + 1,
            bill_first_name: value_for(&record, &index_by_name, "bill_first_name"),
            bill_last_name: value_for(&record, &index_by_name, "bill_last_name"),
            ship_first_name: value_for(&record, &index_by_name, "ship_first_name"),
            ship_last_name: value_for(&record, &index_by_name, "ship_last_name"),
            name_on_card: value_for(&record, &index_by_name, "name_on_card"),
        });
    }

    Ok(rows)
}

// Short rows and blank cells both become missing fields.
fn value_for(
    record: &csv::StringRecord,
    index_by_name: &HashMap<String, usize>,
    field_name: &str,
) -> Option<String> {
    let index = index_by_name.get(field_name)?;
    let value = record.get(*index)?;
    if value.trim().is_empty() {
        return None;
    }
    Some(value.to_string())
}

fn invalid_batch_input(message: &str) -> ClientError {
    ClientError::invalid_argument_with_recovery(
        message,
        vec![
            format!(
                "Provide CSV with the header row `{}` via path or stdin.",
                BATCH_FIELDS.join(",")
            ),
            "Run `namesake batch --help` for usage.".to_string(),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::{parse_rows, read_source};

    #[test]
    fn parses_rows_in_any_column_order() {
        let content = "name_on_card,bill_first_name,bill_last_name,ship_first_name,ship_last_name\n\
                       Deborah Egli,Deborah,Egli,Deborah,Egli\n";
        let parsed = parse_rows(content);
        assert!(parsed.is_ok());
        if let Ok(rows) = parsed {
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].row, 1);
            assert_eq!(rows[0].name_on_card.as_deref(), Some("Deborah Egli"));
            assert_eq!(rows[0].ship_last_name.as_deref(), Some("Egli"));
        }
    }

    #[test]
    fn short_rows_leave_fields_missing() {
        let content = "bill_first_name,bill_last_name,ship_first_name,ship_last_name,name_on_card\n\
                       Deborah,Egli,Deborah\n";
        let parsed = parse_rows(content);
        assert!(parsed.is_ok());
        if let Ok(rows) = parsed {
            assert_eq!(rows[0].ship_first_name.as_deref(), Some("Deborah"));
            assert_eq!(rows[0].ship_last_name, None);
            assert_eq!(rows[0].name_on_card, None);
        }
    }

    #[test]
    fn blank_cells_are_missing_fields() {
        let content = "bill_first_name,bill_last_name,ship_first_name,ship_last_name,name_on_card\n\
                       Deborah,,Deborah,  ,Deborah Egli\n";
        let parsed = parse_rows(content);
        assert!(parsed.is_ok());
        if let Ok(rows) = parsed {
            assert_eq!(rows[0].bill_first_name.as_deref(), Some("Deborah"));
            assert_eq!(rows[0].bill_last_name, None);
            assert_eq!(rows[0].ship_last_name, None);
        }
    }

    #[test]
    fn missing_headers_are_reported() {
        let parsed = parse_rows("bill_first_name,bill_last_name\nA,B\n");
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.code, "invalid_argument");
            assert!(error.message.contains("ship_first_name"));
        }
    }

    #[test]
    fn empty_stdin_is_rejected() {
        let result = read_source("-", Some("   ".to_string()));
        assert!(result.is_err());
    }
}
