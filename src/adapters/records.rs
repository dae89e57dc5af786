use crate::domain::model::{EnrichedRecord, InputFormat, OutputFormat, Record};
use crate::utils::error::{EnrichError, Result};
use serde_json::Value;
use std::io::Write;

/// Decodes raw input into records.
///
/// Elements that are not JSON objects cannot be records and are dropped here
/// with a warning, before enrichment starts. In JSONL input the same applies
/// to lines that do not parse at all.
pub fn decode_records(data: &[u8], format: InputFormat) -> Result<Vec<Record>> {
    match format {
        InputFormat::Json => decode_json(data),
        InputFormat::Jsonl => decode_jsonl(data),
        InputFormat::Csv => decode_csv(data),
    }
}

fn decode_json(data: &[u8]) -> Result<Vec<Record>> {
    let value: Value = serde_json::from_slice(data)?;

    match value {
        Value::Array(items) => Ok(items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| {
                let record = Record::from_json(item);
                if record.is_none() {
                    tracing::warn!("⚠️ Skipping non-object element at index {}", index);
                }
                record
            })
            .collect()),
        // 單一物件視為只有一筆記錄的批次
        Value::Object(_) => Ok(Record::from_json(value).into_iter().collect()),
        other => Err(EnrichError::DecodeError {
            line: 1,
            message: format!("expected an array of objects or an object, found {}", other),
        }),
    }
}

fn decode_jsonl(data: &[u8]) -> Result<Vec<Record>> {
    let text = std::str::from_utf8(data).map_err(|e| EnrichError::DecodeError {
        line: 0,
        message: format!("input is not valid UTF-8: {}", e),
    })?;

    let mut records = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("⚠️ Skipping unparsable JSON line {}: {}", index + 1, e);
                continue;
            }
        };

        match Record::from_json(value) {
            Some(record) => records.push(record),
            None => tracing::warn!("⚠️ Skipping non-object JSON line {}", index + 1),
        }
    }

    Ok(records)
}

fn decode_csv(data: &[u8]) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(data);

    let headers = reader.headers()?.clone();
    let mut records = Vec::new();

    for row in reader.records() {
        let row = row?;
        let data = headers
            .iter()
            .zip(row.iter())
            .map(|(key, value)| (key.to_string(), Value::String(value.to_string())))
            .collect();
        records.push(Record { data });
    }

    Ok(records)
}

pub fn encode_records<W: Write>(
    records: &[EnrichedRecord],
    format: OutputFormat,
    pretty: bool,
    mut writer: W,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            if pretty {
                serde_json::to_writer_pretty(&mut writer, records)?;
            } else {
                serde_json::to_writer(&mut writer, records)?;
            }
            writeln!(writer)?;
        }
        OutputFormat::Jsonl => {
            for record in records {
                serde_json::to_writer(&mut writer, record)?;
                writeln!(writer)?;
            }
        }
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_json_array_skips_non_objects() {
        let data = br#"[{"text": "a"}, 5, {"id": 2}, "loose"]"#;
        let records = decode_records(data, InputFormat::Json).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text_of("text").as_deref(), Some("a"));
        assert_eq!(records[1].get("id"), Some(&json!(2)));
    }

    #[test]
    fn test_decode_json_single_object() {
        let records = decode_records(br#"{"text": "solo"}"#, InputFormat::Json).unwrap();
        assert_eq!(records.len(), 1);

        assert!(matches!(
            decode_records(b"42", InputFormat::Json),
            Err(EnrichError::DecodeError { .. })
        ));
        assert!(matches!(
            decode_records(b"{not json", InputFormat::Json),
            Err(EnrichError::SerializationError(_))
        ));
    }

    #[test]
    fn test_decode_jsonl_skips_blank_and_bad_lines() {
        let data = b"{\"text\": \"one\"}\n\n{\"text\": \"two\"}\n";
        assert_eq!(decode_records(data, InputFormat::Jsonl).unwrap().len(), 2);

        let broken = b"{\"text\": \"one\"}\n{broken\n42\n{\"text\": \"three\"}\n";
        let records = decode_records(broken, InputFormat::Jsonl).unwrap();
        let texts: Vec<String> = records.iter().filter_map(|r| r.text_of("text")).collect();
        assert_eq!(texts, vec!["one", "three"]);
    }

    #[test]
    fn test_decode_jsonl_rejects_non_utf8() {
        assert!(matches!(
            decode_records(&[0xff, 0xfe, b'\n'], InputFormat::Jsonl),
            Err(EnrichError::DecodeError { line: 0, .. })
        ));
    }

    #[test]
    fn test_decode_keeps_field_order() {
        let data = b"{\"z\":1,\"text\":\"x\",\"a\":2}\n";
        let records = decode_records(data, InputFormat::Jsonl).unwrap();
        let keys: Vec<&str> = records[0].data.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "text", "a"]);

        let csv = b"zeta,text,alpha\n1,x,2\n";
        let records = decode_records(csv, InputFormat::Csv).unwrap();
        let keys: Vec<&str> = records[0].data.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "text", "alpha"]);
    }

    #[test]
    fn test_decode_csv_uses_headers_as_keys() {
        let data = b"id,text\n1,great product\n2,\n";
        let records = decode_records(data, InputFormat::Csv).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("id"), Some(&json!("1")));
        assert_eq!(records[0].text_of("text").as_deref(), Some("great product"));
        assert_eq!(records[1].text_of("text").as_deref(), Some(""));
    }

    #[test]
    fn test_encode_jsonl_one_record_per_line() {
        let records = vec![
            EnrichedRecord::new(Record::new().with("text", "a"), 0.5),
            EnrichedRecord::new(Record::new().with("text", "b"), -0.5),
        ];
        let mut out = Vec::new();
        encode_records(&records, OutputFormat::Jsonl, false, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1]["sentiment_label"], json!("negative"));
    }

    #[test]
    fn test_encode_json_empty_batch() {
        let mut out = Vec::new();
        encode_records(&[], OutputFormat::Json, true, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().trim(), "[]");
    }
}
