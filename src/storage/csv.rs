//! Master list CSV reader
//!
//! Header row first. Quoting follows the usual CSV dialect: quoted fields can
//! hold commas, newlines and `""` escapes, while a quote inside an unquoted
//! field is literal. Cells are trimmed and empty cells become null.

use anyhow::{bail, Context, Result};
use csv::{ReaderBuilder, StringRecord};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use crate::core::{Score, VocabularyRecord};

pub fn read_csv(path: &Path) -> Result<Vec<VocabularyRecord>> {
	anyhow::ensure!(path.exists(), "CSV file not found: {}", path.display());
	let text = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
	parse_records(&text).with_context(|| format!("Invalid CSV in {}", path.display()))
}

pub fn parse_records(text: &str) -> Result<Vec<VocabularyRecord>> {
	let text = text.strip_prefix('\u{feff}').unwrap_or(text);
	let mut reader = ReaderBuilder::new().flexible(true).from_reader(text.as_bytes());
	let header: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();

	let mut records = Vec::new();
	for row in reader.records() {
		let row = row?;
		if row.iter().all(|cell| cell.trim().is_empty()) {
			continue;
		}
		let line = row.position().map_or(0, |p| p.line());
		let record = clean_row(&header, &row).with_context(|| format!("line {}", line))?;
		records.push(record);
	}
	Ok(records)
}

fn clean_row(header: &[String], row: &StringRecord) -> Result<VocabularyRecord> {
	let mut id = None;
	let mut word = None;
	let mut difficulty_score = None;
	let mut extra = Map::new();

	for (key, cell) in header.iter().zip(row.iter()) {
		let value = cell.trim();
		match key.as_str() {
			"id" => id = parse_id(value)?,
			"word" => word = Some(value.to_string()).filter(|w| !w.is_empty()),
			"difficulty_score" if value.is_empty() => difficulty_score = None,
			"difficulty_score" => {
				difficulty_score = Some(Score::parse(value).with_context(|| format!("invalid difficulty_score '{}'", value))?)
			}
			_ if value.is_empty() => {
				extra.insert(key.clone(), Value::Null);
			}
			_ => {
				extra.insert(key.clone(), Value::String(value.to_string()));
			}
		}
	}

	let Some(word) = word else {
		bail!("missing word");
	};
	Ok(VocabularyRecord { id, word, difficulty_score, extra })
}

fn parse_id(value: &str) -> Result<Option<i64>> {
	if value.is_empty() {
		return Ok(None);
	}
	match Score::parse(value) {
		Some(Score::Int(v)) => Ok(Some(v)),
		Some(Score::Float(_)) => Ok(None),
		None => bail!("invalid id '{}'", value),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn cleans_cells() {
		let text = "id,word,part_of_speech,difficulty_score,meaning_1\r\n\
		            1, apple ,noun,12,りんご\r\n\
		            2,run,,3.5,\"走る, 逃げる\"\r\n";
		let records = parse_records(text).unwrap();
		assert_eq!(records.len(), 2);

		assert_eq!(records[0].id, Some(1));
		assert_eq!(records[0].word, "apple");
		assert_eq!(records[0].difficulty_score, Some(Score::Int(12)));
		assert_eq!(records[0].text_field("part_of_speech"), Some("noun"));

		assert_eq!(records[1].difficulty_score, Some(Score::Float(3.5)));
		assert_eq!(records[1].extra.get("part_of_speech"), Some(&Value::Null));
		assert_eq!(records[1].text_field("meaning_1"), Some("走る, 逃げる"));
	}

	#[test]
	fn quoted_newlines_and_escapes() {
		let text = "id,word,meaning_1\n7,quote,\"say \"\"hi\"\"\nagain\"";
		let records = parse_records(text).unwrap();
		assert_eq!(records[0].text_field("meaning_1"), Some("say \"hi\"\nagain"));
	}

	#[test]
	fn blank_score_and_trailing_lines() {
		let text = "\u{feff}id,word,difficulty_score\n3,gap,\n\n";
		let records = parse_records(text).unwrap();
		assert_eq!(records.len(), 1);
		assert_eq!(records[0].id, Some(3));
		assert_eq!(records[0].difficulty_score, None);
	}

	#[test]
	fn rejects_bad_rows() {
		assert!(parse_records("id,word\n1,\n").is_err());
		assert!(parse_records("id,word,difficulty_score\n1,a,hard\n").is_err());
		assert!(parse_records("id,word\n1.x,a\n").is_err());
	}

	#[test]
	fn quote_inside_unquoted_field_is_literal() {
		let records = parse_records("id,word,meaning_1\n1,inch,5\" screen\n2,b,c\n").unwrap();
		assert_eq!(records.len(), 2);
		assert_eq!(records[0].text_field("meaning_1"), Some("5\" screen"));
		assert_eq!(records[1].word, "b");
	}

	#[test]
	fn known_fields_lead_then_columns_in_order() {
		let text = "meaning_2,id,word,part_of_speech,difficulty_score,meaning_1\nb,1,run,verb,3,走る\n";
		let records = parse_records(text).unwrap();
		assert_eq!(
			serde_json::to_string(&records[0]).unwrap(),
			r#"{"id":1,"word":"run","difficulty_score":3,"meaning_2":"b","part_of_speech":"verb","meaning_1":"走る"}"#
		);
	}

	#[test]
	fn empty_input_has_no_records() {
		assert!(parse_records("").unwrap().is_empty());
	}
}
