//! SQLite vocabulary table

use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::fs;
use std::path::Path;

use crate::core::VocabularyRecord;

const SCHEMA: &str = "
DROP TABLE IF EXISTS vocabulary;
CREATE TABLE vocabulary (
    id INTEGER PRIMARY KEY,
    word TEXT NOT NULL,
    part_of_speech TEXT,
    difficulty_score REAL,
    meaning_1 TEXT,
    meaning_2 TEXT,
    meaning_3 TEXT
);";

/// Recreate the `vocabulary` table and fill it in one transaction.
pub fn write_vocabulary(records: &[VocabularyRecord], path: &Path) -> Result<()> {
	if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
		fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
	}
	let mut conn = Connection::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
	insert_all(&mut conn, records)
}

fn insert_all(conn: &mut Connection, records: &[VocabularyRecord]) -> Result<()> {
	let tx = conn.transaction()?;
	tx.execute_batch(SCHEMA).context("Failed to create vocabulary table")?;
	{
		let mut stmt = tx.prepare(
			"INSERT INTO vocabulary (id, word, part_of_speech, difficulty_score, meaning_1, meaning_2, meaning_3)
			 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
		)?;
		for record in records {
			stmt.execute(params![
				record.id,
				record.word,
				record.text_field("part_of_speech"),
				record.difficulty_score.map(|s| s.value()),
				record.text_field("meaning_1"),
				record.text_field("meaning_2"),
				record.text_field("meaning_3"),
			])
			.with_context(|| format!("Failed to insert '{}'", record.word))?;
		}
	}
	tx.commit()?;
	Ok(())
}
