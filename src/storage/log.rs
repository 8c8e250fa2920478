//! Append-only JSONL embedding log
//!
//! Lines are only ever appended. Reading back is lenient: blank or malformed
//! lines are skipped so a torn write never blocks resumption.

use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::core::EmbeddingRecord;
use crate::error::Result;

/// Ids already present in a log
#[derive(Debug, Default)]
pub struct ResumeSet {
	ids: HashSet<i64>,
	malformed: usize,
}

impl ResumeSet {
	pub fn contains(&self, id: i64) -> bool {
		self.ids.contains(&id)
	}

	pub fn len(&self) -> usize {
		self.ids.len()
	}

	pub fn is_empty(&self) -> bool {
		self.ids.is_empty()
	}

	/// Number of lines that could not be parsed.
	pub fn malformed(&self) -> usize {
		self.malformed
	}
}

/// Collect ids from every parseable line.
///
/// Lines are read as raw bytes so a record torn mid character counts as
/// malformed instead of failing the whole read.
pub fn read_ids<R: BufRead>(reader: R) -> io::Result<ResumeSet> {
	let mut set = ResumeSet::default();
	for_each_line(reader, |line| match serde_json::from_slice::<Value>(line) {
		Ok(value) => {
			if let Some(id) = value.get("id").and_then(Value::as_i64) {
				set.ids.insert(id);
			}
		}
		Err(_) => set.malformed += 1,
	})?;
	Ok(set)
}

fn for_each_line<R: BufRead>(mut reader: R, mut f: impl FnMut(&[u8])) -> io::Result<()> {
	let mut buf = Vec::new();
	loop {
		buf.clear();
		if reader.read_until(b'\n', &mut buf)? == 0 {
			return Ok(());
		}
		if buf.iter().all(u8::is_ascii_whitespace) {
			continue;
		}
		f(&buf);
	}
}

/// True when the file has content that does not end in a newline.
fn has_torn_tail(path: &Path) -> io::Result<bool> {
	let mut file = match File::open(path) {
		Ok(file) => file,
		Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
		Err(e) => return Err(e),
	};
	if file.metadata()?.len() == 0 {
		return Ok(false);
	}
	file.seek(SeekFrom::End(-1))?;
	let mut last = [0u8; 1];
	file.read_exact(&mut last)?;
	Ok(last[0] != b'\n')
}

/// Writer half of the log, opened in append mode
pub struct EmbeddingLog {
	path: PathBuf,
	writer: BufWriter<File>,
}

impl EmbeddingLog {
	pub fn open(path: &Path) -> Result<Self> {
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent)?;
		}
		let torn = has_torn_tail(path)?;
		let file = OpenOptions::new().create(true).append(true).open(path)?;
		let mut writer = BufWriter::new(file);
		// terminate a partial line left by an interrupted run so the next
		// record starts on its own line
		if torn {
			writer.write_all(b"\n")?;
			writer.flush()?;
		}
		Ok(Self {
			path: path.to_path_buf(),
			writer,
		})
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Ids already written, including lines appended through this handle.
	pub fn resume_set(&mut self) -> Result<ResumeSet> {
		self.writer.flush()?;
		let file = File::open(&self.path)?;
		Ok(read_ids(BufReader::new(file))?)
	}

	/// Append one batch and push it to disk before returning.
	pub fn append_batch(&mut self, records: &[EmbeddingRecord]) -> Result<()> {
		for record in records {
			serde_json::to_writer(&mut self.writer, record)?;
			self.writer.write_all(b"\n")?;
		}
		self.writer.flush()?;
		self.writer.get_ref().sync_data()?;
		Ok(())
	}
}

/// Read every well-formed record of a log; missing file reads as empty.
pub fn load_records(path: &Path) -> Result<Vec<EmbeddingRecord>> {
	if !path.exists() {
		return Ok(Vec::new());
	}
	let reader = BufReader::new(File::open(path)?);
	let mut records = Vec::new();
	for_each_line(reader, |line| {
		if let Ok(record) = serde_json::from_slice::<EmbeddingRecord>(line) {
			records.push(record);
		}
	})?;
	Ok(records)
}
