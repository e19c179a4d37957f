//! Hand history as JSON lines: one settled hand per line.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::rules::Action;

/// One action in the order it was taken.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub player_id: usize,
    pub action: Action,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// `YYYYMMDD-NNNNNN`, see [`format_hand_id`]
    pub hand_id: String,
    pub seed: Option<u64>,
    pub dealer_id: usize,
    /// Cards dealt, by seat
    pub hands: Vec<Vec<Card>>,
    pub actions: Vec<ActionRecord>,
    /// Signed chip result per seat; sums to zero
    pub payoffs: Vec<i64>,
    /// Seats with a positive payoff
    pub winners: Vec<usize>,
    /// RFC3339, filled in on write when absent
    #[serde(default)]
    pub ts: Option<String>,
}

pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

/// Writes [`HandRecord`]s to a JSONL file and hands out sequential ids for
/// the day the logger was opened.
pub struct HandLogger {
    out: Option<BufWriter<File>>,
    day: String,
    next_seq: u32,
}

impl HandLogger {
    /// Creates (truncating) `path`, along with any missing parent directories.
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)?,
            _ => {}
        }
        Ok(Self {
            out: Some(BufWriter::new(File::create(path)?)),
            day: Utc::now().format("%Y%m%d").to_string(),
            next_seq: 1,
        })
    }

    /// Id generator pinned to `day`; records written to it go nowhere.
    pub fn with_seq_for_test(day: &str) -> Self {
        Self {
            out: None,
            day: day.to_string(),
            next_seq: 1,
        }
    }

    pub fn next_id(&mut self) -> String {
        let id = format_hand_id(&self.day, self.next_seq);
        self.next_seq += 1;
        id
    }

    /// Appends `record` as one LF-terminated line and flushes.
    pub fn write(&mut self, record: &HandRecord) -> io::Result<()> {
        let Some(out) = self.out.as_mut() else {
            return Ok(());
        };
        let stamped;
        let record = if record.ts.is_some() {
            record
        } else {
            stamped = HandRecord {
                ts: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
                ..record.clone()
            };
            &stamped
        };
        serde_json::to_writer(&mut *out, record).map_err(io::Error::other)?;
        out.write_all(b"\n")?;
        out.flush()
    }
}

/// Reads every record from a JSONL hand history. Blank lines are skipped.
///
/// # Errors
///
/// I/O failures, or `InvalidData` naming the first line that does not parse.
pub fn read_records<P: AsRef<Path>>(path: P) -> io::Result<Vec<HandRecord>> {
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();
    for (n, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, format!("line {}: {}", n + 1, e))
        })?;
        records.push(record);
    }
    Ok(records)
}
