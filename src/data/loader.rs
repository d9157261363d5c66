use std::collections::VecDeque;
use std::io::ErrorKind;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::error::{LogError, LogResult};

/// The retained window of a log file: trimmed column names and the last
/// rows as raw strings.
#[derive(Debug, Clone, PartialEq)]
pub struct LogTable {
    pub columns: Vec<String>,
    pub column_data: Vec<Vec<String>>, // column-major: column_data[col_idx][row_idx]
    /// Absolute index (0-based, header excluded) of the first retained row.
    pub first_row: usize,
}

impl LogTable {
    pub fn row_count(&self) -> usize {
        self.column_data.first().map_or(0, Vec::len)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Absolute row indices of the retained window.
    pub fn index_column(&self) -> Vec<f64> {
        (self.first_row..self.first_row + self.row_count())
            .map(|i| i as f64)
            .collect()
    }

    /// Values of `name` as f64. Empty cells become NaN; `None` if the column
    /// is missing or holds anything that does not parse as a number.
    pub fn numeric_column(&self, name: &str) -> Option<Vec<f64>> {
        let idx = self.column_index(name)?;
        column_to_f64(&self.column_data[idx])
    }
}

/// Parse a string column strictly. A single malformed cell marks the whole
/// column as non-numeric, usually a sign the writer was caught mid-line.
pub fn column_to_f64(data: &[String]) -> Option<Vec<f64>> {
    data.iter()
        .map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(f64::NAN)
            } else {
                trimmed.parse::<f64>().ok()
            }
        })
        .collect()
}

/// Read a log file and keep its last `max_rows` rows.
///
/// `Ok(None)` means "no data yet": the file is missing, empty, has only a
/// header, or could not be parsed. Other I/O failures are returned as errors.
pub fn read_log(path: &Path, max_rows: usize) -> LogResult<Option<LogTable>> {
    let content = match std::fs::read(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(LogError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    Ok(parse_log(&decode(content), max_rows))
}

/// Parse log text into a table, see [`read_log`].
pub fn parse_log(text: &str, max_rows: usize) -> Option<LogTable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = reader.records();

    let columns: Vec<String> = loop {
        match records.next()? {
            Ok(record) => break record.iter().map(|s| s.trim().to_string()).collect(),
            Err(_) => continue,
        }
    };
    if columns.iter().all(String::is_empty) {
        return None;
    }

    let mut window: VecDeque<Vec<String>> = VecDeque::with_capacity(max_rows.min(4096));
    let mut total_rows = 0usize;
    for result in records {
        let record = match result {
            Ok(record) => record,
            Err(_) => continue,
        };
        // Blank lines come through as a single empty field.
        if record.len() == 1 && record[0].trim().is_empty() {
            continue;
        }
        total_rows += 1;
        if max_rows == 0 {
            continue;
        }
        if window.len() == max_rows {
            window.pop_front();
        }
        window.push_back(record.iter().map(|s| s.to_string()).collect());
    }

    if window.is_empty() {
        return None;
    }

    let mut column_data: Vec<Vec<String>> = vec![Vec::with_capacity(window.len()); columns.len()];
    for row in &window {
        for (col_idx, col_data) in column_data.iter_mut().enumerate() {
            col_data.push(row.get(col_idx).cloned().unwrap_or_default());
        }
    }

    Some(LogTable {
        columns,
        column_data,
        first_row: total_rows - window.len(),
    })
}

/// Blocking variant of [`read_log`]: retry every `retry_interval` until data
/// shows up or `timeout` has elapsed.
pub fn read_log_until(
    path: &Path,
    max_rows: usize,
    timeout: Duration,
    retry_interval: Duration,
) -> LogResult<Option<LogTable>> {
    let start = Instant::now();
    loop {
        if let Some(table) = read_log(path, max_rows)? {
            return Ok(Some(table));
        }
        std::thread::sleep(retry_interval);
        if start.elapsed() > timeout {
            tracing::debug!("No data in {:?} after {:?}", path, timeout);
            return Ok(None);
        }
    }
}

/// Poll until `path` is an existing file.
pub fn wait_for_file(path: &Path, timeout: Duration, poll_interval: Duration) -> LogResult<()> {
    let start = Instant::now();
    while !path.is_file() {
        std::thread::sleep(poll_interval);
        if start.elapsed() > timeout {
            return Err(LogError::FileNotYetPresent {
                path: path.to_path_buf(),
                timeout,
            });
        }
    }
    Ok(())
}

fn decode(content: Vec<u8>) -> String {
    String::from_utf8(content).unwrap_or_else(|e| {
        // Fallback: treat as latin1 (each byte maps to same Unicode code point)
        e.into_bytes().iter().map(|&b| b as char).collect()
    })
}
