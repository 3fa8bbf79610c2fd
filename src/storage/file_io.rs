//! File I/O utilities with atomic writes
//!
//! Whole-file JSON documents are replaced atomically (temp file, fsync,
//! rename). Append-only logs use one JSON document per line.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::FinanceError;

fn storage_error(action: &str, path: &Path, err: impl std::fmt::Display) -> FinanceError {
    FinanceError::Storage(format!("Failed to {} {}: {}", action, path.display(), err))
}

/// Read a JSON document; a missing file reads as `T::default()`
pub fn read_json<T, P>(path: P) -> Result<T, FinanceError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path).map_err(|e| storage_error("open", path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| storage_error("parse", path, e))
}

/// Replace a JSON document atomically
///
/// The document is written to a sibling temp file, synced, then renamed over
/// the target.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), FinanceError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| storage_error("create directory", parent, e))?;
    }

    let temp_path = path.with_extension("json.tmp");
    let file = File::create(&temp_path).map_err(|e| storage_error("create", &temp_path, e))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| storage_error("serialize", path, e))?;
    writer
        .flush()
        .and_then(|_| writer.get_ref().sync_all())
        .map_err(|e| storage_error("sync", &temp_path, e))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        storage_error("replace", path, e)
    })
}

/// Append one value as a JSON line, flushing immediately
pub fn append_json_line<T, P>(path: P, value: &T) -> Result<(), FinanceError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| FinanceError::Io(format!("Failed to open {}: {}", path.display(), e)))?;

    let json = serde_json::to_string(value)
        .map_err(|e| FinanceError::Json(format!("Failed to serialize entry: {}", e)))?;

    writeln!(file, "{}", json)
        .map_err(|e| FinanceError::Io(format!("Failed to write entry: {}", e)))?;

    file.flush()
        .map_err(|e| FinanceError::Io(format!("Failed to flush {}: {}", path.display(), e)))?;

    Ok(())
}

/// Read every JSON line of a file, skipping blank lines
///
/// A missing file reads as empty.
pub fn read_json_lines<T, P>(path: P) -> Result<Vec<T>, FinanceError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)
        .map_err(|e| FinanceError::Io(format!("Failed to open {}: {}", path.display(), e)))?;

    let mut values = Vec::new();
    for (line_num, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| {
            FinanceError::Io(format!("Failed to read line {}: {}", line_num + 1, e))
        })?;

        if line.trim().is_empty() {
            continue;
        }

        let value = serde_json::from_str(&line).map_err(|e| {
            FinanceError::Json(format!(
                "Failed to parse {} at line {}: {}",
                path.display(),
                line_num + 1,
                e
            ))
        })?;
        values.push(value);
    }

    Ok(values)
}

/// Bytes read per step when walking a file backwards
const REVERSE_CHUNK: usize = 8 * 1024;

/// Visit JSON lines from the end of the file towards the start
///
/// The file is read in chunks from the end, so only the tail that `visit`
/// asks for is parsed. `visit` returns `false` to stop. Blank lines are
/// skipped and a missing file visits nothing.
pub fn visit_json_lines_rev<T, P, F>(path: P, mut visit: F) -> Result<(), FinanceError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
    F: FnMut(T) -> bool,
{
    let path = path.as_ref();
    if !path.exists() {
        return Ok(());
    }

    let io_error = |e: std::io::Error| {
        FinanceError::Io(format!("Failed to read {}: {}", path.display(), e))
    };
    let mut emit = |line: &[u8]| -> Result<bool, FinanceError> {
        let text = String::from_utf8_lossy(line);
        let text = text.trim();
        if text.is_empty() {
            return Ok(true);
        }
        let value = serde_json::from_str(text).map_err(|e| {
            FinanceError::Json(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        Ok(visit(value))
    };

    let mut file = File::open(path).map_err(io_error)?;
    let mut pos = file.seek(SeekFrom::End(0)).map_err(io_error)?;
    // Start of a line whose beginning lies in an earlier chunk
    let mut partial: Vec<u8> = Vec::new();

    while pos > 0 {
        let len = REVERSE_CHUNK.min(pos as usize);
        pos -= len as u64;

        let mut buf = vec![0u8; len];
        file.seek(SeekFrom::Start(pos)).map_err(io_error)?;
        file.read_exact(&mut buf).map_err(io_error)?;
        buf.extend_from_slice(&partial);

        match buf.iter().position(|&b| b == b'\n') {
            Some(first_newline) => {
                for line in buf[first_newline + 1..].split(|&b| b == b'\n').rev() {
                    if !emit(line)? {
                        return Ok(());
                    }
                }
                buf.truncate(first_newline);
                partial = buf;
            }
            None => partial = buf,
        }
    }

    emit(&partial)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct TestData {
        name: String,
        value: i32,
    }

    #[test]
    fn test_read_nonexistent_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nonexistent.json");

        let data: TestData = read_json(&path).unwrap();
        assert_eq!(data, TestData::default());
    }

    #[test]
    fn test_atomic_write_creates_dirs_and_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("test.json");

        let data = TestData {
            name: "test".to_string(),
            value: 42,
        };

        write_json_atomic(&path, &data).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
        let loaded: TestData = read_json(&path).unwrap();
        assert_eq!(data, loaded);
    }

    #[test]
    fn test_corrupt_file_is_a_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "not json at all").unwrap();

        let err = read_json::<TestData, _>(&path).unwrap_err();
        assert!(matches!(err, FinanceError::Storage(_)));
    }

    #[test]
    fn test_visit_lines_backwards_across_chunks() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("log.jsonl");

        let mut count = 0;
        visit_json_lines_rev(&path, |_: TestData| {
            count += 1;
            true
        })
        .unwrap();
        assert_eq!(count, 0);

        // Long names push the file well past one chunk
        for i in 0..500 {
            append_json_line(
                &path,
                &TestData {
                    name: format!("{}{}", "x".repeat(40), i),
                    value: i,
                },
            )
            .unwrap();
        }

        let mut all = Vec::new();
        visit_json_lines_rev(&path, |d: TestData| {
            all.push(d.value);
            true
        })
        .unwrap();
        assert_eq!(all, (0..500).rev().collect::<Vec<_>>());

        let mut tail = Vec::new();
        visit_json_lines_rev(&path, |d: TestData| {
            tail.push(d.value);
            tail.len() < 3
        })
        .unwrap();
        assert_eq!(tail, vec![499, 498, 497]);
    }

    #[test]
    fn test_json_lines_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("log.jsonl");

        assert!(read_json_lines::<TestData, _>(&path).unwrap().is_empty());

        for i in 0..3 {
            append_json_line(
                &path,
                &TestData {
                    name: format!("entry {}", i),
                    value: i,
                },
            )
            .unwrap();
        }
        fs::OpenOptions::new()
            .append(true)
            .open(&path)
            .unwrap()
            .write_all(b"\n")
            .unwrap();

        let values: Vec<TestData> = read_json_lines(&path).unwrap();
        assert_eq!(values.len(), 3);
        assert_eq!(values[2].value, 2);
    }
}
