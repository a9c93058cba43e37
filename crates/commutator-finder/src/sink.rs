//! Destinations for found commutators.
//!
//! The finder only appends whole lines and, at the start of a run, clears
//! what a previous run wrote. `FileSink` does this on disk; `MemorySink`
//! keeps everything in a map and can be told to fail, which is how the
//! retry path is tested.

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Append-only text storage addressed by name
pub trait ResultSink {
    /// Append `text` to `name`, creating it if needed
    fn append(&mut self, name: &str, text: &str) -> io::Result<()>;

    /// Everything written to `name` so far
    fn read_all(&self, name: &str) -> io::Result<String>;

    /// Forget `name`. Clearing something that does not exist succeeds.
    fn clear(&mut self, name: &str) -> io::Result<()>;
}

/// Files on the local filesystem, named by path
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSink;

impl ResultSink for FileSink {
    fn append(&mut self, name: &str, text: &str) -> io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(name)?;
        file.write_all(text.as_bytes())
    }

    fn read_all(&self, name: &str) -> io::Result<String> {
        fs::read_to_string(name)
    }

    fn clear(&mut self, name: &str) -> io::Result<()> {
        if let Some(parent) = Path::new(name).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(name, "")
    }
}

/// In-memory storage
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    files: HashMap<String, String>,
    failures_left: usize,
    failed_appends: usize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `count` appends fail
    pub fn fail_next_appends(&mut self, count: usize) {
        self.failures_left = count;
    }

    /// Appends rejected so far
    pub fn failed_appends(&self) -> usize {
        self.failed_appends
    }

    /// Names written to, in no particular order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}

impl ResultSink for MemorySink {
    fn append(&mut self, name: &str, text: &str) -> io::Result<()> {
        if self.failures_left > 0 {
            self.failures_left -= 1;
            self.failed_appends += 1;
            return Err(io::Error::other(format!(
                "injected failure writing {name}"
            )));
        }
        self.files.entry(name.to_string()).or_default().push_str(text);
        Ok(())
    }

    fn read_all(&self, name: &str) -> io::Result<String> {
        self.files
            .get(name)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, name.to_string()))
    }

    fn clear(&mut self, name: &str) -> io::Result<()> {
        self.files.remove(name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::process;

    fn temp_path(file: &str) -> String {
        env::temp_dir()
            .join(format!("commfinder-sink-{}-{}", process::id(), file))
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn test_file_sink_round_trip() {
        let path = temp_path("round-trip.txt");
        let mut sink = FileSink;
        sink.clear(&path).unwrap();
        sink.append(&path, "hello").unwrap();
        sink.append(&path, " world\n").unwrap();
        assert_eq!(sink.read_all(&path).unwrap(), "hello world\n");

        sink.clear(&path).unwrap();
        assert_eq!(sink.read_all(&path).unwrap(), "");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_file_sink_missing_file() {
        let sink = FileSink;
        assert!(sink.read_all(&temp_path("never-written.txt")).is_err());
    }

    #[test]
    fn test_file_sink_clear_creates_directories() {
        let dir = temp_path("nested");
        let path = format!("{dir}/inner/out.txt");
        let mut sink = FileSink;
        sink.clear(&path).unwrap();
        assert!(Path::new(&path).exists());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_memory_sink() {
        let mut sink = MemorySink::new();
        assert!(sink.read_all("a").is_err());
        sink.append("a", "1").unwrap();
        sink.append("a", "2").unwrap();
        sink.append("b", "3").unwrap();
        assert_eq!(sink.read_all("a").unwrap(), "12");
        assert_eq!(sink.names().count(), 2);

        sink.clear("a").unwrap();
        sink.clear("missing").unwrap();
        assert!(sink.read_all("a").is_err());
        assert_eq!(sink.read_all("b").unwrap(), "3");
    }

    #[test]
    fn test_memory_sink_injected_failures() {
        let mut sink = MemorySink::new();
        sink.fail_next_appends(2);
        assert!(sink.append("a", "x").is_err());
        assert!(sink.append("a", "x").is_err());
        sink.append("a", "y").unwrap();
        assert_eq!(sink.read_all("a").unwrap(), "y");
        assert_eq!(sink.failed_appends(), 2);
    }
}
