use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use chrono::Utc;

enum Sink {
  File(Mutex<std::fs::File>),
  Stderr,
}

pub struct Logger {
  sink: Sink,
}

impl Logger {
  pub fn new(path: &Path) -> anyhow::Result<Self> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(Self {
      sink: Sink::File(Mutex::new(file)),
    })
  }

  pub fn stderr() -> Self {
    Self { sink: Sink::Stderr }
  }

  pub fn from_path(path: Option<&Path>) -> anyhow::Result<Self> {
    match path {
      Some(path) => Self::new(path),
      None => Ok(Self::stderr()),
    }
  }

  pub fn log(&self, level: &str, message: &str) {
    let line = format_line(level, message);
    match &self.sink {
      Sink::File(file) => {
        if let Ok(mut file) = file.lock() {
          let _ = file.write_all(line.as_bytes());
        }
      }
      Sink::Stderr => {
        let _ = std::io::stderr().write_all(line.as_bytes());
      }
    }
  }

  pub fn info(&self, message: &str) {
    self.log("INFO", message);
  }

  pub fn warn(&self, message: &str) {
    self.log("WARN", message);
  }

  pub fn error(&self, message: &str) {
    self.log("ERROR", message);
  }
}

fn format_line(level: &str, message: &str) -> String {
  let ts = Utc::now().to_rfc3339();
  format!("[{ts}] {level}: {message}\n")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn file_logger_appends_lines() {
    let path = std::env::temp_dir().join(format!("cattlescope-log-{}.log", uuid::Uuid::new_v4()));
    let logger = Logger::new(&path).expect("open log");
    logger.info("first");
    logger.warn("second");
    let text = std::fs::read_to_string(&path).expect("read log");
    let _ = std::fs::remove_file(&path);

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("INFO: first"));
    assert!(lines[1].ends_with("WARN: second"));
    assert!(lines[0].starts_with('['));
  }
}
