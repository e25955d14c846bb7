// STD Dependencies -----------------------------------------------------------
use std::fmt;
use std::fs::{self, File};
use std::io::{Error as IOError, Read, Write};
use std::path::{Path, PathBuf};


// External Dependencies ------------------------------------------------------
use colored::Colorize;


// Errors ---------------------------------------------------------------------
#[derive(Debug)]
pub struct FileError {
    pub io: IOError,
    pub path: PathBuf
}

impl FileError {
    pub fn new(path: &Path, io: IOError) -> Self {
        Self {
            io,
            path: path.to_path_buf()
        }
    }
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "File \"{}\": {}", self.path.display(), self.io)
    }
}

impl std::error::Error for FileError {}


// Logging --------------------------------------------------------------------
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum Verbosity {
    Quiet,
    ErrorsOnly,
    Standard,
    Verbose
}

impl Default for Verbosity {
    fn default() -> Self {
        Verbosity::Standard
    }
}

pub struct Logger {
    verbosity: Verbosity,
    output: Vec<String>
}

impl Logger {

    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            verbosity: Verbosity::Standard,
            output: Vec::new()
        }
    }

    pub fn format_error<S: Into<String>>(s: S) -> String {
        format!("       {} {}", "Error".bright_red(), s.into())
    }

    pub fn set_verbosity(&mut self, verbosity: Verbosity) {
        self.verbosity = verbosity;
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    pub fn log<S: Into<String>>(&mut self, s: S) {
        if self.verbosity >= Verbosity::Standard {
            self.output.push(s.into());
        }
    }

    pub fn warning<S: Into<String>>(&mut self, s: S) {
        if self.verbosity >= Verbosity::Standard {
            self.output.push(format!("     {} {}", "Warning".bright_yellow(), s.into()));
        }
    }

    pub fn info<S: Into<String>>(&mut self, s: S) {
        if self.verbosity >= Verbosity::Standard {
            self.output.push(format!("        {} {}", "Info".bright_blue(), s.into()));
        }
    }

    pub fn verbose<S: Into<String>>(&mut self, s: S) {
        if self.verbosity >= Verbosity::Verbose {
            self.output.push(format!("     {} {}", "Verbose".bright_black(), s.into()));
        }
    }

    pub fn status<S: Into<String>, U: Into<String>>(&mut self, s: S, m: U) {
        if self.verbosity >= Verbosity::Standard {
            self.output.push(format!("{: >12} {}", s.into().bright_green(), m.into()));
        }
    }

    pub fn flush(&mut self) {
        if !self.output.is_empty() {
            println!("{}", self);
        }
        self.output.clear();
    }

    pub fn error<S: Into<String>>(&mut self, s: S) {
        self.flush();
        if self.verbosity >= Verbosity::ErrorsOnly {
            eprintln!("{}", s.into());
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.output
    }
}

impl fmt::Display for Logger {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.output.join("\n"))
    }
}


// File Access ----------------------------------------------------------------
pub trait FileReader {
    fn read_file(&self, path: &Path) -> Result<String, FileError>;
    fn read_binary_file(&self, path: &Path) -> Result<Vec<u8>, FileError>;

    fn file_exists(&self, path: &Path) -> bool;
}

pub trait FileWriter {
    fn write_file(&mut self, path: &Path, data: String) -> Result<(), FileError> {
        self.write_binary_file(path, data.into_bytes())
    }

    fn write_binary_file(&mut self, path: &Path, data: Vec<u8>) -> Result<(), FileError>;
}

/// Reads and writes directly on the local file system.
///
/// Writes go to a temporary sibling first and are then renamed over the
/// target so a failed write never leaves a truncated file behind.
#[derive(Debug, Default)]
pub struct DiskFiles;

impl DiskFiles {
    fn temporary_path(path: &Path) -> PathBuf {
        let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        path.with_file_name(name)
    }
}

impl FileReader for DiskFiles {
    fn read_file(&self, path: &Path) -> Result<String, FileError> {
        let mut text = String::new();
        let mut file = File::open(path).map_err(|e| FileError::new(path, e))?;
        file.read_to_string(&mut text).map_err(|e| FileError::new(path, e))?;
        Ok(text)
    }

    fn read_binary_file(&self, path: &Path) -> Result<Vec<u8>, FileError> {
        fs::read(path).map_err(|e| FileError::new(path, e))
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

impl FileWriter for DiskFiles {
    fn write_binary_file(&mut self, path: &Path, data: Vec<u8>) -> Result<(), FileError> {
        let temp = Self::temporary_path(path);
        let written = File::create(&temp).and_then(|mut file| {
            file.write_all(&data)?;
            file.sync_all()
        });
        if let Err(err) = written {
            fs::remove_file(&temp).ok();
            return Err(FileError::new(path, err));
        }
        fs::rename(&temp, path).map_err(|e| {
            fs::remove_file(&temp).ok();
            FileError::new(path, e)
        })
    }
}
