//! DMP README metadata.
//!
//! A DMP directory documents itself with a README whose header holds
//! `#FIELD: value` blocks:
//!
//! ```text
//! #OWNER: Jane Doe
//!
//! #DESC: Raw sequencing output, continued
//! on a second line
//!
//! Free-form content...
//!
//! 2024-05-01 10:30: Updated fields in README file.
//! ```
//!
//! A blank line ends a field. Lines starting with a `YYYY-MM-DD HH:MM:`
//! timestamp are change-log entries.

use crate::audit::permission_string;
use crate::utils::config::{LOG_TIMESTAMP_FORMAT, MANDATORY_FIELDS, README_LINE_WIDTH};
use crate::utils::error::MetadataError;
use chrono::{Local, NaiveDateTime};
use log::{debug, warn};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

fn field_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^#([A-Z]+): (.+)$").expect("valid field pattern"))
}

fn log_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}: ").expect("valid log pattern")
    })
}

/// Parsed README contents, independent of any file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadmeContents {
    /// Fields in file order
    pub fields: Vec<(String, String)>,
    pub content: String,
    pub logs: Vec<String>,
}

/// Parse README text into fields, content and log entries
///
/// **Public** - pure parser used by `DmpMetadata::from_path`
pub fn parse_readme(text: &str) -> ReadmeContents {
    let mut parsed = ReadmeContents::default();
    let mut current: Option<(String, Vec<String>)> = None;
    let mut content_lines: Vec<&str> = Vec::new();

    for raw_line in text.lines() {
        let line = raw_line.trim();

        if line.is_empty() {
            if let Some((name, parts)) = current.take() {
                set_field(&mut parsed.fields, name, parts.join(" ").trim().to_string());
                continue;
            }
        }

        if let Some(caps) = field_pattern().captures(line) {
            if let Some((name, parts)) = current.take() {
                set_field(&mut parsed.fields, name, parts.join(" ").trim().to_string());
            }
            current = Some((caps[1].to_string(), vec![caps[2].to_string()]));
        } else if let Some((_, parts)) = current.as_mut() {
            parts.push(line.to_string());
        } else if log_pattern().is_match(line) {
            parsed.logs.push(line.to_string());
        } else {
            content_lines.push(line);
        }
    }

    if let Some((name, parts)) = current.take() {
        set_field(&mut parsed.fields, name, parts.join(" ").trim().to_string());
    }

    parsed.content = content_lines.join("\n").trim().to_string();
    parsed
}

fn set_field(fields: &mut Vec<(String, String)>, name: String, value: String) {
    match fields.iter_mut().find(|(existing, _)| *existing == name) {
        Some(slot) => slot.1 = value,
        None => fields.push((name, value)),
    }
}

/// Metadata of a DMP directory, backed by its README file
#[derive(Debug, Clone)]
pub struct DmpMetadata {
    /// Directory the README documents
    pub path: PathBuf,

    /// README file
    pub readme: PathBuf,

    /// `ls -l` style permission string of the README
    pub permissions: String,

    pub fields: Vec<(String, String)>,
    pub content: String,
    pub logs: Vec<String>,
}

impl DmpMetadata {
    /// Load metadata from a directory or a README file
    ///
    /// For a directory, the first `README*` file in name order is used;
    /// a warning is logged if there are several.
    ///
    /// # Errors
    /// * `MetadataError::NoReadme` - directory has no README
    /// * `MetadataError::NotReadme` - file stem lacks `README`
    /// * `MetadataError::Io` - README cannot be read
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, MetadataError> {
        let path = path.as_ref();
        let readme = if path.is_dir() {
            find_readme(path)?
        } else {
            path.to_path_buf()
        };

        let stem = readme
            .file_stem()
            .map(|s| s.to_string_lossy().to_uppercase())
            .unwrap_or_default();
        if !stem.contains("README") {
            return Err(MetadataError::NotReadme(readme.display().to_string()));
        }

        let stat = std::fs::metadata(&readme)?;
        let text = std::fs::read_to_string(&readme)?;
        let parsed = parse_readme(&text);

        let directory = readme
            .canonicalize()?
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        debug!(
            "Loaded {} fields from {}",
            parsed.fields.len(),
            readme.display()
        );

        Ok(Self {
            path: directory,
            permissions: permission_string(&stat),
            readme,
            fields: parsed.fields,
            content: parsed.content,
            logs: parsed.logs,
        })
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        set_field(&mut self.fields, name.into(), value.into());
    }

    /// Verify every mandatory field is present
    pub fn check_fields(&self) -> Result<(), MetadataError> {
        let missing: Vec<String> = MANDATORY_FIELDS
            .iter()
            .filter(|name| self.field(name).is_none())
            .map(|name| name.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(MetadataError::MissingFields {
                missing,
                readme: self.readme.display().to_string(),
            })
        }
    }

    /// Append a log entry stamped with the current local time
    pub fn log_change(&mut self, description: &str) {
        self.log_change_at(description, Local::now().naive_local());
    }

    pub fn log_change_at(&mut self, description: &str, at: NaiveDateTime) {
        self.logs
            .push(format!("{}: {}", at.format(LOG_TIMESTAMP_FORMAT), description));
    }

    /// README text: wrapped fields, then content, then logs
    pub fn render(&self) -> String {
        let mut out = String::new();

        for (name, value) in &self.fields {
            let line = format!("#{}: {}", name, value);
            if line.len() > README_LINE_WIDTH {
                out.push_str(&wrap_words(&line, README_LINE_WIDTH).join("\n"));
            } else {
                out.push_str(&line);
            }
            out.push_str("\n\n");
        }

        if !self.content.is_empty() {
            out.push('\n');
            out.push_str(&self.content);
        }

        if !self.logs.is_empty() {
            out.push_str("\n\n\n");
            for entry in &self.logs {
                out.push('\n');
                out.push_str(entry);
            }
        }

        out
    }

    /// Write the README back, or to `destination` if given
    ///
    /// # Errors
    /// * `MetadataError::NotWritable` - existing target is read-only
    /// * `MetadataError::Io` - write failure
    pub fn write_to_file(&self, destination: Option<&Path>) -> Result<(), MetadataError> {
        let target = destination.unwrap_or(&self.readme);

        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        if let Ok(stat) = std::fs::metadata(target) {
            if stat.permissions().readonly() {
                return Err(MetadataError::NotWritable {
                    path: target.display().to_string(),
                    permissions: permission_string(&stat),
                });
            }
        }

        std::fs::write(target, self.render())?;
        debug!("Wrote metadata to {}", target.display());
        Ok(())
    }
}

/// Locate the README of a directory
pub fn find_readme(directory: &Path) -> Result<PathBuf, MetadataError> {
    let mut readmes: Vec<PathBuf> = std::fs::read_dir(directory)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| p.is_file())
        .filter(|p| {
            p.file_name()
                .map(|n| n.to_string_lossy().starts_with("README"))
                .unwrap_or(false)
        })
        .collect();
    readmes.sort();

    match readmes.len() {
        0 => Err(MetadataError::NoReadme(directory.display().to_string())),
        1 => Ok(readmes.remove(0)),
        n => {
            warn!(
                "Multiple README files found in {} ({}). Using {}",
                directory.display(),
                n,
                readmes[0].display()
            );
            Ok(readmes.remove(0))
        }
    }
}

/// Split `line` into lines of at most `width` chars without breaking words
fn wrap_words(line: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in line.split_whitespace() {
        if !current.is_empty() && current.len() + word.len() + 1 > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines
}
