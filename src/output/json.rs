//! Flow profile JSON reader and writer.

use super::{ensure_parent_dir, validate_path};
use crate::parser::schema::FlowProfile;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write `profile` as pretty-printed JSON, creating parent directories
///
/// # Errors
/// * `OutputError::InvalidPath` - empty path, a directory, or an uncreatable parent
/// * `OutputError::WriteFailed` - I/O failure
/// * `OutputError::SerializationFailed` - serde_json failure
pub fn write_profile(profile: &FlowProfile, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    debug!("Writing flow profile to {}", output_path.display());

    validate_path(output_path)?;
    ensure_parent_dir(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, profile).map_err(OutputError::SerializationFailed)?;
    writer.flush().map_err(OutputError::WriteFailed)?;

    info!(
        "Wrote flow profile with {} directories ({} bytes)",
        profile.nodes.len(),
        written_bytes(output_path)
    );

    Ok(())
}

/// Serialize a profile to a pretty JSON string
pub fn profile_to_string(profile: &FlowProfile) -> Result<String, OutputError> {
    serde_json::to_string_pretty(profile).map_err(OutputError::SerializationFailed)
}

fn written_bytes(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Load a flow profile written by `write_profile`
///
/// I/O failures surface as `OutputError::WriteFailed`.
pub fn read_profile(input_path: impl AsRef<Path>) -> Result<FlowProfile, OutputError> {
    let input_path = input_path.as_ref();
    debug!("Reading flow profile from {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;

    let profile: FlowProfile = serde_json::from_reader(std::io::BufReader::new(file))
        .map_err(OutputError::SerializationFailed)?;

    debug!("Profile loaded: version {}, root {}", profile.version, profile.root);

    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::{build_flow_graph, PathRecord};
    use crate::parser::schema::to_profile;
    use crate::utils::config::SCHEMA_VERSION;
    use tempfile::NamedTempFile;

    fn sample_profile() -> FlowProfile {
        let records = vec![
            PathRecord::parse("/data/proj/a", 10.0).unwrap(),
            PathRecord::parse("/data/other", 5.0).unwrap(),
        ];
        let graph = build_flow_graph(&records).unwrap();
        to_profile(&graph, "report.tsv", 1.0, 5)
    }

    #[test]
    fn test_write_and_read_profile() {
        let profile = sample_profile();
        let file = NamedTempFile::new().unwrap();

        write_profile(&profile, file.path()).unwrap();
        let loaded = read_profile(file.path()).unwrap();

        assert_eq!(loaded.version, SCHEMA_VERSION);
        assert_eq!(loaded.root, profile.root);
        assert_eq!(loaded.nodes, profile.nodes);
        assert_eq!(loaded.edges, profile.edges);
    }

    #[test]
    fn test_profile_to_string() {
        let json = profile_to_string(&sample_profile()).unwrap();
        assert!(json.contains("\"root\": \"/data\""));
    }

    #[test]
    fn test_missing_parents_created() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("profiles/lab/storage.json");
        write_profile(&sample_profile(), &target).unwrap();
        assert!(target.is_file());
    }

    #[test]
    fn test_read_invalid_json() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "{not json").unwrap();
        assert!(matches!(
            read_profile(file.path()),
            Err(OutputError::SerializationFailed(_))
        ));
    }
}
