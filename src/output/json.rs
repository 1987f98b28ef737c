//! JSON export of scan results

use crate::output::OutputResult;
use crate::result::ScanResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Serializes a result as pretty-printed JSON
pub fn to_json_string(result: &ScanResult) -> OutputResult<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Writes a result as pretty-printed JSON
///
/// # Arguments
///
/// * `result` - The scan result
/// * `output_path` - Destination file; `-` writes to stdout
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the JSON document
/// * `Err(OutputError)` - Failed to serialize or write
pub fn write_json(result: &ScanResult, output_path: &Path) -> OutputResult<()> {
    let mut json = to_json_string(result)?;
    json.push('\n');

    if output_path == Path::new("-") {
        std::io::stdout().write_all(json.as_bytes())?;
    } else {
        let mut file = File::create(output_path)?;
        file.write_all(json.as_bytes())?;
    }

    Ok(())
}
