use std::io::Write;
use tempfile::NamedTempFile;

pub const HEADER: &str = "command, payment, amount, method, service, status";

/// Writes a commands CSV (header included) to a temporary file.
pub fn commands_file(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    writeln!(file, "{HEADER}").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file.flush().unwrap();
    file
}

/// Returns the data rows of a payment listing, skipping the header.
#[allow(dead_code)]
pub fn data_rows(stdout: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(stdout)
        .lines()
        .skip(1)
        .map(str::to_string)
        .collect()
}
