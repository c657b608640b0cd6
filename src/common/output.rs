use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Write a value as pretty JSON to `writer`, followed by a newline
pub fn write_json<W: Write, T: Serialize>(writer: W, value: &T) -> Result<()> {
    let mut writer = BufWriter::new(writer);
    serde_json::to_writer_pretty(&mut writer, value).context("Failed to serialize output")?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Write a value as pretty JSON to the given path, or stdout when no path is set
pub fn emit_json<T: Serialize>(value: &T, output: Option<&str>) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(Path::new(path))
                .with_context(|| format!("Failed to create output file: {}", path))?;
            write_json(file, value)
        }
        None => write_json(io::stdout().lock(), value),
    }
}
