use std::io::{BufWriter, Write};

use serde::Serialize;

pub(crate) fn export_to_json_impl<T: Serialize + ?Sized>(
    value: &T,
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}
