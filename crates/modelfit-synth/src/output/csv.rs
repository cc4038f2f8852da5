use crate::errors::SynthError;

/// Serialize rows as CSV text joined by `\n`, without a trailing newline.
///
/// Fields containing separators or quotes are quoted so the output reads
/// back through the shared row parser unchanged.
pub fn write_csv_string(header: &[String], rows: &[Vec<String>]) -> Result<String, SynthError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush().map_err(csv::Error::from)?;

    let bytes = writer
        .into_inner()
        .map_err(|err| SynthError::Csv(csv::Error::from(err.into_error())))?;
    let mut text = String::from_utf8(bytes).map_err(|err| SynthError::Encoding(err.to_string()))?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}
