use anyhow::{Context, Result, anyhow};

pub(crate) fn into_string(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|error| anyhow!("flush csv writer: {error}"))?;
    String::from_utf8(bytes).context("csv output is not utf-8")
}
