//! Text table output: one row per channel, then the digital port row

use crate::channels::{ChannelSeries, DigitalPortSeries};
use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

const SEPARATOR: &str = ", ";

/// Write the table to a file, creating or truncating it
pub fn write_table<P: AsRef<Path>>(
    channels: &[ChannelSeries],
    port: &DigitalPortSeries,
    path: P,
) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let mut writer = BufWriter::new(file);
    write_table_to(&mut writer, channels, port).map_err(|e| match e {
        Error::Io { source, .. } => Error::io(path, source),
        other => other,
    })?;
    writer.flush().map_err(|e| Error::io(path, e))?;
    debug!("Wrote {} rows to '{}'", channels.len() + 1, path.display());
    Ok(())
}

/// Write the table to any writer
pub fn write_table_to<W: Write>(
    writer: &mut W,
    channels: &[ChannelSeries],
    port: &DigitalPortSeries,
) -> Result<()> {
    check_lengths(channels, port)?;

    for series in channels {
        write_row(writer, series.samples.iter().map(|value| format!("{value:.6}")))?;
    }
    write_row(writer, port.samples().iter().map(u8::to_string))?;
    Ok(())
}

fn check_lengths(channels: &[ChannelSeries], port: &DigitalPortSeries) -> Result<()> {
    let expected = channels.first().map_or(port.len(), ChannelSeries::len);
    let rows = channels
        .iter()
        .map(|series| (series.channel, series.len()))
        .chain(std::iter::once((channels.len(), port.len())));

    for (channel, actual) in rows {
        if actual != expected {
            return Err(Error::LengthMismatch {
                channel,
                expected,
                actual,
            });
        }
    }
    Ok(())
}

fn write_row<W, I>(writer: &mut W, fields: I) -> Result<()>
where
    W: Write,
    I: Iterator<Item = String>,
{
    let io = |e: std::io::Error| Error::io("<table>", e);
    for (index, field) in fields.enumerate() {
        if index > 0 {
            writer.write_all(SEPARATOR.as_bytes()).map_err(io)?;
        }
        writer.write_all(field.as_bytes()).map_err(io)?;
    }
    writer.write_all(b"\n").map_err(io)
}
