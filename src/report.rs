//! CSV output for harness measurements.

use std::fs::File;
use std::io;
use std::path::Path;

use crate::harness::Measurement;

/// Write one CSV row per measurement, with a header row.
pub fn write_csv<W: io::Write>(measurements: &[Measurement], writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for m in measurements {
        wtr.serialize(m)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_csv_file(measurements: &[Measurement], path: &Path) -> Result<(), csv::Error> {
    write_csv(measurements, File::create(path)?)
}
