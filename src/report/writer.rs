//! Report output in text, JSON and CSV

use crate::report::SimulationReport;
use crate::simulation::SimulationResult;
use crate::types::OutputFormat;
use std::io::Write;

/// CSV header row
pub const CSV_HEADER: &str = "id,arrival,service_start,service_end,teller";

/// Write `report` to `writer` in `format`
///
/// `Text` and `Csv` list one customer per line in input order. `Json`
/// writes the whole report, teller summaries included.
pub fn write_report<W: Write>(
    report: &SimulationReport,
    format: OutputFormat,
    writer: &mut W,
) -> SimulationResult<()> {
    match format {
        OutputFormat::Text => {
            for record in &report.records {
                writeln!(
                    writer,
                    "{} {} {} {} {}",
                    record.id.value(),
                    record.arrival,
                    record.service_start,
                    record.service_end,
                    record.teller.value()
                )?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, report)?;
            writeln!(writer)?;
        }
        OutputFormat::Csv => {
            writeln!(writer, "{}", CSV_HEADER)?;
            for record in &report.records {
                writeln!(
                    writer,
                    "{},{},{},{},{}",
                    record.id.value(),
                    record.arrival,
                    record.service_start,
                    record.service_end,
                    record.teller.value()
                )?;
            }
        }
    }

    writer.flush()?;
    Ok(())
}

/// Render `report` in `format` to a string
pub fn render_report(report: &SimulationReport, format: OutputFormat) -> SimulationResult<String> {
    let mut buffer = Vec::new();
    write_report(report, format, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
