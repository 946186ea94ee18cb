//! Benchmark summaries: fixed-width table, CSV and JSON.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{ArboraError, Result};

use super::runner::TestResult;

/// Header line of the CSV report
pub const CSV_HEADER: &str = "Structure,Operation,Data_Size,Execution_Time_ms,Rotations,Key_Comparisons,Insertion_Fixups,Deletion_Fixups,Search_Depth,Nodes_Visited,Color_Changes";

/// Fixed-width summary of time, rotations and comparisons per row
pub fn summary_table(results: &[TestResult]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<20}{:<12}{:<10}{:<15}{:<12}{:<15}",
        "Structure", "Operation", "Size", "Time (ms)", "Rotations", "Comparisons"
    );
    let _ = writeln!(out, "{}", "-".repeat(84));
    for r in results {
        let _ = writeln!(
            out,
            "{:<20}{:<12}{:<10}{:<15.3}{:<12}{:<15}",
            r.structure_name,
            r.operation.as_str(),
            r.data_size,
            r.stats.execution_time_ms,
            r.stats.rotations,
            r.stats.key_comparisons
        );
    }
    out
}

/// Write the CSV report, header first
pub fn write_csv<W: Write>(results: &[TestResult], mut writer: W) -> Result<()> {
    writeln!(writer, "{}", CSV_HEADER)?;
    for r in results {
        let s = &r.stats;
        writeln!(
            writer,
            "{},{},{},{},{},{},{},{},{},{},{}",
            r.structure_name,
            r.operation,
            r.data_size,
            s.execution_time_ms,
            s.rotations,
            s.key_comparisons,
            s.insertion_fixups,
            s.deletion_fixups,
            s.search_depth,
            s.nodes_visited,
            s.color_changes
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the CSV report to `path`
pub fn save_csv<P: AsRef<Path>>(results: &[TestResult], path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_csv(results, BufWriter::new(file))?;
    log::info!("wrote {} rows to {}", results.len(), path.display());
    Ok(())
}

/// Results as pretty-printed JSON
pub fn to_json(results: &[TestResult]) -> Result<String> {
    serde_json::to_string_pretty(results)
        .map_err(|e| ArboraError::invalid_data(format!("Failed to serialize results: {}", e)))
}
