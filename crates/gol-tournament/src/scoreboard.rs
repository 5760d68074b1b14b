//! CSV scoreboards.

use crate::tournament::TournamentReport;
use gol_core::PopulationCounts;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Quote a field when it contains a delimiter, quote or line break
fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn write_row<W: Write>(w: &mut W, fields: impl IntoIterator<Item = String>) -> io::Result<()> {
    let line: Vec<String> = fields.into_iter().map(|f| csv_field(&f)).collect();
    writeln!(w, "{}", line.join(","))
}

fn write_header<W: Write>(w: &mut W, names: &[String]) -> io::Result<()> {
    write_row(w, std::iter::once(String::new()).chain(names.iter().cloned()))
}

/// `1` where the row player (red) finished with more cells, `0` otherwise,
/// and an empty diagonal. Unplayed matches count as `0`.
pub fn write_results<W: Write>(
    w: &mut W,
    names: &[String],
    results: &[Vec<Option<PopulationCounts>>],
) -> io::Result<()> {
    write_header(w, names)?;
    for (i, row) in results.iter().enumerate() {
        let cells = row.iter().enumerate().map(|(j, counts)| {
            if i == j {
                String::new()
            } else {
                let counts = counts.unwrap_or_default();
                ((counts.red > counts.green) as u8).to_string()
            }
        });
        write_row(w, std::iter::once(names[i].clone()).chain(cells))?;
    }
    Ok(())
}

/// `red-green` final counts for every cell; the diagonal and unplayed
/// matches read `0-0`
pub fn write_scores<W: Write>(
    w: &mut W,
    names: &[String],
    results: &[Vec<Option<PopulationCounts>>],
) -> io::Result<()> {
    write_header(w, names)?;
    for (i, row) in results.iter().enumerate() {
        let cells = row.iter().map(|counts| {
            let counts = counts.unwrap_or_default();
            format!("{}-{}", counts.red, counts.green)
        });
        write_row(w, std::iter::once(names[i].clone()).chain(cells))?;
    }
    Ok(())
}

fn write_file(
    path: &Path,
    write: impl FnOnce(&mut BufWriter<File>) -> io::Result<()>,
) -> io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    write(&mut w)?;
    w.flush()
}

/// Write the four scoreboard files into `dir`
pub fn write_all(dir: &Path, report: &TournamentReport) -> io::Result<()> {
    std::fs::create_dir_all(dir)?;
    let names = &report.names;

    write_file(&dir.join("results.csv"), |w| write_results(w, names, &report.results))?;
    write_file(&dir.join("scores.csv"), |w| write_scores(w, names, &report.results))?;
    write_file(&dir.join("results_reversed.csv"), |w| {
        write_results(w, names, &report.results_reversed)
    })?;
    write_file(&dir.join("scores_reversed.csv"), |w| {
        write_scores(w, names, &report.results_reversed)
    })?;

    info!(dir = %dir.display(), "Scoreboards written");
    Ok(())
}
