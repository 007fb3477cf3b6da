//! Two-column text files holding a waveform pair.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result, bail};
use splitwave_pair::WaveformPair;

/// Parses whitespace-separated `x y` rows. Blank lines and anything after a
/// `#` are ignored.
pub fn parse_pair(text: &str, delta: f64) -> Result<WaveformPair> {
    let mut x = Vec::new();
    let mut y = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 2 {
            bail!(
                "line {}: expected 2 columns, found {}",
                lineno + 1,
                fields.len()
            );
        }
        let parse = |s: &str| {
            s.parse::<f64>()
                .with_context(|| format!("line {}: invalid number {s:?}", lineno + 1))
        };
        x.push(parse(fields[0])?);
        y.push(parse(fields[1])?);
    }
    WaveformPair::new(x, y, delta).context("invalid waveform pair")
}

/// Reads a pair from a two-column text file.
pub fn read_pair(path: &Path, delta: f64) -> Result<WaveformPair> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read input file: {}", path.display()))?;
    parse_pair(&text, delta).with_context(|| format!("failed to parse {}", path.display()))
}

/// Renders a pair as two-column text with a comment header.
pub fn format_pair(pair: &WaveformPair, header: &str) -> String {
    let mut out = String::with_capacity(pair.len() * 48);
    for line in header.lines() {
        let _ = writeln!(out, "# {line}");
    }
    for (a, b) in pair.x().iter().zip(pair.y()) {
        let _ = writeln!(out, "{a:.12e} {b:.12e}");
    }
    out
}

/// Writes a pair to a two-column text file.
pub fn write_pair(path: &Path, pair: &WaveformPair, header: &str) -> Result<()> {
    std::fs::write(path, format_pair(pair, header))
        .with_context(|| format!("failed to write output file: {}", path.display()))
}
