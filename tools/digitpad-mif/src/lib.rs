//! Hex dump to memory initialization file (MIF) conversion
//!
//! Input is plain text with one hexadecimal word per line, optionally
//! prefixed with `0x` and a sign. Every line occupies one address, blank
//! lines included; blank lines simply produce no entry. Words of any length
//! are truncated to their low 32 bits, negative ones in two's complement.

#[macro_use]
extern crate tracing;

use anyhow::{bail, Context};
use std::{
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
};

/// Word width of the generated memory
pub const WIDTH: u32 = 32;

/// Extension of files picked up in directory mode
const INPUT_EXTENSION: &str = "mif";

/// Appended to the file stem of converted files in directory mode
const OUTPUT_SUFFIX: &str = "v2";

/// Parse one line into a 32-bit word, `None` for a blank line
fn parse_word(line: &str) -> anyhow::Result<Option<u32>> {
    let text = line.trim();
    if text.is_empty() {
        return Ok(None);
    }

    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let digits = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
        .unwrap_or(unsigned);
    if digits.is_empty() {
        bail!("`{text}` is not a hexadecimal value");
    }

    // Digits shifted past bit 31 fall off
    let mut value: u32 = 0;
    for ch in digits.chars() {
        let digit = ch
            .to_digit(16)
            .with_context(|| format!("`{text}` is not a hexadecimal value"))?;
        value = (value << 4) | digit;
    }

    Ok(Some(if negative { value.wrapping_neg() } else { value }))
}

/// Convert a hex dump into MIF text
pub fn convert(text: &str) -> anyhow::Result<String> {
    let depth = text.lines().count();

    let mut out = String::new();
    writeln!(out, "WIDTH = {WIDTH};")?;
    writeln!(out, "DEPTH = {depth};")?;
    writeln!(out)?;
    writeln!(out, "ADDRESS_RADIX = DEC;")?;
    writeln!(out, "DATA_RADIX = HEX;")?;
    writeln!(out)?;
    writeln!(out, "CONTENT BEGIN")?;

    for (index, line) in text.lines().enumerate() {
        let word = parse_word(line).with_context(|| format!("line {}", index + 1))?;
        if let Some(word) = word {
            writeln!(out, "{index} : {word:08x};")?;
        }
    }

    writeln!(out, "END;")?;
    Ok(out)
}

/// Convert one file
pub fn convert_file(input: &Path, output: &Path) -> anyhow::Result<()> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let mif = convert(&text).with_context(|| format!("failed to convert {}", input.display()))?;
    fs::write(output, mif).with_context(|| format!("failed to write {}", output.display()))?;

    debug!(input = %input.display(), output = %output.display(), "converted");
    Ok(())
}

/// Where directory mode writes the conversion of `input`
pub fn output_path(input: &Path, output_dir: &Path) -> Option<PathBuf> {
    let stem = input.file_stem()?.to_str()?;
    Some(output_dir.join(format!("{stem}{OUTPUT_SUFFIX}.{INPUT_EXTENSION}")))
}

/// Convert every `*.mif` file in `input_dir` into `output_dir`
///
/// A file that fails to convert is logged and skipped. Returns how many
/// files were written.
pub fn convert_dir(input_dir: &Path, output_dir: &Path) -> anyhow::Result<usize> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    let mut inputs = fs::read_dir(input_dir)
        .with_context(|| format!("failed to list {}", input_dir.display()))?
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| path.is_file())
        .filter(|path| path.extension().is_some_and(|ext| ext == INPUT_EXTENSION))
        .collect::<Vec<_>>();
    inputs.sort();

    let mut converted = 0;
    for input in inputs {
        let Some(output) = output_path(&input, output_dir) else {
            warn!(input = %input.display(), "skipping file with unusable name");
            continue;
        };

        match convert_file(&input, &output) {
            Ok(()) => converted += 1,
            Err(error) => warn!(input = %input.display(), "skipping: {error:#}"),
        }
    }

    Ok(converted)
}
