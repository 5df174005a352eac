use anyhow::{Context, Result};
use linkmark_engine::{
    MarkdownPattern,
    markdown::{fragments_to_markup, split_fragments},
    markup::escape_text,
};
use std::{
    io::{BufRead, Write},
    path::Path,
};

/// Converts one line of text to markup. With conversion disabled the line
/// is only escaped.
pub fn convert_line(line: &str, pattern: Option<&MarkdownPattern>) -> String {
    match pattern {
        Some(pattern) => fragments_to_markup(&split_fragments(line, pattern)),
        None => escape_text(line).into_owned(),
    }
}

/// Converts every line of `input` and writes the markup to `out`.
pub fn convert_lines(
    input: impl BufRead,
    out: &mut impl Write,
    pattern: Option<&MarkdownPattern>,
) -> Result<usize> {
    let mut count = 0;
    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        writeln!(out, "{}", convert_line(&line, pattern))?;
        count += 1;
    }
    Ok(count)
}

/// Converts `file`, or stdin when no file is given, to stdout.
pub fn run(file: Option<&Path>, pattern: Option<&MarkdownPattern>) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let count = match file {
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            convert_lines(std::io::BufReader::new(file), &mut out, pattern)?
        }
        None => convert_lines(std::io::stdin().lock(), &mut out, pattern)?,
    };
    log::info!("converted {count} lines");
    Ok(())
}
