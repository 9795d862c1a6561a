//! Shared utilities for commands

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};
use owo_colors::OwoColorize;
use std::fs;
use std::io::{self, BufRead, Write};

/// Table with the panel's standard look
pub fn table<I, S>(header: I) -> Table
where
    I: IntoIterator<Item = S>,
    S: Into<Cell>,
{
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.into_iter().map(Into::into).collect::<Vec<Cell>>());
    table
}

/// Footer for list pages, mirroring "Showing N of M"
pub fn count_line(shown: usize, total: usize, noun: &str) -> String {
    if shown < total {
        format!("Showing {} of {} {}", shown, total, noun)
    } else {
        format!("{} {} found", total, noun)
    }
}

/// Ask a yes/no question; `yes` skips the prompt
pub fn confirm(question: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    print!("{} (y/N) ", question);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;

    if input.trim().eq_ignore_ascii_case("y") {
        Ok(true)
    } else {
        println!("Aborted.");
        Ok(false)
    }
}

/// Read one line from stdin after printing `label`
pub fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Value from the command line, or prompt for it
pub fn arg_or_prompt(value: Option<String>, label: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => prompt(label),
    }
}

pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Write to a file, or print when no path is given
pub fn write_output(content: &str, output: Option<&str>) -> Result<()> {
    if let Some(path) = output {
        fs::write(path, content).with_context(|| format!("Failed to write: {}", path))?;
        println!("Exported to: {}", path);
    } else {
        print!("{}", content);
    }
    Ok(())
}

/// Shorten an optional value for a table cell
pub fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_line() {
        assert_eq!(count_line(3, 3, "orders"), "3 orders found");
        assert_eq!(count_line(2, 5, "orders"), "Showing 2 of 5 orders");
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(None), "-");
        assert_eq!(or_dash(Some("")), "-");
        assert_eq!(or_dash(Some("COD")), "COD");
    }

    #[test]
    fn test_write_output_to_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        write_output("a,b\r\n", Some(path.to_str().unwrap())).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "a,b\r\n");
    }

    #[test]
    fn test_table_has_header() {
        let rendered = table(["ID", "Name"]).to_string();
        assert!(rendered.contains("ID"));
        assert!(rendered.contains("Name"));
    }
}
