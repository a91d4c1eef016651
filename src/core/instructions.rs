use crate::config::DEFAULT_INPUT;
use std::io::{self, Write};

/// Writes the manual staging steps for the input spreadsheet.
pub fn write_instructions<W: Write>(out: &mut W) -> io::Result<()> {
    let rule = "=".repeat(80);
    writeln!(out, "{}", rule)?;
    writeln!(out, "EXCEL IMPORT INSTRUCTIONS")?;
    writeln!(out, "{}", rule)?;
    writeln!(out)?;
    writeln!(out, "To import the projects from your Excel file:")?;
    writeln!(out)?;
    writeln!(out, "1. Export the project list as a spreadsheet with one header row")?;
    writeln!(out, "2. Column names must match the database fields of the projects table")?;
    writeln!(out)?;
    writeln!(out, "NEXT STEPS:")?;
    writeln!(out, "-----------")?;
    writeln!(out, "Please save the Excel file '{}' to:", DEFAULT_INPUT)?;
    writeln!(out, "  the directory you run project-importer from")?;
    writeln!(out)?;
    writeln!(out, "Then:")?;
    writeln!(out, "  - preview-import      checks every row without sending anything")?;
    writeln!(out, "  - project-importer    inserts each row and writes failures to import_errors.json")?;
    writeln!(out)?;
    writeln!(out, "{}", rule)?;
    Ok(())
}
