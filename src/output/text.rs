//! Human-readable report.
//!
//! ```text
//! Files found: 3
//! Unique: /data/a.txt
//! Duplicate: /data/sub/b.txt (of /data/a.txt)
//! Unique: /data/sub/c.txt
//!
//! 2 unique, 1 duplicate(s), 5 B in duplicates
//! Deleted 1 file(s), freed 5 B
//! ```
//!
//! Unique and duplicate lines are interleaved in enumeration order.

use std::io::{self, Write};

use bytesize::ByteSize;

use crate::duplicates::ScanReport;

/// Write the report to `writer`.
///
/// # Errors
///
/// Returns an I/O error if writing fails.
pub fn write_report<W: Write>(report: &ScanReport, writer: &mut W) -> io::Result<()> {
    let classification = &report.classification;

    writeln!(writer, "Files found: {}", report.total_files)?;

    // Merge the two ordered lists back into walk order for display.
    let mut unique = classification.unique.iter().peekable();
    let mut duplicates = classification.duplicates.iter().peekable();
    loop {
        let take_unique = match (unique.peek(), duplicates.peek()) {
            (Some(u), Some(d)) => u.index < d.file.index,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };

        if take_unique {
            if let Some(file) = unique.next() {
                writeln!(writer, "Unique: {}", file.path.display())?;
            }
        } else if let Some(dup) = duplicates.next() {
            writeln!(
                writer,
                "Duplicate: {} (of {})",
                dup.file.path.display(),
                dup.original.display()
            )?;
        }
    }

    for error in &classification.read_errors {
        writeln!(writer, "Unreadable: {} ({})", error.path().display(), error)?;
    }

    writeln!(writer)?;
    writeln!(
        writer,
        "{} unique, {} duplicate(s), {} in duplicates",
        report.unique_count(),
        report.duplicate_count(),
        ByteSize::b(classification.duplicate_bytes())
    )?;
    if report.read_error_count() > 0 {
        writeln!(writer, "{} file(s) could not be read", report.read_error_count())?;
    }

    let deletion = &report.deletion;
    if deletion.confirmed {
        writeln!(writer, "{}", deletion.summary())?;
        for failure in deletion.failures() {
            writeln!(writer, "  Failed: {}", failure)?;
        }
    }

    Ok(())
}
