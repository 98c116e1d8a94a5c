//! Interactive deletion confirmation.

use std::io::{self, BufRead, Write};

/// Prompt shown before any file is deleted.
pub const PROMPT: &str = "Delete duplicate files? Type YES to confirm: ";

/// Ask the user to authorize deletion.
///
/// Writes [`PROMPT`] to `output` and reads one line from `input`. Only the
/// exact answer `YES` (surrounding whitespace ignored) confirms; anything
/// else, including end of input, declines.
///
/// # Errors
///
/// Returns an I/O error if the prompt cannot be written or the answer
/// cannot be read.
///
/// # Example
///
/// ```
/// use dupclean::confirm::prompt_confirmation;
///
/// let mut out = Vec::new();
/// assert!(prompt_confirmation(&b"YES\n"[..], &mut out).unwrap());
/// assert!(!prompt_confirmation(&b"yes\n"[..], &mut out).unwrap());
/// ```
pub fn prompt_confirmation<R: BufRead, W: Write>(mut input: R, output: &mut W) -> io::Result<bool> {
    output.write_all(PROMPT.as_bytes())?;
    output.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        log::debug!("No confirmation answer (end of input)");
        return Ok(false);
    }

    Ok(answer.trim() == "YES")
}
