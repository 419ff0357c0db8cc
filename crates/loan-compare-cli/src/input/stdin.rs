use serde_json::Value;
use std::io;

/// Piped JSON on stdin, if any. An interactive terminal or a blank pipe
/// gives `None` so the caller falls back to flags.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let piped = io::read_to_string(io::stdin().lock())?;
    match piped.trim() {
        "" => Ok(None),
        body => Ok(Some(serde_json::from_str(body)?)),
    }
}
