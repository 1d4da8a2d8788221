//! Filename check before joining onto the output directory.

use std::io;

/// Accepts `name` only when it is a single path component: not empty, not
/// `.`/`..`, and free of `/`, `\` and NUL.
pub fn validate_filename(name: &str) -> io::Result<&str> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);
    if bad {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("unusable filename: {:?}", name),
        ));
    }
    Ok(name)
}
