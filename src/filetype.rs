//! Blob classification and tree entry mode formatting.
//!
//! Binary detection follows git's approach: the first 8KB of a blob are
//! scanned, any NUL byte marks it binary, and otherwise a blob is binary
//! when non-printable bytes outnumber one in every 128 printable ones.

/// Maximum bytes inspected when classifying a blob (git uses 8KB).
const BINARY_CHECK_LEN: usize = 8000;

/// Blob content classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// Text content, rendered line by line
    Text,
    /// Binary content, never emitted into pages
    Binary,
}

/// Classifies blob content as text or binary.
///
/// # Examples
///
/// ```
/// use gitscroll::{FileType, detect_file_type};
///
/// assert_eq!(detect_file_type(b"fn main() {}\n"), FileType::Text);
/// assert_eq!(detect_file_type(b"\x89PNG\r\n\x1a\n\0\0"), FileType::Binary);
/// ```
pub fn detect_file_type(bytes: &[u8]) -> FileType {
    let sample = &bytes[..bytes.len().min(BINARY_CHECK_LEN)];

    if sample.contains(&0) {
        return FileType::Binary;
    }

    let mut printable = 0usize;
    let mut nonprintable = 0usize;
    for &b in sample {
        match b {
            // DEL and the C0 controls other than the usual whitespace
            0x7f => nonprintable += 1,
            b'\n' | b'\r' => {}
            b'\x08' | b'\t' | b'\x0b' | b'\x0c' | 0x1b => printable += 1,
            b if b < 0x20 => nonprintable += 1,
            _ => printable += 1,
        }
    }

    if (printable >> 7) < nonprintable {
        FileType::Binary
    } else {
        FileType::Text
    }
}

/// Returns true if the blob should be treated as binary.
pub fn is_binary(bytes: &[u8]) -> bool {
    detect_file_type(bytes) == FileType::Binary
}

/// Counts lines in text content.
///
/// A final line without a trailing newline still counts.
pub fn count_lines(bytes: &[u8]) -> usize {
    let newlines = bytes.iter().filter(|&&b| b == b'\n').count();
    match bytes.last() {
        Some(b'\n') | None => newlines,
        Some(_) => newlines + 1,
    }
}

/// Formats a git tree entry mode as an `ls -l` style string.
///
/// # Examples
///
/// ```
/// use gitscroll::format_mode;
///
/// assert_eq!(format_mode(0o100644), "-rw-r--r--");
/// assert_eq!(format_mode(0o100755), "-rwxr-xr-x");
/// assert_eq!(format_mode(0o120000), "lrwxrwxrwx");
/// ```
pub fn format_mode(mode: u32) -> String {
    const S_IFMT: u32 = 0o170000;

    let kind = match mode & S_IFMT {
        0o040000 => 'd',
        0o100000 => '-',
        0o120000 => 'l',
        0o160000 => 'm',
        0o020000 => 'c',
        0o060000 => 'b',
        0o010000 => 'p',
        0o140000 => 's',
        _ => '?',
    };

    // Git only stores 644/755 for blobs and zero bits for links
    let perms = match mode & S_IFMT {
        0o120000 => 0o777,
        _ => mode & 0o7777,
    };

    let mut out = String::with_capacity(10);
    out.push(kind);
    for shift in [6, 3, 0] {
        let bits = (perms >> shift) & 0o7;
        out.push(if bits & 0o4 != 0 { 'r' } else { '-' });
        out.push(if bits & 0o2 != 0 { 'w' } else { '-' });
        out.push(if bits & 0o1 != 0 { 'x' } else { '-' });
    }

    if perms & 0o4000 != 0 {
        out.replace_range(3..4, if perms & 0o100 != 0 { "s" } else { "S" });
    }
    if perms & 0o2000 != 0 {
        out.replace_range(6..7, if perms & 0o010 != 0 { "s" } else { "S" });
    }
    if perms & 0o1000 != 0 {
        out.replace_range(9..10, if perms & 0o001 != 0 { "t" } else { "T" });
    }

    out
}
