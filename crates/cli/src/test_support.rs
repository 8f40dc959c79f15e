use std::borrow::Cow;
use std::io::Write;

use tempfile::NamedTempFile;

pub fn write_json(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write json");
    file
}

pub fn strip_ansi(input: &str) -> Cow<'_, str> {
    if !input.contains('\u{1b}') {
        return Cow::Borrowed(input);
    }

    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            chars.by_ref().find(|next| *next == 'm');
        } else {
            result.push(ch);
        }
    }
    Cow::Owned(result)
}
