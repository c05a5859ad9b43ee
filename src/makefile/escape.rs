//! Shell escaping for Makefile recipe lines.

/// Escape a single word for a POSIX shell.
///
/// Every character outside `[A-Za-z0-9_\-.,:+/@\n]` gets a backslash, a
/// newline is wrapped in single quotes, and the empty string becomes `''`.
pub fn shell_escape(word: &str) -> String {
    if word.is_empty() {
        return "''".to_string();
    }

    let mut escaped = String::with_capacity(word.len() * 2);
    for c in word.chars() {
        match c {
            '\n' => escaped.push_str("'\n'"),
            c if c.is_ascii_alphanumeric() || "_-.,:+/@".contains(c) => escaped.push(c),
            c => {
                escaped.push('\\');
                escaped.push(c);
            }
        }
    }
    escaped
}

/// Escape each word of a command line for use in a Makefile recipe.
///
/// `=` needs no escaping in a recipe, so escaped `\=` sequences are
/// restored to keep flags like `--cfg=foo` readable.
pub fn escape_words<S: AsRef<str>>(words: &[S]) -> Vec<String> {
    words
        .iter()
        .map(|w| shell_escape(w.as_ref()).replace("\\=", "="))
        .collect()
}

/// Join words into one escaped command line.
pub fn shell_join<S: AsRef<str>>(words: &[S]) -> String {
    escape_words(words).join(" ")
}
