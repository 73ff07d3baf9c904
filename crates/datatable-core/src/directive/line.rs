//! Line-level lexing: comment stripping and `instruction: argument` splitting.

/// Strip a trailing `#` comment and unescape `\#`.
///
/// A `#` preceded by `\` is literal, and so is one preceded by `&` so that
/// HTML entities such as `&#39;` survive.
pub(crate) fn strip_comment(line: &str) -> String {
    let mut prev = None;
    let mut end = line.len();

    for (idx, c) in line.char_indices() {
        if c == '#' && !matches!(prev, Some('\\' | '&')) {
            end = idx;
            break;
        }
        prev = Some(c);
    }

    line[..end].replace("\\#", "#")
}

/// Split at the first colon not preceded by `\`.
///
/// Returns the lowercased instruction and the trimmed argument with `\:`
/// unescaped, or `None` when the line has no separator.
pub(crate) fn split_instruction(line: &str) -> Option<(String, String)> {
    let mut prev = None;

    for (idx, c) in line.char_indices() {
        if c == ':' && prev != Some('\\') {
            let instruction = line[..idx].trim().to_lowercase();
            let argument = line[idx + 1..].trim().replace("\\:", ":");

            return Some((instruction, argument));
        }
        prev = Some(c);
    }

    None
}
