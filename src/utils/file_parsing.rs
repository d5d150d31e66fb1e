/// Strips one pair of surrounding double quotes and collapses `""` escapes.
///
/// Fields that are not wrapped in double quotes come back trimmed but
/// otherwise untouched, so apostrophes in names survive.
pub fn unquote(s: &str) -> String {
    let t = s.trim();
    match t.strip_prefix('"').and_then(|inner| inner.strip_suffix('"')) {
        Some(inner) => inner.replace("\"\"", "\""),
        None => t.to_string(),
    }
}

/// Splits one comma-separated record into trimmed, unquoted fields.
///
/// A double quote opens a quoted section only at the start of a field;
/// inside it, commas do not split and `""` stands for a literal quote.
/// A trailing comma yields a final empty field, so blank trailing cells
/// are kept positionally.
pub fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut cur = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    cur.push_str("\"\"");
                } else {
                    in_quotes = false;
                    cur.push(ch);
                }
            } else {
                cur.push(ch);
            }
            continue;
        }
        match ch {
            '"' if cur.trim().is_empty() => {
                in_quotes = true;
                cur.push(ch);
            }
            ',' => {
                fields.push(unquote(&cur));
                cur.clear();
            }
            _ => cur.push(ch),
        }
    }
    fields.push(unquote(&cur));
    fields
}
