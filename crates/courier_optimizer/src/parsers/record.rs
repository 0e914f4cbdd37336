use crate::error::TableError;

/// Non-blank lines of a table with their 1-based line numbers. A leading
/// byte order mark is dropped.
pub fn lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.strip_prefix('\u{feff}')
        .unwrap_or(text)
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim_end_matches('\r')))
        .filter(|(_, line)| !line.trim().is_empty())
}

/// Splits a comma separated line. A field wrapped in double quotes may
/// contain commas, and `""` inside it stands for one quote.
pub fn split_record(line: &str, line_number: usize) -> Result<Vec<String>, TableError> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if quoted => {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    quoted = false;
                }
            }
            '"' if field.is_empty() => quoted = true,
            ',' if !quoted => fields.push(std::mem::take(&mut field)),
            c => field.push(c),
        }
    }

    if quoted {
        return Err(TableError::MalformedRecord {
            line: line_number,
            reason: String::from("unterminated quoted field"),
        });
    }

    fields.push(field);
    Ok(fields)
}
