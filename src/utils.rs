// ABOUTME: Small helpers shared by the ClickHouse reader and logging
// ABOUTME: Identifier quoting for introspection queries and name rendering for logs

/// Quote a ClickHouse identifier with backticks
///
/// Embedded backticks are doubled so names coming back from `SHOW DATABASES`
/// or `SHOW TABLES` can be fed into `SHOW CREATE ...` without breaking out of
/// the quoted identifier.
///
/// # Examples
///
/// ```
/// # use chdump::utils::quote_identifier;
/// assert_eq!(quote_identifier("events"), "`events`");
/// assert_eq!(quote_identifier("we`ird"), "`we``ird`");
/// ```
pub fn quote_identifier(identifier: &str) -> String {
    format!("`{}`", identifier.replace('`', "``"))
}

/// Longest database or table name shown in full in logs and errors
const MAX_DISPLAY_CHARS: usize = 64;

/// Render a database or table name for log lines and error messages
///
/// Inside backticks ClickHouse accepts names with newlines, tabs or NUL, so
/// control characters are shown escaped instead of being printed raw. Names
/// longer than 64 characters are cut and end with `...`. Display only; the
/// dump itself always carries names verbatim.
///
/// # Examples
///
/// ```
/// # use chdump::utils::display_name;
/// assert_eq!(display_name("events"), "events");
/// assert_eq!(display_name("table\nname"), "table\\nname");
/// ```
pub fn display_name(name: &str) -> String {
    let mut shown = String::with_capacity(name.len().min(MAX_DISPLAY_CHARS));
    for (i, c) in name.chars().enumerate() {
        if i == MAX_DISPLAY_CHARS {
            shown.push_str("...");
            break;
        }
        if c.is_control() {
            shown.extend(c.escape_default());
        } else {
            shown.push(c);
        }
    }
    shown
}
