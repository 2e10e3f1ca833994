// ABOUTME: DDL rewriting and statement emission for the cluster script
// ABOUTME: Adds IF NOT EXISTS guards and injects ON CLUSTER after the first line

use std::io::{self, Write};

/// Line written after every statement terminator
pub const SEPARATOR: &str = "----------------------------------------";

const TABLE_REWRITES: [(&str, &str); 3] = [
    ("CREATE TABLE", "CREATE TABLE IF NOT EXISTS"),
    ("CREATE VIEW", "CREATE VIEW IF NOT EXISTS"),
    (
        "CREATE MATERIALIZED VIEW",
        "CREATE MATERIALIZED VIEW IF NOT EXISTS",
    ),
];

/// Make a `SHOW CREATE DATABASE` statement idempotent
///
/// Only the first `CREATE DATABASE` is rewritten; anything later in the text
/// (comments, engine arguments) is left untouched.
///
/// # Examples
///
/// ```
/// # use chdump::ddl::guard_database_ddl;
/// assert_eq!(
///     guard_database_ddl("CREATE DATABASE a\nENGINE = Atomic"),
///     "CREATE DATABASE IF NOT EXISTS a\nENGINE = Atomic"
/// );
/// ```
pub fn guard_database_ddl(ddl: &str) -> String {
    ddl.replacen("CREATE DATABASE", "CREATE DATABASE IF NOT EXISTS", 1)
}

/// Make a `SHOW CREATE TABLE` statement idempotent
///
/// Tries the TABLE, VIEW and MATERIALIZED VIEW rewrites in that order, each on
/// its first occurrence only. A statement starts with exactly one of those
/// keywords so at most one rewrite changes anything.
///
/// # Examples
///
/// ```
/// # use chdump::ddl::guard_table_ddl;
/// assert_eq!(
///     guard_table_ddl("CREATE MATERIALIZED VIEW db.mv TO db.t AS SELECT 1"),
///     "CREATE MATERIALIZED VIEW IF NOT EXISTS db.mv TO db.t AS SELECT 1"
/// );
/// ```
pub fn guard_table_ddl(ddl: &str) -> String {
    TABLE_REWRITES
        .iter()
        .fold(ddl.to_string(), |acc, (from, to)| acc.replacen(from, to, 1))
}

/// Write one CREATE statement followed by its terminator block
///
/// One trailing newline is trimmed before splitting into lines. The
/// `ON CLUSTER` clause goes right after the first line, which keeps it ahead
/// of column lists, engine clauses and `AS SELECT` bodies.
pub fn write_statement<W: Write>(out: &mut W, ddl: &str, cluster_name: &str) -> io::Result<()> {
    let body = ddl.strip_suffix('\n').unwrap_or(ddl);

    for (i, line) in body.split('\n').enumerate() {
        writeln!(out, "{}", line)?;
        if i == 0 {
            writeln!(out, "ON CLUSTER {}", cluster_name)?;
        }
    }

    write!(out, "\n;\n{}\n", SEPARATOR)
}

/// Write the `USE <database>` statement that scopes the tables following it
pub fn write_use<W: Write>(out: &mut W, database: &str) -> io::Result<()> {
    write!(out, "USE {}\n;\n{}\n", database, SEPARATOR)
}
