//! Script command parser
//!
//! One command per line: `put <key> <value>`, `get <key>`, `peek <key>`,
//! `order`, `len`, `stats`. Blank lines and `#` comments are skipped.

/// A parsed script command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// put <key> <value>
    Put(i64, i64),
    /// get <key>
    Get(i64),
    /// peek <key>
    Peek(i64),
    /// order
    Order,
    /// len
    Len,
    /// stats
    Stats,
}

impl Command {
    /// Parse one script line; `Ok(None)` for blank and comment lines
    pub fn parse(line: &str) -> Result<Option<Command>, String> {
        let line = match line.split_once('#') {
            Some((code, _comment)) => code,
            None => line,
        };

        let mut parts = line.split_whitespace();
        let verb = match parts.next() {
            Some(verb) => verb.to_lowercase(),
            None => return Ok(None),
        };
        let args: Vec<&str> = parts.collect();

        let command = match verb.as_str() {
            "put" => {
                expect_args("put", &args, 2)?;
                Command::Put(parse_int(args[0])?, parse_int(args[1])?)
            }
            "get" => {
                expect_args("get", &args, 1)?;
                Command::Get(parse_int(args[0])?)
            }
            "peek" => {
                expect_args("peek", &args, 1)?;
                Command::Peek(parse_int(args[0])?)
            }
            "order" => {
                expect_args("order", &args, 0)?;
                Command::Order
            }
            "len" => {
                expect_args("len", &args, 0)?;
                Command::Len
            }
            "stats" => {
                expect_args("stats", &args, 0)?;
                Command::Stats
            }
            _ => return Err(format!("unknown command '{}'", verb)),
        };

        Ok(Some(command))
    }

    /// Whether the command can change recency order or contents
    pub fn is_mutating(&self) -> bool {
        matches!(self, Command::Put(..) | Command::Get(_))
    }
}

fn expect_args(verb: &str, args: &[&str], count: usize) -> Result<(), String> {
    if args.len() != count {
        return Err(format!(
            "wrong number of arguments for '{}' (expected {}, got {})",
            verb,
            count,
            args.len()
        ));
    }
    Ok(())
}

fn parse_int(arg: &str) -> Result<i64, String> {
    arg.parse()
        .map_err(|_| format!("invalid integer '{}'", arg))
}
