//! Command handler for script replay

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use lrukit::LruCache;
use tracing::{debug, warn};

use crate::script::Command;

/// Printed by `get` and `peek` when the key is absent
const MISS: i64 = -1;

pub struct CommandHandler {
    cache: LruCache<i64, i64>,
    trace_order: bool,
}

impl CommandHandler {
    pub fn new(cache: LruCache<i64, i64>, trace_order: bool) -> Self {
        Self { cache, trace_order }
    }

    /// Execute one command and render its reply
    pub fn handle(&mut self, cmd: Command) -> String {
        match cmd {
            Command::Put(key, value) => match self.cache.put(key, value) {
                Some((evicted, _)) => format!("OK evicted {}", evicted),
                None => "OK".to_string(),
            },
            Command::Get(key) => self.cache.get(&key).copied().unwrap_or(MISS).to_string(),
            Command::Peek(key) => self.cache.peek(&key).copied().unwrap_or(MISS).to_string(),
            Command::Order => self.render_order(),
            Command::Len => self.cache.len().to_string(),
            Command::Stats => self.render_stats(),
        }
    }

    /// Replay every line of `input`, writing replies to `out`
    ///
    /// Malformed lines are reported inline and skipped.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        for (n, line) in input.lines().enumerate() {
            let line_no = n + 1;
            let line = line.with_context(|| format!("failed to read line {}", line_no))?;

            let cmd = match Command::parse(&line) {
                Ok(Some(cmd)) => cmd,
                Ok(None) => continue,
                Err(e) => {
                    warn!("Parse error on line {}: {}", line_no, e);
                    writeln!(out, "ERR line {}: {}", line_no, e)?;
                    continue;
                }
            };

            debug!(line = line_no, ?cmd, "executing");
            let reply = self.handle(cmd);
            writeln!(out, "{}", reply)?;

            if self.trace_order && cmd.is_mutating() {
                writeln!(out, "  order: {}", self.render_order())?;
            }
        }

        out.flush()?;
        Ok(())
    }

    fn render_order(&self) -> String {
        let keys: Vec<String> = self.cache.keys().map(|k| k.to_string()).collect();
        format!("[{}]", keys.join(", "))
    }

    fn render_stats(&self) -> String {
        let stats = self.cache.stats();
        format!(
            "hits={} misses={} inserts={} updates={} evictions={} hit_ratio={:.3}",
            stats.hits(),
            stats.misses(),
            stats.inserts(),
            stats.updates(),
            stats.evictions(),
            stats.hit_ratio()
        )
    }
}
