use tracing::{debug, trace};

use crate::config::ParseLimits;
use crate::error::LineSkip;
use crate::message::Message;

/// Turns the raw output of one tool into an ordered list of messages.
///
/// Implementations never fail: input they cannot understand produces a
/// shorter (possibly empty) list.
pub trait OutputParser {
    fn parse_messages(&self, content: &str) -> Vec<Message>;
}

/// A parser for tools that report one diagnostic per line.
pub trait LineParser {
    /// Tool name used in log fields.
    fn tool_name(&self) -> &'static str;

    fn parse_line(&self, line: &str) -> Result<Message, LineSkip>;
}

/// Runs `parser` over every non-blank line of `content`, keeping the lines
/// it accepts in input order and dropping the rest.
pub fn parse_lines<P>(parser: &P, content: &str, limits: &ParseLimits) -> Vec<Message>
where
    P: LineParser + ?Sized,
{
    let mut skipped = 0usize;
    let messages: Vec<Message> = content
        .lines()
        .enumerate()
        .filter_map(|(idx, raw)| {
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            if line.chars().all(char::is_whitespace) {
                return None;
            }
            match check_length(line, limits).and_then(|()| parser.parse_line(line)) {
                Ok(message) => Some(message),
                Err(reason) => {
                    skipped += 1;
                    trace!(
                        tool = parser.tool_name(),
                        line_number = idx + 1,
                        %reason,
                        "skipping unparsable analyzer output line"
                    );
                    None
                }
            }
        })
        .collect();

    debug!(
        tool = parser.tool_name(),
        messages = messages.len(),
        skipped,
        "parsed analyzer output"
    );
    messages
}

fn check_length(line: &str, limits: &ParseLimits) -> Result<(), LineSkip> {
    let observed_bytes = line.len();
    if observed_bytes > limits.max_line_bytes {
        return Err(LineSkip::LineTooLong {
            observed_bytes,
            max_line_bytes: limits.max_line_bytes,
        });
    }
    Ok(())
}

/// Parses a 1-based position field, mapping failures to a line skip.
pub(crate) fn parse_position(field: &'static str, value: &str) -> Result<u32, LineSkip> {
    match value.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(LineSkip::InvalidNumber {
            field,
            value: value.to_string(),
        }),
    }
}
