//! Scrubs identifying data out of log output.
//!
//! Account and patient records flow through the services, so formatted log
//! lines can end up carrying record ids, contact details or credential
//! hashes. [`ScrubbingMakeWriter`] wraps the real log sink and masks those
//! patterns before a line is written, which keeps every `tracing` callsite
//! honest without per-callsite discipline.
//!
//! Scrubbing is a backstop. Log messages should avoid interpolating record
//! contents in the first place; this layer catches the ones that slip.

use std::sync::OnceLock;

use regex::Regex;
use tracing_subscriber::fmt::MakeWriter;

/// Input longer than this is cut before scrubbing. Masking is linear in the
/// input, but unbounded log lines are a bug on their own.
/// Override with `MEDTRACK_SCRUB_MAX_BYTES`.
const DEFAULT_MAX_BYTES: usize = 16 * 1024;

const CUT_MARK: &str = " [CUT]";

struct Rule {
    pattern: Regex,
    mask: &'static str,
}

static RULES: OnceLock<Vec<Rule>> = OnceLock::new();

fn rules() -> &'static [Rule] {
    RULES.get_or_init(|| {
        [
            // Record and account ids
            (
                r"\b[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}\b",
                "<uuid>",
            ),
            // US social security numbers
            (r"\b\d{3}-\d{2}-\d{4}\b", "<ssn>"),
            // Medical record numbers as commonly written
            (r"\bMRN[:\s]?\d{6,10}\b", "<mrn>"),
            // E-mail addresses
            (
                r"(?i)\b[a-z0-9][a-z0-9._%+-]*@[a-z0-9][a-z0-9.-]*\.[a-z]{2,}\b",
                "<email>",
            ),
            // North-American phone numbers
            (
                r"\b(?:\+?1[-.\s]?)?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}\b",
                "<phone>",
            ),
            // Argon2 PHC strings as stored in account records
            (r"\$argon2(?:id|i|d)\$[A-Za-z0-9$=,+/\-]+", "<hash>"),
            // key=value style secrets
            (
                r"(?i)\b(?:secret|password|passwd|pwd|token|key)\b\s*[:=]\s*\S{8,}",
                "<secret>",
            ),
        ]
        .into_iter()
        .map(|(pattern, mask)| Rule {
            pattern: Regex::new(pattern).expect("Scrub pattern must compile"),
            mask,
        })
        .collect()
    })
}

fn max_bytes() -> usize {
    std::env::var("MEDTRACK_SCRUB_MAX_BYTES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_MAX_BYTES)
}

/// Mask identifying data in `input`, cutting it at the size cap first.
#[must_use]
pub fn scrub(input: &str) -> String {
    scrub_capped(input, max_bytes())
}

fn scrub_capped(input: &str, cap: usize) -> String {
    let (text, cut) = cut_at_char_boundary(input, cap);

    let mut out = text.to_string();
    for rule in rules() {
        if rule.pattern.is_match(&out) {
            out = rule.pattern.replace_all(&out, rule.mask).into_owned();
        }
    }

    if cut {
        out.push_str(CUT_MARK);
    }
    out
}

fn cut_at_char_boundary(input: &str, cap: usize) -> (&str, bool) {
    if input.len() <= cap {
        return (input, false);
    }
    let mut end = cap;
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

/// A [`MakeWriter`] that scrubs each log line before the inner sink sees it.
#[derive(Debug, Clone)]
pub struct ScrubbingMakeWriter<M> {
    inner: M,
}

impl<M> ScrubbingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<'a, M> MakeWriter<'a> for ScrubbingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = ScrubbingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        ScrubbingWriter {
            inner: self.inner.make_writer(),
            pending: Vec::new(),
        }
    }
}

/// Line-buffering writer behind [`ScrubbingMakeWriter`].
///
/// Bytes are held until a newline arrives so each rule sees whole lines.
/// A line that exceeds twice the scrub cap is flushed early; the cap inside
/// `scrub` cuts it anyway, so holding more gains nothing.
pub struct ScrubbingWriter<W> {
    inner: W,
    pending: Vec<u8>,
}

impl<W> ScrubbingWriter<W>
where
    W: std::io::Write,
{
    fn write_scrubbed(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        let text = String::from_utf8_lossy(bytes);
        self.inner.write_all(scrub(&text).as_bytes())
    }

    fn drain_complete_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            self.write_scrubbed(&line)?;
        }
        Ok(())
    }
}

impl<W> std::io::Write for ScrubbingWriter<W>
where
    W: std::io::Write,
{
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.pending.extend_from_slice(buf);

        if self.pending.len() > max_bytes().saturating_mul(2) {
            let held = std::mem::take(&mut self.pending);
            self.write_scrubbed(&held)?;
            self.inner.write_all(b"\n")?;
            return Ok(buf.len());
        }

        self.drain_complete_lines()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.drain_complete_lines()?;
        if !self.pending.is_empty() {
            let held = std::mem::take(&mut self.pending);
            self.write_scrubbed(&held)?;
        }
        self.inner.flush()
    }
}
