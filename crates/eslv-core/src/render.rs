//! Highlight renderer: formats an [`Event`] into a styled text stream.
//!
//! The renderer knows nothing about terminals. It emits `(Tone, &str)`
//! segments into a [`Markup`] sink; the sink decides what a tone looks like
//! (ANSI escapes, ratatui spans, nothing at all). Every segment is a slice
//! of the event's own text, so match spans from the [`Matcher`] stay valid
//! and multi-byte characters are never split.
//!
//! # Layout
//!
//! ```text
//! Key: value            one line per header, `Key:` in HeaderKey tone,
//! Key: 42               numeric values in Numeric tone
//! \tcontinuation        continuation lines verbatim
//! Content-Length: 5     synthesized when the body is non-empty
//! hello                 body verbatim (or highlighted)
//! ```

use crate::error::RenderError;
use crate::policy::CONTENT_LENGTH;
use crate::search::Matcher;
use crate::types::Event;
use regex::Regex;
use std::io::{self, Write};
use std::sync::LazyLock;

/// Header values that look like a plain integer or decimal number.
static NUMERIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[0-9]+\.*[0-9]*\s*$").expect("numeric value pattern must compile")
});

/// Semantic style of a rendered segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    /// Header name and its `:`.
    HeaderKey,
    /// A header value that looks like a number.
    Numeric,
    /// Default text.
    Plain,
    /// The unmatched part of a line before the search match.
    MatchContext,
    /// The matched span itself.
    Emphasis,
}

/// Destination for rendered segments.
pub trait Markup {
    /// Write `text` in `tone`. `text` is never empty.
    fn segment(&mut self, tone: Tone, text: &str) -> io::Result<()>;
    /// Drop any styling still in effect.
    fn reset(&mut self) -> io::Result<()>;
    /// End the current line.
    fn newline(&mut self) -> io::Result<()>;
    /// Called once after the event has been written.
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// True when a header value is styled as a number.
pub fn is_numeric(value: &str) -> bool {
    NUMERIC.is_match(value)
}

/// Render `event` into `out`, highlighting the first match of `matcher` on
/// each header line and in the body.
///
/// Fails only when the sink fails to write.
pub fn render<M: Markup + ?Sized>(
    event: &Event,
    matcher: &Matcher,
    out: &mut M,
) -> Result<(), RenderError> {
    let mut first = true;
    for line in event.header_lines() {
        if !first {
            out.newline()?;
        }
        first = false;
        header_line(line, matcher, out)?;
    }

    if event.has_body() {
        if !first {
            out.newline()?;
        }
        key_value(CONTENT_LENGTH, Tone::Numeric, &event.body.len().to_string(), out)?;
        out.newline()?;
        if !highlight(&event.body, matcher, out)? {
            segment(out, Tone::Plain, &event.body)?;
        }
    }

    out.finish()?;
    Ok(())
}

fn header_line<M: Markup + ?Sized>(line: &str, matcher: &Matcher, out: &mut M) -> io::Result<()> {
    if highlight(line, matcher, out)? {
        return Ok(());
    }

    // continuation of a multi-line value
    if line.starts_with('\t') {
        return segment(out, Tone::Plain, line);
    }

    match line.split_once(": ") {
        Some((key, value)) => {
            let tone = if is_numeric(value) {
                Tone::Numeric
            } else {
                Tone::Plain
            };
            key_value(key, tone, value, out)
        }
        None => segment(out, Tone::Plain, line),
    }
}

fn key_value<M: Markup + ?Sized>(
    key: &str,
    tone: Tone,
    value: &str,
    out: &mut M,
) -> io::Result<()> {
    segment(out, Tone::HeaderKey, key)?;
    segment(out, Tone::HeaderKey, ":")?;
    segment(out, tone, " ")?;
    segment(out, tone, value)?;
    out.reset()
}

/// Write `text` split around its first match. Returns `false` (writing
/// nothing) when there is no match.
fn highlight<M: Markup + ?Sized>(text: &str, matcher: &Matcher, out: &mut M) -> io::Result<bool> {
    let Some(span) = matcher.find(text) else {
        return Ok(false);
    };

    segment(out, Tone::MatchContext, &text[..span.start])?;
    segment(out, Tone::Emphasis, &text[span.start..span.end])?;
    segment(out, Tone::Plain, &text[span.end..])?;
    out.reset()?;
    Ok(true)
}

fn segment<M: Markup + ?Sized>(out: &mut M, tone: Tone, text: &str) -> io::Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    out.segment(tone, text)
}

// ---------------------------------------------------------------------------
// Sinks
// ---------------------------------------------------------------------------

/// Writes segments as text with ANSI SGR styling.
#[derive(Debug)]
pub struct AnsiMarkup<W: Write> {
    inner: W,
    current: Option<Tone>,
}

impl<W: Write> AnsiMarkup<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            current: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    fn sgr(tone: Tone) -> &'static str {
        match tone {
            Tone::HeaderKey => "\x1b[0;36m",
            Tone::Numeric => "\x1b[0;33m",
            Tone::Plain => "\x1b[0m",
            Tone::MatchContext => "\x1b[0;32m",
            Tone::Emphasis => "\x1b[1;7m",
        }
    }
}

impl<W: Write> Markup for AnsiMarkup<W> {
    fn segment(&mut self, tone: Tone, text: &str) -> io::Result<()> {
        if self.current != Some(tone) && !(self.current.is_none() && tone == Tone::Plain) {
            self.inner.write_all(Self::sgr(tone).as_bytes())?;
            self.current = Some(tone);
        }
        self.inner.write_all(text.as_bytes())
    }

    fn reset(&mut self) -> io::Result<()> {
        if self.current.take().is_some() {
            self.inner.write_all(b"\x1b[0m")?;
        }
        Ok(())
    }

    fn newline(&mut self) -> io::Result<()> {
        self.reset()?;
        self.inner.write_all(b"\n")
    }

    fn finish(&mut self) -> io::Result<()> {
        self.reset()?;
        self.inner.flush()
    }
}

/// Writes segment text only, dropping all styling.
#[derive(Debug)]
pub struct PlainMarkup<W: Write> {
    inner: W,
}

impl<W: Write> PlainMarkup<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Markup for PlainMarkup<W> {
    fn segment(&mut self, _tone: Tone, text: &str) -> io::Result<()> {
        self.inner.write_all(text.as_bytes())
    }

    fn reset(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn newline(&mut self) -> io::Result<()> {
        self.inner.write_all(b"\n")
    }

    fn finish(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{MatchMode, SearchOptions};
    use chrono::{DateTime, Utc};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    /// Records segments as `<tone>text` markers for exact comparisons.
    #[derive(Default)]
    struct Tape(String);

    impl Markup for Tape {
        fn segment(&mut self, tone: Tone, text: &str) -> io::Result<()> {
            let tag = match tone {
                Tone::HeaderKey => "k",
                Tone::Numeric => "n",
                Tone::Plain => "p",
                Tone::MatchContext => "c",
                Tone::Emphasis => "e",
            };
            self.0.push_str(&format!("<{tag}>{text}"));
            Ok(())
        }

        fn reset(&mut self) -> io::Result<()> {
            self.0.push_str("<->");
            Ok(())
        }

        fn newline(&mut self) -> io::Result<()> {
            self.0.push('\n');
            Ok(())
        }
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn event(header: &str, body: &str) -> Event {
        Event {
            name: "TEST".to_string(),
            sequence: 0,
            timestamp: DateTime::<Utc>::UNIX_EPOCH,
            header: header.to_string(),
            body: body.to_string(),
        }
    }

    fn tape(event: &Event, matcher: &Matcher) -> String {
        let mut out = Tape::default();
        render(event, matcher, &mut out).unwrap();
        out.0
    }

    fn regex(text: &str) -> Matcher {
        Matcher::compile(MatchMode::Regex, text, &SearchOptions::default()).unwrap()
    }

    #[rstest]
    #[case("42", true)]
    #[case(" 3.14 ", true)]
    #[case("1..2", true)]
    #[case("7.", true)]
    #[case("", false)]
    #[case("abc", false)]
    #[case("-1", false)]
    #[case("1e5", false)]
    fn numeric_classification(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_numeric(value), expected);
    }

    #[test]
    fn header_lines_split_key_and_value() {
        let out = tape(&event("A: 1\nB: x y\n", ""), &Matcher::All);
        assert_eq!(out, "<k>A<k>:<n> <n>1<->\n<k>B<k>:<p> <p>x y<->");
    }

    #[test]
    fn value_split_only_at_first_delimiter() {
        let out = tape(&event("Url: sip: a: b\n", ""), &Matcher::All);
        assert_eq!(out, "<k>Url<k>:<p> <p>sip: a: b<->");
    }

    #[test]
    fn continuation_lines_are_verbatim() {
        let out = tape(&event("K: one\n\ttwo: 2\n", ""), &Matcher::All);
        assert_eq!(out, "<k>K<k>:<p> <p>one<->\n<p>\ttwo: 2");
    }

    #[test]
    fn body_gets_content_length_line() {
        let out = tape(&event("A: 1\n", "hello"), &Matcher::All);
        assert_eq!(out, "<k>A<k>:<n> <n>1<->\n<k>Content-Length<k>:<n> <n>5<->\n<p>hello");
    }

    #[test]
    fn empty_header_renders_only_body() {
        let out = tape(&event("", "hi"), &Matcher::All);
        assert_eq!(out, "<k>Content-Length<k>:<n> <n>2<->\n<p>hi");
    }

    #[test]
    fn empty_event_renders_nothing() {
        assert_eq!(tape(&event("", ""), &Matcher::All), "");
    }

    #[test]
    fn matched_line_is_split_around_span() {
        let out = tape(&event("Channel-State: CS_EXECUTE\n", ""), &regex("execute"));
        assert_eq!(out, "<c>Channel-State: CS_<e>EXECUTE<->");
    }

    #[test]
    fn matched_body_is_highlighted() {
        let out = tape(&event("A: 1\n", "say hello world"), &regex("hello"));
        assert_eq!(
            out,
            "<k>A<k>:<n> <n>1<->\n<k>Content-Length<k>:<n> <n>15<->\n<c>say <e>hello<p> world<->"
        );
    }

    #[test]
    fn highlight_keeps_multibyte_text_intact() {
        let ev = event("Caller-Name: Иван Петров\n", "");
        let out = tape(&ev, &regex("петр"));
        assert_eq!(out, "<c>Caller-Name: Иван <e>Петр<p>ов<->");
    }

    #[test]
    fn plain_sink_reproduces_text() {
        let ev = event("A: 1\nB: two\n", "body");
        let mut out = PlainMarkup::new(Vec::new());
        render(&ev, &regex("tw"), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out.into_inner()).unwrap(),
            "A: 1\nB: two\nContent-Length: 4\nbody"
        );
    }

    #[test]
    fn ansi_sink_wraps_emphasis() {
        let ev = event("A: xyz\n", "");
        let mut out = AnsiMarkup::new(Vec::new());
        render(&ev, &regex("y"), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out.into_inner()).unwrap(),
            "\x1b[0;32mA: x\x1b[1;7my\x1b[0mz\x1b[0m"
        );
    }

    #[test]
    fn render_is_idempotent() {
        let ev = event("A: 1\nB: hello\n\tworld\n", "hello body");
        let matcher = regex("hello");
        assert_eq!(tape(&ev, &matcher), tape(&ev, &matcher));
    }

    #[test]
    fn unwritable_sink_is_render_error() {
        let ev = event("A: 1\n", "");
        let mut out = PlainMarkup::new(Broken);
        let err = render(&ev, &Matcher::All, &mut out).unwrap_err();
        assert_eq!(err.0.kind(), io::ErrorKind::BrokenPipe);
    }
}
