//! Static event-log corpora used across harnesses.
//!
//! Lines are shaped like the output of an ESL event dump: one JSON object per
//! event, every value a string, the body under `_body`.

use std::io::Write;
use std::path::PathBuf;

/// A short, realistic session: heartbeat, a call being set up, an API reply
/// with a body and a custom event with a multi-line value.
pub const CORPUS_ESL: &[&str] = &[
    r#"{"Event-Name":"HEARTBEAT","Core-UUID":"5f3a-11","FreeSWITCH-Hostname":"pbx1","Event-Date-Timestamp":"1700000000000000","Event-Sequence":"101","Up-Time":"0 years, 1 day","Session-Count":"3","Idle-CPU":"97.533333"}"#,
    r#"{"Event-Name":"CHANNEL_CREATE","Core-UUID":"5f3a-11","Event-Date-Timestamp":"1700000001000000","Event-Sequence":"102","Unique-ID":"a1b2c3","Channel-State":"CS_INIT","Caller-Caller-ID-Name":"Alice","Caller-Caller-ID-Number":"1001"}"#,
    r#"{"Event-Name":"CHANNEL_ANSWER","Event-Date-Timestamp":"1700000002000000","Event-Sequence":"103","Unique-ID":"a1b2c3","Answer-State":"answered","Caller-Caller-ID-Number":"1001"}"#,
    r#"{"Event-Name":"BACKGROUND_JOB","Event-Date-Timestamp":"1700000003000000","Event-Sequence":"104","Job-UUID":"9e8d","Job-Command":"status","Content-Length":"12","_body":"+OK UP 0 days"}"#,
    r#"{"Event-Name":"CUSTOM","Event-Subclass":"sofia::register","Event-Date-Timestamp":"1700000004000000","Event-Sequence":"105","contact":"<sip:1001@10.0.0.5>","user-agent":"Linphone\nDesktop"}"#,
    r#"{"Event-Name":"HEARTBEAT","Core-UUID":"5f3a-11","Event-Date-Timestamp":"1700000020000000","Event-Sequence":"106","Up-Time":"0 years, 1 day","Session-Count":"1","Idle-CPU":"98.1"}"#,
];

/// Names of [`CORPUS_ESL`] in log order.
pub const CORPUS_NAMES: &[&str] = &[
    "HEARTBEAT",
    "CHANNEL_CREATE",
    "CHANNEL_ANSWER",
    "BACKGROUND_JOB",
    "sofia::register",
    "HEARTBEAT",
];

/// The corpus as one newline-delimited log.
pub fn corpus_log() -> String {
    let mut log = CORPUS_ESL.join("\n");
    log.push('\n');
    log
}

/// Generate `n` synthetic events for throughput tests.
pub fn corpus_high_volume(n: usize) -> String {
    const NAMES: &[&str] = &["HEARTBEAT", "CHANNEL_CREATE", "CHANNEL_HANGUP", "DTMF", "API"];
    (0..n)
        .map(|i| {
            format!(
                r#"{{"Event-Name":"{}","Event-Sequence":"{}","Event-Date-Timestamp":"{}","Unique-ID":"uuid-{}","Channel-State":"CS_{}"}}"#,
                NAMES[i % NAMES.len()],
                i + 1,
                1_700_000_000_000_000i64 + i as i64 * 1_000,
                i % 97,
                if i % 3 == 0 { "ROUTING" } else { "EXECUTE" },
            ) + "\n"
        })
        .collect()
}

/// Write `contents` to `events.log` inside a fresh temporary directory.
///
/// Keep the returned [`tempfile::TempDir`] alive for as long as the path is
/// used.
pub fn write_log(contents: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("events.log");
    let mut file = std::fs::File::create(&path).expect("create log file");
    file.write_all(contents.as_bytes()).expect("write log file");
    (dir, path)
}
