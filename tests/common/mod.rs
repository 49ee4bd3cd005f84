//! Shared utilities for integration tests.

use std::io;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{HeaderName, HeaderValue, Request, StatusCode};
use json_envelope::{Dispatcher, ResponseWriter, StatusRegistry};
use serde_json::Value;
use tracing::Dispatch;
use tracing_subscriber::fmt::MakeWriter;

/// In-memory log sink fed by a JSON `fmt` subscriber.
#[derive(Clone, Default)]
pub struct CapturedLogs {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl io::Write for CapturedLogs {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[allow(dead_code)]
impl CapturedLogs {
    /// Every record written so far, one JSON object per event.
    pub fn records(&self) -> Vec<Value> {
        let buf = self.buf.lock().unwrap();
        String::from_utf8_lossy(&buf)
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    /// The first record whose message equals `message`.
    pub fn find(&self, message: &str) -> Option<Value> {
        self.records()
            .into_iter()
            .find(|record| record["fields"]["message"] == message)
    }

    /// The last record, which for a dispatch call is the response record.
    pub fn last(&self) -> Value {
        self.records().pop().expect("no log records captured")
    }
}

/// Build a log sink that records JSON lines at info level and above.
pub fn capture_logs() -> (Dispatch, CapturedLogs) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_max_level(tracing::Level::INFO)
        .with_writer(logs.clone())
        .finish();
    (Dispatch::new(subscriber), logs)
}

/// Dispatcher over the built-in registry, logging into a capture buffer.
#[allow(dead_code)]
pub fn capturing_dispatcher() -> (Dispatcher, CapturedLogs) {
    let (dispatch, logs) = capture_logs();
    let dispatcher = Dispatcher::new(Arc::new(StatusRegistry::default()), dispatch);
    (dispatcher, logs)
}

/// A request as a handler would see it behind a proxy.
#[allow(dead_code)]
pub fn request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("user-agent", "TestAgent")
        .header("x-forwarded-for", "8.8.8.8, 9.9.9.9")
        .body(Body::empty())
        .unwrap()
}

/// One call made on a [`RecordingWriter`].
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    Header(String, String),
    Status(u16),
    Body(usize),
}

/// Writer that records the order of operations and can fail body writes.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct RecordingWriter {
    pub ops: Vec<WriteOp>,
    pub fail_body: bool,
}

#[allow(dead_code)]
impl RecordingWriter {
    pub fn failing() -> Self {
        Self {
            ops: Vec::new(),
            fail_body: true,
        }
    }

    pub fn statuses(&self) -> Vec<u16> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                WriteOp::Status(code) => Some(*code),
                _ => None,
            })
            .collect()
    }
}

impl ResponseWriter for RecordingWriter {
    fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        let value = value.to_str().unwrap_or_default().to_string();
        self.ops.push(WriteOp::Header(name.to_string(), value));
    }

    fn write_status(&mut self, status: StatusCode) {
        self.ops.push(WriteOp::Status(status.as_u16()));
    }

    fn write_body(&mut self, body: &[u8]) -> io::Result<()> {
        if self.fail_body {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "client went away"));
        }
        self.ops.push(WriteOp::Body(body.len()));
        Ok(())
    }
}
