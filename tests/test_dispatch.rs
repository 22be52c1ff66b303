use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use switchyard::adapter::DispatchHandler;
use switchyard::config::ServerConfig;
use switchyard::executor::{Executor, Task};
use switchyard::http::request::{Header, WireRequest};
use switchyard::http::response::WireResponse;
use switchyard::model::{Request, Response, WriteFn};
use switchyard::server::{Deliver, Handler};

const WAIT: Duration = Duration::from_secs(5);

/// Runs tasks on the calling thread.
struct Inline;

impl Executor for Inline {
    fn execute(&self, task: Task) {
        task();
    }
}

/// Drops every task without running it.
struct Discard;

impl Executor for Discard {
    fn execute(&self, _task: Task) {}
}

fn options() -> ServerConfig {
    ServerConfig::new("localhost", 8080)
}

fn get(uri: &str) -> WireRequest {
    WireRequest::builder().method("GET").uri(uri).build().unwrap()
}

/// A deliver callback that counts calls and forwards responses.
fn recorder() -> (Deliver, Receiver<WireResponse>, Arc<AtomicUsize>) {
    let (tx, rx) = mpsc::channel();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let deliver: Deliver = Box::new(move |response| {
        counter.fetch_add(1, Ordering::SeqCst);
        tx.send(response).unwrap();
    });
    (deliver, rx, calls)
}

fn fallback() -> WireResponse {
    WireResponse {
        status: 500,
        reason: "Internal Server Error".to_string(),
        headers: vec![],
        body: vec![],
    }
}

#[test]
fn test_not_found_application_end_to_end() {
    let app = |_req: &Request| -> anyhow::Result<Response> { Ok(Response::new(404)) };
    let handler = DispatchHandler::new(app, &options(), Arc::new(Inline));
    let (deliver, rx, calls) = recorder();

    handler.handle(get("/anything"), deliver);

    assert_eq!(
        rx.recv_timeout(WAIT).unwrap(),
        WireResponse {
            status: 404,
            reason: "Not Found".to_string(),
            headers: vec![],
            body: vec![],
        }
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_failing_application_yields_fallback() {
    let app = |_req: &Request| -> anyhow::Result<Response> { anyhow::bail!("boom") };
    let handler = DispatchHandler::new(app, &options(), Arc::new(Inline));
    let (deliver, rx, calls) = recorder();

    handler.handle(get("/"), deliver);

    assert_eq!(rx.recv_timeout(WAIT).unwrap(), fallback());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_panicking_application_yields_fallback() {
    let app = |_req: &Request| -> anyhow::Result<Response> { panic!("kaboom") };
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let handler = DispatchHandler::new(app, &options(), Arc::new(Inline))
        .with_error_hook(move |f| {
            sink.lock().unwrap().push(format!("{} {}: {:#}", f.method, f.uri, f.error))
        });
    let (deliver, rx, calls) = recorder();

    handler.handle(get("/p"), deliver);

    assert_eq!(rx.recv_timeout(WAIT).unwrap(), fallback());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].contains("application panicked: kaboom"), "{}", seen[0]);
}

#[test]
fn test_body_write_failure_yields_fallback() {
    let app = |_req: &Request| -> anyhow::Result<Response> {
        let body = WriteFn(|_sink: &mut dyn std::io::Write| -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone"))
        });
        Ok(Response::builder(200).header("X-Foo", "bar").body(body).build())
    };
    let handler = DispatchHandler::new(app, &options(), Arc::new(Inline));
    let (deliver, rx, _) = recorder();

    handler.handle(get("/"), deliver);

    // Headers from the failed response must not leak into the fallback
    assert_eq!(rx.recv_timeout(WAIT).unwrap(), fallback());
}

#[test]
fn test_error_hook_sees_original_error_with_request_line() {
    let app = |_req: &Request| -> anyhow::Result<Response> { anyhow::bail!("database unreachable") };
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let handler = DispatchHandler::new(app, &options(), Arc::new(Inline))
        .with_error_hook(move |f| {
            sink.lock().unwrap().push(format!("{} {}: {:#}", f.method, f.uri, f.error))
        });
    let (deliver, rx, _) = recorder();

    handler.handle(get("/orders?id=7"), deliver);
    rx.recv_timeout(WAIT).unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.as_slice(), ["GET /orders?id=7: database unreachable"]);
}

#[test]
fn test_error_hook_keeps_request_line_out_of_the_error() {
    let app = |_req: &Request| -> anyhow::Result<Response> { anyhow::bail!("quota exceeded") };
    let seen = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&seen);
    let handler = DispatchHandler::new(app, &options(), Arc::new(Inline)).with_error_hook(move |f| {
        *sink.lock().unwrap() = Some((f.method.clone(), f.uri.clone(), f.error.to_string()));
    });
    let (deliver, rx, _) = recorder();

    handler.handle(get("/quota?user=9"), deliver);
    rx.recv_timeout(WAIT).unwrap();

    assert_eq!(
        seen.lock().unwrap().clone(),
        Some((
            "GET".to_string(),
            "/quota?user=9".to_string(),
            "quota exceeded".to_string()
        ))
    );
}

#[test]
fn test_header_with_line_break_yields_fallback() {
    let app = |_req: &Request| -> anyhow::Result<Response> {
        Ok(Response::builder(200)
            .header("X-A", "v\r\nSet-Cookie: evil=1")
            .body("ok")
            .build())
    };
    let handler = DispatchHandler::new(app, &options(), Arc::new(Inline)).with_error_hook(|_| {});
    let (deliver, rx, calls) = recorder();

    handler.handle(get("/"), deliver);

    assert_eq!(rx.recv_timeout(WAIT).unwrap(), fallback());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_error_hook_not_called_on_success() {
    let app = |_req: &Request| -> anyhow::Result<u16> { Ok(204) };
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let handler = DispatchHandler::new(app, &options(), Arc::new(Inline)).with_error_hook(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    let (deliver, rx, _) = recorder();

    handler.handle(get("/"), deliver);

    assert_eq!(rx.recv_timeout(WAIT).unwrap().status, 204);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_discarded_task_still_delivers_fallback() {
    let app = |_req: &Request| -> anyhow::Result<Response> { Ok(Response::new(200)) };
    let handler = DispatchHandler::new(app, &options(), Arc::new(Discard));
    let (deliver, rx, calls) = recorder();

    handler.handle(get("/"), deliver);

    assert_eq!(rx.try_recv().unwrap(), fallback());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_application_sees_translated_request() {
    let app = |req: &Request| -> anyhow::Result<Response> {
        let text = format!(
            "{}|{}|{}|{}|{:?}|{}",
            req.server_name(),
            req.server_port(),
            req.request_method(),
            req.uri(),
            req.query_string(),
            req.header("x-token").unwrap_or("-"),
        );
        Ok(Response::builder(200).body(text).build())
    };
    let handler = DispatchHandler::new(app, &options(), Arc::new(Inline));
    let (deliver, rx, _) = recorder();
    let request = WireRequest::builder()
        .method("DELETE")
        .uri("/items/3?force=1")
        .header("X-Token", "abc")
        .build()
        .unwrap();

    handler.handle(request, deliver);

    let response = rx.recv_timeout(WAIT).unwrap();
    assert_eq!(
        String::from_utf8(response.body).unwrap(),
        "localhost|8080|delete|/items/3|Some(\"force=1\")|abc"
    );
}

#[test]
fn test_response_headers_reach_the_wire() {
    let app = |_req: &Request| -> anyhow::Result<Response> {
        Ok(Response::builder(200).header("X-Foo", "bar").build())
    };
    let handler = DispatchHandler::new(app, &options(), Arc::new(Inline));
    let (deliver, rx, _) = recorder();

    handler.handle(get("/"), deliver);

    assert_eq!(rx.recv_timeout(WAIT).unwrap().headers, vec![Header::new("X-Foo", "bar")]);
}

#[test]
fn test_handle_returns_before_application_finishes() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let (gate_tx, gate_rx) = mpsc::channel::<()>();
    let gate = Mutex::new(gate_rx);
    let app = move |_req: &Request| -> anyhow::Result<Response> {
        gate.lock().unwrap().recv()?;
        Ok(Response::new(200))
    };
    let handler = DispatchHandler::new(app, &options(), Arc::new(runtime.handle().clone()));
    let (deliver, rx, _) = recorder();

    handler.handle(get("/slow"), deliver);

    // Still blocked inside the application
    assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());

    gate_tx.send(()).unwrap();
    assert_eq!(rx.recv_timeout(WAIT).unwrap().status, 200);
}

#[test]
fn test_each_request_delivered_exactly_once_under_concurrency() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let app = |req: &Request| -> anyhow::Result<Response> {
        match req.uri() {
            "/fail" => anyhow::bail!("nope"),
            "/panic" => panic!("nope"),
            _ => Ok(Response::new(200)),
        }
    };
    let handler = DispatchHandler::new(app, &options(), Arc::new(runtime.handle().clone()))
        .with_error_hook(|_| {});

    let (tx, rx) = mpsc::channel();
    let calls = Arc::new(AtomicUsize::new(0));
    let uris = ["/ok", "/fail", "/panic"];
    for i in 0..60 {
        let tx = tx.clone();
        let counter = Arc::clone(&calls);
        handler.handle(
            get(uris[i % 3]),
            Box::new(move |response| {
                counter.fetch_add(1, Ordering::SeqCst);
                tx.send((i, response.status)).unwrap();
            }),
        );
    }

    let mut seen = Vec::new();
    for _ in 0..60 {
        seen.push(rx.recv_timeout(WAIT).unwrap());
    }
    assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 60);

    seen.sort();
    for (i, status) in seen {
        let expected = if i % 3 == 0 { 200 } else { 500 };
        assert_eq!(status, expected, "request {}", i);
    }
}
