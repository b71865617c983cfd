//! 🏗 HTTP request implementation

use std::io;
use std::io::Read;

use maintenance_core::{route, Reply, RequestMethod, Route, CONTENT_TYPE, CORS_HEADERS};
use tiny_http::{Header, Response};
use tracing::{debug, warn};

struct HTTPRequest(tiny_http::Request);

impl maintenance_core::RawRequest for HTTPRequest {
    fn url(&self) -> &str {
        self.0.url()
    }

    fn method(&self) -> RequestMethod {
        method(&self.0)
    }

    fn read_bytes(&mut self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.0.body_length().unwrap_or(0));
        self.0.as_reader().read_to_end(&mut buf)?;
        Ok(buf)
    }

    fn respond(self: Box<Self>, reply: Reply) {
        respond(self.0, reply)
    }
}

fn method(rq: &tiny_http::Request) -> RequestMethod {
    match rq.method() {
        tiny_http::Method::Get => RequestMethod::Get,
        tiny_http::Method::Post => RequestMethod::Post,
        tiny_http::Method::Put => RequestMethod::Put,
        tiny_http::Method::Delete => RequestMethod::Delete,
        tiny_http::Method::Options => RequestMethod::Options,
        _ => RequestMethod::Other,
    }
}

/// Add the content type and CORS headers to `reply` and send it
fn respond(rq: tiny_http::Request, reply: Reply) {
    let mut res = Response::from_data(reply.body).with_status_code(reply.status);
    add_response_headers(&mut res);
    if let Err(err) = rq.respond(res) {
        // The client went away; nothing left to answer.
        warn!("HTTP response failed: {err}");
    }
}

/// Parse the given HTTP request
///
/// If [`None`] is returned, the request was already answered: either it was a
/// preflight request or it could not be routed.
pub fn parse(rq: tiny_http::Request) -> Option<maintenance_core::Request> {
    let method = method(&rq);
    debug!(?method, url = rq.url(), "received request");

    match route(method, rq.url()) {
        Route::Preflight => {
            respond(rq, Reply::preflight());
            None
        }
        Route::Reject(err) => {
            warn!(?method, url = rq.url(), status = err.status_code(), "{err}");
            respond(rq, Reply::error(&err));
            None
        }
        Route::Dispatch(kind) => Some(maintenance_core::Request::from_raw(
            kind,
            Box::new(HTTPRequest(rq)),
        )),
    }
}

/// Add the content type and CORS headers to `res`
fn add_response_headers<R: Read>(res: &mut Response<R>) {
    for (field, value) in std::iter::once(CONTENT_TYPE).chain(CORS_HEADERS) {
        // Both are static ASCII, which `Header::from_bytes` always accepts.
        if let Ok(header) = Header::from_bytes(field.as_bytes(), value.as_bytes()) {
            res.add_header(header);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::net::{SocketAddr, TcpStream};
    use std::thread;
    use std::time::Duration;

    use maintenance_core::{Config, RequestHandler};

    use super::*;

    /// Serve `count` calls on an ephemeral port from a seeded store
    fn serve(count: usize) -> SocketAddr {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        let service = maintenance_store::launch(&Config::default());
        thread::spawn(move || {
            for _ in 0..count {
                if let Some(rq) = parse(server.recv().unwrap()) {
                    service.handle(rq);
                }
            }
        });
        addr
    }

    /// Send one call and return the status code, the lowercased head and the
    /// body
    fn call(addr: SocketAddr, method: &str, path: &str, body: &str) -> (u16, String, String) {
        let mut stream = TcpStream::connect(addr).unwrap();
        stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
        write!(
            stream,
            "{method} {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\nContent-Length: {}\r\n\r\n{body}",
            body.len()
        )
        .unwrap();

        let mut raw = String::new();
        stream.read_to_string(&mut raw).unwrap();
        let (head, body) = raw.split_once("\r\n\r\n").unwrap_or((&raw, ""));
        let status = head.split_whitespace().nth(1).unwrap().parse().unwrap();
        (status, head.to_ascii_lowercase(), body.to_owned())
    }

    #[test]
    fn serves_calls_over_http() {
        let calls = [
            ("GET", "/requests", "", 200),
            ("OPTIONS", "/requests/abc", "", 200),
            ("POST", "/requests", r#"{"asset":"Boiler","description":"Leaking"}"#, 201),
            ("DELETE", "/requests/1", "", 204),
            ("GET", "/requests/abc", "", 400),
            ("DELETE", "/requests/999", "", 404),
            ("PATCH", "/requests/2", "", 405),
            ("HEAD", "/requests", "", 405),
        ];
        let addr = serve(calls.len());

        for (method, path, payload, expected) in calls {
            let (status, head, body) = call(addr, method, path, payload);
            assert_eq!(status, expected, "{method} {path}");
            assert!(head.contains("content-type: application/json"), "{method} {path}");
            assert!(head.contains("access-control-allow-origin: *"), "{method} {path}");
            assert!(
                head.contains("access-control-allow-methods: post, get, options, put, delete"),
                "{method} {path}"
            );

            match status {
                200 if method == "GET" => assert!(body.contains("Elevator A")),
                201 => assert!(body.contains(r#""id":3"#) && body.contains(r#""status":"Pending""#)),
                204 | 200 => assert!(body.is_empty(), "{method} {path}"),
                400 => assert_eq!(body, r#"{"error":"Invalid request ID"}"#),
                404 => assert_eq!(body, r#"{"error":"Request not found"}"#),
                _ => {}
            }
        }
    }

    #[test]
    fn every_response_carries_json_and_cors_headers() {
        let mut res = Response::empty(204);
        add_response_headers(&mut res);

        let header = |name: &'static str| {
            res.headers()
                .iter()
                .find(|h| h.field.equiv(name))
                .map(|h| h.value.as_str().to_owned())
        };
        assert_eq!(header("content-type").as_deref(), Some("application/json"));
        assert_eq!(header("Access-Control-Allow-Origin").as_deref(), Some("*"));
        assert_eq!(
            header("Access-Control-Allow-Methods").as_deref(),
            Some("POST, GET, OPTIONS, PUT, DELETE")
        );
        assert!(header("Access-Control-Allow-Headers").is_some());
    }
}
