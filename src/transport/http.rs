#![cfg(feature = "std")]

//! Minimal HTTP/1.1 framing over a tokio `TcpStream`: one request and one
//! response per connection, bodies sized by `Content-Length`.

use serde::Serialize;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::time::{timeout, Duration};

/// Default timeout for reading a request or writing a response (30 seconds).
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum size of the header block and of the body (64 KiB each).
const MAX_MESSAGE_SIZE: usize = 64 * 1024;

const HEADER_END: &[u8] = b"\r\n\r\n";

/// A parsed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: String,
    /// Path with any query string removed.
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Request {
    pub fn new(method: &str, path: &str, body: Vec<u8>) -> Self {
        Self {
            method: method.to_string(),
            path: path.to_string(),
            headers: Vec::new(),
            body,
        }
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// A response ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Response {
    /// JSON response with the given status.
    pub fn json<T: Serialize>(status: u16, value: &T) -> anyhow::Result<Self> {
        let body = serde_json::to_vec(value)
            .map_err(|e| anyhow::anyhow!("Serialization error: {}", e))?;
        Ok(Self {
            status,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body,
        })
    }

    pub fn empty(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Parse the body as JSON.
    pub fn json_body<T: serde::de::DeserializeOwned>(&self) -> anyhow::Result<T> {
        serde_json::from_slice(&self.body)
            .map_err(|e| anyhow::anyhow!("Deserialization error: {}", e))
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        204 => "No Content",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        413 => "Payload Too Large",
        500 => "Internal Server Error",
        _ => "",
    }
}

pub struct HttpTransport {
    stream: TcpStream,
    timeout_duration: Duration,
    max_message_size: usize,
}

impl HttpTransport {
    pub fn new(stream: TcpStream) -> Self {
        Self {
            stream,
            timeout_duration: DEFAULT_TIMEOUT,
            max_message_size: MAX_MESSAGE_SIZE,
        }
    }

    pub fn with_config(stream: TcpStream, timeout_duration: Duration, max_message_size: usize) -> Self {
        Self {
            stream,
            timeout_duration,
            max_message_size,
        }
    }

    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self::new(stream))
    }

    /// Read one request from the peer.
    pub async fn recv_request(&mut self) -> anyhow::Result<Request> {
        let limit = self.timeout_duration;
        let recv_op = async {
            let (start, headers, body) = self.read_message().await?;
            let mut parts = start.split_whitespace();
            let method = parts
                .next()
                .ok_or_else(|| anyhow::anyhow!("Empty request line"))?
                .to_string();
            let target = parts
                .next()
                .ok_or_else(|| anyhow::anyhow!("Request line has no target: {:?}", start))?;
            let path = target.split('?').next().unwrap_or(target).to_string();
            anyhow::Ok(Request {
                method,
                path,
                headers,
                body,
            })
        };

        timeout(limit, recv_op)
            .await
            .map_err(|_| anyhow::anyhow!("Receive timeout after {:?}", limit))?
    }

    /// Write `response` and close our side of the connection.
    pub async fn send_response(&mut self, response: &Response) -> anyhow::Result<()> {
        let mut head = format!("HTTP/1.1 {} {}\r\n", response.status, reason(response.status));
        for (name, value) in &response.headers {
            head.push_str(&format!("{}: {}\r\n", name, value));
        }
        head.push_str("Access-Control-Allow-Origin: *\r\n");
        head.push_str(&format!("Content-Length: {}\r\nConnection: close\r\n\r\n", response.body.len()));
        self.write_message(head, &response.body).await
    }

    /// Client side: write `request` to the server.
    pub async fn send_request(&mut self, request: &Request) -> anyhow::Result<()> {
        let mut head = format!("{} {} HTTP/1.1\r\nHost: localhost\r\n", request.method, request.path);
        for (name, value) in &request.headers {
            head.push_str(&format!("{}: {}\r\n", name, value));
        }
        head.push_str(&format!("Content-Length: {}\r\nConnection: close\r\n\r\n", request.body.len()));
        self.write_message(head, &request.body).await
    }

    /// Client side: read the server's response.
    pub async fn recv_response(&mut self) -> anyhow::Result<Response> {
        let limit = self.timeout_duration;
        let recv_op = async {
            let (start, headers, body) = self.read_message().await?;
            let status = start
                .split_whitespace()
                .nth(1)
                .and_then(|s| s.parse::<u16>().ok())
                .ok_or_else(|| anyhow::anyhow!("Malformed status line: {:?}", start))?;
            anyhow::Ok(Response {
                status,
                headers,
                body,
            })
        };

        timeout(limit, recv_op)
            .await
            .map_err(|_| anyhow::anyhow!("Receive timeout after {:?}", limit))?
    }

    async fn write_message(&mut self, head: String, body: &[u8]) -> anyhow::Result<()> {
        let limit = self.timeout_duration;
        let send_op = async {
            self.stream.write_all(head.as_bytes()).await.map_err(write_error)?;
            self.stream.write_all(body).await.map_err(write_error)?;
            self.stream.flush().await.map_err(write_error)?;
            anyhow::Ok(())
        };

        timeout(limit, send_op)
            .await
            .map_err(|_| anyhow::anyhow!("Send timeout after {:?}", limit))?
    }

    /// Start line, headers and body of one message.
    async fn read_message(&mut self) -> anyhow::Result<(String, Vec<(String, String)>, Vec<u8>)> {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        let head_len = loop {
            if let Some(pos) = buf.windows(HEADER_END.len()).position(|w| w == HEADER_END) {
                break pos;
            }
            // Bounded header block to prevent excessive memory allocation
            if buf.len() > self.max_message_size {
                return Err(anyhow::anyhow!(
                    "Header block too large: {} bytes (max: {})",
                    buf.len(),
                    self.max_message_size
                ));
            }
            let n = self.stream.read(&mut chunk).await.map_err(read_error)?;
            if n == 0 {
                return Err(anyhow::anyhow!("Connection closed by peer"));
            }
            buf.extend_from_slice(&chunk[..n]);
        };

        let head = std::str::from_utf8(&buf[..head_len])
            .map_err(|_| anyhow::anyhow!("Header block is not valid UTF-8"))?;
        let mut lines = head.split("\r\n");
        let start = lines.next().unwrap_or_default().to_string();
        let mut headers = Vec::new();
        for line in lines.filter(|l| !l.is_empty()) {
            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| anyhow::anyhow!("Malformed header line: {:?}", line))?;
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }

        let length = match find_header(&headers, "Content-Length") {
            Some(v) => v
                .parse::<usize>()
                .map_err(|_| anyhow::anyhow!("Invalid Content-Length: {:?}", v))?,
            None => 0,
        };
        if length > self.max_message_size {
            return Err(anyhow::anyhow!(
                "Message too large: {} bytes (max: {})",
                length,
                self.max_message_size
            ));
        }

        let mut body = buf.split_off(head_len + HEADER_END.len());
        if body.len() < length {
            let already = body.len();
            body.resize(length, 0);
            self.stream
                .read_exact(&mut body[already..])
                .await
                .map_err(read_error)?;
        }
        body.truncate(length);
        Ok((start, headers, body))
    }
}

fn read_error(e: std::io::Error) -> anyhow::Error {
    if e.kind() == std::io::ErrorKind::UnexpectedEof {
        anyhow::anyhow!("Connection closed by peer")
    } else if e.kind() == std::io::ErrorKind::ConnectionReset {
        anyhow::anyhow!("Connection reset by peer")
    } else {
        anyhow::anyhow!("Read error: {}", e)
    }
}

fn write_error(e: std::io::Error) -> anyhow::Error {
    if e.kind() == std::io::ErrorKind::BrokenPipe || e.kind() == std::io::ErrorKind::ConnectionReset {
        anyhow::anyhow!("Connection closed by peer")
    } else {
        anyhow::anyhow!("Write error: {}", e)
    }
}
