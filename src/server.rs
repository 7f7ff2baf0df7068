#![cfg(feature = "std")]

//! HTTP front end: accepts connections, maps routes onto [`AdvisorApi`] and
//! writes JSON replies.

use std::net::SocketAddr;

use tokio::net::{TcpListener, TcpStream, ToSocketAddrs};

use crate::{
    protocol::{Ack, AdvisorApi, Failure, UpdateBoardRequest},
    transport::http::{HttpTransport, Request, Response},
};

/// Endpoints understood by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    UpdateBoard,
    GetProbabilities,
    ResetBoard,
    BoardInfo,
    /// CORS preflight for any path.
    Preflight,
    /// Known path, wrong method.
    MethodNotAllowed(&'static str),
    NotFound,
}

/// Resolve a request line. Every route is also served under `/api`.
pub fn route(method: &str, path: &str) -> Route {
    if method.eq_ignore_ascii_case("OPTIONS") {
        return Route::Preflight;
    }
    let path = path
        .strip_prefix("/api")
        .filter(|rest| rest.starts_with('/'))
        .unwrap_or(path);
    let path = path.trim_end_matches('/');
    let (expected, route) = match path {
        "/update-board" => ("POST", Route::UpdateBoard),
        "/get-probabilities" => ("GET", Route::GetProbabilities),
        "/reset-board" => ("POST", Route::ResetBoard),
        "/board-info" => ("GET", Route::BoardInfo),
        _ => return Route::NotFound,
    };
    if method.eq_ignore_ascii_case(expected) {
        route
    } else {
        Route::MethodNotAllowed(expected)
    }
}

/// Produce the response for one request.
pub async fn dispatch<A: AdvisorApi + ?Sized>(api: &A, request: &Request) -> anyhow::Result<Response> {
    let route = route(&request.method, &request.path);
    log::info!("{} {} -> {:?}", request.method, request.path, route);
    match route {
        Route::UpdateBoard => {
            let body: UpdateBoardRequest = match serde_json::from_slice(&request.body) {
                Ok(body) => body,
                Err(e) => {
                    log::warn!("rejected update-board body: {}", e);
                    return Response::json(400, &Failure::new(format!("Invalid request body: {}", e)));
                }
            };
            match api.update_board(body).await {
                Ok(()) => Response::json(200, &Ack::new("Board updated successfully")),
                Err(e) => {
                    log::warn!("rejected board update: {}", e);
                    Response::json(400, &Failure::new(e.to_string()))
                }
            }
        }
        Route::GetProbabilities => match api.probabilities().await {
            Ok(reply) => Response::json(200, &reply),
            Err(e) => {
                log::error!("analysis failed: {}", e);
                Response::json(500, &Failure::new(e.to_string()))
            }
        },
        Route::ResetBoard => match api.reset_board().await {
            Ok(()) => Response::json(200, &Ack::new("Board reset successfully")),
            Err(e) => Response::json(500, &Failure::new(e.to_string())),
        },
        Route::BoardInfo => match api.board_info().await {
            Ok(info) => Response::json(200, &info),
            Err(e) => Response::json(500, &Failure::new(e.to_string())),
        },
        Route::Preflight => Ok(Response::empty(204)
            .with_header("Access-Control-Allow-Methods", "GET, POST, OPTIONS")
            .with_header("Access-Control-Allow-Headers", "Content-Type")),
        Route::MethodNotAllowed(allowed) => Ok(Response::json(
            405,
            &Failure::new(format!("Method {} not allowed", request.method)),
        )?
        .with_header("Allow", allowed)),
        Route::NotFound => Response::json(404, &Failure::new(format!("No route for {}", request.path))),
    }
}

/// Read one request from `stream`, answer it and close.
pub async fn serve_connection<A: AdvisorApi + ?Sized>(api: &A, stream: TcpStream) -> anyhow::Result<()> {
    let mut transport = HttpTransport::new(stream);
    let response = match transport.recv_request().await {
        Ok(request) => dispatch(api, &request).await?,
        Err(e) => {
            log::warn!("malformed request: {}", e);
            Response::json(400, &Failure::new(e.to_string()))?
        }
    };
    transport.send_response(&response).await
}

/// Listening HTTP server around one advisor.
pub struct Server<A> {
    listener: TcpListener,
    api: A,
}

impl<A: AdvisorApi + Clone + 'static> Server<A> {
    pub async fn bind<T: ToSocketAddrs>(addr: T, api: A) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self { listener, api })
    }

    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections until the listener fails.
    pub async fn run(self) -> anyhow::Result<()> {
        log::info!("listening on {}", self.local_addr()?);
        loop {
            let (stream, peer) = self.listener.accept().await?;
            let api = self.api.clone();
            tokio::spawn(async move {
                if let Err(e) = serve_connection(&api, stream).await {
                    log::warn!("connection from {} ended with an error: {}", peer, e);
                }
            });
        }
    }
}
