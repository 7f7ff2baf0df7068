use std::net::SocketAddr;
use std::sync::Arc;

use battleship_advisor::{
    transport::http::{Request, Response},
    Ack, Advisor, AdvisorConfig, BoardInfoResponse, Failure, HttpTransport,
    ProbabilitiesResponse, SearchBudget, Server,
};

async fn start_server() -> anyhow::Result<SocketAddr> {
    let config = AdvisorConfig {
        budget: SearchBudget::nodes(5_000),
        ..AdvisorConfig::default()
    };
    let server = Server::bind("127.0.0.1:0", Arc::new(Advisor::new(config))).await?;
    let addr = server.local_addr()?;
    tokio::spawn(server.run());
    Ok(addr)
}

async fn call(addr: SocketAddr, method: &str, path: &str, body: &str) -> anyhow::Result<Response> {
    let mut client = HttpTransport::connect(addr).await?;
    let mut request = Request::new(method, path, body.as_bytes().to_vec());
    if !body.is_empty() {
        request
            .headers
            .push(("Content-Type".to_string(), "application/json".to_string()));
    }
    client.send_request(&request).await?;
    client.recv_response().await
}

#[tokio::test]
async fn update_then_probabilities() -> anyhow::Result<()> {
    let addr = start_server().await?;

    let reply = call(
        addr,
        "POST",
        "/update-board",
        r#"{"hits":[{"row":0,"col":0}],"misses":[{"row":0,"col":1}]}"#,
    )
    .await?;
    assert_eq!(reply.status, 200);
    assert_eq!(reply.header("Access-Control-Allow-Origin"), Some("*"));
    let ack: Ack = reply.json_body()?;
    assert!(ack.success);

    let reply = call(addr, "GET", "/get-probabilities", "").await?;
    assert_eq!(reply.status, 200);
    let body: ProbabilitiesResponse = reply.json_body()?;
    assert!(body.success);
    assert_eq!(body.probabilities[0][0], 1.0);
    assert_eq!(body.probabilities[0][1], 0.0);
    assert!(!body.exact);
    assert_eq!(body.approximation.as_deref(), Some("search_budget_exceeded"));
    assert_eq!(body.suggestions.len(), 10);
    assert!(body
        .suggestions
        .iter()
        .all(|s| (s.row, s.col) != (0, 0) && (s.row, s.col) != (0, 1)));
    Ok(())
}

#[tokio::test]
async fn rejected_update_keeps_board() -> anyhow::Result<()> {
    let addr = start_server().await?;

    call(addr, "POST", "/update-board", r#"{"hits":[{"row":3,"col":3}],"misses":[]}"#).await?;

    let reply = call(
        addr,
        "POST",
        "/update-board",
        r#"{"hits":[{"row":4,"col":4}],"misses":[{"row":4,"col":4}]}"#,
    )
    .await?;
    assert_eq!(reply.status, 400);
    let failure: Failure = reply.json_body()?;
    assert!(!failure.success);
    assert!(failure.error.contains("(4, 4)"));

    let reply = call(addr, "POST", "/update-board", r#"{"hits":[{"row":10,"col":0}]}"#).await?;
    assert_eq!(reply.status, 400);

    let reply = call(addr, "POST", "/update-board", "not json").await?;
    assert_eq!(reply.status, 400);

    let info: BoardInfoResponse = call(addr, "GET", "/board-info", "").await?.json_body()?;
    assert_eq!(info.total_hits, 1);
    assert_eq!(info.total_misses, 0);
    Ok(())
}

#[tokio::test]
async fn reset_and_board_info() -> anyhow::Result<()> {
    let addr = start_server().await?;

    call(
        addr,
        "POST",
        "/api/update-board",
        r#"{"hits":[{"row":1,"col":1},{"row":1,"col":2}],"misses":[{"row":9,"col":9}]}"#,
    )
    .await?;
    let info: BoardInfoResponse = call(addr, "GET", "/api/board-info", "").await?.json_body()?;
    assert!(info.success);
    assert_eq!(info.board_size, 10);
    assert_eq!(info.ships.len(), 6);
    assert_eq!(info.ships[0].name, "Carrier");
    assert_eq!((info.ships[0].height, info.ships[0].width), (2, 5));
    assert_eq!(info.total_hits, 2);
    assert_eq!(info.total_misses, 1);

    let reply = call(addr, "POST", "/reset-board", "").await?;
    assert_eq!(reply.status, 200);
    let info: BoardInfoResponse = call(addr, "GET", "/board-info", "").await?.json_body()?;
    assert_eq!(info.total_hits, 0);
    assert_eq!(info.total_misses, 0);
    Ok(())
}

#[tokio::test]
async fn routing_errors_and_preflight() -> anyhow::Result<()> {
    let addr = start_server().await?;

    let reply = call(addr, "GET", "/no-such-route", "").await?;
    assert_eq!(reply.status, 404);

    let reply = call(addr, "GET", "/update-board", "").await?;
    assert_eq!(reply.status, 405);
    assert_eq!(reply.header("Allow"), Some("POST"));

    let reply = call(addr, "OPTIONS", "/update-board", "").await?;
    assert_eq!(reply.status, 204);
    assert!(reply.body.is_empty());
    assert_eq!(reply.header("Access-Control-Allow-Origin"), Some("*"));
    assert!(reply
        .header("Access-Control-Allow-Methods")
        .is_some_and(|m| m.contains("POST")));
    Ok(())
}
