use conversation_scraper::config::Config;
use conversation_scraper::{AppError, ConversationError, ConversationScraper, Direction, Mode};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

const THREAD_PAGE: &str = include_str!("fixtures/thread.html");

fn response(status: &str, extra_headers: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n{extra_headers}\r\n{body}",
        body.len()
    )
}

/// Serves `responses` in order, one connection each, and hands back the raw
/// request heads it received.
async fn serve(responses: Vec<String>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let mut requests = Vec::new();
        for reply in responses {
            let (mut stream, _) = listener.accept().await.unwrap();

            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            requests.push(String::from_utf8_lossy(&head).into_owned());

            stream.write_all(reply.as_bytes()).await.unwrap();
            let _ = stream.shutdown().await;
        }
        requests
    });

    (base_url, handle)
}

fn scraper_for(base_url: String) -> ConversationScraper {
    let config = Config {
        base_url,
        request_timeout: 5,
        ..Config::default()
    };
    ConversationScraper::new(&config).unwrap()
}

#[tokio::test]
async fn fetches_thread_with_fixed_headers() {
    let (base_url, server) = serve(vec![response("200 OK", "", THREAD_PAGE)]).await;
    let mut scraper = scraper_for(base_url);

    let conversation = scraper
        .fetch_conversation("100", Mode::Ids, Direction::Both)
        .await
        .unwrap();
    let ids: Vec<u64> = conversation.tweets.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![90, 95, 150, 160]);
    assert_eq!(scraper.raw_html(), Some(THREAD_PAGE));

    let requests = server.await.unwrap();
    let head = requests[0].to_lowercase();
    assert!(head.starts_with("get /string/status/100 http/1.1"), "{head}");
    assert!(head.contains("user-agent: msie 6.0\r\n"), "{head}");
    assert!(head.contains("accept-language: en\r\n"), "{head}");
}

#[tokio::test]
async fn follows_redirect_to_author_path() {
    let (base_url, server) = serve(vec![
        response("302 Found", "Location: /alice/status/100\r\n", ""),
        response("200 OK", "", THREAD_PAGE),
    ])
    .await;
    let mut scraper = scraper_for(base_url);

    let conversation = scraper
        .fetch_conversation("100", Mode::Data, Direction::After)
        .await
        .unwrap();
    let ids: Vec<u64> = conversation.tweets.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![150, 160]);
    assert_eq!(
        conversation.tweets[0].fields.as_ref().unwrap().username.as_deref(),
        Some("carol")
    );

    let requests = server.await.unwrap();
    assert_eq!(requests.len(), 2);
    let redirected = requests[1].to_lowercase();
    assert!(redirected.starts_with("get /alice/status/100 http/1.1"), "{redirected}");
    assert!(redirected.contains("user-agent: msie 6.0\r\n"), "{redirected}");
}

#[tokio::test]
async fn not_found_after_redirect_is_missing_thread() {
    let (base_url, server) = serve(vec![
        response("301 Moved Permanently", "Location: /alice/status/100\r\n", ""),
        response("404 Not Found", "", "gone"),
    ])
    .await;
    let mut scraper = scraper_for(base_url);

    let err = scraper
        .fetch_conversation("100", Mode::Ids, Direction::Both)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Conversation(ConversationError::ThreadNotFound(100))
    ));
    assert!(scraper.raw_html().is_none());
    server.await.unwrap();
}

#[tokio::test]
async fn server_error_is_fetch_failure() {
    let (base_url, server) = serve(vec![response("500 Internal Server Error", "", "oops")]).await;
    let mut scraper = scraper_for(base_url);

    let err = scraper
        .fetch_conversation("100", Mode::Ids, Direction::Both)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Conversation(ConversationError::FetchFailed { status: 500 })
    ));
    server.await.unwrap();
}

#[tokio::test]
async fn raw_html_survives_parse_failure() {
    let (base_url, server) = serve(vec![response("200 OK", "", "")]).await;
    let mut scraper = scraper_for(base_url);

    let err = scraper
        .fetch_conversation("100", Mode::Data, Direction::Both)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Conversation(ConversationError::Parse(_))
    ));
    assert_eq!(scraper.raw_html(), Some(""));
    server.await.unwrap();
}

#[tokio::test]
async fn closed_port_is_transport_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    let mut scraper = scraper_for(base_url);

    let err = scraper
        .fetch_conversation("100", Mode::Ids, Direction::Both)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Conversation(ConversationError::Transport(_))
    ));
}
