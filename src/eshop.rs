use crate::config::UpstreamConfig;

mod data;
pub use data::{Categories, Game, Page};

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("Requesting eShop listing: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("Decoding eShop listing: {0}")]
    Decode(#[source] serde_json::Error),
}

impl UpstreamError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Decode(_) => "decode",
        }
    }
}

/// Something that can hand out pages of the game catalog starting at a given offset.
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    async fn load_page(&self, offset: usize) -> Result<Page, UpstreamError>;
}

pub struct Client {
    req_client: reqwest::Client,
    config: UpstreamConfig,
}

impl Client {
    pub fn new(config: UpstreamConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            req_client: builder.build()?,
            config,
        })
    }
}

#[async_trait::async_trait]
impl CatalogSource for Client {
    #[tracing::instrument(skip(self))]
    async fn load_page(&self, offset: usize) -> Result<Page, UpstreamError> {
        let resp = self
            .req_client
            .get(&self.config.base_url)
            .query(&self.config.query())
            .query(&[("offset", offset)])
            .send()
            .await
            .map_err(UpstreamError::Transport)?;

        // The feed answers errors with an HTML page, which fails decoding below.
        let status = resp.status();
        if !status.is_success() {
            tracing::warn!("Non Success Response: {:?}", status);
        }

        let raw_content = resp.bytes().await.map_err(UpstreamError::Transport)?;

        let content: data::GamesResponse =
            serde_json::from_slice(&raw_content).map_err(UpstreamError::Decode)?;

        Ok(content.into())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use super::*;

    type Seen = Arc<Mutex<Vec<HashMap<String, String>>>>;

    async fn fake_feed(body: &'static str, status: axum::http::StatusCode) -> (String, Seen) {
        let seen: Seen = Arc::default();

        let app = axum::Router::new()
            .route(
                "/json/content/get/filter/game",
                axum::routing::get(
                    move |axum::extract::State(seen): axum::extract::State<Seen>,
                     axum::extract::Query(query): axum::extract::Query<HashMap<String, String>>| async move {
                        seen.lock().unwrap().push(query);
                        (status, body)
                    },
                ),
            )
            .with_state(seen.clone());

        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = axum::Server::from_tcp(listener)
            .unwrap()
            .serve(app.into_make_service());
        tokio::spawn(server);

        (format!("http://{addr}/json/content/get/filter/game"), seen)
    }

    fn client(base_url: String) -> Client {
        Client::new(UpstreamConfig {
            base_url,
            ..UpstreamConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn sends_filter_and_offset() {
        let (url, seen) = fake_feed(
            r#"{"filter": {"total": 42}, "games": {"game": [{"slug": "a"}, {"slug": "b"}]}}"#,
            axum::http::StatusCode::OK,
        )
        .await;

        let page = client(url).load_page(17).await.unwrap();

        assert_eq!(42, page.total);
        assert_eq!(
            vec!["a", "b"],
            page.games.iter().map(|g| g.slug.as_str()).collect::<Vec<_>>()
        );

        let seen = seen.lock().unwrap();
        assert_eq!(1, seen.len());
        let query = &seen[0];
        assert_eq!(Some("switch"), query.get("system").map(String::as_str));
        assert_eq!(Some("title"), query.get("sort").map(String::as_str));
        assert_eq!(Some("asc"), query.get("direction").map(String::as_str));
        assert_eq!(Some("ncom"), query.get("shop").map(String::as_str));
        assert_eq!(Some("17"), query.get("offset").map(String::as_str));
    }

    #[tokio::test]
    async fn null_game_list_is_empty_page() {
        let (url, _) = fake_feed(
            r#"{"filter": {"total": 0}, "games": {"game": null}}"#,
            axum::http::StatusCode::OK,
        )
        .await;

        let page = client(url).load_page(0).await.unwrap();

        assert_eq!(Page { games: Vec::new(), total: 0 }, page);
    }

    #[tokio::test]
    async fn malformed_body_is_decode_error() {
        let (url, _) = fake_feed(
            "<html>Service Unavailable</html>",
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
        )
        .await;

        let err = client(url).load_page(0).await.unwrap_err();

        assert!(matches!(err, UpstreamError::Decode(_)), "{:?}", err);
        assert_eq!("decode", err.kind());
    }

    #[tokio::test]
    async fn unreachable_feed_is_transport_error() {
        let addr = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };

        let err = client(format!("http://{addr}/"))
            .load_page(0)
            .await
            .unwrap_err();

        assert!(matches!(err, UpstreamError::Transport(_)), "{:?}", err);
        assert_eq!("transport", err.kind());
    }
}
