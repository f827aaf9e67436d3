use super::ThreadId;
use crate::client::Client;
use crate::config::Config;
use crate::error::{AppError, ClientError, ConversationError, Result};
pub use crate::{log_debug, log_info};
use std::time::Duration;

/// Downloads the mobile rendering of a thread.
pub struct DocumentFetcher {
    client: Client,
    status_path: String,
}

impl DocumentFetcher {
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut builder = Client::builder()
            .base_url(&config.base_url)
            .header("accept-language", &config.accept_language)?
            .header("user-agent", &config.user_agent)?
            .timeout(Duration::from_secs(config.request_timeout));

        if let Some(proxy) = &config.proxy {
            builder = builder.proxy(proxy);
        }

        Ok(Self {
            client: builder.build()?,
            status_path: config.status_path.clone(),
        })
    }

    fn path_for(&self, thread_id: ThreadId) -> String {
        self.status_path.replace("{id}", &thread_id.to_string())
    }

    /// One attempt, no retries.
    pub async fn fetch(&self, thread_id: ThreadId) -> Result<String> {
        let path = self.path_for(thread_id);
        log_info!("[fetcher] Fetching thread {} from {}", thread_id, path);

        let response = self
            .client
            .get(&path)
            .await
            .map_err(|e| classify_fetch_error(e, thread_id))?;

        log_debug!(
            "[fetcher] Received response: Status: {}, Content Length: {} bytes",
            response.status,
            response.content.len()
        );
        Ok(response.content)
    }
}

fn classify_fetch_error(err: AppError, thread_id: ThreadId) -> AppError {
    match err {
        AppError::Client(ClientError::ResponseError {
            status_code: 404, ..
        }) => ConversationError::ThreadNotFound(thread_id.get()).into(),
        AppError::Client(ClientError::ResponseError { status_code, .. }) => {
            ConversationError::FetchFailed {
                status: status_code,
            }
            .into()
        }
        AppError::Client(ClientError::RequestFailed(reason)) => {
            ConversationError::Transport(reason).into()
        }
        AppError::Request(e) => ConversationError::Transport(e.to_string()).into(),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thread() -> ThreadId {
        ThreadId::new(100).unwrap()
    }

    fn response_error(status_code: u16) -> AppError {
        ClientError::ResponseError {
            status_code,
            message: String::new(),
        }
        .into()
    }

    #[test]
    fn not_found_status_means_missing_thread() {
        assert!(matches!(
            classify_fetch_error(response_error(404), thread()),
            AppError::Conversation(ConversationError::ThreadNotFound(100))
        ));
    }

    #[test]
    fn other_statuses_are_fetch_failures() {
        for status in [403, 429, 500, 503] {
            assert!(matches!(
                classify_fetch_error(response_error(status), thread()),
                AppError::Conversation(ConversationError::FetchFailed { status: s }) if s == status
            ));
        }
    }

    #[test]
    fn failures_without_status_are_transport_errors() {
        let err = ClientError::RequestFailed("connection refused".to_string()).into();
        assert!(matches!(
            classify_fetch_error(err, thread()),
            AppError::Conversation(ConversationError::Transport(reason)) if reason == "connection refused"
        ));
    }

    #[test]
    fn unrelated_errors_pass_through() {
        let err = ClientError::InvalidUrl("bad".to_string()).into();
        assert!(matches!(
            classify_fetch_error(err, thread()),
            AppError::Client(ClientError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn builds_thread_path_from_config() {
        let fetcher = DocumentFetcher::from_config(&Config::default()).unwrap();
        assert_eq!(
            fetcher.path_for(ThreadId::new(324214451756728320).unwrap()),
            "/string/status/324214451756728320"
        );
    }
}
