//! HTTP implementation of [`CommentBackend`]

use crate::backend::{CommentBackend, Credential, SolutionToggle, TextUpdate};
use crate::error::{ClientError, Result};
use async_trait::async_trait;
use pb_core::comment::{CommentRecord, NewComment};
use pb_core::config::BackendConfig;
use pb_core::{CommentId, ProblemId};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, trace};

/// Body of a comment creation
#[derive(Debug, Serialize)]
struct PostBody<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_id: Option<&'a CommentId>,
}

/// Error body sent by the backend
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Comment backend speaking the problem board's REST API
pub struct HttpBackend {
    client: Client,
    base_url: String,
    credential: Option<Credential>,
}

impl HttpBackend {
    /// Create a backend for `base_url` with a request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credential: None,
        })
    }

    /// Create a backend from the `[backend]` config section
    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        let backend = Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))?;
        Ok(backend.with_credential(Credential::from_env(&config.token_env)))
    }

    /// Attach the bearer token sent with each request
    pub fn with_credential(mut self, credential: Option<Credential>) -> Self {
        self.credential = credential;
        self
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn comments_url(&self, problem: &ProblemId) -> String {
        format!("{}/auth/problems/{}/comments", self.base_url, problem)
    }

    fn comment_url(&self, problem: &ProblemId, comment: &CommentId) -> String {
        format!("{}/{}", self.comments_url(problem), comment)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credential {
            Some(credential) => request.bearer_auth(credential.token()),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder, target: &str) -> Result<Response> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        trace!("{} answered {}", target, status);

        if status.is_success() {
            return Ok(response);
        }

        match status {
            StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
            StatusCode::NOT_FOUND => Err(ClientError::NotFound(target.to_string())),
            _ => {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ErrorBody>(&body)
                    .map(|e| e.detail)
                    .unwrap_or_else(|_| {
                        status
                            .canonical_reason()
                            .unwrap_or("Unknown error")
                            .to_string()
                    });
                Err(ClientError::Status {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[async_trait]
impl CommentBackend for HttpBackend {
    async fn fetch_comments(&self, problem: &ProblemId) -> Result<Vec<CommentRecord>> {
        debug!("Fetching comments for problem {}", problem);
        let request = self.client.get(self.comments_url(problem));
        let response = self.send(request, &format!("Problem {}", problem)).await?;
        Self::decode(response).await
    }

    async fn post_comment(&self, problem: &ProblemId, comment: &NewComment) -> Result<CommentRecord> {
        debug!("Posting comment on problem {}", problem);
        let body = PostBody {
            text: &comment.text,
            parent_id: comment.parent_id.as_ref(),
        };
        let request = self.client.post(self.comments_url(problem)).json(&body);
        let target = match &comment.parent_id {
            Some(parent) => format!("Comment {}", parent),
            None => format!("Problem {}", problem),
        };
        let response = self.send(request, &target).await?;
        Self::decode(response).await
    }

    async fn put_comment(
        &self,
        problem: &ProblemId,
        comment: &CommentId,
        text: &str,
    ) -> Result<CommentRecord> {
        debug!("Updating comment {} on problem {}", comment, problem);
        let body = TextUpdate {
            text: text.to_string(),
        };
        let request = self.client.put(self.comment_url(problem, comment)).json(&body);
        let response = self.send(request, &format!("Comment {}", comment)).await?;
        Self::decode(response).await
    }

    async fn delete_comment(&self, problem: &ProblemId, comment: &CommentId) -> Result<()> {
        debug!("Deleting comment {} on problem {}", comment, problem);
        let request = self.client.delete(self.comment_url(problem, comment));
        self.send(request, &format!("Comment {}", comment)).await?;
        Ok(())
    }

    async fn put_solution_toggle(
        &self,
        problem: &ProblemId,
        comment: &CommentId,
    ) -> Result<SolutionToggle> {
        debug!("Toggling solution flag of comment {} on problem {}", comment, problem);
        let url = format!("{}/solution", self.comment_url(problem, comment));
        let response = self
            .send(self.client.put(url), &format!("Comment {}", comment))
            .await?;
        Self::decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn backend() -> HttpBackend {
        HttpBackend::new("http://127.0.0.1:8000/", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        assert_eq!(backend().base_url(), "http://127.0.0.1:8000");
    }

    #[test]
    fn test_routes() {
        let backend = backend();
        let problem = ProblemId::from(12u64);
        assert_eq!(
            backend.comments_url(&problem),
            "http://127.0.0.1:8000/auth/problems/12/comments"
        );
        assert_eq!(
            backend.comment_url(&problem, &CommentId::from("7")),
            "http://127.0.0.1:8000/auth/problems/12/comments/7"
        );
    }

    #[test]
    fn test_from_config() {
        let config = BackendConfig {
            base_url: "https://board.example.org".to_string(),
            timeout_secs: 10,
            token_env: "PROBBOARD_TEST_TOKEN_THAT_IS_NEVER_SET".to_string(),
        };
        let backend = HttpBackend::from_config(&config).unwrap();
        assert_eq!(backend.base_url(), "https://board.example.org");
        assert!(backend.credential.is_none());
    }

    #[test]
    fn test_post_body_omits_missing_parent() {
        let body = PostBody {
            text: "hello",
            parent_id: None,
        };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"text":"hello"}"#);

        let parent = CommentId::from("3");
        let body = PostBody {
            text: "hello",
            parent_id: Some(&parent),
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"text":"hello","parent_id":"3"}"#
        );
    }
}
