//! Dailybook API client.
//!
//! Entity payloads (entries, follows, notifications, profiles) are returned
//! as [`serde_json::Value`]; only the authentication exchange is typed.

use dailybook_domain::{
    LoginRequest, LoginResponse, PageRequest, ProfileUpdate, QueryParams, RegisterRequest, routes,
};
use serde_json::Value;
use tracing::info;

use crate::auth::{TokenStatus, TokenStore};
use crate::error::ApiResult;
use crate::pipeline::{RequestOptions, RequestPipeline, json_body};
use crate::ports::{Clock, HttpTransport, SessionStorage};

/// Client for the Dailybook HTTP API.
#[derive(Debug)]
pub struct ApiClient<T, S, C> {
    pipeline: RequestPipeline<T, S, C>,
}

impl<T, S, C> ApiClient<T, S, C>
where
    T: HttpTransport,
    S: SessionStorage,
    C: Clock,
{
    /// Wraps a pipeline.
    pub const fn new(pipeline: RequestPipeline<T, S, C>) -> Self {
        Self { pipeline }
    }

    /// Returns the underlying pipeline for calls without a dedicated method.
    pub const fn pipeline(&self) -> &RequestPipeline<T, S, C> {
        &self.pipeline
    }

    fn tokens(&self) -> &TokenStore<S, C> {
        self.pipeline.token_store()
    }

    // Session

    /// Registers an account. Returns the server's confirmation text.
    ///
    /// # Errors
    /// Returns an error if the call fails.
    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<String> {
        self.pipeline
            .request_text(
                routes::REGISTER,
                RequestOptions::post().body(json_body(request)?).anonymous(),
            )
            .await
    }

    /// Logs in and persists the returned session.
    ///
    /// The stored display name is the one in the response, falling back to
    /// the submitted username.
    ///
    /// # Errors
    /// Returns an error if the call fails or the session cannot be stored.
    pub async fn login(&self, credentials: &LoginRequest) -> ApiResult<LoginResponse> {
        let response: LoginResponse = self
            .pipeline
            .request_json(
                routes::LOGIN,
                RequestOptions::post()
                    .body(json_body(credentials)?)
                    .anonymous(),
            )
            .await?;

        let username = response
            .username
            .as_deref()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| credentials.username.trim());
        let session = self
            .tokens()
            .store(&response.token, response.expires_at_raw(), Some(username))
            .await?;
        info!(
            username = session.username.as_deref().unwrap_or_default(),
            expires_at_ms = session.expires_at_ms,
            "logged in"
        );
        Ok(response)
    }

    /// Forgets the local session. The server is not contacted.
    ///
    /// # Errors
    /// Returns an error if storage cannot be cleared.
    pub async fn logout(&self) -> ApiResult<()> {
        self.tokens().clear().await?;
        info!("logged out");
        Ok(())
    }

    /// Returns true if a valid session exists. Clears an expired one.
    pub async fn is_authenticated(&self) -> bool {
        self.tokens().get_valid_token().await.is_some()
    }

    /// Returns the display name of the current session.
    pub async fn current_username(&self) -> Option<String> {
        self.tokens().current_session().await?.username
    }

    /// Reports the stored session without modifying it.
    pub async fn token_status(&self) -> TokenStatus {
        self.tokens().status().await
    }

    // Entries

    /// Creates an entry.
    ///
    /// # Errors
    /// Returns an error if the call fails.
    pub async fn create_entry(&self, entry: &Value) -> ApiResult<Value> {
        self.pipeline
            .request_json(routes::ENTRIES, RequestOptions::post().body(entry.clone()))
            .await
    }

    /// Replaces an entry.
    ///
    /// # Errors
    /// Returns an error if the call fails.
    pub async fn update_entry(&self, id: &str, entry: &Value) -> ApiResult<Value> {
        self.pipeline
            .request_json(
                &routes::join(routes::ENTRIES, id),
                RequestOptions::put().body(entry.clone()),
            )
            .await
    }

    /// Lists the caller's own entries.
    ///
    /// # Errors
    /// Returns an error if the call fails.
    pub async fn my_entries(&self) -> ApiResult<Value> {
        self.pipeline
            .request_json(routes::ENTRIES, RequestOptions::get())
            .await
    }

    /// Fetches one entry.
    ///
    /// # Errors
    /// Returns an error if the call fails.
    pub async fn entry(&self, id: &str) -> ApiResult<Value> {
        self.pipeline
            .request_json(&routes::join(routes::ENTRIES, id), RequestOptions::get())
            .await
    }

    /// Deletes an entry. Returns the server's confirmation text.
    ///
    /// # Errors
    /// Returns an error if the call fails.
    pub async fn delete_entry(&self, id: &str) -> ApiResult<String> {
        self.pipeline
            .request_text(&routes::join(routes::ENTRIES, id), RequestOptions::delete())
            .await
    }

    /// Lists public entries.
    ///
    /// # Errors
    /// Returns an error if the call fails.
    pub async fn public_entries(&self, page: PageRequest) -> ApiResult<Value> {
        self.paged(routes::ENTRIES_PUBLIC, page).await
    }

    /// Lists public entries of one author.
    ///
    /// Sent with credentials so approved followers also see
    /// followers-only entries.
    ///
    /// # Errors
    /// Returns an error if the call fails.
    pub async fn user_public_entries(&self, username: &str, page: PageRequest) -> ApiResult<Value> {
        self.paged(&routes::join(routes::ENTRIES_PUBLIC_USER, username), page)
            .await
    }

    /// Searches public entries.
    ///
    /// # Errors
    /// Returns an error if the call fails.
    pub async fn search_public_entries(&self, text: &str, page: PageRequest) -> ApiResult<Value> {
        let query = QueryParams::new()
            .with("q", text)
            .with("page", page.page)
            .with("size", page.size);
        self.pipeline
            .request_json(
                routes::ENTRIES_PUBLIC_SEARCH,
                RequestOptions::get().query(query),
            )
            .await
    }

    /// Lists entries from followed authors.
    ///
    /// # Errors
    /// Returns an error if the call fails.
    pub async fn feed_entries(&self, page: PageRequest) -> ApiResult<Value> {
        self.paged(routes::ENTRIES_FEED, page).await
    }

    // Follows

    /// Sends a follow request.
    ///
    /// # Errors
    /// Returns an error if the call fails.
    pub async fn send_follow_request(&self, username: &str) -> ApiResult<Value> {
        self.pipeline
            .request_json(&routes::join(routes::FOLLOW, username), RequestOptions::post())
            .await
    }

    /// Unfollows an account.
    ///
    /// # Errors
    /// Returns an error if the call fails.
    pub async fn unfollow(&self, username: &str) -> ApiResult<Value> {
        self.pipeline
            .request_json(
                &routes::join(routes::FOLLOW, username),
                RequestOptions::delete(),
            )
            .await
    }

    /// Lists the caller's followers.
    ///
    /// # Errors
    /// Returns an error if the call fails.
    pub async fn my_followers(&self) -> ApiResult<Value> {
        self.pipeline
            .request_json(routes::FOLLOW_ME_FOLLOWERS, RequestOptions::get())
            .await
    }

    /// Lists accounts the caller follows.
    ///
    /// # Errors
    /// Returns an error if the call fails.
    pub async fn my_following(&self) -> ApiResult<Value> {
        self.pipeline
            .request_json(routes::FOLLOW_ME_FOLLOWING, RequestOptions::get())
            .await
    }

    /// Lists pending incoming follow requests.
    ///
    /// # Errors
    /// Returns an error if the call fails.
    pub async fn pending_follow_requests(&self) -> ApiResult<Value> {
        self.pipeline
            .request_json(routes::FOLLOW_ME_REQUESTS, RequestOptions::get())
            .await
    }

    /// Approves a follow request.
    ///
    /// # Errors
    /// Returns an error if the call fails.
    pub async fn approve_follow_request(&self, username: &str) -> ApiResult<Value> {
        self.pipeline
            .request_json(
                &routes::join(routes::FOLLOW_APPROVE, username),
                RequestOptions::post(),
            )
            .await
    }

    /// Rejects a follow request.
    ///
    /// # Errors
    /// Returns an error if the call fails.
    pub async fn reject_follow_request(&self, username: &str) -> ApiResult<Value> {
        self.pipeline
            .request_json(
                &routes::join(routes::FOLLOW_REJECT, username),
                RequestOptions::delete(),
            )
            .await
    }

    // Notifications

    /// Lists notifications.
    ///
    /// # Errors
    /// Returns an error if the call fails.
    pub async fn notifications(&self, page: PageRequest) -> ApiResult<Value> {
        self.paged(routes::NOTIFICATIONS, page).await
    }

    /// Counts unread notifications.
    ///
    /// # Errors
    /// Returns an error if the call fails or the body is not a count.
    pub async fn unread_notifications_count(&self) -> ApiResult<u64> {
        self.pipeline
            .request_json(routes::NOTIFICATIONS_UNREAD_COUNT, RequestOptions::get())
            .await
    }

    /// Marks one notification read.
    ///
    /// # Errors
    /// Returns an error if the call fails.
    pub async fn mark_notification_read(&self, id: &str) -> ApiResult<()> {
        let path = format!("{}/read", routes::join(routes::NOTIFICATIONS, id));
        self.pipeline
            .request_void(&path, RequestOptions::post())
            .await
    }

    /// Marks every notification read.
    ///
    /// # Errors
    /// Returns an error if the call fails.
    pub async fn mark_all_notifications_read(&self) -> ApiResult<()> {
        self.pipeline
            .request_void(routes::NOTIFICATIONS_READ_ALL, RequestOptions::post())
            .await
    }

    // Profiles

    /// Fetches the caller's profile.
    ///
    /// # Errors
    /// Returns an error if the call fails.
    pub async fn my_profile(&self) -> ApiResult<Value> {
        self.pipeline
            .request_json(routes::PROFILE_ME, RequestOptions::get())
            .await
    }

    /// Updates the caller's profile.
    ///
    /// # Errors
    /// Returns an error if the call fails.
    pub async fn update_my_profile(&self, update: &ProfileUpdate) -> ApiResult<Value> {
        self.pipeline
            .request_json(
                routes::PROFILE_ME,
                RequestOptions::put().body(json_body(update)?),
            )
            .await
    }

    /// Fetches a profile by username.
    ///
    /// # Errors
    /// Returns an error if the call fails.
    pub async fn profile(&self, username: &str) -> ApiResult<Value> {
        self.pipeline
            .request_json(&routes::join(routes::PROFILE, username), RequestOptions::get())
            .await
    }

    /// Searches profiles.
    ///
    /// # Errors
    /// Returns an error if the call fails.
    pub async fn search_users(&self, text: &str) -> ApiResult<Value> {
        self.pipeline
            .request_json(
                routes::PROFILE_SEARCH,
                RequestOptions::get().query(QueryParams::new().with("query", text)),
            )
            .await
    }

    /// Lists suggested accounts to follow.
    ///
    /// # Errors
    /// Returns an error if the call fails.
    pub async fn suggested_users(&self) -> ApiResult<Value> {
        self.pipeline
            .request_json(routes::USERS_SUGGESTED, RequestOptions::get())
            .await
    }

    async fn paged(&self, path: &str, page: PageRequest) -> ApiResult<Value> {
        self.pipeline
            .request_json(path, RequestOptions::get().query(page.to_query()))
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::error::ApiErrorKind;
    use crate::pipeline::Endpoint;
    use crate::testing::{ManualClock, MapStorage, RecordingTransport};
    use dailybook_domain::HttpMethod;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const NOW_MS: i64 = 1_600_000_000_000;

    type TestClient = ApiClient<RecordingTransport, MapStorage, ManualClock>;

    fn client(transport: RecordingTransport) -> TestClient {
        ApiClient::new(RequestPipeline::new(
            transport,
            TokenStore::new(MapStorage::new(), ManualClock::at_ms(NOW_MS)),
            Endpoint::new("http://localhost:8080", "").unwrap(),
        ))
    }

    fn sent(client: &TestClient) -> dailybook_domain::ApiRequest {
        client.pipeline().transport().last()
    }

    #[tokio::test]
    async fn test_login_stores_session() {
        let client = client(
            RecordingTransport::new()
                .respond(200, r#"{"token":"tok1","expiresAt":1700000000,"username":"alice"}"#),
        );

        let response = client
            .login(&LoginRequest::new("alice", "secret"))
            .await
            .unwrap();
        assert_eq!(response.token, "tok1");

        let request = sent(&client);
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url.path(), "/api/auth/login");
        assert_eq!(request.header("Authorization"), None);

        assert!(client.is_authenticated().await);
        assert_eq!(client.current_username().await.as_deref(), Some("alice"));
        assert_eq!(
            client.pipeline().token_store().expires_at_ms().await,
            Some(1_700_000_000_000)
        );
    }

    #[tokio::test]
    async fn test_login_falls_back_to_submitted_username() {
        let client = client(
            RecordingTransport::new().respond(200, r#"{"token":"tok1","expiresAt":1700000000000}"#),
        );
        client
            .login(&LoginRequest::new(" bob ", "secret"))
            .await
            .unwrap();
        assert_eq!(client.current_username().await.as_deref(), Some("bob"));
    }

    #[tokio::test]
    async fn test_login_with_blank_username_uses_submitted_one() {
        let client = client(RecordingTransport::new().respond(
            200,
            r#"{"token":"tok1","expiresAt":1700000000000,"username":""}"#,
        ));
        client
            .login(&LoginRequest::new("bob", "secret"))
            .await
            .unwrap();
        assert_eq!(client.current_username().await.as_deref(), Some("bob"));
    }

    #[tokio::test]
    async fn test_failed_login_stores_nothing() {
        let client = client(RecordingTransport::new().respond(401, "Invalid credentials"));
        let err = client
            .login(&LoginRequest::new("alice", "wrong"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Invalid credentials");
        assert!(err.is_auth_rejection());
        assert!(!client.is_authenticated().await);
        assert_eq!(client.pipeline().token_store().storage().len(), 0);
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let client = client(
            RecordingTransport::new()
                .respond(200, r#"{"token":"tok1","expiresAt":1700000000,"username":"alice"}"#),
        );
        client
            .login(&LoginRequest::new("alice", "secret"))
            .await
            .unwrap();

        client.logout().await.unwrap();
        client.logout().await.unwrap();

        assert!(!client.is_authenticated().await);
        assert_eq!(client.token_status().await, TokenStatus::NotAuthenticated);
    }

    #[tokio::test]
    async fn test_register_is_anonymous_text() {
        let client = client(RecordingTransport::new().respond(200, "User registered successfully"));
        client
            .pipeline()
            .token_store()
            .store("stale", 1_700_000_000.0, None)
            .await
            .unwrap();

        let message = client
            .register(&RegisterRequest {
                username: "carol".to_string(),
                email: "carol@example.com".to_string(),
                password: "pw".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(message, "User registered successfully");
        let request = sent(&client);
        assert_eq!(request.header("Authorization"), None);
        assert_eq!(request.header("Content-Type"), Some("application/json"));
    }

    #[tokio::test]
    async fn test_paged_routes() {
        let client = client(RecordingTransport::new());

        client.feed_entries(PageRequest::default()).await.unwrap();
        assert_eq!(
            sent(&client).url.as_str(),
            "http://localhost:8080/api/entries/feed?page=0&size=10"
        );

        client
            .user_public_entries("alice", PageRequest::author_page())
            .await
            .unwrap();
        assert_eq!(
            sent(&client).url.as_str(),
            "http://localhost:8080/api/entries/public/user/alice?page=0&size=20"
        );

        client
            .search_public_entries("rust", PageRequest::new(1, 5))
            .await
            .unwrap();
        assert_eq!(sent(&client).url.query(), Some("q=rust&page=1&size=5"));
    }

    #[tokio::test]
    async fn test_entry_routes() {
        let client = client(RecordingTransport::new().respond(200, "Entry deleted"));

        let text = client.delete_entry("42").await.unwrap();
        assert_eq!(text, "Entry deleted");
        let request = sent(&client);
        assert_eq!(request.method, HttpMethod::Delete);
        assert_eq!(request.url.path(), "/api/entries/42");

        client
            .update_entry("42", &json!({"title": "t"}))
            .await
            .unwrap();
        let request = sent(&client);
        assert_eq!(request.method, HttpMethod::Put);
        assert_eq!(request.body.as_deref(), Some(r#"{"title":"t"}"#));
    }

    #[tokio::test]
    async fn test_notification_routes() {
        let client = client(RecordingTransport::new().respond(200, "4").respond(200, ""));

        assert_eq!(client.unread_notifications_count().await.unwrap(), 4);
        client.mark_notification_read("n1").await.unwrap();

        let request = sent(&client);
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url.path(), "/api/notifications/n1/read");
    }

    #[tokio::test]
    async fn test_follow_routes() {
        let client = client(RecordingTransport::new());

        client.approve_follow_request("dave").await.unwrap();
        assert_eq!(sent(&client).url.path(), "/api/follow/approve/dave");

        client.reject_follow_request("erin").await.unwrap();
        let request = sent(&client);
        assert_eq!(request.method, HttpMethod::Delete);
        assert_eq!(request.url.path(), "/api/follow/reject/erin");
    }

    #[tokio::test]
    async fn test_profile_routes() {
        let client = client(RecordingTransport::new().respond(200, "not-json"));

        let err = client.my_profile().await.unwrap_err();
        assert_eq!(err.kind(), ApiErrorKind::Parse);

        client.search_users("al").await.unwrap();
        assert_eq!(sent(&client).url.as_str(), "http://localhost:8080/api/profile/search?query=al");

        client
            .update_my_profile(&ProfileUpdate {
                bio: "hi".to_string(),
                profile_picture: String::new(),
            })
            .await
            .unwrap();
        let body: Value = serde_json::from_str(sent(&client).body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"bio": "hi", "profilePicture": ""}));
    }
}
