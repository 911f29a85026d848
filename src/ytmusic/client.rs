use async_trait::async_trait;
use chrono::Utc;
use reqwest::{
    Client,
    header::{AUTHORIZATION, HeaderMap, HeaderValue, ORIGIN, USER_AGENT},
};
use serde_json::{Value, json};

use crate::{
    config,
    management::CredentialsManager,
    types::{AlbumSummary, CandidateTrack, PlaylistSummary, Privacy},
    utils,
    ytmusic::{MusicService, ServiceError, parser},
};

const YTMUSIC_ORIGIN: &str = "https://music.youtube.com";
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

// search filters as sent by the web client
const SONGS_FILTER: &str = "EgWKAQIIAWoMEA4QChADEAQQCRAF";
const VIDEOS_FILTER: &str = "EgWKAQIQAWoMEA4QChADEAQQCRAF";
const ALBUMS_FILTER: &str = "EgWKAQIYAWoMEA4QChADEAQQCRAF";

const LIBRARY_PLAYLISTS_BROWSE_ID: &str = "FEmusic_liked_playlists";
const MAX_LIBRARY_PLAYLISTS: usize = 5000;

/// YouTube Music client speaking the InnerTube API of the web player.
///
/// Every request is a `POST` of a JSON body carrying the web client
/// `context`, authenticated with the bearer token of `oauth.json`. Responses
/// are returned as raw [`Value`]s and handed to [`parser`].
///
/// # Example
///
/// ```
/// let credentials = CredentialsManager::load(Path::new("oauth.json")).await?;
/// let client = YtMusicClient::new(&credentials)?;
/// let songs = client.search_songs("Bohemian Rhapsody by Queen").await?;
/// ```
pub struct YtMusicClient {
    http: Client,
    base_url: String,
    language: String,
    headers: HeaderMap,
}

impl YtMusicClient {
    /// Builds a client against the configured API URL and language.
    ///
    /// See [`config::ytmusic_api_url`] and [`config::ytmusic_language`].
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Api`] when the access token cannot be sent as
    /// a header value.
    pub fn new(credentials: &CredentialsManager) -> Result<Self, ServiceError> {
        Self::with_base_url(
            credentials,
            config::ytmusic_api_url(),
            config::ytmusic_language(),
        )
    }

    /// Builds a client against an explicit InnerTube base URL, e.g. a local
    /// mock server.
    ///
    /// # Arguments
    ///
    /// * `credentials` - Loaded `oauth.json`
    /// * `base_url` - InnerTube endpoint root, a trailing `/` is ignored
    /// * `language` - Interface language sent as `hl`
    pub fn with_base_url(
        credentials: &CredentialsManager,
        base_url: String,
        language: String,
    ) -> Result<Self, ServiceError> {
        let mut headers = HeaderMap::new();
        let authorization = HeaderValue::from_str(&credentials.authorization())
            .map_err(|e| ServiceError::Api(format!("invalid access token: {}", e)))?;
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(ORIGIN, HeaderValue::from_static(YTMUSIC_ORIGIN));
        headers.insert("x-origin", HeaderValue::from_static(YTMUSIC_ORIGIN));
        headers.insert("x-goog-authuser", HeaderValue::from_static("0"));
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));

        Ok(Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            language,
            headers,
        })
    }

    /// The `context` object the web client sends with every request. The
    /// client version is derived from today's date like the web player does.
    fn context(&self) -> Value {
        json!({
            "client": {
                "clientName": "WEB_REMIX",
                "clientVersion": Utc::now().format("1.%Y%m%d.01.00").to_string(),
                "hl": self.language,
            },
            "user": {},
        })
    }

    /// Sends `body` (with the context added) to `endpoint`.
    ///
    /// Non-success HTTP statuses become [`ServiceError::Http`].
    async fn post(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
        mut body: Value,
    ) -> Result<Value, ServiceError> {
        if let Some(obj) = body.as_object_mut() {
            obj.insert("context".to_string(), self.context());
        }

        let response = self
            .http
            .post(format!("{}/{}", self.base_url, endpoint))
            .headers(self.headers.clone())
            .query(&[("alt", "json")])
            .query(query)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<Value>().await?)
    }

    /// A filtered search; `params` selects songs, videos or albums.
    async fn search(&self, query: &str, params: &str) -> Result<Value, ServiceError> {
        self.post("search", &[], json!({ "query": query, "params": params }))
            .await
    }

    async fn browse(&self, browse_id: &str) -> Result<Value, ServiceError> {
        self.post("browse", &[], json!({ "browseId": browse_id }))
            .await
    }
}

#[async_trait]
impl MusicService for YtMusicClient {
    async fn search_albums(&self, query: &str) -> Result<Vec<AlbumSummary>, ServiceError> {
        let response = self.search(query, ALBUMS_FILTER).await?;
        Ok(parser::parse_search_albums(&response))
    }

    async fn search_songs(&self, query: &str) -> Result<Vec<CandidateTrack>, ServiceError> {
        let response = self.search(query, SONGS_FILTER).await?;
        Ok(parser::parse_search_songs(&response))
    }

    async fn search_videos(&self, query: &str) -> Result<Vec<CandidateTrack>, ServiceError> {
        let response = self.search(query, VIDEOS_FILTER).await?;
        Ok(parser::parse_search_videos(&response))
    }

    async fn search_suggestions(&self, query: &str) -> Result<Vec<String>, ServiceError> {
        let response = self
            .post("music/get_search_suggestions", &[], json!({ "input": query }))
            .await?;
        Ok(parser::parse_search_suggestions(&response))
    }

    async fn get_album_tracks(&self, browse_id: &str) -> Result<Vec<CandidateTrack>, ServiceError> {
        let response = self.browse(browse_id).await?;
        parser::parse_album_tracks(&response)
    }

    async fn create_playlist(
        &self,
        title: &str,
        description: &str,
        privacy: Privacy,
    ) -> Result<String, ServiceError> {
        let body = json!({
            "title": title,
            "description": description,
            "privacyStatus": privacy.as_api_str(),
        });
        let response = self.post("playlist/create", &[], body).await?;
        parser::parse_created_playlist_id(&response)
    }

    async fn append_to_playlist(
        &self,
        playlist_id: &str,
        track_id: &str,
    ) -> Result<(), ServiceError> {
        let body = json!({
            "playlistId": utils::playlist_id_from_browse_id(playlist_id),
            "actions": [{
                "action": "ACTION_ADD_VIDEO",
                "addedVideoId": track_id,
                "dedupeOption": "DEDUPE_OPTION_SKIP",
            }],
        });
        let response = self.post("browse/edit_playlist", &[], body).await?;
        parser::check_edit_status(&response)
    }

    async fn like_track(&self, track_id: &str) -> Result<(), ServiceError> {
        self.post("like/like", &[], json!({ "target": { "videoId": track_id } }))
            .await?;
        Ok(())
    }

    /// Follows the continuation tokens of the library grid, up to 5000
    /// playlists.
    async fn list_playlists(&self) -> Result<Vec<PlaylistSummary>, ServiceError> {
        let response = self.browse(LIBRARY_PLAYLISTS_BROWSE_ID).await?;
        let (mut playlists, mut continuation) = parser::parse_library_playlists(&response);

        while let Some(token) = continuation.take() {
            if playlists.len() >= MAX_LIBRARY_PLAYLISTS {
                break;
            }
            let query = [
                ("ctoken", token.as_str()),
                ("continuation", token.as_str()),
                ("type", "next"),
            ];
            let response = self.post("browse", &query, json!({})).await?;
            let (page, next) = parser::parse_library_continuation(&response);
            if page.is_empty() {
                break;
            }
            playlists.extend(page);
            continuation = next;
        }

        Ok(playlists)
    }

    /// Accepts a playlist id with or without the `VL` browse prefix.
    async fn get_playlist(&self, playlist_id: &str) -> Result<PlaylistSummary, ServiceError> {
        let browse_id = if playlist_id.starts_with("VL") {
            playlist_id.to_string()
        } else {
            format!("VL{}", playlist_id)
        };
        let response = self.browse(&browse_id).await?;
        parser::parse_playlist(&response, playlist_id)
    }
}
