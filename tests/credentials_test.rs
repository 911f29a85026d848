use std::path::PathBuf;

use chrono::Utc;
use spotify2ytmusic::management::CredentialsManager;

#[test]
fn test_parse_oauth_file() {
    let credentials = CredentialsManager::parse(
        r#"{"access_token": "ya29.token", "refresh_token": "1//refresh", "expires_at": 1700000000, "scope": "https://www.googleapis.com/auth/youtube"}"#,
    )
    .unwrap();

    // token_type defaults to Bearer
    assert_eq!(credentials.token_type, "Bearer");
    assert_eq!(credentials.refresh_token.as_deref(), Some("1//refresh"));

    let manager = CredentialsManager::new(PathBuf::from("oauth.json"), credentials);
    assert_eq!(manager.authorization(), "Bearer ya29.token");
    assert!(manager.is_expired());
}

#[test]
fn test_parse_rejects_bad_files() {
    assert!(CredentialsManager::parse("{}").is_err());
    assert!(CredentialsManager::parse(r#"{"access_token": "  "}"#).is_err());
    assert!(CredentialsManager::parse("oauth").is_err());
}

#[test]
fn test_unexpired_tokens() {
    let future = Utc::now().timestamp() + 3600;
    let fresh = CredentialsManager::parse(&format!(
        r#"{{"access_token": "abc", "token_type": "Bearer", "expires_at": {}}}"#,
        future
    ))
    .unwrap();
    let manager = CredentialsManager::new(PathBuf::from("oauth.json"), fresh);
    assert!(!manager.is_expired());

    let undated = CredentialsManager::parse(r#"{"access_token": "abc"}"#).unwrap();
    let manager = CredentialsManager::new(PathBuf::from("oauth.json"), undated);
    assert!(!manager.is_expired());
}

#[tokio::test]
async fn test_load_missing_file() {
    let result = CredentialsManager::load(&PathBuf::from("/nonexistent/oauth.json")).await;
    assert!(result.is_err());
}
