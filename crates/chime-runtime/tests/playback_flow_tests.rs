//! End-to-end playback through `PlaybackService` with real processes.
//!
//! Host audio programs are replaced by POSIX stand-ins: `true` plays
//! anything instantly, `sleep` "speaks" for as many seconds as its text says.
#![cfg(unix)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chime_core::{
    Category, ConcurrencyGate, HostAudio, PlaybackError, PlaybackService, StatCache,
    StatCacheConfig, ToolRequest,
};
use chime_runtime::TokioProcessSupervisor;
use serde_json::json;
use tempfile::NamedTempFile;

fn service(timeout: Duration) -> Arc<PlaybackService> {
    let host = HostAudio {
        player: PathBuf::from("true"),
        speech: PathBuf::from("sleep"),
        sound_dir: PathBuf::from("/nonexistent/sounds"),
        sound_extension: "aiff".to_string(),
    };
    Arc::new(PlaybackService::new(
        ConcurrencyGate::new(),
        Arc::new(StatCache::with_system_provider(StatCacheConfig::default())),
        Arc::new(TokioProcessSupervisor::new(Duration::from_millis(200))),
        host,
        timeout,
    ))
}

async fn wait_until_active(service: &PlaybackService, category: Category) {
    for _ in 0..200 {
        if service.gate().is_active(category) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("{category} never became active");
}

#[tokio::test]
async fn test_system_sound_plays() {
    let service = service(Duration::from_secs(10));
    let message = service
        .play(&json!({"type": "system", "name": "Glass"}))
        .await
        .unwrap();
    assert_eq!(message, "Played system sound 'Glass'");
    assert_eq!(service.gate().active_count(), 0);
}

#[tokio::test]
async fn test_file_playback_resolves_metadata() {
    let service = service(Duration::from_secs(10));
    let file = NamedTempFile::new().unwrap();
    let path = file.path().to_path_buf();

    let message = service
        .play(&json!({"type": "file", "path": path}))
        .await
        .unwrap();

    assert_eq!(message, format!("Played {}", path.display()));
    assert!(service.cache().contains(&path));
}

#[tokio::test]
async fn test_missing_file_fails_and_releases_slot() {
    let service = service(Duration::from_secs(10));
    let params = json!({"type": "file", "path": "/nonexistent/chime/missing.wav"});

    for _ in 0..2 {
        let err = service.play(&params).await.unwrap_err();
        assert!(matches!(err, PlaybackError::Path { .. }), "got {err:?}");
        assert!(err.to_string().contains("file not found"));
        assert!(!service.gate().is_active(Category::File));
    }
}

#[tokio::test]
async fn test_same_category_is_rejected_while_other_categories_proceed() {
    let service = service(Duration::from_millis(500));

    let speaking = {
        let service = Arc::clone(&service);
        tokio::spawn(async move { service.play(&json!({"type": "tts", "text": "30"})).await })
    };
    wait_until_active(&service, Category::Tts).await;

    let rejected = service
        .play(&json!({"type": "tts", "text": "5"}))
        .await
        .unwrap_err();
    assert!(matches!(
        rejected,
        PlaybackError::AlreadyActive {
            category: Category::Tts
        }
    ));

    service
        .play(&json!({"type": "system", "name": "Ping"}))
        .await
        .unwrap();

    let first = speaking.await.unwrap().unwrap_err();
    assert!(matches!(first, PlaybackError::Timeout { .. }), "got {first:?}");
    assert_eq!(first.to_string(), "sleep timed out after 500 ms");
    assert!(!service.gate().is_active(Category::Tts));
}

#[tokio::test]
async fn test_handle_reports_errors_as_results() {
    let service = service(Duration::from_secs(10));

    let ok = service
        .handle(&ToolRequest::new("play_alert", json!({"kind": "warning"})))
        .await;
    assert!(!ok.is_error);
    assert_eq!(ok.message, "Played warning alert");

    let bad = service
        .handle(&ToolRequest::new("play_audio", json!({"type": "file", "path": "relative.wav"})))
        .await;
    assert!(bad.is_error);

    let unknown = service
        .handle(&ToolRequest::new("rewind", json!({})))
        .await;
    assert!(unknown.is_error);
    assert_eq!(unknown.message, "Unknown operation 'rewind'");
}

#[tokio::test]
async fn test_dropped_request_releases_slot() {
    let service = service(Duration::from_secs(30));

    let abandoned = tokio::time::timeout(
        Duration::from_millis(200),
        service.play(&json!({"type": "tts", "text": "30"})),
    )
    .await;
    assert!(abandoned.is_err());
    assert!(!service.gate().is_active(Category::Tts));

    let message = service
        .play(&json!({"type": "tts", "text": "0"}))
        .await
        .unwrap();
    assert_eq!(message, "Spoke 1 character");
}
