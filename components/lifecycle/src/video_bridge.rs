//! Video optimization message bridge.
//!
//! Other contexts (the embedded player, workers) post JSON messages asking
//! for a video preload or a targeted eviction of video caches. Anything
//! that does not match the contract is ignored; cross-context traffic
//! carries plenty of unrelated messages.

use crate::purge::{purge_matching_caches, PurgeReport};
use browser_env::{Document, NamedCacheStore, PreloadHint, PreloadKind};
use page_core::DiagnosticSink;
use serde::Deserialize;
use std::sync::Arc;

/// The cross-context message contract. Unknown `type` values fail to parse
/// and are ignored upstream.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type")]
enum CrossContextMessage {
    #[serde(rename = "videoOptimization")]
    VideoOptimization(VideoAction),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action")]
enum VideoAction {
    #[serde(rename = "preloadVideo")]
    Preload {
        #[serde(default)]
        url: Option<String>,
    },
    #[serde(rename = "cleanupCache")]
    Cleanup,
}

/// What the bridge did with a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageOutcome {
    /// A preload hint was registered for this URL.
    Preloaded(String),
    /// Video caches were evicted.
    CleanedUp(PurgeReport),
    /// The message was not for us, was malformed, or carried nothing
    /// actionable.
    Ignored,
}

/// Handles `videoOptimization` messages from other contexts.
pub struct VideoOptimizationBridge {
    document: Arc<Document>,
    caches: Arc<dyn NamedCacheStore>,
    sink: Arc<dyn DiagnosticSink>,
}

impl VideoOptimizationBridge {
    /// Creates the bridge.
    pub fn new(
        document: Arc<Document>,
        caches: Arc<dyn NamedCacheStore>,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            document,
            caches,
            sink,
        }
    }

    /// Handles one raw message payload.
    pub fn on_message(&self, payload: &str) -> MessageOutcome {
        let Ok(message) = serde_json::from_str::<CrossContextMessage>(payload) else {
            return MessageOutcome::Ignored;
        };

        match message {
            CrossContextMessage::VideoOptimization(VideoAction::Preload { url }) => {
                let Some(url) = url.filter(|u| !u.is_empty()) else {
                    return MessageOutcome::Ignored;
                };
                self.document.head().add_preload(PreloadHint {
                    href: url.clone(),
                    kind: PreloadKind::Video,
                });
                self.sink.info(&format!("video preload registered: {}", url));
                MessageOutcome::Preloaded(url)
            }
            CrossContextMessage::VideoOptimization(VideoAction::Cleanup) => {
                let report = purge_matching_caches(
                    self.caches.as_ref(),
                    self.sink.as_ref(),
                    |name| name.contains("video"),
                );
                self.sink.info(&format!(
                    "video cache cleanup removed {} caches",
                    report.deleted.len()
                ));
                MessageOutcome::CleanedUp(report)
            }
        }
    }
}
