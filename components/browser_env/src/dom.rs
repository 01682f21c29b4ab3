//! Document model.
//!
//! Only the parts of the document the runtime touches are modeled: element
//! ancestry for click interception, the head's script/stylesheet/preload
//! resources for cache-busting, the current URL, and the loading indicator.

use crate::url::PageUrl;
use std::sync::{Arc, Mutex, RwLock};

// ============================================================================
// Elements
// ============================================================================

/// A document element with its ancestor chain.
///
/// Elements are immutable once built; a click target is represented by the
/// innermost element, and interception walks up through `parent`.
#[derive(Clone)]
pub struct Element {
    data: Arc<ElementData>,
}

struct ElementData {
    tag: String,
    href: Option<String>,
    parent: Option<Element>,
}

impl Element {
    /// Creates a parentless element.
    pub fn new(tag: &str) -> Self {
        Self {
            data: Arc::new(ElementData {
                tag: tag.to_ascii_lowercase(),
                href: None,
                parent: None,
            }),
        }
    }

    /// Creates a parentless anchor with an href.
    pub fn anchor(href: &str) -> Self {
        Self {
            data: Arc::new(ElementData {
                tag: "a".to_string(),
                href: Some(href.to_string()),
                parent: None,
            }),
        }
    }

    /// Creates a child element of `self`.
    pub fn child(&self, tag: &str) -> Self {
        Self {
            data: Arc::new(ElementData {
                tag: tag.to_ascii_lowercase(),
                href: None,
                parent: Some(self.clone()),
            }),
        }
    }

    /// Lowercased tag name.
    pub fn tag(&self) -> &str {
        &self.data.tag
    }

    /// The href attribute, if present.
    pub fn href(&self) -> Option<&str> {
        self.data.href.as_deref()
    }

    /// Parent element, if any.
    pub fn parent(&self) -> Option<Element> {
        self.data.parent.clone()
    }

    /// Walks from this element up the ancestor chain and returns the first
    /// anchor carrying an href, if one exists.
    pub fn closest_anchor(&self) -> Option<Element> {
        let mut current = Some(self.clone());
        while let Some(element) = current {
            if element.tag() == "a" && element.href().is_some() {
                return Some(element);
            }
            current = element.parent();
        }
        None
    }
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.data.tag)
            .field("href", &self.data.href)
            .finish()
    }
}

// ============================================================================
// Preload hints
// ============================================================================

/// The `as` destination of a preload hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreloadKind {
    /// JavaScript resource.
    Script,
    /// Stylesheet resource.
    Style,
    /// Image resource.
    Image,
    /// Video resource.
    Video,
    /// Anything else.
    Fetch,
}

impl PreloadKind {
    /// Infers the preload kind from the URL's extension.
    pub fn for_url(url: &str) -> Self {
        let path = url.split(['?', '#']).next().unwrap_or(url);
        if path.ends_with(".js") {
            PreloadKind::Script
        } else if path.ends_with(".css") {
            PreloadKind::Style
        } else if path.ends_with(".jpg") || path.ends_with(".jpeg") || path.ends_with(".png") {
            PreloadKind::Image
        } else {
            PreloadKind::Fetch
        }
    }

    /// The `as` attribute value.
    pub fn as_str(&self) -> &'static str {
        match self {
            PreloadKind::Script => "script",
            PreloadKind::Style => "style",
            PreloadKind::Image => "image",
            PreloadKind::Video => "video",
            PreloadKind::Fetch => "fetch",
        }
    }
}

/// A declarative early-fetch instruction recorded in the head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreloadHint {
    /// Resource URL, including any uniqueness stamp.
    pub href: String,
    /// Preload destination.
    pub kind: PreloadKind,
}

// ============================================================================
// Document head
// ============================================================================

/// The head's mutable resource lists.
#[derive(Debug, Default)]
pub struct DocumentHead {
    scripts: RwLock<Vec<String>>,
    stylesheets: RwLock<Vec<String>>,
    preloads: RwLock<Vec<PreloadHint>>,
}

impl DocumentHead {
    /// Creates an empty head.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a script URL.
    pub fn add_script(&self, url: &str) {
        self.scripts.write().unwrap().push(url.to_string());
    }

    /// Appends a stylesheet URL.
    pub fn add_stylesheet(&self, url: &str) {
        self.stylesheets.write().unwrap().push(url.to_string());
    }

    /// All script URLs, in document order.
    pub fn scripts(&self) -> Vec<String> {
        self.scripts.read().unwrap().clone()
    }

    /// All stylesheet URLs, in document order.
    pub fn stylesheets(&self) -> Vec<String> {
        self.stylesheets.read().unwrap().clone()
    }

    /// Replaces the script list wholesale, preserving order.
    pub fn replace_scripts(&self, urls: Vec<String>) {
        *self.scripts.write().unwrap() = urls;
    }

    /// Replaces the stylesheet list wholesale, preserving order.
    pub fn replace_stylesheets(&self, urls: Vec<String>) {
        *self.stylesheets.write().unwrap() = urls;
    }

    /// Records a preload hint.
    pub fn add_preload(&self, hint: PreloadHint) {
        self.preloads.write().unwrap().push(hint);
    }

    /// All recorded preload hints, in insertion order.
    pub fn preloads(&self) -> Vec<PreloadHint> {
        self.preloads.read().unwrap().clone()
    }
}

// ============================================================================
// Loading indicator
// ============================================================================

/// The host's loading indicator element, visible until hidden.
#[derive(Debug)]
pub struct LoadingIndicator {
    visible: Mutex<bool>,
}

impl LoadingIndicator {
    fn new() -> Self {
        Self {
            visible: Mutex::new(true),
        }
    }

    /// Returns true while the indicator is shown.
    pub fn is_visible(&self) -> bool {
        *self.visible.lock().unwrap()
    }

    /// Hides the indicator. Returns true when it was visible, false when
    /// the write was skipped because it was already hidden.
    pub fn hide(&self) -> bool {
        let mut visible = self.visible.lock().unwrap();
        let was_visible = *visible;
        *visible = false;
        was_visible
    }
}

// ============================================================================
// Document
// ============================================================================

/// The document: current URL, head resources, loading indicator.
#[derive(Debug)]
pub struct Document {
    url: RwLock<PageUrl>,
    head: DocumentHead,
    indicator: LoadingIndicator,
}

impl Document {
    /// Creates a document at the given URL with an empty head and a visible
    /// loading indicator.
    pub fn new(url: PageUrl) -> Self {
        Self {
            url: RwLock::new(url),
            head: DocumentHead::new(),
            indicator: LoadingIndicator::new(),
        }
    }

    /// The current document URL.
    pub fn url(&self) -> PageUrl {
        self.url.read().unwrap().clone()
    }

    /// Moves the document to a new URL without a load (history transition).
    pub fn set_url(&self, url: PageUrl) {
        *self.url.write().unwrap() = url;
    }

    /// The head's resource lists.
    pub fn head(&self) -> &DocumentHead {
        &self.head
    }

    /// The loading indicator element.
    pub fn loading_indicator(&self) -> &LoadingIndicator {
        &self.indicator
    }
}
