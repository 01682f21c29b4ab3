//! Resource version stamping.
//!
//! Appends a `v={now}` parameter to script and stylesheet URLs that do not
//! already carry a `v` parameter, defeating stale HTTP caches for the
//! page's own resources. Shipped switched off, like the startup sweep.

use browser_env::{append_param, has_param, Clock, Document};
use std::sync::Arc;

/// Stamps head resources with a version parameter at load when enabled.
pub struct ResourceVersionStamper {
    document: Arc<Document>,
    clock: Arc<dyn Clock>,
    enabled: bool,
}

impl ResourceVersionStamper {
    /// Creates the stamper.
    pub fn new(document: Arc<Document>, clock: Arc<dyn Clock>, enabled: bool) -> Self {
        Self {
            document,
            clock,
            enabled,
        }
    }

    /// Stamps every unversioned script and stylesheet URL. Returns the
    /// number of URLs rewritten.
    pub fn on_load(&self) -> usize {
        if !self.enabled {
            return 0;
        }
        let stamp = self.clock.now().to_string();
        let head = self.document.head();

        let mut rewritten = 0;
        let mut stamp_all = |urls: Vec<String>| -> Vec<String> {
            urls.into_iter()
                .map(|url| {
                    if has_param(&url, "v") {
                        url
                    } else {
                        rewritten += 1;
                        append_param(&url, "v", &stamp)
                    }
                })
                .collect()
        };

        let scripts = stamp_all(head.scripts());
        let stylesheets = stamp_all(head.stylesheets());
        head.replace_scripts(scripts);
        head.replace_stylesheets(stylesheets);

        rewritten
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use browser_env::{ManualClock, PageUrl};
    use page_core::EpochMillis;

    fn stamper(enabled: bool) -> (Arc<Document>, ResourceVersionStamper) {
        let document = Arc::new(Document::new(
            PageUrl::parse("https://app.example.com/").unwrap(),
        ));
        let clock = Arc::new(ManualClock::new(EpochMillis::from_millis(777)));
        let stamper = ResourceVersionStamper::new(document.clone(), clock, enabled);
        (document, stamper)
    }

    #[test]
    fn test_disabled_stamper_changes_nothing() {
        let (document, stamper) = stamper(false);
        document.head().add_script("/main.js");

        assert_eq!(stamper.on_load(), 0);
        assert_eq!(document.head().scripts(), vec!["/main.js"]);
    }

    #[test]
    fn test_stamps_scripts_and_stylesheets() {
        let (document, stamper) = stamper(true);
        document.head().add_script("/main.js");
        document.head().add_stylesheet("/style.css");

        assert_eq!(stamper.on_load(), 2);
        assert_eq!(document.head().scripts(), vec!["/main.js?v=777"]);
        assert_eq!(document.head().stylesheets(), vec!["/style.css?v=777"]);
    }

    #[test]
    fn test_already_versioned_urls_are_kept() {
        let (document, stamper) = stamper(true);
        document.head().add_script("/main.js?v=9");
        document.head().add_script("/other.js");

        assert_eq!(stamper.on_load(), 1);
        assert_eq!(
            document.head().scripts(),
            vec!["/main.js?v=9", "/other.js?v=777"]
        );
    }

    #[test]
    fn test_existing_query_joins_with_ampersand() {
        let (document, stamper) = stamper(true);
        document.head().add_script("/main.js?defer=1");

        stamper.on_load();
        assert_eq!(document.head().scripts(), vec!["/main.js?defer=1&v=777"]);
    }
}
