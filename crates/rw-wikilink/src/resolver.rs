//! Destination resolution.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters escaped in a URL path segment.
///
/// Unreserved characters and `$ & + : = @` stay literal; `/ ; , ?` and
/// everything else is percent-encoded.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b':')
    .remove(b'=')
    .remove(b'@');

/// Maps a raw wikilink destination to a link target and whether it exists.
///
/// Implemented for any `Fn(&str) -> (String, bool)`. Resolvers may be called
/// many times, from several threads when documents are rendered in parallel,
/// and must return the same result for the same input.
///
/// # Example
///
/// ```
/// use rw_wikilink::{ResolveDestination, WikiLinkExtension};
///
/// let pages = ["Home", "About"];
/// let resolver = move |raw: &str| (format!("/{raw}.html"), pages.iter().any(|page| *page == raw));
/// assert_eq!(resolver.resolve("Home"), ("/Home.html".to_owned(), true));
///
/// let extension = WikiLinkExtension::new().with_resolver(resolver);
/// ```
pub trait ResolveDestination: Send + Sync {
    /// Resolve `raw_destination` to `(destination, exists)`.
    fn resolve(&self, raw_destination: &str) -> (String, bool);
}

impl<F> ResolveDestination for F
where
    F: Fn(&str) -> (String, bool) + Send + Sync,
{
    fn resolve(&self, raw_destination: &str) -> (String, bool) {
        self(raw_destination)
    }
}

/// Default resolver: turns the destination into a URL-safe slug.
///
/// Trims surrounding whitespace, lowercases, replaces spaces with `-` and
/// percent-encodes the result as a path segment. Every destination is
/// reported as existing; hosts that know which pages exist should install
/// their own resolver.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultResolver;

impl ResolveDestination for DefaultResolver {
    fn resolve(&self, raw_destination: &str) -> (String, bool) {
        let slug = raw_destination.trim().to_lowercase().replace(' ', "-");
        (utf8_percent_encode(&slug, PATH_SEGMENT).to_string(), true)
    }
}
