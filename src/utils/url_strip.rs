//! Scheme stripping for destination URLs.

use url::Url;

/// Returns the serialized URL without its `scheme://` prefix.
///
/// `http://example.com/a?b=1` becomes `example.com/a?b=1`. The stripped form
/// is what gets stored and length-checked; the scheme is stored separately and
/// re-attached when building the redirect `Location` header.
pub fn strip_scheme(url: &Url) -> &str {
    // Serialized http/https URLs always start with "scheme://".
    &url.as_str()[url.scheme().len() + 3..]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_strip_scheme_with_path_and_query() {
        assert_eq!(
            strip_scheme(&parse("http://example.com/a?b=1")),
            "example.com/a?b=1"
        );
    }

    #[test]
    fn test_strip_scheme_https() {
        assert_eq!(
            strip_scheme(&parse("https://example.com/path")),
            "example.com/path"
        );
    }

    #[test]
    fn test_strip_scheme_bare_host_keeps_root_path() {
        // The url crate normalizes http(s) URLs to always carry a path.
        assert_eq!(strip_scheme(&parse("http://example.com")), "example.com/");
    }

    #[test]
    fn test_strip_scheme_preserves_port_and_fragment() {
        assert_eq!(
            strip_scheme(&parse("https://example.com:8443/a#frag")),
            "example.com:8443/a#frag"
        );
    }

    #[test]
    fn test_strip_round_trip() {
        let url = parse("http://example.com/a?b=1");
        let stripped = strip_scheme(&url);

        assert_eq!(format!("{}://{}", url.scheme(), stripped), url.as_str());
    }
}
