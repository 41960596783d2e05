//! Short link entity mapping a code to a destination.

/// A stored short link.
///
/// Maps a unique short code to a scheme-stripped destination together with the
/// redirect status code to use and the creator's IP address. Rows are written
/// exactly once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    /// Unique short code (primary key). Generated and user-chosen codes share
    /// this namespace.
    pub code: String,
    /// Destination scheme, `http` or `https`.
    pub protocol: String,
    /// Destination URL with the scheme stripped, e.g. `example.com/a?b=1`.
    pub destination: String,
    /// Redirect status code in the 300..=399 range.
    pub status_code: i32,
    /// Creator IPv4 address as a 32-bit integer.
    pub creator_ip: i64,
}

impl ShortLink {
    /// Reconstitutes the full destination URL for the `Location` header.
    pub fn location(&self) -> String {
        format!("{}://{}", self.protocol, self.destination)
    }
}

/// Insert record for a link creation attempt.
///
/// The `code` is the candidate chosen by the caller: a user-requested code on
/// the explicit path, or a freshly generated one per attempt on the generated
/// path.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub code: String,
    pub protocol: String,
    pub destination: String,
    pub status_code: i32,
    pub creator_ip: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_reconstitutes_url() {
        let link = ShortLink {
            code: "abcde".to_string(),
            protocol: "http".to_string(),
            destination: "example.com/a?b=1".to_string(),
            status_code: 301,
            creator_ip: 0,
        };

        assert_eq!(link.location(), "http://example.com/a?b=1");
    }

    #[test]
    fn test_location_https() {
        let link = ShortLink {
            code: "x".to_string(),
            protocol: "https".to_string(),
            destination: "example.com/".to_string(),
            status_code: 302,
            creator_ip: 1,
        };

        assert_eq!(link.location(), "https://example.com/");
    }
}
