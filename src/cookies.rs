use crate::error::{AuthFailure, Result};
use serde::Deserialize;
use std::collections::HashMap;

/// Parse a raw `Set-Cookie` header into cookie name to value.
///
/// Several cookies may be joined by commas. Only the leading `name=value`
/// pair of each one is kept, both halves percent-decoded. Segments without
/// `=` are skipped, so the comma inside an `expires=` date does no harm.
pub fn parse_cookies(header: &str) -> HashMap<String, String> {
    header
        .split(',')
        .filter_map(|cookie| {
            let pair = cookie.split(';').next()?;
            let (name, value) = pair.split_once('=')?;
            Some((decode(name).trim().to_string(), decode(value)))
        })
        .collect()
}

fn decode(raw: &str) -> String {
    String::from_utf8_lossy(&urlencoding::decode_binary(raw.as_bytes())).into_owned()
}

#[derive(Deserialize)]
struct SessionCredentials {
    session_id: String,
}

/// Pull the session id out of the JSON credentials cookie handed out at login.
pub(crate) fn session_id_from_cookies(header: &str, cookie: &'static str) -> Result<String> {
    let cookies = parse_cookies(header);
    let credentials = cookies
        .get(cookie)
        .filter(|value| !value.is_empty())
        .ok_or(AuthFailure::MissingCredentials { cookie })?;

    let credentials: SessionCredentials =
        serde_json::from_str(credentials).map_err(|e| AuthFailure::MalformedCredentials {
            cookie,
            reason: e.to_string(),
        })?;

    Ok(credentials.session_id)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::Error;

    #[test]
    fn parses_simple_cookie() {
        let parsed = parse_cookies(
            "testCookie=Hello%20world!; expires=Tue, 28-Nov-2023 10:28:45 GMT; Max-Age=7776000; path=/",
        );
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed["testCookie"], "Hello world!");
    }

    #[test]
    fn parses_multiple_cookies() {
        let parsed = parse_cookies("a=b%20c; path=/, d=e");
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed["a"], "b c");
        assert_eq!(parsed["d"], "e");

        let parsed = parse_cookies(
            "firstCookie=I'm%20the%20first%20cookie; expires=Tue, 28-Nov-2023 10:28:45 GMT; \
             Max-Age=7776000; path=/, secondCookie=I'm%20the%20second%20cookie; \
             expires=Tue, 28-Nov-2023 10:28:45 GMT; Max-Age=7776000; path=/",
        );
        assert_eq!(parsed["firstCookie"], "I'm the first cookie");
        assert_eq!(parsed["secondCookie"], "I'm the second cookie");
    }

    #[test]
    fn keeps_cookie_with_empty_value() {
        let parsed = parse_cookies("cookieWithNoValue=; path=/");
        assert_eq!(parsed["cookieWithNoValue"], "");
    }

    #[test]
    fn skips_segments_without_equals() {
        let parsed = parse_cookies("garbage, ; ,name=value,HttpOnly");
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed["name"], "value");
        assert!(parse_cookies("").is_empty());
    }

    #[test]
    fn decodes_names_and_keeps_equals_in_values() {
        let parsed = parse_cookies("my%20name=a=b");
        assert_eq!(parsed["my name"], "a=b");
    }

    #[test]
    fn extracts_session_id() {
        let header = "parent_session_credentials=%7B%22session_id%22%3A%22abc123%22%7D; path=/";
        let id = session_id_from_cookies(header, "parent_session_credentials").unwrap();
        assert_eq!(id, "abc123");
    }

    #[test]
    fn missing_credentials_cookie_is_auth_failure() {
        let err = session_id_from_cookies("other=1", "student_session_credentials").unwrap_err();
        assert!(matches!(
            err,
            Error::Authentication(AuthFailure::MissingCredentials { .. })
        ));
    }

    #[test]
    fn malformed_credentials_is_auth_failure() {
        let err = session_id_from_cookies(
            "student_session_credentials=not-json",
            "student_session_credentials",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::Authentication(AuthFailure::MalformedCredentials { .. })
        ));

        let err = session_id_from_cookies(
            "student_session_credentials=%7B%22other%22%3A1%7D",
            "student_session_credentials",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::Authentication(AuthFailure::MalformedCredentials { .. })
        ));
    }
}
