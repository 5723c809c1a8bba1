use super::error::ReceiverError;

/// The two receiver variants this crate knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Pop3,
    Imap,
}

impl Protocol {
    /// Classifies a resolved protocol token.
    ///
    /// Matching is case-insensitive and prefix-based so that secure
    /// variants ("pop3s", "imaps") map to the same receiver kind.
    pub fn classify(token: &str) -> Result<Protocol, ReceiverError> {
        let lowered = token.to_ascii_lowercase();
        if lowered.starts_with("pop3") {
            Ok(Protocol::Pop3)
        } else if lowered.starts_with("imap") {
            Ok(Protocol::Imap)
        } else {
            Err(ReceiverError::config(
                "the store URI or protocol must begin with 'pop3' or 'imap'",
            ))
        }
    }
}

/// Extracts the scheme of a URI as written, without normalizing its case.
///
/// `url::Url` lowercases schemes during parsing, which would defeat the
/// case-sensitive agreement check between the URI and an explicitly
/// configured protocol, so the scheme is picked off by hand here. Full URI
/// validation happens later, at `finalize()`.
fn uri_scheme(uri: &str) -> Option<&str> {
    let end = uri.find(':')?;
    let scheme = &uri[..end];
    let mut chars = scheme.chars();
    let head_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let tail_ok = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    (head_ok && tail_ok).then_some(scheme)
}

/// Resolves the protocol token from the store URI and/or an explicit
/// protocol setting.
///
/// When a URI is present its scheme is the candidate; an explicit protocol
/// must then agree with it exactly. Without a URI the explicit protocol is
/// required. Either way a non-empty token must come out.
pub fn resolve_protocol(
    store_uri: Option<&str>,
    protocol: Option<&str>,
) -> Result<String, ReceiverError> {
    let resolved = match store_uri.filter(|uri| !uri.trim().is_empty()) {
        Some(uri) => {
            let scheme = uri_scheme(uri).ok_or_else(|| {
                ReceiverError::config(format!("unable to resolve a protocol from store URI '{uri}'"))
            })?;
            match protocol {
                None => scheme.to_string(),
                Some(explicit) if explicit == scheme => explicit.to_string(),
                Some(explicit) => {
                    return Err(ReceiverError::config(format!(
                        "the provided protocol '{explicit}' does not match the store URI scheme '{scheme}'"
                    )));
                }
            }
        }
        None => protocol
            .filter(|p| !p.trim().is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                ReceiverError::config("either the store URI or the protocol is required")
            })?,
    };
    if resolved.is_empty() {
        return Err(ReceiverError::config("unable to resolve protocol"));
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_scheme_from_uri() {
        let protocol = resolve_protocol(Some("imap://user@host/INBOX"), None).unwrap();
        assert_eq!(protocol, "imap");
    }

    #[test]
    fn explicit_protocol_used_without_uri() {
        let protocol = resolve_protocol(None, Some("pop3s")).unwrap();
        assert_eq!(protocol, "pop3s");
    }

    #[test]
    fn matching_uri_and_explicit_protocol_agree() {
        let protocol = resolve_protocol(Some("pop3://host"), Some("pop3")).unwrap();
        assert_eq!(protocol, "pop3");
    }

    #[test]
    fn mismatched_uri_and_explicit_protocol_fail() {
        let err = resolve_protocol(Some("pop3://host"), Some("imap")).unwrap_err();
        assert!(matches!(err, ReceiverError::Configuration(_)));
    }

    #[test]
    fn scheme_match_is_case_sensitive() {
        let err = resolve_protocol(Some("imap://host"), Some("IMAP")).unwrap_err();
        assert!(matches!(err, ReceiverError::Configuration(_)));
    }

    #[test]
    fn neither_uri_nor_protocol_fails() {
        let err = resolve_protocol(None, None).unwrap_err();
        assert!(matches!(err, ReceiverError::Configuration(_)));
    }

    #[test]
    fn blank_protocol_fails() {
        let err = resolve_protocol(None, Some("  ")).unwrap_err();
        assert!(matches!(err, ReceiverError::Configuration(_)));
    }

    #[test]
    fn uri_without_scheme_fails() {
        let err = resolve_protocol(Some("host/INBOX"), None).unwrap_err();
        assert!(matches!(err, ReceiverError::Configuration(_)));
    }

    #[test]
    fn classify_known_tokens() {
        assert_eq!(Protocol::classify("pop3").unwrap(), Protocol::Pop3);
        assert_eq!(Protocol::classify("pop3s").unwrap(), Protocol::Pop3);
        assert_eq!(Protocol::classify("POP3S").unwrap(), Protocol::Pop3);
        assert_eq!(Protocol::classify("imap").unwrap(), Protocol::Imap);
        assert_eq!(Protocol::classify("imaps").unwrap(), Protocol::Imap);
        assert_eq!(Protocol::classify("IMAP").unwrap(), Protocol::Imap);
    }

    #[test]
    fn classify_rejects_other_tokens() {
        for token in ["smtp", "nntp", "", "pop", "im"] {
            let err = Protocol::classify(token).unwrap_err();
            assert!(matches!(err, ReceiverError::Configuration(_)), "token {token:?}");
        }
    }
}
