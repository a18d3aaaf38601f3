//! JSON Patch (RFC 6902) adapter.
//!
//! Thin layer over the `json-patch` crate that speaks bytes at the edges and
//! reports failures as [`DomainError`]s.

use serde_json::Value;

pub use json_patch::Patch;

use crate::error::{DomainError, DomainResult};

/// Parse raw bytes into a patch document.
pub fn decode(raw: &[u8]) -> DomainResult<Patch> {
    serde_json::from_slice(raw)
        .map_err(|e| DomainError::invalid_input("patch could not be decoded").with_cause(e))
}

/// Apply a patch to a JSON document, returning the patched document.
///
/// All-or-nothing: on failure no partially patched document is returned and
/// the input bytes are never touched.
pub fn apply(patch: &Patch, doc: &[u8]) -> DomainResult<Vec<u8>> {
    let mut value: Value = serde_json::from_slice(doc)
        .map_err(|e| DomainError::invalid_input("patch invalid").with_cause(e))?;

    json_patch::patch(&mut value, &patch.0)
        .map_err(|e| DomainError::invalid_input("patch invalid").with_cause(e))?;

    serde_json::to_vec(&value)
        .map_err(|e| DomainError::system("could not encode patched document").with_cause(e))
}

/// Structural equality of two JSON documents, ignoring key order.
///
/// Input that does not parse as JSON is never equal to anything.
pub fn equal(a: &[u8], b: &[u8]) -> bool {
    match (
        serde_json::from_slice::<Value>(a),
        serde_json::from_slice::<Value>(b),
    ) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const DOC: &[u8] = br#"{"user_name":"JohnDoe","email":"test@example.com"}"#;

    #[test]
    fn test_decode_rejects_malformed_json() {
        let err = decode(br#"[{"this": "ain't valid json}]"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.message(), "patch could not be decoded");
        assert!(err.cause().is_some());
    }

    #[test]
    fn test_decode_rejects_unknown_operation() {
        let err = decode(br#"[{"this_aint": "a valid patch"}]"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_decode_empty_patch() {
        let patch = decode(b"[]").unwrap();
        assert!(patch.0.is_empty());
    }

    #[test]
    fn test_apply_replace() {
        let patch = decode(br#"[{"op":"replace","path":"/user_name","value":"foo"}]"#).unwrap();
        let patched = apply(&patch, DOC).unwrap();

        let value: Value = serde_json::from_slice(&patched).unwrap();
        assert_eq!(value["user_name"], "foo");
        assert_eq!(value["email"], "test@example.com");
    }

    #[test]
    fn test_apply_missing_path_fails() {
        let patch = decode(br#"[{"op":"replace","path":"/password","value":"x"}]"#).unwrap();
        let err = apply(&patch, DOC).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.message(), "patch invalid");
    }

    #[test]
    fn test_apply_is_all_or_nothing() {
        let patch = decode(
            br#"[
                {"op":"replace","path":"/user_name","value":"foo"},
                {"op":"test","path":"/email","value":"other@example.com"}
            ]"#,
        )
        .unwrap();

        assert!(apply(&patch, DOC).is_err());
    }

    #[test]
    fn test_equal_ignores_key_order() {
        let reordered = br#"{"email":"test@example.com","user_name":"JohnDoe"}"#;
        assert!(equal(DOC, reordered));
        assert!(!equal(DOC, br#"{"user_name":"foo","email":"test@example.com"}"#));
        assert!(!equal(DOC, b"not json"));
    }

    #[test]
    fn test_replace_with_same_value_is_equal() {
        let patch =
            decode(br#"[{"op":"replace","path":"/user_name","value":"JohnDoe"}]"#).unwrap();
        let patched = apply(&patch, DOC).unwrap();
        assert!(equal(DOC, &patched));
    }
}
