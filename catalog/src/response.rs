//! Listing envelope validation.

use serde_json::Value;

/// Whether `body` looks like a card listing: an object with a `data` array
/// and numeric `page` and `pageSize`.
#[must_use]
pub fn is_valid_api_response(body: &Value) -> bool {
    let Some(object) = body.as_object() else {
        return false;
    };
    object.get("data").is_some_and(Value::is_array)
        && object.get("page").is_some_and(Value::is_number)
        && object.get("pageSize").is_some_and(Value::is_number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_listing_envelope() {
        assert!(is_valid_api_response(
            &json!({"data": [], "page": 1, "pageSize": 15, "count": 0, "totalCount": 0})
        ));
    }

    #[test]
    fn rejects_malformed_envelopes() {
        assert!(!is_valid_api_response(&json!(null)));
        assert!(!is_valid_api_response(&json!([])));
        assert!(!is_valid_api_response(&json!({"data": {}, "page": 1, "pageSize": 15})));
        assert!(!is_valid_api_response(&json!({"data": [], "page": "1", "pageSize": 15})));
        assert!(!is_valid_api_response(&json!({"data": [], "page": 1})));
    }
}
