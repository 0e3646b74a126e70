use thiserror::Error;

use crate::post::PostId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The document was rejected at ingestion. The store is left untouched.
    #[error("invalid post `{id}`: {message}")]
    Validation { id: PostId, message: String },

    #[error("post `{0}` not found")]
    NotFound(PostId),
}

impl StoreError {
    pub fn validation(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            id: PostId(id.into()),
            message: message.into(),
        }
    }

    pub fn not_found(id: &str) -> Self {
        Self::NotFound(PostId(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = StoreError::validation("mbo", "missing publish date");
        assert_eq!(err.to_string(), "invalid post `mbo`: missing publish date");

        let err = StoreError::not_found("trampolines");
        assert_eq!(err.to_string(), "post `trampolines` not found");
    }

    #[test]
    fn test_both_variants_carry_post_id() {
        let id = PostId("mbo".to_string());
        match StoreError::validation("mbo", "bad") {
            StoreError::Validation { id: found, .. } => assert_eq!(found, id),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(StoreError::not_found("mbo"), StoreError::NotFound(id));
    }
}
