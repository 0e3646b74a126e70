use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;
use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::text_utils::{extract_tags, normalize_tag, parse_publish_date};

#[derive(Debug, Clone, Eq, Hash, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub String);

impl PostId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PostId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Display for PostId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub published_at: NaiveDate,
    pub tags: Vec<String>,
    pub hero_image: Option<String>,
    /// Raw markup, handed to the renderer as is.
    pub body: String,
}

impl Post {
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = normalize_tag(tag);
        self.tags.iter().any(|t| normalize_tag(t) == tag)
    }

    pub fn is_published(&self, as_of: NaiveDate) -> bool {
        self.published_at <= as_of
    }

    /// Checks the post can be stored. The post itself is never rewritten.
    pub(crate) fn validate(&self) -> Result<(), StoreError> {
        if self.id.0.trim().is_empty() {
            return Err(StoreError::validation(self.id.0.as_str(), "post id is empty"));
        }
        Ok(())
    }
}

/// Trims tags, drops empty ones and removes tags that only differ by case,
/// keeping the first spelling.
fn clean_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty() && seen.insert(normalize_tag(t)))
        .collect()
}

impl Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "id={}, date={}, tags=[{}]\ntitle={}",
               self.id,
               self.published_at,
               self.tags.join(" "),
               self.title,
        )?;
        if let Some(ref hero_image) = self.hero_image {
            write!(f, "\nhero_image={}", hero_image)?;
        }
        Ok(())
    }
}

/// Front-matter of a document as handed over by a loader, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Document {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub published_at: Option<String>,
    /// Comma and/or space separated.
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub hero_image: Option<String>,
    #[serde(default)]
    pub body: String,
}

impl TryFrom<Document> for Post {
    type Error = StoreError;

    fn try_from(doc: Document) -> Result<Self, Self::Error> {
        let id = doc.id.trim().to_string();
        if id.is_empty() {
            return Err(StoreError::validation("", "post id is empty"));
        }

        let published_at = match doc.published_at.as_deref().map(str::trim) {
            None | Some("") => return Err(StoreError::validation(id, "publish date is missing")),
            Some(date) => parse_publish_date(date)
                .map_err(|e| StoreError::validation(id.as_str(), e))?,
        };

        let post = Post {
            id: PostId(id),
            title: doc.title.trim().to_string(),
            published_at,
            tags: clean_tags(extract_tags(&doc.tags)),
            hero_image: doc.hero_image
                .map(|h| h.trim().to_string())
                .filter(|h| !h.is_empty()),
            body: doc.body,
        };
        post.validate()?;
        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> Document {
        Document {
            id: "trampolines".to_string(),
            title: "Trampolines in Scala".to_string(),
            published_at: Some("2016-07-15".to_string()),
            tags: "scala, recursion fp".to_string(),
            hero_image: Some("https://example.com/trampoline.jpg".to_string()),
            body: "Recursion is nice.\n\n<!-- more -->\n".to_string(),
        }
    }

    #[test]
    fn test_from_document() {
        let post = Post::try_from(document()).unwrap();
        assert_eq!(post.id, PostId("trampolines".to_string()));
        assert_eq!(post.published_at, NaiveDate::from_ymd_opt(2016, 7, 15).unwrap());
        assert_eq!(post.tags, ["scala", "recursion", "fp"]);
        assert_eq!(post.hero_image.as_deref(), Some("https://example.com/trampoline.jpg"));
        assert_eq!(post.body, "Recursion is nice.\n\n<!-- more -->\n");
    }

    #[test]
    fn test_missing_date() {
        let doc = Document { published_at: None, ..document() };
        assert_eq!(Post::try_from(doc), Err(StoreError::validation("trampolines", "publish date is missing")));

        let doc = Document { published_at: Some("  ".to_string()), ..document() };
        assert!(Post::try_from(doc).is_err());
    }

    #[test]
    fn test_bad_date() {
        let doc = Document { published_at: Some("July 15th".to_string()), ..document() };
        match Post::try_from(doc) {
            Err(StoreError::Validation { id, message }) => {
                assert_eq!(id.as_str(), "trampolines");
                assert_eq!(message, "Unable to parse date July 15th");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_empty_id() {
        let doc = Document { id: "  ".to_string(), ..document() };
        assert_eq!(Post::try_from(doc), Err(StoreError::validation("", "post id is empty")));
    }

    #[test]
    fn test_tags_dedup_keeps_case() {
        let doc = Document { tags: "Scala scala FP fp".to_string(), ..document() };
        let post = Post::try_from(doc).unwrap();
        assert_eq!(post.tags, ["Scala", "FP"]);
        assert!(post.has_tag("scala"));
        assert!(post.has_tag("fP"));
        assert!(!post.has_tag("recursion"));
    }

    #[test]
    fn test_validate_keeps_post_as_is() {
        let post = Post {
            id: PostId("x".to_string()),
            title: " Spaced ".to_string(),
            published_at: NaiveDate::from_ymd_opt(2016, 7, 15).unwrap(),
            tags: vec!["Scala".to_string(), "scala".to_string(), " fp ".to_string()],
            hero_image: Some(" ".to_string()),
            body: "\r\nbody".to_string(),
        };
        assert_eq!(post.validate(), Ok(()));

        let blank = Post { id: PostId(" ".to_string()), ..post };
        assert_eq!(blank.validate(), Err(StoreError::validation(" ", "post id is empty")));
    }

    #[test]
    fn test_blank_hero_image() {
        let doc = Document { hero_image: Some(" ".to_string()), ..document() };
        let post = Post::try_from(doc).unwrap();
        assert_eq!(post.hero_image, None);
    }

    #[test]
    fn test_deserialize_rejects_unknown_fields() {
        let json = r#"{"id": "mbo", "published_at": "2015-12-22", "tags": "company"}"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.id, "mbo");
        assert_eq!(doc.title, "");

        let json = r#"{"id": "mbo", "published_at": "2015-12-22", "author": "someone"}"#;
        assert!(serde_json::from_str::<Document>(json).is_err());
    }

    #[test]
    fn test_is_published() {
        let post = Post::try_from(document()).unwrap();
        assert!(post.is_published(NaiveDate::from_ymd_opt(2016, 7, 15).unwrap()));
        assert!(!post.is_published(NaiveDate::from_ymd_opt(2016, 7, 14).unwrap()));
    }
}
