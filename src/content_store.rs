use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use serde::Serialize;
use spdlog::{debug, info};

use crate::error::StoreError;
use crate::post::{Document, Post, PostId};
use crate::text_utils::normalize_tag;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Most recent first
    #[default]
    NewestFirst,
    OldestFirst,
}

impl SortOrder {
    // Equal dates always fall back to id ascending, whatever the direction.
    fn compare(&self, a: &Post, b: &Post) -> Ordering {
        let by_date = match self {
            SortOrder::NewestFirst => b.published_at.cmp(&a.published_at),
            SortOrder::OldestFirst => a.published_at.cmp(&b.published_at),
        };
        by_date.then_with(|| a.id.cmp(&b.id))
    }
}

/// Ordered view over the store. It can be iterated as many times as needed.
#[derive(Debug, Clone)]
pub struct PostListing<'a> {
    posts: Vec<&'a Post>,
}

impl<'a> PostListing<'a> {
    fn sorted(mut posts: Vec<&'a Post>, order: SortOrder) -> Self {
        posts.sort_by(|a, b| order.compare(a, b));
        PostListing { posts }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Post> + '_ {
        self.posts.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn as_slice(&self) -> &[&'a Post] {
        self.posts.as_slice()
    }

    pub fn ids(&self) -> Vec<&'a str> {
        self.iter().map(|p| p.id.as_str()).collect()
    }

    pub fn to_owned_posts(&self) -> Vec<Post> {
        self.iter().cloned().collect()
    }
}

impl<'a, 'b> IntoIterator for &'b PostListing<'a> {
    type Item = &'a Post;
    type IntoIter = std::iter::Copied<std::slice::Iter<'b, &'a Post>>;

    fn into_iter(self) -> Self::IntoIter {
        self.posts.iter().copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

#[derive(Debug, Default)]
pub struct ContentStore {
    posts: HashMap<PostId, Post>,
    // normalized tag -> ids
    tag_index: HashMap<String, BTreeSet<PostId>>,
}

impl ContentStore {
    pub fn new() -> Self {
        ContentStore::default()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.posts.contains_key(id)
    }

    /// Inserts the post as given, replacing any post with the same id. The
    /// replaced post is returned. Tag spelling only matters to the index.
    pub fn ingest(&mut self, post: Post) -> Result<Option<Post>, StoreError> {
        post.validate()?;

        let replaced = self.remove(post.id.as_str());

        for tag in post.tags.iter().map(|t| normalize_tag(t)).filter(|t| !t.is_empty()) {
            self.tag_index.entry(tag)
                .or_default()
                .insert(post.id.clone());
        }

        if replaced.is_some() {
            info!("Replaced post {} ({})", post.id, post.published_at);
        } else {
            debug!("Ingested post {} ({})", post.id, post.published_at);
        }
        self.posts.insert(post.id.clone(), post);

        Ok(replaced)
    }

    pub fn ingest_document(&mut self, doc: Document) -> Result<Option<Post>, StoreError> {
        let post = Post::try_from(doc)?;
        self.ingest(post)
    }

    /// Removing an unknown id is not an error.
    pub fn remove(&mut self, id: &str) -> Option<Post> {
        let post = self.posts.remove(id)?;

        for tag in post.tags.iter() {
            let tag = normalize_tag(tag);
            if let Some(ids) = self.tag_index.get_mut(&tag) {
                ids.remove(id);
                if ids.is_empty() {
                    self.tag_index.remove(&tag);
                }
            }
        }

        debug!("Removed post {}", id);
        Some(post)
    }

    pub fn get(&self, id: &str) -> Result<&Post, StoreError> {
        self.posts.get(id).ok_or_else(|| StoreError::not_found(id))
    }

    pub fn list_all(&self, order: SortOrder) -> PostListing<'_> {
        PostListing::sorted(self.posts.values().collect(), order)
    }

    pub fn list_by_tag(&self, tag: &str, order: SortOrder) -> PostListing<'_> {
        let posts = match self.tag_index.get(&normalize_tag(tag)) {
            None => vec![],
            Some(ids) => ids.iter()
                .filter_map(|id| self.posts.get(id))
                .collect(),
        };
        PostListing::sorted(posts, order)
    }

    /// Posts dated on or before `as_of`. Anything later is scheduled, not published.
    pub fn list_published(&self, as_of: NaiveDate, order: SortOrder) -> PostListing<'_> {
        let posts = self.posts.values()
            .filter(|p| p.is_published(as_of))
            .collect();
        PostListing::sorted(posts, order)
    }

    /// Tags by frequency, most used first. Each tag is spelled the way the
    /// most recent post carrying it spells it.
    pub fn tags(&self) -> Vec<TagCount> {
        let mut tags: Vec<TagCount> = self.tag_index.iter()
            .filter_map(|(normalized, ids)| {
                let newest = ids.iter()
                    .filter_map(|id| self.posts.get(id))
                    .min_by(|a, b| SortOrder::NewestFirst.compare(a, b))?;
                let tag = newest.tags.iter()
                    .find(|t| normalize_tag(t) == *normalized)
                    .map(|t| t.trim().to_string())
                    .unwrap_or_else(|| normalized.clone());
                Some(TagCount { tag, count: ids.len() })
            })
            .collect();

        tags.sort_by(|a, b| {
            b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag))
        });
        tags
    }
}
