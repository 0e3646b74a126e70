use std::io;
use std::path::Path;

use spdlog::{info, warn};

use crate::content::content_file::ContentFile;
use crate::content_store::ContentStore;
use crate::post_list::PostList;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct LoadReport {
    /// Distinct posts added, so it matches the store size after loading into an empty store
    pub loaded: usize,
    /// Links of documents whose id was already taken by an earlier document
    pub replaced: Vec<String>,
    /// Links of documents that could not be read or were rejected
    pub skipped: Vec<String>,
}

/// Loads every post under `posts_dir` into the store. A broken document is
/// logged and skipped, it never aborts the load. Only failing to list the
/// directory itself is an error.
pub fn load_posts(store: &mut ContentStore, posts_dir: &Path, index_base_name: &str) -> io::Result<LoadReport> {
    let post_list = PostList::new(posts_dir, index_base_name);
    let mut report = LoadReport::default();

    for post_link in post_list.list_posts()? {
        let doc = ContentFile::from_file(post_link.post_name.clone(), post_link.post_path.clone())
            .and_then(|file| file.to_document());

        let doc = match doc {
            Ok(doc) => doc,
            Err(e) => {
                warn!("Skipping {}: {}", post_link.post_path.display(), e);
                report.skipped.push(post_link.post_name);
                continue;
            }
        };

        match store.ingest_document(doc) {
            Ok(Some(_)) => {
                warn!("Post {} replaced a post with the same id", post_link.post_path.display());
                report.replaced.push(post_link.post_name);
            }
            Ok(None) => report.loaded += 1,
            Err(e) => {
                warn!("Skipping {}: {}", post_link.post_path.display(), e);
                report.skipped.push(post_link.post_name);
            }
        }
    }

    info!("Loaded {} posts from {} ({} replaced, {} skipped)",
          report.loaded, posts_dir.display(), report.replaced.len(), report.skipped.len());
    Ok(report)
}
