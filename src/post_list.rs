use std::{fs, io};
use std::path::{Path, PathBuf};

use crate::content::content_file::ContentFile;

#[derive(Debug, Clone, PartialEq)]
pub struct PostLink {
    pub post_name: String,
    pub post_path: PathBuf,
}

/// Posts are either files in the root directory or directories holding an
/// index file (posts with images next to them).
pub struct PostList {
    pub root_dir: PathBuf,
    pub post_file: String,
}

impl PostList {
    pub fn new(root_dir: &Path, post_file: &str) -> Self {
        PostList {
            root_dir: root_dir.to_path_buf(),
            post_file: post_file.to_string(),
        }
    }

    /// Every post found, sorted by link so loading order is stable.
    pub fn list_posts(&self) -> io::Result<Vec<PostLink>> {
        let mut posts = vec![];

        for (dir, file_name) in self.retrieve_dirs()? {
            let Some(post_name) = dir.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            posts.push(PostLink {
                post_name: post_name.to_string(),
                post_path: dir.join(file_name),
            });
        }

        for post_path in self.retrieve_files()? {
            let Some(post_name) = post_path.file_stem().and_then(|n| n.to_str()) else {
                continue;
            };
            posts.push(PostLink {
                post_name: post_name.to_string(),
                post_path,
            });
        }

        posts.sort_by(|a, b| a.post_name.cmp(&b.post_name));
        Ok(posts)
    }

    pub fn retrieve_files(&self) -> io::Result<Vec<PathBuf>> {
        let mut posts = vec![];
        for entry in fs::read_dir(self.root_dir.as_path())? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let path = entry.path();
            if ContentFile::guess_type(&path).is_some() {
                posts.push(path);
            }
        }
        Ok(posts)
    }

    pub fn retrieve_dirs(&self) -> io::Result<Vec<(PathBuf, String)>> {
        // Per directory, we should have a file called post_file
        let dirs = Self::list_dirs(self.root_dir.as_path())?;
        // Filtering only the dirs with a post inside
        let mut post_dirs = vec![];
        for dir in dirs {
            if Self::contains_file(&dir, &self.post_file)? {
                post_dirs.push((dir, self.post_file.clone()));
            }
        }
        Ok(post_dirs)
    }

    fn list_dirs(posts_dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut dirs: Vec<PathBuf> = vec![];
        for entry in fs::read_dir(posts_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                dirs.push(entry.path());
            }
        }
        Ok(dirs)
    }

    fn contains_file(dir: &Path, file_name: &str) -> io::Result<bool> {
        let path = dir.join(file_name);
        Ok(path.is_file())
    }
}
