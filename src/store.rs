// Persistent storage for posts and customization settings.
//
// Both documents are flat JSON files rewritten whole on every save.
// Writes go to a `.tmp` sibling first and are renamed into place, so
// the file on disk is always a fully formed document. There is no
// locking across requests: concurrent load/modify/save cycles are
// last-save-wins.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::models::{Customization, Post};

pub const POSTS_FILE: &str = "posts.json";
pub const CUSTOMIZATION_FILE: &str = "customization.json";

#[derive(Debug, Clone)]
pub struct Store {
    data_dir: PathBuf,
}

impl Store {
    pub fn new(data_dir: impl Into<PathBuf>) -> io::Result<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    fn posts_path(&self) -> PathBuf {
        self.data_dir.join(POSTS_FILE)
    }

    fn customization_path(&self) -> PathBuf {
        self.data_dir.join(CUSTOMIZATION_FILE)
    }

    /// Missing or unparseable file is treated as an empty blog.
    pub fn load_posts(&self) -> io::Result<Vec<Post>> {
        let path = self.posts_path();
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };
        match serde_json::from_str(&text) {
            Ok(posts) => Ok(posts),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "unreadable posts file, starting empty");
                Ok(Vec::new())
            }
        }
    }

    pub fn save_posts(&self, posts: &[Post]) -> io::Result<()> {
        let text = serde_json::to_string_pretty(posts)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.write_atomic(&self.posts_path(), &text)
    }

    /// Missing or unparseable file falls back to the default theme.
    pub fn load_customization(&self) -> io::Result<Customization> {
        let path = self.customization_path();
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Customization::default()),
            Err(e) => return Err(e),
        };
        match serde_json::from_str(&text) {
            Ok(c) => Ok(c),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "unreadable customization file, using defaults");
                Ok(Customization::default())
            }
        }
    }

    pub fn save_customization(&self, customization: &Customization) -> io::Result<()> {
        let text = serde_json::to_string_pretty(customization)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.write_atomic(&self.customization_path(), &text)
    }

    fn write_atomic(&self, path: &Path, text: &str) -> io::Result<()> {
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, text)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }
}
