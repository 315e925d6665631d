use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use dashmap::DashMap;
use rand::seq::SliceRandom;

use amora_core::users::dto::ChatMood;

/// Picks images from the per-mood directories, avoiding repeats until a
/// mood's folder is exhausted, then starting over. The recency set is
/// in-memory only; a restart simply forgets what was already sent.
#[derive(Clone)]
pub struct MediaLibrary {
    root: PathBuf,
    served: Arc<DashMap<String, HashSet<String>>>,
}

impl MediaLibrary {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            served: Arc::new(DashMap::new()),
        }
    }

    pub fn pick(&self, mood: ChatMood) -> Result<PathBuf> {
        let dir = self.root.join(mood.as_str());
        let mut files = Vec::new();
        for entry in std::fs::read_dir(&dir)
            .with_context(|| format!("reading image directory {}", dir.display()))?
        {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                files.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        if files.is_empty() {
            return Err(anyhow!("no images available for mood {}", mood.as_str()));
        }

        let mut served = self.served.entry(mood.as_str().to_string()).or_default();
        let mut available: Vec<&String> = files
            .iter()
            .filter(|file| !served.contains(file.as_str()))
            .collect();
        if available.is_empty() {
            served.clear();
            available = files.iter().collect();
        }

        let chosen = available
            .choose(&mut rand::thread_rng())
            .ok_or_else(|| anyhow!("image selection came up empty"))?
            .to_string();
        served.insert(chosen.clone());
        Ok(dir.join(chosen))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_library(files: &[&str]) -> (MediaLibrary, PathBuf) {
        let root = std::env::temp_dir().join(format!("amora-media-{:x}", rand::random::<u64>()));
        let dir = root.join("normal");
        fs::create_dir_all(&dir).unwrap();
        for name in files {
            fs::write(dir.join(name), b"img").unwrap();
        }
        (MediaLibrary::new(root.clone()), root)
    }

    #[test]
    fn avoids_repeats_until_the_folder_is_exhausted() {
        let (library, root) = scratch_library(&["a.jpg", "b.jpg"]);
        let first = library.pick(ChatMood::Normal).unwrap();
        let second = library.pick(ChatMood::Normal).unwrap();
        assert_ne!(first, second);
        // Folder exhausted: the recency set resets and serving continues.
        let third = library.pick(ChatMood::Normal).unwrap();
        assert!(third == first || third == second);
        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn empty_mood_directory_is_an_error() {
        let (library, root) = scratch_library(&[]);
        assert!(library.pick(ChatMood::Normal).is_err());
        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn missing_mood_directory_is_an_error() {
        let (library, root) = scratch_library(&["a.jpg"]);
        assert!(library.pick(ChatMood::Erotic).is_err());
        fs::remove_dir_all(root).unwrap();
    }
}
