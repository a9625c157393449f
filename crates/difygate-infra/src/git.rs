//! git2-backed [`RepoCloner`].
//!
//! libgit2 is blocking, so each clone runs on the blocking thread pool.

use std::path::Path;

use difygate_core::upload::ports::RepoCloner;
use difygate_types::error::CloneError;
use tracing::info;

/// Clones remote repositories with libgit2.
#[derive(Debug, Clone, Copy, Default)]
pub struct Git2Cloner;

impl Git2Cloner {
    pub fn new() -> Self {
        Self
    }
}

impl RepoCloner for Git2Cloner {
    async fn clone_repository(&self, url: &str, dest: &Path) -> Result<(), CloneError> {
        let repo_url = url.to_string();
        let local_path = dest.to_path_buf();

        tokio::task::spawn_blocking(move || {
            git2::Repository::clone(&repo_url, &local_path).map(|_| ())
        })
        .await
        .map_err(|e| CloneError::Join(e.to_string()))?
        .map_err(|e| CloneError::Git {
            url: url.to_string(),
            message: e.message().to_string(),
        })?;

        info!(url = %url, path = %dest.display(), "Cloned repository");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use git2::{Repository, Signature};

    use super::*;

    /// Create a one-commit repository with a nested file.
    fn source_repo(dir: &Path) {
        let repo = Repository::init(dir).unwrap();
        std::fs::create_dir_all(dir.join("docs")).unwrap();
        std::fs::write(dir.join("README.md"), "hello\n").unwrap();
        std::fs::write(dir.join("docs/guide.md"), "guide\n").unwrap();

        let mut index = repo.index().unwrap();
        index.add_path(Path::new("README.md")).unwrap();
        index.add_path(Path::new("docs/guide.md")).unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let sig = Signature::now("Test", "test@example.com").unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
            .unwrap();
    }

    #[tokio::test]
    async fn test_clone_local_repository() {
        let source = tempfile::TempDir::new().unwrap();
        source_repo(source.path());
        let dest = tempfile::TempDir::new().unwrap();

        Git2Cloner::new()
            .clone_repository(source.path().to_str().unwrap(), dest.path())
            .await
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(dest.path().join("README.md")).unwrap(),
            "hello\n"
        );
        assert!(dest.path().join("docs/guide.md").is_file());
        assert!(dest.path().join(".git").is_dir());
    }

    #[tokio::test]
    async fn test_clone_missing_repository_fails() {
        let missing = tempfile::TempDir::new().unwrap();
        let url = missing.path().join("nope").display().to_string();
        let dest = tempfile::TempDir::new().unwrap();

        let err = Git2Cloner::new()
            .clone_repository(&url, dest.path())
            .await
            .unwrap_err();

        match err {
            CloneError::Git { url: failed, .. } => assert_eq!(failed, url),
            other => panic!("expected git error, got {other:?}"),
        }
    }
}
