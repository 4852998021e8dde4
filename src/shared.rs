//! A dictionary shared across threads that follows changes to its user file.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::SystemTime;

use tracing::{debug, error, warn};

use crate::dictionary::{Baseline, Dictionary};
use crate::errors::DictionaryError;

/// Process-wide handle on the merged dictionary.
///
/// Readers take an immutable snapshot; a reload swaps in a new snapshot, so
/// casing calls in flight keep using the one they started with.
#[derive(Debug)]
pub struct SharedDictionary {
    baseline: Baseline,
    user_path: PathBuf,
    state: RwLock<Snapshot>,
}

#[derive(Debug, Clone)]
struct Snapshot {
    dictionary: Arc<Dictionary>,
    modified: Option<SystemTime>,
}

impl SharedDictionary {
    /// Load and merge the dictionaries, failing if the baseline cannot be
    /// read or the merged user file cannot be written.
    pub fn open<P: Into<PathBuf>>(baseline: Baseline, user_path: P) -> Result<Self, DictionaryError> {
        let user_path = user_path.into();
        let snapshot = load_snapshot(&baseline, &user_path)?;
        Ok(Self {
            baseline,
            user_path,
            state: RwLock::new(snapshot),
        })
    }

    /// Like [`open`](Self::open), but starts with an empty dictionary when
    /// loading fails. Phrasal verbs are then never detected until a
    /// successful reload, which is attempted the next time the user file
    /// changes.
    pub fn open_or_empty<P: Into<PathBuf>>(baseline: Baseline, user_path: P) -> Self {
        let user_path = user_path.into();
        let snapshot = load_snapshot(&baseline, &user_path).unwrap_or_else(|err| {
            error!(path = ?user_path, error = %err, "cannot load phrasal verb dictionary, using an empty one");
            Snapshot {
                dictionary: Arc::new(Dictionary::new()),
                modified: modification_time(&user_path),
            }
        });

        Self {
            baseline,
            user_path,
            state: RwLock::new(snapshot),
        }
    }

    pub fn user_path(&self) -> &Path {
        &self.user_path
    }

    /// The current dictionary, reloaded first if the user file changed on
    /// disk since the last load. A failed reload keeps the old dictionary.
    pub fn snapshot(&self) -> Arc<Dictionary> {
        let current = self
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        let modified = modification_time(&self.user_path);
        let is_stale = match (modified, current.modified) {
            (Some(on_disk), Some(loaded)) => on_disk > loaded,
            (Some(_), None) => true,
            _ => false,
        };

        if !is_stale {
            return current.dictionary;
        }

        debug!(path = ?self.user_path, "user dictionary changed on disk, reloading");
        match self.reload() {
            Ok(dictionary) => dictionary,
            Err(err) => {
                warn!(path = ?self.user_path, error = %err, "cannot reload phrasal verb dictionary");
                let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
                // retry once the file changes again
                if Arc::ptr_eq(&state.dictionary, &current.dictionary) {
                    state.modified = modified;
                }
                current.dictionary
            }
        }
    }

    /// Load and merge again, unconditionally.
    pub fn reload(&self) -> Result<Arc<Dictionary>, DictionaryError> {
        let snapshot = load_snapshot(&self.baseline, &self.user_path)?;
        let dictionary = Arc::clone(&snapshot.dictionary);
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = snapshot;
        Ok(dictionary)
    }
}

fn load_snapshot(baseline: &Baseline, user_path: &Path) -> Result<Snapshot, DictionaryError> {
    let dictionary = Dictionary::load_and_merge(baseline, user_path)?;
    Ok(Snapshot {
        dictionary: Arc::new(dictionary),
        // read after the merge so our own write does not count as a change
        modified: modification_time(user_path),
    })
}

fn modification_time(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|meta| meta.modified()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::thread;
    use std::time::Duration;

    use crate::titlecase::to_ap_title_case;

    fn assert_send_sync<T: Send + Sync>() {}

    fn touch(path: &Path, seconds_ahead: u64) {
        let later = SystemTime::now() + Duration::from_secs(seconds_ahead);
        fs::File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(later)
            .unwrap();
    }

    #[test]
    fn test_open_writes_user_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("phrasal_verbs_en.txt");

        let shared = SharedDictionary::open(Baseline::Builtin, &path).unwrap();
        assert!(path.exists());
        assert_eq!(shared.snapshot().len(), Dictionary::builtin().len());
    }

    #[test]
    fn test_reloads_when_file_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user.txt");
        let baseline_path = dir.path().join("baseline.txt");
        fs::write(&baseline_path, "give;giving;gave;;up\n").unwrap();

        let shared = SharedDictionary::open(Baseline::File(baseline_path), &path).unwrap();
        let before = shared.snapshot();
        assert_eq!(before.len(), 1);

        let mut contents = fs::read_to_string(&path).unwrap();
        contents.push_str("look;;;;up\n");
        fs::write(&path, contents).unwrap();
        touch(&path, 5);

        let after = shared.snapshot();
        assert_eq!(after.len(), 2);
        assert_eq!(before.len(), 1);
        assert!(Arc::ptr_eq(&after, &shared.snapshot()));
    }

    #[test]
    fn test_open_or_empty_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing-baseline.txt");
        let shared = SharedDictionary::open_or_empty(Baseline::File(missing.clone()), dir.path().join("user.txt"));
        assert!(shared.snapshot().is_empty());
        assert!(SharedDictionary::open(Baseline::File(missing), dir.path().join("user.txt")).is_err());
    }

    #[test]
    fn test_failed_load_waits_for_the_next_change() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user.txt");
        let baseline_path = dir.path().join("baseline.txt");
        fs::write(&path, "look;;;;up\n").unwrap();

        let shared = SharedDictionary::open_or_empty(Baseline::File(baseline_path.clone()), &path);
        assert!(shared.snapshot().is_empty());

        // the user file has not changed, so nothing is retried
        fs::write(&baseline_path, "give;giving;gave;;up\n").unwrap();
        assert!(shared.snapshot().is_empty());

        touch(&path, 5);
        assert_eq!(shared.snapshot().len(), 2);

        fs::remove_file(&baseline_path).unwrap();
        touch(&path, 10);
        assert_eq!(shared.snapshot().len(), 2);

        fs::write(&baseline_path, "give;giving;gave;;up\nbreak;breaking;broke;;down\n").unwrap();
        assert_eq!(shared.snapshot().len(), 2);
        assert_eq!(shared.reload().unwrap().len(), 3);
    }

    #[test]
    fn test_shared_across_threads() {
        assert_send_sync::<SharedDictionary>();

        let dir = tempfile::tempdir().unwrap();
        let shared = SharedDictionary::open(Baseline::Builtin, dir.path().join("user.txt")).unwrap();
        let shared = &shared;

        thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(move || {
                        let dictionary = shared.snapshot();
                        to_ap_title_case("don't give up now", &dictionary)
                    })
                })
                .collect();

            for handle in handles {
                assert_eq!(handle.join().unwrap(), "Don't Give Up Now");
            }
        });
    }
}
