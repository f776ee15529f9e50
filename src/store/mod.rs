//! In-memory library of folders and photos.
//!
//! The library is the single authoritative client-side view of "my folders
//! and my photos". It is populated wholesale by a refresh, mutated
//! incrementally by create/upload/delete calls, and read through pure
//! projections (per-folder listing, recents, favorites, search). All
//! backend traffic goes through the injected [`Gateway`].

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::api::{ApiError, Folder, Gateway, Photo};

/// A photo as held in the library: the wire record annotated with the
/// owning folder's id and name at fetch time. The name is a denormalized
/// copy and may go stale; the id is the authoritative link.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoEntry {
    pub id: i64,
    pub title: String,
    pub image: String,
    pub description: Option<String>,
    pub is_favorite: bool,
    pub file_size: Option<u64>,
    pub created_at: DateTime<Utc>,
    pub folder_id: i64,
    pub folder_name: String,
}

impl PhotoEntry {
    fn from_wire(photo: Photo, folder: &Folder) -> Self {
        Self {
            id: photo.id,
            title: photo.title,
            image: photo.image,
            description: photo.description,
            is_favorite: photo.is_favorite,
            file_size: photo.file_size,
            created_at: photo.created_at,
            folder_id: folder.id,
            folder_name: folder.name.clone(),
        }
    }
}

/// One folder whose photo fetch failed during a refresh.
#[derive(Debug, Clone)]
pub struct FolderFailure {
    pub folder_id: i64,
    pub folder_name: String,
    pub message: String,
}

/// Everything one refresh produced, built off to the side and installed
/// atomically.
#[derive(Debug)]
pub struct LibrarySnapshot {
    pub folders: Vec<Folder>,
    pub photos: Vec<PhotoEntry>,
    pub failures: Vec<FolderFailure>,
}

/// Summary of an applied refresh, for the status bar.
#[derive(Debug, Clone, Default)]
pub struct RefreshReport {
    pub folder_count: usize,
    pub photo_count: usize,
    pub failures: Vec<FolderFailure>,
}

pub struct Library {
    gateway: Arc<dyn Gateway>,
    folders: Vec<Folder>,
    photos: Vec<PhotoEntry>,
    /// Materialized favorite projection; always exactly the ids of photos
    /// with `is_favorite == true`.
    favorite_ids: BTreeSet<i64>,
    current_folder: Option<i64>,
    loading: bool,
    error: Option<String>,
    /// Refresh generation. A completed fetch whose ticket is stale is
    /// discarded rather than applied.
    generation: u64,
    /// Set after the backend reports the favorite endpoint absent; later
    /// toggles stay local without re-probing.
    favorites_local_only: bool,
}

impl Library {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self {
            gateway,
            folders: Vec::new(),
            photos: Vec::new(),
            favorite_ids: BTreeSet::new(),
            current_folder: None,
            loading: false,
            error: None,
            generation: 0,
            favorites_local_only: false,
        }
    }

    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    pub fn photos(&self) -> &[PhotoEntry] {
        &self.photos
    }

    pub fn photo(&self, photo_id: i64) -> Option<&PhotoEntry> {
        self.photos.iter().find(|p| p.id == photo_id)
    }

    pub fn folder(&self, folder_id: i64) -> Option<&Folder> {
        self.folders.iter().find(|f| f.id == folder_id)
    }

    pub fn current_folder(&self) -> Option<i64> {
        self.current_folder
    }

    pub fn set_current_folder(&mut self, folder_id: Option<i64>) {
        self.current_folder = folder_id;
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Logout teardown. Bumping the generation also voids any refresh that
    /// is still in flight.
    pub fn clear(&mut self) {
        self.folders.clear();
        self.photos.clear();
        self.favorite_ids.clear();
        self.current_folder = None;
        self.loading = false;
        self.error = None;
        self.generation += 1;
        self.favorites_local_only = false;
    }

    // ------------------------------------------------------------------
    // Refresh
    // ------------------------------------------------------------------

    /// Start a refresh: bump the generation and hand out the ticket the
    /// eventual [`apply_refresh`](Self::apply_refresh) must present.
    pub fn begin_refresh(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        self.generation
    }

    /// Fetch the folder list, then fan out per-folder photo fetches and
    /// join them into a snapshot.
    ///
    /// A failure on the folder list aborts the refresh. A failure on one
    /// folder's photos is recorded and logged but does not abort the batch.
    pub fn fetch_snapshot(gateway: &dyn Gateway) -> Result<LibrarySnapshot, ApiError> {
        let folders = gateway.list_folders()?;

        let results: Vec<Result<Vec<Photo>, ApiError>> = folders
            .par_iter()
            .map(|folder| gateway.list_folder_photos(folder.id))
            .collect();

        let mut photos = Vec::new();
        let mut failures = Vec::new();
        for (folder, result) in folders.iter().zip(results) {
            match result {
                Ok(wire_photos) => {
                    photos.extend(
                        wire_photos
                            .into_iter()
                            .map(|photo| PhotoEntry::from_wire(photo, folder)),
                    );
                }
                Err(err) => {
                    warn!(
                        "photos for folder '{}' (id {}) unavailable: {}",
                        folder.name, folder.id, err
                    );
                    failures.push(FolderFailure {
                        folder_id: folder.id,
                        folder_name: folder.name.clone(),
                        message: err.user_message(),
                    });
                }
            }
        }

        Ok(LibrarySnapshot { folders, photos, failures })
    }

    /// Install a refresh outcome.
    ///
    /// Returns `Ok(None)` when the ticket is stale (a newer refresh owns the
    /// library now): the outcome is dropped without touching any state.
    pub fn apply_refresh(
        &mut self,
        ticket: u64,
        outcome: Result<LibrarySnapshot, ApiError>,
    ) -> Result<Option<RefreshReport>, ApiError> {
        if ticket != self.generation {
            debug!(
                "discarding stale refresh (ticket {} < generation {})",
                ticket, self.generation
            );
            return Ok(None);
        }

        self.loading = false;
        match outcome {
            Ok(snapshot) => {
                let report = RefreshReport {
                    folder_count: snapshot.folders.len(),
                    photo_count: snapshot.photos.len(),
                    failures: snapshot.failures,
                };

                self.folders = snapshot.folders;
                self.photos = snapshot.photos;
                self.favorite_ids = self
                    .photos
                    .iter()
                    .filter(|p| p.is_favorite)
                    .map(|p| p.id)
                    .collect();
                if let Some(current) = self.current_folder {
                    if self.folder(current).is_none() {
                        self.current_folder = None;
                    }
                }

                Ok(Some(report))
            }
            Err(err) => {
                self.error = Some(err.user_message());
                Err(err)
            }
        }
    }

    /// Synchronous full refresh.
    pub fn refresh(&mut self) -> Result<RefreshReport, ApiError> {
        let ticket = self.begin_refresh();
        let gateway = Arc::clone(&self.gateway);
        let outcome = Self::fetch_snapshot(gateway.as_ref());
        self.apply_refresh(ticket, outcome)
            .map(Option::unwrap_or_default)
    }

    pub fn gateway(&self) -> Arc<dyn Gateway> {
        Arc::clone(&self.gateway)
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    pub fn create_folder(&mut self, name: &str) -> Result<Folder, ApiError> {
        match self.gateway.create_folder(name) {
            Ok(folder) => {
                self.folders.push(folder.clone());
                Ok(folder)
            }
            Err(err) => {
                self.error = Some(err.user_message());
                Err(err)
            }
        }
    }

    /// Delete a folder and mirror the server-side cascade locally.
    /// Returns the number of photos removed.
    pub fn delete_folder(&mut self, folder_id: i64) -> Result<usize, ApiError> {
        match self.gateway.delete_folder(folder_id) {
            Ok(()) => {
                self.folders.retain(|f| f.id != folder_id);

                let removed: Vec<i64> = self
                    .photos
                    .iter()
                    .filter(|p| p.folder_id == folder_id)
                    .map(|p| p.id)
                    .collect();
                for id in &removed {
                    self.favorite_ids.remove(id);
                }
                self.photos.retain(|p| p.folder_id != folder_id);

                if self.current_folder == Some(folder_id) {
                    self.current_folder = None;
                }
                Ok(removed.len())
            }
            Err(err) => {
                self.error = Some(err.user_message());
                Err(err)
            }
        }
    }

    pub fn upload_photo(
        &mut self,
        folder_id: i64,
        image: &[u8],
        filename: &str,
    ) -> Result<PhotoEntry, ApiError> {
        let Some(folder) = self.folder(folder_id).cloned() else {
            let err = ApiError::Validation(format!("Unknown folder id {}", folder_id));
            self.error = Some(err.user_message());
            return Err(err);
        };

        match self.gateway.upload_photo(folder_id, image, filename) {
            Ok(photo) => {
                let entry = PhotoEntry::from_wire(photo, &folder);
                if entry.is_favorite {
                    self.favorite_ids.insert(entry.id);
                }
                self.photos.push(entry.clone());
                Ok(entry)
            }
            Err(err) => {
                self.error = Some(err.user_message());
                Err(err)
            }
        }
    }

    pub fn delete_photo(&mut self, folder_id: i64, photo_id: i64) -> Result<(), ApiError> {
        match self.gateway.delete_photo(folder_id, photo_id) {
            Ok(()) => {
                self.photos.retain(|p| p.id != photo_id);
                self.favorite_ids.remove(&photo_id);
                Ok(())
            }
            Err(err) => {
                self.error = Some(err.user_message());
                Err(err)
            }
        }
    }

    /// Set the favorite flag on a photo.
    ///
    /// The backend endpoint for this is not guaranteed to exist. Policy:
    /// call it; if the server reports the capability absent (404/405), keep
    /// the flag locally for the rest of the session and stop probing. Any
    /// other failure leaves the library untouched. The flag is never
    /// flipped before the call resolves, so there is no rollback path.
    pub fn toggle_favorite(&mut self, photo_id: i64, favorite: bool) -> Result<(), ApiError> {
        if self.photo(photo_id).is_none() {
            let err = ApiError::Validation(format!("Unknown photo id {}", photo_id));
            self.error = Some(err.user_message());
            return Err(err);
        }

        if self.favorites_local_only {
            self.apply_favorite(photo_id, favorite);
            return Ok(());
        }

        match self.gateway.set_favorite(photo_id, favorite) {
            Ok(()) => {
                self.apply_favorite(photo_id, favorite);
                Ok(())
            }
            Err(err) if err.is_capability_missing() => {
                warn!("favorite endpoint unavailable, keeping flags local for this session");
                self.favorites_local_only = true;
                self.apply_favorite(photo_id, favorite);
                Ok(())
            }
            Err(err) => {
                self.error = Some(err.user_message());
                Err(err)
            }
        }
    }

    fn apply_favorite(&mut self, photo_id: i64, favorite: bool) {
        if let Some(photo) = self.photos.iter_mut().find(|p| p.id == photo_id) {
            photo.is_favorite = favorite;
        }
        if favorite {
            self.favorite_ids.insert(photo_id);
        } else {
            self.favorite_ids.remove(&photo_id);
        }
    }

    // ------------------------------------------------------------------
    // Projections
    // ------------------------------------------------------------------

    pub fn photos_by_folder(&self, folder_id: i64) -> Vec<&PhotoEntry> {
        self.photos
            .iter()
            .filter(|p| p.folder_id == folder_id)
            .collect()
    }

    /// Exactly the photos currently flagged favorite, in library order.
    pub fn favorite_photos(&self) -> Vec<&PhotoEntry> {
        self.photos
            .iter()
            .filter(|p| self.favorite_ids.contains(&p.id))
            .collect()
    }

    /// Newest first, stable for equal timestamps, at most `limit` entries.
    pub fn recent_photos(&self, limit: usize) -> Vec<&PhotoEntry> {
        let mut sorted: Vec<&PhotoEntry> = self.photos.iter().collect();
        sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        sorted.truncate(limit);
        sorted
    }

    /// Case-insensitive substring match over title, description and folder
    /// name. A blank query yields nothing, not everything.
    pub fn search(&self, query: &str) -> Vec<&PhotoEntry> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.photos
            .iter()
            .filter(|p| {
                p.title.to_lowercase().contains(&needle)
                    || p.description
                        .as_ref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
                    || p.folder_name.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    use crate::api::types::{Credentials, Registration, TokenPair, User};

    #[derive(Default)]
    struct FakeState {
        folders: Vec<Folder>,
        photos: HashMap<i64, Vec<Photo>>,
        failing_folders: HashSet<i64>,
        fail_folder_list: bool,
        favorite_status: Option<u16>,
        favorite_calls: usize,
        next_id: i64,
    }

    /// In-memory stand-in for the backend.
    struct FakeGateway {
        state: Mutex<FakeState>,
    }

    impl FakeGateway {
        fn new() -> Self {
            Self { state: Mutex::new(FakeState { next_id: 100, ..FakeState::default() }) }
        }

        fn with_folder(self, id: i64, name: &str) -> Self {
            self.state.lock().unwrap().folders.push(folder(id, name));
            self
        }

        fn with_photo(self, folder_id: i64, photo: Photo) -> Self {
            self.state
                .lock()
                .unwrap()
                .photos
                .entry(folder_id)
                .or_default()
                .push(photo);
            self
        }

        fn failing_folder(self, folder_id: i64) -> Self {
            self.state.lock().unwrap().failing_folders.insert(folder_id);
            self
        }

        fn favorite_endpoint_status(self, status: u16) -> Self {
            self.state.lock().unwrap().favorite_status = Some(status);
            self
        }

        fn favorite_calls(&self) -> usize {
            self.state.lock().unwrap().favorite_calls
        }
    }

    impl Gateway for FakeGateway {
        fn login(&self, _credentials: &Credentials) -> Result<TokenPair, ApiError> {
            Ok(TokenPair { access: "a".into(), refresh: "r".into() })
        }

        fn register(&self, _registration: &Registration) -> Result<User, ApiError> {
            Ok(User { id: 1, username: "u".into(), email: None })
        }

        fn current_user(&self) -> Result<User, ApiError> {
            Ok(User { id: 1, username: "u".into(), email: None })
        }

        fn list_folders(&self) -> Result<Vec<Folder>, ApiError> {
            let state = self.state.lock().unwrap();
            if state.fail_folder_list {
                return Err(ApiError::Network("connection refused".into()));
            }
            Ok(state.folders.clone())
        }

        fn create_folder(&self, name: &str) -> Result<Folder, ApiError> {
            let mut state = self.state.lock().unwrap();
            if name == "reject-me" {
                return Err(ApiError::Server { status: 400, message: "bad name".into() });
            }
            state.next_id += 1;
            let created = folder(state.next_id, name);
            state.folders.push(created.clone());
            Ok(created)
        }

        fn delete_folder(&self, folder_id: i64) -> Result<(), ApiError> {
            let mut state = self.state.lock().unwrap();
            state.folders.retain(|f| f.id != folder_id);
            state.photos.remove(&folder_id);
            Ok(())
        }

        fn list_folder_photos(&self, folder_id: i64) -> Result<Vec<Photo>, ApiError> {
            let state = self.state.lock().unwrap();
            if state.failing_folders.contains(&folder_id) {
                return Err(ApiError::Server { status: 500, message: "boom".into() });
            }
            Ok(state.photos.get(&folder_id).cloned().unwrap_or_default())
        }

        fn upload_photo(
            &self,
            folder_id: i64,
            image: &[u8],
            filename: &str,
        ) -> Result<Photo, ApiError> {
            let mut state = self.state.lock().unwrap();
            state.next_id += 1;
            let uploaded = Photo {
                id: state.next_id,
                title: filename.to_string(),
                description: None,
                image: format!("/media/{}", filename),
                is_favorite: false,
                file_size: Some(image.len() as u64),
                folder: folder_id,
                folder_name: None,
                created_at: timestamp(2024, 6, 1),
                updated_at: None,
            };
            state.photos.entry(folder_id).or_default().push(uploaded.clone());
            Ok(uploaded)
        }

        fn delete_photo(&self, folder_id: i64, photo_id: i64) -> Result<(), ApiError> {
            let mut state = self.state.lock().unwrap();
            if let Some(photos) = state.photos.get_mut(&folder_id) {
                photos.retain(|p| p.id != photo_id);
            }
            Ok(())
        }

        fn set_favorite(&self, _photo_id: i64, _favorite: bool) -> Result<(), ApiError> {
            let mut state = self.state.lock().unwrap();
            state.favorite_calls += 1;
            match state.favorite_status {
                None => Ok(()),
                Some(status) => Err(ApiError::Server {
                    status,
                    message: "endpoint error".into(),
                }),
            }
        }
    }

    fn timestamp(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    fn folder(id: i64, name: &str) -> Folder {
        Folder {
            id,
            name: name.to_string(),
            created_at: timestamp(2024, 1, 1),
            updated_at: timestamp(2024, 1, 1),
        }
    }

    fn photo(id: i64, folder_id: i64, title: &str, created: DateTime<Utc>) -> Photo {
        Photo {
            id,
            title: title.to_string(),
            description: None,
            image: format!("/media/{}.jpg", id),
            is_favorite: false,
            file_size: Some(2048),
            folder: folder_id,
            folder_name: None,
            created_at: created,
            updated_at: None,
        }
    }

    fn library(gateway: FakeGateway) -> Library {
        let mut library = Library::new(Arc::new(gateway));
        library.refresh().unwrap();
        library
    }

    #[test]
    fn test_refresh_annotates_photos_with_folder() {
        let library = library(
            FakeGateway::new()
                .with_folder(1, "Trip")
                .with_photo(1, photo(10, 1, "beach", timestamp(2024, 3, 1))),
        );

        assert_eq!(library.folders().len(), 1);
        let entries = library.photos_by_folder(1);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].folder_id, 1);
        assert_eq!(entries[0].folder_name, "Trip");
    }

    #[test]
    fn test_refresh_partial_failure_keeps_other_folders() {
        let mut library = Library::new(Arc::new(
            FakeGateway::new()
                .with_folder(1, "Good")
                .with_folder(2, "Bad")
                .with_folder(3, "AlsoGood")
                .with_photo(1, photo(10, 1, "a", timestamp(2024, 3, 1)))
                .with_photo(3, photo(11, 3, "b", timestamp(2024, 3, 2)))
                .failing_folder(2),
        ));

        let report = library.refresh().unwrap();

        assert_eq!(library.folders().len(), 3);
        assert_eq!(library.photos().len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].folder_id, 2);
        assert!(library.error().is_none());
    }

    #[test]
    fn test_refresh_folder_list_failure_sets_error() {
        let gateway = FakeGateway::new().with_folder(1, "Trip");
        gateway.state.lock().unwrap().fail_folder_list = true;

        let mut library = Library::new(Arc::new(gateway));
        let result = library.refresh();

        assert!(result.is_err());
        assert!(library.error().is_some());
        assert!(library.folders().is_empty());
        assert!(!library.loading());
    }

    #[test]
    fn test_stale_refresh_is_discarded() {
        let gateway = Arc::new(
            FakeGateway::new()
                .with_folder(1, "Trip")
                .with_photo(1, photo(10, 1, "a", timestamp(2024, 3, 1))),
        );
        let mut library = Library::new(gateway.clone());

        let old_ticket = library.begin_refresh();
        let old_snapshot = Library::fetch_snapshot(gateway.as_ref()).unwrap();

        // A second refresh starts before the first one lands.
        let new_ticket = library.begin_refresh();
        let new_snapshot = Library::fetch_snapshot(gateway.as_ref()).unwrap();
        let applied = library.apply_refresh(new_ticket, Ok(new_snapshot)).unwrap();
        assert!(applied.is_some());

        let stale = library.apply_refresh(old_ticket, Ok(old_snapshot)).unwrap();
        assert!(stale.is_none());
        assert_eq!(library.photos().len(), 1);
        assert!(!library.loading());
    }

    #[test]
    fn test_delete_folder_cascades() {
        let mut library = library(
            FakeGateway::new()
                .with_folder(1, "Keep")
                .with_folder(2, "Drop")
                .with_photo(1, photo(10, 1, "kept", timestamp(2024, 3, 1)))
                .with_photo(2, photo(20, 2, "gone-1", timestamp(2024, 3, 2)))
                .with_photo(2, photo(21, 2, "gone-2", timestamp(2024, 3, 3))),
        );
        library.toggle_favorite(20, true).unwrap();
        library.set_current_folder(Some(2));

        let removed = library.delete_folder(2).unwrap();

        assert_eq!(removed, 2);
        assert_eq!(library.folders().len(), 1);
        assert_eq!(library.photos().len(), 1);
        assert_eq!(library.photos()[0].id, 10);
        assert!(library.favorite_photos().is_empty());
        assert_eq!(library.current_folder(), None);
    }

    #[test]
    fn test_upload_scenario() {
        // Folder 1 "Trip"; uploading a.jpg (2048 bytes) must yield exactly
        // one photo annotated with the owning folder.
        let gateway = FakeGateway::new().with_folder(1, "Trip");
        gateway.state.lock().unwrap().next_id = 76;

        let mut library = Library::new(Arc::new(gateway));
        library.refresh().unwrap();

        let entry = library.upload_photo(1, &[0u8; 2048], "a.jpg").unwrap();
        assert_eq!(entry.id, 77);

        let in_folder = library.photos_by_folder(1);
        assert_eq!(in_folder.len(), 1);
        assert_eq!(in_folder[0].id, 77);
        assert_eq!(in_folder[0].folder_id, 1);
        assert_eq!(in_folder[0].folder_name, "Trip");
        assert_eq!(in_folder[0].file_size, Some(2048));
    }

    #[test]
    fn test_upload_to_unknown_folder_is_rejected_locally() {
        let mut library = library(FakeGateway::new().with_folder(1, "Trip"));

        let result = library.upload_photo(99, b"data", "a.jpg");

        assert!(matches!(result, Err(ApiError::Validation(_))));
        assert!(library.photos().is_empty());
        assert!(library.error().is_some());
    }

    #[test]
    fn test_delete_photo_removes_from_favorites() {
        let mut library = library(
            FakeGateway::new()
                .with_folder(1, "Trip")
                .with_photo(1, photo(10, 1, "a", timestamp(2024, 3, 1))),
        );
        library.toggle_favorite(10, true).unwrap();

        library.delete_photo(1, 10).unwrap();

        assert!(library.photos().is_empty());
        assert!(library.favorite_photos().is_empty());
    }

    #[test]
    fn test_favorite_round_trip() {
        let mut library = library(
            FakeGateway::new()
                .with_folder(1, "Trip")
                .with_photo(1, photo(10, 1, "a", timestamp(2024, 3, 1))),
        );

        library.toggle_favorite(10, true).unwrap();
        assert_eq!(library.favorite_photos().len(), 1);
        assert!(library.photo(10).unwrap().is_favorite);

        library.toggle_favorite(10, false).unwrap();
        assert!(library.favorite_photos().is_empty());
        assert!(!library.photo(10).unwrap().is_favorite);
    }

    #[test]
    fn test_favorite_endpoint_missing_falls_back_to_local() {
        let mut library = library(
            FakeGateway::new()
                .with_folder(1, "Trip")
                .with_photo(1, photo(10, 1, "a", timestamp(2024, 3, 1)))
                .with_photo(1, photo(11, 1, "b", timestamp(2024, 3, 2)))
                .favorite_endpoint_status(404),
        );

        library.toggle_favorite(10, true).unwrap();
        assert!(library.photo(10).unwrap().is_favorite);
        assert_eq!(library.favorite_photos().len(), 1);
        assert!(library.error().is_none());

        library.toggle_favorite(11, true).unwrap();
        assert_eq!(library.favorite_photos().len(), 2);
    }

    #[test]
    fn test_favorite_probe_stops_after_capability_missing() {
        let fake = FakeGateway::new()
            .with_folder(1, "Trip")
            .with_photo(1, photo(10, 1, "a", timestamp(2024, 3, 1)))
            .with_photo(1, photo(11, 1, "b", timestamp(2024, 3, 2)))
            .favorite_endpoint_status(405);
        let fake = Arc::new(fake);

        let mut library = Library::new(fake.clone());
        library.refresh().unwrap();

        library.toggle_favorite(10, true).unwrap();
        library.toggle_favorite(11, true).unwrap();

        assert_eq!(fake.favorite_calls(), 1);
        assert_eq!(library.favorite_photos().len(), 2);
    }

    #[test]
    fn test_favorite_server_error_leaves_state_untouched() {
        let mut library = library(
            FakeGateway::new()
                .with_folder(1, "Trip")
                .with_photo(1, photo(10, 1, "a", timestamp(2024, 3, 1)))
                .favorite_endpoint_status(500),
        );

        let result = library.toggle_favorite(10, true);

        assert!(result.is_err());
        assert!(!library.photo(10).unwrap().is_favorite);
        assert!(library.favorite_photos().is_empty());
        assert!(library.error().is_some());
    }

    #[test]
    fn test_create_folder_appends() {
        let mut library = library(FakeGateway::new().with_folder(1, "Trip"));

        let created = library.create_folder("Winter").unwrap();

        assert_eq!(library.folders().len(), 2);
        assert_eq!(library.folders()[1].id, created.id);
        assert_eq!(library.folders()[1].name, "Winter");
    }

    #[test]
    fn test_create_folder_failure_sets_error() {
        let mut library = library(FakeGateway::new().with_folder(1, "Trip"));

        let result = library.create_folder("reject-me");

        assert!(result.is_err());
        assert_eq!(library.folders().len(), 1);
        assert_eq!(library.error(), Some("bad name"));
    }

    #[test]
    fn test_search_empty_query_yields_nothing() {
        let library = library(
            FakeGateway::new()
                .with_folder(1, "Trip")
                .with_photo(1, photo(10, 1, "beach", timestamp(2024, 3, 1))),
        );

        assert!(library.search("").is_empty());
        assert!(library.search("   ").is_empty());
    }

    #[test]
    fn test_search_matches_title_description_and_folder() {
        let mut sunset = photo(10, 1, "Sunset", timestamp(2024, 3, 1));
        sunset.description = Some("Golden hour at the pier".to_string());
        let library = library(
            FakeGateway::new()
                .with_folder(1, "Summer Trip")
                .with_folder(2, "Work")
                .with_photo(1, sunset)
                .with_photo(2, photo(20, 2, "whiteboard", timestamp(2024, 3, 2))),
        );

        // Title, case-insensitive.
        let by_title = library.search("SUNSET");
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].id, 10);

        // Description.
        assert_eq!(library.search("golden HOUR").len(), 1);

        // Folder name matches every photo in that folder.
        let by_folder = library.search("summer");
        assert_eq!(by_folder.len(), 1);
        assert_eq!(by_folder[0].id, 10);

        // No match.
        assert!(library.search("nothing-here").is_empty());
    }

    #[test]
    fn test_recent_photos_order_and_truncation() {
        let library = library(
            FakeGateway::new()
                .with_folder(1, "Trip")
                .with_photo(1, photo(10, 1, "old", timestamp(2024, 1, 1)))
                .with_photo(1, photo(11, 1, "new", timestamp(2024, 5, 1)))
                .with_photo(1, photo(12, 1, "mid", timestamp(2024, 3, 1))),
        );

        let recents = library.recent_photos(2);
        assert_eq!(recents.len(), 2);
        assert_eq!(recents[0].id, 11);
        assert_eq!(recents[1].id, 12);
    }

    #[test]
    fn test_recent_photos_stable_for_equal_timestamps() {
        let same = timestamp(2024, 3, 1);
        let library = library(
            FakeGateway::new()
                .with_folder(1, "Trip")
                .with_photo(1, photo(10, 1, "first", same))
                .with_photo(1, photo(11, 1, "second", same))
                .with_photo(1, photo(12, 1, "third", same)),
        );

        let recents = library.recent_photos(10);
        let ids: Vec<i64> = recents.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![10, 11, 12]);
    }

    #[test]
    fn test_clear_tears_down_everything() {
        let mut library = library(
            FakeGateway::new()
                .with_folder(1, "Trip")
                .with_photo(1, photo(10, 1, "a", timestamp(2024, 3, 1))),
        );
        library.toggle_favorite(10, true).unwrap();
        library.set_current_folder(Some(1));
        let generation_before = library.begin_refresh();

        library.clear();

        assert!(library.folders().is_empty());
        assert!(library.photos().is_empty());
        assert!(library.favorite_photos().is_empty());
        assert_eq!(library.current_folder(), None);
        assert!(!library.loading());

        // An in-flight refresh from before the teardown must be discarded.
        let snapshot = LibrarySnapshot {
            folders: vec![folder(1, "Trip")],
            photos: Vec::new(),
            failures: Vec::new(),
        };
        let applied = library.apply_refresh(generation_before, Ok(snapshot)).unwrap();
        assert!(applied.is_none());
        assert!(library.folders().is_empty());
    }
}
