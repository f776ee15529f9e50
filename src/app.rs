use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::api::{ApiError, Folder, Gateway, User};
use crate::config::Config;
use crate::session::SessionStore;
use crate::store::{Library, LibrarySnapshot, PhotoEntry, RefreshReport};
use crate::ui;
use crate::ui::confirm_dialog::{ConfirmDialog, PendingAction};
use crate::ui::folder_dialog::FolderDialog;
use crate::ui::login::LoginDialog;
use crate::ui::search_dialog::SearchDialog;
use crate::ui::upload_dialog::UploadDialog;
use crate::validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePane {
    Folders,
    Photos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Login,
    Normal,
    Help,
    Searching,
    CreatingFolder,
    Uploading,
    Confirming,
}

/// Which projection the photos pane shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoView {
    Folder,
    All,
    Favorites,
    Recent,
}

impl PhotoView {
    pub fn title(&self, app: &App) -> String {
        match self {
            PhotoView::Folder => match app
                .library
                .current_folder()
                .and_then(|id| app.library.folder(id))
            {
                Some(folder) => folder.name.clone(),
                None => "All Photos".to_string(),
            },
            PhotoView::All => "All Photos".to_string(),
            PhotoView::Favorites => "Favorites".to_string(),
            PhotoView::Recent => "Recent".to_string(),
        }
    }
}

/// Outcome of a background refresh, delivered over the channel.
struct RefreshJob {
    ticket: u64,
    outcome: Result<LibrarySnapshot, ApiError>,
}

pub struct App {
    pub config: Config,
    pub session: Arc<SessionStore>,
    pub library: Library,
    pub user: Option<User>,
    pub mode: AppMode,
    pub active_pane: ActivePane,
    pub photo_view: PhotoView,
    pub selected_folder_index: usize,
    pub selected_photo_index: usize,
    pub should_quit: bool,
    pub status_message: Option<String>,
    // Dialog state
    pub login_dialog: LoginDialog,
    pub search_dialog: Option<SearchDialog>,
    pub folder_dialog: Option<FolderDialog>,
    pub upload_dialog: Option<UploadDialog>,
    pub confirm_dialog: Option<ConfirmDialog>,
    // Background refresh channel
    refresh_tx: mpsc::Sender<RefreshJob>,
    refresh_rx: mpsc::Receiver<RefreshJob>,
}

impl App {
    pub fn new(config: Config, session: Arc<SessionStore>, gateway: Arc<dyn Gateway>) -> Self {
        let (refresh_tx, refresh_rx) = mpsc::channel();
        let library = Library::new(gateway);

        let mut app = Self {
            config,
            session,
            library,
            user: None,
            mode: AppMode::Login,
            active_pane: ActivePane::Folders,
            photo_view: PhotoView::Folder,
            selected_folder_index: 0,
            selected_photo_index: 0,
            should_quit: false,
            status_message: None,
            login_dialog: LoginDialog::new(),
            search_dialog: None,
            folder_dialog: None,
            upload_dialog: None,
            confirm_dialog: None,
            refresh_tx,
            refresh_rx,
        };

        if app.session.is_authenticated() {
            app.resume_session();
        }

        app
    }

    /// Pick up a persisted session from a previous run. An expired pair
    /// drops straight back to the login screen.
    fn resume_session(&mut self) {
        match self.library.gateway().current_user() {
            Ok(user) => {
                info!("resumed session for '{}'", user.username);
                self.user = Some(user);
                self.mode = AppMode::Normal;
                self.spawn_refresh();
            }
            Err(ApiError::SessionExpired) | Err(ApiError::Unauthorized) => {
                self.force_login("Session expired. Please log in again.");
            }
            Err(err) => {
                // Backend unreachable; stay in and let the user retry.
                warn!("could not fetch profile on startup: {}", err);
                self.mode = AppMode::Normal;
                self.status_message = Some(err.user_message());
            }
        }
    }

    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    ) -> Result<()> {
        while !self.should_quit {
            self.poll_refresh_jobs();

            terminal.draw(|frame| ui::render(frame, self))?;

            if event::poll(Duration::from_millis(100))? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key)?,
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    // ------------------------------------------------------------------
    // Background refresh
    // ------------------------------------------------------------------

    /// Kick off a full library refresh on a worker thread. The outcome is
    /// applied on the event loop via the generation guard, so an older
    /// refresh can never overwrite a newer one.
    pub fn spawn_refresh(&mut self) {
        let ticket = self.library.begin_refresh();
        let gateway = self.library.gateway();
        let tx = self.refresh_tx.clone();

        std::thread::spawn(move || {
            let outcome = Library::fetch_snapshot(gateway.as_ref());
            let _ = tx.send(RefreshJob { ticket, outcome });
        });
    }

    fn poll_refresh_jobs(&mut self) {
        while let Ok(job) = self.refresh_rx.try_recv() {
            match self.library.apply_refresh(job.ticket, job.outcome) {
                Ok(Some(report)) => {
                    for failure in &report.failures {
                        debug!(
                            "folder {} ('{}') left out of this refresh: {}",
                            failure.folder_id, failure.folder_name, failure.message
                        );
                    }
                    self.clamp_selection();
                    self.status_message = Some(refresh_message(&report));
                }
                Ok(None) => {}
                Err(ApiError::SessionExpired) => {
                    self.force_login("Session expired. Please log in again.");
                }
                // The library already carries the error message.
                Err(_) => {}
            }
        }
    }

    // ------------------------------------------------------------------
    // Key dispatch
    // ------------------------------------------------------------------

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.mode {
            AppMode::Login => self.handle_login_key(key),
            AppMode::Help => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                    self.mode = AppMode::Normal;
                }
                Ok(())
            }
            AppMode::Searching => self.handle_search_key(key),
            AppMode::CreatingFolder => self.handle_folder_dialog_key(key),
            AppMode::Uploading => self.handle_upload_dialog_key(key),
            AppMode::Confirming => self.handle_confirm_key(key),
            AppMode::Normal => self.handle_browser_key(key),
        }
    }

    fn handle_browser_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.mode = AppMode::Help,
            KeyCode::Tab => {
                self.active_pane = match self.active_pane {
                    ActivePane::Folders => ActivePane::Photos,
                    ActivePane::Photos => ActivePane::Folders,
                };
            }
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(-1),
            KeyCode::Enter => self.open_selected_folder(),
            KeyCode::Char('r') => {
                self.spawn_refresh();
                self.status_message = Some("Refreshing library...".to_string());
            }
            KeyCode::Char('n') => {
                self.folder_dialog = Some(FolderDialog::new());
                self.mode = AppMode::CreatingFolder;
            }
            KeyCode::Char('u') => self.open_upload_dialog(),
            KeyCode::Char('d') => self.request_delete(),
            KeyCode::Char('f') => self.toggle_selected_favorite(),
            KeyCode::Char('/') => {
                self.search_dialog = Some(SearchDialog::new());
                self.mode = AppMode::Searching;
            }
            KeyCode::Char('1') => self.set_view(PhotoView::Folder),
            KeyCode::Char('2') => self.set_view(PhotoView::All),
            KeyCode::Char('3') => self.set_view(PhotoView::Favorites),
            KeyCode::Char('4') => self.set_view(PhotoView::Recent),
            KeyCode::Char('x') => self.logout(),
            KeyCode::Esc => {
                self.library.clear_error();
                self.status_message = None;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_login_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.login_dialog.toggle_mode();
            }
            KeyCode::Tab | KeyCode::Down => self.login_dialog.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.login_dialog.prev_field(),
            KeyCode::Enter => self.submit_login(),
            KeyCode::Backspace => self.login_dialog.backspace(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.login_dialog.handle_char(c);
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => {
                self.search_dialog = None;
                self.mode = AppMode::Normal;
            }
            KeyCode::Enter => self.jump_to_search_result(),
            KeyCode::Up => {
                if let Some(dialog) = self.search_dialog.as_mut() {
                    dialog.move_selection_up();
                }
            }
            KeyCode::Down => {
                if let Some(dialog) = self.search_dialog.as_mut() {
                    dialog.move_selection_down();
                }
            }
            KeyCode::Left => {
                if let Some(dialog) = self.search_dialog.as_mut() {
                    dialog.move_cursor_left();
                }
            }
            KeyCode::Right => {
                if let Some(dialog) = self.search_dialog.as_mut() {
                    dialog.move_cursor_right();
                }
            }
            KeyCode::Backspace => {
                if let Some(dialog) = self.search_dialog.as_mut() {
                    dialog.backspace();
                }
                self.update_search_results();
            }
            KeyCode::Char(c) => {
                if let Some(dialog) = self.search_dialog.as_mut() {
                    dialog.handle_char(c);
                }
                self.update_search_results();
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_folder_dialog_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => {
                self.folder_dialog = None;
                self.mode = AppMode::Normal;
            }
            KeyCode::Enter => self.submit_folder(),
            KeyCode::Left => {
                if let Some(dialog) = self.folder_dialog.as_mut() {
                    dialog.move_cursor_left();
                }
            }
            KeyCode::Right => {
                if let Some(dialog) = self.folder_dialog.as_mut() {
                    dialog.move_cursor_right();
                }
            }
            KeyCode::Backspace => {
                if let Some(dialog) = self.folder_dialog.as_mut() {
                    dialog.backspace();
                }
            }
            KeyCode::Char(c) => {
                if let Some(dialog) = self.folder_dialog.as_mut() {
                    dialog.handle_char(c);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_upload_dialog_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => {
                self.upload_dialog = None;
                self.mode = AppMode::Normal;
            }
            KeyCode::Enter => self.submit_upload(),
            KeyCode::Left => {
                if let Some(dialog) = self.upload_dialog.as_mut() {
                    dialog.move_cursor_left();
                }
            }
            KeyCode::Right => {
                if let Some(dialog) = self.upload_dialog.as_mut() {
                    dialog.move_cursor_right();
                }
            }
            KeyCode::Backspace => {
                if let Some(dialog) = self.upload_dialog.as_mut() {
                    dialog.backspace();
                }
            }
            KeyCode::Char(c) => {
                if let Some(dialog) = self.upload_dialog.as_mut() {
                    dialog.handle_char(c);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Enter | KeyCode::Char('y') => {
                if let Some(dialog) = self.confirm_dialog.take() {
                    self.mode = AppMode::Normal;
                    self.execute_pending(dialog.action);
                }
            }
            KeyCode::Esc | KeyCode::Char('n') => {
                self.confirm_dialog = None;
                self.mode = AppMode::Normal;
            }
            _ => {}
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Selection & views
    // ------------------------------------------------------------------

    pub fn visible_photos(&self) -> Vec<&PhotoEntry> {
        match self.photo_view {
            PhotoView::Folder => match self.library.current_folder() {
                Some(folder_id) => self.library.photos_by_folder(folder_id),
                None => self.library.photos().iter().collect(),
            },
            PhotoView::All => self.library.photos().iter().collect(),
            PhotoView::Favorites => self.library.favorite_photos(),
            PhotoView::Recent => self.library.recent_photos(self.config.ui.recent_limit),
        }
    }

    pub fn selected_folder(&self) -> Option<&Folder> {
        self.library.folders().get(self.selected_folder_index)
    }

    pub fn selected_photo(&self) -> Option<&PhotoEntry> {
        self.visible_photos().get(self.selected_photo_index).copied()
    }

    fn move_selection(&mut self, delta: i64) {
        match self.active_pane {
            ActivePane::Folders => {
                let count = self.library.folders().len();
                self.selected_folder_index = step(self.selected_folder_index, delta, count);
            }
            ActivePane::Photos => {
                let count = self.visible_photos().len();
                self.selected_photo_index = step(self.selected_photo_index, delta, count);
            }
        }
    }

    fn set_view(&mut self, view: PhotoView) {
        self.photo_view = view;
        self.selected_photo_index = 0;
        self.active_pane = ActivePane::Photos;
    }

    fn open_selected_folder(&mut self) {
        if self.active_pane != ActivePane::Folders {
            return;
        }
        if let Some(folder_id) = self.selected_folder().map(|f| f.id) {
            self.library.set_current_folder(Some(folder_id));
            self.photo_view = PhotoView::Folder;
            self.active_pane = ActivePane::Photos;
            self.selected_photo_index = 0;
        }
    }

    fn clamp_selection(&mut self) {
        let folder_count = self.library.folders().len();
        if self.selected_folder_index >= folder_count {
            self.selected_folder_index = folder_count.saturating_sub(1);
        }
        let photo_count = self.visible_photos().len();
        if self.selected_photo_index >= photo_count {
            self.selected_photo_index = photo_count.saturating_sub(1);
        }
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    fn submit_login(&mut self) {
        if self.login_dialog.registering {
            let registration = self.login_dialog.registration();
            if let Err(message) = validate::validate_registration(&registration) {
                self.login_dialog.status = Some(message);
                return;
            }
            match self.library.gateway().register(&registration) {
                Ok(user) => {
                    self.login_dialog.toggle_mode();
                    self.login_dialog.status = Some(format!(
                        "Account '{}' created. Please log in.",
                        user.username
                    ));
                }
                Err(err) => self.login_dialog.status = Some(err.user_message()),
            }
            return;
        }

        let credentials = self.login_dialog.credentials();
        if let Err(message) =
            validate::validate_login(&credentials.username, &credentials.password)
        {
            self.login_dialog.status = Some(message);
            return;
        }

        match self.library.gateway().login(&credentials) {
            Ok(pair) => {
                if let Err(err) = self.session.store(&pair.access, &pair.refresh) {
                    warn!("failed to persist session: {err:#}");
                }
                info!("logged in as '{}'", credentials.username);
                match self.library.gateway().current_user() {
                    Ok(user) => self.user = Some(user),
                    Err(err) => warn!("failed to fetch profile: {}", err),
                }
                self.login_dialog = LoginDialog::new();
                self.mode = AppMode::Normal;
                self.status_message = Some("Login successful!".to_string());
                self.spawn_refresh();
            }
            Err(err) => self.login_dialog.status = Some(err.user_message()),
        }
    }

    fn submit_folder(&mut self) {
        let name = match self.folder_dialog {
            Some(ref dialog) => dialog.name.trim().to_string(),
            None => return,
        };
        if let Err(message) = validate::validate_folder_name(&name) {
            if let Some(dialog) = self.folder_dialog.as_mut() {
                dialog.status = Some(message);
            }
            return;
        }

        match self.library.create_folder(&name) {
            Ok(folder) => {
                self.folder_dialog = None;
                self.mode = AppMode::Normal;
                self.selected_folder_index = self.library.folders().len().saturating_sub(1);
                self.status_message = Some(format!("Folder '{}' created", folder.name));
            }
            Err(err) => {
                self.handle_session_error(&err);
                if self.mode == AppMode::CreatingFolder {
                    // Keep the dialog open and show the cause inline.
                    self.library.clear_error();
                    if let Some(dialog) = self.folder_dialog.as_mut() {
                        dialog.status = Some(err.user_message());
                    }
                }
            }
        }
    }

    fn open_upload_dialog(&mut self) {
        let target = match self.active_pane {
            ActivePane::Folders => self.selected_folder(),
            ActivePane::Photos => self
                .library
                .current_folder()
                .and_then(|id| self.library.folder(id))
                .or_else(|| self.selected_folder()),
        }
        .map(|folder| (folder.id, folder.name.clone()));

        match target {
            Some((folder_id, folder_name)) => {
                self.upload_dialog = Some(UploadDialog::new(folder_id, &folder_name));
                self.mode = AppMode::Uploading;
            }
            None => self.status_message = Some("Create a folder first".to_string()),
        }
    }

    fn submit_upload(&mut self) {
        let (folder_id, path) = match self.upload_dialog {
            Some(ref dialog) => (dialog.folder_id, expand_path(dialog.path.trim())),
            None => return,
        };

        if !path.exists() {
            if let Some(dialog) = self.upload_dialog.as_mut() {
                dialog.status = Some("Path does not exist".to_string());
            }
            return;
        }

        self.upload_dialog = None;
        self.mode = AppMode::Normal;

        if path.is_dir() {
            self.upload_directory(folder_id, &path);
        } else {
            self.upload_single(folder_id, &path);
        }
        self.clamp_selection();
    }

    fn upload_single(&mut self, folder_id: i64, path: &Path) {
        match self.read_validated(path) {
            Ok(bytes) => {
                let filename = filename_of(path);
                match self.library.upload_photo(folder_id, &bytes, &filename) {
                    Ok(entry) => {
                        self.status_message =
                            Some(format!("Photo '{}' uploaded", entry.title));
                    }
                    Err(err) => self.handle_session_error(&err),
                }
            }
            Err(message) => self.status_message = Some(message),
        }
    }

    fn upload_directory(&mut self, folder_id: i64, dir: &Path) {
        let mut uploaded = 0usize;
        let mut skipped = 0usize;
        let mut failed = 0usize;

        for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let bytes = match self.read_validated(path) {
                Ok(bytes) => bytes,
                Err(_) => {
                    skipped += 1;
                    continue;
                }
            };
            let filename = filename_of(path);
            match self.library.upload_photo(folder_id, &bytes, &filename) {
                Ok(_) => uploaded += 1,
                Err(ApiError::SessionExpired) => {
                    self.force_login("Session expired. Please log in again.");
                    return;
                }
                Err(err) => {
                    warn!("upload of {} failed: {}", path.display(), err);
                    failed += 1;
                }
            }
        }

        if failed == 0 {
            self.library.clear_error();
        }
        self.status_message = Some(format!(
            "Uploaded {} photo(s) ({} skipped, {} failed)",
            uploaded, skipped, failed
        ));
    }

    /// Check a local file against the upload rules and read it.
    fn read_validated(&self, path: &Path) -> Result<Vec<u8>, String> {
        let metadata = std::fs::metadata(path)
            .map_err(|err| format!("Cannot read {}: {}", path.display(), err))?;
        validate::validate_upload(
            path,
            metadata.len(),
            &self.config.upload.image_extensions,
            self.config.upload.max_file_size,
        )?;
        std::fs::read(path).map_err(|err| format!("Cannot read {}: {}", path.display(), err))
    }

    fn request_delete(&mut self) {
        match self.active_pane {
            ActivePane::Folders => {
                let Some(folder) = self.selected_folder().cloned() else {
                    return;
                };
                let photo_count = self.library.photos_by_folder(folder.id).len();
                self.confirm_dialog = Some(ConfirmDialog::delete_folder(&folder, photo_count));
                self.mode = AppMode::Confirming;
            }
            ActivePane::Photos => {
                let Some(photo) = self.selected_photo().cloned() else {
                    return;
                };
                self.confirm_dialog = Some(ConfirmDialog::delete_photo(&photo));
                self.mode = AppMode::Confirming;
            }
        }
    }

    fn execute_pending(&mut self, action: PendingAction) {
        match action {
            PendingAction::DeleteFolder { folder_id, name } => {
                match self.library.delete_folder(folder_id) {
                    Ok(removed) => {
                        self.status_message = Some(format!(
                            "Folder '{}' deleted ({} photo(s) removed)",
                            name, removed
                        ));
                    }
                    Err(err) => self.handle_session_error(&err),
                }
            }
            PendingAction::DeletePhoto { folder_id, photo_id, title } => {
                match self.library.delete_photo(folder_id, photo_id) {
                    Ok(()) => {
                        self.status_message = Some(format!("Photo '{}' deleted", title));
                    }
                    Err(err) => self.handle_session_error(&err),
                }
            }
        }
        self.clamp_selection();
    }

    fn toggle_selected_favorite(&mut self) {
        let Some((photo_id, was_favorite)) =
            self.selected_photo().map(|p| (p.id, p.is_favorite))
        else {
            return;
        };

        match self.library.toggle_favorite(photo_id, !was_favorite) {
            Ok(()) => {
                self.status_message = Some(if was_favorite {
                    "Photo removed from favorites".to_string()
                } else {
                    "Photo added to favorites".to_string()
                });
            }
            Err(err) => self.handle_session_error(&err),
        }
        // The favorites view may have shrunk under the cursor.
        self.clamp_selection();
    }

    fn update_search_results(&mut self) {
        let query = match self.search_dialog {
            Some(ref dialog) => dialog.query.clone(),
            None => return,
        };
        let results: Vec<PhotoEntry> = self
            .library
            .search(&query)
            .into_iter()
            .cloned()
            .collect();
        if let Some(dialog) = self.search_dialog.as_mut() {
            dialog.set_results(results);
        }
    }

    fn jump_to_search_result(&mut self) {
        let Some((photo_id, folder_id)) = self
            .search_dialog
            .as_ref()
            .and_then(|dialog| dialog.selected_result())
            .map(|photo| (photo.id, photo.folder_id))
        else {
            return;
        };

        self.search_dialog = None;
        self.mode = AppMode::Normal;
        self.library.set_current_folder(Some(folder_id));
        self.photo_view = PhotoView::Folder;
        self.active_pane = ActivePane::Photos;
        self.selected_folder_index = self
            .library
            .folders()
            .iter()
            .position(|f| f.id == folder_id)
            .unwrap_or(0);
        self.selected_photo_index = self
            .library
            .photos_by_folder(folder_id)
            .iter()
            .position(|p| p.id == photo_id)
            .unwrap_or(0);
    }

    // ------------------------------------------------------------------
    // Session lifecycle
    // ------------------------------------------------------------------

    fn logout(&mut self) {
        info!("logging out");
        self.session.clear();
        self.reset_to_login();
        self.login_dialog.status = Some("Logged out successfully.".to_string());
    }

    /// Session ended without the user asking for it (failed refresh).
    fn force_login(&mut self, message: &str) {
        self.session.clear();
        self.reset_to_login();
        self.login_dialog.status = Some(message.to_string());
    }

    fn reset_to_login(&mut self) {
        self.library.clear();
        self.user = None;
        self.mode = AppMode::Login;
        self.login_dialog = LoginDialog::new();
        self.search_dialog = None;
        self.folder_dialog = None;
        self.upload_dialog = None;
        self.confirm_dialog = None;
        self.status_message = None;
        self.active_pane = ActivePane::Folders;
        self.photo_view = PhotoView::Folder;
        self.selected_folder_index = 0;
        self.selected_photo_index = 0;
    }

    fn handle_session_error(&mut self, err: &ApiError) {
        if matches!(err, ApiError::SessionExpired) {
            self.force_login("Session expired. Please log in again.");
        }
    }
}

fn step(index: usize, delta: i64, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    if delta > 0 {
        (index + 1).min(count - 1)
    } else {
        index.saturating_sub(1)
    }
}

fn filename_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "photo".to_string())
}

fn expand_path(input: &str) -> PathBuf {
    if let Some(stripped) = input.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(input)
}

fn refresh_message(report: &RefreshReport) -> String {
    if report.failures.is_empty() {
        format!(
            "Loaded {} folder(s), {} photo(s)",
            report.folder_count, report.photo_count
        )
    } else {
        let names: Vec<&str> = report
            .failures
            .iter()
            .map(|f| f.folder_name.as_str())
            .collect();
        format!(
            "Loaded {} folder(s), {} photo(s) - couldn't load: {}",
            report.folder_count,
            report.photo_count,
            names.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_clamps_at_edges() {
        assert_eq!(step(0, -1, 5), 0);
        assert_eq!(step(4, 1, 5), 4);
        assert_eq!(step(2, 1, 5), 3);
        assert_eq!(step(2, -1, 5), 1);
        assert_eq!(step(0, 1, 0), 0);
    }

    #[test]
    fn test_refresh_message_mentions_failures() {
        let clean = RefreshReport {
            folder_count: 2,
            photo_count: 5,
            failures: Vec::new(),
        };
        assert_eq!(refresh_message(&clean), "Loaded 2 folder(s), 5 photo(s)");

        let partial = RefreshReport {
            folder_count: 2,
            photo_count: 3,
            failures: vec![crate::store::FolderFailure {
                folder_id: 9,
                folder_name: "Broken".to_string(),
                message: "boom".to_string(),
            }],
        };
        assert!(refresh_message(&partial).contains("couldn't load: Broken"));
    }
}
