//! The seam between the library/view code and HTTP.

use super::error::ApiError;
use super::types::{Credentials, Folder, Photo, Registration, TokenPair, User};

/// Typed facade over the gallery backend's REST surface.
///
/// The library and the app only ever talk to this trait; `HttpGateway` is
/// the production implementation and tests substitute an in-memory fake.
/// None of these calls retry on their own; the one token-refresh replay
/// lives inside the implementation, invisible to callers.
pub trait Gateway: Send + Sync {
    /// `POST /token`: exchange credentials for an access/refresh pair.
    fn login(&self, credentials: &Credentials) -> Result<TokenPair, ApiError>;

    /// `POST /users`: create an account.
    fn register(&self, registration: &Registration) -> Result<User, ApiError>;

    /// `GET /users`: profile of the authenticated user.
    fn current_user(&self) -> Result<User, ApiError>;

    /// `GET /folders`
    fn list_folders(&self) -> Result<Vec<Folder>, ApiError>;

    /// `POST /folders`
    fn create_folder(&self, name: &str) -> Result<Folder, ApiError>;

    /// `DELETE /folders/{id}`. The server cascades contained photos.
    fn delete_folder(&self, folder_id: i64) -> Result<(), ApiError>;

    /// `GET /folders/{id}/photos`
    fn list_folder_photos(&self, folder_id: i64) -> Result<Vec<Photo>, ApiError>;

    /// `POST /folders/{id}/photos`: multipart `image` + `filename`.
    fn upload_photo(&self, folder_id: i64, image: &[u8], filename: &str)
        -> Result<Photo, ApiError>;

    /// `DELETE /folders/{id}/photos/{photoId}`
    fn delete_photo(&self, folder_id: i64, photo_id: i64) -> Result<(), ApiError>;

    /// `PATCH /photos/{id}`: set the favorite flag. Not every backend
    /// deployment ships this endpoint; callers handle
    /// [`ApiError::is_capability_missing`].
    fn set_favorite(&self, photo_id: i64, favorite: bool) -> Result<(), ApiError>;
}
