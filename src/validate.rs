//! Client-side form and upload validation.
//!
//! Everything here is checked before a network call is made; a rejection
//! never reaches the gateway.

use std::path::Path;

use crate::api::types::Registration;

pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username is required".to_string());
    }
    if username.len() < 3 {
        return Err("Username must be at least 3 characters".to_string());
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err("Username can only contain letters, numbers, and underscores".to_string());
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }
    if password.len() < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }
    Ok(())
}

fn validate_password_strength(password: &str) -> Result<(), String> {
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !(has_lower && has_upper && has_digit) {
        return Err(
            "Password must contain at least one uppercase letter, one lowercase letter, and one number"
                .to_string(),
        );
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !local.contains(char::is_whitespace)
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !domain.contains(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err("Please enter a valid email address".to_string());
    }
    Ok(())
}

pub fn validate_login(username: &str, password: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username is required".to_string());
    }
    if username.len() < 3 {
        return Err("Username must be at least 3 characters".to_string());
    }
    validate_password(password)
}

pub fn validate_registration(registration: &Registration) -> Result<(), String> {
    validate_username(&registration.username)?;
    validate_email(&registration.email)?;
    validate_password(&registration.password)?;
    validate_password_strength(&registration.password)?;
    if registration.password_confirm.is_empty() {
        return Err("Please confirm your password".to_string());
    }
    if registration.password != registration.password_confirm {
        return Err("Passwords do not match".to_string());
    }
    Ok(())
}

pub fn validate_folder_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Folder name is required".to_string());
    }
    if name.len() > 100 {
        return Err("Folder name cannot exceed 100 characters".to_string());
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == ' ' || c == '-' || c == '_')
    {
        return Err(
            "Folder name can only contain letters, numbers, spaces, hyphens, and underscores"
                .to_string(),
        );
    }
    Ok(())
}

/// Validate a local file for upload against the configured extension set
/// and size cap.
pub fn validate_upload(
    path: &Path,
    size: u64,
    allowed_extensions: &[String],
    max_size: u64,
) -> Result<(), String> {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if !allowed_extensions.iter().any(|allowed| allowed == &extension) {
        return Err(format!(
            "Only {} files are allowed",
            allowed_extensions.join(", ")
        ));
    }
    if size > max_size {
        return Err(format!(
            "File size must be less than {} MB",
            max_size / (1024 * 1024)
        ));
    }
    if path.file_name().is_none() {
        return Err("File must have a name".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn registration(password: &str, confirm: &str) -> Registration {
        Registration {
            username: "alice_1".to_string(),
            email: "alice@example.com".to_string(),
            password: password.to_string(),
            password_confirm: confirm.to_string(),
        }
    }

    #[test]
    fn test_username_rules() {
        assert!(validate_username("alice_1").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("has space").is_err());
        assert!(validate_username("dash-ed").is_err());
    }

    #[test]
    fn test_email_rules() {
        assert!(validate_email("a@b.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("a@nodot").is_err());
        assert!(validate_email("a b@c.com").is_err());
    }

    #[test]
    fn test_registration_password_rules() {
        assert!(validate_registration(&registration("Passw0rd", "Passw0rd")).is_ok());
        // Too short.
        assert!(validate_registration(&registration("Pw0rd", "Pw0rd")).is_err());
        // Missing a digit.
        assert!(validate_registration(&registration("Password", "Password")).is_err());
        // Mismatch.
        assert!(validate_registration(&registration("Passw0rd", "Passw0rd!")).is_err());
        // Missing confirmation.
        assert!(validate_registration(&registration("Passw0rd", "")).is_err());
    }

    #[test]
    fn test_folder_name_rules() {
        assert!(validate_folder_name("Summer Trip 2024").is_ok());
        assert!(validate_folder_name("with-dash_and_underscore").is_ok());
        assert!(validate_folder_name("").is_err());
        assert!(validate_folder_name("   ").is_err());
        assert!(validate_folder_name(&"x".repeat(101)).is_err());
        assert!(validate_folder_name("no/slashes").is_err());
    }

    #[test]
    fn test_upload_rules() {
        let allowed: Vec<String> = ["jpg", "jpeg", "png", "gif", "webp"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let max = 10 * 1024 * 1024;

        assert!(validate_upload(&PathBuf::from("a.jpg"), 2048, &allowed, max).is_ok());
        assert!(validate_upload(&PathBuf::from("a.JPG"), 2048, &allowed, max).is_ok());
        assert!(validate_upload(&PathBuf::from("a.tiff"), 2048, &allowed, max).is_err());
        assert!(validate_upload(&PathBuf::from("a.png"), max + 1, &allowed, max).is_err());
    }
}
