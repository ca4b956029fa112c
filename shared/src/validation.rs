//! Input validation functions
//!
//! Validation utilities for user-supplied input. The backend validates
//! before hashing or persisting anything.

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if email.len() > 255 {
        return Err("Email too long".to_string());
    }
    let email_regex = regex_lite::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    if !email_regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 6 {
        return Err("Password must be at least 6 characters".to_string());
    }
    if password.len() > 128 {
        return Err("Password too long".to_string());
    }
    Ok(())
}

/// Validate todo text
pub fn validate_todo_text(text: &str) -> Result<(), String> {
    if text.trim().is_empty() {
        return Err("Todo text cannot be empty".to_string());
    }
    if text.len() > 10_000 {
        return Err("Todo text too long".to_string());
    }
    Ok(())
}
