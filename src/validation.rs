use regex::Regex;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("domain name is empty")]
    EmptyDomain,
    #[error("domain name contains an empty label")]
    EmptyLabel,
    #[error("label '{0}' too long (max 63 characters)")]
    LabelTooLong(String),
    #[error("label '{0}' contains invalid characters (only letters, digits and '-' allowed)")]
    InvalidCharacters(String),
    #[error("label '{0}' must not start or end with '-'")]
    LeadingOrTrailingHyphen(String),
    #[error("project id is empty")]
    EmptyProjectId,
    #[error("'{0}' is not a service-account email")]
    InvalidServiceAccount(String),
}

lazy_static::lazy_static! {
    /// Letters, digits and '-'
    static ref LABEL_RE: Regex = Regex::new(r"^[A-Za-z0-9-]+$").unwrap();
    /// local@host, no whitespace
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}

pub fn validate_label(label: &str) -> Result<(), ValidationError> {
    if label.is_empty() {
        return Err(ValidationError::EmptyLabel);
    }
    if label.len() > 63 {
        return Err(ValidationError::LabelTooLong(label.to_string()));
    }
    if !LABEL_RE.is_match(label) {
        return Err(ValidationError::InvalidCharacters(label.to_string()));
    }
    if label.starts_with('-') || label.ends_with('-') {
        return Err(ValidationError::LeadingOrTrailingHyphen(label.to_string()));
    }
    Ok(())
}

/// Accepts the domain with or without its trailing dot.
pub fn validate_domain_name(domain: &str) -> Result<(), ValidationError> {
    let d = domain.trim_end_matches('.');
    if d.is_empty() {
        return Err(ValidationError::EmptyDomain);
    }
    for label in d.split('.') {
        validate_label(label)?;
    }
    Ok(())
}

pub fn validate_project_id(project_id: &str) -> Result<(), ValidationError> {
    if project_id.trim().is_empty() {
        return Err(ValidationError::EmptyProjectId);
    }
    Ok(())
}

/// Accepts a bare email or one already carrying the `serviceAccount:` prefix.
pub fn validate_service_account(email: &str) -> Result<(), ValidationError> {
    let bare = email.trim().trim_start_matches("serviceAccount:");
    if !EMAIL_RE.is_match(bare) {
        return Err(ValidationError::InvalidServiceAccount(email.to_string()));
    }
    Ok(())
}
