use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::slug::slugify;
use crate::validation::{require_non_empty, validate_company_slug, ValidationError};

pub const MIN_PASSWORD_LENGTH: usize = 6;

/// User as reported by the authentication service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AuthSessionResponse {
    pub access_token: String,
    pub user: AuthUser,
}

#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

impl SignInRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("email", &self.email)?;
        require_non_empty("password", &self.password)
    }
}

/// Admin sign-up form. Company fields are optional; when only a name is
/// given the slug is derived from it.
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub full_name: String,
    pub company_name: Option<String>,
    pub company_slug: Option<String>,
}

impl SignUpRequest {
    /// Form checks, in the order the form reports them.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("email", &self.email)?;
        if self.password != self.confirm_password {
            return Err(ValidationError::new("confirmPassword", "Passwords do not match"));
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::new(
                "password",
                format!("Password must be at least {MIN_PASSWORD_LENGTH} characters"),
            ));
        }
        if self.full_name.trim().is_empty() {
            return Err(ValidationError::new("fullName", "Full name is required"));
        }
        if let Some((_, slug)) = self.company() {
            validate_company_slug("companySlug", &slug)?;
        }
        Ok(())
    }

    /// Trimmed company name and slug, if the form asked for a company.
    pub fn company(&self) -> Option<(String, String)> {
        let name = self.company_name.as_deref().map(str::trim).filter(|n| !n.is_empty())?;
        let slug = self
            .company_slug
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| slugify(name));
        Some((name.to_string(), slug))
    }
}

#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SignUpResponse {
    pub user: AuthUser,
    /// Absent when the account still needs email confirmation
    pub session: Option<AuthSessionResponse>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AdminCompanySummary {
    pub id: String,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AdminProfile {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub company_id: Option<String>,
    pub company: Option<AdminCompanySummary>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct CreateAdminCompanyRequest {
    pub name: String,
    pub slug: Option<String>,
}

impl CreateAdminCompanyRequest {
    /// Validated `(name, slug)`, deriving the slug from the name when omitted.
    pub fn resolve(&self) -> Result<(String, String), ValidationError> {
        require_non_empty("name", &self.name)?;
        let name = self.name.trim().to_string();
        let slug = self
            .slug
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| slugify(&name));
        validate_company_slug("slug", &slug)?;
        Ok((name, slug))
    }
}

/// Where `/admin/editor` sends the signed-in admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct EditorRedirect {
    pub location: String,
}
