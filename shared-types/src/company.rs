use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::job::Job;
use crate::section::PageSection;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Company {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub brand_config: BrandConfig,
    pub page_sections: Vec<PageSection>,
}

/// Theme settings embedded in a company; it has no lifecycle of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BrandConfig {
    /// Hex color, e.g. "#0f172a"
    pub primary_color: String,
    /// Hex color, e.g. "#3b82f6"
    pub secondary_color: String,
    #[serde(default)]
    pub font_family: FontFamily,
    /// Remote URL or an uploaded image as a data URL
    #[serde(default)]
    pub logo_url: String,
}

impl Default for BrandConfig {
    fn default() -> Self {
        Self {
            primary_color: "#0f172a".to_string(),
            secondary_color: "#3b82f6".to_string(),
            font_family: FontFamily::Inter,
            logo_url: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum FontFamily {
    #[default]
    Inter,
    Roboto,
    #[serde(rename = "Open Sans")]
    OpenSans,
    Lato,
    Montserrat,
}

impl FontFamily {
    pub fn as_str(&self) -> &str {
        match self {
            FontFamily::Inter => "Inter",
            FontFamily::Roboto => "Roboto",
            FontFamily::OpenSans => "Open Sans",
            FontFamily::Lato => "Lato",
            FontFamily::Montserrat => "Montserrat",
        }
    }
}

impl std::fmt::Display for FontFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Partial company update. Absent fields are left untouched.
///
/// `page_sections` replaces the whole list; concurrent editors overwrite each other.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateCompanyRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub brand_config: Option<BrandConfig>,
    pub page_sections: Option<Vec<PageSection>>,
}

impl UpdateCompanyRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.slug.is_none()
            && self.brand_config.is_none()
            && self.page_sections.is_none()
    }
}

#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct CompaniesResponse {
    pub companies: Vec<Company>,
}

/// Everything the admin editor needs for one company.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct EditorDataResponse {
    pub company: Company,
    pub jobs: Vec<Job>,
    /// Public path of the rendered careers page
    pub public_path: String,
}
