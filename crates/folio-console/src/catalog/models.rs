//! Catalog data models

use crate::error::{ConsoleError, ConsoleResult};
use serde::{Deserialize, Serialize};

/// Locale-specific text block of a catalog entity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageText {
    /// Language identifier, e.g. `en`
    pub language_id: String,

    /// Localized display name
    pub name: String,

    /// Localized description
    #[serde(default)]
    pub description: Option<String>,
}

/// Image metadata returned by the upload endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMeta {
    pub id: i64,

    /// Server-relative URL, resolved against the static base URL
    pub image_url: String,

    #[serde(default)]
    pub alt_text: Option<String>,
}

/// Attachment metadata returned by the upload endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentMeta {
    pub id: i64,

    /// Server-relative URL, resolved against the static base URL
    pub attachment_url: String,

    pub file_name: String,
}

/// Paginated list envelope returned by every list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: 1,
        }
    }
}

/// Common surface of catalog records consumed by grids and forms
pub trait CatalogRecord: Clone + Send + Sync {
    /// Backend identifier
    fn id(&self) -> i64;

    /// Stable short code
    fn code(&self) -> &str;

    /// Locale-specific text blocks
    fn texts(&self) -> &[LanguageText];

    /// Name shown in grids and delete confirmations: the first language
    /// block's name, falling back to the code
    fn display_name(&self) -> &str {
        self.texts().iter().map(|t| t.name.as_str()).find(|n| !n.is_empty()).unwrap_or_else(|| self.code())
    }
}

macro_rules! impl_catalog_record {
    ($ty:ty) => {
        impl CatalogRecord for $ty {
            fn id(&self) -> i64 {
                self.id
            }

            fn code(&self) -> &str {
                &self.code
            }

            fn texts(&self) -> &[LanguageText] {
                &self.texts
            }
        }
    };
}

/// Grouping of categories, e.g. "Technology" vs "Industry"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryType {
    pub id: i64,
    pub code: String,
    #[serde(default)]
    pub texts: Vec<LanguageText>,
}

/// Category within a category type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub code: String,
    pub category_type_id: i64,
    #[serde(default)]
    pub texts: Vec<LanguageText>,
}

/// Skill attached to projects
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: i64,
    pub code: String,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub texts: Vec<LanguageText>,
}

/// Free-form content section of a portfolio page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: i64,
    pub code: String,
    #[serde(default)]
    pub texts: Vec<LanguageText>,
}

/// Project in the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub code: String,
    #[serde(default)]
    pub texts: Vec<LanguageText>,
    #[serde(default)]
    pub category_ids: Vec<i64>,
    #[serde(default)]
    pub skill_ids: Vec<i64>,
    #[serde(default)]
    pub images: Vec<ImageMeta>,
    #[serde(default)]
    pub attachments: Vec<AttachmentMeta>,
}

/// Portfolio bundling projects and sections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portfolio {
    pub id: i64,
    pub code: String,
    #[serde(default)]
    pub texts: Vec<LanguageText>,
    #[serde(default)]
    pub project_ids: Vec<i64>,
    #[serde(default)]
    pub section_ids: Vec<i64>,
}

impl_catalog_record!(CategoryType);
impl_catalog_record!(Category);
impl_catalog_record!(Skill);
impl_catalog_record!(Section);
impl_catalog_record!(Project);
impl_catalog_record!(Portfolio);

/// Require at least one language block with a non-empty name.
///
/// Client-side convenience only; the backend validates again on submit.
pub fn validate_language_blocks(texts: &[LanguageText]) -> ConsoleResult<()> {
    if texts.iter().any(|t| !t.name.trim().is_empty()) {
        Ok(())
    } else {
        Err(ConsoleError::Validation {
            message: "At least one language block with a name is required".to_string(),
        })
    }
}
