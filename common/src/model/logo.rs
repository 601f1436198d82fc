use serde::{Deserialize, Serialize};

/// The two rendition formats a logo can be stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogoFormat {
    Png,
    Svg,
}

impl LogoFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogoFormat::Png => "png",
            LogoFormat::Svg => "svg",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            LogoFormat::Png => "image/png",
            LogoFormat::Svg => "image/svg+xml",
        }
    }
}

/// Persisted metadata for one stored logo, as served by the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogoMetadata {
    pub id: String,
    pub club_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub club_city: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub club_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub club_website: String,
    pub has_svg: bool,
    pub has_png: bool,
    pub primary_format: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub logo_url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub logo_url_svg: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub logo_url_png: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub file_size_svg: i64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub file_size_png: i64,
    pub created_at: String,
    pub updated_at: String,
}

fn is_zero(n: &i64) -> bool {
    *n == 0
}

/// Compact search hit for the club search that joins the local logo store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClubLogoSearchResult {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub logo_url: String,
    pub has_local_logo: bool,
}

/// Response body for a successful logo upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    pub id: String,
    pub club_name: String,
    pub has_svg: bool,
    pub has_png: bool,
    pub size_svg: i64,
    pub size_png: i64,
    pub message: String,
}

/// Response body for a logo deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub id: String,
}
