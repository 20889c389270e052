use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    OnlyFans,
    Instagram,
    TikTok,
    YouTube,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnlyFans => "OnlyFans",
            Self::Instagram => "Instagram",
            Self::TikTok => "TikTok",
            Self::YouTube => "YouTube",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "onlyfans" => Ok(Self::OnlyFans),
            "instagram" => Ok(Self::Instagram),
            "tiktok" => Ok(Self::TikTok),
            "youtube" => Ok(Self::YouTube),
            other => anyhow::bail!("unknown platform: {other}"),
        }
    }
}

/// Where the numbers on a [`CreatorProfile`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileSource {
    /// Counts read from public page metadata or text.
    MetaOrText,
    /// Entered by the operator.
    Manual,
    InvalidHandleFallback,
    HttpErrorFallback,
    NoNumbersFound,
}

impl ProfileSource {
    pub fn is_fallback(&self) -> bool {
        matches!(
            self,
            Self::InvalidHandleFallback | Self::HttpErrorFallback | Self::NoNumbersFound
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatorProfile {
    pub platform: Platform,
    pub handle: String,
    pub profile_name: Option<String>,
    pub profile_image_url: Option<String>,
    pub followers: u64,
    pub likes: Option<u64>,
    pub posts_count: Option<u64>,
    pub photos_count: Option<u64>,
    pub videos_count: Option<u64>,
    pub avg_views: u64,
    pub engagement_rate: f64,
    pub avg_cpm: f64,
    pub estimated_subscribers: u64,
    pub estimated_monthly_visits: u64,
    pub raw_source: ProfileSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CreatorProfile {
    /// Name used in outreach copy: profile name, then handle, then "you".
    pub fn display_name(&self) -> &str {
        self.profile_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .or_else(|| Some(self.handle.trim()).filter(|s| !s.is_empty()))
            .unwrap_or("you")
    }
}
