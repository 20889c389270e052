//! Public profile interpretation.
//!
//! Fetching pages is left to a [`ProfileLookup`] implementation supplied by
//! the caller; this module turns what it returns into a [`CreatorProfile`].

pub mod derive;
pub mod parse;

use crate::domain::profile::{CreatorProfile, Platform, ProfileSource};
use parse::PublicStats;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw attributes of a public profile page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicPage {
    /// `og:title`, or the page title when absent.
    pub title: Option<String>,
    /// `og:image`.
    pub image_url: Option<String>,
    /// `<meta name="description">`.
    pub description: Option<String>,
    /// Visible page text.
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileLookupError {
    EmptyHandle,
    UnsupportedPlatform(String),
    Fetch {
        status: Option<u16>,
        detail: String,
    },
}

impl fmt::Display for ProfileLookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyHandle => write!(f, "Handle cannot be empty."),
            Self::UnsupportedPlatform(p) => {
                write!(f, "Web lookup not implemented for platform: {p}")
            }
            Self::Fetch {
                status: Some(status),
                detail,
            } => write!(f, "profile fetch failed (status={status}): {detail}"),
            Self::Fetch {
                status: None,
                detail,
            } => write!(f, "profile fetch failed: {detail}"),
        }
    }
}

impl std::error::Error for ProfileLookupError {}

#[async_trait::async_trait]
pub trait ProfileLookup: Send + Sync {
    fn source_name(&self) -> &'static str;

    /// Fetches the public page for an already-cleaned handle.
    async fn fetch_public_page(
        &self,
        platform: Platform,
        username: &str,
    ) -> Result<PublicPage, ProfileLookupError>;
}

/// Serves a page the caller already holds instead of fetching one.
#[derive(Debug, Clone, Default)]
pub struct SuppliedPage(pub PublicPage);

#[async_trait::async_trait]
impl ProfileLookup for SuppliedPage {
    fn source_name(&self) -> &'static str {
        "supplied"
    }

    async fn fetch_public_page(
        &self,
        _platform: Platform,
        _username: &str,
    ) -> Result<PublicPage, ProfileLookupError> {
        Ok(self.0.clone())
    }
}

/// Interprets an already captured public page for `handle`.
pub async fn interpret_page(
    handle: &str,
    platform: &str,
    page: PublicPage,
) -> Result<CreatorProfile, ProfileLookupError> {
    lookup_profile(&SuppliedPage(page), handle, platform).await
}

/// Strips whitespace, a leading `@` and surrounding slashes.
pub fn clean_handle(handle: &str) -> &str {
    handle.trim().trim_start_matches('@').trim_matches('/')
}

/// Resolves a creator profile through `lookup`.
///
/// Only an empty handle or an unsupported platform is an error. Fetch
/// failures degrade to a fallback profile carrying the error text.
pub async fn lookup_profile(
    lookup: &dyn ProfileLookup,
    handle: &str,
    platform: &str,
) -> Result<CreatorProfile, ProfileLookupError> {
    if handle.is_empty() {
        return Err(ProfileLookupError::EmptyHandle);
    }

    let platform = match platform.parse::<Platform>() {
        Ok(Platform::OnlyFans) => Platform::OnlyFans,
        _ => return Err(ProfileLookupError::UnsupportedPlatform(platform.to_string())),
    };

    let username = clean_handle(handle);
    if username.is_empty() {
        return Ok(CreatorProfile::fallback(
            platform,
            handle,
            ProfileSource::InvalidHandleFallback,
            Some("Handle was empty after cleaning.".to_string()),
        ));
    }

    let page = match lookup.fetch_public_page(platform, username).await {
        Ok(page) => page,
        Err(err) => {
            tracing::warn!(
                source = lookup.source_name(),
                %platform,
                username,
                error = %err,
                "profile fetch failed; using fallback profile"
            );
            return Ok(CreatorProfile::fallback(
                platform,
                username,
                ProfileSource::HttpErrorFallback,
                Some(err.to_string()),
            ));
        }
    };

    let from_description = page
        .description
        .as_deref()
        .map(PublicStats::from_description)
        .unwrap_or_default();
    let stats = from_description.merge(PublicStats::from_text(&page.text));

    let profile_name = non_empty(page.title);
    let image_url = non_empty(page.image_url);

    let profile =
        CreatorProfile::from_public_stats(platform, username, profile_name, image_url, stats);
    tracing::info!(
        source = lookup.source_name(),
        username,
        followers = profile.followers,
        raw_source = ?profile.raw_source,
        "profile resolved"
    );
    Ok(profile)
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
