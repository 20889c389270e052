use crate::domain::profile::{CreatorProfile, Platform, ProfileSource};
use crate::math::round_dp;
use crate::profile::parse::PublicStats;

const FALLBACK_FOLLOWERS: u64 = 5_000;
const DEFAULT_ENGAGEMENT_RATE: f64 = 3.5;
const DEFAULT_CPM: f64 = 20.0;
const VIEWS_PER_FOLLOWER: f64 = 0.3;
const MONTHLY_VISITS_PER_FOLLOWER: u64 = 15;
/// Roughly one in ten followers likes something at least once.
const FOLLOWERS_PER_LIKE: u64 = 10;

impl CreatorProfile {
    /// Placeholder audience used when nothing could be read for `handle`.
    pub fn fallback(
        platform: Platform,
        handle: &str,
        raw_source: ProfileSource,
        error: Option<String>,
    ) -> Self {
        let mut profile = Self::manual(
            platform,
            handle,
            FALLBACK_FOLLOWERS,
            views_for(FALLBACK_FOLLOWERS),
            DEFAULT_ENGAGEMENT_RATE,
            DEFAULT_CPM,
        );
        let name = if handle.is_empty() { "Unknown" } else { handle };
        profile.profile_name = Some(name.to_string());
        profile.raw_source = raw_source;
        profile.error = error;
        profile
    }

    /// Profile built from operator-entered stats.
    pub fn manual(
        platform: Platform,
        handle: &str,
        followers: u64,
        avg_views: u64,
        engagement_rate: f64,
        avg_cpm: f64,
    ) -> Self {
        Self {
            platform,
            handle: handle.to_string(),
            profile_name: None,
            profile_image_url: None,
            followers,
            likes: None,
            posts_count: None,
            photos_count: None,
            videos_count: None,
            avg_views,
            engagement_rate,
            avg_cpm,
            estimated_subscribers: followers,
            estimated_monthly_visits: followers.saturating_mul(MONTHLY_VISITS_PER_FOLLOWER),
            raw_source: ProfileSource::Manual,
            error: None,
        }
    }

    /// Derives audience estimates from public counts. Falls back to the
    /// placeholder audience when none of followers, likes or posts is known.
    pub fn from_public_stats(
        platform: Platform,
        handle: &str,
        profile_name: Option<String>,
        profile_image_url: Option<String>,
        stats: PublicStats,
    ) -> Self {
        if !stats.has_core_counts() {
            let mut fb = Self::fallback(platform, handle, ProfileSource::NoNumbersFound, None);
            fb.profile_name = profile_name.or_else(|| Some(handle.to_string()));
            fb.profile_image_url = profile_image_url;
            return fb;
        }

        let followers = match (stats.followers, stats.likes) {
            (Some(f), _) => f,
            (None, Some(likes)) => likes.saturating_mul(FOLLOWERS_PER_LIKE).max(likes),
            (None, None) => FALLBACK_FOLLOWERS,
        };

        let engagement_rate = match stats.likes {
            Some(likes) if followers > 0 => round_dp(likes as f64 / followers as f64 * 100.0, 2),
            _ => DEFAULT_ENGAGEMENT_RATE,
        };

        Self {
            platform,
            handle: handle.to_string(),
            profile_name: profile_name.or_else(|| Some(handle.to_string())),
            profile_image_url,
            followers,
            likes: stats.likes,
            posts_count: stats.posts,
            photos_count: stats.photos,
            videos_count: stats.videos,
            avg_views: views_for(followers),
            engagement_rate,
            avg_cpm: DEFAULT_CPM,
            // Fans on a subscription platform are paying subscribers.
            estimated_subscribers: followers,
            estimated_monthly_visits: followers.saturating_mul(MONTHLY_VISITS_PER_FOLLOWER),
            raw_source: ProfileSource::MetaOrText,
            error: None,
        }
    }
}

fn views_for(followers: u64) -> u64 {
    (followers as f64 * VIEWS_PER_FOLLOWER) as u64
}
