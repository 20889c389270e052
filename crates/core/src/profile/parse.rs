//! Reads follower / like / post counts out of public profile text.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

const COUNT: &str = r"(\d[\d.,]*\s*[kKmM]?)\s+";

struct CountPatterns {
    fans: Regex,
    fans_or_followers: Regex,
    likes: Regex,
    posts: Regex,
    photos: Regex,
    videos: Regex,
}

fn patterns() -> &'static CountPatterns {
    static PATTERNS: OnceLock<CountPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let count = |noun: &str| {
            Regex::new(&format!("{COUNT}{noun}")).expect("count pattern is valid")
        };
        CountPatterns {
            fans: count("(fans|Fans)"),
            fans_or_followers: count("(fans|Followers?)"),
            likes: count("[Ll]ikes"),
            posts: count("[Pp]osts?"),
            photos: count("[Pp]hotos?"),
            videos: count("[Vv]ideos?"),
        }
    })
}

fn human_number() -> &'static Regex {
    static NUMBER: OnceLock<Regex> = OnceLock::new();
    NUMBER.get_or_init(|| {
        Regex::new(r"^([0-9]*\.?[0-9]+)\s*([km])?$").expect("number pattern is valid")
    })
}

/// Parses counts such as `"4.5K"`, `"10.2M"` or `"12,345"`.
pub fn parse_human_number(text: &str) -> Option<u64> {
    let t = text.trim().to_lowercase().replace(',', "");
    let caps = human_number().captures(&t)?;

    let value: f64 = caps[1].parse().ok()?;
    let multiplier = match caps.get(2).map(|m| m.as_str()) {
        Some("k") => 1_000.0,
        Some("m") => 1_000_000.0,
        _ => 1.0,
    };
    Some((value * multiplier) as u64)
}

// Only the first match counts; a malformed first match yields `None`.
fn first_count(re: &Regex, text: &str) -> Option<u64> {
    let caps = re.captures(text)?;
    parse_human_number(&caps[1])
}

/// Counts found on a public profile page. `None` means not found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicStats {
    pub followers: Option<u64>,
    pub likes: Option<u64>,
    pub posts: Option<u64>,
    pub photos: Option<u64>,
    pub videos: Option<u64>,
}

impl PublicStats {
    /// Counts from a `<meta name="description">` blurb. Audience size is
    /// only read as "fans" here.
    pub fn from_description(desc: &str) -> Self {
        let p = patterns();
        Self {
            followers: first_count(&p.fans, desc),
            likes: first_count(&p.likes, desc),
            posts: first_count(&p.posts, desc),
            photos: first_count(&p.photos, desc),
            videos: first_count(&p.videos, desc),
        }
    }

    /// Counts from the visible page text, where "Followers" also counts.
    pub fn from_text(text: &str) -> Self {
        let p = patterns();
        Self {
            followers: first_count(&p.fans_or_followers, text),
            likes: first_count(&p.likes, text),
            posts: first_count(&p.posts, text),
            photos: first_count(&p.photos, text),
            videos: first_count(&p.videos, text),
        }
    }

    /// Fills the gaps in `self` from `other`.
    pub fn merge(self, other: Self) -> Self {
        Self {
            followers: self.followers.or(other.followers),
            likes: self.likes.or(other.likes),
            posts: self.posts.or(other.posts),
            photos: self.photos.or(other.photos),
            videos: self.videos.or(other.videos),
        }
    }

    /// At least one of followers, likes or posts is known.
    pub fn has_core_counts(&self) -> bool {
        self.followers.is_some() || self.likes.is_some() || self.posts.is_some()
    }
}
