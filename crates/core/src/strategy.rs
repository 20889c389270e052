//! DM playbooks and whale upsell ideas.
//!
//! The copy is static apart from the creator's display name; segment sizing
//! would need subscriber-level data this crate never sees.

use crate::domain::profile::CreatorProfile;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DmSuggestion {
    pub segment: String,
    pub goal: String,
    pub message: String,
    pub cta: String,
    pub timing: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhaleIdea {
    pub name: String,
    pub who: String,
    pub offer: String,
    pub pricing: String,
    pub notes: String,
}

/// Top three outreach segments, ordered new fans, engaged fans, lapsed subs.
pub fn dm_reachout_suggestions(profile: &CreatorProfile) -> Vec<DmSuggestion> {
    let name = profile.display_name();

    vec![
        DmSuggestion {
            segment: "New & silent fans (recent followers with low interaction)".to_string(),
            goal: "Convert silent followers into paying subs or PPV buyers.".to_string(),
            message: format!(
                "Hey love, thanks for following {name}! 💕 \
                 I noticed you haven't seen my latest sets yet – \
                 I'm sending you an exclusive preview today. \
                 If you enjoy it, I have a full pack waiting just for you."
            ),
            cta: "Link to a discounted intro bundle or trial subscription.".to_string(),
            timing: "Send within 24–72 hours after they follow or like for the first time."
                .to_string(),
        },
        DmSuggestion {
            segment: "Highly engaged fans (frequent likes/messages)".to_string(),
            goal: "Upsell to higher-value bundles and customs.".to_string(),
            message: "You've been showing me so much love lately, thank you 🥰 \
                      I put together a VIP bundle just for my top supporters – \
                      full-length videos + behind-the-scenes, and a custom voice note from me."
                .to_string(),
            cta: "High-value bundle / VIP tier DM with limited slots.".to_string(),
            timing: "Target top ~5–10% of engagers weekly.".to_string(),
        },
        win_back_suggestion(),
    ]
}

/// The lapsed-subscriber template, surfaced alongside churn signals.
pub fn win_back_template(_profile: &CreatorProfile) -> DmSuggestion {
    win_back_suggestion()
}

fn win_back_suggestion() -> DmSuggestion {
    DmSuggestion {
        segment: "Lapsed or at-risk subs (haven't opened content recently)".to_string(),
        goal: "Re-activate churn-risk subscribers with a time-limited offer.".to_string(),
        message: "I haven't seen you around in a bit and I miss you 🥺 \
                  I'm doing a 48-hour comeback offer: custom photo + full access to \
                  my latest drop if you stay subscribed this month."
            .to_string(),
        cta: "Retention incentive: custom piece or bundle if they keep/renew sub.".to_string(),
        timing: "Trigger 3–7 days before renewal or after 10–14 days of inactivity.".to_string(),
    }
}

/// Offer ideas for the top spenders. Not derived from spend data.
pub fn whale_upsell_ideas() -> Vec<WhaleIdea> {
    vec![
        WhaleIdea {
            name: "Monthly VIP whale club".to_string(),
            who: "Top 1–3% of spenders / most engaged fans.".to_string(),
            offer: "Limited VIP list with priority DMs, 1 custom request per month, \
                    early access to new sets, and their name on a private thank-you list."
                .to_string(),
            pricing: "Price at 3–5x your base subscription. \
                      If your sub is $10, test $30–$50/month for VIP."
                .to_string(),
            notes: "Cap the number of VIP spots to keep it exclusive and manageable.".to_string(),
        },
        WhaleIdea {
            name: "High-ticket custom bundles".to_string(),
            who: "Fans who already buy multiple PPVs or tip heavily.".to_string(),
            offer: "Personalized photo/video bundles (e.g., 10–20 photos + 3–5 short videos) \
                    selected to their preferences, delivered over a week."
                .to_string(),
            pricing: "Bundle price in the $99–$249 range depending on your brand and demand. \
                      Anchor the value by comparing to individual PPV prices."
                .to_string(),
            notes: "Audit past buyers and DM only those who already spent above a threshold."
                .to_string(),
        },
        WhaleIdea {
            name: "Whale live session / group show".to_string(),
            who: "Very small group of highest tippers.".to_string(),
            offer: "Exclusive live session (group or 1:1), with recording access included, \
                    plus behind-the-scenes content."
                .to_string(),
            pricing: "Group: $50–$150 per seat with limited spots. \
                      1:1: $150–$500 depending on length and boundaries."
                .to_string(),
            notes: "Use manual vetting: invite only fans you're comfortable with.".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::Platform;

    fn profile(name: Option<&str>, handle: &str) -> CreatorProfile {
        let mut p = CreatorProfile::manual(Platform::OnlyFans, handle, 10_000, 3_000, 3.5, 20.0);
        p.profile_name = name.map(str::to_string);
        p
    }

    #[test]
    fn three_dm_segments_in_order() {
        let s = dm_reachout_suggestions(&profile(Some("Mia"), "mia"));
        assert_eq!(s.len(), 3);
        assert!(s[0].segment.starts_with("New & silent fans"));
        assert!(s[1].segment.starts_with("Highly engaged fans"));
        assert!(s[2].segment.starts_with("Lapsed or at-risk subs"));
    }

    #[test]
    fn first_message_uses_display_name() {
        let named = dm_reachout_suggestions(&profile(Some("Mia Rose"), "mia"));
        assert!(named[0].message.contains("thanks for following Mia Rose!"));

        let handle_only = dm_reachout_suggestions(&profile(None, "mia"));
        assert!(handle_only[0].message.contains("thanks for following mia!"));

        let anonymous = dm_reachout_suggestions(&profile(None, "  "));
        assert!(anonymous[0].message.contains("thanks for following you!"));
    }

    #[test]
    fn win_back_is_last_playbook_entry() {
        let p = profile(None, "mia");
        assert_eq!(win_back_template(&p), dm_reachout_suggestions(&p)[2]);
    }

    #[test]
    fn three_whale_ideas() {
        let ideas = whale_upsell_ideas();
        let names: Vec<_> = ideas.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "Monthly VIP whale club",
                "High-ticket custom bundles",
                "Whale live session / group show"
            ]
        );
    }
}
