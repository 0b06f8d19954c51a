//! Badge/price ratio: a value score relating a record's badge strength to
//! its listing price.
//!
//! BPR = (badge count x average badge rarity) / price. Higher means more or
//! rarer badges for the money. Unlisted records fall back to their total
//! badge rarity so they still sort meaningfully.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Static badge rarity weights, estimated from the collection distribution.
static BADGE_RARITY_SCORES: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    HashMap::from([
        // Common
        ("any_gvc", 1.0),
        ("gamer", 1.2),
        ("plants", 1.3),
        ("science_goggles", 1.4),
        ("toy_bricks", 1.5),
        // Uncommon
        ("rainbow_boombox", 2.0),
        ("rainbow_bubble_goggles", 2.1),
        ("surfer", 2.2),
        ("pothead", 2.3),
        ("gradient_lover", 2.4),
        ("grayscale_seeker", 2.5),
        ("plastic_lover", 2.6),
        ("robot_lover", 2.7),
        ("ladies_night", 2.8),
        ("necks_level", 2.9),
        ("vibetown_social_club", 3.0),
        ("party_in_the_back", 3.1),
        ("ranger", 3.2),
        // Rare
        ("astro_bean", 4.0),
        ("cosmic", 4.2),
        ("funky_fresh", 4.4),
        ("fur_the_win", 4.6),
        ("gold_member", 4.8),
        ("great_stacheby", 5.0),
        ("gud_meat", 5.2),
        ("hail_mary_heroes", 5.4),
        // Ultra rare
        ("full_send_maverick", 8.0),
    ])
});

const DEFAULT_BADGE_RARITY: f64 = 1.0;

fn badge_rarity(key: &str) -> f64 {
    BADGE_RARITY_SCORES
        .get(key)
        .copied()
        .unwrap_or(DEFAULT_BADGE_RARITY)
}

#[derive(Debug, Clone, PartialEq)]
pub struct BprBreakdown {
    pub score: f64,
    pub badge_count: usize,
    pub total_rarity: f64,
    pub price: f64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compute the badge/price ratio for a set of badge keys at a listing
/// price. A price of 0 (or negative) means unlisted.
pub fn calculate_bpr<'a, I>(badge_keys: I, price: f64) -> BprBreakdown
where
    I: IntoIterator<Item = &'a str>,
{
    let keys: Vec<&str> = badge_keys.into_iter().collect();
    let badge_count = keys.len();

    if badge_count == 0 {
        return BprBreakdown {
            score: 0.0,
            badge_count: 0,
            total_rarity: 0.0,
            price: price.max(0.0),
        };
    }

    let total_rarity: f64 = keys.iter().map(|k| badge_rarity(k)).sum();

    if price <= 0.0 {
        return BprBreakdown {
            score: total_rarity,
            badge_count,
            total_rarity,
            price: 0.0,
        };
    }

    let average_rarity = total_rarity / badge_count as f64;
    BprBreakdown {
        score: round2(badge_count as f64 * average_rarity / price),
        badge_count,
        total_rarity: round2(total_rarity),
        price,
    }
}

/// Human rating for a BPR score.
pub fn bpr_rating(score: f64, listed: bool) -> &'static str {
    if !listed {
        return "Not Listed";
    }
    if score >= 10.0 {
        "Excellent Value"
    } else if score >= 5.0 {
        "Great Value"
    } else if score >= 2.0 {
        "Good Value"
    } else if score >= 1.0 {
        "Fair Value"
    } else {
        "Premium Price"
    }
}

/// Short display form; capped at 99+ to keep columns narrow.
pub fn format_bpr(score: f64, listed: bool) -> String {
    if !listed {
        return "N/A".to_string();
    }
    if score >= 100.0 {
        return "99+".to_string();
    }
    format!("{:.1}", score)
}
