//! Reflection option resolver.
//!
//! A static menu of candidate reflection phrases keyed by
//! `(Category, EmotionBucket)`. Every menu ends with the "Something else…"
//! sentinel that signals free-text override; missing pairs resolve to a
//! generic fallback menu. [`resolve`] is a total function over its clamped
//! domain with no side effects.

use crate::state::{Category, clamp_emotion};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Menu entry signaling that the user will supply their own words.
pub const SOMETHING_ELSE: &str = "Something else…";

/// Named emotion bucket derived from the 0..=6 emotion index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionBucket {
    Calm,
    Hopeful,
    Neutral,
    Uncertain,
    Discouraged,
    Overwhelmed,
    Frustrated,
}

impl EmotionBucket {
    pub const ALL: [EmotionBucket; 7] = [
        EmotionBucket::Calm,
        EmotionBucket::Hopeful,
        EmotionBucket::Neutral,
        EmotionBucket::Uncertain,
        EmotionBucket::Discouraged,
        EmotionBucket::Overwhelmed,
        EmotionBucket::Frustrated,
    ];

    /// Map an emotion index to its bucket, clamping out-of-range values to
    /// the nearest end of the scale.
    pub fn from_index(index: i64) -> EmotionBucket {
        Self::ALL[clamp_emotion(index) as usize]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionBucket::Calm => "calm",
            EmotionBucket::Hopeful => "hopeful",
            EmotionBucket::Neutral => "neutral",
            EmotionBucket::Uncertain => "uncertain",
            EmotionBucket::Discouraged => "discouraged",
            EmotionBucket::Overwhelmed => "overwhelmed",
            EmotionBucket::Frustrated => "frustrated",
        }
    }
}

type MenuKey = (Category, EmotionBucket);

static REFLECTION_MENUS: Lazy<HashMap<MenuKey, &'static [&'static str]>> = Lazy::new(|| {
    use Category::*;
    use EmotionBucket::*;

    let mut menus: HashMap<MenuKey, &'static [&'static str]> = HashMap::new();
    let mut put = |cat: Category, bucket: EmotionBucket, phrases: &'static [&'static str]| {
        menus.insert((cat, bucket), phrases);
    };

    put(School, Calm, &[
        "I'm in a good place and want to build on it.",
        "I feel steady but unsure what to do next.",
        "I want to stay balanced as things get busier.",
        "I'm curious about what's possible.",
    ]);
    put(School, Hopeful, &[
        "I see a path forward.",
        "I need help staying motivated.",
        "I'm excited but nervous.",
        "I want to make the most of this energy.",
    ]);
    put(School, Neutral, &[
        "I'm not sure what I want yet.",
        "I need more clarity about my path.",
        "I'm stuck in the middle.",
        "I'm open but waiting for direction.",
    ]);
    put(School, Uncertain, &[
        "I don't know which direction to take.",
        "I'm worried about making the wrong choice.",
        "I feel lost compared to others.",
        "I need reassurance.",
    ]);
    put(School, Discouraged, &[
        "I feel behind.",
        "Nothing seems to be working.",
        "I'm losing motivation.",
        "I'm doubting myself.",
    ]);
    put(School, Overwhelmed, &[
        "I have too much on my plate.",
        "I don't know where to start.",
        "I feel behind others.",
        "I'm burnt out.",
    ]);
    put(School, Frustrated, &[
        "I feel stuck.",
        "Things aren't fair.",
        "I'm tired of the same patterns.",
        "I need to be heard.",
    ]);

    put(Internships, Calm, &[
        "I'm ready to explore but not rushing.",
        "I want to find a good fit.",
        "I feel steady in my search.",
        "I'm taking it one step at a time.",
    ]);
    put(Internships, Hopeful, &[
        "I'm excited about possibilities.",
        "I want to make progress this week.",
        "I feel ready to put myself out there.",
        "I'm trusting the process.",
    ]);
    put(Internships, Neutral, &[
        "I'm not sure what I'm looking for.",
        "I need to narrow down my options.",
        "I'm curious but unmotivated.",
        "I'm waiting for the right opportunity.",
    ]);
    put(Internships, Uncertain, &[
        "I don't know where to start.",
        "I'm not sure I'm qualified.",
        "I feel lost in the process.",
        "I'm scared of rejection.",
    ]);
    put(Internships, Discouraged, &[
        "I've been rejected too many times.",
        "I feel behind my peers.",
        "I'm doubting myself.",
        "I don't know what I'm doing wrong.",
    ]);
    put(Internships, Overwhelmed, &[
        "I feel behind others.",
        "I don't know where to start.",
        "I'm doubting myself.",
        "There are too many moving parts.",
    ]);
    put(Internships, Frustrated, &[
        "The process feels unfair.",
        "I'm tired of applying.",
        "I don't feel seen.",
        "I need a break.",
    ]);

    put(Career, Calm, &[
        "I'm in a good place and reflecting.",
        "I want to make intentional choices.",
        "I'm taking my time.",
        "I'm building toward something.",
    ]);
    put(Career, Hopeful, &[
        "I see new possibilities.",
        "I'm ready for a change.",
        "I feel aligned with my values.",
        "I want to take the next step.",
    ]);
    put(Career, Neutral, &[
        "I'm not sure what I want.",
        "I'm exploring options.",
        "I feel stuck in the middle.",
        "I need more information.",
    ]);
    put(Career, Uncertain, &[
        "I'm considering a pivot.",
        "I don't know if I'm on the right path.",
        "I'm afraid of making a mistake.",
        "I need clarity.",
    ]);
    put(Career, Discouraged, &[
        "I feel stuck.",
        "Nothing is working out.",
        "I'm losing hope.",
        "I'm comparing myself to others.",
    ]);
    put(Career, Overwhelmed, &[
        "I have too many options.",
        "I don't know where to start.",
        "I'm burnt out.",
        "Everything feels urgent.",
    ]);
    put(Career, Frustrated, &[
        "I feel undervalued.",
        "I'm tired of the same cycle.",
        "I need change.",
        "I don't feel in control.",
    ]);

    put(Life, Calm, &[
        "I'm in a good place.",
        "I want to maintain this balance.",
        "I'm reflecting on what matters.",
        "I'm taking things day by day.",
    ]);
    put(Life, Hopeful, &[
        "I'm excited about what's next.",
        "I want to grow.",
        "I feel ready for change.",
        "I'm building something new.",
    ]);
    put(Life, Neutral, &[
        "I'm in between.",
        "I need more direction.",
        "I'm not sure what I want.",
        "I'm waiting for clarity.",
    ]);
    put(Life, Uncertain, &[
        "I don't know what's next.",
        "I feel lost.",
        "I'm in transition.",
        "I need support.",
    ]);
    put(Life, Discouraged, &[
        "I feel stuck.",
        "Things aren't going well.",
        "I'm losing hope.",
        "I'm tired.",
    ]);
    put(Life, Overwhelmed, &[
        "I have too much going on.",
        "I don't know where to start.",
        "I need to slow down.",
        "I'm spread too thin.",
    ]);
    put(Life, Frustrated, &[
        "I feel out of control.",
        "Things aren't working.",
        "I'm tired of the same patterns.",
        "I need a change.",
    ]);

    menus
});

/// Generic menu used when a `(category, bucket)` pair has no entry.
const FALLBACK_MENU: &[&str] = &[
    "I'm not sure how to put it into words.",
    "I need some space to figure this out.",
    "I'm feeling stuck.",
    "I want to see things differently.",
];

/// Resolve the reflection menu for a category and emotion index.
///
/// Always returns an owned, non-empty list whose last element is
/// [`SOMETHING_ELSE`]; callers may reorder or display it without touching
/// the shared table.
pub fn resolve(category: Category, emotion_index: i64) -> Vec<String> {
    let bucket = EmotionBucket::from_index(emotion_index);
    let phrases = REFLECTION_MENUS
        .get(&(category, bucket))
        .filter(|p| !p.is_empty())
        .copied()
        .unwrap_or(FALLBACK_MENU);
    phrases
        .iter()
        .map(|p| p.to_string())
        .chain(std::iter::once(SOMETHING_ELSE.to_string()))
        .collect()
}

/// Resolve from an unnormalized category string, as received off the wire.
pub fn resolve_raw(category: &str, emotion_index: i64) -> Vec<String> {
    resolve(Category::normalize(category), emotion_index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_pair_has_a_menu() {
        for cat in Category::ALL {
            for bucket in EmotionBucket::ALL {
                assert!(
                    REFLECTION_MENUS.contains_key(&(cat, bucket)),
                    "missing menu for {cat}/{}",
                    bucket.as_str()
                );
            }
        }
    }

    #[test]
    fn menus_have_four_phrases_plus_sentinel() {
        for cat in Category::ALL {
            for idx in 0..=6 {
                let menu = resolve(cat, idx);
                assert_eq!(menu.len(), 5);
                assert_eq!(menu.last().map(String::as_str), Some(SOMETHING_ELSE));
            }
        }
    }
}
