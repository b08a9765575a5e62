use crate::{Flashcard, Rating};
use chrono::{DateTime, Duration, Utc};

/// New streak and next review date, computed together so the interval
/// lookup and the persisted streak cannot drift apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReviewOutcome {
    pub streak: u32,
    pub interval_days: u32,
    pub next_review: DateTime<Utc>,
}

fn base_interval(streak: u32) -> u32 {
    match streak {
        0 => 1,
        1 => 2,
        2 => 4,
        3 => 7,
        4 => 14,
        _ => 30,
    }
}

pub fn calculate_next_review(streak: u32, rating: Rating, now: DateTime<Utc>) -> ReviewOutcome {
    let score = rating.as_score();

    let new_streak = if score >= 4 {
        streak + 1
    } else if score <= 2 {
        streak.saturating_sub(1)
    } else {
        streak
    };

    // Rating override applies after the streak lookup: a failed review
    // always comes back tomorrow, whatever the streak says.
    let base = base_interval(new_streak);
    let days = match score {
        s if s <= 2 => 1,
        3 => ((base as f64 * 0.7).floor() as u32).max(1),
        5 => (base as f64 * 1.5).floor() as u32,
        _ => base,
    };

    ReviewOutcome {
        streak: new_streak,
        interval_days: days,
        next_review: now + Duration::days(days as i64),
    }
}

pub fn apply_rating(mut card: Flashcard, rating: Rating, now: DateTime<Utc>) -> Flashcard {
    let outcome = calculate_next_review(card.streak, rating, now);
    card.streak = outcome.streak;
    card.last_reviewed = Some(now);
    card.next_review = Some(outcome.next_review);
    card.updated_at = now;
    card
}
