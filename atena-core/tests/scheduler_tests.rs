use atena_core::{apply_rating, calculate_next_review, Difficulty, Flashcard, Rating};
use chrono::{Duration, TimeZone, Utc};

#[test]
fn perfect_from_new() {
    let now = Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 0).unwrap();
    let out = calculate_next_review(0, Rating::Perfect, now);

    // streak 0 -> 1, base 2 days, x1.5 = 3
    assert_eq!(out.streak, 1);
    assert_eq!(out.interval_days, 3);
    assert_eq!(out.next_review, now + Duration::days(3));
}

#[test]
fn failed_review_comes_back_tomorrow() {
    let now = Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 0).unwrap();
    let out = calculate_next_review(4, Rating::Again, now);

    // streak drops to 3 (base would be 7 days) but the override wins
    assert_eq!(out.streak, 3);
    assert_eq!(out.interval_days, 1);
    assert_eq!(out.next_review, now + Duration::days(1));
}

#[test]
fn good_keeps_streak_and_shrinks_interval() {
    let now = Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 0).unwrap();
    let out = calculate_next_review(2, Rating::Good, now);

    // streak unchanged, base 4 days, floor(4 * 0.7) = 2
    assert_eq!(out.streak, 2);
    assert_eq!(out.interval_days, 2);
    assert_eq!(out.next_review, now + Duration::days(2));
}

#[test]
fn good_on_new_card_stays_at_one_day() {
    let now = Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 0).unwrap();
    let out = calculate_next_review(0, Rating::Good, now);

    assert_eq!(out.streak, 0);
    assert_eq!(out.interval_days, 1);
}

#[test]
fn streak_never_goes_negative() {
    let now = Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 0).unwrap();
    let out = calculate_next_review(0, Rating::Hard, now);

    assert_eq!(out.streak, 0);
    assert_eq!(out.interval_days, 1);
}

#[test]
fn interval_table_for_acceptable_reviews() {
    let now = Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 0).unwrap();
    // rating 4 has no multiplier, so the base table shows through
    for (streak, days) in [(0u32, 2u32), (1, 4), (2, 7), (3, 14), (4, 30), (9, 30)] {
        let out = calculate_next_review(streak, Rating::Easy, now);
        assert_eq!(out.streak, streak + 1);
        assert_eq!(out.interval_days, days);
    }
}

#[test]
fn month_rolls_over_naturally() {
    let now = Utc.with_ymd_and_hms(2026, 1, 31, 12, 0, 0).unwrap();
    let out = calculate_next_review(1, Rating::Easy, now);

    assert_eq!(out.interval_days, 4);
    assert_eq!(out.next_review, Utc.with_ymd_and_hms(2026, 2, 4, 12, 0, 0).unwrap());
}

#[test]
fn always_at_least_one_day_out() {
    let now = Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 0).unwrap();
    for streak in 0..10u32 {
        for score in 1..=5u8 {
            let rating = Rating::from_score(score).unwrap();
            let out = calculate_next_review(streak, rating, now);
            assert!(out.interval_days >= 1, "streak={streak} score={score}");
            assert!(out.next_review >= now + Duration::days(1));
        }
    }
}

#[test]
fn apply_rating_updates_card_in_place() {
    let now = Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 0).unwrap();
    let mut card = Flashcard::new("hola", "hello", Difficulty::Medium);
    card.streak = 2;

    let card = apply_rating(card, Rating::Good, now);

    assert_eq!(card.streak, 2);
    assert_eq!(card.last_reviewed, Some(now));
    assert_eq!(card.next_review, Some(now + Duration::days(2)));
    assert_eq!(card.updated_at, now);
}
