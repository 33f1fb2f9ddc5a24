//! Display-order policy for scoped directory listings.
//!
//! SQL restricts rows to one municipality (or one dish's restaurants);
//! the ordering itself happens here so there is exactly one definition of
//! "top" across listing endpoints, widgets, and tests.
//!
//! Comparator keys, each breaking ties of the previous:
//! 1. `featured` — curated entities first
//! 2. `featured_rank` ascending, absent last
//! 3. `panel_rank` ascending, absent last (dish-only; signature before not)
//! 4. `average_rating` descending (unrated entities carry 0.0)
//! 5. `total_ratings` descending
//! 6. `popularity` descending
//! 7. `name` ascending — final deterministic tiebreak

use std::cmp::Ordering;

/// An entity that can be placed in a ranked listing.
///
/// `panel_rank`/`is_signature` default to "not applicable" so restaurant
/// types only implement the keys they carry.
pub trait Rankable {
    fn featured(&self) -> bool;
    fn featured_rank(&self) -> Option<i32>;
    fn average_rating(&self) -> f64;
    fn total_ratings(&self) -> i32;
    fn popularity(&self) -> i32;
    fn name(&self) -> &str;

    fn panel_rank(&self) -> Option<i32> {
        None
    }
    fn is_signature(&self) -> bool {
        false
    }
}

/// Ascending comparison where `None` sorts after every `Some` (rank
/// absent means "unranked", i.e. +infinity).
fn cmp_rank_slot(a: Option<i32>, b: Option<i32>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// The full multi-key comparator described in the module docs.
pub fn display_order<T: Rankable>(a: &T, b: &T) -> Ordering {
    b.featured()
        .cmp(&a.featured())
        .then_with(|| cmp_rank_slot(a.featured_rank(), b.featured_rank()))
        .then_with(|| cmp_rank_slot(a.panel_rank(), b.panel_rank()))
        .then_with(|| b.is_signature().cmp(&a.is_signature()))
        .then_with(|| {
            b.average_rating()
                .partial_cmp(&a.average_rating())
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| b.total_ratings().cmp(&a.total_ratings()))
        .then_with(|| b.popularity().cmp(&a.popularity()))
        .then_with(|| a.name().cmp(b.name()))
}

/// Sort a scoped collection into display order and keep the first
/// `limit` entries.
///
/// The sort is stable, so two calls with identical input always produce
/// identical output.
pub fn rank_top<T: Rankable>(mut items: Vec<T>, limit: usize) -> Vec<T> {
    items.sort_by(display_order);
    items.truncate(limit);
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Entry {
        name: &'static str,
        featured: bool,
        featured_rank: Option<i32>,
        panel_rank: Option<i32>,
        is_signature: bool,
        average_rating: f64,
        total_ratings: i32,
        popularity: i32,
    }

    impl Entry {
        fn named(name: &'static str) -> Self {
            Entry {
                name,
                featured: false,
                featured_rank: None,
                panel_rank: None,
                is_signature: false,
                average_rating: 0.0,
                total_ratings: 0,
                popularity: 0,
            }
        }
    }

    impl Rankable for Entry {
        fn featured(&self) -> bool {
            self.featured
        }
        fn featured_rank(&self) -> Option<i32> {
            self.featured_rank
        }
        fn average_rating(&self) -> f64 {
            self.average_rating
        }
        fn total_ratings(&self) -> i32 {
            self.total_ratings
        }
        fn popularity(&self) -> i32 {
            self.popularity
        }
        fn name(&self) -> &str {
            self.name
        }
        fn panel_rank(&self) -> Option<i32> {
            self.panel_rank
        }
        fn is_signature(&self) -> bool {
            self.is_signature
        }
    }

    fn names(entries: &[Entry]) -> Vec<&'static str> {
        entries.iter().map(|e| e.name).collect()
    }

    #[test]
    fn featured_beats_higher_rating() {
        let d1 = Entry {
            featured: true,
            average_rating: 4.0,
            ..Entry::named("adobo")
        };
        let d2 = Entry {
            average_rating: 4.9,
            ..Entry::named("sisig")
        };

        let ranked = rank_top(vec![d2, d1], 5);
        assert_eq!(names(&ranked), ["adobo", "sisig"]);
    }

    #[test]
    fn featured_rank_orders_featured_entities() {
        let second = Entry {
            featured: true,
            featured_rank: Some(2),
            ..Entry::named("bulalo")
        };
        let first = Entry {
            featured: true,
            featured_rank: Some(1),
            ..Entry::named("kare-kare")
        };
        let unranked = Entry {
            featured: true,
            average_rating: 5.0,
            ..Entry::named("laing")
        };

        let ranked = rank_top(vec![unranked, second, first], 5);
        // Explicit ranks first, rank-less featured entity last of the three.
        assert_eq!(names(&ranked), ["kare-kare", "bulalo", "laing"]);
    }

    #[test]
    fn panel_rank_orders_signature_dishes_before_rating() {
        let ranked_dish = Entry {
            panel_rank: Some(1),
            is_signature: true,
            average_rating: 3.0,
            ..Entry::named("pancit")
        };
        let popular_dish = Entry {
            average_rating: 4.8,
            total_ratings: 120,
            ..Entry::named("lechon")
        };

        let ranked = rank_top(vec![popular_dish, ranked_dish], 5);
        assert_eq!(names(&ranked), ["pancit", "lechon"]);
    }

    #[test]
    fn rating_then_volume_then_popularity() {
        let a = Entry {
            average_rating: 4.5,
            total_ratings: 10,
            popularity: 3,
            ..Entry::named("a")
        };
        let b = Entry {
            average_rating: 4.5,
            total_ratings: 10,
            popularity: 9,
            ..Entry::named("b")
        };
        let c = Entry {
            average_rating: 4.5,
            total_ratings: 25,
            ..Entry::named("c")
        };
        let d = Entry {
            average_rating: 4.7,
            ..Entry::named("d")
        };

        let ranked = rank_top(vec![a, b, c, d], 5);
        assert_eq!(names(&ranked), ["d", "c", "b", "a"]);
    }

    #[test]
    fn name_is_final_tiebreak() {
        let z = Entry::named("zucchini fritters");
        let a = Entry::named("arroz caldo");

        let ranked = rank_top(vec![z.clone(), a.clone()], 5);
        assert_eq!(names(&ranked), ["arroz caldo", "zucchini fritters"]);

        // Swapping only the names of otherwise-tied entries swaps only them.
        let ranked = rank_top(vec![a, z], 5);
        assert_eq!(names(&ranked), ["arroz caldo", "zucchini fritters"]);
    }

    #[test]
    fn ordering_is_deterministic_across_calls() {
        let entries = vec![
            Entry {
                featured: true,
                ..Entry::named("m")
            },
            Entry {
                average_rating: 4.2,
                ..Entry::named("k")
            },
            Entry {
                popularity: 50,
                ..Entry::named("p")
            },
            Entry::named("q"),
        ];

        let first = rank_top(entries.clone(), 10);
        let second = rank_top(entries, 10);
        assert_eq!(first, second);
    }

    #[test]
    fn limit_truncates_after_ordering() {
        let entries = vec![
            Entry {
                average_rating: 3.0,
                ..Entry::named("low")
            },
            Entry {
                average_rating: 5.0,
                ..Entry::named("high")
            },
            Entry {
                average_rating: 4.0,
                ..Entry::named("mid")
            },
        ];

        let ranked = rank_top(entries, 2);
        assert_eq!(names(&ranked), ["high", "mid"]);
    }

    #[test]
    fn unrated_entities_sort_below_rated() {
        let unrated = Entry::named("new dish");
        let rated = Entry {
            average_rating: 1.0,
            total_ratings: 1,
            ..Entry::named("old dish")
        };

        let ranked = rank_top(vec![unrated, rated], 5);
        assert_eq!(names(&ranked), ["old dish", "new dish"]);
    }
}
