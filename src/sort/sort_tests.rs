#[cfg(test)]
mod tests {
    use chrono::{
        DateTime,
        TimeZone,
        Utc,
    };

    use crate::{
        item::{
            factory::parse_items,
            Item,
            ItemKind,
            Performance,
            SrsLevel,
            Stats,
        },
        sort::{
            ItemOrder,
            SortDirection,
            SortField,
        },
    };

    fn date(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(seconds, 0).unwrap()
    }

    fn unstudied(name: &str) -> Item {
        Item::new(ItemKind::Kanji, name, name, 1)
    }

    fn studied(name: &str, meaning: Performance, reading: Performance) -> Item {
        let mut item = unstudied(name);
        let mut stats = Stats::new(SrsLevel::Apprentice);
        stats.meaning = Some(meaning);
        stats.reading = Some(reading);
        item.set_stats(stats);
        item
    }

    fn with_stats(name: &str, edit: impl FnOnce(&mut Stats)) -> Item {
        let mut item = unstudied(name);
        let mut stats = Stats::new(SrsLevel::Apprentice);
        edit(&mut stats);
        item.set_stats(stats);
        item
    }

    /// Item with the given mastery percentage and nothing else to tell it apart.
    fn with_percentage(name: &str, percentage: i32) -> Item {
        let mut item = with_stats(name, |_| {});
        item.set_percentage(Some(percentage));
        item
    }

    fn names(items: &[&Item]) -> Vec<String> {
        items.iter().map(|item| item.character.clone()).collect()
    }

    fn ranked(order: &ItemOrder, items: &[Item]) -> Vec<String> {
        names(&order.sorted(items))
    }

    #[test]
    fn test_default_wiring() {
        use SortDirection::*;
        use SortField::*;

        assert_eq!(
            ItemOrder::new(Toxicity).chain(),
            vec![
                (Toxicity, Descending),
                (MaxStreak, Descending),
                (ErrorRate, Descending),
                (Recency, Descending)
            ]
        );
        assert_eq!(ItemOrder::new(Recency).chain(), vec![(Recency, Descending)]);
        assert_eq!(ItemOrder::new(Availability).chain(), vec![(Availability, Descending)]);
        assert_eq!(
            ItemOrder::new(Level).chain(),
            vec![(Level, Descending), (Stage, Descending), (Availability, Descending)]
        );
        assert_eq!(
            ItemOrder::new(Kind).chain(),
            vec![
                (Kind, Ascending),
                (Level, Descending),
                (Stage, Descending),
                (Availability, Descending)
            ]
        );
        assert_eq!(
            ItemOrder::ascending(ErrorRate).chain(),
            vec![(ErrorRate, Ascending), (Recency, Ascending)]
        );
    }

    #[test]
    fn test_every_default_chain_terminates() {
        for field in SortField::ALL {
            let chain = ItemOrder::new(field).chain();
            assert!(chain.len() <= SortField::ALL.len(), "{:?} chain too long", field);
            let (last, _) = chain[chain.len() - 1];
            assert!(
                matches!(last, SortField::Recency | SortField::Availability),
                "{:?} chain ends at {:?}",
                field,
                last
            );
        }
    }

    #[test]
    fn test_explicit_secondary_and_terminal() {
        let order = ItemOrder::new(SortField::Level).then(ItemOrder::ascending(SortField::Kind));
        assert_eq!(order.secondary().unwrap().field, SortField::Kind);
        assert_eq!(order.chain().len(), 5);

        let terminal = ItemOrder::new(SortField::Toxicity).terminal();
        assert_eq!(terminal.chain(), vec![(SortField::Toxicity, SortDirection::Descending)]);
    }

    #[test]
    fn test_toxicity_ties_fall_through_to_max_streak() {
        let a = studied("A", Performance::new(0, 3, 1, 0), Performance::new(0, 2, 1, 0));
        let b = studied("B", Performance::new(0, 4, 5, 0), Performance::new(0, 1, 4, 0));
        let c = studied("C", Performance::new(0, 1, 0, 0), Performance::default());

        let items = vec![a, b, c];
        assert_eq!(ranked(&ItemOrder::new(SortField::Toxicity), &items), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_toxicity_ignores_burned_and_unstudied() {
        let burned = with_stats("burned", |s| {
            s.burned = true;
            s.meaning = Some(Performance::new(0, 50, 0, 0));
        });
        let fresh = unstudied("fresh");
        let clean = studied("clean", Performance::new(5, 0, 5, 5), Performance::default());
        let bad = studied("bad", Performance::new(1, 6, 1, 0), Performance::default());

        let items = vec![burned, fresh, clean, bad];
        let order = ItemOrder::new(SortField::Toxicity).terminal();
        assert_eq!(ranked(&order, &items), vec!["bad", "clean", "burned", "fresh"]);
    }

    #[test]
    fn test_huge_counters_rank_without_overflow() {
        let records = vec![
            serde_json::json!({
                "type": "kanji", "character": "huge", "meaning": "huge", "level": 1,
                "user_specific": {
                    "srs": "guru",
                    "meaning_incorrect": 4_294_967_295u32,
                    "meaning_max_streak": 4_294_967_295u32,
                    "reading_incorrect": 1,
                    "reading_max_streak": 1
                }
            }),
            serde_json::json!({
                "type": "kanji", "character": "normal", "meaning": "normal", "level": 1,
                "user_specific": { "srs": "guru", "meaning_incorrect": 3, "meaning_max_streak": 2 }
            }),
        ];
        let items = parse_items(&records).unwrap();

        assert_eq!(ranked(&ItemOrder::new(SortField::Toxicity), &items), vec!["huge", "normal"]);
        assert_eq!(ranked(&ItemOrder::ascending(SortField::MaxStreak), &items), vec![
            "normal", "huge"
        ]);
    }

    #[test]
    fn test_error_rate_pushes_unknown_last_both_ways() {
        let fresh = unstudied("fresh");
        let half = with_percentage("half", 50);

        for direction in [SortDirection::Descending, SortDirection::Ascending] {
            let order = ItemOrder::with_direction(SortField::ErrorRate, direction);
            assert_eq!(ranked(&order, &[fresh.clone(), half.clone()]), vec!["half", "fresh"]);
            assert_eq!(ranked(&order, &[half.clone(), fresh.clone()]), vec!["half", "fresh"]);
        }
    }

    #[test]
    fn test_error_rate_directions() {
        let weak = with_percentage("weak", 20);
        let strong = with_percentage("strong", 90);
        let burned = with_stats("burned", |s| s.burned = true);
        let items = vec![strong, burned, weak];

        assert_eq!(
            ranked(&ItemOrder::new(SortField::ErrorRate), &items),
            vec!["weak", "strong", "burned"]
        );
        assert_eq!(
            ranked(&ItemOrder::ascending(SortField::ErrorRate), &items),
            vec!["strong", "weak", "burned"]
        );
    }

    #[test]
    fn test_max_streak_unstudied_key() {
        let fresh = unstudied("fresh");
        let zero = with_stats("zero", |_| {});
        let streaky = studied("streaky", Performance::new(9, 0, 9, 9), Performance::default());

        // descending: unstudied counts as 0 and ties with a studied zero
        let desc = ItemOrder::new(SortField::MaxStreak).terminal();
        assert_eq!(ranked(&desc, &[fresh.clone(), zero.clone(), streaky.clone()]), vec![
            "streaky", "fresh", "zero"
        ]);

        // ascending: unstudied counts as -1 and goes first
        let asc = ItemOrder::ascending(SortField::MaxStreak).terminal();
        assert_eq!(ranked(&asc, &[zero, streaky, fresh]), vec!["fresh", "zero", "streaky"]);
    }

    #[test]
    fn test_recency_dateless_last() {
        let old = with_stats("old", |s| s.unlocked_date = Some(date(1_000)));
        let new = with_stats("new", |s| s.unlocked_date = Some(date(5_000)));
        let mut early = unstudied("early");
        early.set_unlocked_date(Some(date(3_000)));
        let none_a = unstudied("none_a");
        let none_b = unstudied("none_b");

        let items = vec![none_a, old, none_b, new, early];
        assert_eq!(ranked(&ItemOrder::new(SortField::Recency), &items), vec![
            "new", "early", "old", "none_a", "none_b"
        ]);
        assert_eq!(ranked(&ItemOrder::ascending(SortField::Recency), &items), vec![
            "old", "early", "new", "none_a", "none_b"
        ]);
    }

    #[test]
    fn test_availability_burned_always_last() {
        let soon = with_stats("soon", |s| s.available_date = Some(date(1_000)));
        let later = with_stats("later", |s| s.available_date = Some(date(9_000)));
        let undated = with_stats("undated", |_| {});
        let burned = with_stats("burned", |s| {
            s.burned = true;
            s.available_date = Some(date(10));
        });
        let fresh = unstudied("fresh");

        let items = vec![burned, later, fresh, soon, undated];

        // default: most overdue first
        assert_eq!(ranked(&ItemOrder::new(SortField::Availability), &items), vec![
            "soon", "later", "fresh", "undated", "burned"
        ]);
        assert_eq!(ranked(&ItemOrder::ascending(SortField::Availability), &items), vec![
            "later", "soon", "fresh", "undated", "burned"
        ]);
    }

    #[test]
    fn test_availability_never_ranks_burned_first() {
        let mut items = Vec::new();
        for i in 0..12 {
            items.push(with_stats(&format!("item{}", i), |s| {
                s.burned = i % 3 == 0;
                s.available_date = if i % 4 == 0 { None } else { Some(date(i * 100)) };
            }));
        }
        items.push(unstudied("fresh"));

        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let order = ItemOrder::with_direction(SortField::Availability, direction);
            let sorted = order.sorted(&items);
            let first_burned = sorted.iter().position(|item| item.is_burned()).unwrap();
            assert!(sorted[first_burned..].iter().all(|item| item.is_burned()));
        }
    }

    #[test]
    fn test_stage_unstudied_last() {
        let guru = with_stats("guru", |s| s.srs = SrsLevel::Guru);
        let master = with_stats("master", |s| s.srs = SrsLevel::Master);
        let fresh = unstudied("fresh");
        let items = vec![fresh, guru, master];

        let desc = ItemOrder::new(SortField::Stage).terminal();
        assert_eq!(ranked(&desc, &items), vec!["master", "guru", "fresh"]);
        let asc = ItemOrder::ascending(SortField::Stage).terminal();
        assert_eq!(ranked(&asc, &items), vec!["guru", "master", "fresh"]);
    }

    #[test]
    fn test_level_chain() {
        let mut low = with_stats("low", |s| s.srs = SrsLevel::Master);
        low.level = 1;
        let mut high_guru = with_stats("high_guru", |s| s.srs = SrsLevel::Guru);
        high_guru.level = 5;
        let mut high_master_due = with_stats("high_master_due", |s| {
            s.srs = SrsLevel::Master;
            s.available_date = Some(date(100));
        });
        high_master_due.level = 5;
        let mut high_master_later = with_stats("high_master_later", |s| {
            s.srs = SrsLevel::Master;
            s.available_date = Some(date(900));
        });
        high_master_later.level = 5;

        let items = vec![low, high_guru, high_master_later, high_master_due];
        assert_eq!(ranked(&ItemOrder::new(SortField::Level), &items), vec![
            "high_master_due",
            "high_master_later",
            "high_guru",
            "low"
        ]);
    }

    #[test]
    fn test_kind_groups_then_level() {
        let vocab = Item::new(ItemKind::Vocabulary, "大人", "adult", 3);
        let radical = Item::new(ItemKind::Radical, "ト", "toe", 1);
        let kanji_low = Item::new(ItemKind::Kanji, "人", "person", 1);
        let kanji_high = Item::new(ItemKind::Kanji, "大", "big", 2);

        let items = vec![vocab, kanji_low, radical, kanji_high];
        assert_eq!(ranked(&ItemOrder::new(SortField::Kind), &items), vec!["ト", "大", "人", "大人"]);
        assert_eq!(ranked(&ItemOrder::descending(SortField::Kind), &items), vec![
            "大人", "大", "人", "ト"
        ]);
    }

    #[test]
    fn test_stable_for_equal_keys() {
        // same key along the whole toxicity chain, tagged by input position
        let items: Vec<Item> = (0..200)
            .map(|i| {
                let meaning = Performance::new(4, (i % 3) as u32, 2, 0);
                studied(&format!("{:03}", i), meaning, Performance::default())
            })
            .collect();

        let order = ItemOrder::new(SortField::Toxicity);
        let sorted = order.sorted(&items);

        for window in sorted.windows(2) {
            if order.compare(window[0], window[1]).is_eq() {
                assert!(window[0].character < window[1].character, "input order not kept");
            }
        }
        assert_eq!(sorted.len(), items.len());
    }

    #[test]
    fn test_sort_in_place_owned_items() {
        let mut items = vec![with_percentage("b", 80), unstudied("c"), with_percentage("a", 10)];
        ItemOrder::new(SortField::ErrorRate).sort(&mut items);
        let order: Vec<&str> = items.iter().map(|item| item.character.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_display_and_serde() {
        let order = ItemOrder::new(SortField::Level);
        assert_eq!(order.to_string(), "Level ↓ > Stage ↓ > Availability ↓");

        let json = serde_json::to_string(&order).unwrap();
        let back: ItemOrder = serde_json::from_str(&json).unwrap();
        assert_eq!(back, order);
    }

    #[test]
    fn test_field_and_direction_parsing() {
        assert_eq!("error-rate".parse::<SortField>().unwrap(), SortField::ErrorRate);
        assert_eq!("Toxicity".parse::<SortField>().unwrap(), SortField::Toxicity);
        assert!("colour".parse::<SortField>().is_err());
        assert_eq!("asc".parse::<SortDirection>().unwrap(), SortDirection::Ascending);
        assert_eq!("Descending".parse::<SortDirection>().unwrap(), SortDirection::Descending);
    }
}
