//! Query engine tests
//!
//! Covers the distance function, every filter stage, the sort policy and
//! pagination, plus the two worked scenarios from the browse page.

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use crate::error::MalnadError;
    use crate::models::{Category, Coordinate, GuestType, Listing, ListingStatus};
    use crate::query::predicates::{
        matches_amenities, matches_category, matches_distance, matches_guest, matches_price,
        matches_text, passes_filter,
    };
    use crate::query::{execute, haversine_km, FilterParams, Selection, SortMode};

    fn listing(
        id: &str,
        price: u64,
        category: Category,
        guest: GuestType,
        amenities: &[&str],
        coords: (f64, f64),
    ) -> Listing {
        Listing {
            id: id.to_string(),
            title: format!("Listing {id}"),
            location: "Puttur".to_string(),
            category,
            price_label: format!("₹{price}"),
            price_value: price,
            rating: 0.0,
            amenities: amenities.iter().map(|a| a.to_string()).collect(),
            allowed_guest: guest,
            coordinates: Some(Coordinate::new(coords.0, coords.1)),
            status: ListingStatus::Approved,
            description: String::new(),
            main_image: "https://img.example/1.jpg".to_string(),
            owner_id: None,
            submitted_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn scenario_listings() -> Vec<Listing> {
        vec![
            listing("a", 5000, Category::Pg, GuestType::Any, &["Wi-Fi", "Food"], (12.77, 75.20)),
            listing("b", 9000, Category::Villa, GuestType::Family, &["Wi-Fi"], (12.80, 75.25)),
        ]
    }

    fn ids(page: &crate::query::QueryPage) -> Vec<&str> {
        page.page.iter().map(|item| item.listing.id.as_str()).collect()
    }

    // ============================================================
    // DISTANCE
    // ============================================================

    #[test]
    fn test_haversine_identity() {
        let p = Coordinate::new(12.7685, 75.2023);
        assert!(haversine_km(&p, &p).abs() < 1e-9);
    }

    #[test]
    fn test_haversine_symmetry() {
        let points = [
            Coordinate::new(12.77, 75.20),
            Coordinate::new(12.80, 75.25),
            Coordinate::new(-33.86, 151.21),
            Coordinate::new(51.50, -0.12),
            Coordinate::new(89.9, 179.9),
        ];
        for a in &points {
            for b in &points {
                assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_haversine_one_degree_of_latitude() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(1.0, 0.0);
        let expected = 6371.0 * std::f64::consts::PI / 180.0;
        assert!((haversine_km(&a, &b) - expected).abs() < 1e-6);
    }

    // ============================================================
    // PREDICATES
    // ============================================================

    #[test]
    fn test_text_matches_title_or_location_ignoring_case() {
        let mut l = scenario_listings().remove(0);
        l.title = "Sunny PG near College".to_string();
        l.location = "Darbe, Puttur".to_string();

        assert!(matches_text(&l, ""));
        assert!(matches_text(&l, "sunny"));
        assert!(matches_text(&l, "DARBE"));
        assert!(!matches_text(&l, "Bolwar"));
    }

    #[test]
    fn test_price_ceiling_is_inclusive() {
        let l = scenario_listings().remove(0);
        assert!(matches_price(&l, 5000));
        assert!(!matches_price(&l, 4999));
    }

    #[test]
    fn test_category_selection() {
        let l = scenario_listings().remove(0);
        assert!(matches_category(&l, Selection::All));
        assert!(matches_category(&l, Selection::Only(Category::Pg)));
        assert!(!matches_category(&l, Selection::Only(Category::Hostel)));
    }

    #[test]
    fn test_guest_is_wildcard_or_exact() {
        let family = listing("f", 1, Category::Villa, GuestType::Family, &[], (0.0, 0.0));
        let any = listing("x", 1, Category::Villa, GuestType::Any, &[], (0.0, 0.0));

        assert!(matches_guest(&family, Selection::All));
        assert!(matches_guest(&family, Selection::Only(GuestType::Family)));
        assert!(!matches_guest(&family, Selection::Only(GuestType::Male)));
        assert!(matches_guest(&any, Selection::Only(GuestType::Female)));
    }

    #[test]
    fn test_amenities_use_substring_match() {
        let l = listing("c", 1, Category::Pg, GuestType::Any, &["AC / Cooling", "Free Wi-Fi"], (0.0, 0.0));

        assert!(matches_amenities::<&str>(&l, &[]));
        assert!(matches_amenities(&l, &["ac"]));
        assert!(matches_amenities(&l, &["AC", "wi-fi"]));
        assert!(!matches_amenities(&l, &["AC", "Gym"]));
    }

    #[test]
    fn test_distance_without_origin_always_matches() {
        let mut l = scenario_listings().remove(0);
        l.coordinates = None;
        assert!(matches_distance(&l, None, 1.0).unwrap());
    }

    #[test]
    fn test_distance_requires_coordinates_when_origin_set() {
        let mut l = scenario_listings().remove(0);
        l.coordinates = None;
        let origin = Coordinate::new(12.77, 75.20);

        let err = matches_distance(&l, Some(&origin), 10.0).unwrap_err();
        assert!(matches!(err, MalnadError::InvalidArgument(_)));
    }

    #[test]
    fn test_passes_filter_is_conjunction() {
        let l = scenario_listings().remove(0);
        let base = FilterParams::default();
        assert!(passes_filter(&l, &base).unwrap());

        assert!(!passes_filter(&l, &base.clone().with_text("nowhere")).unwrap());
        assert!(!passes_filter(&l, &base.clone().with_max_price(100)).unwrap());
        assert!(!passes_filter(&l, &base.clone().with_category(Category::Villa)).unwrap());
        assert!(!passes_filter(&l, &base.clone().with_amenities(["Gym"])).unwrap());
        assert!(!passes_filter(&l, &base.clone().with_origin(Coordinate::new(13.5, 75.2), 10.0)).unwrap());
    }

    // ============================================================
    // PIPELINE
    // ============================================================

    #[test]
    fn test_scenario_price_ceiling_excludes_villa() {
        let params = FilterParams::default()
            .with_max_price(6000)
            .with_amenities(["Wi-Fi"])
            .with_sort(SortMode::PriceAsc)
            .with_page(1, 6);

        let result = execute(&scenario_listings(), &params).unwrap();

        assert_eq!(ids(&result), vec!["a"]);
        assert_eq!(result.total_count, 1);
        assert_eq!(result.total_pages, 1);
        assert_eq!(result.page[0].distance_km, None);
    }

    #[test]
    fn test_scenario_near_me_sorts_by_distance() {
        let params = FilterParams::default()
            .with_max_price(25_000)
            .with_origin(Coordinate::new(12.77, 75.20), 10.0);

        let result = execute(&scenario_listings(), &params).unwrap();

        assert_eq!(ids(&result), vec!["a", "b"]);
        let da = result.page[0].distance_km.unwrap();
        let db = result.page[1].distance_km.unwrap();
        assert!(da.abs() < 1e-9);
        assert!(db > 5.5 && db < 7.0, "unexpected distance {db}");
    }

    #[test]
    fn test_near_me_radius_excludes_far_listings() {
        let params = FilterParams::default().with_origin(Coordinate::new(12.77, 75.20), 1.0);
        let result = execute(&scenario_listings(), &params).unwrap();
        assert_eq!(ids(&result), vec!["a"]);
    }

    #[test]
    fn test_recommended_without_origin_sorts_by_rating() {
        let mut low = listing("low", 100, Category::Pg, GuestType::Any, &[], (0.0, 0.0));
        low.rating = 3.5;
        let mut high = listing("high", 100, Category::Pg, GuestType::Any, &[], (0.0, 0.0));
        high.rating = 4.8;
        let unrated = listing("new", 100, Category::Pg, GuestType::Any, &[], (0.0, 0.0));

        let result = execute(&[unrated, low, high], &FilterParams::default()).unwrap();
        assert_eq!(ids(&result), vec!["high", "low", "new"]);
    }

    #[test]
    fn test_explicit_price_sort_wins_over_distance() {
        let origin = Coordinate::new(12.77, 75.20);
        let near_expensive = listing("near", 9000, Category::Pg, GuestType::Any, &[], (12.77, 75.20));
        let far_cheap = listing("far", 3000, Category::Pg, GuestType::Any, &[], (12.80, 75.25));

        let params = FilterParams::default()
            .with_origin(origin, 10.0)
            .with_sort(SortMode::PriceAsc);
        let result = execute(&[near_expensive, far_cheap], &params).unwrap();

        assert_eq!(ids(&result), vec!["far", "near"]);
        assert!(result.page.iter().all(|item| item.distance_km.is_some()));
    }

    #[test]
    fn test_sorting_is_stable_for_every_mode() {
        let listings: Vec<Listing> = ["p", "q", "r", "s"]
            .iter()
            .map(|id| listing(id, 4000, Category::Pg, GuestType::Any, &[], (12.77, 75.20)))
            .collect();

        for sort in [SortMode::Recommended, SortMode::PriceAsc, SortMode::PriceDesc] {
            let result = execute(&listings, &FilterParams::default().with_sort(sort)).unwrap();
            assert_eq!(ids(&result), vec!["p", "q", "r", "s"], "{sort:?}");

            let near = FilterParams::default()
                .with_sort(sort)
                .with_origin(Coordinate::new(12.77, 75.20), 10.0);
            let result = execute(&listings, &near).unwrap();
            assert_eq!(ids(&result), vec!["p", "q", "r", "s"], "{sort:?} near");
        }
    }

    #[test]
    fn test_price_desc_orders_highest_first() {
        let listings = vec![
            listing("mid", 5000, Category::Pg, GuestType::Any, &[], (0.0, 0.0)),
            listing("top", 9000, Category::Pg, GuestType::Any, &[], (0.0, 0.0)),
            listing("low", 2000, Category::Pg, GuestType::Any, &[], (0.0, 0.0)),
        ];
        let result = execute(&listings, &FilterParams::default().with_sort(SortMode::PriceDesc)).unwrap();
        assert_eq!(ids(&result), vec!["top", "mid", "low"]);
    }

    #[test]
    fn test_pages_reconstruct_full_result() {
        let listings: Vec<Listing> = (0..14)
            .map(|i| listing(&format!("l{i}"), 1000 + i * 10, Category::Pg, GuestType::Any, &[], (0.0, 0.0)))
            .collect();

        for page_size in 1..=15 {
            let first = execute(&listings, &FilterParams::default().with_page(1, page_size)).unwrap();
            let mut collected = Vec::new();
            for page_number in 1..=first.total_pages {
                let params = FilterParams::default().with_page(page_number, page_size);
                let page = execute(&listings, &params).unwrap();
                collected.extend(page.page.into_iter().map(|item| item.listing.id));
            }

            let everything = execute(&listings, &FilterParams::default().with_page(1, 100)).unwrap();
            let expected: Vec<String> = everything.page.into_iter().map(|item| item.listing.id).collect();
            assert_eq!(collected, expected, "page size {page_size}");
            assert_eq!(first.total_pages, 14usize.div_ceil(page_size));
        }
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let params = FilterParams::default().with_page(5, 6);
        let result = execute(&scenario_listings(), &params).unwrap();
        assert!(result.page.is_empty());
        assert_eq!(result.total_count, 2);
        assert_eq!(result.total_pages, 1);
    }

    #[test]
    fn test_empty_input_has_zero_pages() {
        let result = execute(&[], &FilterParams::default()).unwrap();
        assert_eq!(result.total_count, 0);
        assert_eq!(result.total_pages, 0);
    }

    #[test]
    fn test_zero_page_size_is_invalid() {
        let err = execute(&scenario_listings(), &FilterParams::default().with_page(1, 0)).unwrap_err();
        assert!(matches!(err, MalnadError::InvalidArgument(_)));
    }

    #[test]
    fn test_zero_page_number_is_invalid() {
        let err = execute(&scenario_listings(), &FilterParams::default().with_page(0, 6)).unwrap_err();
        assert!(matches!(err, MalnadError::InvalidArgument(_)));
    }

    #[test]
    fn test_missing_coordinates_fail_only_with_origin() {
        let mut listings = scenario_listings();
        listings[1].coordinates = None;

        assert!(execute(&listings, &FilterParams::default()).is_ok());

        let near = FilterParams::default().with_origin(Coordinate::new(12.77, 75.20), 10.0);
        let err = execute(&listings, &near).unwrap_err();
        assert!(matches!(err, MalnadError::InvalidArgument(_)));
    }

    #[test]
    fn test_raising_price_ceiling_never_shrinks_result() {
        let listings = scenario_listings();
        for max_price in [0, 4999, 5000, 8000, 9000] {
            let capped = execute(&listings, &FilterParams::default().with_max_price(max_price)).unwrap();
            let open = execute(&listings, &FilterParams::default().with_max_price(u64::MAX)).unwrap();
            assert!(open.total_count >= capped.total_count);
        }
    }

    #[test]
    fn test_every_relaxation_never_shrinks_result() {
        let mut listings = vec![
            listing("a", 5000, Category::Pg, GuestType::Any, &["Wi-Fi", "Food"], (12.77, 75.20)),
            listing("b", 9000, Category::Villa, GuestType::Family, &["Wi-Fi"], (12.80, 75.25)),
            listing("c", 4000, Category::Hostel, GuestType::Male, &["Laundry"], (12.76, 75.21)),
            listing("d", 7000, Category::Pg, GuestType::Female, &["AC / Cooling", "Wi-Fi"], (13.10, 75.60)),
            listing("e", 3000, Category::Pg, GuestType::Male, &["Wi-Fi"], (12.78, 75.19)),
        ];
        listings[0].title = "Darbe Ladies PG".to_string();
        listings[4].location = "Darbe".to_string();

        let strict = FilterParams::default()
            .with_text("darbe")
            .with_max_price(6000)
            .with_category(Category::Pg)
            .with_guest_type(GuestType::Male)
            .with_amenities(["wi-fi"])
            .with_origin(Coordinate::new(12.77, 75.20), 5.0);
        let baseline = execute(&listings, &strict).unwrap().total_count;

        let relaxed = [
            ("text", FilterParams { text: String::new(), ..strict.clone() }),
            ("price", FilterParams { max_price: u64::MAX, ..strict.clone() }),
            ("category", FilterParams { category: Selection::All, ..strict.clone() }),
            ("guest", FilterParams { guest_type: Selection::All, ..strict.clone() }),
            ("amenities", FilterParams { amenities: Vec::new(), ..strict.clone() }),
            ("radius", FilterParams { max_distance_km: f64::INFINITY, ..strict.clone() }),
            ("origin", FilterParams { origin: None, ..strict.clone() }),
        ];

        for (name, params) in relaxed {
            let count = execute(&listings, &params).unwrap().total_count;
            assert!(count >= baseline, "relaxing {name} shrank {baseline} to {count}");
        }
    }

    #[test]
    fn test_antipodal_distance_is_finite() {
        let a = Coordinate::new(-43.8274, -9.0);
        let b = Coordinate::new(43.8274, 171.0);
        let d = haversine_km(&a, &b);
        assert!(d.is_finite());
        assert!((d - 6371.0 * std::f64::consts::PI).abs() < 1.0, "got {d}");
    }

    #[test]
    fn test_antipodal_listing_respects_radius_in_both_paths() {
        let origin = Coordinate::new(-43.8274, -9.0);
        let far = listing("far", 1000, Category::Pg, GuestType::Any, &[], (43.8274, 171.0));

        let near = FilterParams::default().with_origin(origin, 10.0);
        let result = execute(std::slice::from_ref(&far), &near).unwrap();
        assert_eq!(result.total_count, 0);
        assert!(!passes_filter(&far, &near).unwrap());

        let worldwide = FilterParams::default().with_origin(origin, 30_000.0);
        let result = execute(std::slice::from_ref(&far), &worldwide).unwrap();
        assert_eq!(result.total_count, 1);
        assert!(passes_filter(&far, &worldwide).unwrap());
        assert!(result.page[0].distance_km.unwrap().is_finite());
    }

    #[test]
    fn test_execute_is_idempotent_and_leaves_input_untouched() {
        let listings = scenario_listings();
        let snapshot = listings.clone();
        let params = FilterParams::default().with_origin(Coordinate::new(12.78, 75.22), 10.0);

        let first = execute(&listings, &params).unwrap();
        let second = execute(&listings, &params).unwrap();

        assert_eq!(first, second);
        assert_eq!(listings, snapshot);
    }

    #[test]
    fn test_selection_and_sort_parse_from_cli_strings() {
        assert_eq!("All".parse::<Selection<Category>>().unwrap(), Selection::All);
        assert_eq!("pg".parse::<Selection<Category>>().unwrap(), Selection::Only(Category::Pg));
        assert_eq!("price-desc".parse::<SortMode>().unwrap(), SortMode::PriceDesc);
        assert!("cheapest".parse::<SortMode>().is_err());
    }
}
