// Integration tests for MenuRec
use menurec::prelude::*;
use menurec::{ArtifactStore, BundleManager};
use std::fs;
use std::path::Path;

/// Writes artifacts the way an upstream export produces them
fn write_models(dir: &Path) {
    fs::write(
        dir.join("item_index.json"),
        r#"["Pizza", "Pasta", "Burger", "Fries", "Brownie", "Lemonade"]"#,
    ).unwrap();
    fs::write(
        dir.join("similarity_scores.json"),
        r#"[
            [1.0, 0.9, 0.2, 0.1, 0.05, 0.3],
            [0.9, 1.0, 0.3, 0.2, 0.1, 0.25],
            [0.2, 0.3, 1.0, 0.8, 0.4, 0.6],
            [0.1, 0.2, 0.8, 1.0, 0.35, 0.6],
            [0.05, 0.1, 0.4, 0.35, 1.0, 0.2],
            [0.3, 0.25, 0.6, 0.6, 0.2, 1.0]
        ]"#,
    ).unwrap();
    // Lemonade has no menu row; Pasta appears twice
    fs::write(
        dir.join("menu.json"),
        r#"[
            {"ItemName": "Pizza", "Description": "Wood-fired margherita", "Price": 250, "Category": "Dinner"},
            {"ItemName": "Pasta", "Price": 220, "Category": "Dinner"},
            {"ItemName": "Pasta", "Description": "Duplicate row", "Price": 999, "Category": "Lunch"},
            {"ItemName": "Burger", "Description": "Double patty", "Price": 180, "Category": "Lunch"},
            {"ItemName": "Fries", "Description": "Salted", "Category": "Appetizers"},
            {"ItemName": "Brownie", "Description": "Fudge", "Price": 120}
        ]"#,
    ).unwrap();
    fs::write(
        dir.join("popular.json"),
        r#"[
            {"ItemName": "Burger", "Price": 180, "Category": "Lunch", "num_ratings": 40, "avg_ratings": 5.8},
            {"ItemName": "Brownie", "Price": 120, "Category": "Desserts", "num_ratings": 22, "avg_ratings": 6.4},
            {"ItemName": "Fries", "Price": 90, "Category": "Appetizers", "num_ratings": 61, "avg_ratings": 4.9},
            {"ItemName": "Pizza", "Price": 250, "Category": "Dinner", "num_ratings": 75, "avg_ratings": 5.8}
        ]"#,
    ).unwrap();
}

fn load() -> (tempfile::TempDir, ModelManager) {
    let dir = tempfile::tempdir().unwrap();
    write_models(dir.path());
    let models = ModelManager::from_dir(dir.path(), RecommenderConfig::default()).unwrap();
    (dir, models)
}

fn names(results: &[Recommendation]) -> Vec<&str> {
    results.iter().map(|r| r.item_name.as_str()).collect()
}

#[test]
fn test_neighbour_without_menu_row_is_dropped() {
    let (_dir, models) = load();
    // ranks 2..3 are Pasta (0.9) and Lemonade (0.3); Lemonade has no menu row
    let results = models.catalog().recommend("Pizza", Some(2)).unwrap();
    assert_eq!(names(&results), vec!["Pasta"]);
    assert_eq!(results[0].similarity_score, 0.9);
}

#[test]
fn test_default_count_is_five() {
    let (_dir, models) = load();
    let results = models.catalog().recommend("Burger", None).unwrap();
    // Fries 0.8, Lemonade 0.6 (no metadata), Brownie 0.4, Pasta 0.3, Pizza 0.2
    assert_eq!(names(&results), vec!["Fries", "Brownie", "Pasta", "Pizza"]);
    assert!(results.windows(2).all(|w| w[0].similarity_score >= w[1].similarity_score));
}

#[test]
fn test_unknown_item() {
    let (_dir, models) = load();
    let catalog = models.catalog();
    assert!(matches!(catalog.recommend("Sushi", None), Err(Error::ItemNotFound(_))));
    assert!(catalog.recommend_or_empty("Sushi", None).is_empty());
}

#[test]
fn test_metadata_defaults_and_first_row() {
    let (_dir, models) = load();
    let catalog = models.catalog();

    let results = catalog.recommend("Pizza", Some(1)).unwrap();
    let pasta = &results[0];
    assert_eq!(pasta.item_name, "Pasta");
    assert_eq!(pasta.description, "N/A");
    assert_eq!(pasta.price, 220.0);
    assert_eq!(pasta.category, "Dinner");

    let results = catalog.recommend("Brownie", Some(1)).unwrap();
    assert_eq!(results[0].item_name, "Burger");
    let results = catalog.recommend("Burger", Some(3)).unwrap();
    let fries = &results[0];
    assert_eq!(fries.price, 0.0);
    let brownie = results.iter().find(|r| r.item_name == "Brownie").unwrap();
    assert_eq!(brownie.category, "N/A");
}

#[test]
fn test_free_function_matches_catalog() {
    let (_dir, models) = load();
    let catalog = models.catalog();
    let direct = recommend("Fries", catalog.index(), catalog.matrix(), catalog.menu(), 3).unwrap();
    assert_eq!(direct, catalog.recommend("Fries", Some(3)).unwrap());
}

#[test]
fn test_popular_ranking() {
    let (_dir, models) = load();
    let catalog = models.catalog();

    let top = catalog.top_popular(Some(3), None);
    let top_names: Vec<&str> = top.iter().map(|p| p.item_name.as_str()).collect();
    // Burger and Pizza tie at 5.8; table order wins
    assert_eq!(top_names, vec!["Brownie", "Burger", "Pizza"]);

    let lunch = catalog.top_popular(None, Some("Lunch"));
    assert_eq!(lunch.len(), 1);

    let groups = catalog.browse_by_category();
    let categories: Vec<&str> = groups.iter().map(|g| g.category.as_str()).collect();
    assert_eq!(categories, vec!["Appetizers", "Lunch", "Dinner", "Desserts"]);
}

#[test]
fn test_concurrent_lookups_agree() {
    let (_dir, models) = load();
    let catalog = models.catalog();
    let expected = catalog.recommend("Fries", None).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let catalog = catalog.clone();
            std::thread::spawn(move || catalog.recommend("Fries", None).unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_gzip_and_bundle_sources() {
    let (dir, models) = load();

    let gz_dir = dir.path().join("compressed");
    ArtifactStore::new(&gz_dir).save_catalog(&models.catalog(), true).unwrap();
    let from_gz = ModelManager::from_dir(&gz_dir, RecommenderConfig::default()).unwrap();
    assert_eq!(
        from_gz.catalog().recommend("Pizza", None).unwrap(),
        models.catalog().recommend("Pizza", None).unwrap()
    );

    let bundles = BundleManager::new(dir.path().join("bundles")).unwrap();
    let description = bundles.create_bundle("menu", &models.catalog()).unwrap();
    let from_bundle = ModelManager::new(
        ModelSource::Bundle(bundles.bundle_dir().join(&description.name)),
        RecommenderConfig::default(),
    ).unwrap();
    assert_eq!(from_bundle.catalog().item_count(), 6);
    assert_eq!(from_bundle.catalog().menu().len(), 6);
}

#[test]
fn test_skip_query_policy() {
    let dir = tempfile::tempdir().unwrap();
    write_models(dir.path());
    // Pizza's row peaks on Pasta instead of itself
    fs::write(
        dir.path().join("similarity_scores.json"),
        r#"[
            [0.7, 0.9, 0.2, 0.1, 0.05, 0.3],
            [0.9, 1.0, 0.3, 0.2, 0.1, 0.25],
            [0.2, 0.3, 1.0, 0.8, 0.4, 0.6],
            [0.1, 0.2, 0.8, 1.0, 0.35, 0.6],
            [0.05, 0.1, 0.4, 0.35, 1.0, 0.2],
            [0.3, 0.25, 0.6, 0.6, 0.2, 1.0]
        ]"#,
    ).unwrap();

    let drop_head = ModelManager::from_dir(dir.path(), RecommenderConfig::default()).unwrap();
    let results = drop_head.catalog().recommend("Pizza", Some(1)).unwrap();
    assert_eq!(names(&results), vec!["Pizza"]);

    let config = RecommenderConfig {
        self_exclusion: SelfExclusion::SkipQuery,
        ..RecommenderConfig::default()
    };
    let skip_query = ModelManager::from_dir(dir.path(), config).unwrap();
    let results = skip_query.catalog().recommend("Pizza", Some(1)).unwrap();
    assert_eq!(names(&results), vec!["Pasta"]);
}
