use recipe_cloner::{CloneConfig, IngestionPipeline, RecipeStore, Source};

fn pipeline() -> IngestionPipeline {
    let store = RecipeStore::open_in_memory().unwrap();
    IngestionPipeline::with_store(&CloneConfig::default(), store).unwrap()
}

fn recipe_page(json_ld: &str) -> String {
    format!(
        r#"
        <!DOCTYPE html>
        <html>
        <head>
            <title>Recipe Page</title>
            <script type="application/ld+json">
                {}
            </script>
        </head>
        <body>
            <h1>Recipe</h1>
        </body>
        </html>
        "#,
        json_ld
    )
}

#[test]
fn test_structured_data_page_end_to_end() {
    let mut server = mockito::Server::new();
    let json_ld = r#"
    {
        "@context": "https://schema.org",
        "@type": "Recipe",
        "name": "Slow Cooked Beef",
        "description": "Fall-apart tender beef",
        "image": "https://example.com/beef.jpg",
        "cookTime": "PT1H30M",
        "recipeIngredient": ["1kg beef", "2 onions"],
        "recipeInstructions": [
            {"@type": "HowToStep", "text": "Sear the beef"},
            {"@type": "HowToStep", "text": "Simmer for ninety minutes"}
        ]
    }
    "#;
    let _m = server
        .mock("GET", "/recipe")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(recipe_page(json_ld))
        .create();

    let mut pipeline = pipeline();
    let source = Source::Page(format!("{}/recipe", server.url()));

    assert_eq!(pipeline.ingest(&source), 1);

    let recipes = pipeline.store().list_all().unwrap();
    assert_eq!(recipes.len(), 1);
    let recipe = &recipes[0];
    assert_eq!(recipe.title, "Slow Cooked Beef");
    assert_eq!(recipe.duration_in_minutes, 90);
    assert_eq!(recipe.source, "web_scrape");
    assert_eq!(recipe.ingredients.len(), 2);
    assert_eq!(recipe.steps.len(), 2);

    // scraping the same page again is a duplicate, not an error
    assert_eq!(pipeline.ingest(&source), 0);
    assert_eq!(pipeline.store().statistics().unwrap().total_recipes, 1);
}

#[test]
fn test_short_cook_time_normalizes_to_floor() {
    let mut server = mockito::Server::new();
    let json_ld = r#"
    {
        "@type": "Recipe",
        "name": "Two-Minute Noodles",
        "cookTime": "PT10M",
        "recipeIngredient": ["noodles"],
        "recipeInstructions": ["Boil water", "Add noodles"]
    }
    "#;
    let _m = server
        .mock("GET", "/quick")
        .with_status(200)
        .with_body(recipe_page(json_ld))
        .create();

    let mut pipeline = pipeline();
    pipeline.ingest(&Source::Page(format!("{}/quick", server.url())));

    assert_eq!(
        pipeline.store().list_all().unwrap()[0].duration_in_minutes,
        30
    );
}

#[test]
fn test_plain_page_falls_back_to_generic_extraction() {
    let mut server = mockito::Server::new();
    let html = r#"
    <html>
    <head><meta name="description" content="Grandma's secret stew."></head>
    <body>
        <h1>Beef Stew</h1>
        <img src="/img/stew.jpg">
    </body>
    </html>
    "#;
    let _m = server
        .mock("GET", "/plain")
        .with_status(200)
        .with_body(html)
        .create();

    let mut pipeline = pipeline();
    let url = format!("{}/plain", server.url());
    assert_eq!(pipeline.ingest(&Source::Page(url.clone())), 1);

    let recipes = pipeline.store().list_all().unwrap();
    let recipe = &recipes[0];
    assert_eq!(recipe.title, "Beef Stew");
    assert_eq!(recipe.description, "Grandma's secret stew.");
    assert_eq!(recipe.image_url, format!("{}/img/stew.jpg", server.url()));
    assert_eq!(recipe.duration_in_minutes, 30);
    assert!(recipe.ingredients.is_empty());
}

#[test]
fn test_batch_success_count_excludes_broken_pages() {
    let mut server = mockito::Server::new();
    let good = r#"{"@type": "Recipe", "name": "Good", "recipeIngredient": ["x"], "recipeInstructions": ["y"]}"#;
    let _ok = server
        .mock("GET", "/good")
        .with_status(200)
        .with_body(recipe_page(good))
        .create();
    let _gone = server.mock("GET", "/gone").with_status(404).create();

    let sources = vec![
        Source::Page(format!("{}/good", server.url())),
        Source::Page(format!("{}/gone", server.url())),
        Source::Page("http://127.0.0.1:9/unreachable".to_string()),
    ];

    let mut pipeline = pipeline();
    assert_eq!(pipeline.ingest_batch(&sources), 1);
    assert_eq!(pipeline.store().statistics().unwrap().total_recipes, 1);
}
