//! Integration tests for the book filter compiler.
//!
//! Covers:
//! - Topic normalization, negation and alternation
//! - Merging of tag constraints from every source
//! - Search facets
//! - Circulation, draft and rebrand defaults
//! - Lineage (`derivedFrom`) and alternatives (`anyOfThese`)
//! - Ordering schemes and paging
//! - Determinism and serialization

mod common;

use catalog_query::{
    BookOrderingScheme, BookQueryCompiler, BooleanOption, ColumnFilter, CompileOptions,
    CompileWarning, Filter, QueryParams, TopicVocabulary,
};
use serde_json::{Value, json};

use common::{compile, compiler, known_tags, where_of};

fn default_visibility() -> Value {
    json!({ "$in": [true, null] })
}

// ============================================================================
// Topics
// ============================================================================

#[test]
fn test_topic_case_is_normalized() {
    let lower = where_of(&Filter::new().with_topic("bible"));
    let canonical = where_of(&Filter::new().with_topic("Bible"));

    assert_eq!(lower["tags"], json!("topic:Bible"));
    assert_eq!(lower, canonical);
}

#[test]
fn test_topic_from_ui_input() {
    let filter = Filter::new().with_topic_from_ui("animal stories");
    assert_eq!(where_of(&filter)["tags"], json!("topic:Animal Stories"));
}

#[test]
fn test_no_topic_sentinel_any_casing() {
    let expected = json!({ "$nin": TopicVocabulary::default().topic_tags() });
    for name in ["Other", "other", "OTHER"] {
        assert_eq!(where_of(&Filter::new().with_topic(name))["tags"], expected);
    }
}

#[test]
fn test_unknown_topic_is_anchored_regex() {
    assert_eq!(
        where_of(&Filter::new().with_topic("Cooking"))["tags"],
        json!({ "$regex": "^topic:Cooking$", "$options": "i" })
    );
}

#[test]
fn test_topic_list_is_alternation() {
    assert_eq!(
        where_of(&Filter::new().with_topic("math,science"))["tags"],
        json!({ "$regex": "^topic:(math|science)$", "$options": "i" })
    );
}

#[test]
fn test_custom_topic_vocabulary() {
    let topics = TopicVocabulary::new(vec!["Math".to_string(), "Misc".to_string()], "Misc");
    let compiler = BookQueryCompiler::new(known_tags()).with_topics(topics);
    let compiled = compiler.compile_filter(&Filter::new().with_topic("misc"));
    assert_eq!(
        compiled.where_clause()["tags"],
        json!({ "$nin": ["topic:Math"] })
    );
}

// ============================================================================
// Tag merging
// ============================================================================

#[test]
fn test_topic_bookshelf_and_level_all_survive() {
    let filter = Filter::new()
        .with_topic("Math")
        .with_bookshelf("Enabling Writers Workshops")
        .with_search("level:1");
    let where_clause = where_of(&filter);

    assert!(where_clause.get("tags").is_none());
    assert_eq!(
        where_clause["$and"],
        json!([
            { "tags": { "$in": ["level:1", "computedLevel:1"] } },
            { "tags": { "$nin": ["level:2", "level:3", "level:4"] } },
            { "tags": { "$all": ["topic:Math", "bookshelf:Enabling Writers Workshops"] } }
        ])
    );
}

#[test]
fn test_search_tag_and_topic_combine_under_all() {
    let filter = Filter::new().with_search("topic:math frogs").with_topic("Health");
    let where_clause = where_of(&filter);

    assert_eq!(
        where_clause["tags"],
        json!({ "$all": ["topic:Math", "topic:Health"] })
    );
    assert_eq!(
        where_clause["search"],
        json!({ "$text": { "$search": { "$term": "frogs" } } })
    );
}

#[test]
fn test_bookshelf_wildcard() {
    let filter = Filter::new().with_bookshelf("Enabling Writers*");
    assert_eq!(
        where_of(&filter)["tags"],
        json!({ "$regex": "^bookshelf:Enabling Writers" })
    );
}

#[test]
fn test_other_tags_mix_wildcards_and_literals() {
    let filter = Filter::new().with_other_tags("*Wall Chart, system:Incoming");
    assert_eq!(
        where_of(&filter)["$and"],
        json!([
            { "tags": { "$regex": "Wall Chart$" } },
            { "tags": { "$all": ["system:Incoming"] } }
        ])
    );
}

// ============================================================================
// Search facets
// ============================================================================

#[test]
fn test_facets_become_field_constraints() {
    let filter =
        Filter::new().with_search(r#"uploader:"joe smith" title:"Big Pond" harvestState:Done phash:abc"#);
    let where_clause = where_of(&filter);

    assert_eq!(
        where_clause["title"],
        json!({ "$regex": "Big Pond", "$options": "i" })
    );
    assert_eq!(
        where_clause["uploader"],
        json!({
            "$inQuery": {
                "where": { "email": { "$regex": "joe smith", "$options": "i" } },
                "className": "_User"
            }
        })
    );
    assert_eq!(where_clause["harvestState"], json!("Done"));
    assert_eq!(where_clause["phashOfFirstContentImage"], json!("abc"));
    assert!(where_clause.get("search").is_none());
}

#[test]
fn test_level_empty() {
    let where_clause = where_of(&Filter::new().with_search("level:empty"));
    assert_eq!(
        where_clause["tags"],
        json!({ "$nin": [
            "level:1", "level:2", "level:3", "level:4",
            "computedLevel:1", "computedLevel:2", "computedLevel:3", "computedLevel:4"
        ] })
    );
}

#[test]
fn test_feature_and_language_facets() {
    let where_clause = where_of(&Filter::new().with_search("feature:talkingBook language:fr"));
    assert_eq!(where_clause["features"], json!("talkingBook"));
    assert_eq!(
        where_clause["langPointers"],
        json!({ "$inQuery": { "where": { "isoCode": "fr" }, "className": "language" } })
    );
}

#[test]
fn test_branding_facet_aliases() {
    let short = where_of(&Filter::new().with_search("branding:PNG-Education"));
    let long = where_of(&Filter::new().with_search("brandingProjectName:PNG-Education"));
    assert_eq!(short["brandingProjectName"], json!("PNG-Education"));
    assert_eq!(short, long);
}

#[test]
fn test_noise_words_dropped_from_text() {
    let where_clause = where_of(&Filter::new().with_search("libros de ranas"));
    assert_eq!(
        where_clause["search"],
        json!({ "$text": { "$search": { "$term": "de ranas" } } })
    );
}

#[test]
fn test_column_filters_compile_as_facets() {
    let filter = Filter::new().with_column_filters(&[ColumnFilter {
        column: "title".to_string(),
        value: "Big Pond".to_string(),
    }]);
    let where_clause = where_of(&filter);
    assert_eq!(
        where_clause["title"],
        json!({ "$regex": "Big Pond", "$options": "i" })
    );
    assert!(where_clause.get("search").is_none());
}

#[test]
fn test_record_facets_become_field_constraints() {
    let filter = Filter::new()
        .with_search(r#"bookInstanceId:abc123 copyright:"CC BY" country:Kenya license:ccby"#);
    let where_clause = where_of(&filter);

    assert_eq!(where_clause["bookInstanceId"], json!("abc123"));
    assert_eq!(
        where_clause["copyright"],
        json!({ "$regex": "CC BY", "$options": "i" })
    );
    assert_eq!(
        where_clause["country"],
        json!({ "$regex": "Kenya", "$options": "i" })
    );
    assert_eq!(
        where_clause["license"],
        json!({ "$regex": "ccby", "$options": "i" })
    );
    assert!(where_clause.get("search").is_none());
}

#[test]
fn test_column_filter_with_trailing_backslash_keeps_next_column() {
    let filter = Filter::new().with_column_filters(&[
        ColumnFilter {
            column: "title".to_string(),
            value: r"C:\".to_string(),
        },
        ColumnFilter {
            column: "uploader".to_string(),
            value: "joe".to_string(),
        },
    ]);
    let where_clause = where_of(&filter);

    assert_eq!(
        where_clause["title"],
        json!({ "$regex": r"C:\\", "$options": "i" })
    );
    assert_eq!(
        where_clause["uploader"],
        json!({
            "$inQuery": {
                "where": { "email": { "$regex": "joe", "$options": "i" } },
                "className": "_User"
            }
        })
    );
    assert!(where_clause.get("search").is_none());
}

// ============================================================================
// Language, feature, keywords
// ============================================================================

#[test]
fn test_language_filter() {
    assert_eq!(
        where_of(&Filter::new().with_language("tpi"))["langPointers"],
        json!({ "$inQuery": { "where": { "isoCode": "tpi" }, "className": "language" } })
    );
    assert_eq!(
        where_of(&Filter::new().with_language("noLanguage"))["langPointers"],
        json!({ "$eq": [] })
    );
}

#[test]
fn test_feature_alternation() {
    assert_eq!(
        where_of(&Filter::new().with_feature("activity OR quiz"))["features"],
        json!({ "$in": ["activity", "quiz"] })
    );
}

#[test]
fn test_keywords_are_stemmed() {
    assert_eq!(
        where_of(&Filter::new().with_keywords_text("Frogs and ponds"))["keywordStems"],
        json!({ "$all": ["frog", "and", "pond"] })
    );
}

// ============================================================================
// Circulation, draft, rebrand
// ============================================================================

#[test]
fn test_visibility_defaults() {
    let where_clause = where_of(&Filter::new());
    assert_eq!(where_clause["inCirculation"], default_visibility());
    assert_eq!(where_clause["draft"], json!(false));
    assert!(where_clause.get("rebrand").is_none());
}

#[test]
fn test_all_widens_visibility() {
    let filter = Filter::new()
        .with_in_circulation(BooleanOption::All)
        .with_draft(BooleanOption::All);
    assert_eq!(where_of(&filter), json!({}));
}

#[test]
fn test_rebrand_switch() {
    assert_eq!(
        where_of(&Filter::new().with_rebrand(BooleanOption::Yes))["rebrand"],
        json!(true)
    );
    assert_eq!(
        where_of(&Filter::new().with_rebrand(BooleanOption::No))["rebrand"],
        json!({ "$ne": true })
    );
}

// ============================================================================
// Lineage
// ============================================================================

#[test]
fn test_derived_from_publisher() {
    let parent = Filter::new().with_publisher("SIL").with_topic("Math");
    let compiled = compile(&Filter::new().with_derived_from(parent));
    let where_clause = compiled.where_clause();

    assert!(compiled.is_clean());
    assert_eq!(
        where_clause["bookLineageArray"],
        json!({
            "$select": {
                "query": {
                    "className": "books",
                    "where": { "publisher": "SIL", "tags": "topic:Math" }
                },
                "key": "bookInstanceId"
            }
        })
    );
    assert_eq!(
        where_clause["$and"],
        json!([{ "publisher": { "$ne": "SIL" } }])
    );
    assert_eq!(where_clause["inCirculation"], default_visibility());
}

#[test]
fn test_derived_from_without_exclusion_warns_every_time() {
    let compiler = compiler();
    let filter = Filter::new().with_derived_from(Filter::new().with_topic("Math"));

    for _ in 0..2 {
        let compiled = compiler.compile_filter(&filter);
        assert_eq!(
            compiled.warnings,
            vec![CompileWarning::UnderivableParentExclusion]
        );
        assert!(compiled.where_clause().get("$and").is_none());
        assert!(compiled.where_clause().contains_key("bookLineageArray"));
    }
}

#[test]
fn test_repeated_warning_reported_once_per_result() {
    let underivable = || Filter::new().with_derived_from(Filter::new().with_topic("Math"));
    let filter = Filter::new().with_any_of_these(vec![underivable(), underivable()]);
    let compiled = compile(&filter);
    assert_eq!(
        compiled.warnings,
        vec![CompileWarning::UnderivableParentExclusion]
    );
}

// ============================================================================
// Alternatives
// ============================================================================

#[test]
fn test_any_of_these_compiles_each_alternative() {
    let filter = Filter::new().with_any_of_these(vec![
        Filter::new().with_publisher("SIL"),
        Filter::new()
            .with_other_tags("system:Incoming")
            .with_draft(BooleanOption::All),
    ]);
    let where_clause = where_of(&filter);

    assert_eq!(
        where_clause["$or"],
        json!([
            { "publisher": "SIL", "inCirculation": { "$in": [true, null] }, "draft": false },
            { "tags": "system:Incoming", "inCirculation": { "$in": [true, null] } }
        ])
    );
}

#[test]
fn test_empty_any_of_these_ignored() {
    let where_clause = where_of(&Filter::new().with_any_of_these(Vec::new()));
    assert!(where_clause.get("$or").is_none());
}

// ============================================================================
// Ordering and paging
// ============================================================================

#[test]
fn test_title_alphabetical_fetches_everything() {
    let compiled = compiler().compile(
        QueryParams::new().with_order("title"),
        Some(&Filter::new()),
        CompileOptions::ordered(BookOrderingScheme::TitleAlphabetical)
            .with_limit(20)
            .with_skip(40),
    );
    assert_eq!(compiled.params.limit, Some(10_000_000));
    assert_eq!(compiled.params.skip, None);
    assert_eq!(compiled.params.order.as_deref(), Some("title"));
}

#[test]
fn test_free_text_ranked_only_under_default() {
    let filter = Filter::new().with_search("frogs");
    let compiler = compiler();

    let ranked = compiler.compile(
        QueryParams::new().with_keys("title"),
        Some(&filter),
        CompileOptions::default(),
    );
    assert_eq!(ranked.params.order.as_deref(), Some("$score"));
    assert_eq!(ranked.params.keys.as_deref(), Some("$score,title"));

    let newest = compiler.compile(
        QueryParams::new().with_keys("title"),
        Some(&filter),
        CompileOptions::ordered(BookOrderingScheme::NewestCreationsFirst),
    );
    assert_eq!(newest.params.order.as_deref(), Some("-createdAt"));
    assert_eq!(newest.params.keys.as_deref(), Some("title"));
}

#[test]
fn test_count_query_drops_paging() {
    let compiled = compiler().compile_count(&Filter::new().with_topic("Math"));
    assert_eq!(compiled.params.limit, Some(0));
    assert_eq!(compiled.params.count, Some(1));
    assert_eq!(compiled.params.order, None);
    assert_eq!(compiled.where_clause()["tags"], json!("topic:Math"));
}

// ============================================================================
// Determinism and serialization
// ============================================================================

fn busy_filter() -> Filter {
    Filter::new()
        .with_search("frogs level:2 uploader:joe system:incoming")
        .with_language("en")
        .with_topic("Math")
        .with_bookshelf("Enabling Writers*")
        .with_feature("activity OR quiz")
        .with_keywords_text("ponds")
        .with_derived_from(Filter::new().with_branding_project_name("Juarez"))
        .with_any_of_these(vec![
            Filter::new().with_publisher("SIL"),
            Filter::new().with_draft(BooleanOption::Yes),
        ])
}

#[test]
fn test_compiling_twice_is_identical() {
    let compiler = compiler();
    let filter = busy_filter();

    let first = compiler.compile_filter(&filter);
    let second = compiler.compile_filter(&filter);
    assert_eq!(first, second);

    let fresh = BookQueryCompiler::new(known_tags()).compile_filter(&filter);
    assert_eq!(first, fresh);
}

#[test]
fn test_filter_is_not_mutated() {
    let filter = busy_filter();
    let before = filter.clone();
    let _ = compile(&filter);
    assert_eq!(filter, before);
}

#[test]
fn test_json_filter_compiles_like_builder() {
    let from_json = Filter::from_json(
        r#"{"topic":"bible","inCirculation":"All","derivedFrom":{"publisher":"SIL"}}"#,
    )
    .unwrap();
    let built = Filter::new()
        .with_topic("bible")
        .with_in_circulation(BooleanOption::All)
        .with_derived_from(Filter::new().with_publisher("SIL"));
    assert_eq!(where_of(&from_json), where_of(&built));
}

#[test]
fn test_request_pairs_carry_where_as_json() {
    let compiled = compile(&Filter::new().with_topic("Math"));
    let pairs = compiled.params.to_request_pairs();

    assert_eq!(pairs[0].0, "where");
    let decoded: Value = serde_json::from_str(&pairs[0].1).unwrap();
    assert_eq!(decoded, Value::Object(compiled.params.where_clause.clone()));
}

#[test]
fn test_compiled_query_serialization() {
    let clean = serde_json::to_value(compile(&Filter::new())).unwrap();
    assert!(clean.get("warnings").is_none());
    assert_eq!(clean["params"]["where"]["draft"], json!(false));

    let warned = serde_json::to_value(
        compiler().compile(QueryParams::new(), None, CompileOptions::default()),
    )
    .unwrap();
    assert_eq!(warned["warnings"], json!([{ "kind": "missingFilter" }]));
}
