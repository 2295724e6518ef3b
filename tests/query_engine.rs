use cbp_finder::catalog::Catalog;
use cbp_finder::model::CatalogDoc;
use cbp_finder::query::{FilterState, filter_records, matches};

fn catalog() -> Catalog {
    let doc: CatalogDoc = serde_json::from_str(include_str!("fixtures/catalog.json")).unwrap();
    Catalog::from_doc(doc).unwrap()
}

fn ids(records: &[&cbp_finder::model::SystemRecord]) -> Vec<String> {
    records.iter().map(|r| r.system_id.clone()).collect()
}

#[test]
fn results_are_an_ordered_subset() {
    let cat = catalog();
    let all: Vec<String> = cat.records().iter().map(|r| r.system_id.clone()).collect();
    let states = [
        FilterState::any(),
        FilterState::default(),
        FilterState {
            query: "slab".into(),
            ..FilterState::any()
        },
        FilterState {
            category: "Glass Tile".into(),
            ..FilterState::any()
        },
    ];
    for st in &states {
        let got = ids(&filter_records(&cat, st));
        let mut positions = got.iter().map(|id| all.iter().position(|a| a == id).unwrap());
        let mut last = positions.next();
        for p in positions {
            assert!(Some(p) > last, "order not preserved for {st:?}");
            last = Some(p);
        }
    }
}

#[test]
fn category_only_returns_exactly_that_category() {
    let cat = catalog();
    let st = FilterState {
        category: "Stone Tile".into(),
        ..FilterState::any()
    };
    let got = filter_records(&cat, &st);
    assert!(got.iter().all(|r| r.category == "Stone Tile"));
    let expected = cat.records().iter().filter(|r| r.category == "Stone Tile").count();
    assert_eq!(got.len(), expected);
    assert_eq!(got.len(), 3);
}

#[test]
fn category_without_records_yields_nothing() {
    let cat = catalog();
    let st = FilterState {
        category: "Glass Tile".into(),
        ..FilterState::any()
    };
    assert!(filter_records(&cat, &st).is_empty());
}

#[test]
fn multi_word_query_needs_every_word() {
    let cat = catalog();
    let rec = cat.find("ST-EF-01").unwrap();
    let mut st = FilterState::any();
    st.query = "stone exterior".into();
    assert!(matches(rec, &st));
    st.query = "Exterior   STONE".into();
    assert!(matches(rec, &st));
    st.query = "stone ceramic".into();
    assert!(!matches(rec, &st));
}

#[test]
fn query_searches_keywords_and_products() {
    let cat = catalog();
    let mut st = FilterState::any();
    st.query = "epoxygrout".into();
    assert_eq!(ids(&filter_records(&cat, &st)), ["ST-EF-01"]);
    st.query = "flexbond".into();
    assert_eq!(ids(&filter_records(&cat, &st)), ["ST-EF-01", "CT-EF-03"]);
    st.query = "marble".into();
    assert_eq!(ids(&filter_records(&cat, &st)), ["ST-IW-02"]);
}

#[test]
fn default_filters_combine() {
    let cat = catalog();
    let mut st = FilterState::default();
    assert_eq!(ids(&filter_records(&cat, &st)), ["ST-EF-01", "ST-EF-04"]);
    st.substrate = "Wood Deck".into();
    assert_eq!(ids(&filter_records(&cat, &st)), ["ST-EF-04"]);
    st.tile_type = "Natural Stone".into();
    assert!(filter_records(&cat, &st).is_empty());
}

#[test]
fn option_sets_are_distinct_and_sorted() {
    let cat = catalog();
    let opts = cat.options();
    assert_eq!(opts.applications, ["Exterior Floors", "Interior Walls"]);
    assert_eq!(opts.substrates, ["Cement Board", "Concrete Slab", "Wood Deck"]);
    assert_eq!(opts.tile_types, ["Natural Stone", "Porcelain", "Slate"]);
}

#[test]
fn same_inputs_same_outputs() {
    let cat = catalog();
    let mut st = FilterState::any();
    st.query = "tcna".into();
    assert_eq!(ids(&filter_records(&cat, &st)), ids(&filter_records(&cat, &st)));
}
