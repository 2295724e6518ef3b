use cbp_finder::catalog::Catalog;
use cbp_finder::controller::Controller;
use cbp_finder::model::{CatalogDoc, Document, SystemRecord};
use cbp_finder::panel::{DirSink, SystemLinkOpener};
use cbp_finder::query::FilterState;
use cbp_finder::view::{HtmlView, render_page};

fn hostile_catalog() -> Catalog {
    Catalog::from_doc(CatalogDoc {
        categories: vec!["Stone <Tile>".into()],
        systems: vec![SystemRecord {
            system_id: "X\"1".into(),
            cbp_method: "<img src=x onerror=alert(1)>".into(),
            category: "Stone <Tile>".into(),
            application_type: "Floors & Walls".into(),
            documents: vec![
                Document {
                    title: "<script>alert(2)</script>".into(),
                    doc_type: "PDF".into(),
                    url: Some("javascript:alert(document.cookie)".into()),
                },
                Document {
                    title: "Inline".into(),
                    doc_type: "PDF".into(),
                    url: Some("data:text/html,<script>alert(3)</script>".into()),
                },
            ],
            ..Default::default()
        }],
    })
    .unwrap()
}

#[test]
fn page_escapes_every_record_field() {
    let tmp = tempfile::tempdir().unwrap();
    let out = camino::Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();
    let mut c = Controller::init(
        hostile_catalog(),
        FilterState::with_defaults("Stone <Tile>", ""),
        HtmlView::new(),
        Box::new(DirSink::new(&out)),
        Box::new(SystemLinkOpener),
    );
    c.open_documents("X\"1");
    let page = render_page(c.view(), "Finder");

    assert!(page.contains(r#"<span id="count">1</span>"#));
    assert!(!page.contains("<img src=x"));
    assert!(!page.contains("<script>alert(2)"));
    assert!(page.contains("<span>Stone &lt;Tile&gt;</span>"));
    assert!(page.contains("Floors &amp; Walls"));
    assert!(!page.contains(r#"data-id="X"1""#));
    assert!(!page.contains("javascript:"));
    assert!(!page.contains("data:text/html"));
    assert!(!page.contains("href="));
    assert_eq!(page.matches(r#"type="button" disabled"#).count(), 2);
}

#[test]
fn page_shows_selected_options() {
    let doc: CatalogDoc =
        serde_json::from_str(include_str!("fixtures/catalog.json")).unwrap();
    let tmp = tempfile::tempdir().unwrap();
    let out = camino::Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();
    let mut c = Controller::init(
        Catalog::from_doc(doc).unwrap(),
        FilterState::default(),
        HtmlView::new(),
        Box::new(DirSink::new(&out)),
        Box::new(SystemLinkOpener),
    );
    c.set_substrate("Wood Deck");
    let page = render_page(c.view(), "Finder");
    assert!(page.contains(r#"<option value="Exterior Floors" selected>"#));
    assert!(page.contains(r#"<option value="Wood Deck" selected>"#));
    assert!(page.contains(r#"<option value="" selected>Any</option>"#));
    assert!(page.contains(r#"<span id="count">1</span>"#));
}
