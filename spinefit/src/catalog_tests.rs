use crate::Error;
use crate::catalog::ModelCatalog;

const MANIFEST: &str = r#"
{
  "version": 1,
  "base": "assets/spine",
  "models": [
    {
      "name": "spineboy",
      "skeleton": "spineboy/spineboy-pro.json",
      "atlas": "spineboy/spineboy.atlas",
      "animations": ["idle", "walk", "run", "jump"],
      "defaultAnimation": "walk",
      "scale": 0.5
    },
    {
      "name": "raptor",
      "skeleton": "raptor/raptor-pro.json",
      "atlas": "raptor/raptor.atlas",
      "animations": ["roar", "walk"]
    },
    {
      "name": "owl",
      "skeleton": "https://cdn.example.com/owl.json",
      "atlas": "/static/owl.atlas"
    }
  ]
}
"#;

#[test]
fn parses_models_and_defaults() {
    let catalog = ModelCatalog::from_json_str(MANIFEST).expect("parse");
    assert_eq!(catalog.models().len(), 3);

    let boy = catalog.get("spineboy").expect("spineboy");
    assert_eq!(boy.default_animation(), Some("walk"));
    assert_eq!(boy.scale, 0.5);
    assert!(boy.has_animation("jump"));

    let raptor = catalog.get("raptor").expect("raptor");
    assert_eq!(raptor.default_animation(), Some("roar"));
    assert_eq!(raptor.scale, 1.0);

    let owl = catalog.get("owl").expect("owl");
    assert_eq!(owl.default_animation(), None);
}

#[test]
fn resolves_paths_against_base() {
    let catalog = ModelCatalog::from_json_str(MANIFEST).expect("parse");
    let boy = catalog.get("spineboy").expect("spineboy");
    assert_eq!(
        catalog.resolve(&boy.skeleton),
        "assets/spine/spineboy/spineboy-pro.json"
    );
    let owl = catalog.get("owl").expect("owl");
    assert_eq!(catalog.resolve(&owl.skeleton), "https://cdn.example.com/owl.json");
    assert_eq!(catalog.resolve(&owl.atlas), "/static/owl.atlas");
}

#[test]
fn choose_falls_back_to_first_model() {
    let catalog = ModelCatalog::from_json_str(MANIFEST).expect("parse");
    assert_eq!(catalog.choose(Some("raptor")).map(|m| m.name.as_str()), Some("raptor"));
    assert_eq!(catalog.choose(Some("nope")).map(|m| m.name.as_str()), Some("spineboy"));
    assert_eq!(catalog.choose(None).map(|m| m.name.as_str()), Some("spineboy"));
}

#[test]
fn unknown_model_is_an_error() {
    let catalog = ModelCatalog::from_json_str(MANIFEST).expect("parse");
    let err = catalog.get("dragon").unwrap_err();
    assert!(matches!(err, Error::UnknownModel { ref name } if name == "dragon"));
}

#[test]
fn rejects_bad_manifests() {
    let wrong_version = r#"{ "version": 2, "models": [] }"#;
    assert!(matches!(
        ModelCatalog::from_json_str(wrong_version),
        Err(Error::UnsupportedCatalogVersion { version: 2 })
    ));

    let duplicate = r#"{ "version": 1, "models": [
        { "name": "a", "skeleton": "a.json", "atlas": "a.atlas" },
        { "name": "a", "skeleton": "b.json", "atlas": "b.atlas" }
    ] }"#;
    assert!(matches!(
        ModelCatalog::from_json_str(duplicate),
        Err(Error::DuplicateModel { .. })
    ));

    assert!(matches!(
        ModelCatalog::from_json_str("{ not json"),
        Err(Error::CatalogParse { .. })
    ));
}

#[test]
fn no_base_leaves_paths_untouched() {
    let catalog = ModelCatalog::from_json_str(
        r#"{ "version": 1, "base": "", "models": [] }"#,
    )
    .expect("parse");
    assert!(catalog.is_empty());
    assert_eq!(catalog.resolve("x/y.json"), "x/y.json");
}
