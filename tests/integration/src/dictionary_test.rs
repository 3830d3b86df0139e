//! End-to-end tests for the dictionary surface
//!
//! Exercises the complete flow against a real storage layout: lazy root
//! construction, dotted-path and step-wise lookup, raw-text leaves,
//! mixed directory+file merges, aggregation, and serialization.

use lexicon_tree::{Dictionary, Lookup, resolve_errors};
use lexicon_test_utils::TestStorage;
use pretty_assertions::assert_eq;
use serde_json::json;

/// Storage layout mirroring a small deployment:
///
/// ```text
/// en/
///   example.json        {"title": ..., "errors": {...}}
///   test1/
///     example.html      Hello World
///     foo.json          {"foo": "bar"}
///   test2/
///     test3.json        {"hey": "yo"}
/// ```
fn setup_storage() -> TestStorage {
    let storage = TestStorage::new();
    storage.json(
        "en/example.json",
        &json!({
            "title": "This is an example",
            "errors": {
                "test_exists": "This is an error",
                "test2_exists": "This already exists"
            }
        }),
    );
    storage.file("en/test1/example.html", "<p>Hello World</p>\n");
    storage.json("en/test1/foo.json", &json!({"foo": "bar"}));
    storage.json("en/test2/test3.json", &json!({"hey": "yo"}));
    storage
}

#[test]
fn test_construct() {
    let storage = setup_storage();
    let dictionary = Dictionary::new("en", storage.root());
    assert_eq!(dictionary.language(), "en");
    assert_eq!(dictionary.storage_root(), storage.root());
    assert!(!dictionary.root().is_loaded());
}

#[test]
fn test_set_language() {
    let mut dictionary = Dictionary::new("en", "/nonexistent");
    dictionary.set_language("de");
    assert_eq!(dictionary.language(), "de");
}

#[test]
fn test_indexed_access() {
    let storage = setup_storage();
    let mut dictionary = Dictionary::new("en", storage.root());
    let title = dictionary.get("example").unwrap().get("title").unwrap();
    assert_eq!(title.as_str(), Some("This is an example"));
}

#[test]
fn test_get_method() {
    let storage = setup_storage();
    let mut dictionary = Dictionary::new("en", storage.root());
    assert_eq!(
        dictionary.get("example.title").unwrap().as_str(),
        Some("This is an example")
    );
}

#[test]
fn test_get_dir_method() {
    let storage = setup_storage();
    let mut dictionary = Dictionary::new("en", storage.root());

    let test2 = dictionary.get("test2").unwrap();
    let Lookup::Node(test2) = test2 else {
        panic!("test2 should resolve to a node");
    };
    let test3 = test2.get("test3").unwrap();
    let Lookup::Node(test3) = test3 else {
        panic!("test3 should resolve to a node");
    };
    assert_eq!(test3.get("hey").unwrap().as_str(), Some("yo"));
}

#[test]
fn test_non_existing_entry() {
    let storage = setup_storage();
    let mut dictionary = Dictionary::new("en", storage.root());
    assert!(dictionary.get("example.title2").unwrap().is_absent());
    assert!(!dictionary.contains("example.title2").unwrap());
}

#[test]
fn test_errors() {
    let storage = setup_storage();
    let mut dictionary = Dictionary::new("en", storage.root());

    let table = dictionary.get("example.errors").unwrap();
    let errors = resolve_errors(&["test_exists", "test2_exists"], table).unwrap();

    assert_eq!(
        errors.get("test_exists").map(String::as_str),
        Some("This is an error")
    );
    assert_eq!(
        errors.get("test2_exists").map(String::as_str),
        Some("This already exists")
    );
}

#[test]
fn test_html_file() {
    let storage = setup_storage();
    let mut dictionary = Dictionary::new("en", storage.root());
    let example = dictionary.get("test1").unwrap().get("example").unwrap();
    // A raw-text leaf resolves to its content, never to a node.
    assert!(matches!(example, Lookup::Text(_)));
    assert!(example.as_str().unwrap().contains("Hello World"));
}

#[test]
fn test_file_with_directory() {
    let storage = setup_storage();
    let mut dictionary = Dictionary::new("en", storage.root());
    assert_eq!(
        dictionary.get("test1").unwrap().get("foo").unwrap().as_str(),
        Some("bar")
    );
}

#[test]
fn test_get_method_file_with_directory() {
    let storage = setup_storage();
    let mut dictionary = Dictionary::new("en", storage.root());

    let test1 = dictionary.get("test1").unwrap().into_node().unwrap();
    assert_eq!(test1.get("foo").unwrap().as_str(), Some("bar"));
    assert!(test1.get("example").unwrap().as_str().unwrap().contains("Hello World"));
}

#[test]
fn test_iteration_and_len() {
    let storage = setup_storage();
    let mut dictionary = Dictionary::new("en", storage.root());

    let test1 = dictionary.get("test1").unwrap().into_node().unwrap();
    // foo.json merges its mapping in next to the raw-text slot.
    let keys: Vec<String> = test1.keys().unwrap().map(String::from).collect();
    assert!(keys.contains(&"foo".to_string()));
    assert!(keys.contains(&"example".to_string()));
    assert!(test1.len().unwrap() >= 2);
    assert!(!test1.is_empty().unwrap());
}

#[test]
fn test_multi_key_aggregation() {
    let storage = TestStorage::new();
    storage.json("en/x.json", &json!({"one": "1", "two": "2"}));
    storage.json("en/y.json", &json!({"three": "3"}));

    let mut dictionary = Dictionary::new("en", storage.root());
    let mut combined = dictionary.get_all(&["x", "y.three"]).unwrap();

    assert!(combined.is_loaded());
    assert_eq!(combined.len().unwrap(), 3);
    assert_eq!(combined.get("0").unwrap().as_str(), Some("1"));
    assert_eq!(combined.get("1").unwrap().as_str(), Some("2"));
    assert_eq!(combined.get("2").unwrap().as_str(), Some("3"));
}

#[test]
fn test_serialization_to_mapping() {
    let storage = setup_storage();
    let mut dictionary = Dictionary::new("en", storage.root());

    let value = dictionary.to_value().unwrap();
    assert_eq!(value["example"]["title"], json!("This is an example"));
    assert_eq!(value["test2"]["test3"]["hey"], json!("yo"));
    assert!(
        value["test1"]["example"]
            .as_str()
            .unwrap()
            .contains("Hello World")
    );
}

#[test]
fn test_first_access_is_one_shot() {
    let storage = setup_storage();
    let mut dictionary = Dictionary::new("en", storage.root());
    assert_eq!(
        dictionary.get("example.title").unwrap().as_str(),
        Some("This is an example")
    );

    // Mutating the storage after materialization must not change results.
    storage.json("en/example.json", &json!({"title": "changed"}));
    assert_eq!(
        dictionary.get("example.title").unwrap().as_str(),
        Some("This is an example")
    );
}

#[test]
fn test_toml_and_yaml_leaves() {
    let storage = TestStorage::new();
    storage.file("en/config.toml", "greeting = \"hello\"\n\n[limits]\nmax = 5\n");
    storage.file("en/meta.yaml", "author: someone\n");

    let mut dictionary = Dictionary::new("en", storage.root());
    assert_eq!(
        dictionary.get("config.greeting").unwrap().as_str(),
        Some("hello")
    );
    assert_eq!(
        dictionary.get("config.limits").unwrap().as_value(),
        Some(&json!({"max": 5}))
    );
    assert_eq!(dictionary.get("meta.author").unwrap().as_str(), Some("someone"));
}

#[test]
fn test_malformed_structured_leaf_propagates() {
    let storage = TestStorage::new();
    storage.file("en/bad.json", "{broken");

    let mut dictionary = Dictionary::new("en", storage.root());
    assert!(dictionary.get("anything").is_err());
}

#[test]
fn test_empty_directory_is_an_empty_node() {
    let storage = TestStorage::new();
    storage.dir("en/empty");

    let mut dictionary = Dictionary::new("en", storage.root());
    let empty = dictionary.get("empty").unwrap().into_node().unwrap();
    assert!(empty.is_empty().unwrap());
}

#[test]
fn test_missing_storage_root_is_silent() {
    let mut dictionary = Dictionary::new("en", "/nonexistent/storage");
    assert!(dictionary.get("anything.at.all").unwrap().is_absent());
    assert_eq!(dictionary.len().unwrap(), 0);
    assert!(dictionary.is_empty().unwrap());
}
