//! Integration tests for loading and saving batch files.

use std::fs;

use batch_model::{Document, ElementTree};
use batch_store::{BatchFile, StoreError, write_document};
use proptest::prelude::*;
use tempfile::tempdir;

fn sample_tree() -> ElementTree {
    ElementTree::new("ComponentSets")
        .with_child(
            ElementTree::new("ComponentSet")
                .with_attribute("name", "Base")
                .with_child(
                    ElementTree::new("FileSet")
                        .with_attribute("name", "Main")
                        .with_child(ElementTree::new("Value").with_text("input.xml"))
                        .with_child(
                            ElementTree::new("Value")
                                .with_attribute("name", "policy")
                                .with_text("../input/policy.xml"),
                        ),
                ),
        )
        .with_child(ElementTree::new("ComponentSet").with_attribute("name", "Empty"))
}

#[test]
fn serialized_layout() {
    let document = Document::from_tree(sample_tree());
    let xml = String::from_utf8(write_document(&document).unwrap()).unwrap();
    insta::assert_snapshot!(xml, @r#"
    <?xml version="1.0" encoding="UTF-8"?>
    <ComponentSets>
      <ComponentSet name="Base">
        <FileSet name="Main">
          <Value>input.xml</Value>
          <Value name="policy">../input/policy.xml</Value>
        </FileSet>
      </ComponentSet>
      <ComponentSet name="Empty"/>
    </ComponentSets>
    "#);
}

#[test]
fn save_then_load_preserves_structure() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("batch.xml");

    let mut file = BatchFile::create_empty("ComponentSets", &path);
    *file.document_mut() = Document::from_tree(sample_tree());
    file.save().unwrap();

    let loaded = BatchFile::load(&path).unwrap();
    assert_eq!(loaded.path(), path.as_path());
    assert_eq!(loaded.document().to_tree(), sample_tree());
}

#[test]
fn save_as_rebinds_path() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("first.xml");
    let second = dir.path().join("second.xml");

    let mut file = BatchFile::create_empty("ComponentSets", &first);
    file.save_as(&second).unwrap();

    assert!(!first.exists());
    assert!(second.exists());
    assert_eq!(file.path(), second.as_path());
}

#[test]
fn save_replaces_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("batch.xml");
    fs::write(&path, "<Old/>").unwrap();

    BatchFile::create_empty("ComponentSets", &path).save().unwrap();

    let loaded = BatchFile::load(&path).unwrap();
    assert_eq!(loaded.document().root_tag(), "ComponentSets");
}

#[test]
fn missing_file_is_not_found() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.xml");

    let error = BatchFile::load(&path).unwrap_err();
    assert!(matches!(error, StoreError::NotFound { .. }));
    assert!(error.user_message().contains("missing.xml"));
    assert!(error.suggestion().is_some());
}

#[test]
fn expect_root_rejects_foreign_documents() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("other.xml");
    fs::write(&path, "<Configuration><Files/></Configuration>").unwrap();

    let file = BatchFile::load(&path).unwrap();
    let error = file.expect_root("ComponentSets").unwrap_err();
    match error {
        StoreError::UnexpectedRoot {
            expected, found, ..
        } => {
            assert_eq!(expected, "ComponentSets");
            assert_eq!(found, "Configuration");
        }
        other => panic!("unexpected error: {other}"),
    }
    file.expect_root("Configuration").unwrap();
}

fn tag() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9_]{0,8}"
}

fn element() -> impl Strategy<Value = ElementTree> {
    let leaf = (tag(), prop::option::of("[a-z0-9 ./&<>]{0,12}[a-z]"), tag(), "[a-z0-9 &\"<]{0,10}")
        .prop_map(|(tag, text, key, value)| ElementTree {
            tag,
            attributes: vec![(key, value)],
            text: text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()),
            children: Vec::new(),
        });
    leaf.prop_recursive(3, 24, 4, |inner| {
        (tag(), prop::collection::vec(inner, 0..4)).prop_map(|(tag, children)| ElementTree {
            tag,
            attributes: Vec::new(),
            text: None,
            children,
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn round_trip_preserves_tree(tree in element()) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("batch.xml");
        let mut file = BatchFile::create_empty("unused", &path);
        *file.document_mut() = Document::from_tree(tree.clone());
        file.save().unwrap();

        let loaded = BatchFile::load(&path).unwrap();
        prop_assert_eq!(loaded.document().to_tree(), tree);
    }
}
