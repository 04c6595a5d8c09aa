use indoc::indoc;
use ormsig::emit::{JsonEmitter, RbiEmitter};
use ormsig::{base_declarations, relation_declarations, InterfaceEmitter, VersionPolicy};
use pretty_assertions::assert_eq;

fn header() -> Vec<String> {
    vec!["Generated for tests".to_string()]
}

fn render_base(version: &str) -> String {
    let policy = VersionPolicy::resolve(version).unwrap();
    let file = base_declarations(&policy, &header()).unwrap();
    RbiEmitter::new().emit(&file).unwrap()
}

fn render_relation(version: &str) -> String {
    let policy = VersionPolicy::resolve(version).unwrap();
    let file = relation_declarations(&policy, &header()).unwrap();
    RbiEmitter::new().emit(&file).unwrap()
}

#[test]
fn test_base_file_opening() {
    let rbi = render_base("6.1.0");
    let expected = indoc! {"
        # typed: strong
        # Generated for tests

        class ActiveRecord::Base
          sig { params(attributes: T.untyped).returns(T.attached_class) }
          def self.find(attributes = nil); end

          sig { params(attributes: T.untyped).returns(T.nilable(T.attached_class)) }
          def self.find_by(attributes = nil); end

          sig { params(attributes: T.untyped).returns(T.attached_class) }
          def self.find_by!(attributes = nil); end
    "};
    assert_eq!(&rbi[..expected.len()], expected);
    assert!(rbi.ends_with("end\n"));
}

#[test]
fn test_legacy_base_uses_splat() {
    let rbi = render_base("5.1.7");
    assert!(rbi.contains(
        "  sig { params(args: T.untyped).returns(T.nilable(T.attached_class)) }\n  \
         def self.find_by(*args); end\n"
    ));
    assert!(rbi.contains("def self.create!(*args, &block); end"));
    assert!(!rbi.contains("def self.build("));
}

#[test]
fn test_relation_declares_element_member_and_batches() {
    let rbi = render_relation("6.0.2");
    assert!(rbi.contains(indoc! {"
        class ActiveRecord::Relation
          Elem = type_member(fixed: T.untyped)
    "}));
    assert!(rbi.contains(
        "sig { override.params(start: T.nilable(Integer), finish: T.nilable(Integer), \
         batch_size: T.nilable(Integer), error_on_ignore: T.nilable(T::Boolean), \
         block: T.nilable(T.proc.params(e: Elem).void)).returns(T::Enumerator[Elem]) }"
    ));
    assert!(rbi.contains(
        "def find_each(start: nil, finish: nil, batch_size: 1000, \
         error_on_ignore: nil, &block); end"
    ));
    assert!(rbi.contains(
        "  sig { type_parameters(:U)\
         .params(blk: T.proc.params(arg0: Elem).returns(T.type_parameter(:U)))\
         .returns(T::Array[T.type_parameter(:U)]) }\n  \
         def map(&blk); end\n"
    ));
}

#[test]
fn test_collection_proxy_masks() {
    let rbi = render_relation("6.0.2");
    assert!(rbi.contains(
        "class ActiveRecord::Associations::CollectionProxy < ActiveRecord::Relation\n  \
         Elem = type_member(fixed: T.untyped)\n\n  \
         sig { params(attributes: T.untyped, \
         block: T.nilable(T.proc.params(object: Elem).void)).returns(Elem) }\n  \
         def new(attributes = nil, &block); end\n"
    ));
    assert!(rbi.contains(
        "  sig { params(limit: T.untyped).returns(T.nilable(Elem)) }\n  \
         def last(limit = nil); end\n"
    ));
    assert!(rbi.contains("class ActiveRecord::AssociationRelation < ActiveRecord::Relation\n"));
}

#[test]
fn test_output_is_deterministic() {
    assert_eq!(render_relation("5.2.3"), render_relation("5.2.3"));
}

#[test]
fn test_json_matches_rbi_structure() {
    let policy = VersionPolicy::resolve("6.0.0").unwrap();
    let file = relation_declarations(&policy, &[]).unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&JsonEmitter::new().emit(&file).unwrap()).unwrap();
    let classes = value["classes"].as_array().unwrap();
    assert_eq!(classes.len(), 3);
    assert_eq!(classes[2]["superclass"], "ActiveRecord::Relation");
    assert_eq!(classes[2]["element_member"]["name"], "Elem");
}
