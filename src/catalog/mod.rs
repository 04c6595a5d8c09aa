//! Method category catalog.
//!
//! The host ORM materializes its query and builder methods at load time, so
//! nothing declares them statically. This module is the static stand-in: a
//! fixed table of method-name groups, each with the rule deciding whether a
//! name may return an absent result. [`templates`] turns an entry into
//! concrete [`MethodSpec`](crate::core::MethodSpec)s.

pub mod templates;

pub use templates::{instantiate, TemplateContext};

use crate::core::Category;

/// Nullability policy for the element-returning methods of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nullability {
    /// Bang names never return nil, plain names may. Names in `exempt`
    /// raise on a miss and are non-null without a bang.
    BangStrict { exempt: &'static [&'static str] },
    /// Every name returns a record (building one if needed).
    AlwaysPresent,
    /// The category does not return the element type directly.
    NotApplicable,
}

impl Nullability {
    pub fn is_nullable(&self, name: &str) -> bool {
        match self {
            Nullability::BangStrict { exempt } => !name.ends_with('!') && !exempt.contains(&name),
            Nullability::AlwaysPresent | Nullability::NotApplicable => false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CategoryEntry {
    pub category: Category,
    pub names: &'static [&'static str],
    pub nullability: Nullability,
}

pub static CATALOG: [CategoryEntry; 6] = [
    CategoryEntry {
        category: Category::Finder,
        names: &["find", "find_by", "find_by!"],
        nullability: Nullability::BangStrict { exempt: &["find"] },
    },
    CategoryEntry {
        category: Category::FindOrX,
        names: &[
            "find_or_initialize_by",
            "find_or_create_by",
            "find_or_create_by!",
        ],
        nullability: Nullability::AlwaysPresent,
    },
    CategoryEntry {
        category: Category::ItemAccessor,
        names: &[
            "first",
            "first!",
            "second",
            "second!",
            "third",
            "third!",
            "third_to_last",
            "third_to_last!",
            "second_to_last",
            "second_to_last!",
            "last",
            "last!",
        ],
        nullability: Nullability::BangStrict { exempt: &[] },
    },
    CategoryEntry {
        category: Category::Builder,
        names: &[
            "create",
            "create!",
            "new",
            "build",
            "first_or_create",
            "first_or_create!",
            "first_or_initialize",
        ],
        nullability: Nullability::AlwaysPresent,
    },
    CategoryEntry {
        category: Category::BatchIterator,
        names: &["find_each", "find_in_batches"],
        nullability: Nullability::NotApplicable,
    },
    CategoryEntry {
        category: Category::BooleanPredicate,
        names: &["exists?", "any?", "many?", "none?", "one?"],
        nullability: Nullability::NotApplicable,
    },
];

/// Builder names whose leading parameter follows the version policy.
pub const VERSIONED_BUILDERS: &[&str] = &["new", "build", "create", "create!"];

/// Builder names with no meaning outside an instance context.
pub const INSTANCE_ONLY_BUILDERS: &[&str] = &["build"];

/// Item accessors without their bang variants.
pub const PLAIN_ITEM_ACCESSORS: &[&str] = &[
    "first",
    "second",
    "third",
    "third_to_last",
    "second_to_last",
    "last",
];

pub fn entry(category: Category) -> &'static CategoryEntry {
    // CATALOG is indexed in Category::ALL order.
    let idx = Category::ALL
        .iter()
        .position(|c| *c == category)
        .unwrap_or_default();
    &CATALOG[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_follows_category_order() {
        for (entry, category) in CATALOG.iter().zip(Category::ALL) {
            assert_eq!(entry.category, category);
        }
        assert_eq!(entry(Category::Builder).names.len(), 7);
    }

    #[test]
    fn test_bang_strict_rule() {
        let rule = entry(Category::Finder).nullability;
        assert!(!rule.is_nullable("find"));
        assert!(rule.is_nullable("find_by"));
        assert!(!rule.is_nullable("find_by!"));

        let rule = entry(Category::ItemAccessor).nullability;
        assert!(rule.is_nullable("third_to_last"));
        assert!(!rule.is_nullable("third_to_last!"));
    }

    #[test]
    fn test_every_bang_item_has_a_plain_counterpart() {
        for entry in &CATALOG {
            for name in entry.names.iter().filter(|n| n.ends_with('!')) {
                let plain = name.trim_end_matches('!');
                assert!(entry.names.contains(&plain), "{name} has no plain form");
            }
        }
    }
}
