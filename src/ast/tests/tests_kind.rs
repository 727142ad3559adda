#![allow(clippy::unwrap_used)]

use rustc_hash::FxHashSet;

use crate::ast::NodeKind;

#[test]
fn test_tag_roundtrip_is_bijective() {
    let mut seen = FxHashSet::default();
    for &kind in NodeKind::ALL {
        let tag = kind.tag();
        assert!(seen.insert(tag), "tag `{tag}` is shared by two kinds");
        assert_eq!(NodeKind::from_tag(tag), Some(kind));
    }
    assert_eq!(seen.len(), NodeKind::ALL.len());
}

#[test]
fn test_unknown_tag_is_rejected() {
    assert_eq!(NodeKind::from_tag("not_a_real_kind"), None);
    assert_eq!(NodeKind::from_tag(""), None);
    // Tags are snake_case, never the variant name.
    assert_eq!(NodeKind::from_tag("ServiceDefinition"), None);
}

#[test]
fn test_classification_is_a_partition() {
    for &kind in NodeKind::ALL {
        let classes = [kind.is_statement(), kind.is_expression(), kind.is_declaration()];
        assert_eq!(
            classes.iter().filter(|&&c| c).count(),
            1,
            "{kind} must belong to exactly one class"
        );
    }
}

#[test]
fn test_statement_containers_are_not_expressions() {
    for &kind in NodeKind::ALL {
        if kind.is_statement_container() {
            assert!(!kind.is_expression());
        }
    }
}

#[test]
fn test_every_statement_has_a_pre_region() {
    for &kind in NodeKind::ALL {
        if kind.is_statement() {
            assert!(
                !kind.default_regions().is_empty(),
                "{kind} has no canonical whitespace table"
            );
        }
    }
}
