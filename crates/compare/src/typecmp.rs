//! The member-level type-comparison collaborator.
//!
//! The engine pairs types by qualified name and hands each pair to a
//! [`TypeComparator`]. [`MemberComparator`] is the default implementation:
//! a member-set comparison keyed by kind, name and signature. It performs no
//! signature-internal analysis (generics, annotations); a richer comparator
//! can be injected through [`crate::CompareContext`].

use crate::delta::{Delta, DeltaFlag, DeltaKind, ElementType, Leaf};
use std::collections::BTreeMap;
use strata_model::{
    Baseline, Component, Member, MemberKind, ModelError, TypeDescriptor, Visibility,
};

/// A pair of same-named types with the context they were resolved in. The
/// target component is the provider of record, which may differ from the
/// component under comparison when the type was reached through a
/// re-export.
pub struct TypePair<'a> {
    pub reference: &'a TypeDescriptor,
    pub target: &'a TypeDescriptor,
    pub reference_component: &'a Component,
    pub target_component: &'a Component,
    pub reference_baseline: &'a Baseline,
    pub target_baseline: &'a Baseline,
}

/// Result of one type-pair comparison: the delta (if any) plus an optional
/// non-fatal diagnostic that the engine logs without failing.
pub struct TypeComparison {
    pub delta: Option<Delta>,
    pub status: Option<String>,
}

impl TypeComparison {
    pub fn none() -> TypeComparison {
        TypeComparison {
            delta: None,
            status: None,
        }
    }
}

/// Member-level comparison contract.
pub trait TypeComparator {
    fn compare(
        &self,
        pair: &TypePair<'_>,
        visibility: Visibility,
    ) -> Result<TypeComparison, ModelError>;
}

/// Default collaborator: reports members present on only one side.
pub struct MemberComparator;

impl MemberComparator {
    fn element_and_flag(kind: MemberKind) -> (ElementType, DeltaFlag) {
        match kind {
            MemberKind::Method => (ElementType::Method, DeltaFlag::Method),
            MemberKind::Constructor => (ElementType::Constructor, DeltaFlag::Constructor),
            MemberKind::Field => (ElementType::Field, DeltaFlag::Field),
            MemberKind::Type => (ElementType::TypeMember, DeltaFlag::TypeMember),
        }
    }

    /// Under an API-only mask, only accessible members take part.
    fn eligible(member: &Member, visibility: Visibility) -> bool {
        visibility != Visibility::API
            || member.modifiers.is_public()
            || member.modifiers.is_protected()
    }

    fn index<'m>(
        descriptor: &'m TypeDescriptor,
        visibility: Visibility,
    ) -> BTreeMap<(MemberKind, &'m str, &'m str), &'m Member> {
        descriptor
            .members
            .iter()
            .filter(|m| MemberComparator::eligible(m, visibility))
            .map(|m| {
                (
                    (m.kind, m.name.as_str(), m.signature.as_deref().unwrap_or("")),
                    m,
                )
            })
            .collect()
    }

    fn member_leaf(pair: &TypePair<'_>, member: &Member, kind: DeltaKind) -> Delta {
        let (element_type, flag) = MemberComparator::element_and_flag(member.kind);
        let type_name = &pair.reference.name;
        let signature = member.signature.as_deref().unwrap_or("");
        // Restrictions come from the owning type's annotations on the side
        // where the member exists.
        let annotations = match kind {
            DeltaKind::Removed => pair
                .reference_component
                .annotations(pair.reference.package(), type_name),
            _ => pair
                .target_component
                .annotations(pair.target.package(), &pair.target.name),
        };
        Delta::Leaf(Leaf {
            component_id: Some(pair.target_component.versioned_id()),
            element_type,
            kind,
            flag,
            restrictions: annotations.restrictions,
            modifiers: member.modifiers,
            type_name: Some(type_name.clone()),
            key: format!("{}#{}{}", type_name, member.name, signature),
            arguments: vec![type_name.clone(), member.name.clone()],
        })
    }
}

impl TypeComparator for MemberComparator {
    fn compare(
        &self,
        pair: &TypePair<'_>,
        visibility: Visibility,
    ) -> Result<TypeComparison, ModelError> {
        let reference_members = MemberComparator::index(pair.reference, visibility);
        let target_members = MemberComparator::index(pair.target, visibility);

        let mut children = Vec::new();
        for (key, member) in &reference_members {
            if !target_members.contains_key(key) {
                children.push(MemberComparator::member_leaf(
                    pair,
                    member,
                    DeltaKind::Removed,
                ));
            }
        }
        for (key, member) in &target_members {
            if !reference_members.contains_key(key) {
                children.push(MemberComparator::member_leaf(pair, member, DeltaKind::Added));
            }
        }

        Ok(TypeComparison {
            delta: Delta::group(children),
            status: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_model::AccessFlags;

    fn method(name: &str, signature: &str, modifiers: AccessFlags) -> Member {
        Member {
            kind: MemberKind::Method,
            name: name.to_string(),
            signature: Some(signature.to_string()),
            modifiers,
        }
    }

    fn field(name: &str, modifiers: AccessFlags) -> Member {
        Member {
            kind: MemberKind::Field,
            name: name.to_string(),
            signature: None,
            modifiers,
        }
    }

    struct Fixture {
        reference_component: Component,
        target_component: Component,
        reference_baseline: Baseline,
        target_baseline: Baseline,
    }

    impl Fixture {
        fn new() -> Fixture {
            Fixture {
                reference_component: Component::new("com.example", "1.0.0"),
                target_component: Component::new("com.example", "1.1.0"),
                reference_baseline: Baseline::new("before"),
                target_baseline: Baseline::new("after"),
            }
        }

        fn pair<'a>(
            &'a self,
            reference: &'a TypeDescriptor,
            target: &'a TypeDescriptor,
        ) -> TypePair<'a> {
            TypePair {
                reference,
                target,
                reference_component: &self.reference_component,
                target_component: &self.target_component,
                reference_baseline: &self.reference_baseline,
                target_baseline: &self.target_baseline,
            }
        }
    }

    #[test]
    fn identical_members_produce_no_delta() {
        let fixture = Fixture::new();
        let mut descriptor = TypeDescriptor::new("com.example.Foo", AccessFlags::PUBLIC);
        descriptor.members.push(method("run", "()V", AccessFlags::PUBLIC));
        let result = MemberComparator
            .compare(&fixture.pair(&descriptor, &descriptor), Visibility::ALL)
            .unwrap();
        assert!(result.delta.is_none());
        assert!(result.status.is_none());
    }

    #[test]
    fn removed_method_reported_once() {
        let fixture = Fixture::new();
        let mut before = TypeDescriptor::new("com.example.Foo", AccessFlags::PUBLIC);
        before.members.push(method("run", "()V", AccessFlags::PUBLIC));
        before.members.push(field("SIZE", AccessFlags::PUBLIC));
        let mut after = before.clone();
        after.members.remove(0);

        let result = MemberComparator
            .compare(&fixture.pair(&before, &after), Visibility::ALL)
            .unwrap();
        let delta = result.delta.expect("should report the removed method");
        let leaves = delta.sorted_leaves();
        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].kind, DeltaKind::Removed);
        assert_eq!(leaves[0].flag, DeltaFlag::Method);
        assert_eq!(leaves[0].element_type, ElementType::Method);
        assert_eq!(leaves[0].key, "com.example.Foo#run()V");
        assert_eq!(leaves[0].arguments, vec!["com.example.Foo", "run"]);
    }

    #[test]
    fn overload_with_new_signature_is_added() {
        let fixture = Fixture::new();
        let mut before = TypeDescriptor::new("com.example.Foo", AccessFlags::PUBLIC);
        before.members.push(method("run", "()V", AccessFlags::PUBLIC));
        let mut after = before.clone();
        after.members.push(method("run", "(I)V", AccessFlags::PUBLIC));

        let result = MemberComparator
            .compare(&fixture.pair(&before, &after), Visibility::ALL)
            .unwrap();
        let delta = result.delta.unwrap();
        let leaves = delta.sorted_leaves();
        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].kind, DeltaKind::Added);
        assert_eq!(leaves[0].key, "com.example.Foo#run(I)V");
    }

    #[test]
    fn api_mask_ignores_private_members() {
        let fixture = Fixture::new();
        let mut before = TypeDescriptor::new("com.example.Foo", AccessFlags::PUBLIC);
        before
            .members
            .push(method("helper", "()V", AccessFlags::PRIVATE));
        let after = TypeDescriptor::new("com.example.Foo", AccessFlags::PUBLIC);

        let result = MemberComparator
            .compare(&fixture.pair(&before, &after), Visibility::API)
            .unwrap();
        assert!(result.delta.is_none());

        // under the all-visibilities mask the private member is reported
        let result = MemberComparator
            .compare(&fixture.pair(&before, &after), Visibility::ALL)
            .unwrap();
        assert!(result.delta.is_some());
    }

    #[test]
    fn nested_type_member_uses_type_member_flag() {
        let fixture = Fixture::new();
        let mut before = TypeDescriptor::new("com.example.Foo", AccessFlags::PUBLIC);
        before.members.push(Member {
            kind: MemberKind::Type,
            name: "Inner".to_string(),
            signature: None,
            modifiers: AccessFlags::PUBLIC | AccessFlags::STATIC,
        });
        let after = TypeDescriptor::new("com.example.Foo", AccessFlags::PUBLIC);

        let result = MemberComparator
            .compare(&fixture.pair(&before, &after), Visibility::ALL)
            .unwrap();
        let delta = result.delta.unwrap();
        let leaves = delta.leaves();
        assert_eq!(leaves[0].element_type, ElementType::TypeMember);
        assert_eq!(leaves[0].flag, DeltaFlag::TypeMember);
    }
}
