//! Human-readable rendering of delta trees.

use strata_compare::{Delta, DeltaKind};

/// Format a delta tree as one line per leaf, sorted by (kind, flag, key):
/// `+` added, `-` removed, `~` changed, followed by element/flag, the leaf
/// key, and the owning component when known.
pub(crate) fn to_text(delta: &Delta) -> String {
    let mut lines = Vec::new();
    for leaf in delta.sorted_leaves() {
        let sign = match leaf.kind {
            DeltaKind::Added => '+',
            DeltaKind::Removed => '-',
            DeltaKind::Changed => '~',
        };
        let mut line = format!("{} {}/{} {}", sign, leaf.element_type, leaf.flag, leaf.key);
        if let Some(component_id) = &leaf.component_id {
            line.push_str(&format!(" ({})", component_id));
        }
        lines.push(line);
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_compare::{DeltaFlag, ElementType, Leaf};
    use strata_model::{AccessFlags, Restrictions};

    #[test]
    fn leaf_lines_carry_sign_and_component() {
        let delta = Delta::Group {
            children: vec![
                Delta::Leaf(Leaf {
                    component_id: Some("com.example@1.1.0".to_string()),
                    element_type: ElementType::Type,
                    kind: DeltaKind::Removed,
                    flag: DeltaFlag::ApiType,
                    restrictions: Restrictions::NONE,
                    modifiers: AccessFlags::PUBLIC,
                    type_name: Some("com.example.Foo".to_string()),
                    key: "com.example.Foo".to_string(),
                    arguments: vec![],
                }),
                Delta::Leaf(Leaf {
                    component_id: None,
                    element_type: ElementType::Baseline,
                    kind: DeltaKind::Added,
                    flag: DeltaFlag::ApiComponent,
                    restrictions: Restrictions::NONE,
                    modifiers: AccessFlags::NONE,
                    type_name: None,
                    key: "com.new".to_string(),
                    arguments: vec![],
                }),
            ],
        };
        let text = to_text(&delta);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "+ baseline/api_component com.new",
                "- type/api_type com.example.Foo (com.example@1.1.0)",
            ]
        );
    }
}
