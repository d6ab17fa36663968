//! Deserialization of baseline interchange JSON documents.
//!
//! The main entry point is [`from_document`], which takes a
//! `&serde_json::Value` and produces a [`Baseline`]. Unknown fields are
//! ignored for forward compatibility; missing required fields produce a
//! typed [`ModelError`] naming the field.

use crate::access::AccessFlags;
use crate::baseline::Baseline;
use crate::component::{ApiDescription, Component, RequiredComponent};
use crate::error::ModelError;
use crate::types::{Member, MemberKind, TypeContainer, TypeDescriptor, TypeForm};
use crate::visibility::{Annotations, Restrictions, Visibility};
use serde_json::Value;

/// Parse a baseline document from JSON text.
pub fn from_str(text: &str) -> Result<Baseline, ModelError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| ModelError::InvalidDocument(e.to_string()))?;
    from_document(&value)
}

/// Deserialize a baseline document into the typed model.
pub fn from_document(document: &Value) -> Result<Baseline, ModelError> {
    let name = document
        .get("name")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string();

    let components = document
        .get("components")
        .and_then(|v| v.as_array())
        .ok_or_else(|| {
            ModelError::InvalidDocument("missing 'components' array".to_string())
        })?;

    let mut baseline = Baseline::new(name);
    for entry in components {
        baseline.add_component(parse_component(entry)?);
    }
    Ok(baseline)
}

fn required_str(obj: &Value, field: &str, component: &str) -> Result<String, ModelError> {
    obj.get(field)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| ModelError::MissingField {
            component: component.to_string(),
            field: field.to_string(),
        })
}

fn parse_component(obj: &Value) -> Result<Component, ModelError> {
    let id = obj
        .get("id")
        .and_then(|v| v.as_str())
        .ok_or_else(|| ModelError::MissingField {
            component: "<unnamed>".to_string(),
            field: "id".to_string(),
        })?
        .to_string();
    let version = required_str(obj, "version", &id)?;

    let mut component = Component::new(id.clone(), version);
    component.system = obj.get("system").and_then(|v| v.as_bool()).unwrap_or(false);

    component.execution_environments = obj
        .get("execution_environments")
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|e| e.as_str().map(|s| s.to_string()))
                .collect()
        })
        .unwrap_or_default();

    if let Some(requires) = obj.get("requires").and_then(|v| v.as_array()) {
        for entry in requires {
            let required_id = required_str(entry, "id", &id)?;
            let exported = entry
                .get("exported")
                .and_then(|v| v.as_bool())
                .unwrap_or(false);
            component.requires.push(RequiredComponent {
                id: required_id,
                exported,
            });
        }
    }

    if let Some(containers) = obj.get("containers").and_then(|v| v.as_array()) {
        for entry in containers {
            let container =
                parse_container(entry, &id, &mut component.description)?;
            component.containers.push(container);
        }
    }

    Ok(component)
}

fn parse_container(
    obj: &Value,
    component_id: &str,
    description: &mut ApiDescription,
) -> Result<TypeContainer, ModelError> {
    let origin = obj
        .get("origin")
        .and_then(|v| v.as_str())
        .unwrap_or(component_id);
    let mut container = TypeContainer::new(origin);

    let packages = obj
        .get("packages")
        .and_then(|v| v.as_object())
        .ok_or_else(|| ModelError::MissingField {
            component: component_id.to_string(),
            field: "packages".to_string(),
        })?;

    for (package_name, package) in packages {
        let (package_visibility, package_restrictions) =
            parse_annotations(package, component_id)?;
        if package_visibility.is_some() || package_restrictions.is_some() {
            description.packages.insert(
                package_name.clone(),
                Annotations::new(
                    package_visibility.unwrap_or_default(),
                    package_restrictions.unwrap_or_default(),
                ),
            );
        }

        let types = package
            .get("types")
            .and_then(|v| v.as_array())
            .ok_or_else(|| ModelError::MissingField {
                component: component_id.to_string(),
                field: "types".to_string(),
            })?;
        for entry in types {
            let descriptor = parse_type(entry, component_id)?;
            if descriptor.package() != package_name {
                return Err(ModelError::InvalidValue {
                    component: component_id.to_string(),
                    what: "type package",
                    value: descriptor.name,
                });
            }
            let (visibility, restrictions) = parse_annotations(entry, component_id)?;
            // A partial per-type entry inherits the missing half from its
            // package default rather than shadowing it.
            if visibility.is_some() || restrictions.is_some() {
                description.types.insert(
                    descriptor.name.clone(),
                    Annotations::new(
                        visibility.or(package_visibility).unwrap_or_default(),
                        restrictions.or(package_restrictions).unwrap_or_default(),
                    ),
                );
            }
            container.push_type(descriptor);
        }
    }

    Ok(container)
}

/// Parse the optional `visibility`/`restrictions` pair of a package or type
/// entry, reporting each half only when it is explicitly present.
fn parse_annotations(
    obj: &Value,
    component_id: &str,
) -> Result<(Option<Visibility>, Option<Restrictions>), ModelError> {
    let visibility = match obj.get("visibility").and_then(|v| v.as_str()) {
        Some(name) => {
            Some(
                Visibility::from_name(name).ok_or_else(|| ModelError::InvalidValue {
                    component: component_id.to_string(),
                    what: "visibility",
                    value: name.to_string(),
                })?,
            )
        }
        None => None,
    };

    let restrictions = match obj.get("restrictions").and_then(|v| v.as_array()) {
        Some(names) => {
            let mut mask = Restrictions::NONE;
            for name in names {
                let name = name.as_str().unwrap_or("");
                mask |= Restrictions::from_name(name).ok_or_else(|| ModelError::InvalidValue {
                    component: component_id.to_string(),
                    what: "restriction",
                    value: name.to_string(),
                })?;
            }
            Some(mask)
        }
        None => None,
    };

    Ok((visibility, restrictions))
}

fn parse_modifiers(obj: &Value, component_id: &str) -> Result<AccessFlags, ModelError> {
    let mut flags = AccessFlags::NONE;
    if let Some(names) = obj.get("modifiers").and_then(|v| v.as_array()) {
        for name in names {
            let name = name.as_str().unwrap_or("");
            flags |= AccessFlags::from_name(name).ok_or_else(|| ModelError::InvalidValue {
                component: component_id.to_string(),
                what: "modifier",
                value: name.to_string(),
            })?;
        }
    }
    Ok(flags)
}

fn parse_type(obj: &Value, component_id: &str) -> Result<TypeDescriptor, ModelError> {
    let name = required_str(obj, "name", component_id)?;
    let mut descriptor = TypeDescriptor::new(name, parse_modifiers(obj, component_id)?);

    descriptor.form = match obj.get("form").and_then(|v| v.as_str()) {
        None | Some("top_level") => TypeForm::TopLevel,
        Some("member") => TypeForm::Member,
        Some("local") => TypeForm::Local,
        Some("anonymous") => TypeForm::Anonymous,
        Some(other) => {
            return Err(ModelError::InvalidValue {
                component: component_id.to_string(),
                what: "type form",
                value: other.to_string(),
            })
        }
    };

    if let Some(members) = obj.get("members").and_then(|v| v.as_array()) {
        for entry in members {
            descriptor.members.push(parse_member(entry, component_id)?);
        }
    }

    Ok(descriptor)
}

fn parse_member(obj: &Value, component_id: &str) -> Result<Member, ModelError> {
    let kind_name = required_str(obj, "kind", component_id)?;
    let kind = MemberKind::from_name(&kind_name).ok_or_else(|| ModelError::InvalidValue {
        component: component_id.to_string(),
        what: "member kind",
        value: kind_name,
    })?;

    // Constructors carry no meaningful source name; normalize to `<init>`.
    let name = match obj.get("name").and_then(|v| v.as_str()) {
        Some(name) => name.to_string(),
        None if kind == MemberKind::Constructor => "<init>".to_string(),
        None => {
            return Err(ModelError::MissingField {
                component: component_id.to_string(),
                field: "name".to_string(),
            })
        }
    };

    let signature = obj
        .get("signature")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());

    Ok(Member {
        kind,
        name,
        signature,
        modifiers: parse_modifiers(obj, component_id)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_document() -> Value {
        json!({
            "name": "2026-06",
            "components": [
                {
                    "id": "com.example.core",
                    "version": "1.2.0",
                    "execution_environments": ["JavaSE-17"],
                    "requires": [{"id": "com.example.base", "exported": true}],
                    "containers": [
                        {
                            "packages": {
                                "com.example.core": {
                                    "visibility": "api",
                                    "types": [
                                        {
                                            "name": "com.example.core.Widget",
                                            "modifiers": ["public"],
                                            "restrictions": ["no_extend"],
                                            "members": [
                                                {"kind": "method", "name": "render",
                                                 "signature": "(I)V", "modifiers": ["public"]},
                                                {"kind": "constructor", "signature": "()V",
                                                 "modifiers": ["public"]}
                                            ]
                                        },
                                        {
                                            "name": "com.example.core.Helper",
                                            "modifiers": ["public"],
                                            "visibility": "internal"
                                        }
                                    ]
                                }
                            }
                        }
                    ]
                },
                {
                    "id": "system.ee",
                    "version": "17.0.0",
                    "system": true,
                    "containers": []
                }
            ]
        })
    }

    #[test]
    fn well_formed_document_loads() {
        let baseline = from_document(&make_document()).unwrap();
        assert_eq!(baseline.name, "2026-06");
        assert_eq!(baseline.len(), 2);

        let core = baseline.component("com.example.core").unwrap();
        assert_eq!(core.version, "1.2.0");
        assert!(!core.is_system());
        assert_eq!(core.execution_environments, vec!["JavaSE-17"]);
        assert_eq!(core.requires.len(), 1);
        assert!(core.requires[0].exported);

        let widget = core
            .find_type("com.example.core.Widget", None)
            .expect("widget should load");
        assert!(widget.modifiers.is_public());
        assert_eq!(widget.members.len(), 2);
        assert_eq!(widget.members[1].name, "<init>");

        assert!(baseline.component("system.ee").unwrap().is_system());
    }

    #[test]
    fn package_defaults_and_type_overrides() {
        let baseline = from_document(&make_document()).unwrap();
        let core = baseline.component("com.example.core").unwrap();

        // restrictions-only type entry inherits the package's visibility
        let widget = core.annotations("com.example.core", "com.example.core.Widget");
        assert!(widget.visibility.is_api());
        assert!(widget.restrictions.contains(Restrictions::NO_EXTEND));

        let helper = core.annotations("com.example.core", "com.example.core.Helper");
        assert!(helper.visibility.intersects(Visibility::INTERNAL));
        assert!(!helper.visibility.is_api());
    }

    #[test]
    fn missing_components_array_is_invalid() {
        let result = from_document(&json!({"name": "x"}));
        assert!(matches!(result, Err(ModelError::InvalidDocument(_))));
    }

    #[test]
    fn missing_version_names_the_field() {
        let result = from_document(&json!({
            "components": [{"id": "a"}]
        }));
        match result {
            Err(ModelError::MissingField { component, field }) => {
                assert_eq!(component, "a");
                assert_eq!(field, "version");
            }
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn unknown_visibility_is_rejected() {
        let result = from_document(&json!({
            "components": [{
                "id": "a", "version": "1.0.0",
                "containers": [{"packages": {"p": {"visibility": "published", "types": []}}}]
            }]
        }));
        assert!(matches!(result, Err(ModelError::InvalidValue { .. })));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let baseline = from_document(&json!({
            "name": "n",
            "future_field": 42,
            "components": [{
                "id": "a", "version": "1.0.0", "favorite_color": "green"
            }]
        }))
        .unwrap();
        assert_eq!(baseline.len(), 1);
    }

    #[test]
    fn type_outside_its_package_is_rejected() {
        let result = from_document(&json!({
            "components": [{
                "id": "a", "version": "1.0.0",
                "containers": [{"packages": {"com.example": {"types": [
                    {"name": "com.elsewhere.Stray", "modifiers": ["public"]}
                ]}}}]
            }]
        }));
        assert!(matches!(
            result,
            Err(ModelError::InvalidValue {
                what: "type package",
                ..
            })
        ));
    }

    #[test]
    fn from_str_reports_parse_errors() {
        assert!(matches!(
            from_str("{not json"),
            Err(ModelError::InvalidDocument(_))
        ));
    }
}
