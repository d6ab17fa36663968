/// All errors that can be produced while building or querying the model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The baseline document is not valid JSON or has a broken top-level
    /// structure.
    #[error("invalid baseline document: {0}")]
    InvalidDocument(String),

    /// A component entry is missing a required field.
    #[error("component '{component}' missing required field '{field}'")]
    MissingField { component: String, field: String },

    /// A component entry carries a value the model cannot interpret.
    #[error("component '{component}': invalid {what} '{value}'")]
    InvalidValue {
        component: String,
        what: &'static str,
        value: String,
    },

    /// A lookup named a component the baseline does not contain.
    #[error("unknown component: {0}")]
    UnknownComponent(String),

    /// A lookup named a type its component does not contain.
    #[error("type '{type_name}' not found in component '{component}'")]
    UnknownType {
        component: String,
        type_name: String,
    },
}
