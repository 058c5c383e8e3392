//! Directive declarations

use crate::definition::DirectiveDefinition;
use crate::error::{Declaration, Result, Scope, ScopeSegment};
use crate::types::named_list::{Named, NamedList};
use crate::types::values::{build_input_values, require_name, InputValue};
use crate::types::DirectiveLocation;

#[derive(Debug, Clone)]
pub struct Directive {
    name: String,
    description: Option<String>,
    locations: Vec<DirectiveLocation>,
    args: NamedList<InputValue>,
}

impl Directive {
    pub(crate) fn build(def: &DirectiveDefinition) -> Result<Self> {
        let name = require_name(&def.name, &Scope::schema())?;
        let scope = Scope::from(ScopeSegment::Directive(name.to_string()));

        // Locations form a set; keep the first occurrence of each
        let mut locations = Vec::with_capacity(def.locations.len());
        for location in &def.locations {
            if !locations.contains(location) {
                locations.push(*location);
            }
        }

        Ok(Self {
            name: name.to_string(),
            description: def.description.clone(),
            locations,
            args: build_input_values(&def.args, &scope, Declaration::Argument)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn locations(&self) -> &[DirectiveLocation] {
        &self.locations
    }

    /// Whether the directive may be used at `location`
    pub fn allows(&self, location: DirectiveLocation) -> bool {
        self.locations.contains(&location)
    }

    pub fn args(&self) -> &NamedList<InputValue> {
        &self.args
    }
}

impl Named for Directive {
    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{InputValueDefinition, TypeRefDefinition};
    use crate::error::SchemaError;

    #[test]
    fn test_locations_collapse() {
        let def = DirectiveDefinition::new(
            "include",
            &[
                DirectiveLocation::Field,
                DirectiveLocation::FragmentSpread,
                DirectiveLocation::Field,
            ],
        );
        let directive = Directive::build(&def).unwrap();
        assert_eq!(
            directive.locations(),
            &[DirectiveLocation::Field, DirectiveLocation::FragmentSpread]
        );
        assert!(directive.allows(DirectiveLocation::FragmentSpread));
        assert!(!directive.allows(DirectiveLocation::Schema));
    }

    #[test]
    fn test_duplicate_argument() {
        let if_arg = || {
            InputValueDefinition::new(
                "if",
                TypeRefDefinition::non_null(TypeRefDefinition::named("Boolean")),
            )
        };
        let def = DirectiveDefinition::new("skip", &[DirectiveLocation::Field])
            .with_arg(if_arg())
            .with_arg(if_arg());
        let err = Directive::build(&def).unwrap_err();
        assert_eq!(
            err,
            SchemaError::DuplicateDeclaration {
                scope: ScopeSegment::Directive("skip".into()).into(),
                declaration: Declaration::Argument,
                name: "if".into(),
            }
        );
    }

    #[test]
    fn test_missing_name() {
        let err = Directive::build(&DirectiveDefinition::default()).unwrap_err();
        assert!(matches!(err, SchemaError::MissingRequiredField { field: "name", .. }));
    }
}
