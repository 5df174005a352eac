use crate::document::InlineElement;

use super::ValidationError;

/// Constraint on the value bound to one attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableRule {
    /// Optional; when given it must be one of the listed values.
    OneOf(&'static [&'static str]),
    /// Must be present and non-empty; any value is accepted.
    Required,
}

/// Positional attribute schema of an inline element type.
///
/// Call arguments are bound to `attributes` in order: the first argument
/// to the first attribute, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeSchema {
    pub attributes: &'static [(&'static str, VariableRule)],
}

impl AttributeSchema {
    /// Validates `args` against the schema and applies them to `node`.
    ///
    /// Validation runs completely before anything is written, so on error
    /// `node` is left exactly as it was. Required attributes are checked
    /// before value domains. An empty optional argument leaves that
    /// attribute unchanged.
    pub fn set_attributes(
        &self,
        node: &mut InlineElement,
        args: &[&str],
    ) -> Result<(), ValidationError> {
        self.bind(node, args, self.attributes.len())
    }

    /// [`AttributeSchema::set_attributes`] for the leading attributes that
    /// `args` actually supplies. The rest are left to be filled in later, so
    /// the result may not [`match`](AttributeSchema::matches) yet.
    pub fn set_given_attributes(
        &self,
        node: &mut InlineElement,
        args: &[&str],
    ) -> Result<(), ValidationError> {
        self.bind(node, args, args.len())
    }

    /// True if `args` leaves some attribute without any argument at all.
    /// An empty string counts as given.
    pub fn is_partial(&self, args: &[&str]) -> bool {
        args.len() < self.attributes.len()
    }

    fn bind(
        &self,
        node: &mut InlineElement,
        args: &[&str],
        count: usize,
    ) -> Result<(), ValidationError> {
        let bound: Vec<(&'static str, VariableRule, &str)> = self
            .attributes
            .iter()
            .take(count)
            .enumerate()
            .map(|(i, (name, rule))| (*name, *rule, args.get(i).copied().unwrap_or("")))
            .collect();

        for &(attribute, rule, value) in &bound {
            if rule == VariableRule::Required && value.is_empty() {
                return Err(ValidationError::Required { attribute });
            }
        }
        for &(attribute, rule, value) in &bound {
            if let VariableRule::OneOf(domain) = rule
                && !value.is_empty()
                && !domain.contains(&value)
            {
                return Err(ValidationError::OutOfDomain {
                    attribute,
                    value: value.to_string(),
                });
            }
        }

        for (attribute, _, value) in bound {
            if !value.is_empty() {
                node.set_attr(attribute, value);
            }
        }
        Ok(())
    }

    /// True if `el` satisfies every rule of the schema. Elements failing this
    /// are malformed and are not treated as instances of the type.
    pub fn matches(&self, el: &InlineElement) -> bool {
        self.attributes.iter().all(|(name, rule)| match (rule, el.attr(name)) {
            (VariableRule::Required, value) => value.is_some_and(|v| !v.is_empty()),
            (VariableRule::OneOf(_), None) => true,
            (VariableRule::OneOf(domain), Some(value)) => domain.contains(&value),
        })
    }
}
