//! Service definitions

use indexmap::IndexMap;

use super::reference::Reference;
use crate::error::{Error, Result};
use crate::ports::is_constructible;

/// Inert blueprint for one object
///
/// Built before registration and owned by the registry afterwards. The id
/// defaults to the target type name.
///
/// ```ignore
/// let mailer = Definition::new("Mailer")?
///     .argument("transport", Reference::service("smtp")?)?
///     .argument("sender", Reference::parameter("mail.sender")?)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    type_name: String,
    id: Option<String>,
    arguments: IndexMap<String, Reference>,
    parent_id: Option<String>,
}

impl Definition {
    /// Blueprint for `type_name`, which must be in the type catalog
    pub fn new<S: Into<String>>(type_name: S) -> Result<Self> {
        let type_name = type_name.into();
        if !is_constructible(&type_name) {
            return Err(Error::invalid_definition(format!(
                "Type \"{type_name}\" does not exist"
            )));
        }
        Ok(Self {
            type_name,
            id: None,
            arguments: IndexMap::new(),
            parent_id: None,
        })
    }

    /// Blueprint for `type_name` registered under an explicit id
    pub fn with_id<T: Into<String>, I: Into<String>>(type_name: T, id: I) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(Error::invalid_definition("Definition id must not be empty"));
        }
        let mut definition = Self::new(type_name)?;
        definition.id = Some(id);
        Ok(definition)
    }

    /// Declare a named argument
    ///
    /// Names must be non-empty and declared once; re-declaration fails
    /// rather than overwriting.
    pub fn argument<S: Into<String>>(mut self, name: S, reference: Reference) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::invalid_definition(format!(
                "Argument name of type \"{}\" must not be empty",
                self.type_name
            )));
        }
        if self.arguments.contains_key(&name) {
            return Err(Error::invalid_definition(format!(
                "Argument \"{name}\" already exists"
            )));
        }
        self.arguments.insert(name, reference);
        Ok(self)
    }

    /// Inherit arguments from the definition registered as `parent_id`
    ///
    /// The parent is looked up at instantiation; only an empty id is
    /// rejected here.
    pub fn extends<S: Into<String>>(mut self, parent_id: S) -> Result<Self> {
        let parent_id = parent_id.into();
        if parent_id.is_empty() {
            return Err(Error::invalid_definition(format!(
                "Parent id of \"{}\" must not be empty",
                self.id()
            )));
        }
        self.parent_id = Some(parent_id);
        Ok(self)
    }

    /// Declared arguments in declaration order
    pub fn arguments(&self) -> &IndexMap<String, Reference> {
        &self.arguments
    }

    /// Target type name
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Registration id
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.type_name)
    }

    /// Inheritance parent, if any
    pub fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }

    /// Own arguments followed by parent arguments the child does not declare
    pub fn merged_arguments(&self, parent: Option<&Definition>) -> IndexMap<String, Reference> {
        let mut arguments = self.arguments.clone();
        if let Some(parent) = parent {
            for (name, reference) in &parent.arguments {
                arguments
                    .entry(name.clone())
                    .or_insert_with(|| reference.clone());
            }
        }
        arguments
    }
}
