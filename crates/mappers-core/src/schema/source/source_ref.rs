use super::{Model, ModelId, Schema};
use crate::{Error, Result};

use std::fmt;
use std::sync::Arc;

/// A readable data source: one model of a [`Schema`].
///
/// The handle is cheap to clone. Its identity, as reported in errors, is the
/// model name.
#[derive(Clone)]
pub struct Source {
    schema: Arc<Schema>,
    id: ModelId,
}

impl Source {
    pub fn new(schema: &Arc<Schema>, id: ModelId) -> Self {
        Self {
            schema: schema.clone(),
            id,
        }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn id(&self) -> ModelId {
        self.id
    }

    /// Returns the model this source reads from.
    ///
    /// Fails when the model is not part of the schema or is abstract, since
    /// neither can produce rows.
    pub fn model(&self) -> Result<&Model> {
        let Some(model) = self.schema.model(self.id) else {
            return Err(Error::unsupported_source_kind(format!(
                "model {} is not part of the schema",
                self.id
            )));
        };

        if model.is_abstract() {
            return Err(Error::unsupported_source_kind(format!(
                "`{}` is abstract and has no rows",
                model.name
            )));
        }

        Ok(model)
    }

    pub fn name(&self) -> &str {
        self.schema
            .model(self.id)
            .map(|model| model.name.as_str())
            .unwrap_or("<unknown>")
    }

    /// Returns a source over another model of the same schema.
    pub fn related(&self, id: ModelId) -> Source {
        Source::new(&self.schema, id)
    }
}

impl PartialEq for Source {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.schema, &other.schema) && self.id == other.id
    }
}

impl Eq for Source {}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Source({})", self.name())
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
