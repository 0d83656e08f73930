mod builder;
pub use builder::{ModelBuilder, SchemaBuilder};

mod field;
pub use field::{Field, FieldTy};

mod model;
pub use model::{Model, ModelId, ModelKind};

mod relation;
pub use relation::{BelongsTo, HasMany, HasOne, ManyToMany};

mod source_ref;
pub use source_ref::Source;

mod verify;

use std::sync::Arc;

/// Catalog of the data-source models mappers read from.
///
/// Models refer to each other through [`ModelId`]s, so relations may form
/// cycles.
#[derive(Debug, Default)]
pub struct Schema {
    models: Vec<Model>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    pub fn models(&self) -> impl Iterator<Item = &Model> {
        self.models.iter()
    }

    /// Get a model by ID
    pub fn model(&self, id: ModelId) -> Option<&Model> {
        self.models.get(id.0)
    }

    pub fn model_by_name(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|model| model.name == name)
    }

    /// Returns a readable handle on the model with the given id.
    pub fn source(self: &Arc<Self>, id: ModelId) -> Source {
        Source::new(self, id)
    }

    /// Returns a readable handle on the model with the given name.
    pub fn source_by_name(self: &Arc<Self>, name: &str) -> Option<Source> {
        self.model_by_name(name).map(|model| Source::new(self, model.id))
    }
}
