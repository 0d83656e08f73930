use super::{FieldTy, ModelId};

/// Single-valued forward relation stored as a foreign key column.
#[derive(Debug, Clone)]
pub struct BelongsTo {
    /// Model the relation points at
    pub target: ModelId,

    /// Column holding the target's key, `<field>_id` unless configured.
    pub foreign_key: String,

    /// The `HasMany` or `HasOne` field on the target that pairs with this
    pub pair: Option<String>,
}

/// Single-valued reverse side of a `BelongsTo`.
#[derive(Debug, Clone)]
pub struct HasOne {
    pub target: ModelId,

    /// The `BelongsTo` field on the target
    pub pair: String,
}

/// Multi-valued reverse side of a `BelongsTo`.
#[derive(Debug, Clone)]
pub struct HasMany {
    pub target: ModelId,

    /// The `BelongsTo` field on the target
    pub pair: String,
}

/// Multi-valued relation through a join table.
#[derive(Debug, Clone)]
pub struct ManyToMany {
    pub target: ModelId,

    pub pair: Option<String>,
}

impl From<BelongsTo> for FieldTy {
    fn from(value: BelongsTo) -> Self {
        Self::BelongsTo(value)
    }
}

impl From<HasOne> for FieldTy {
    fn from(value: HasOne) -> Self {
        Self::HasOne(value)
    }
}

impl From<HasMany> for FieldTy {
    fn from(value: HasMany) -> Self {
        Self::HasMany(value)
    }
}

impl From<ManyToMany> for FieldTy {
    fn from(value: ManyToMany) -> Self {
        Self::ManyToMany(value)
    }
}
