use crate::reflect::EntityFactory;
use crate::{Resolved, ValidatedMapping};
use mappers_core::stmt::{ColumnRef, Instance, Value, ValueRecord};
use mappers_core::{Error, Result};

use std::ops::Range;

/// The columns a mapper reads and how one row of them becomes an entity.
#[derive(Debug, Clone)]
pub struct ProjectionPlan {
    columns: Vec<ColumnRef>,
    decoder: Decoder,
}

/// Rebuilds an entity, nested entities included, from one flat row.
///
/// Decoding holds no state between rows.
#[derive(Debug, Clone)]
pub struct Decoder {
    factory: EntityFactory,
    steps: Vec<Step>,
    width: usize,
}

#[derive(Debug, Clone)]
enum Step {
    /// The value at this offset of the row
    Column(usize),

    /// The entity decoded from this sub-range of the row
    Nested { range: Range<usize>, decoder: Decoder },
}

impl ProjectionPlan {
    /// Flattens `mapping` depth-first, in entity field declaration order.
    ///
    /// Columns of a nested entity are read through the relation named after
    /// the nested field.
    pub fn new(mapping: &ValidatedMapping, factory: EntityFactory) -> ProjectionPlan {
        let mut columns = vec![];
        let mut steps = Vec::with_capacity(mapping.len());

        for (field, resolved) in mapping.iter() {
            let offset = columns.len();

            match resolved {
                Resolved::Nested(mapper) => {
                    let nested = mapper.plan();
                    columns.extend(
                        nested
                            .columns
                            .iter()
                            .map(|column| column.clone().prefixed(field)),
                    );
                    steps.push(Step::Nested {
                        range: offset..columns.len(),
                        decoder: nested.decoder.clone(),
                    });
                }
                Resolved::Field(_) | Resolved::Path(_) | Resolved::Evaluated(_) => {
                    columns.extend(resolved.column());
                    steps.push(Step::Column(offset));
                }
            }
        }

        let decoder = Decoder {
            factory,
            steps,
            width: columns.len(),
        };

        ProjectionPlan { columns, decoder }
    }

    pub fn columns(&self) -> &[ColumnRef] {
        &self.columns
    }

    pub fn decoder(&self) -> &Decoder {
        &self.decoder
    }
}

impl Decoder {
    /// Number of values a row must carry.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn decode(&self, row: ValueRecord) -> Result<Instance> {
        let mut values = row.into_vec();

        if values.len() != self.width {
            return Err(Error::invalid_result(format!(
                "`{}` reads {} columns, row has {}",
                self.factory.entity(),
                self.width,
                values.len()
            )));
        }

        self.decode_slice(&mut values)
    }

    fn decode_slice(&self, row: &mut [Value]) -> Result<Instance> {
        let values = self
            .steps
            .iter()
            .map(|step| match step {
                Step::Column(offset) => Ok(row[*offset].take()),
                Step::Nested { range, decoder } => decoder
                    .decode_slice(&mut row[range.clone()])
                    .map(Value::Entity),
            })
            .collect::<Result<Vec<_>>>()?;

        self.factory.construct(values)
    }
}
