//! Readers: functions returning a query, wrapped so that they return
//! entities.
//!
//! The result shape is the Rust type a reader produces. For a mapper of
//! entity `E` it is one of:
//!
//! * `E`: exactly one row must match,
//! * `Vec<E>`: every matching row, in order,
//! * `Option<E>`: the first matching row, if any.

use crate::Mapper;
use mappers_core::{EntityDef, Error, Projection, QuerySet, Result};

use std::any::{type_name, Any, TypeId};
use std::marker::PhantomData;
use tracing::trace;

/// Builds readers for a mapper. Returned by [`Mapper::reader`].
#[derive(Debug, Clone)]
pub struct ReaderGetter {
    mapper: Mapper,
}

/// A reader getter with an explicit result shape.
pub struct ReaderOf<R> {
    mapper: Mapper,
    _p: PhantomData<fn() -> R>,
}

/// A wrapped query function producing `R`.
pub struct Reader<F, R> {
    f: F,
    mapper: Mapper,
    shape: Shape,
    _p: PhantomData<fn() -> R>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    One,
    List,
    Optional,
}

impl ReaderGetter {
    pub(crate) fn new(mapper: Mapper) -> Self {
        Self { mapper }
    }

    /// Overrides the result shape instead of taking it from the binding.
    pub fn of<R: 'static>(self) -> ReaderOf<R> {
        ReaderOf {
            mapper: self.mapper,
            _p: PhantomData,
        }
    }

    /// Wraps `f`; the result shape is the type the reader is bound to.
    ///
    /// Fails if `R` is not the mapper's entity, a `Vec` of it or an `Option`
    /// of it.
    pub fn wrap<F, R: 'static>(self, f: F) -> Result<Reader<F, R>> {
        self.of::<R>().wrap(f)
    }
}

impl<R: 'static> ReaderOf<R> {
    pub fn wrap<F>(self, f: F) -> Result<Reader<F, R>> {
        let shape = Shape::of::<R>(self.mapper.entity())?;

        Ok(Reader {
            f,
            mapper: self.mapper,
            shape,
            _p: PhantomData,
        })
    }
}

impl<F, R: 'static> Reader<F, R> {
    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn mapper(&self) -> &Mapper {
        &self.mapper
    }

    /// Runs the wrapped function and decodes its rows into `R`.
    ///
    /// Errors of the row source, not-found included, are returned as they
    /// are.
    pub fn call<A, Q>(&self, args: A) -> Result<R>
    where
        F: Fn(A) -> Q,
        Q: QuerySet,
    {
        let projection = self.raw(args)?;
        let shapes = self.mapper.entity().shapes();

        let output = match self.shape {
            Shape::One => {
                let instance = self.mapper.decode(projection.get()?)?;
                trace!(entity = self.mapper.entity().name(), shape = ?self.shape, rows = 1, "read");
                shapes.collect_one(instance)?
            }
            Shape::List => {
                let instances = projection
                    .rows()?
                    .map(|row| self.mapper.decode(row?))
                    .collect::<Result<Vec<_>>>()?;
                trace!(
                    entity = self.mapper.entity().name(),
                    shape = ?self.shape,
                    rows = instances.len(),
                    "read"
                );
                shapes.collect_list(instances)?
            }
            Shape::Optional => {
                let instance = projection
                    .first()?
                    .map(|row| self.mapper.decode(row))
                    .transpose()?;
                trace!(
                    entity = self.mapper.entity().name(),
                    shape = ?self.shape,
                    rows = usize::from(instance.is_some()),
                    "read"
                );
                shapes.collect_optional(instance)?
            }
        };

        downcast(output, self.mapper.entity())
    }

    /// Runs the wrapped function and narrows its query to the mapper's
    /// columns, without decoding.
    pub fn raw<A, Q>(&self, args: A) -> Result<Q::Projection>
    where
        F: Fn(A) -> Q,
        Q: QuerySet,
    {
        (self.f)(args).values_list(self.mapper.columns())
    }
}

impl<F, R> std::fmt::Debug for Reader<F, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reader")
            .field("mapper", &self.mapper)
            .field("shape", &self.shape)
            .field("output", &type_name::<R>())
            .finish()
    }
}

impl Shape {
    /// Resolves the shape of `R` for readers of `entity`.
    pub fn of<R: 'static>(entity: &EntityDef) -> Result<Shape> {
        let shapes = entity.shapes();
        let ty = TypeId::of::<R>();

        if ty == shapes.one {
            Ok(Shape::One)
        } else if ty == shapes.list {
            Ok(Shape::List)
        } else if ty == shapes.optional {
            Ok(Shape::Optional)
        } else {
            Err(Error::unsupported_return_type(type_name::<R>(), entity.name()))
        }
    }
}

fn downcast<R: 'static>(output: Box<dyn Any>, entity: &EntityDef) -> Result<R> {
    output
        .downcast::<R>()
        .map(|output| *output)
        .map_err(|_| Error::unsupported_return_type(type_name::<R>(), entity.name()))
}
