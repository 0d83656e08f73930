use super::Entity;
use crate::stmt::Instance;
use crate::Result;

use std::any::{Any, TypeId};

/// The result shapes a reader over entity `E` may declare: `E`, `Vec<E>` and
/// `Option<E>`, with the functions that assemble each from decoded instances.
#[derive(Clone, Copy)]
pub struct ReturnShapes {
    pub one: TypeId,
    pub list: TypeId,
    pub optional: TypeId,
    collect_one: fn(Instance) -> Result<Box<dyn Any>>,
    collect_list: fn(Vec<Instance>) -> Result<Box<dyn Any>>,
    collect_optional: fn(Option<Instance>) -> Result<Box<dyn Any>>,
}

impl ReturnShapes {
    pub(super) fn of<E: Entity>() -> Self {
        Self {
            one: TypeId::of::<E>(),
            list: TypeId::of::<Vec<E>>(),
            optional: TypeId::of::<Option<E>>(),
            collect_one: collect_one::<E>,
            collect_list: collect_list::<E>,
            collect_optional: collect_optional::<E>,
        }
    }

    pub fn collect_one(&self, instance: Instance) -> Result<Box<dyn Any>> {
        (self.collect_one)(instance)
    }

    pub fn collect_list(&self, instances: Vec<Instance>) -> Result<Box<dyn Any>> {
        (self.collect_list)(instances)
    }

    pub fn collect_optional(&self, instance: Option<Instance>) -> Result<Box<dyn Any>> {
        (self.collect_optional)(instance)
    }
}

fn collect_one<E: Entity>(instance: Instance) -> Result<Box<dyn Any>> {
    Ok(Box::new(instance.downcast::<E>()?))
}

fn collect_list<E: Entity>(instances: Vec<Instance>) -> Result<Box<dyn Any>> {
    let entities = instances
        .into_iter()
        .map(Instance::downcast::<E>)
        .collect::<Result<Vec<_>>>()?;
    Ok(Box::new(entities))
}

fn collect_optional<E: Entity>(instance: Option<Instance>) -> Result<Box<dyn Any>> {
    Ok(Box::new(instance.map(Instance::downcast::<E>).transpose()?))
}
