use crate::{Error, Result};

use std::any::Any;
use std::sync::Arc;

/// A type-erased entity instance.
///
/// Decoders hand nested entities to their parent's constructor as
/// [`Value::Entity`](super::Value::Entity); the parent downcasts them back.
#[derive(Clone)]
pub struct Instance {
    name: &'static str,
    value: Arc<dyn Any + Send + Sync>,
}

impl Instance {
    pub fn new<E: Any + Send + Sync>(name: &'static str, value: E) -> Self {
        Self {
            name,
            value: Arc::new(value),
        }
    }

    /// Name of the entity this instance was built for.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is<E: Any>(&self) -> bool {
        self.value.is::<E>()
    }

    pub fn downcast_ref<E: Any>(&self) -> Option<&E> {
        self.value.downcast_ref()
    }

    /// Recovers the owned entity.
    ///
    /// Fails if the instance holds another type or has been cloned.
    pub fn downcast<E: Any + Send + Sync>(self) -> Result<E> {
        let name = self.name;
        let value = match self.value.downcast::<E>() {
            Ok(value) => value,
            Err(value) => {
                return Err(Error::type_conversion(
                    Instance { name, value }.into(),
                    std::any::type_name::<E>(),
                ))
            }
        };

        Arc::try_unwrap(value).map_err(|value| {
            Error::type_conversion(
                Instance { name, value }.into(),
                std::any::type_name::<E>(),
            )
        })
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl core::fmt::Debug for Instance {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Instance").field(&self.name).finish()
    }
}
