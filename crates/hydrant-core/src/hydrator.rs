use hydrant_model::TypeRegistry;
use hydrant_types::{Entity, InputBag};

use crate::error::HydrateResult;
use crate::target::Target;

/// Populates objects from untyped input.
///
/// Implemented by the flat [`ArrayHydrator`](crate::ArrayHydrator) and by
/// document-shaped hydrators that compose it. Nested objects are built
/// through the hydrator that started the call, so a document hydrator
/// reads nested input in its own shape.
pub trait Hydrator: Send + Sync {
    /// Populate `entity` in place from `input`.
    fn hydrate_entity(&self, entity: &mut dyn Entity, input: &InputBag) -> HydrateResult<()>;

    /// Factories used to instantiate targets given by type name.
    fn registry(&self) -> &TypeRegistry;

    /// Resolve `target`, populate it, and hand it back.
    fn hydrate(&self, target: Target, input: &InputBag) -> HydrateResult<Box<dyn Entity>> {
        let mut entity = target.resolve(self.registry())?;
        self.hydrate_entity(entity.as_mut(), input)?;
        Ok(entity)
    }
}
