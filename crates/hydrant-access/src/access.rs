//! The [`FieldAccess`] capability and its implementations.

use hydrant_types::{setter_name, Entity, FieldValue, TypeError};
use tracing::trace;

use crate::error::{AccessError, AccessResult};

/// Assigns a value to a named member of an object.
pub trait FieldAccess: Send + Sync {
    fn set_field(&self, object: &mut dyn Entity, field: &str, value: FieldValue)
        -> AccessResult<()>;
}

fn map_type_error(object: &dyn Entity, field: &str, err: TypeError) -> AccessError {
    match err {
        TypeError::MissingMember(_) => AccessError::UnknownField {
            type_name: object.type_name().to_string(),
            field: field.to_string(),
        },
        source => AccessError::TypeMismatch {
            type_name: object.type_name().to_string(),
            field: field.to_string(),
            source,
        },
    }
}

/// Invokes the conventional mutator `set_<field>` only.
#[derive(Clone, Copy, Debug, Default)]
pub struct MutatorAccess;

impl FieldAccess for MutatorAccess {
    fn set_field(
        &self,
        object: &mut dyn Entity,
        field: &str,
        value: FieldValue,
    ) -> AccessResult<()> {
        object
            .invoke_setter(&setter_name(field), value)
            .map_err(|e| map_type_error(object, field, e))
    }
}

/// Writes the slot directly, bypassing any mutator.
#[derive(Clone, Copy, Debug, Default)]
pub struct SlotAccess;

impl FieldAccess for SlotAccess {
    fn set_field(
        &self,
        object: &mut dyn Entity,
        field: &str,
        value: FieldValue,
    ) -> AccessResult<()> {
        object
            .write_slot(field, value)
            .map_err(|e| map_type_error(object, field, e))
    }
}

/// Mutator first, slot fallback.
///
/// This is the default access strategy of the hydrators. The slot
/// fallback lets hydration reach members that have no public mutator.
#[derive(Clone, Copy, Debug, Default)]
pub struct PropertySetter;

impl FieldAccess for PropertySetter {
    fn set_field(
        &self,
        object: &mut dyn Entity,
        field: &str,
        value: FieldValue,
    ) -> AccessResult<()> {
        let setter = setter_name(field);
        // The mutator consumes the value, so keep a copy for the fallback.
        match object.invoke_setter(&setter, value.clone()) {
            Ok(()) => {
                trace!(type_name = object.type_name(), %setter, "assigned via mutator");
                Ok(())
            }
            Err(TypeError::MissingMember(_)) => {
                trace!(type_name = object.type_name(), field, "assigned via slot");
                SlotAccess.set_field(object, field, value)
            }
            Err(e) => Err(map_type_error(object, field, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `name` has a mutator that trims; `secret` is slot-only.
    #[derive(Clone, Debug, Default)]
    struct Account {
        name: String,
        secret: Option<String>,
        via_setter: bool,
    }

    impl Account {
        fn set_name(&mut self, name: String) {
            self.name = name.trim().to_string();
            self.via_setter = true;
        }
    }

    impl Entity for Account {
        fn type_name(&self) -> &str {
            "account"
        }

        fn invoke_setter(&mut self, setter: &str, value: FieldValue) -> Result<(), TypeError> {
            match setter {
                "set_name" => self.set_name(value.extract()?),
                _ => return Err(TypeError::MissingMember(setter.into())),
            }
            Ok(())
        }

        fn write_slot(&mut self, field: &str, value: FieldValue) -> Result<(), TypeError> {
            match field {
                "name" => self.name = value.extract()?,
                "secret" => self.secret = value.extract()?,
                _ => return Err(TypeError::MissingMember(field.into())),
            }
            Ok(())
        }

        fn read_slot(&self, field: &str) -> Option<FieldValue> {
            match field {
                "name" => Some(self.name.clone().into()),
                "secret" => Some(self.secret.clone().into()),
                _ => None,
            }
        }
    }

    #[test]
    fn property_setter_prefers_mutator() {
        let mut account = Account::default();
        PropertySetter
            .set_field(&mut account, "name", " Fred ".into())
            .unwrap();
        assert_eq!(account.name, "Fred");
        assert!(account.via_setter);
    }

    #[test]
    fn property_setter_falls_back_to_slot() {
        let mut account = Account::default();
        PropertySetter
            .set_field(&mut account, "secret", "s3cr3t".into())
            .unwrap();
        assert_eq!(account.secret.as_deref(), Some("s3cr3t"));
        assert!(!account.via_setter);
    }

    #[test]
    fn unknown_field_names_the_type() {
        let mut account = Account::default();
        let err = PropertySetter
            .set_field(&mut account, "email", "a@b.c".into())
            .unwrap_err();
        assert_eq!(
            err,
            AccessError::UnknownField {
                type_name: "account".into(),
                field: "email".into()
            }
        );
    }

    #[test]
    fn mismatched_values_are_reported() {
        let mut account = Account::default();
        let err = PropertySetter
            .set_field(&mut account, "name", FieldValue::Int(3))
            .unwrap_err();
        assert!(matches!(err, AccessError::TypeMismatch { ref field, .. } if field == "name"));
    }

    #[test]
    fn mutator_access_does_not_fall_back() {
        let mut account = Account::default();
        assert!(MutatorAccess
            .set_field(&mut account, "secret", "x".into())
            .is_err());
    }

    #[test]
    fn slot_access_bypasses_mutator() {
        let mut account = Account::default();
        SlotAccess
            .set_field(&mut account, "name", " raw ".into())
            .unwrap();
        assert_eq!(account.name, " raw ");
        assert!(!account.via_setter);
    }
}
