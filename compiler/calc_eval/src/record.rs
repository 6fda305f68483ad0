//! Record types defined from scripts with `record(name, field...)`.
//!
//! A record type is exposed as a constructor composite carrying two traits:
//! `Callable` builds an instance from positional field values, and
//! `Decomposable` splits an instance of the same type back into them.
//! Instances are composites with a `Structured` trait.

use std::any::Any;
use std::rc::Rc;

use crate::callable::{Callable, FixedCallable};
use crate::composite::{Capability, Composite, Decomposable, Structured, TraitKind};
use crate::value::{TypeDomain, TypedValue};

/// Shape of a record type.
pub struct RecordType {
    name: Rc<str>,
    fields: Rc<[Rc<str>]>,
}

impl RecordType {
    pub fn new(name: impl Into<Rc<str>>, fields: impl IntoIterator<Item = Rc<str>>) -> Rc<Self> {
        Rc::new(RecordType {
            name: name.into(),
            fields: fields.into_iter().collect(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[Rc<str>] {
        &self.fields
    }

    /// Build an instance. `values` must line up with `fields`.
    pub fn instantiate(
        self: &Rc<Self>,
        domain: &Rc<TypeDomain>,
        values: Vec<TypedValue>,
    ) -> TypedValue {
        let instance = RecordValue {
            ty: Rc::clone(self),
            values,
        };
        domain.composite(Composite::single(
            Rc::clone(&self.name),
            Capability::Structured(Rc::new(instance)),
        ))
    }

    /// Constructor composite: `Callable` + `Decomposable`.
    pub fn constructor(self: &Rc<Self>, domain: &Rc<TypeDomain>) -> TypedValue {
        let ty = Rc::clone(self);
        let ctor_domain = Rc::clone(domain);
        let arity = self.fields.len();
        let callable = FixedCallable::new(Rc::clone(&self.name), arity, 1, move |frame| {
            let values = frame.stack_mut().pop_n(arity)?;
            let instance = ty.instantiate(&ctor_domain, values);
            frame.stack_mut().push(instance);
            Ok(())
        });

        domain.composite(
            Composite::builder(Rc::clone(&self.name))
                .with(Capability::Callable(Callable::Fixed(Rc::new(callable))))
                .with(Capability::Decomposable(Rc::clone(self) as Rc<dyn Decomposable>))
                .build(),
        )
    }
}

impl Decomposable for RecordType {
    fn try_decompose(&self, value: &TypedValue, _expected: usize) -> Option<Vec<TypedValue>> {
        let composite = value.as_composite()?;
        let Some(Capability::Structured(members)) = composite.get_optional(TraitKind::Structured)
        else {
            return None;
        };
        let instance = members.as_any().downcast_ref::<RecordValue>()?;
        if std::ptr::eq(Rc::as_ptr(&instance.ty), self) {
            Some(instance.values.clone())
        } else {
            None
        }
    }
}

/// Field values of one record instance.
pub struct RecordValue {
    ty: Rc<RecordType>,
    values: Vec<TypedValue>,
}

impl RecordValue {
    pub fn record_type(&self) -> &Rc<RecordType> {
        &self.ty
    }
}

impl Structured for RecordValue {
    fn get(&self, key: &str) -> Option<TypedValue> {
        let index = self.ty.fields.iter().position(|field| &**field == key)?;
        self.values.get(index).cloned()
    }

    fn keys(&self) -> Vec<Rc<str>> {
        self.ty.fields.to_vec()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    #![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

    use super::*;
    use crate::frame::Frame;
    use crate::symbols::SymbolMap;
    use pretty_assertions::assert_eq;

    fn point_type() -> Rc<RecordType> {
        RecordType::new("Point", [Rc::from("x"), Rc::from("y")])
    }

    #[test]
    fn constructor_builds_structured_instance() {
        let domain = TypeDomain::new();
        let ctor = point_type().constructor(&domain);
        let composite = ctor.as_composite().unwrap();
        assert!(composite.has(TraitKind::Callable));
        assert!(composite.has(TraitKind::Decomposable));

        let Capability::Callable(callable) = composite.get(TraitKind::Callable).unwrap() else {
            panic!("expected callable trait");
        };
        let mut frame = Frame::new(Rc::clone(&domain), SymbolMap::top());
        frame.stack_mut().push(domain.int(1));
        frame.stack_mut().push(domain.int(2));
        callable.call(&mut frame, Some(2), Some(1)).unwrap();

        let instance = frame.stack_mut().pop().unwrap();
        assert_eq!(instance.to_string(), "Point{x=1, y=2}");
    }

    #[test]
    fn decompose_only_own_instances() {
        let domain = TypeDomain::new();
        let point = point_type();
        let other = point_type();
        let instance = point.instantiate(&domain, vec![domain.int(3), domain.int(4)]);

        let parts = point.try_decompose(&instance, 2).unwrap();
        assert_eq!(domain.as_int(&parts[0], "x").unwrap(), 3);
        assert_eq!(domain.as_int(&parts[1], "y").unwrap(), 4);

        assert!(other.try_decompose(&instance, 2).is_none());
        assert!(point.try_decompose(&domain.int(1), 2).is_none());
    }

    #[test]
    fn structured_lookup() {
        let domain = TypeDomain::new();
        let instance = point_type().instantiate(&domain, vec![domain.int(3), domain.int(4)]);
        let Some(Capability::Structured(members)) = instance
            .as_composite()
            .unwrap()
            .get_optional(TraitKind::Structured)
        else {
            panic!("expected structured trait");
        };
        assert_eq!(domain.as_int(&members.get("y").unwrap(), "y").unwrap(), 4);
        assert!(members.get("z").is_none());
    }
}
