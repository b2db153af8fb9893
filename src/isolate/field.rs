use crate::error::{Error, Result};
use crate::value::ObjectHolder;

/// Reads a named field off an instance, sharing the stored value.
pub fn get(receiver: &ObjectHolder, name: &str) -> Result<ObjectHolder> {
  let obj = receiver
    .borrow()
    .ok_or_else(|| Error::runtime(format!("cannot read field '{name}' of None")))?;
  let instance = obj
    .as_instance()
    .ok_or_else(|| Error::runtime(format!("cannot read field '{name}' of a {}", obj.type_name())))?;
  instance
    .fields
    .get(name)
    .map(ObjectHolder::share)
    .ok_or_else(|| Error::runtime(format!("undefined value: {name}")))
}

/// Inserts or overwrites a named field on an instance.
pub fn set(receiver: &ObjectHolder, name: &str, value: ObjectHolder) -> Result<()> {
  let mut obj = receiver
    .borrow_mut()
    .ok_or_else(|| Error::runtime(format!("cannot set field '{name}' of None")))?;
  let instance = obj
    .as_instance_mut()
    .ok_or_else(|| Error::runtime("cannot set a field on a non-instance"))?;
  instance.fields.insert(name.to_string(), value);
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::value::{Class, ClassInstance, Object};
  use std::rc::Rc;

  #[test]
  fn set_then_get() {
    let class = Rc::new(Class::new("Point", vec![], Option::None));
    let instance = ObjectHolder::own(Object::Instance(ClassInstance::new(class)));
    set(&instance, "x", ObjectHolder::own(Object::Number(3))).unwrap();
    assert_eq!(get(&instance, "x").unwrap().as_number(), Some(3));
  }

  #[test]
  fn missing_field_is_an_error() {
    let class = Rc::new(Class::new("Point", vec![], Option::None));
    let instance = ObjectHolder::own(Object::Instance(ClassInstance::new(class)));
    assert!(get(&instance, "x").is_err());
  }

  #[test]
  fn non_instance_is_an_error() {
    let number = ObjectHolder::own(Object::Number(1));
    assert!(get(&number, "x").is_err());
    assert!(set(&number, "x", ObjectHolder::none()).is_err());
  }
}
