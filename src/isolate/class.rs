use std::rc::Rc;

use crate::context::Context;
use crate::error::Result;
use crate::isolate::call;
use crate::value::{Class, ClassInstance, Object, ObjectHolder};

/// Builds a new, empty instance of `class` and, if it (or an ancestor)
/// defines `__init__` by that name, calls it with `args`. A missing
/// `__init__` is not an error — the instance is simply returned
/// uninitialized. An `__init__` that exists but doesn't accept `args.len()`
/// arguments is an error, same as calling any other method with the wrong
/// arity: `call::invoke` is the one that checks and reports it.
pub fn new_instance(class: Rc<Class>, args: Vec<ObjectHolder>, ctx: &mut dyn Context) -> Result<ObjectHolder> {
  let instance = ObjectHolder::own(Object::Instance(ClassInstance::new(Rc::clone(&class))));
  if class.find_method("__init__").is_some() {
    call::invoke(&instance, "__init__", args, ctx)?;
  }
  Ok(instance)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ast::Stmt;
  use crate::context::BufferContext;
  use crate::value::Method;

  #[test]
  fn instance_without_init_is_just_empty() {
    let class = Rc::new(Class::new("Point", vec![], Option::None));
    let mut ctx = BufferContext::new();
    let instance = new_instance(class, vec![], &mut ctx).unwrap();
    assert!(instance.borrow().unwrap().as_instance().is_some());
  }

  #[test]
  fn init_with_wrong_arity_is_an_error() {
    let init = Method::new("__init__", vec!["a".to_string(), "b".to_string()], Rc::new(Stmt::Compound(vec![])));
    let class = Rc::new(Class::new("Point", vec![init], Option::None));
    let mut ctx = BufferContext::new();
    let err = new_instance(class, vec![], &mut ctx).unwrap_err();
    assert!(err.to_string().contains("there is no such method"));
  }
}
