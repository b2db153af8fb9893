use crate::context::Context;
use crate::error::{Error, Result};
use crate::isolate::{call, truth};
use crate::value::{Object, ObjectHolder};

fn describe(h: &ObjectHolder) -> &'static str {
  h.borrow().map(|o| o.type_name()).unwrap_or("None")
}

/// `==`. Both `None` compare equal; one `None` and one value never
/// do (and isn't merely `false` — it's a comparison the language can't
/// make). A `ClassInstance` with a matching `__eq__` is asked to decide.
pub fn equal(lhs: &ObjectHolder, rhs: &ObjectHolder, ctx: &mut dyn Context) -> Result<bool> {
  if lhs.is_none() && rhs.is_none() {
    return Ok(true);
  }
  if lhs.is_none() || rhs.is_none() {
    return Err(Error::runtime(format!(
      "cannot compare objects for equality: {} and {}",
      describe(lhs),
      describe(rhs)
    )));
  }

  let l = lhs.borrow().unwrap();
  let r = rhs.borrow().unwrap();
  match (&*l, &*r) {
    (Object::Number(a), Object::Number(b)) => return Ok(a == b),
    (Object::String(a), Object::String(b)) => return Ok(a == b),
    (Object::Bool(a), Object::Bool(b)) => return Ok(a == b),
    _ => {}
  }
  let is_instance = l.as_instance().is_some();
  drop(l);
  drop(r);

  if is_instance && call::has_method(lhs, "__eq__", 1) {
    return Ok(truth::is_true(&call::invoke(lhs, "__eq__", vec![rhs.share()], ctx)?));
  }
  Err(Error::runtime(format!(
    "cannot compare objects for equality: {} and {}",
    describe(lhs),
    describe(rhs)
  )))
}

/// `<`. `False < True`; strings and numbers order naturally. No
/// `None` case exists — comparing through `None` is always an error.
pub fn less(lhs: &ObjectHolder, rhs: &ObjectHolder, ctx: &mut dyn Context) -> Result<bool> {
  let (Some(l), Some(r)) = (lhs.borrow(), rhs.borrow()) else {
    return Err(Error::runtime(format!(
      "cannot compare objects by order: {} and {}",
      describe(lhs),
      describe(rhs)
    )));
  };
  match (&*l, &*r) {
    (Object::Number(a), Object::Number(b)) => return Ok(a < b),
    (Object::String(a), Object::String(b)) => return Ok(a < b),
    (Object::Bool(a), Object::Bool(b)) => return Ok(!*a && *b),
    _ => {}
  }
  let is_instance = l.as_instance().is_some();
  drop(l);
  drop(r);

  if is_instance && call::has_method(lhs, "__lt__", 1) {
    return Ok(truth::is_true(&call::invoke(lhs, "__lt__", vec![rhs.share()], ctx)?));
  }
  Err(Error::runtime(format!(
    "cannot compare objects by order: {} and {}",
    describe(lhs),
    describe(rhs)
  )))
}

pub fn not_equal(lhs: &ObjectHolder, rhs: &ObjectHolder, ctx: &mut dyn Context) -> Result<bool> {
  Ok(!equal(lhs, rhs, ctx)?)
}

pub fn greater(lhs: &ObjectHolder, rhs: &ObjectHolder, ctx: &mut dyn Context) -> Result<bool> {
  Ok(!less(lhs, rhs, ctx)? && !equal(lhs, rhs, ctx)?)
}

pub fn less_or_equal(lhs: &ObjectHolder, rhs: &ObjectHolder, ctx: &mut dyn Context) -> Result<bool> {
  Ok(less(lhs, rhs, ctx)? || equal(lhs, rhs, ctx)?)
}

pub fn greater_or_equal(lhs: &ObjectHolder, rhs: &ObjectHolder, ctx: &mut dyn Context) -> Result<bool> {
  Ok(!less(lhs, rhs, ctx)?)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::context::BufferContext;

  #[test]
  fn numbers_and_strings() {
    let mut ctx = BufferContext::new();
    let a = ObjectHolder::own(Object::Number(1));
    let b = ObjectHolder::own(Object::Number(2));
    assert!(less(&a, &b, &mut ctx).unwrap());
    assert!(!equal(&a, &b, &mut ctx).unwrap());
    assert!(greater(&b, &a, &mut ctx).unwrap());
    assert!(less_or_equal(&a, &a, &mut ctx).unwrap());
    assert!(greater_or_equal(&b, &a, &mut ctx).unwrap());
    assert!(not_equal(&a, &b, &mut ctx).unwrap());
  }

  #[test]
  fn bool_ordering() {
    let mut ctx = BufferContext::new();
    let f = ObjectHolder::own(Object::Bool(false));
    let t = ObjectHolder::own(Object::Bool(true));
    assert!(less(&f, &t, &mut ctx).unwrap());
    assert!(!less(&t, &f, &mut ctx).unwrap());
  }

  #[test]
  fn both_none_are_equal() {
    let mut ctx = BufferContext::new();
    assert!(equal(&ObjectHolder::none(), &ObjectHolder::none(), &mut ctx).unwrap());
  }

  #[test]
  fn none_against_value_is_an_error() {
    let mut ctx = BufferContext::new();
    let n = ObjectHolder::own(Object::Number(1));
    assert!(equal(&ObjectHolder::none(), &n, &mut ctx).is_err());
    assert!(less(&ObjectHolder::none(), &n, &mut ctx).is_err());
  }

  #[test]
  fn mismatched_types_are_an_error() {
    let mut ctx = BufferContext::new();
    let n = ObjectHolder::own(Object::Number(1));
    let s = ObjectHolder::own(Object::String("1".into()));
    assert!(equal(&n, &s, &mut ctx).is_err());
  }
}
