use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use crate::value::object::Object;

/// A handle to a runtime value, or the absence of one (a "null"
/// `ObjectHolder`, produced by e.g. a `Compound` with no `return`).
///
/// The original's owning/non-owning split existed to dodge a second atomic
/// refcount bump; `Rc` already makes that bump cheap and safe, so both
/// variants here just clone the same `Rc` — they're kept distinct so
/// `is_borrowed` can tell a fresh value from a shared binding (`self`, a
/// variable lookup) when that distinction matters to a caller.
#[derive(Clone, Debug)]
pub enum ObjectHolder {
  None,
  Owned(Rc<RefCell<Object>>),
  Borrowed(Rc<RefCell<Object>>),
}

impl Default for ObjectHolder {
  fn default() -> Self {
    ObjectHolder::None
  }
}

impl ObjectHolder {
  pub fn own(object: Object) -> Self {
    ObjectHolder::Owned(Rc::new(RefCell::new(object)))
  }

  pub fn none() -> Self {
    ObjectHolder::None
  }

  pub fn is_none(&self) -> bool {
    matches!(self, ObjectHolder::None)
  }

  pub fn is_borrowed(&self) -> bool {
    matches!(self, ObjectHolder::Borrowed(_))
  }

  fn rc(&self) -> Option<&Rc<RefCell<Object>>> {
    match self {
      ObjectHolder::None => Option::None,
      ObjectHolder::Owned(rc) | ObjectHolder::Borrowed(rc) => Some(rc),
    }
  }

  /// A new handle sharing the same underlying value — the moral equivalent
  /// of an owning handle shared with a caller.
  pub fn share(&self) -> Self {
    match self.rc() {
      Some(rc) => ObjectHolder::Borrowed(Rc::clone(rc)),
      Option::None => ObjectHolder::None,
    }
  }

  pub fn borrow(&self) -> Option<Ref<'_, Object>> {
    self.rc().map(|rc| rc.borrow())
  }

  pub fn borrow_mut(&self) -> Option<RefMut<'_, Object>> {
    self.rc().map(|rc| rc.borrow_mut())
  }

  /// Identity of the underlying allocation, used for the "print the pointer"
  /// fallback when a class instance has no `__str__`.
  pub fn identity(&self) -> Option<usize> {
    self.rc().map(|rc| Rc::as_ptr(rc) as usize)
  }

  pub fn as_number(&self) -> Option<i64> {
    self.borrow()?.as_number()
  }

  pub fn as_string(&self) -> Option<String> {
    self.borrow()?.as_string().map(str::to_owned)
  }

  pub fn as_bool(&self) -> Option<bool> {
    self.borrow()?.as_bool()
  }
}
