use crate::context::Context;
use crate::error::Result;
use crate::isolate::call;
use crate::value::{Object, ObjectHolder};

/// Renders a value the way `print` and `str(...)` do: `None` as
/// `None`, a class instance through its `__str__` when it has one
/// (recursing into the result), and falling back to an identity string
/// otherwise.
pub fn print(holder: &ObjectHolder, ctx: &mut dyn Context) -> Result<()> {
  if holder.is_none() {
    ctx.write_str("None");
    return Ok(());
  }

  let dispatch = {
    let obj = holder.borrow().expect("checked non-None above");
    match &*obj {
      Object::Number(n) => {
        ctx.write_str(&n.to_string());
        return Ok(());
      }
      Object::String(s) => {
        ctx.write_str(s);
        return Ok(());
      }
      Object::Bool(b) => {
        ctx.write_str(if *b { "True" } else { "False" });
        return Ok(());
      }
      Object::Class(c) => {
        ctx.write_str(&format!("Class {}", c.name));
        return Ok(());
      }
      Object::Instance(inst) => inst.class.has_method("__str__", 0),
    }
  };

  if dispatch {
    let rendered = call::invoke(holder, "__str__", vec![], ctx)?;
    return print(&rendered, ctx);
  }

  let obj = holder.borrow().expect("checked non-None above");
  let instance = obj.as_instance().expect("dispatch only set for instances");
  ctx.write_str(&format!("{} object at 0x{:x}", instance.class.name, holder.identity().unwrap_or(0)));
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::context::BufferContext;
  use crate::value::{Class, ClassInstance};
  use std::rc::Rc;

  #[test]
  fn none_prints_as_none() {
    let mut ctx = BufferContext::new();
    print(&ObjectHolder::none(), &mut ctx).unwrap();
    assert_eq!(ctx.as_str(), "None");
  }

  #[test]
  fn primitives_print_bare() {
    let mut ctx = BufferContext::new();
    print(&ObjectHolder::own(Object::Number(42)), &mut ctx).unwrap();
    print(&ObjectHolder::own(Object::String(" world".into())), &mut ctx).unwrap();
    print(&ObjectHolder::own(Object::Bool(false)), &mut ctx).unwrap();
    assert_eq!(ctx.as_str(), "42 worldFalse");
  }

  #[test]
  fn instance_without_str_falls_back_to_identity() {
    let class = Rc::new(Class::new("Widget", vec![], Option::None));
    let instance = ObjectHolder::own(Object::Instance(ClassInstance::new(class)));
    let mut ctx = BufferContext::new();
    print(&instance, &mut ctx).unwrap();
    assert!(ctx.as_str().starts_with("Widget object at 0x"));
  }
}
