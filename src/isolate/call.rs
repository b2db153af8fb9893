use std::rc::Rc;

use crate::closure::Closure;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::value::ObjectHolder;

/// Invokes `method_name` on `receiver`, which must hold a `ClassInstance`.
/// Builds a fresh activation `Closure` — `self` bound to a share of the
/// receiver, then each formal parameter bound positionally — and executes
/// the method body in it.
pub fn invoke(receiver: &ObjectHolder, method_name: &str, args: Vec<ObjectHolder>, ctx: &mut dyn Context) -> Result<ObjectHolder> {
  let class = {
    let obj = receiver
      .borrow()
      .ok_or_else(|| Error::runtime(format!("cannot call method '{method_name}' on None")))?;
    let instance = obj
      .as_instance()
      .ok_or_else(|| Error::runtime(format!("cannot call method '{method_name}' on a {}", obj.type_name())))?;
    Rc::clone(&instance.class)
  };

  let mut activation = Closure::default();
  let body = {
    let method = class
      .find_method(method_name)
      .filter(|m| m.arity() == args.len())
      .ok_or_else(|| Error::runtime(format!("there is no such method: {method_name}")))?;

    activation.insert("self".to_string(), receiver.share());
    for (param, arg) in method.params.iter().zip(args) {
      activation.insert(param.clone(), arg);
    }
    Rc::clone(&method.body)
  };

  body.execute(&mut activation, ctx)
}

pub fn has_method(receiver: &ObjectHolder, method_name: &str, arity: usize) -> bool {
  receiver
    .borrow()
    .and_then(|obj| obj.as_instance().map(|i| i.class.has_method(method_name, arity)))
    .unwrap_or(false)
}
