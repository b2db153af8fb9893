use std::rc::Rc;

use crate::ast::Stmt;

/// A class declaration: a name, its own methods in declaration order, and an
/// optional parent for single inheritance.
#[derive(Debug)]
pub struct Class {
  pub name: String,
  pub methods: Vec<Method>,
  pub parent: Option<Rc<Class>>,
}

#[derive(Debug)]
pub struct Method {
  pub name: String,
  pub params: Vec<String>,
  pub body: Rc<Stmt>,
}

impl Method {
  pub fn new(name: impl Into<String>, params: Vec<String>, body: Rc<Stmt>) -> Self {
    Self {
      name: name.into(),
      params,
      body,
    }
  }

  pub fn arity(&self) -> usize {
    self.params.len()
  }
}

impl Class {
  pub fn new(name: impl Into<String>, methods: Vec<Method>, parent: Option<Rc<Class>>) -> Self {
    Self {
      name: name.into(),
      methods,
      parent,
    }
  }

  /// Declaration-order lookup in this class, falling back to the parent only
  /// on a miss — a subclass method of the same name always wins.
  pub fn find_method(&self, name: &str) -> Option<&Method> {
    self
      .methods
      .iter()
      .find(|m| m.name == name)
      .or_else(|| self.parent.as_deref().and_then(|p| p.find_method(name)))
  }

  pub fn has_method(&self, name: &str, arity: usize) -> bool {
    matches!(self.find_method(name), Some(m) if m.arity() == arity)
  }
}
