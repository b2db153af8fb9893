use std::rc::Rc;

use crate::closure::Closure;
use crate::context::{BufferContext, Context};
use crate::error::{Error, Result};
use crate::isolate::{call, class as class_isolate, cmp, field, print, truth};
use crate::value::{Class, Object, ObjectHolder};

/// The six comparison operators, tagging `Stmt::Comparison` the way
/// the original dispatches on an operator enum rather than one node per
/// operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
  Eq,
  NotEq,
  Less,
  LessOrEq,
  Greater,
  GreaterOrEq,
}

/// The evaluation-side statement tree: one tagged union covering
/// every node kind the evaluator walks, replacing the dynamic-dispatch
/// virtual-method tree of the original with a `match` in `execute`
/// ("heterogeneous statement tree"). There is no parser in this crate
/// — trees are built directly with the constructors below, which stand in
/// for what a parser would otherwise produce.
#[derive(Debug)]
pub enum Stmt {
  Number(i64),
  StringLit(String),
  BoolLit(bool),
  NoneLit,

  Compound(Vec<Rc<Stmt>>),
  Assignment(String, Rc<Stmt>),
  VariableValue(Vec<String>),
  FieldAssignment(Rc<Stmt>, String, Rc<Stmt>),
  Print(Vec<Rc<Stmt>>),
  MethodCall(Rc<Stmt>, String, Vec<Rc<Stmt>>),
  Stringify(Rc<Stmt>),

  Add(Rc<Stmt>, Rc<Stmt>),
  Sub(Rc<Stmt>, Rc<Stmt>),
  Mult(Rc<Stmt>, Rc<Stmt>),
  Div(Rc<Stmt>, Rc<Stmt>),

  Return(Rc<Stmt>),
  IfElse(Rc<Stmt>, Rc<Stmt>, Option<Rc<Stmt>>),
  Or(Rc<Stmt>, Rc<Stmt>),
  And(Rc<Stmt>, Rc<Stmt>),
  Not(Rc<Stmt>),
  Comparison(CompareOp, Rc<Stmt>, Rc<Stmt>),

  ClassDefinition(Rc<Class>),
  NewInstance(Rc<Class>, Vec<Rc<Stmt>>),
  MethodBody(Rc<Stmt>),
}

fn describe(h: &ObjectHolder) -> &'static str {
  h.borrow().map(|o| o.type_name()).unwrap_or("None")
}

impl Stmt {
  /// Runs this node under `scope`, writing any `print` output to `ctx`.
  /// Every operand that appears more than once syntactically (both
  /// sides of a binary op, a call's receiver and its arguments) is
  /// evaluated into a local exactly once — re-evaluating it would risk
  /// double-running a side-effecting method call or field write, the
  /// latent bug in the original.
  pub fn execute(&self, scope: &mut Closure, ctx: &mut dyn Context) -> Result<ObjectHolder> {
    match self {
      Stmt::Number(n) => Ok(ObjectHolder::own(Object::Number(*n))),
      Stmt::StringLit(s) => Ok(ObjectHolder::own(Object::String(s.clone()))),
      Stmt::BoolLit(b) => Ok(ObjectHolder::own(Object::Bool(*b))),
      Stmt::NoneLit => Ok(ObjectHolder::none()),

      Stmt::Compound(stmts) => {
        for stmt in stmts {
          match stmt.as_ref() {
            Stmt::Return(_) => return stmt.execute(scope, ctx),
            Stmt::IfElse(..) => {
              let result = stmt.execute(scope, ctx)?;
              if !result.is_none() {
                return Ok(result);
              }
            }
            _ => {
              stmt.execute(scope, ctx)?;
            }
          }
        }
        Ok(ObjectHolder::none())
      }

      Stmt::Assignment(name, rhs) => {
        let value = rhs.execute(scope, ctx)?;
        scope.insert(name.clone(), value.clone());
        Ok(value)
      }

      Stmt::VariableValue(path) => {
        let mut names = path.iter();
        let first = names.next().ok_or_else(|| Error::runtime("empty variable path"))?;
        let mut current = scope
          .get(first)
          .map(ObjectHolder::share)
          .ok_or_else(|| Error::runtime(format!("undefined value: {first}")))?;
        for name in names {
          current = field::get(&current, name)?;
        }
        Ok(current)
      }

      Stmt::FieldAssignment(obj, field_name, rhs) => {
        let target = obj.execute(scope, ctx)?;
        let value = rhs.execute(scope, ctx)?;
        field::set(&target, field_name, value.clone())?;
        Ok(value)
      }

      Stmt::Print(args) => {
        for (i, arg) in args.iter().enumerate() {
          if i > 0 {
            ctx.write_char(' ');
          }
          let value = arg.execute(scope, ctx)?;
          print::print(&value, ctx)?;
        }
        ctx.write_char('\n');
        Ok(ObjectHolder::none())
      }

      Stmt::MethodCall(recv, name, args) => {
        let receiver = recv.execute(scope, ctx)?;
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
          values.push(arg.execute(scope, ctx)?);
        }
        call::invoke(&receiver, name, values, ctx)
      }

      Stmt::Stringify(inner) => {
        let value = inner.execute(scope, ctx)?;
        if value.is_none() {
          return Ok(ObjectHolder::own(Object::String("None".to_string())));
        }
        let mut buf = BufferContext::new();
        print::print(&value, &mut buf)?;
        Ok(ObjectHolder::own(Object::String(buf.into_string())))
      }

      Stmt::Add(lhs, rhs) => {
        let l = lhs.execute(scope, ctx)?;
        let r = rhs.execute(scope, ctx)?;
        if let (Some(a), Some(b)) = (l.as_number(), r.as_number()) {
          return Ok(ObjectHolder::own(Object::Number(a + b)));
        }
        if let (Some(a), Some(b)) = (l.as_string(), r.as_string()) {
          return Ok(ObjectHolder::own(Object::String(a + &b)));
        }
        if call::has_method(&l, "__add__", 1) {
          return call::invoke(&l, "__add__", vec![r.share()], ctx);
        }
        Err(Error::runtime(format!("cannot add {} and {}", describe(&l), describe(&r))))
      }

      Stmt::Sub(lhs, rhs) => {
        let l = lhs.execute(scope, ctx)?;
        let r = rhs.execute(scope, ctx)?;
        let (Some(a), Some(b)) = (l.as_number(), r.as_number()) else {
          return Err(Error::runtime(format!("cannot subtract {} and {}", describe(&l), describe(&r))));
        };
        Ok(ObjectHolder::own(Object::Number(a - b)))
      }

      Stmt::Mult(lhs, rhs) => {
        let l = lhs.execute(scope, ctx)?;
        let r = rhs.execute(scope, ctx)?;
        let (Some(a), Some(b)) = (l.as_number(), r.as_number()) else {
          return Err(Error::runtime(format!("cannot multiply {} and {}", describe(&l), describe(&r))));
        };
        Ok(ObjectHolder::own(Object::Number(a * b)))
      }

      Stmt::Div(lhs, rhs) => {
        let l = lhs.execute(scope, ctx)?;
        let r = rhs.execute(scope, ctx)?;
        let (Some(a), Some(b)) = (l.as_number(), r.as_number()) else {
          return Err(Error::runtime(format!("cannot divide {} and {}", describe(&l), describe(&r))));
        };
        if b == 0 {
          return Err(Error::runtime("division by zero"));
        }
        Ok(ObjectHolder::own(Object::Number(a / b)))
      }

      Stmt::Return(inner) => inner.execute(scope, ctx),

      Stmt::IfElse(cond, then_branch, else_branch) => {
        let c = cond.execute(scope, ctx)?;
        if truth::is_true(&c) {
          then_branch.execute(scope, ctx)
        } else if let Some(else_branch) = else_branch {
          else_branch.execute(scope, ctx)
        } else {
          Ok(ObjectHolder::none())
        }
      }

      Stmt::Or(lhs, rhs) => {
        let l = lhs.execute(scope, ctx)?;
        let result = if truth::is_true(&l) { true } else { truth::is_true(&rhs.execute(scope, ctx)?) };
        Ok(ObjectHolder::own(Object::Bool(result)))
      }

      Stmt::And(lhs, rhs) => {
        let l = lhs.execute(scope, ctx)?;
        let result = if !truth::is_true(&l) { false } else { truth::is_true(&rhs.execute(scope, ctx)?) };
        Ok(ObjectHolder::own(Object::Bool(result)))
      }

      Stmt::Not(inner) => {
        let value = inner.execute(scope, ctx)?;
        Ok(ObjectHolder::own(Object::Bool(!truth::is_true(&value))))
      }

      Stmt::Comparison(op, lhs, rhs) => {
        let l = lhs.execute(scope, ctx)?;
        let r = rhs.execute(scope, ctx)?;
        let result = match op {
          CompareOp::Eq => cmp::equal(&l, &r, ctx)?,
          CompareOp::NotEq => cmp::not_equal(&l, &r, ctx)?,
          CompareOp::Less => cmp::less(&l, &r, ctx)?,
          CompareOp::LessOrEq => cmp::less_or_equal(&l, &r, ctx)?,
          CompareOp::Greater => cmp::greater(&l, &r, ctx)?,
          CompareOp::GreaterOrEq => cmp::greater_or_equal(&l, &r, ctx)?,
        };
        Ok(ObjectHolder::own(Object::Bool(result)))
      }

      Stmt::ClassDefinition(class) => {
        let holder = ObjectHolder::own(Object::Class(Rc::clone(class)));
        scope.insert(class.name.clone(), holder.clone());
        Ok(holder)
      }

      Stmt::NewInstance(class, args) => {
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
          values.push(arg.execute(scope, ctx)?);
        }
        class_isolate::new_instance(Rc::clone(class), values, ctx)
      }

      Stmt::MethodBody(inner) => inner.execute(scope, ctx),
    }
  }
}

/// Plain constructors standing in for the parser that isn't part of this
/// crate — tests build trees with these instead of a grammar.
impl Stmt {
  pub fn number(n: i64) -> Rc<Stmt> {
    Rc::new(Stmt::Number(n))
  }

  pub fn string(s: impl Into<String>) -> Rc<Stmt> {
    Rc::new(Stmt::StringLit(s.into()))
  }

  pub fn boolean(b: bool) -> Rc<Stmt> {
    Rc::new(Stmt::BoolLit(b))
  }

  pub fn none_lit() -> Rc<Stmt> {
    Rc::new(Stmt::NoneLit)
  }

  pub fn compound(stmts: Vec<Rc<Stmt>>) -> Rc<Stmt> {
    Rc::new(Stmt::Compound(stmts))
  }

  pub fn assignment(name: impl Into<String>, rhs: Rc<Stmt>) -> Rc<Stmt> {
    Rc::new(Stmt::Assignment(name.into(), rhs))
  }

  pub fn var(name: impl Into<String>) -> Rc<Stmt> {
    Rc::new(Stmt::VariableValue(vec![name.into()]))
  }

  pub fn path(parts: Vec<String>) -> Rc<Stmt> {
    Rc::new(Stmt::VariableValue(parts))
  }

  pub fn field_assignment(obj: Rc<Stmt>, field: impl Into<String>, rhs: Rc<Stmt>) -> Rc<Stmt> {
    Rc::new(Stmt::FieldAssignment(obj, field.into(), rhs))
  }

  pub fn print(args: Vec<Rc<Stmt>>) -> Rc<Stmt> {
    Rc::new(Stmt::Print(args))
  }

  pub fn method_call(recv: Rc<Stmt>, name: impl Into<String>, args: Vec<Rc<Stmt>>) -> Rc<Stmt> {
    Rc::new(Stmt::MethodCall(recv, name.into(), args))
  }

  pub fn stringify(inner: Rc<Stmt>) -> Rc<Stmt> {
    Rc::new(Stmt::Stringify(inner))
  }

  pub fn add(lhs: Rc<Stmt>, rhs: Rc<Stmt>) -> Rc<Stmt> {
    Rc::new(Stmt::Add(lhs, rhs))
  }

  pub fn sub(lhs: Rc<Stmt>, rhs: Rc<Stmt>) -> Rc<Stmt> {
    Rc::new(Stmt::Sub(lhs, rhs))
  }

  pub fn mult(lhs: Rc<Stmt>, rhs: Rc<Stmt>) -> Rc<Stmt> {
    Rc::new(Stmt::Mult(lhs, rhs))
  }

  pub fn div(lhs: Rc<Stmt>, rhs: Rc<Stmt>) -> Rc<Stmt> {
    Rc::new(Stmt::Div(lhs, rhs))
  }

  pub fn ret(inner: Rc<Stmt>) -> Rc<Stmt> {
    Rc::new(Stmt::Return(inner))
  }

  pub fn if_else(cond: Rc<Stmt>, then_branch: Rc<Stmt>, else_branch: Option<Rc<Stmt>>) -> Rc<Stmt> {
    Rc::new(Stmt::IfElse(cond, then_branch, else_branch))
  }

  pub fn or(lhs: Rc<Stmt>, rhs: Rc<Stmt>) -> Rc<Stmt> {
    Rc::new(Stmt::Or(lhs, rhs))
  }

  pub fn and(lhs: Rc<Stmt>, rhs: Rc<Stmt>) -> Rc<Stmt> {
    Rc::new(Stmt::And(lhs, rhs))
  }

  pub fn not(inner: Rc<Stmt>) -> Rc<Stmt> {
    Rc::new(Stmt::Not(inner))
  }

  pub fn comparison(op: CompareOp, lhs: Rc<Stmt>, rhs: Rc<Stmt>) -> Rc<Stmt> {
    Rc::new(Stmt::Comparison(op, lhs, rhs))
  }

  pub fn class_definition(class: Rc<Class>) -> Rc<Stmt> {
    Rc::new(Stmt::ClassDefinition(class))
  }

  pub fn new_instance(class: Rc<Class>, args: Vec<Rc<Stmt>>) -> Rc<Stmt> {
    Rc::new(Stmt::NewInstance(class, args))
  }

  pub fn method_body(inner: Rc<Stmt>) -> Rc<Stmt> {
    Rc::new(Stmt::MethodBody(inner))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::value::{Class, ClassInstance, Method};

  fn run(stmt: &Stmt) -> (ObjectHolder, String) {
    let mut scope = Closure::default();
    let mut ctx = BufferContext::new();
    let result = stmt.execute(&mut scope, &mut ctx).unwrap();
    (result, ctx.into_string())
  }

  #[test]
  fn arithmetic_precedence_is_the_caller_s_job() {
    // print 1 + 2 * 3 -> the tree already encodes precedence.
    let tree = Stmt::print(vec![Stmt::add(Stmt::number(1), Stmt::mult(Stmt::number(2), Stmt::number(3)))]);
    let (_, out) = run(&tree);
    assert_eq!(out, "7\n");
  }

  #[test]
  fn string_concatenation() {
    // x = 'abc'; print x + 'de'.
    let mut scope = Closure::default();
    let mut ctx = BufferContext::new();
    Stmt::assignment("x", Stmt::string("abc")).execute(&mut scope, &mut ctx).unwrap();
    Stmt::print(vec![Stmt::add(Stmt::var("x"), Stmt::string("de"))])
      .execute(&mut scope, &mut ctx)
      .unwrap();
    assert_eq!(ctx.into_string(), "abcde\n");
  }

  #[test]
  fn dunder_str_is_dispatched_by_print() {
    // class X: def __str__(self): return 'hi' ; print X().
    let str_method = Method::new("__str__", vec![], Stmt::ret(Stmt::string("hi")));
    let class = Rc::new(Class::new("X", vec![str_method], None));
    let mut scope = Closure::default();
    let mut ctx = BufferContext::new();
    Stmt::assignment("x", Stmt::new_instance(class, vec![]))
      .execute(&mut scope, &mut ctx)
      .unwrap();
    Stmt::print(vec![Stmt::var("x")]).execute(&mut scope, &mut ctx).unwrap();
    assert_eq!(ctx.into_string(), "hi\n");
  }

  #[test]
  fn return_escapes_nested_if_else_through_compound() {
    // A two-level-deep if/else returns a value out to the method body:
    // the inner IfElse's non-null result propagates through
    // the outer Compound, which itself propagates through the outer IfElse.
    let inner_if = Stmt::if_else(Stmt::boolean(true), Stmt::compound(vec![Stmt::ret(Stmt::number(42))]), None);
    let outer_if = Stmt::if_else(Stmt::boolean(true), Stmt::compound(vec![inner_if]), None);
    let body = Stmt::compound(vec![outer_if, Stmt::assignment("unreached", Stmt::number(0))]);
    let (result, _) = run(&body);
    assert_eq!(result.as_number(), Some(42));
  }

  #[test]
  fn inheritance_binds_init_through_the_parent() {
    // class B(A): ... ; b = B(42); print b.v.
    let init = Method::new("__init__", vec!["v".to_string()], Stmt::field_assignment(Stmt::var("self"), "v", Stmt::var("v")));
    let a = Rc::new(Class::new("A", vec![init], None));
    let b = Rc::new(Class::new("B", vec![], Some(a)));

    let mut scope = Closure::default();
    let mut ctx = BufferContext::new();
    Stmt::assignment("b", Stmt::new_instance(b, vec![Stmt::number(42)]))
      .execute(&mut scope, &mut ctx)
      .unwrap();
    let v = Stmt::path(vec!["b".to_string(), "v".to_string()]).execute(&mut scope, &mut ctx).unwrap();
    assert_eq!(v.as_number(), Some(42));
  }

  #[test]
  fn and_or_not_always_produce_a_fresh_bool() {
    // Short-circuit: the right side of `and`/`or` must not run when the
    // left side already decides the result — if it did, this
    // would error out resolving `missing`.
    let side_effect = Stmt::method_call(Stmt::var("missing"), "boom", vec![]);
    let (result, _) = run(&Stmt::and(Stmt::boolean(false), side_effect));
    assert_eq!(result.as_bool(), Some(false));

    let (result, _) = run(&Stmt::not(Stmt::boolean(false)));
    assert_eq!(result.as_bool(), Some(true));
  }

  #[test]
  fn field_assignment_then_read_round_trips() {
    let class = Rc::new(Class::new("Point", vec![], None));
    let instance = ObjectHolder::own(Object::Instance(ClassInstance::new(class)));
    let mut scope = Closure::default();
    scope.insert("p".to_string(), instance);
    let mut ctx = BufferContext::new();
    Stmt::field_assignment(Stmt::var("p"), "x", Stmt::number(5))
      .execute(&mut scope, &mut ctx)
      .unwrap();
    let x = Stmt::path(vec!["p".to_string(), "x".to_string()]).execute(&mut scope, &mut ctx).unwrap();
    assert_eq!(x.as_number(), Some(5));
  }

  #[test]
  fn division_by_zero_is_an_error() {
    let mut scope = Closure::default();
    let mut ctx = BufferContext::new();
    assert!(Stmt::div(Stmt::number(1), Stmt::number(0)).execute(&mut scope, &mut ctx).is_err());
  }

  #[test]
  fn print_with_no_arguments_emits_only_a_newline() {
    let (_, out) = run(&Stmt::Print(vec![]));
    assert_eq!(out, "\n");
  }

  #[test]
  fn stringify_wraps_none_and_values() {
    let mut scope = Closure::default();
    let mut ctx = BufferContext::new();
    let none_str = Stmt::stringify(Stmt::none_lit()).execute(&mut scope, &mut ctx).unwrap();
    assert_eq!(none_str.as_string(), Some("None".to_string()));
    let num_str = Stmt::stringify(Stmt::number(7)).execute(&mut scope, &mut ctx).unwrap();
    assert_eq!(num_str.as_string(), Some("7".to_string()));
  }
}
