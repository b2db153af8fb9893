use rustc_hash::FxHashMap;

use crate::value::holder::ObjectHolder;

/// An unordered identifier → value mapping with insertion-or-update
/// semantics. Used both as a lexical scope during statement execution
/// and, independently, as a `ClassInstance`'s field map.
pub type Closure = FxHashMap<String, ObjectHolder>;
