//! The shared, reference-counted JSON value.
//!
//! A [`Value`] is a handle: `clone()` retains it and dropping the handle
//! releases it. When the last handle goes away the value releases its
//! members, elements or string buffer in turn.
//!
//! Setters take the value they store by move and do not retain it, so
//! `object.set("k", Value::string("v"))` leaks nothing. Clone a value first
//! to keep a handle of your own.
//!
//! Values can be made to contain themselves. Such cycles are never freed.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use crate::collections::{ElementArray, MemberTable};
use crate::intern::IStr;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    String,
    Number,
    Object,
    Array,
    True,
    False,
    Null,
}

impl ValueType {
    pub fn name(self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Number => "number",
            ValueType::Object => "object",
            ValueType::Array => "array",
            ValueType::True => "true",
            ValueType::False => "false",
            ValueType::Null => "null",
        }
    }
}

pub(crate) enum Data {
    String(IStr),
    Number(f64),
    Object(RefCell<MemberTable>),
    Array(RefCell<ElementArray>),
    True,
    False,
    Null,
}

#[derive(Clone)]
pub struct Value(Rc<Data>);

impl Value {
    fn new(data: Data) -> Self {
        Value(Rc::new(data))
    }

    pub fn object() -> Self {
        Self::new(Data::Object(RefCell::new(MemberTable::new())))
    }

    pub fn array() -> Self {
        Self::new(Data::Array(RefCell::new(ElementArray::new())))
    }

    pub fn string(text: impl Into<IStr>) -> Self {
        Self::new(Data::String(text.into()))
    }

    pub fn number(n: f64) -> Self {
        Self::new(Data::Number(n))
    }

    pub fn null() -> Self {
        Self::new(Data::Null)
    }

    pub fn boolean(value: bool) -> Self {
        Self::new(if value { Data::True } else { Data::False })
    }

    pub(crate) fn data(&self) -> &Data {
        &self.0
    }

    pub fn value_type(&self) -> ValueType {
        match self.data() {
            Data::String(_) => ValueType::String,
            Data::Number(_) => ValueType::Number,
            Data::Object(_) => ValueType::Object,
            Data::Array(_) => ValueType::Array,
            Data::True => ValueType::True,
            Data::False => ValueType::False,
            Data::Null => ValueType::Null,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.value_type().name()
    }

    /// Number of live handles to this value.
    pub fn ref_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }

    /// True when both handles refer to the same value.
    pub fn ptr_eq(a: &Value, b: &Value) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    pub fn is_null(&self) -> bool {
        matches!(self.data(), Data::Null)
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self.data(), Data::True | Data::False)
    }

    pub fn is_true(&self) -> bool {
        matches!(self.data(), Data::True)
    }

    pub fn is_false(&self) -> bool {
        matches!(self.data(), Data::False)
    }

    pub fn is_number(&self) -> bool {
        matches!(self.data(), Data::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self.data(), Data::String(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self.data(), Data::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self.data(), Data::Array(_))
    }

    /// JavaScript truthiness: everything except `null`, `false`, `""`, `0`
    /// and NaN.
    pub fn is_truthy(&self) -> bool {
        !self.is_falsey()
    }

    pub fn is_falsey(&self) -> bool {
        match self.data() {
            Data::False | Data::Null => true,
            Data::String(text) => text.is_empty(),
            Data::Number(n) => *n == 0.0 || n.is_nan(),
            Data::Object(_) | Data::Array(_) | Data::True => false,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self.data() {
            Data::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The number, or `0.0` for any other type.
    pub fn as_number(&self) -> f64 {
        self.as_f64().unwrap_or(0.0)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.data() {
            Data::True => Some(true),
            Data::False => Some(false),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self.data() {
            Data::String(text) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn as_istr(&self) -> Option<&IStr> {
        match self.data() {
            Data::String(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<Ref<'_, MemberTable>> {
        match self.data() {
            Data::Object(table) => Some(table.borrow()),
            _ => None,
        }
    }

    pub fn as_object_mut(&self) -> Option<RefMut<'_, MemberTable>> {
        match self.data() {
            Data::Object(table) => Some(table.borrow_mut()),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<Ref<'_, ElementArray>> {
        match self.data() {
            Data::Array(items) => Some(items.borrow()),
            _ => None,
        }
    }

    pub fn as_array_mut(&self) -> Option<RefMut<'_, ElementArray>> {
        match self.data() {
            Data::Array(items) => Some(items.borrow_mut()),
            _ => None,
        }
    }

    /// Member count of an object, element count of an array, `0` otherwise.
    pub fn len(&self) -> usize {
        match self.data() {
            Data::Object(table) => table.borrow().len(),
            Data::Array(items) => items.borrow().len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn expect_object(&self, operation: &str) -> Option<&RefCell<MemberTable>> {
        match self.data() {
            Data::Object(table) => Some(table),
            _ => {
                debug_assert!(false, "{operation} called on a {} value", self.type_name());
                None
            }
        }
    }

    fn expect_array(&self, operation: &str) -> Option<&RefCell<ElementArray>> {
        match self.data() {
            Data::Array(items) => Some(items),
            _ => {
                debug_assert!(false, "{operation} called on a {} value", self.type_name());
                None
            }
        }
    }

    // Object members.

    /// A new handle to the member `key`.
    pub fn get(&self, key: &str) -> Option<Value> {
        let table = self.expect_object("get")?;
        let member = table.borrow().get(key).cloned();
        member
    }

    pub fn has(&self, key: &str) -> bool {
        self.expect_object("has")
            .is_some_and(|table| table.borrow().contains_key(key))
    }

    /// Store `value` under `key`, taking ownership of it.
    pub fn set(&self, key: impl Into<IStr>, value: Value) -> Result<&Self> {
        if let Some(table) = self.expect_object("set") {
            table.borrow_mut().put(key.into(), value)?;
        }
        Ok(self)
    }

    pub fn set_number(&self, key: impl Into<IStr>, n: f64) -> Result<&Self> {
        self.set(key, Value::number(n))
    }

    pub fn set_string(&self, key: impl Into<IStr>, text: impl Into<IStr>) -> Result<&Self> {
        self.set(key, Value::string(text))
    }

    pub fn get_number(&self, key: &str) -> f64 {
        self.get_number_or(key, 0.0)
    }

    /// The member as a number, or `default` when it is absent or not numeric.
    pub fn get_number_or(&self, key: &str, default: f64) -> f64 {
        self.get(key)
            .and_then(|member| member.as_f64())
            .unwrap_or(default)
    }

    pub fn get_string(&self, key: &str) -> Option<IStr> {
        self.get(key).and_then(|member| member.as_istr().cloned())
    }

    pub fn get_string_or(&self, key: &str, default: impl Into<IStr>) -> IStr {
        self.get_string(key).unwrap_or_else(|| default.into())
    }

    pub fn get_bool(&self, key: &str) -> bool {
        self.get_bool_or(key, false)
    }

    pub fn get_bool_or(&self, key: &str, default: bool) -> bool {
        self.get(key)
            .and_then(|member| member.as_bool())
            .unwrap_or(default)
    }

    /// True when `key` is present and holds a value of type `value_type`.
    pub fn check_type(&self, key: &str, value_type: ValueType) -> bool {
        self.get(key)
            .is_some_and(|member| member.value_type() == value_type)
    }

    /// Cursor-style key iteration in table slot order; see
    /// [`MemberTable::next`].
    pub fn next_key(&self, key: Option<&str>) -> Option<IStr> {
        let table = self.expect_object("next_key")?;
        let next = table.borrow().next(key).cloned();
        next
    }

    pub fn keys(&self) -> Vec<IStr> {
        self.expect_object("keys")
            .map(|table| table.borrow().keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn entries(&self) -> Vec<(IStr, Value)> {
        self.expect_object("entries")
            .map(|table| {
                table
                    .borrow()
                    .iter()
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    // Array elements.

    /// A new handle to element `index`; `None` past the end.
    pub fn get_index(&self, index: usize) -> Option<Value> {
        let items = self.expect_array("get_index")?;
        let element = items.borrow().get(index).cloned();
        element
    }

    pub fn get_index_number(&self, index: usize) -> f64 {
        self.get_index(index)
            .and_then(|element| element.as_f64())
            .unwrap_or(0.0)
    }

    pub fn get_index_string(&self, index: usize) -> Option<IStr> {
        self.get_index(index)
            .and_then(|element| element.as_istr().cloned())
    }

    /// Replace element `index`, taking ownership of `value`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below the array length; call
    /// [`Value::reserve`] first.
    pub fn set_index(&self, index: usize, value: Value) -> &Self {
        if let Some(items) = self.expect_array("set_index") {
            items.borrow_mut().set(index, value);
        }
        self
    }

    pub fn push(&self, value: Value) -> Result<&Self> {
        if let Some(items) = self.expect_array("push") {
            items.borrow_mut().push(value)?;
        }
        Ok(self)
    }

    pub fn push_number(&self, n: f64) -> Result<&Self> {
        self.push(Value::number(n))
    }

    pub fn push_string(&self, text: impl Into<IStr>) -> Result<&Self> {
        self.push(Value::string(text))
    }

    /// Pad the array with nulls up to `len` elements.
    pub fn reserve(&self, len: usize) -> Result<&Self> {
        if let Some(items) = self.expect_array("reserve") {
            items.borrow_mut().reserve(len, Value::null)?;
        }
        Ok(self)
    }

    /// Snapshot of the elements as new handles.
    pub fn elements(&self) -> Vec<Value> {
        self.expect_array("elements")
            .map(|items| items.borrow().iter().cloned().collect())
            .unwrap_or_default()
    }
}

impl From<MemberTable> for Value {
    fn from(table: MemberTable) -> Self {
        Value::new(Data::Object(RefCell::new(table)))
    }
}

impl From<ElementArray> for Value {
    fn from(items: ElementArray) -> Self {
        Value::new(Data::Array(RefCell::new(items)))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::number(n)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::boolean(value)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::string(text)
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::string(text)
    }
}

impl From<IStr> for Value {
    fn from(text: IStr) -> Self {
        Value::string(text)
    }
}

/// Structural equality: numbers by `==`, strings by bytes, arrays
/// element-wise and objects as unordered sets of members.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        if Value::ptr_eq(self, other) {
            return true;
        }
        match (self.data(), other.data()) {
            (Data::Null, Data::Null) | (Data::True, Data::True) | (Data::False, Data::False) => {
                true
            }
            (Data::Number(a), Data::Number(b)) => a == b,
            (Data::String(a), Data::String(b)) => a == b,
            (Data::Array(a), Data::Array(b)) => {
                let (a, b) = (a.borrow(), b.borrow());
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x == y)
            }
            (Data::Object(a), Data::Object(b)) => {
                let (a, b) = (a.borrow(), b.borrow());
                a.len() == b.len()
                    && a.iter()
                        .all(|(key, value)| b.get(key).is_some_and(|other| value == other))
            }
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.data() {
            Data::String(text) => f.debug_tuple("String").field(text).finish(),
            Data::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Data::Object(table) => f.debug_tuple("Object").field(&*table.borrow()).finish(),
            Data::Array(items) => f.debug_tuple("Array").field(&*items.borrow()).finish(),
            Data::True => f.write_str("True"),
            Data::False => f.write_str("False"),
            Data::Null => f.write_str("Null"),
        }
    }
}

/// Compact JSON text.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::encode::to_string(self))
    }
}
