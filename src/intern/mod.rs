//! String interning backed by a red-black tree.
//!
//! Nodes live in a pool-local arena and refer to each other by index,
//! parent links included. The pool owns the root index, so rotations that
//! move the root are never observed by callers.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use crate::Result;

const NIL: usize = usize::MAX;

/// A reference-counted, immutable string buffer.
///
/// Cloning retains the buffer and dropping releases it. Handles handed out
/// by a [`StringPool`] own their share of the buffer, so they stay valid
/// after the pool itself is dropped.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IStr(Rc<str>);

impl IStr {
    /// Duplicate `text` into a fresh buffer that belongs to no pool.
    pub fn new(text: &str) -> Self {
        IStr(Rc::from(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of live handles to this buffer, the pool's own included.
    pub fn ref_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }

    /// True when both handles share one buffer.
    pub fn ptr_eq(a: &IStr, b: &IStr) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl Deref for IStr {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for IStr {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for IStr {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for IStr {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for IStr {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl From<&str> for IStr {
    fn from(text: &str) -> Self {
        IStr::new(text)
    }
}

impl From<String> for IStr {
    fn from(text: String) -> Self {
        IStr(Rc::from(text))
    }
}

impl From<&String> for IStr {
    fn from(text: &String) -> Self {
        IStr::new(text)
    }
}

impl fmt::Debug for IStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for IStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Red,
    Black,
}

#[derive(Debug)]
struct Node {
    value: IStr,
    color: Color,
    parent: usize,
    left: usize,
    right: usize,
}

/// Deduplicating string pool.
///
/// The pool indexes strings, it does not own the handles it has given out.
/// Dropping the pool releases only its own reference to each buffer.
#[derive(Debug)]
pub struct StringPool {
    nodes: Vec<Node>,
    root: usize,
}

impl Default for StringPool {
    fn default() -> Self {
        Self::new()
    }
}

impl StringPool {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: NIL,
        }
    }

    /// Number of distinct strings in the pool.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Return the pooled handle for `text`, inserting it on first sight.
    pub fn intern(&mut self, text: &str) -> Result<IStr> {
        let mut parent = NIL;
        let mut cursor = self.root;
        let mut went_left = false;
        while cursor != NIL {
            let node = &self.nodes[cursor];
            match node.value.as_str().cmp(text) {
                Ordering::Equal => return Ok(node.value.clone()),
                Ordering::Greater => {
                    parent = cursor;
                    went_left = true;
                    cursor = node.left;
                }
                Ordering::Less => {
                    parent = cursor;
                    went_left = false;
                    cursor = node.right;
                }
            }
        }

        self.nodes.try_reserve(1)?;
        let id = self.nodes.len();
        let value = IStr::new(text);
        self.nodes.push(Node {
            value: value.clone(),
            color: Color::Red,
            parent,
            left: NIL,
            right: NIL,
        });
        if parent == NIL {
            self.root = id;
        } else if went_left {
            self.nodes[parent].left = id;
        } else {
            self.nodes[parent].right = id;
        }
        self.repair(id);
        Ok(value)
    }

    /// Look `text` up without inserting it.
    pub fn get(&self, text: &str) -> Option<IStr> {
        self.find(text).map(|id| self.nodes[id].value.clone())
    }

    pub fn contains(&self, text: &str) -> bool {
        self.find(text).is_some()
    }

    /// Longest root-to-leaf path, counted in nodes.
    pub fn height(&self) -> usize {
        let mut deepest = 0;
        let mut stack = Vec::new();
        if self.root != NIL {
            stack.push((self.root, 1));
        }
        while let Some((id, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            let node = &self.nodes[id];
            if node.left != NIL {
                stack.push((node.left, depth + 1));
            }
            if node.right != NIL {
                stack.push((node.right, depth + 1));
            }
        }
        deepest
    }

    fn find(&self, text: &str) -> Option<usize> {
        let mut cursor = self.root;
        while cursor != NIL {
            let node = &self.nodes[cursor];
            cursor = match node.value.as_str().cmp(text) {
                Ordering::Equal => return Some(cursor),
                Ordering::Greater => node.left,
                Ordering::Less => node.right,
            };
        }
        None
    }

    fn repair(&mut self, mut n: usize) {
        loop {
            let p = self.nodes[n].parent;
            if p == NIL {
                self.nodes[n].color = Color::Black;
                return;
            }
            if self.nodes[p].color == Color::Black {
                return;
            }
            // A red parent is never the root, so the grandparent exists.
            let g = self.nodes[p].parent;
            let u = if self.nodes[g].left == p {
                self.nodes[g].right
            } else {
                self.nodes[g].left
            };

            if u != NIL && self.nodes[u].color == Color::Red {
                self.nodes[p].color = Color::Black;
                self.nodes[u].color = Color::Black;
                self.nodes[g].color = Color::Red;
                n = g;
                continue;
            }

            let mut p = p;
            if n == self.nodes[p].right && p == self.nodes[g].left {
                self.rotate_left(p);
                n = p;
                p = self.nodes[n].parent;
            } else if n == self.nodes[p].left && p == self.nodes[g].right {
                self.rotate_right(p);
                n = p;
                p = self.nodes[n].parent;
            }

            if n == self.nodes[p].left {
                self.rotate_right(g);
            } else {
                self.rotate_left(g);
            }
            self.nodes[p].color = Color::Black;
            self.nodes[g].color = Color::Red;
            return;
        }
    }

    fn rotate_left(&mut self, x: usize) {
        let y = self.nodes[x].right;
        let y_left = self.nodes[y].left;
        self.nodes[x].right = y_left;
        if y_left != NIL {
            self.nodes[y_left].parent = x;
        }
        self.replace_child(x, y);
        self.nodes[y].left = x;
        self.nodes[x].parent = y;
    }

    fn rotate_right(&mut self, x: usize) {
        let y = self.nodes[x].left;
        let y_right = self.nodes[y].right;
        self.nodes[x].left = y_right;
        if y_right != NIL {
            self.nodes[y_right].parent = x;
        }
        self.replace_child(x, y);
        self.nodes[y].right = x;
        self.nodes[x].parent = y;
    }

    /// Put `new` where `old` hangs off its parent (or at the root).
    fn replace_child(&mut self, old: usize, new: usize) {
        let parent = self.nodes[old].parent;
        self.nodes[new].parent = parent;
        if parent == NIL {
            self.root = new;
        } else if self.nodes[parent].left == old {
            self.nodes[parent].left = new;
        } else {
            self.nodes[parent].right = new;
        }
    }
}
