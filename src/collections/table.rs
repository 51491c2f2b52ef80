use std::fmt;

use crate::constants::TABLE_INITIAL_CAPACITY;
use crate::intern::IStr;
use crate::value::Value;
use crate::{Error, Result};

type Slot = Option<(IStr, Value)>;

/// FNV-1a, 32-bit.
pub fn fnv1a(bytes: &[u8]) -> u32 {
    let mut hash: u32 = 0x811c_9dc5;
    for &byte in bytes {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(0x0100_0193);
    }
    hash
}

/// Open-addressing hash table from interned keys to values.
///
/// Collisions are resolved by linear probing. The slot count is a power of
/// two and doubles whenever an insert would push occupancy past 3/4, so a
/// probe always reaches an empty slot.
///
/// Iteration follows slot order, not insertion order, and any growth
/// reshuffles that order. A key obtained from [`MemberTable::next`] is only
/// a valid cursor until the next insert of a new key.
pub struct MemberTable {
    slots: Vec<Slot>,
    count: usize,
}

impl Default for MemberTable {
    fn default() -> Self {
        Self::new()
    }
}

impl MemberTable {
    pub fn new() -> Self {
        let mut slots = Vec::with_capacity(TABLE_INITIAL_CAPACITY);
        slots.resize_with(TABLE_INITIAL_CAPACITY, || None);
        Self { slots, count: 0 }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of slots, occupied or not.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Insert or replace. A replaced key and value are released.
    ///
    /// Growth allocates the new slot array before moving any entry, so when
    /// it fails with [`Error::OutOfMemory`] the table is left untouched and
    /// only the pair passed in is released.
    pub fn put(&mut self, key: IStr, value: Value) -> Result<()> {
        let mut index = find_slot(&self.slots, &key);
        if let Some(entry) = &mut self.slots[index] {
            *entry = (key, value);
            return Ok(());
        }

        if self.count >= self.slots.len() * 3 / 4 {
            self.grow()?;
            index = find_slot(&self.slots, &key);
        }
        self.slots[index] = Some((key, value));
        self.count += 1;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        match &self.slots[find_slot(&self.slots, key)] {
            Some((_, value)) => Some(value),
            None => None,
        }
    }

    /// The stored key handle equal to `key`.
    pub fn get_key(&self, key: &str) -> Option<&IStr> {
        match &self.slots[find_slot(&self.slots, key)] {
            Some((stored, _)) => Some(stored),
            None => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.slots[find_slot(&self.slots, key)].is_some()
    }

    /// Key in the first occupied slot after `key`'s slot, or the first key
    /// overall when `key` is `None`. An absent `key` yields `None`.
    pub fn next(&self, key: Option<&str>) -> Option<&IStr> {
        let start = match key {
            None => 0,
            Some(key) => {
                let index = find_slot(&self.slots, key);
                self.slots[index].as_ref()?;
                index + 1
            }
        };
        self.slots[start..]
            .iter()
            .flatten()
            .map(|(key, _)| key)
            .next()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&IStr, &Value)> + '_ {
        self.slots.iter().flatten().map(|(key, value)| (key, value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &IStr> + '_ {
        self.iter().map(|(key, _)| key)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> + '_ {
        self.iter().map(|(_, value)| value)
    }

    fn grow(&mut self) -> Result<()> {
        let capacity = self
            .slots
            .len()
            .checked_mul(2)
            .ok_or(Error::OutOfMemory)?;
        let mut slots: Vec<Slot> = Vec::new();
        slots.try_reserve_exact(capacity)?;
        slots.resize_with(capacity, || None);

        for (key, value) in self.slots.drain(..).flatten() {
            let index = find_slot(&slots, &key);
            slots[index] = Some((key, value));
        }
        self.slots = slots;
        Ok(())
    }
}

fn find_slot(slots: &[Slot], key: &str) -> usize {
    let mask = slots.len() - 1;
    let mut index = fnv1a(key.as_bytes()) as usize & mask;
    loop {
        match &slots[index] {
            Some((stored, _)) if stored.as_str() != key => index = (index + 1) & mask,
            _ => return index,
        }
    }
}

impl fmt::Debug for MemberTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(text: &str) -> IStr {
        IStr::new(text)
    }

    #[rstest::rstest]
    #[case(b"", 0x811c_9dc5)]
    #[case(b"a", 0xe40c_292c)]
    #[case(b"foobar", 0xbf9c_f968)]
    fn test_fnv1a_reference_values(#[case] input: &[u8], #[case] expected: u32) {
        assert_eq!(fnv1a(input), expected);
    }

    #[rstest::rstest]
    fn test_put_and_get() {
        let mut table = MemberTable::new();
        table.put(key("a"), Value::number(1.0)).unwrap();
        table.put(key("b"), Value::boolean(true)).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("a").and_then(Value::as_f64), Some(1.0));
        assert!(table.get("b").unwrap().is_true());
        assert!(table.get("c").is_none());
        assert!(table.contains_key("a"));
    }

    #[rstest::rstest]
    fn test_put_replaces_and_releases_old_value() {
        let mut table = MemberTable::new();
        let old = Value::string("old");
        table.put(key("x"), old.clone()).unwrap();
        assert_eq!(old.ref_count(), 2);
        table.put(key("x"), Value::number(2.0)).unwrap();
        assert_eq!(old.ref_count(), 1);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("x").and_then(Value::as_f64), Some(2.0));
    }

    #[rstest::rstest]
    fn test_growth_keeps_every_entry() {
        let mut table = MemberTable::new();
        for i in 0..200 {
            table.put(key(&format!("key{i}")), Value::number(i as f64)).unwrap();
        }
        // 8 -> 16 -> 32 -> 64 -> 128 -> 256 -> 512
        assert!(table.capacity() >= 256);
        assert!(table.capacity().is_power_of_two());
        assert!(table.len() * 4 <= table.capacity() * 3);
        for i in 0..200 {
            table.put(key(&format!("key{i}")), Value::number(i as f64 * 10.0)).unwrap();
        }
        assert_eq!(table.len(), 200);
        for i in 0..200 {
            let value = table.get(&format!("key{i}")).and_then(Value::as_f64);
            assert_eq!(value, Some(i as f64 * 10.0));
        }
    }

    #[rstest::rstest]
    fn test_load_factor_triggers_growth() {
        let mut table = MemberTable::new();
        for i in 0..6 {
            table.put(key(&i.to_string()), Value::null()).unwrap();
        }
        assert_eq!(table.capacity(), 8);
        table.put(key("6"), Value::null()).unwrap();
        assert_eq!(table.capacity(), 16);
    }

    #[rstest::rstest]
    fn test_next_visits_every_key_once() {
        let mut table = MemberTable::new();
        let names: Vec<String> = (0..40).map(|i| format!("member-{i}")).collect();
        for name in &names {
            table.put(key(name), Value::null()).unwrap();
        }

        let mut seen = Vec::new();
        let mut cursor = table.next(None).cloned();
        while let Some(current) = cursor {
            seen.push(current.to_string());
            cursor = table.next(Some(&current)).cloned();
        }
        seen.sort();
        let mut expected = names.clone();
        expected.sort();
        assert_eq!(seen, expected);
    }

    #[rstest::rstest]
    fn test_next_matches_iter_order() {
        let mut table = MemberTable::new();
        for name in ["x", "y", "z", "w"] {
            table.put(key(name), Value::null()).unwrap();
        }
        let from_iter: Vec<&str> = table.keys().map(|k| k.as_str()).collect();
        let mut from_next = Vec::new();
        let mut cursor = table.next(None);
        while let Some(current) = cursor {
            from_next.push(current.as_str());
            cursor = table.next(Some(current));
        }
        assert_eq!(from_iter, from_next);
    }

    #[rstest::rstest]
    fn test_next_on_empty_and_unknown_key() {
        let mut table = MemberTable::new();
        assert!(table.next(None).is_none());
        table.put(key("only"), Value::null()).unwrap();
        assert_eq!(table.next(None).unwrap(), "only");
        assert!(table.next(Some("only")).is_none());
        assert!(table.next(Some("missing")).is_none());
    }

    #[rstest::rstest]
    fn test_drop_releases_keys_and_values() {
        let value = Value::string("payload");
        let shared_key = key("k");
        {
            let mut table = MemberTable::new();
            table.put(shared_key.clone(), value.clone()).unwrap();
            assert_eq!(value.ref_count(), 2);
            assert_eq!(shared_key.ref_count(), 2);
        }
        assert_eq!(value.ref_count(), 1);
        assert_eq!(shared_key.ref_count(), 1);
    }
}
