// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::BTreeMap;
use std::fmt;

use num_bigint_dig::BigUint;

use crate::ciphertext::Ciphertext;

/// Protocol participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Alice,
    Bob,
    Authority,
}

/// A named value in a role's view of the run.
#[derive(Clone, PartialEq, Eq)]
pub enum Entry {
    /// Known to every participant.
    Public(BigUint),
    /// Known only to the owning role.
    Private(BigUint),
    PrivateVector(Vec<BigUint>),
    Ciphertext(Ciphertext),
    Ciphertexts(Vec<Ciphertext>),
}

impl Entry {
    pub fn is_private(&self) -> bool {
        matches!(self, Entry::Private(_) | Entry::PrivateVector(_))
    }

    /// Plaintext integers held by this entry; empty for ciphertexts.
    fn plaintexts(&self) -> &[BigUint] {
        match self {
            Entry::Public(v) | Entry::Private(v) => std::slice::from_ref(v),
            Entry::PrivateVector(vs) => vs,
            Entry::Ciphertext(_) | Entry::Ciphertexts(_) => &[],
        }
    }
}

// Private values never reach log output.
impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Public(v) => f.debug_tuple("Public").field(v).finish(),
            Entry::Private(_) => f.write_str("Private(<redacted>)"),
            Entry::PrivateVector(vs) => write!(f, "PrivateVector(<{} redacted>)", vs.len()),
            Entry::Ciphertext(c) => f.debug_tuple("Ciphertext").field(c.value()).finish(),
            Entry::Ciphertexts(cs) => f.debug_tuple("Ciphertexts").field(&cs.len()).finish(),
        }
    }
}

/// Read-only snapshot of everything one role has access to.
///
/// Built on demand by `snapshot()` on each role; mutating it has no effect on
/// the run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transcript {
    role: Role,
    entries: BTreeMap<&'static str, Entry>,
}

impl Transcript {
    pub(crate) fn new(role: Role) -> Self {
        Self { role, entries: BTreeMap::new() }
    }

    pub(crate) fn record(&mut self, name: &'static str, entry: Entry) {
        self.entries.insert(name, entry);
    }

    /// Record a ciphertext if the round that produces it has run.
    pub(crate) fn record_ciphertext(&mut self, name: &'static str, value: &Option<Ciphertext>) {
        if let Some(c) = value {
            self.record(name, Entry::Ciphertext(c.clone()));
        }
    }

    pub(crate) fn record_private(&mut self, name: &'static str, value: &Option<BigUint>) {
        if let Some(v) = value {
            self.record(name, Entry::Private(v.clone()));
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Entry)> + '_ {
        self.entries.iter().map(|(name, entry)| (*name, entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `value` appears in unencrypted form anywhere in the snapshot.
    pub fn contains_plaintext(&self, value: &BigUint) -> bool {
        self.entries.values().any(|entry| entry.plaintexts().contains(value))
    }
}
