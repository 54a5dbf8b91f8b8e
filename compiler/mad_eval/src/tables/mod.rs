//! Case-insensitive symbol tables.
//!
//! One generic [`SymbolTable`] backs all four namespaces. Records live in a
//! [`Slab`]; a hash index maps each normalized [`Name`] to its handle and an
//! insertion sequence number. Replacing or removing a record releases every
//! expression it owns through the same arena path.

use rustc_hash::FxHashMap;

use mad_ir::{
    ArenaError, Constant, Element, ExprArena, ExprId, Handle, Line, Name, Slab, SourcePos,
    Variable,
};

/// A record stored in a [`SymbolTable`].
pub trait Record {
    fn name(&self) -> &Name;

    fn pos(&self) -> SourcePos;

    /// Root expressions owned by the record, released with it.
    fn owned_exprs(&self) -> Vec<ExprId>;
}

impl Record for Constant {
    fn name(&self) -> &Name {
        &self.name
    }

    fn pos(&self) -> SourcePos {
        self.pos
    }

    fn owned_exprs(&self) -> Vec<ExprId> {
        vec![self.source]
    }
}

impl Record for Variable {
    fn name(&self) -> &Name {
        &self.name
    }

    fn pos(&self) -> SourcePos {
        self.pos
    }

    fn owned_exprs(&self) -> Vec<ExprId> {
        vec![self.expr]
    }
}

impl Record for Element {
    fn name(&self) -> &Name {
        &self.name
    }

    fn pos(&self) -> SourcePos {
        self.pos
    }

    fn owned_exprs(&self) -> Vec<ExprId> {
        Element::owned_exprs(self)
    }
}

impl Record for Line {
    fn name(&self) -> &Name {
        &self.name
    }

    fn pos(&self) -> SourcePos {
        self.pos
    }

    fn owned_exprs(&self) -> Vec<ExprId> {
        Vec::new()
    }
}

#[derive(Debug)]
struct Entry<T> {
    handle: Handle<T>,
    seq: u64,
}

/// Name-indexed pool of records of one kind.
#[derive(Debug)]
pub struct SymbolTable<T> {
    records: Slab<T>,
    index: FxHashMap<Name, Entry<T>>,
    next_seq: u64,
}

impl<T> Default for SymbolTable<T> {
    fn default() -> Self {
        SymbolTable {
            records: Slab::new(),
            index: FxHashMap::default(),
            next_seq: 0,
        }
    }
}

impl<T: Record> SymbolTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `record`, first removing any record of the same name.
    ///
    /// Returns whether a record was replaced.
    pub fn insert(&mut self, record: T, exprs: &mut ExprArena) -> Result<bool, ArenaError> {
        let replaced = self.remove(record.name(), exprs)?;
        let name = record.name().clone();
        let handle = self.records.insert(record);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.index.insert(name, Entry { handle, seq });
        Ok(replaced)
    }

    /// Remove `name` and release everything it owns.
    pub fn remove(&mut self, name: &Name, exprs: &mut ExprArena) -> Result<bool, ArenaError> {
        let Some(entry) = self.index.remove(name) else {
            return Ok(false);
        };
        let record = self.records.remove(entry.handle)?;
        for root in record.owned_exprs() {
            exprs.release(root)?;
        }
        Ok(true)
    }

    #[inline]
    pub fn get(&self, name: &Name) -> Option<&T> {
        let entry = self.index.get(name)?;
        self.records.get(entry.handle)
    }

    pub fn get_mut(&mut self, name: &Name) -> Option<&mut T> {
        let entry = self.index.get(name)?;
        self.records.get_mut(entry.handle)
    }

    /// Look up raw, un-normalized identifier text.
    pub fn lookup(&self, raw: &str) -> Option<&T> {
        self.get(&Name::new(raw))
    }

    #[inline]
    pub fn contains(&self, name: &Name) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Records in definition order: source line, then insertion order.
    pub fn ordered(&self) -> Vec<&T> {
        let mut keyed: Vec<(u32, u64, &T)> = self
            .index
            .values()
            .filter_map(|entry| {
                let record = self.records.get(entry.handle)?;
                Some((record.pos().line, entry.seq, record))
            })
            .collect();
        keyed.sort_by_key(|&(line, seq, _)| (line, seq));
        keyed.into_iter().map(|(_, _, record)| record).collect()
    }
}

pub type ConstantTable = SymbolTable<Constant>;
pub type VariableTable = SymbolTable<Variable>;
pub type ElementTable = SymbolTable<Element>;
pub type LineTable = SymbolTable<Line>;

/// What a line entry's name refers to.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EntryTarget<'a> {
    Element(&'a Element),
    Line(&'a Line),
    Undefined,
}

/// The four namespaces.
#[derive(Debug, Default)]
pub struct SymbolTables {
    pub constants: ConstantTable,
    pub variables: VariableTable,
    pub elements: ElementTable,
    pub lines: LineTable,
}

impl SymbolTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a line member: elements take precedence over lines.
    pub fn resolve(&self, name: &Name) -> EntryTarget<'_> {
        if let Some(element) = self.elements.get(name) {
            return EntryTarget::Element(element);
        }
        match self.lines.get(name) {
            Some(line) => EntryTarget::Line(line),
            None => EntryTarget::Undefined,
        }
    }
}
