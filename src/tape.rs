//! This module defines the `Tape`, an unbounded two-way tape of binary cells.
//!
//! Cells are created lazily the first time the head steps past either boundary and are
//! never removed. They live in a chunked arena: every chunk is allocated once with a fixed
//! capacity and never grows past it, so existing cells are never moved or copied when the
//! tape grows. Neighbouring cells are linked through `CellId` indices rather than owning
//! pointers.

use crate::types::{Direction, MachineError, Symbol, BLANK};

const CHUNK_BITS: u32 = 16;
const CHUNK_CELLS: usize = 1 << CHUNK_BITS;

/// Index of a cell in the tape's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellId(u32);

impl CellId {
    #[inline]
    fn chunk(self) -> usize {
        (self.0 >> CHUNK_BITS) as usize
    }

    #[inline]
    fn slot(self) -> usize {
        self.0 as usize & (CHUNK_CELLS - 1)
    }
}

#[derive(Debug, Clone)]
struct Cell {
    value: Symbol,
    prev: Option<CellId>,
    next: Option<CellId>,
}

/// A doubly linked, lazily extended tape with a single head.
#[derive(Debug)]
pub struct Tape {
    chunks: Vec<Vec<Cell>>,
    head: CellId,
    leftmost: CellId,
    len: u64,
    grown_left: u64,
    grown_right: u64,
    offset: i64,
}

impl Tape {
    /// Creates a tape holding a single blank cell under the head.
    pub fn new() -> Self {
        let mut first = Vec::with_capacity(CHUNK_CELLS);
        first.push(Cell {
            value: BLANK,
            prev: None,
            next: None,
        });

        Self {
            chunks: vec![first],
            head: CellId(0),
            leftmost: CellId(0),
            len: 1,
            grown_left: 0,
            grown_right: 0,
            offset: 0,
        }
    }

    /// Creates a tape with arena space reserved for at least `cells` cells.
    ///
    /// The reservation only affects memory layout: the tape still starts with one cell and
    /// `len()` still counts only the cells the head has actually created.
    pub fn with_capacity(cells: usize) -> Result<Self, MachineError> {
        let mut tape = Self::new();
        let chunks = cells.div_ceil(CHUNK_CELLS);
        while tape.chunks.len() < chunks {
            let chunk = tape.new_chunk()?;
            tape.chunks.push(chunk);
        }
        Ok(tape)
    }

    /// Returns the value stored in the cell under the head.
    #[inline]
    pub fn current_value(&self) -> Symbol {
        self.cell(self.head).value
    }

    /// Overwrites the cell under the head.
    #[inline]
    pub fn write(&mut self, value: Symbol) {
        let head = self.head;
        self.cell_mut(head).value = value;
    }

    /// Moves the head one cell, creating a blank neighbour first if none exists yet.
    ///
    /// This is the only place the tape's topology changes.
    #[inline]
    pub fn move_head(&mut self, direction: Direction) -> Result<(), MachineError> {
        let head = self.head;
        match direction {
            Direction::Left => {
                self.head = match self.cell(head).prev {
                    Some(prev) => prev,
                    None => {
                        let prev = self.alloc(None, Some(head))?;
                        self.cell_mut(head).prev = Some(prev);
                        self.leftmost = prev;
                        self.grown_left += 1;
                        prev
                    }
                };
                self.offset -= 1;
            }
            Direction::Right => {
                self.head = match self.cell(head).next {
                    Some(next) => next,
                    None => {
                        let next = self.alloc(Some(head), None)?;
                        self.cell_mut(head).next = Some(next);
                        self.grown_right += 1;
                        next
                    }
                };
                self.offset += 1;
            }
        }
        Ok(())
    }

    /// Counts the cells holding `1`, walking from the leftmost cell ever created to the
    /// right boundary.
    pub fn scan_ones_from_leftmost(&self) -> u64 {
        self.iter().filter(|&value| value == 1).count() as u64
    }

    /// Returns an iterator over every cell value, left to right.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            tape: self,
            cursor: Some(self.leftmost),
        }
    }

    /// Returns the number of cells created so far.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Returns how many cells were created to the left of the starting cell.
    pub fn grown_left(&self) -> u64 {
        self.grown_left
    }

    /// Returns how many cells were created to the right of the starting cell.
    pub fn grown_right(&self) -> u64 {
        self.grown_right
    }

    /// Returns the head position relative to the starting cell.
    pub fn head_offset(&self) -> i64 {
        self.offset
    }

    /// Returns the handle of the leftmost cell ever created.
    pub fn leftmost(&self) -> CellId {
        self.leftmost
    }

    /// Returns the handle of the cell under the head.
    pub fn head(&self) -> CellId {
        self.head
    }

    #[inline]
    fn cell(&self, id: CellId) -> &Cell {
        &self.chunks[id.chunk()][id.slot()]
    }

    #[inline]
    fn cell_mut(&mut self, id: CellId) -> &mut Cell {
        &mut self.chunks[id.chunk()][id.slot()]
    }

    fn alloc(
        &mut self,
        prev: Option<CellId>,
        next: Option<CellId>,
    ) -> Result<CellId, MachineError> {
        let id = u32::try_from(self.len)
            .map(CellId)
            .map_err(|_| MachineError::TapeExhausted(self.len))?;

        if id.chunk() == self.chunks.len() {
            let chunk = self.new_chunk()?;
            self.chunks.push(chunk);
        }

        // Chunks never exceed their initial capacity, so this push cannot reallocate.
        self.chunks[id.chunk()].push(Cell {
            value: BLANK,
            prev,
            next,
        });
        self.len += 1;
        Ok(id)
    }

    fn new_chunk(&mut self) -> Result<Vec<Cell>, MachineError> {
        let len = self.len;
        let exhausted = move |_| MachineError::TapeExhausted(len);
        self.chunks.try_reserve(1).map_err(exhausted)?;

        let mut chunk = Vec::new();
        chunk.try_reserve_exact(CHUNK_CELLS).map_err(exhausted)?;
        Ok(chunk)
    }
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}

/// Left-to-right iterator over a tape's cell values.
pub struct Iter<'a> {
    tape: &'a Tape,
    cursor: Option<CellId>,
}

impl Iterator for Iter<'_> {
    type Item = Symbol;

    fn next(&mut self) -> Option<Symbol> {
        let cell = self.tape.cell(self.cursor?);
        self.cursor = cell.next;
        Some(cell.value)
    }
}
