//! Operand tags tracked on the simulated stack, and the variable table.

/// Number of variables, one per lowercase letter.
pub const VAR_COUNT: usize = 26;

/// Storage index of a variable, `a` = 0 through `z` = 25.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot(u8);

impl Slot {
  /// Slot for a lowercase ASCII letter; `None` for anything else.
  pub fn of(name: char) -> Option<Self> {
    name
      .is_ascii_lowercase()
      .then(|| Self(name as u8 - b'a'))
  }

  pub fn index(self) -> usize {
    usize::from(self.0)
  }

  pub fn name(self) -> char {
    char::from(b'a' + self.0)
  }

  /// Byte offset of this slot inside the table.
  pub fn offset(self) -> usize {
    self.index() * 8
  }
}

/// Compile-time stack entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
  /// A literal or the result of an operator; occupies one machine stack slot.
  Value,
  /// A variable not yet dereferenced; occupies no machine stack slot.
  Reference(Slot),
}

/// The 26 zero-initialised variables shared by every statement of one program.
///
/// The assembly renderer takes the storage symbol and size from it; the
/// interpreter keeps the live values in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarTable {
  symbol: String,
  values: [i64; VAR_COUNT],
}

impl VarTable {
  pub fn new(symbol: impl Into<String>) -> Self {
    Self {
      symbol: symbol.into(),
      values: [0; VAR_COUNT],
    }
  }

  pub fn symbol(&self) -> &str {
    &self.symbol
  }

  /// Size of the backing storage in bytes.
  pub fn size(&self) -> usize {
    VAR_COUNT * 8
  }

  pub fn load(&self, slot: Slot) -> i64 {
    self.values[slot.index()]
  }

  pub fn store(&mut self, slot: Slot, value: i64) {
    self.values[slot.index()] = value;
  }
}
