use rpncc::ir::{Insn, Reg};
use rpncc::operand::VAR_COUNT;

/// The example programs and the value each one prints.
#[allow(dead_code)]
pub const PROGRAMS: &[(&str, i64)] = &[
  ("5", 5),
  ("72+", 9),
  ("123*+", 7),
  ("12+3*", 9),
  ("12+3+", 6),
  ("12345++++", 15),
  ("a", 0),
  ("a2=;a1+", 3),
  ("ba2==;b1+", 3),
  ("1;2", 2),
];

/// Minimal model of the machine the generated code runs on.
#[allow(dead_code)]
#[derive(Debug, Default)]
struct Machine {
  rax: i64,
  rdi: i64,
  stack: Vec<i64>,
  vars: [i64; VAR_COUNT],
}

#[allow(dead_code)]
impl Machine {
  fn reg(&mut self, reg: Reg) -> &mut i64 {
    match reg {
      Reg::Rax => &mut self.rax,
      Reg::Rdi => &mut self.rdi,
    }
  }

  fn read(&mut self, reg: Reg) -> i64 {
    *self.reg(reg)
  }
}

/// Execute a lowered instruction list; returns the value handed to the
/// print routine and the machine stack depth at that moment.
#[allow(dead_code)]
pub fn execute(insns: &[Insn]) -> Option<(i64, usize)> {
  let mut m = Machine::default();
  for insn in insns {
    match insn {
      Insn::Comment(_) => {}
      Insn::PushImm(value) => m.stack.push(*value),
      Insn::Push(reg) => {
        let value = m.read(*reg);
        m.stack.push(value);
      }
      Insn::Pop(reg) => {
        let value = m.stack.pop().expect("machine stack underflow");
        *m.reg(*reg) = value;
      }
      Insn::Load { slot, dst } => {
        let value = m.vars[slot.index()];
        *m.reg(*dst) = value;
      }
      Insn::Store { src, slot } => {
        let value = m.read(*src);
        m.vars[slot.index()] = value;
      }
      Insn::Add { src, dst } => {
        let value = m.read(*dst).wrapping_add(m.read(*src));
        *m.reg(*dst) = value;
      }
      Insn::Imul { src, dst } => {
        let value = m.read(*dst).wrapping_mul(m.read(*src));
        *m.reg(*dst) = value;
      }
      Insn::Drop => {
        m.stack.pop().expect("machine stack underflow");
      }
      Insn::CallPrint => return Some((m.rdi, m.stack.len())),
    }
  }
  None
}

/// Lower `source` and run it on the model machine.
#[allow(dead_code)]
pub fn run_lowered(source: &str) -> Option<(i64, usize)> {
  let insns = rpncc::lower(source).expect("program should compile");
  execute(&insns)
}
