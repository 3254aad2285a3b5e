use std::io::{Read, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, trace};

use crate::error::ExecError;
use crate::program::{Instruction, Program};
use crate::tape::Tape;

/// Marks a bracket with no partner in the jump table.
const UNMATCHED: usize = usize::MAX;

/// External bounds on a run. The default is unbounded.
#[derive(Debug, Clone, Default)]
pub struct Limits {
    /// Stop after this many dispatched instructions.
    pub step_limit: Option<usize>,
    /// Checked once per dispatch; a set flag stops the run.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl Limits {
    pub fn steps(step_limit: usize) -> Self {
        Self {
            step_limit: Some(step_limit),
            cancel: None,
        }
    }
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    /// The instruction pointer ran off the end of the program.
    Finished,
    StepLimit,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub halt: Halt,
    /// Instructions dispatched so far, across all calls on the executor.
    pub steps: usize,
}

/// Execution state for one run of a [`Program`]: instruction pointer, step
/// counter and an exclusively owned [`Tape`].
pub struct Executor<'p> {
    program: &'p [Instruction],
    jumps: Vec<usize>,
    tape: Tape,
    ip: usize,
    steps: usize,
}

impl<'p> Executor<'p> {
    pub fn new(program: &'p Program) -> Self {
        let program = program.instructions();
        Self {
            program,
            jumps: build_jump_table(program),
            tape: Tape::new(),
            ip: 0,
            steps: 0,
        }
    }

    pub fn ip(&self) -> usize {
        self.ip
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn is_finished(&self) -> bool {
        self.ip >= self.program.len()
    }

    /// Dispatch one instruction. Returns `false` once the program has
    /// finished, without dispatching anything.
    pub fn step<R: Read, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> Result<bool, ExecError> {
        let Some(&instruction) = self.program.get(self.ip) else {
            return Ok(false);
        };
        self.steps += 1;
        match instruction {
            Instruction::Advance => self.tape.advance(),
            Instruction::Retreat => self.tape.retreat(),
            Instruction::Increment => self.tape.increment(),
            Instruction::Decrement => self.tape.decrement(),
            Instruction::Output => output.write_all(&[self.tape.read()])?,
            Instruction::Input => {
                // A prompt printed before the read must be visible.
                output.flush()?;
                // End of input leaves the cell as it was.
                if let Some(byte) = Read::bytes(&mut *input).next() {
                    self.tape.write(byte?);
                }
            }
            Instruction::LoopOpen => {
                if self.tape.read() == 0 {
                    self.ip = self.jump_target()?;
                }
            }
            Instruction::LoopClose => {
                if self.tape.read() != 0 {
                    self.ip = self.jump_target()?;
                }
            }
        }
        self.ip += 1;
        Ok(true)
    }

    /// Run until the program finishes or a limit stops it. Can be called
    /// again after a `StepLimit` or `Cancelled` halt to resume.
    pub fn run<R: Read, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
        limits: &Limits,
    ) -> Result<Outcome, ExecError> {
        let budget = limits.step_limit.map(|limit| self.steps.saturating_add(limit));
        let halt = loop {
            if self.is_finished() {
                break Halt::Finished;
            }
            if budget.is_some_and(|b| self.steps >= b) {
                break Halt::StepLimit;
            }
            if let Some(cancel) = &limits.cancel {
                if cancel.load(Ordering::Relaxed) {
                    break Halt::Cancelled;
                }
            }
            self.step(input, output)?;
        };
        debug!(?halt, steps = self.steps, tape_len = self.tape.len(), "run halted");
        Ok(Outcome {
            halt,
            steps: self.steps,
        })
    }

    fn jump_target(&self) -> Result<usize, ExecError> {
        let target = self.jumps[self.ip];
        if target == UNMATCHED {
            return Err(ExecError::UnresolvedJump { ip: self.ip });
        }
        trace!(from = self.ip, to = target, "jump");
        Ok(target)
    }
}

/// Run `program` to completion with no input and collect what it prints.
///
/// There is no step limit: a program that never halts never returns.
pub fn execute(program: &Program) -> Result<Vec<u8>, ExecError> {
    let mut output = Vec::new();
    Executor::new(program).run(&mut std::io::empty(), &mut output, &Limits::default())?;
    Ok(output)
}

/// Build the bracket-match lookup table.
///
/// `result[i]` is the index of the bracket matching the one at `i`, or
/// `UNMATCHED` for unmatched brackets and non-bracket instructions.
fn build_jump_table(program: &[Instruction]) -> Vec<usize> {
    let mut table = vec![UNMATCHED; program.len()];
    let mut stack = Vec::new();

    for (i, instruction) in program.iter().enumerate() {
        match instruction {
            Instruction::LoopOpen => stack.push(i),
            Instruction::LoopClose => {
                if let Some(open) = stack.pop() {
                    table[open] = i;
                    table[i] = open;
                }
            }
            _ => {}
        }
    }

    table
}
