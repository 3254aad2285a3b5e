use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::ValidationError;

/// One symbol of the instruction alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// `>`
    Advance,
    /// `<`
    Retreat,
    /// `+`
    Increment,
    /// `-`
    Decrement,
    /// `.`
    Output,
    /// `,`
    Input,
    /// `[`
    LoopOpen,
    /// `]`
    LoopClose,
}

impl Instruction {
    pub fn from_char(c: char) -> Option<Self> {
        Some(match c {
            '>' => Instruction::Advance,
            '<' => Instruction::Retreat,
            '+' => Instruction::Increment,
            '-' => Instruction::Decrement,
            '.' => Instruction::Output,
            ',' => Instruction::Input,
            '[' => Instruction::LoopOpen,
            ']' => Instruction::LoopClose,
            _ => return None,
        })
    }

    pub fn as_char(self) -> char {
        match self {
            Instruction::Advance => '>',
            Instruction::Retreat => '<',
            Instruction::Increment => '+',
            Instruction::Decrement => '-',
            Instruction::Output => '.',
            Instruction::Input => ',',
            Instruction::LoopOpen => '[',
            Instruction::LoopClose => ']',
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A validated instruction sequence. Brackets are guaranteed to balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    /// Same as [`validate`].
    pub fn parse(source: &str) -> Result<Self, ValidationError> {
        validate(source)
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

impl FromStr for Program {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate(s)
    }
}

/// Renders the canonical source: one symbol per instruction, no whitespace.
impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for instruction in &self.instructions {
            write!(f, "{instruction}")?;
        }
        Ok(())
    }
}

/// Validate raw source text and produce a [`Program`].
///
/// Whitespace is stripped. Any other character outside the alphabet is
/// rejected, as is a loop-close with no open before it or a loop-open that
/// is never closed. Positions are character offsets into `source`.
pub fn validate(source: &str) -> Result<Program, ValidationError> {
    let result = check(source);
    match &result {
        Ok(program) => debug!(instructions = program.len(), "program accepted"),
        Err(err) => debug!(%err, "program rejected"),
    }
    result
}

fn check(source: &str) -> Result<Program, ValidationError> {
    let mut symbols = Vec::with_capacity(source.len());
    for (position, c) in source.chars().enumerate() {
        if c.is_whitespace() {
            continue;
        }
        match Instruction::from_char(c) {
            Some(instruction) => symbols.push((position, instruction)),
            None => return Err(ValidationError::InvalidSymbol { position, symbol: c }),
        }
    }

    if symbols.is_empty() {
        return Err(ValidationError::EmptySource);
    }

    let mut depth: usize = 0;
    for &(position, instruction) in &symbols {
        match instruction {
            Instruction::LoopOpen => depth += 1,
            Instruction::LoopClose => {
                if depth == 0 {
                    return Err(ValidationError::UnmatchedLoopClose(position));
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    if depth > 0 {
        return Err(ValidationError::UnmatchedLoopOpen(depth));
    }

    Ok(Program {
        instructions: symbols.into_iter().map(|(_, i)| i).collect(),
    })
}
