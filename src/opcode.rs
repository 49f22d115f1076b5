//! Opcode abstractions, functionality and constants.
use crate::{
    definitions::memory,
    error::{MemoryError, OpcodeError, ProcessError},
};

/// the base mask used for generating all the other sub masks
pub(crate) const OPCODE_MASK_FFFF: u16 = u16::MAX;

/// the mask for the first twelve bits
pub(crate) const OPCODE_MASK_FFF0: u16 = OPCODE_MASK_FFFF << 4;

/// the mask for the first eight bits
pub(crate) const OPCODE_MASK_FF00: u16 = OPCODE_MASK_FFFF << 8;

/// the mask for the first four bits
pub(crate) const OPCODE_MASK_F000: u16 = OPCODE_MASK_FFFF << 12;

/// the mask for the last four bits
pub(crate) const OPCODE_MASK_000F: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_FFF0;

/// the mask for the last eight bits
pub(crate) const OPCODE_MASK_00FF: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_FF00;

/// the mask for the last twelve bits
pub(crate) const OPCODE_MASK_0FFF: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_F000;

/// the size of a nibble
const NIBBLE: u16 = 0x4;

/// a wrapper type for u16 to make it clear what is meant to be used
pub type Opcode = u16;

/// will build an opcode from data and the given point
/// # Arguments
///
/// - `data` - A slice of u8 data entries used to generate the opcodes
/// - `pointer` - Where in the data the opcode shall be extracted, so `pointer` and `pointer + 1` make
/// the opcode up
///
/// # Example
/// ```rust
/// # use chip::opcode::*;
/// # use chip::OpcodeError;
///  const OPCODES: [Opcode; 2] = [0x00EE, 0x1EDA];
///  const SPLIT_OPCODE: [u8; 4] = [0x00, 0xEE, 0x1E, 0xDA];
///  for (i, val) in OPCODES.iter().enumerate() {
///      let opcode = build_opcode(&SPLIT_OPCODE, i * 2).expect("This will work.");
///      assert_eq!(opcode, *val);
///  }
/// # let pointer = 3;
/// # let err = OpcodeError::MemoryInvalid { pointer, len: SPLIT_OPCODE.len() };
/// # assert_eq!(Err(err), build_opcode(&SPLIT_OPCODE, pointer));
/// ```
pub fn build_opcode(data: &[u8], pointer: usize) -> Result<Opcode, OpcodeError> {
    // controlling that there is no illegal access here
    if pointer + 1 < data.len() {
        Ok(Opcode::from_be_bytes([data[pointer], data[pointer + 1]]))
    } else {
        Err(OpcodeError::MemoryInvalid {
            pointer,
            len: data.len(),
        })
    }
}

/// These are special traits used to filter out information
/// from opcodes
pub trait OpcodeTrait {
    /// the opcode family, the highest nibble `T` of `TXYN`
    fn t(&self) -> u8;

    /// the lowest twelve bits `NNN` of `TNNN`, usually an address
    fn nnn(&self) -> u16;

    /// the lowest byte `NN` of `TXNN`, usually a constant
    fn nn(&self) -> u8;

    /// the lowest nibble `N` of `TXYN`
    fn n(&self) -> u8;

    /// the register index `X` of `TXYN`
    fn x(&self) -> usize;

    /// the register index `Y` of `TXYN`
    fn y(&self) -> usize;
}

impl OpcodeTrait for Opcode {
    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.t(), 0x1);
    /// ```
    fn t(&self) -> u8 {
        ((self & OPCODE_MASK_F000) >> (3 * NIBBLE)) as u8
    }

    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!(BASE_OPCODE.nnn(), 0xEDA)
    /// ```
    fn nnn(&self) -> u16 {
        self & OPCODE_MASK_0FFF
    }

    fn nn(&self) -> u8 {
        (self & OPCODE_MASK_00FF) as u8
    }

    fn n(&self) -> u8 {
        (self & OPCODE_MASK_000F) as u8
    }

    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!((BASE_OPCODE.x(), BASE_OPCODE.y()), (0xE, 0xD));
    /// ```
    fn x(&self) -> usize {
        ((self & OPCODE_MASK_0FFF & OPCODE_MASK_FF00) >> (2 * NIBBLE)) as usize
    }

    fn y(&self) -> usize {
        const MASK: u16 = OPCODE_MASK_00FF ^ OPCODE_MASK_000F;
        ((self & MASK) >> NIBBLE) as usize
    }
}

/// All the operand fields of a single instruction word, without any
/// interpretation of what the instruction does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    pub opcode: Opcode,
    pub family: u8,
    pub x: usize,
    pub y: usize,
    pub n: u8,
    pub nn: u8,
    pub nnn: u16,
}

/// Splits the instruction word into its fields. Total over every possible word.
///
/// # Example
/// ```rust
/// # use chip::opcode::*;
/// let decoded = decode(0xD12F);
/// assert_eq!(decoded.family, 0xD);
/// assert_eq!((decoded.x, decoded.y, decoded.n), (0x1, 0x2, 0xF));
/// assert_eq!(decoded.nn, 0x2F);
/// assert_eq!(decoded.nnn, 0x12F);
/// ```
pub fn decode(opcode: Opcode) -> Decoded {
    Decoded {
        opcode,
        family: opcode.t(),
        x: opcode.x(),
        y: opcode.y(),
        n: opcode.n(),
        nn: opcode.nn(),
        nnn: opcode.nnn(),
    }
}

/// Builds the sub opcode enums of the polymorphic families, mapping
/// the sub key to the variant.
macro_rules! sub_opcode {
    ($(#[$meta:meta])* $name:ident : $key:ty { $( $(#[$vmeta:meta])* $value:literal => $variant:ident ),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// Maps the sub key of the instruction to the operation, if it exists.
            pub fn from_key(key: $key) -> Option<Self> {
                match key {
                    $( $value => Some($name::$variant), )+
                    _ => None,
                }
            }
        }
    };
}

sub_opcode!(
    /// The register to register operations of the `8XYN` family, keyed by `N`.
    ArithmeticOp : u8 {
        /// `8XY0` - `Vx = Vy`
        0x0 => Assign,
        /// `8XY1` - `Vx |= Vy`
        0x1 => Or,
        /// `8XY2` - `Vx &= Vy`
        0x2 => And,
        /// `8XY3` - `Vx ^= Vy`
        0x3 => Xor,
        /// `8XY4` - `Vx += Vy`, `VF` is the carry
        0x4 => Add,
        /// `8XY5` - `Vx -= Vy`, `VF` is set when there is no borrow
        0x5 => Sub,
        /// `8XY6` - `Vx >>= 1`, `VF` is the shifted out bit
        0x6 => ShiftRight,
        /// `8XY7` - `Vx = Vy - Vx`, `VF` is set when there is no borrow
        0x7 => SubReverse,
        /// `8XYE` - `Vx <<= 1`, `VF` is the shifted out bit
        0xE => ShiftLeft,
    }
);

sub_opcode!(
    /// The keyboard conditions of the `EXNN` family, keyed by `NN`.
    KeyOp : u8 {
        /// `EX9E` - skip if the key in `Vx` is pressed
        0x9E => Pressed,
        /// `EXA1` - skip if the key in `Vx` is not pressed
        0xA1 => NotPressed,
    }
);

sub_opcode!(
    /// The timer, keyboard and memory operations of the `FXNN` family, keyed by `NN`.
    MiscOp : u8 {
        /// `FX07` - `Vx = delay_timer`
        0x07 => GetDelayTimer,
        /// `FX0A` - wait until a key is pressed and store it in `Vx`
        0x0A => AwaitKeyPress,
        /// `FX15` - `delay_timer = Vx`
        0x15 => SetDelayTimer,
        /// `FX18` - `sound_timer = Vx`
        0x18 => SetSoundTimer,
        /// `FX1E` - `I += Vx`, `VF` is not affected
        0x1E => AddVxToI,
        /// `FX29` - `I` points to the font glyph of the low nibble of `Vx`
        0x29 => SetIToSprite,
        /// `FX33` - binary coded decimal of `Vx` at `I`, `I+1`, `I+2`
        0x33 => StoreBcd,
        /// `FX55` - store `V0` to `Vx` at `I`
        0x55 => StoreV0ToVx,
        /// `FX65` - fill `V0` to `Vx` from `I`
        0x65 => FillV0ToVx,
    }
);

/// A fully decoded instruction with its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `00E0`
    Clear,
    /// `00EE`
    Return,
    /// `1NNN`
    Jump { nnn: u16 },
    /// `2NNN`
    Call { nnn: u16 },
    /// `3XNN`
    SkipEqual { x: usize, nn: u8 },
    /// `4XNN`
    SkipNotEqual { x: usize, nn: u8 },
    /// `5XY0`
    SkipEqualRegister { x: usize, y: usize },
    /// `9XY0`
    SkipNotEqualRegister { x: usize, y: usize },
    /// `6XNN`
    Set { x: usize, nn: u8 },
    /// `7XNN`
    Add { x: usize, nn: u8 },
    /// `8XYN`
    Arithmetic { op: ArithmeticOp, x: usize, y: usize },
    /// `ANNN`
    SetIndex { nnn: u16 },
    /// `BNNN`
    JumpOffset { nnn: u16 },
    /// `CXNN`
    Random { x: usize, nn: u8 },
    /// `DXYN`
    Draw { x: usize, y: usize, n: u8 },
    /// `EXNN`
    Key { op: KeyOp, x: usize },
    /// `FXNN`
    Misc { op: MiscOp, x: usize },
    /// Any word that is not part of the instruction set.
    Unknown(Opcode),
}

impl From<Decoded> for Instruction {
    fn from(decoded: Decoded) -> Self {
        let Decoded {
            opcode,
            family,
            x,
            y,
            n,
            nn,
            nnn,
        } = decoded;

        let instruction = match family {
            0x0 => match opcode {
                0x00E0 => Some(Instruction::Clear),
                0x00EE => Some(Instruction::Return),
                // `0NNN` machine code calls have nothing to run on
                _ => None,
            },
            0x1 => Some(Instruction::Jump { nnn }),
            0x2 => Some(Instruction::Call { nnn }),
            0x3 => Some(Instruction::SkipEqual { x, nn }),
            0x4 => Some(Instruction::SkipNotEqual { x, nn }),
            0x5 if n == 0 => Some(Instruction::SkipEqualRegister { x, y }),
            0x6 => Some(Instruction::Set { x, nn }),
            0x7 => Some(Instruction::Add { x, nn }),
            0x8 => ArithmeticOp::from_key(n).map(|op| Instruction::Arithmetic { op, x, y }),
            0x9 if n == 0 => Some(Instruction::SkipNotEqualRegister { x, y }),
            0xA => Some(Instruction::SetIndex { nnn }),
            0xB => Some(Instruction::JumpOffset { nnn }),
            0xC => Some(Instruction::Random { x, nn }),
            0xD => Some(Instruction::Draw { x, y, n }),
            0xE => KeyOp::from_key(nn).map(|op| Instruction::Key { op, x }),
            0xF => MiscOp::from_key(nn).map(|op| Instruction::Misc { op, x }),
            _ => None,
        };

        instruction.unwrap_or(Instruction::Unknown(opcode))
    }
}

impl From<Opcode> for Instruction {
    fn from(opcode: Opcode) -> Self {
        decode(opcode).into()
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
/// Represents the program steps that the chip
/// can take after an instruction was fetched (and the
/// program counter already moved past it).
pub enum ProgramCounterStep {
    /// Continue with the instruction after the current one
    Next,
    /// Skip over the next instruction
    Skip,
    /// Run the current instruction again next cycle
    Repeat,
    /// Will move the program counter to the given location.
    Jump(usize),
}

impl ProgramCounterStep {
    /// Will return a Skip if the condition is true.
    ///
    /// # Example
    /// ```rust
    /// # use chip::opcode::ProgramCounterStep;
    /// assert_eq!(ProgramCounterStep::Next, ProgramCounterStep::cond(false));
    /// assert_eq!(ProgramCounterStep::Skip, ProgramCounterStep::cond(true));
    /// ```
    #[inline]
    pub fn cond(cond: bool) -> Self {
        if cond {
            ProgramCounterStep::Skip
        } else {
            ProgramCounterStep::Next
        }
    }

    /// Calculates the new program counter, given the counter after the fetch.
    /// Jumps are checked against the memory, so that a full instruction can
    /// still be read at the target.
    pub fn apply(&self, program_counter: usize) -> Result<usize, ProcessError> {
        let pc = match *self {
            ProgramCounterStep::Next => program_counter,
            ProgramCounterStep::Skip => program_counter + memory::opcodes::SIZE,
            ProgramCounterStep::Repeat => program_counter.saturating_sub(memory::opcodes::SIZE),
            ProgramCounterStep::Jump(target) => {
                if target > memory::LAST_INSTRUCTION {
                    return Err(MemoryError::OutOfRangeJump { target }.into());
                }
                target
            }
        };
        Ok(pc)
    }
}

/// Represents a step of the program counter
/// this requires the enum ProgramCounterStep
/// to work.
pub trait ProgramCounter {
    /// will move the program counter by a step.
    fn step(&mut self, step: ProgramCounterStep) -> Result<(), ProcessError>;
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
/// Represents a command from the interpreter up to the host.
pub enum Operation {
    /// If no action has to be taken.
    None,
    /// The wait for key instruction is not satisfied yet and
    /// will run again next cycle.
    Wait,
    /// The display changed and should be presented again.
    Draw,
}

/// These are the traits that have to be full filled for a working opcode
/// table.
///
/// This trait requires the implementation of the [`ProgramCounter`](ProgramCounter) trait, as
/// the step functionality is shared by all instructions.
pub trait ChipOpcodes: ProgramCounter {
    /// will apply a single instruction, the program counter has to point
    /// past the instruction already.
    fn calc(&mut self, instruction: Instruction) -> Result<Operation, ProcessError> {
        let mut operation = Operation::None;
        let mut step_op = |(step, op): (ProgramCounterStep, Operation)| {
            operation = op;
            step
        };

        let step = match instruction {
            Instruction::Clear => self.clear().map(&mut step_op),
            Instruction::Return => self.ret(),
            Instruction::Jump { nnn } => self.jump(nnn),
            Instruction::Call { nnn } => self.call(nnn),
            Instruction::SkipEqual { x, nn } => self.skip_const(x, nn, true),
            Instruction::SkipNotEqual { x, nn } => self.skip_const(x, nn, false),
            Instruction::SkipEqualRegister { x, y } => self.skip_register(x, y, true),
            Instruction::SkipNotEqualRegister { x, y } => self.skip_register(x, y, false),
            Instruction::Set { x, nn } => self.set(x, nn),
            Instruction::Add { x, nn } => self.add(x, nn),
            Instruction::Arithmetic { op, x, y } => self.arithmetic(op, x, y),
            Instruction::SetIndex { nnn } => self.set_index(nnn),
            Instruction::JumpOffset { nnn } => self.jump_offset(nnn),
            Instruction::Random { x, nn } => self.random(x, nn),
            Instruction::Draw { x, y, n } => self.draw(x, y, n).map(&mut step_op),
            Instruction::Key { op, x } => self.key(op, x),
            Instruction::Misc { op, x } => self.misc(op, x).map(&mut step_op),
            Instruction::Unknown(opcode) => Err(OpcodeError::Unknown(opcode).into()),
        }?;

        self.step(step)?;
        Ok(operation)
    }

    /// - `00E0` - Display  - `disp_clear()`        - Clears the screen.
    fn clear(&mut self) -> Result<(ProgramCounterStep, Operation), ProcessError>;

    /// - `00EE` - Flow     - `return;`             - Returns from a subroutine.
    fn ret(&mut self) -> Result<ProgramCounterStep, ProcessError>;

    /// - `1NNN` - Flow     - `goto NNN;`           - Jumps to address `NNN`.
    fn jump(&mut self, nnn: u16) -> Result<ProgramCounterStep, ProcessError>;

    /// - `2NNN` - Flow     - `*(0xNNN)()`          - Calls subroutine at `NNN`.
    fn call(&mut self, nnn: u16) -> Result<ProgramCounterStep, ProcessError>;

    /// - `3XNN` - Cond     - `if(Vx==NN)`          - Skips the next instruction if `VX` equals `NN`.
    /// - `4XNN` - Cond     - `if(Vx!=NN)`          - Skips the next instruction if `VX` doesn't equal `NN`.
    fn skip_const(&mut self, x: usize, nn: u8, equal: bool)
        -> Result<ProgramCounterStep, ProcessError>;

    /// - `5XY0` - Cond     - `if(Vx==Vy)`          - Skips the next instruction if `VX` equals `VY`.
    /// - `9XY0` - Cond     - `if(Vx!=Vy)`          - Skips the next instruction if `VX` doesn't equal `VY`.
    fn skip_register(&mut self, x: usize, y: usize, equal: bool)
        -> Result<ProgramCounterStep, ProcessError>;

    /// - `6XNN` - Const    - `Vx = NN`             - Sets `VX` to `NN`.
    fn set(&mut self, x: usize, nn: u8) -> Result<ProgramCounterStep, ProcessError>;

    /// - `7XNN` - Const    - `Vx += NN`            - Adds `NN` to `VX`. (Carry flag is not changed)
    fn add(&mut self, x: usize, nn: u8) -> Result<ProgramCounterStep, ProcessError>;

    /// - `8XY0` - Assign   - `Vx=Vy`               - Sets `VX` to the value of `VY`.
    /// - `8XY1` - BitOp    - `Vx=Vx|Vy`            - Sets `VX` to `VX` or `VY`. (Bitwise OR operation)
    /// - `8XY2` - BitOp    - `Vx=Vx&Vy`            - Sets `VX` to `VX` and `VY`. (Bitwise AND operation)
    /// - `8XY3` - BitOp    - `Vx=Vx^Vy`            - Sets `VX` to `VX` xor `VY`. (Bitwise XOR operation)
    /// - `8XY4` - Math     - `Vx += Vy`            - Adds `VY` to `VX`. `VF` is set to `1` when there's a carry, and to `0` when there isn't.
    /// - `8XY5` - Math     - `Vx -= Vy`            - `VY` is subtracted from VX. `VF` is set to `1` when `VX > VY`, and `0` otherwise.
    /// - `8XY6` - BitOp    - `Vx>>=1`              - Stores the least significant bit of `VX` in `VF` and then shifts VX to the right by `1`.
    /// - `8XY7` - Math     - `Vx=Vy-Vx`            - Sets `VX` to `VY` minus `VX`. `VF` is set to `1` when `VY > VX`, and `0` otherwise.
    /// - `8XYE` - BitOp    - `Vx<<=1`              - Stores the most significant bit of `VX` in `VF` and then shifts `VX` to the left by `1`.
    fn arithmetic(&mut self, op: ArithmeticOp, x: usize, y: usize)
        -> Result<ProgramCounterStep, ProcessError>;

    /// - `ANNN` - MEM      - `I = NNN`             - Sets `I` to the address `NNN`.
    fn set_index(&mut self, nnn: u16) -> Result<ProgramCounterStep, ProcessError>;

    /// - `BNNN` - Flow     - `PC=V0+NNN`           - Jumps to the address `NNN` plus `V0`.
    fn jump_offset(&mut self, nnn: u16) -> Result<ProgramCounterStep, ProcessError>;

    /// - `CXNN` - Rand     - `Vx=rand()&NN`        - Sets `VX` to the result of a bitwise and operation on a random number and `NN`.
    fn random(&mut self, x: usize, nn: u8) -> Result<ProgramCounterStep, ProcessError>;

    /// - `DXYN` - Disp     - `draw(Vx,Vy,N)`       - Draws a sprite at coordinate `(VX, VY)` that has a width of `8` pixels and a height of `N` pixels. Each row of `8` pixels is read as bit-coded starting from memory location `I`; `I` value doesn’t change after the execution of this instruction. `VF` is set to `1` if any screen pixels are flipped from set to unset when the sprite is drawn, and to `0` if that doesn’t happen.
    fn draw(&mut self, x: usize, y: usize, n: u8)
        -> Result<(ProgramCounterStep, Operation), ProcessError>;

    /// - `EX9E` - KeyOp    - `if(key()==Vx)`       - Skips the next instruction if the key stored in `VX` is pressed.
    /// - `EXA1` - KeyOp    - `if(key()!=Vx)`       - Skips the next instruction if the key stored in `VX` isn't pressed.
    fn key(&mut self, op: KeyOp, x: usize) -> Result<ProgramCounterStep, ProcessError>;

    /// - `FX07` - Timer    - `Vx = get_delay()`    - Sets `VX` to the value of the delay timer.
    /// - `FX0A` - KeyOp    - `Vx = get_key()`      - A key press is awaited, and then stored in `VX`. The instruction is repeated until a key is down.
    /// - `FX15` - Timer    - `delay_timer(Vx)`     - Sets the delay timer to `VX`.
    /// - `FX18` - Sound    - `sound_timer(Vx)`     - Sets the sound timer to `VX`.
    /// - `FX1E` - MEM      - `I +=Vx`              - Adds `VX` to `I`. `VF` is not affected.
    /// - `FX29` - MEM      - `I=sprite_addr[Vx]`   - Sets `I` to the location of the sprite for the character in `VX`. Characters `0-F` (in hexadecimal) are represented by a `4x5` font.
    /// - `FX33` - BCD      - `246 / 100 => 2` `246 / 10 => 24 % 10 => 4` `246 % 10 => 6` - Stores the binary-coded decimal representation of `VX` at `I`, `I+1` and `I+2`.
    /// - `FX55` - MEM      - `reg_dump(Vx,&I)`     - Stores `V0` to `VX` (including `VX`) in memory starting at address `I`. `I` itself is left unmodified.
    /// - `FX65` - MEM      - `reg_load(Vx,&I)`     - Fills `V0` to `VX` (including `VX`) with values from memory starting at address `I`. `I` itself is left unmodified.
    fn misc(&mut self, op: MiscOp, x: usize)
        -> Result<(ProgramCounterStep, Operation), ProcessError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_fields() {
        let decoded = decode(0x8AB6);
        assert_eq!(
            decoded,
            Decoded {
                opcode: 0x8AB6,
                family: 0x8,
                x: 0xA,
                y: 0xB,
                n: 0x6,
                nn: 0xB6,
                nnn: 0xAB6,
            }
        );
    }

    #[test]
    fn test_decode_is_total() {
        for opcode in 0..=u16::MAX {
            let decoded = decode(opcode);
            assert!(decoded.family <= 0xF);
            assert!(decoded.x <= 0xF && decoded.y <= 0xF);
            assert_eq!(decoded.nnn, opcode & 0x0FFF);
            // every word maps to some instruction, unknown ones included
            let _ = Instruction::from(opcode);
        }
    }

    #[test]
    fn test_instruction_simple() {
        assert_eq!(Instruction::from(0x00E0u16), Instruction::Clear);
        assert_eq!(Instruction::from(0x00EEu16), Instruction::Return);
        assert_eq!(Instruction::from(0x0123u16), Instruction::Unknown(0x0123));
        assert_eq!(Instruction::from(0x00EAu16), Instruction::Unknown(0x00EA));
    }

    #[test]
    fn test_instruction_multiple() {
        let tests = [
            (0x1919u16, Instruction::Jump { nnn: 0x919 }),
            (0x2222, Instruction::Call { nnn: 0x222 }),
            (0x3123, Instruction::SkipEqual { x: 0x1, nn: 0x23 }),
            (0x4123, Instruction::SkipNotEqual { x: 0x1, nn: 0x23 }),
            (0x5120, Instruction::SkipEqualRegister { x: 0x1, y: 0x2 }),
            (0x5121, Instruction::Unknown(0x5121)),
            (0x6123, Instruction::Set { x: 0x1, nn: 0x23 }),
            (0x7123, Instruction::Add { x: 0x1, nn: 0x23 }),
            (
                0x8120,
                Instruction::Arithmetic {
                    op: ArithmeticOp::Assign,
                    x: 0x1,
                    y: 0x2,
                },
            ),
            (
                0x8124,
                Instruction::Arithmetic {
                    op: ArithmeticOp::Add,
                    x: 0x1,
                    y: 0x2,
                },
            ),
            (
                0x812E,
                Instruction::Arithmetic {
                    op: ArithmeticOp::ShiftLeft,
                    x: 0x1,
                    y: 0x2,
                },
            ),
            (0x8128, Instruction::Unknown(0x8128)),
            (0x9120, Instruction::SkipNotEqualRegister { x: 0x1, y: 0x2 }),
            (0x9121, Instruction::Unknown(0x9121)),
            (0xA222, Instruction::SetIndex { nnn: 0x222 }),
            (0xB222, Instruction::JumpOffset { nnn: 0x222 }),
            (0xC123, Instruction::Random { x: 0x1, nn: 0x23 }),
            (
                0xD123,
                Instruction::Draw {
                    x: 0x1,
                    y: 0x2,
                    n: 0x3,
                },
            ),
            (
                0xE19E,
                Instruction::Key {
                    op: KeyOp::Pressed,
                    x: 0x1,
                },
            ),
            (
                0xE1A1,
                Instruction::Key {
                    op: KeyOp::NotPressed,
                    x: 0x1,
                },
            ),
            (0xE111, Instruction::Unknown(0xE111)),
            (
                0xF00A,
                Instruction::Misc {
                    op: MiscOp::AwaitKeyPress,
                    x: 0x0,
                },
            ),
            (
                0xF533,
                Instruction::Misc {
                    op: MiscOp::StoreBcd,
                    x: 0x5,
                },
            ),
            (
                0xFF65,
                Instruction::Misc {
                    op: MiscOp::FillV0ToVx,
                    x: 0xF,
                },
            ),
            (0xF0AA, Instruction::Unknown(0xF0AA)),
        ];

        for (value, expected) in tests.iter() {
            assert_eq!(Instruction::from(*value), *expected, "{:#06X}", value);
        }
    }

    #[test]
    fn test_arithmetic_sub_keys() {
        let known = [0x0, 0x1, 0x2, 0x3, 0x4, 0x5, 0x6, 0x7, 0xE];
        for key in 0..=0xF {
            assert_eq!(ArithmeticOp::from_key(key).is_some(), known.contains(&key));
        }
    }

    #[test]
    fn test_step_apply() {
        let pc = 0x202;
        assert_eq!(ProgramCounterStep::Next.apply(pc), Ok(0x202));
        assert_eq!(ProgramCounterStep::Skip.apply(pc), Ok(0x204));
        assert_eq!(ProgramCounterStep::Repeat.apply(pc), Ok(0x200));
        assert_eq!(ProgramCounterStep::Jump(0x300).apply(pc), Ok(0x300));
        assert_eq!(ProgramCounterStep::Jump(0xFFE).apply(pc), Ok(0xFFE));
    }

    #[test]
    fn test_step_apply_out_of_range() {
        assert_eq!(
            ProgramCounterStep::Jump(0xFFF).apply(0x202),
            Err(MemoryError::OutOfRangeJump { target: 0xFFF }.into())
        );
        assert_eq!(
            ProgramCounterStep::Jump(0x1000).apply(0x202),
            Err(MemoryError::OutOfRangeJump { target: 0x1000 }.into())
        );
    }
}
