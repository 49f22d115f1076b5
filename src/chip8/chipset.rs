use std::ops::Range;

use {
    crate::{
        definitions::{cpu, display, memory},
        devices::{DisplayCommands, KeyboardCommands},
        error::{LoadError, MemoryError, ProcessError, StackError},
        opcode::{self, ChipOpcodes, Instruction, Opcode, Operation, ProgramCounter, ProgramCounterStep},
        resources::{self, Rom},
        timer::Timers,
    },
    rand::RngCore,
    tinyvec::ArrayVec,
};

/// The address register `I`, it only ever holds a 12 bit value so it
/// always names a location inside of the memory.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IndexRegister(u16);

impl IndexRegister {
    pub fn new(value: u16) -> Self {
        Self(value & cpu::index::MASK)
    }

    pub fn get(&self) -> u16 {
        self.0
    }

    pub fn set(&mut self, value: u16) {
        self.0 = value & cpu::index::MASK;
    }

    /// Adds the value, wrapping around at the end of the memory.
    pub fn add(&mut self, value: u16) {
        self.set(self.0.wrapping_add(value));
    }

    pub fn address(&self) -> usize {
        self.0 as usize
    }
}

/// The ChipSet struct represents the current state
/// of the system, it contains all the structures
/// needed for emulating an instant on the
/// Chip8 CPU.
///
/// The display and keyboard are collaborators owned by the host, the chipset
/// only ever asks them to toggle or report pixels and keys.
pub struct ChipSet<D, K> {
    /// name of the loaded rom
    pub(super) name: String,
    /// the last fetched opcode, all two bytes long and stored big-endian
    pub(super) opcode: Opcode,
    /// - `0x000-0x1FF` - Chip 8 interpreter (contains font set in emu)
    /// - `0x050-0x0A0` - Used for the built in `4x5` pixel font set (`0-F`)
    /// - `0x200-0xFFF` - Program ROM and work RAM
    pub(super) memory: Vec<u8>,
    /// `8-bit` data registers named `V0` to `VF`. The `VF` register doubles as a flag for some
    /// instructions. In an addition operation, `VF` is the carry flag,
    /// while in subtraction, it is the "no borrow" flag. In the draw instruction `VF` is set upon
    /// pixel collision.
    pub(super) registers: [u8; cpu::register::SIZE],
    /// The index for the register, this is a special register entry
    /// called index `I`
    pub(super) index_register: IndexRegister,
    /// The program counter is a CPU register in the computer processor which has the address of the
    /// next instruction to be executed from memory.
    pub(super) program_counter: usize,
    /// The stack is only used to store return addresses when subroutines are called. The original
    /// [RCA 1802](https://de.wikipedia.org/wiki/RCA1802) version allocated `48` bytes for up to
    /// `12` levels of nesting; modern implementations usually have more.
    /// (here we are using `16`)
    pub(super) stack: ArrayVec<[usize; cpu::stack::SIZE]>,
    /// The delay and the sound timer, both count down once per tick until they reach 0.
    pub(super) timers: Timers,
    /// The graphics of the Chip 8 are black and white and the screen has a total of `2048` pixels
    /// `(64 x 32)`.
    pub(super) display: D,
    /// The hex keyboard with its 16 keys.
    pub(super) keyboard: K,
    /// This stores the random number generator, used by the chipset.
    /// It is stored into the chipset, so as to enable simple mocking
    /// of the given type.
    pub(super) rng: Box<dyn RngCore + Send>,
}

impl<D, K> ChipSet<D, K>
where
    D: DisplayCommands,
    K: KeyboardCommands,
{
    /// will create a new chipset object, with an empty program area
    pub fn new(display: D, keyboard: K) -> Self {
        let mut chip = Self {
            name: String::new(),
            opcode: 0,
            memory: vec![0; memory::SIZE],
            registers: [0; cpu::register::SIZE],
            index_register: IndexRegister::default(),
            program_counter: cpu::PROGRAM_COUNTER,
            stack: ArrayVec::new(),
            timers: Timers::new(),
            display,
            keyboard,
            rng: Box::new(rand::rngs::OsRng),
        };
        chip.reset();
        chip
    }

    /// will create a new chipset with the rom already loaded
    pub fn with_rom(rom: &Rom, display: D, keyboard: K) -> Result<Self, LoadError> {
        let mut chip = Self::new(display, keyboard);
        chip.load_rom(rom)?;
        Ok(chip)
    }

    /// Replaces the source of the `CXNN` random numbers.
    pub fn with_rng<R>(mut self, rng: R) -> Self
    where
        R: RngCore + Send + 'static,
    {
        self.set_rng(rng);
        self
    }

    pub fn set_rng<R>(&mut self, rng: R)
    where
        R: RngCore + Send + 'static,
    {
        self.rng = Box::new(rng);
    }

    /// Brings the machine back into the power on state, the memory is zeroed
    /// and the font set is written back. The display is left to its owner.
    pub fn reset(&mut self) {
        // initialize all the memory with 0
        self.memory.iter_mut().for_each(|byte| *byte = 0);

        // load fonts
        self.memory[display::fontset::LOCATION
            ..(display::fontset::LOCATION + display::fontset::FONTSET.len())]
            .copy_from_slice(&display::fontset::FONTSET);

        self.opcode = 0;
        self.registers = [0; cpu::register::SIZE];
        self.index_register = IndexRegister::default();
        self.program_counter = cpu::PROGRAM_COUNTER;
        self.stack.clear();
        self.timers.reset();
    }

    /// Will write the program to the program area of the memory. A program that
    /// does not fit is rejected and the memory stays as it was.
    pub fn load(&mut self, program: &[u8]) -> Result<(), LoadError> {
        resources::validate(program)?;

        // write the rom data into memory
        self.memory[cpu::PROGRAM_COUNTER..(cpu::PROGRAM_COUNTER + program.len())]
            .copy_from_slice(program);
        log::debug!("loaded {} bytes at {:#06X}", program.len(), cpu::PROGRAM_COUNTER);
        Ok(())
    }

    /// Will load the rom and remember its name.
    pub fn load_rom(&mut self, rom: &Rom) -> Result<(), LoadError> {
        self.load(rom.get_data())?;
        self.name = rom.get_name().to_string();
        Ok(())
    }

    /// will read the instruction at the program counter and move the counter past it
    pub fn fetch(&mut self) -> Result<Opcode, ProcessError> {
        // will build the opcode given from the pointer
        self.opcode = opcode::build_opcode(&self.memory, self.program_counter)?;
        self.program_counter += memory::opcodes::SIZE;
        Ok(self.opcode)
    }

    /// will apply a single decoded instruction
    pub fn execute(&mut self, instruction: Instruction) -> Result<Operation, ProcessError> {
        log::trace!(
            "{:#06X}: {:#06X} {:?}",
            self.program_counter.saturating_sub(memory::opcodes::SIZE),
            self.opcode,
            instruction
        );
        self.calc(instruction)
    }

    /// will advance the program by a single fetch, decode and execute cycle
    pub fn cycle(&mut self) -> Result<Operation, ProcessError> {
        let opcode = self.fetch()?;
        self.execute(Instruction::from(opcode))
    }

    /// Will count down both timers once.
    pub fn tick(&mut self) {
        self.timers.tick();
    }

    /// A tone should be playing as long as the sound timer is running.
    pub fn is_sound_playing(&self) -> bool {
        self.timers.sound.is_running()
    }

    /// will return the sound timer
    pub fn get_sound_timer(&self) -> u8 {
        self.timers.sound.get_value()
    }

    /// will return the delay timer
    pub fn get_delay_timer(&self) -> u8 {
        self.timers.delay.get_value()
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// The last fetched opcode
    pub fn get_opcode(&self) -> Opcode {
        self.opcode
    }

    pub fn get_program_counter(&self) -> usize {
        self.program_counter
    }

    pub fn get_index_register(&self) -> u16 {
        self.index_register.get()
    }

    pub fn get_registers(&self) -> &[u8] {
        &self.registers
    }

    pub fn get_memory(&self) -> &[u8] {
        &self.memory
    }

    /// The return addresses, the last entry is the top of the stack.
    pub fn get_stack(&self) -> &[usize] {
        &self.stack
    }

    pub fn get_stack_pointer(&self) -> usize {
        self.stack.len()
    }

    pub fn get_display(&self) -> &D {
        &self.display
    }

    pub fn get_display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn get_keyboard(&self) -> &K {
        &self.keyboard
    }

    pub fn get_keyboard_mut(&mut self) -> &mut K {
        &mut self.keyboard
    }

    /// Will push the current pointer to the stack
    pub(super) fn push_stack(&mut self, pointer: usize) -> Result<(), StackError> {
        if self.stack.len() == self.stack.capacity() {
            Err(StackError::Overflow(self.stack.capacity()))
        } else {
            self.stack.push(pointer);
            Ok(())
        }
    }

    /// Will pop from the stack
    pub(super) fn pop_stack(&mut self) -> Result<usize, StackError> {
        self.stack.pop().ok_or(StackError::Underflow)
    }

    /// The memory range of `len` bytes starting at the index register, if it fits
    /// into the memory.
    pub(super) fn index_range(&self, len: usize) -> Result<Range<usize>, MemoryError> {
        let address = self.index_register.address();
        if address + len > self.memory.len() {
            Err(MemoryError::OutOfBounds { address, len })
        } else {
            Ok(address..(address + len))
        }
    }
}

impl<D, K> ProgramCounter for ChipSet<D, K> {
    fn step(&mut self, step: ProgramCounterStep) -> Result<(), ProcessError> {
        self.program_counter = step.apply(self.program_counter)?;
        Ok(())
    }
}
