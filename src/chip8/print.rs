//! A human readable dump of the machine state, meant for debugging a running program.
//!
//! Memory is printed sixteen bytes per row, consecutive rows holding nothing but
//! zeros are folded into a single line.

use super::ChipSet;
use crate::{
    definitions::{cpu, keyboard},
    devices::{DisplayCommands, KeyboardCommands},
};
use num_traits::Unsigned;
use once_cell::sync::Lazy;
use std::fmt::{self, Write};

/// The amount of bytes shown per memory row.
const ROW_BYTES: usize = 16;

/// `V0 V1 .. VF`, lined up with the two digit register values below it.
static REGISTER_NAMES: Lazy<String> = Lazy::new(|| {
    (0..cpu::register::SIZE)
        .map(|index| format!("V{:X}", index))
        .collect::<Vec<_>>()
        .join(" ")
});

/// `0 1 .. F`, lined up with the key states below it.
static KEY_NAMES: Lazy<String> = Lazy::new(|| {
    (0..keyboard::SIZE)
        .map(|key| format!("{:X}", key))
        .collect::<Vec<_>>()
        .join(" ")
});

/// Writes the values as zero padded hex with the given amount of digits,
/// separated by a single space.
fn hex_list<W, T>(out: &mut W, values: &[T], digits: usize) -> fmt::Result
where
    W: Write,
    T: fmt::UpperHex + Unsigned + Copy,
{
    for (index, value) in values.iter().enumerate() {
        if index > 0 {
            out.write_char(' ')?;
        }
        write!(out, "{:0width$X}", value, width = digits)?;
    }
    Ok(())
}

/// A part of the memory as it is printed.
#[derive(Debug, PartialEq, Eq)]
enum Block<'a> {
    /// A run of rows that only hold zeros, both ends inclusive
    Zero { from: usize, to: usize },
    /// A single row with at least one byte set
    Data { from: usize, bytes: &'a [u8] },
}

/// Splits the memory into rows and folds the zero runs.
fn blocks(memory: &[u8]) -> Vec<Block<'_>> {
    let mut blocks = Vec::new();

    for (index, bytes) in memory.chunks(ROW_BYTES).enumerate() {
        let from = index * ROW_BYTES;
        let to = from + bytes.len() - 1;

        if bytes.iter().any(|byte| *byte != 0) {
            blocks.push(Block::Data { from, bytes });
            continue;
        }

        match blocks.last_mut() {
            Some(Block::Zero { to: end, .. }) => *end = to,
            _ => blocks.push(Block::Zero { from, to }),
        }
    }

    blocks
}

impl fmt::Display for Block<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Block::Zero { from, to } => write!(f, "{:#06X} - {:#06X} : zero", from, to),
            Block::Data { from, bytes } => {
                write!(f, "{:#06X} - {:#06X} : ", from, from + bytes.len() - 1)?;
                hex_list(f, *bytes, 2)
            }
        }
    }
}

impl<D, K> fmt::Display for ChipSet<D, K>
where
    D: DisplayCommands,
    K: KeyboardCommands,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Chipset {{")?;
        writeln!(f, "\tProgram Name : {}", self.name)?;
        writeln!(f, "\tOpcode : {:#06X}", self.opcode)?;
        writeln!(f, "\tProgram Counter : {:#06X}", self.program_counter)?;
        writeln!(f, "\tIndex Register : {:#06X}", self.index_register.get())?;
        writeln!(
            f,
            "\tTimers : delay {:#04X}, sound {:#04X}",
            self.timers.delay.get_value(),
            self.timers.sound.get_value()
        )?;

        writeln!(f, "\tRegisters :\n\t\t{}", *REGISTER_NAMES)?;
        f.write_str("\t\t")?;
        hex_list(f, &self.registers[..], 2)?;
        f.write_char('\n')?;

        writeln!(f, "\tStack ({}/{}) :", self.stack.len(), cpu::stack::SIZE)?;
        f.write_str("\t\t")?;
        if self.stack.is_empty() {
            f.write_str("empty")?;
        } else {
            hex_list(f, &self.stack[..], 4)?;
        }
        f.write_char('\n')?;

        writeln!(f, "\tKeyboard :\n\t\t{}", *KEY_NAMES)?;
        f.write_str("\t\t")?;
        for key in 0..keyboard::SIZE {
            if key > 0 {
                f.write_char(' ')?;
            }
            let pressed = self.keyboard.is_key_pressed(key as u8);
            f.write_char(if pressed { '#' } else { '.' })?;
        }
        f.write_char('\n')?;

        writeln!(f, "\tMemory :")?;
        for block in blocks(&self.memory) {
            writeln!(f, "\t\t{}", block)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::{super::tests, *};
    use crate::resources::Rom;

    const OUTPUT_PRINT: &str = "\
        Chipset {\n\
            \tProgram Name : DRAW\n\
            \tOpcode : 0x00E0\n\
            \tProgram Counter : 0x0202\n\
            \tIndex Register : 0x0000\n\
            \tTimers : delay 0x00, sound 0x00\n\
            \tRegisters :\n\
                \t\tV0 V1 V2 V3 V4 V5 V6 V7 V8 V9 VA VB VC VD VE VF\n\
                \t\t00 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00\n\
            \tStack (0/16) :\n\
                \t\tempty\n\
            \tKeyboard :\n\
                \t\t0 1 2 3 4 5 6 7 8 9 A B C D E F\n\
                \t\t. # . # . # . # . # . # . # . #\n\
            \tMemory :\n\
                \t\t0x0000 - 0x004F : zero\n\
                \t\t0x0050 - 0x005F : F0 90 90 90 F0 20 60 20 20 70 F0 10 F0 80 F0 F0\n\
                \t\t0x0060 - 0x006F : 10 F0 10 F0 90 90 F0 10 10 F0 80 F0 10 F0 F0 80\n\
                \t\t0x0070 - 0x007F : F0 90 F0 F0 10 20 40 40 F0 90 F0 90 F0 F0 90 F0\n\
                \t\t0x0080 - 0x008F : 10 F0 F0 90 F0 90 90 E0 90 E0 90 E0 F0 80 80 80\n\
                \t\t0x0090 - 0x009F : F0 E0 90 90 90 E0 F0 80 F0 80 F0 F0 80 F0 80 80\n\
                \t\t0x00A0 - 0x01FF : zero\n\
                \t\t0x0200 - 0x020F : 00 E0 6C 00 A0 50 D0 15 12 08 00 00 00 00 00 00\n\
                \t\t0x0210 - 0x0FFF : zero\n\
        }";

    #[test]
    fn test_full_print() {
        let rom = Rom::from_opcodes("DRAW", &[0x00E0, 0x6C00, 0xA050, 0xD015, 0x1208]);
        let mut chip = tests::get_default_chip();
        chip.load_rom(&rom).expect("the rom fits");

        let mut keys = [false; keyboard::SIZE];
        for (index, key) in keys.iter_mut().enumerate() {
            *key = index % 2 != 0;
        }
        chip.get_keyboard_mut().set_mult(&keys);

        chip.cycle().expect("clear screen runs");

        let actual = format!("{}", chip);
        for (exp, act) in OUTPUT_PRINT.lines().zip(actual.lines()) {
            assert_eq!(exp, act);
        }
        assert_eq!(OUTPUT_PRINT.lines().count(), actual.lines().count());
    }

    #[test]
    fn test_stack_and_timers_print() {
        let rom = Rom::from_opcodes("CALL", &[0x2204, 0x0000, 0x60FF, 0xF015, 0xF118]);
        let mut chip = tests::get_default_chip();
        chip.load_rom(&rom).expect("the rom fits");

        for _ in 0..4 {
            chip.cycle().expect("the program is valid");
        }

        let output = format!("{}", chip);
        assert!(output.contains("\tStack (1/16) :\n\t\t0202\n"));
        assert!(output.contains("\tTimers : delay 0xFF, sound 0x00\n"));
        assert!(output.contains("\t\tFF 00 00 00 00 00 00 00 00 00 00 00 00 00 00 00\n"));
    }

    #[test]
    fn test_zero_rows_fold() {
        let mut memory = [0u8; 4 * ROW_BYTES];
        memory[ROW_BYTES + 3] = 0xAB;

        let folded = blocks(&memory);
        assert_eq!(
            folded,
            vec![
                Block::Zero { from: 0x00, to: 0x0F },
                Block::Data {
                    from: 0x10,
                    bytes: &memory[0x10..0x20]
                },
                Block::Zero { from: 0x20, to: 0x3F },
            ]
        );
        assert_eq!(folded[2].to_string(), "0x0020 - 0x003F : zero");
        assert_eq!(
            folded[1].to_string(),
            "0x0010 - 0x001F : 00 00 00 AB 00 00 00 00 00 00 00 00 00 00 00 00"
        );
    }
}
