use crate::{
    definitions::{cpu, display},
    devices::{DisplayCommands, KeyboardCommands},
    error::ProcessError,
    opcode::{ArithmeticOp, ChipOpcodes, KeyOp, MiscOp, Operation, ProgramCounterStep},
};

use super::ChipSet;

/// The flag register `VF`
const FLAG: usize = cpu::register::LAST;

impl<D, K> ChipOpcodes for ChipSet<D, K>
where
    D: DisplayCommands,
    K: KeyboardCommands,
{
    fn clear(&mut self) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        // 00E0
        self.display.clear();
        Ok((ProgramCounterStep::Next, Operation::Draw))
    }

    fn ret(&mut self) -> Result<ProgramCounterStep, ProcessError> {
        // 00EE
        // Return from sub routine => pop from stack
        let pc = self.pop_stack()?;
        log::debug!("return to {:#06X}", pc);
        Ok(ProgramCounterStep::Jump(pc))
    }

    fn jump(&mut self, nnn: u16) -> Result<ProgramCounterStep, ProcessError> {
        // 1NNN
        Ok(ProgramCounterStep::Jump(nnn as usize))
    }

    fn call(&mut self, nnn: u16) -> Result<ProgramCounterStep, ProcessError> {
        // 2NNN
        // Check the target before anything is pushed, a failed call leaves the stack alone.
        let step = ProgramCounterStep::Jump(nnn as usize);
        step.apply(self.program_counter)?;

        // The program counter already points to the instruction after the call,
        // that is where the matching return continues.
        self.push_stack(self.program_counter)?;
        log::debug!("call {:#06X} from {:#06X}", nnn, self.program_counter);
        Ok(step)
    }

    fn skip_const(
        &mut self,
        x: usize,
        nn: u8,
        equal: bool,
    ) -> Result<ProgramCounterStep, ProcessError> {
        // 3XNN / 4XNN
        Ok(ProgramCounterStep::cond((self.registers[x] == nn) == equal))
    }

    fn skip_register(
        &mut self,
        x: usize,
        y: usize,
        equal: bool,
    ) -> Result<ProgramCounterStep, ProcessError> {
        // 5XY0 / 9XY0
        Ok(ProgramCounterStep::cond(
            (self.registers[x] == self.registers[y]) == equal,
        ))
    }

    fn set(&mut self, x: usize, nn: u8) -> Result<ProgramCounterStep, ProcessError> {
        // 6XNN
        self.registers[x] = nn;
        Ok(ProgramCounterStep::Next)
    }

    fn add(&mut self, x: usize, nn: u8) -> Result<ProgramCounterStep, ProcessError> {
        // 7XNN
        // let VX overflow, but ignore carry
        self.registers[x] = self.registers[x].wrapping_add(nn);
        Ok(ProgramCounterStep::Next)
    }

    fn arithmetic(
        &mut self,
        op: ArithmeticOp,
        x: usize,
        y: usize,
    ) -> Result<ProgramCounterStep, ProcessError> {
        let vx = self.registers[x];
        let vy = self.registers[y];

        // The flag is written last, so that it wins if `X` is `F`.
        let (result, flag) = match op {
            ArithmeticOp::Assign => (vy, None),
            ArithmeticOp::Or => (vx | vy, None),
            ArithmeticOp::And => (vx & vy, None),
            ArithmeticOp::Xor => (vx ^ vy, None),
            ArithmeticOp::Add => {
                let (res, carry) = vx.overflowing_add(vy);
                (res, Some(carry as u8))
            }
            ArithmeticOp::Sub => (vx.wrapping_sub(vy), Some((vx > vy) as u8)),
            ArithmeticOp::ShiftRight => (vx >> 1, Some(vx & 1)),
            ArithmeticOp::SubReverse => (vy.wrapping_sub(vx), Some((vy > vx) as u8)),
            ArithmeticOp::ShiftLeft => (vx << 1, Some(vx >> 7)),
        };

        self.registers[x] = result;
        if let Some(flag) = flag {
            self.registers[FLAG] = flag;
        }
        Ok(ProgramCounterStep::Next)
    }

    fn set_index(&mut self, nnn: u16) -> Result<ProgramCounterStep, ProcessError> {
        // ANNN
        self.index_register.set(nnn);
        Ok(ProgramCounterStep::Next)
    }

    fn jump_offset(&mut self, nnn: u16) -> Result<ProgramCounterStep, ProcessError> {
        // BNNN
        // The target wraps around at the end of the memory.
        let target = (nnn as usize + self.registers[0] as usize) % self.memory.len();
        Ok(ProgramCounterStep::Jump(target))
    }

    fn random(&mut self, x: usize, nn: u8) -> Result<ProgramCounterStep, ProcessError> {
        // CXNN
        // using a fill bytes call here, as the trait RngCore does not
        // support random u8.
        let mut rand: [u8; 1] = [0];
        self.rng.fill_bytes(&mut rand);
        self.registers[x] = nn & rand[0];
        Ok(ProgramCounterStep::Next)
    }

    fn draw(
        &mut self,
        x: usize,
        y: usize,
        n: u8,
    ) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        // DXYN
        // see https://tobiasvl.github.io/blog/write-a-chip-8-emulator/
        let sprite = self.index_range(n as usize)?;

        let coorx = self.registers[x] as usize % display::WIDTH;
        let coory = self.registers[y] as usize % display::HEIGHT;

        // Set VF to 0
        self.registers[FLAG] = 0;

        for (i, row) in self.memory[sprite].iter().enumerate() {
            let py = coory + i;

            // clipped at the bottom edge, not wrapped
            if py >= display::HEIGHT {
                break;
            }

            for bit in 0..display::SPRITE_WIDTH {
                let px = coorx + bit;

                if px >= display::WIDTH {
                    break;
                }

                let mask: u8 = 0x80 >> bit;
                if row & mask == 0 {
                    continue;
                }

                if self.display.get_pixel(px, py) {
                    self.registers[FLAG] = 1;
                }
                self.display.toggle_pixel(px, py);
            }
        }

        Ok((ProgramCounterStep::Next, Operation::Draw))
    }

    fn key(&mut self, op: KeyOp, x: usize) -> Result<ProgramCounterStep, ProcessError> {
        let pressed = self.keyboard.is_key_pressed(self.registers[x]);
        let step = match op {
            // EX9E
            KeyOp::Pressed => ProgramCounterStep::cond(pressed),
            // EXA1
            KeyOp::NotPressed => ProgramCounterStep::cond(!pressed),
        };
        Ok(step)
    }

    fn misc(
        &mut self,
        op: MiscOp,
        x: usize,
    ) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        match op {
            MiscOp::GetDelayTimer => {
                // FX07
                self.registers[x] = self.timers.delay.get_value();
            }
            MiscOp::AwaitKeyPress => {
                // FX0A
                // There is no real blocking, the instruction is run again
                // until the keyboard reports a key.
                if !self.keyboard.any_key_pressed() {
                    return Ok((ProgramCounterStep::Repeat, Operation::Wait));
                }
                let key = self.keyboard.lowest_pressed_key();
                log::debug!("key {:#X} pressed while waiting", key);
                self.registers[x] = key;
            }
            MiscOp::SetDelayTimer => {
                // FX15
                self.timers.delay.set_value(self.registers[x]);
            }
            MiscOp::SetSoundTimer => {
                // FX18
                self.timers.sound.set_value(self.registers[x]);
            }
            MiscOp::AddVxToI => {
                // FX1E
                // VF is not affected
                self.index_register.add(self.registers[x] as u16);
            }
            MiscOp::SetIToSprite => {
                // FX29
                // only the low nibble selects the glyph
                let glyph = (self.registers[x] & 0x0F) as usize;
                let location = display::fontset::LOCATION + glyph * display::fontset::GLYPH_SIZE;
                self.index_register.set(location as u16);
            }
            MiscOp::StoreBcd => {
                // FX33
                let range = self.index_range(3)?;
                let r = self.registers[x];
                self.memory[range].copy_from_slice(&[r / 100, r / 10 % 10, r % 10]);
            }
            MiscOp::StoreV0ToVx => {
                // FX55
                // I itself is left unmodified.
                let range = self.index_range(x + 1)?;
                self.memory[range].copy_from_slice(&self.registers[..=x]);
            }
            MiscOp::FillV0ToVx => {
                // FX65
                let range = self.index_range(x + 1)?;
                self.registers[..=x].copy_from_slice(&self.memory[range]);
            }
        }
        Ok((ProgramCounterStep::Next, Operation::None))
    }
}
