use std::time::Duration;

use crate::{
    chip8::ChipSet,
    definitions::{cpu, memory, timer as timing},
    devices::{DisplayCommands, KeyboardCommands},
    error::ProcessError,
    opcode::Operation,
    timer,
};

/// The runtime settings of the frame controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// How many instructions are run between two timer ticks.
    pub instructions_per_frame: usize,
    /// How often a frame is run per second, the timers count down at this rate.
    pub timer_hertz: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            instructions_per_frame: cpu::INSTRUCTIONS_PER_FRAME,
            timer_hertz: timing::HERTZ,
        }
    }
}

/// What happened during a single frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// The amount of cycles that were run
    pub executed: usize,
    /// The display changed and should be presented again
    pub redraw: bool,
    /// The program waits for a key press
    pub waiting: bool,
    /// The host should be playing a tone
    pub sound: bool,
}

/// Runs the chipset in batches of instructions, one batch per frame. The runner does
/// not own any real time pacing, the host calls [`run_frame`](Runner::run_frame) once
/// per [`frame_interval`](Runner::frame_interval).
#[derive(Debug, Default, Clone, Copy)]
pub struct Runner {
    config: Config,
}

impl Runner {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn get_config(&self) -> &Config {
        &self.config
    }

    /// The nominal time between two frames.
    pub fn frame_interval(&self) -> Duration {
        timer::interval(self.config.timer_hertz)
    }

    /// Will run a single frame, that is up to `instructions_per_frame` cycles followed by
    /// a single timer tick.
    ///
    /// Unsupported opcodes are skipped. Any other fault stops the frame and is returned,
    /// the timers are not ticked in that case. While the program waits for a key the
    /// rest of the batch is dropped, but the timers keep counting down.
    pub fn run_frame<D, K>(&self, chip: &mut ChipSet<D, K>) -> Result<FrameReport, ProcessError>
    where
        D: DisplayCommands,
        K: KeyboardCommands,
    {
        let mut report = FrameReport::default();

        while report.executed < self.config.instructions_per_frame {
            report.executed += 1;

            match chip.cycle() {
                Ok(Operation::None) => {}
                Ok(Operation::Draw) => report.redraw = true,
                Ok(Operation::Wait) => {
                    report.waiting = true;
                    break;
                }
                Err(err) if err.is_unknown_opcode() => {
                    log::warn!(
                        "{}, skipping it at {:#06X}",
                        err,
                        chip.get_program_counter()
                            .saturating_sub(memory::opcodes::SIZE)
                    );
                }
                Err(err) => {
                    log::error!(
                        "stopping frame of {:?} at {:#06X}: {}",
                        chip.get_name(),
                        chip.get_program_counter(),
                        err
                    );
                    return Err(err);
                }
            }
        }

        chip.tick();
        report.sound = chip.is_sound_playing();
        Ok(report)
    }
}
