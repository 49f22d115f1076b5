use chip::{
    chip8::ChipSet,
    devices::{FrameBuffer, Keyboard},
    resources::Rom,
    Runner,
};
use criterion::{criterion_group, criterion_main, Criterion};
use once_cell::sync::Lazy;

const ROM_NAME: &str = "COUNTER";

/// Counts `V1` up, shows its last digit and does a bit of arithmetic on the way.
static BASE_ROM: Lazy<Rom> = Lazy::new(|| {
    Rom::from_opcodes(
        ROM_NAME,
        &[
            0x00E0, // clear
            0x7101, // V1 += 1
            0x8210, // V2 = V1
            0x620A, // V2 = 10
            0x8314, // V3 += V1
            0xF129, // I = glyph of V1
            0xD005, // draw at (V0, V0)
            0xA300, // I = 0x300
            0xF133, // BCD of V1
            0xF265, // V0..V2 = [I..]
            0x6000, // V0 = 0
            0x1200, // loop
        ],
    )
});

/// will setup the default configured chip
fn get_default_chip() -> ChipSet<FrameBuffer, Keyboard> {
    ChipSet::with_rom(&BASE_ROM, FrameBuffer::new(), Keyboard::new())
        .expect("The benchmark rom fits into memory.")
}

pub fn frame_bench(c: &mut Criterion) {
    let mut chip = get_default_chip();
    let runner = Runner::default();
    c.bench_function("frame_bench", |b| {
        b.iter(|| runner.run_frame(&mut chip).expect("The benchmark rom is valid."));
    });
}

pub fn print_bench(c: &mut Criterion) {
    let mut chip = get_default_chip();
    let _ = Runner::default().run_frame(&mut chip);
    c.bench_function("print_bench", |b| {
        b.iter(|| {
            let _ = format!("{}", chip);
        });
    });
}

criterion_group!(benches, frame_bench, print_bench);
criterion_main!(benches);
