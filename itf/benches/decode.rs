use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use itf::{apply_gains, decode_frames, extract_channels, CardMap, CardSettings, Frame};
use itf_core::format::constants::{CHANNEL_COUNT, FRAME_SIZE, MAX_BAD_FRAMES};
use itf_core::format::{SAMPLE_MAX, SAMPLE_MIN};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// About ten seconds of recording
const FRAMES: usize = 5000;

fn random_recording(frames: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(0x1753);
    let mut bytes = Vec::with_capacity(frames * FRAME_SIZE);
    for index in 0..frames {
        let mut frame = Frame::blank(index as u8);
        frame.parallel_port = rng.gen();
        for channel in 0..CHANNEL_COUNT {
            frame
                .set_channel_code(channel, rng.gen_range(SAMPLE_MIN..=SAMPLE_MAX))
                .unwrap();
        }
        bytes.extend_from_slice(&frame.to_bytes());
    }
    bytes
}

fn benchmark_decode_frames(c: &mut Criterion) {
    let bytes = random_recording(FRAMES);

    let mut group = c.benchmark_group("decode");
    group.throughput(Throughput::Bytes(bytes.len() as u64));
    group.bench_function("decode_frames", |b| {
        b.iter(|| decode_frames(black_box(&bytes), MAX_BAD_FRAMES).unwrap());
    });
    group.finish();
}

fn benchmark_extract_and_calibrate(c: &mut Criterion) {
    let bytes = random_recording(FRAMES);
    let (frames, _) = decode_frames(&bytes, MAX_BAD_FRAMES).unwrap();
    let settings = CardSettings::new();
    let card_map = CardMap::identity();

    let mut group = c.benchmark_group("channels");
    group.throughput(Throughput::Elements((FRAMES * CHANNEL_COUNT) as u64));
    group.bench_function("extract_channels", |b| {
        b.iter(|| extract_channels(black_box(&frames)).unwrap());
    });
    group.bench_function("extract_and_calibrate", |b| {
        b.iter(|| {
            let mut set = extract_channels(black_box(&frames)).unwrap();
            apply_gains(&mut set.channels, &settings, &card_map).unwrap();
            set
        });
    });
    group.finish();
}

criterion_group!(benches, benchmark_decode_frames, benchmark_extract_and_calibrate);
criterion_main!(benches);
