//! Buffer size robustness for the processor.
//!
//! Every block size from 1 to 4096 must process without panics or
//! non-finite output, and splitting a signal into different block sizes
//! must not change the result while parameters hold still.

use drekavac_plugin::{DrekavacProcessor, DrekavacShared, ProcessorConfig};

const BUFFER_SIZES: &[usize] = &[1, 2, 7, 32, 64, 128, 256, 512, 1024, 2048, 4096];
const SAMPLE_RATE: f32 = 48000.0;
const MAX_BLOCK: usize = 512;

fn is_finite_buffer(buf: &[f32]) -> bool {
    buf.iter().all(|s| s.is_finite())
}

fn signal(len: usize) -> Vec<f32> {
    (0..len).map(|i| (i as f32 * 0.1).sin() * 0.5).collect()
}

fn prepared(channels: usize) -> DrekavacProcessor {
    let mut processor = DrekavacProcessor::new(DrekavacShared::new(), ProcessorConfig::default());
    processor.prepare(SAMPLE_RATE, MAX_BLOCK, channels);
    processor
}

#[test]
fn planar_stereo_all_sizes() {
    for &size in BUFFER_SIZES {
        let mut processor = prepared(2);
        let mut left = signal(size);
        let mut right = left.clone();
        processor.process_planar(&mut [&mut left[..], &mut right[..]]);

        assert!(is_finite_buffer(&left), "non-finite left output at buffer size {size}");
        assert!(is_finite_buffer(&right), "non-finite right output at buffer size {size}");
        assert_eq!(left, right, "identical channels diverged at buffer size {size}");
    }
}

#[test]
fn interleaved_all_sizes() {
    for &size in BUFFER_SIZES {
        let mut processor = prepared(2);
        let mut buffer: Vec<f32> = signal(size).iter().flat_map(|&s| [s, -s]).collect();
        processor.process_interleaved(&mut buffer);
        assert!(is_finite_buffer(&buffer), "non-finite output at buffer size {size}");
    }
}

#[test]
fn block_partitioning_does_not_change_output() {
    let input = signal(5000);

    let mut reference = prepared(1);
    let mut expected = input.clone();
    reference.process_planar(&mut [&mut expected[..]]);

    for &size in &[1usize, 7, 64, 333, 512, 4096] {
        let mut processor = prepared(1);
        let mut output = input.clone();
        for chunk in output.chunks_mut(size) {
            processor.process_planar(&mut [chunk]);
        }
        for (i, (a, b)) in output.iter().zip(&expected).enumerate() {
            assert!((a - b).abs() < 1e-6, "block size {size}, sample {i}: {a} vs {b}");
        }
    }
}

#[test]
fn single_sample_blocks_repeated() {
    let mut processor = prepared(1);
    for i in 0..1000 {
        let mut sample = [(i as f32 * 0.05).sin() * 0.5];
        processor.process_planar(&mut [&mut sample[..]]);
        assert!(
            sample[0].is_finite(),
            "non-finite output at single-sample iteration {i}"
        );
    }
}

#[test]
fn odd_interleaved_length_leaves_partial_frame() {
    let mut processor = prepared(2);
    let mut buffer = vec![0.3f32; 9];
    processor.process_interleaved(&mut buffer);
    assert_eq!(buffer[8], 0.3);
}
