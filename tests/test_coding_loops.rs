//! Equivalence and verification tests across all twelve coding loops

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rs_erasure::coding_loop::{CodingLoop, ALL_CODING_LOOPS, DEFAULT_CODING_LOOP};
use rs_erasure::galois;

fn random_case(
    rng: &mut StdRng,
    input_count: usize,
    output_count: usize,
    shard_length: usize,
) -> (Vec<Vec<u8>>, Vec<Vec<u8>>) {
    let matrix_rows = (0..output_count)
        .map(|_| (0..input_count).map(|_| rng.gen()).collect())
        .collect();
    let inputs = (0..input_count)
        .map(|_| (0..shard_length).map(|_| rng.gen()).collect())
        .collect();
    (matrix_rows, inputs)
}

fn run_loop(
    coding_loop: CodingLoop,
    matrix_rows: &[Vec<u8>],
    inputs: &[Vec<u8>],
    outputs: &mut [Vec<u8>],
    offset: usize,
    byte_count: usize,
) {
    let rows: Vec<&[u8]> = matrix_rows.iter().map(|r| r.as_slice()).collect();
    let ins: Vec<&[u8]> = inputs.iter().map(|s| s.as_slice()).collect();
    let mut outs: Vec<&mut [u8]> = outputs.iter_mut().map(|s| s.as_mut_slice()).collect();
    coding_loop.code_some_shards(&rows, &ins, &mut outs, offset, byte_count);
}

/// Reference product computed directly from the field primitives
fn reference_outputs(
    matrix_rows: &[Vec<u8>],
    inputs: &[Vec<u8>],
    shard_length: usize,
) -> Vec<Vec<u8>> {
    matrix_rows
        .iter()
        .map(|row| {
            (0..shard_length)
                .map(|y| {
                    row.iter()
                        .zip(inputs)
                        .fold(0u8, |acc, (&m, input)| acc ^ galois::multiply(m, input[y]))
                })
                .collect()
        })
        .collect()
}

// ============================================================================
// Equivalence
// ============================================================================

#[test]
fn test_all_loops_agree_with_reference() {
    let mut rng = StdRng::seed_from_u64(0x5EED);

    for &(input_count, output_count, shard_length) in
        &[(1, 1, 1), (3, 2, 17), (10, 4, 64), (5, 1, 256)]
    {
        let (matrix_rows, inputs) = random_case(&mut rng, input_count, output_count, shard_length);
        let expected = reference_outputs(&matrix_rows, &inputs, shard_length);

        for coding_loop in ALL_CODING_LOOPS {
            let mut outputs = vec![vec![0u8; shard_length]; output_count];
            run_loop(
                coding_loop,
                &matrix_rows,
                &inputs,
                &mut outputs,
                0,
                shard_length,
            );
            assert_eq!(
                outputs, expected,
                "{coding_loop} diverged on {input_count}x{output_count}x{shard_length}"
            );
        }
    }
}

#[test]
fn test_loops_overwrite_stale_output() {
    // Outputs start with garbage; every variant must fully overwrite the
    // window rather than accumulate into it.
    let mut rng = StdRng::seed_from_u64(7);
    let (matrix_rows, inputs) = random_case(&mut rng, 4, 3, 32);
    let expected = reference_outputs(&matrix_rows, &inputs, 32);

    for coding_loop in ALL_CODING_LOOPS {
        let mut outputs = vec![vec![0xFFu8; 32]; 3];
        run_loop(coding_loop, &matrix_rows, &inputs, &mut outputs, 0, 32);
        assert_eq!(outputs, expected, "{coding_loop} kept stale bytes");
    }
}

#[test]
fn test_window_isolation() {
    let mut rng = StdRng::seed_from_u64(11);
    let (matrix_rows, inputs) = random_case(&mut rng, 3, 2, 24);

    for coding_loop in ALL_CODING_LOOPS {
        let mut outputs = vec![vec![0xAAu8; 24]; 2];
        run_loop(coding_loop, &matrix_rows, &inputs, &mut outputs, 8, 8);

        let expected = reference_outputs(&matrix_rows, &inputs, 24);
        for (output, expected_row) in outputs.iter().zip(&expected) {
            assert!(output[..8].iter().all(|&b| b == 0xAA), "{coding_loop}");
            assert!(output[16..].iter().all(|&b| b == 0xAA), "{coding_loop}");
            assert_eq!(output[8..16], expected_row[8..16], "{coding_loop}");
        }
    }
}

#[test]
fn test_empty_window_writes_nothing() {
    let mut rng = StdRng::seed_from_u64(13);
    let (matrix_rows, inputs) = random_case(&mut rng, 2, 2, 8);

    for coding_loop in ALL_CODING_LOOPS {
        let mut outputs = vec![vec![0x77u8; 8]; 2];
        run_loop(coding_loop, &matrix_rows, &inputs, &mut outputs, 4, 0);
        assert!(outputs.iter().all(|o| o.iter().all(|&b| b == 0x77)));
    }
}

// ============================================================================
// Verification
// ============================================================================

#[test]
fn test_check_passes_and_catches_single_byte_flips() {
    let mut rng = StdRng::seed_from_u64(17);
    let (matrix_rows, inputs) = random_case(&mut rng, 4, 2, 16);
    let correct = reference_outputs(&matrix_rows, &inputs, 16);

    let rows: Vec<&[u8]> = matrix_rows.iter().map(|r| r.as_slice()).collect();
    let ins: Vec<&[u8]> = inputs.iter().map(|s| s.as_slice()).collect();

    for coding_loop in ALL_CODING_LOOPS {
        {
            let checks: Vec<&[u8]> = correct.iter().map(|s| s.as_slice()).collect();
            assert!(
                coding_loop.check_some_shards(&rows, &ins, &checks, 0, 16),
                "{coding_loop} rejected a valid codeword"
            );
        }

        for flip_shard in 0..2 {
            for flip_byte in 0..16 {
                let mut corrupted = correct.clone();
                corrupted[flip_shard][flip_byte] ^= 1;
                let checks: Vec<&[u8]> = corrupted.iter().map(|s| s.as_slice()).collect();
                assert!(
                    !coding_loop.check_some_shards(&rows, &ins, &checks, 0, 16),
                    "{coding_loop} missed a flip at [{flip_shard}][{flip_byte}]"
                );
            }
        }
    }
}

#[test]
fn test_scratch_check_agrees_with_fallback() {
    let mut rng = StdRng::seed_from_u64(19);
    let (matrix_rows, inputs) = random_case(&mut rng, 5, 3, 40);
    let correct = reference_outputs(&matrix_rows, &inputs, 40);

    let rows: Vec<&[u8]> = matrix_rows.iter().map(|r| r.as_slice()).collect();
    let ins: Vec<&[u8]> = inputs.iter().map(|s| s.as_slice()).collect();

    for coding_loop in ALL_CODING_LOOPS {
        for corrupt in [false, true] {
            let mut candidate = correct.clone();
            if corrupt {
                candidate[2][25] ^= 0x40;
            }
            let checks: Vec<&[u8]> = candidate.iter().map(|s| s.as_slice()).collect();

            let plain = coding_loop.check_some_shards(&rows, &ins, &checks, 8, 24);
            let mut temp_buffer = vec![0u8; 40];
            let scratch = coding_loop
                .check_some_shards_with_buffer(&rows, &ins, &checks, 8, 24, &mut temp_buffer);
            assert_eq!(plain, scratch, "{coding_loop} corrupt={corrupt}");
            assert_eq!(plain, !corrupt, "{coding_loop} corrupt={corrupt}");
        }
    }
}

// ============================================================================
// Selector
// ============================================================================

#[test]
fn test_twelve_distinct_loops() {
    assert_eq!(ALL_CODING_LOOPS.len(), 12);
    for (i, a) in ALL_CODING_LOOPS.iter().enumerate() {
        for b in &ALL_CODING_LOOPS[i + 1..] {
            assert_ne!(a, b);
            assert_ne!(a.name(), b.name());
        }
    }
    assert!(ALL_CODING_LOOPS.contains(&DEFAULT_CODING_LOOP));
}

#[test]
fn test_name_round_trip() {
    for coding_loop in ALL_CODING_LOOPS {
        let parsed: CodingLoop = coding_loop.name().parse().unwrap();
        assert_eq!(parsed, coding_loop);
        assert_eq!(coding_loop.to_string(), coding_loop.name());
    }
    assert!("table".parse::<CodingLoop>().is_err());
}
