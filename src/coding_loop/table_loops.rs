//! The six loop orders backed by the full 64 KiB product table
//!
//! The outer-output orders hoist one 256-byte table row per (output, input)
//! pair, so their innermost loop is a single lookup and XOR per byte. The
//! inner-output orders touch every output per byte; they trade that locality
//! for a single pass over the input bytes.

use crate::galois;

/// Bytes outermost, inputs middle, outputs innermost
pub(super) fn byte_input_output(
    matrix_rows: &[&[u8]],
    inputs: &[&[u8]],
    outputs: &mut [&mut [u8]],
    offset: usize,
    byte_count: usize,
) {
    let mul = &galois::tables().mul;

    for i_byte in offset..offset + byte_count {
        // Input 0 assigns, the rest accumulate.
        let in_byte = inputs[0][i_byte] as usize;
        for (i_output, output) in outputs.iter_mut().enumerate() {
            output[i_byte] = mul[matrix_rows[i_output][0] as usize][in_byte];
        }

        for (i_input, input) in inputs.iter().enumerate().skip(1) {
            let in_byte = input[i_byte] as usize;
            for (i_output, output) in outputs.iter_mut().enumerate() {
                output[i_byte] ^= mul[matrix_rows[i_output][i_input] as usize][in_byte];
            }
        }
    }
}

/// Bytes outermost, outputs middle, inputs innermost
pub(super) fn byte_output_input(
    matrix_rows: &[&[u8]],
    inputs: &[&[u8]],
    outputs: &mut [&mut [u8]],
    offset: usize,
    byte_count: usize,
) {
    let mul = &galois::tables().mul;

    for i_byte in offset..offset + byte_count {
        for (i_output, output) in outputs.iter_mut().enumerate() {
            let row = matrix_rows[i_output];
            let mut value = 0u8;
            for (i_input, input) in inputs.iter().enumerate() {
                value ^= mul[row[i_input] as usize][input[i_byte] as usize];
            }
            output[i_byte] = value;
        }
    }
}

/// Inputs outermost, bytes middle, outputs innermost
pub(super) fn input_byte_output(
    matrix_rows: &[&[u8]],
    inputs: &[&[u8]],
    outputs: &mut [&mut [u8]],
    offset: usize,
    byte_count: usize,
) {
    let mul = &galois::tables().mul;

    let input = inputs[0];
    for i_byte in offset..offset + byte_count {
        let in_byte = input[i_byte] as usize;
        for (i_output, output) in outputs.iter_mut().enumerate() {
            output[i_byte] = mul[matrix_rows[i_output][0] as usize][in_byte];
        }
    }

    for (i_input, input) in inputs.iter().enumerate().skip(1) {
        for i_byte in offset..offset + byte_count {
            let in_byte = input[i_byte] as usize;
            for (i_output, output) in outputs.iter_mut().enumerate() {
                output[i_byte] ^= mul[matrix_rows[i_output][i_input] as usize][in_byte];
            }
        }
    }
}

/// Inputs outermost, outputs middle, bytes innermost (the default)
pub(super) fn input_output_byte(
    matrix_rows: &[&[u8]],
    inputs: &[&[u8]],
    outputs: &mut [&mut [u8]],
    offset: usize,
    byte_count: usize,
) {
    let mul = &galois::tables().mul;

    let input = inputs[0];
    for (i_output, output) in outputs.iter_mut().enumerate() {
        let mul_row = &mul[matrix_rows[i_output][0] as usize];
        for i_byte in offset..offset + byte_count {
            output[i_byte] = mul_row[input[i_byte] as usize];
        }
    }

    for (i_input, input) in inputs.iter().enumerate().skip(1) {
        for (i_output, output) in outputs.iter_mut().enumerate() {
            let mul_row = &mul[matrix_rows[i_output][i_input] as usize];
            for i_byte in offset..offset + byte_count {
                output[i_byte] ^= mul_row[input[i_byte] as usize];
            }
        }
    }
}

/// Outputs outermost, bytes middle, inputs innermost
pub(super) fn output_byte_input(
    matrix_rows: &[&[u8]],
    inputs: &[&[u8]],
    outputs: &mut [&mut [u8]],
    offset: usize,
    byte_count: usize,
) {
    let mul = &galois::tables().mul;

    for (i_output, output) in outputs.iter_mut().enumerate() {
        let row = matrix_rows[i_output];
        for i_byte in offset..offset + byte_count {
            let mut value = 0u8;
            for (i_input, input) in inputs.iter().enumerate() {
                value ^= mul[row[i_input] as usize][input[i_byte] as usize];
            }
            output[i_byte] = value;
        }
    }
}

/// Outputs outermost, inputs middle, bytes innermost
pub(super) fn output_input_byte(
    matrix_rows: &[&[u8]],
    inputs: &[&[u8]],
    outputs: &mut [&mut [u8]],
    offset: usize,
    byte_count: usize,
) {
    let mul = &galois::tables().mul;

    for (i_output, output) in outputs.iter_mut().enumerate() {
        let row = matrix_rows[i_output];

        let mul_row = &mul[row[0] as usize];
        let input = inputs[0];
        for i_byte in offset..offset + byte_count {
            output[i_byte] = mul_row[input[i_byte] as usize];
        }

        for (i_input, input) in inputs.iter().enumerate().skip(1) {
            let mul_row = &mul[row[i_input] as usize];
            for i_byte in offset..offset + byte_count {
                output[i_byte] ^= mul_row[input[i_byte] as usize];
            }
        }
    }
}

/// Scratch-buffer verification for the output-outermost table orders
///
/// Regenerates each expected row into `temp_buffer`, then compares the whole
/// window against the stored row in one slice comparison.
pub(super) fn check_with_scratch(
    matrix_rows: &[&[u8]],
    inputs: &[&[u8]],
    to_check: &[&[u8]],
    offset: usize,
    byte_count: usize,
    temp_buffer: &mut [u8],
) -> bool {
    let mul = &galois::tables().mul;

    for (i_output, expected) in to_check.iter().enumerate() {
        let row = matrix_rows[i_output];

        let mul_row = &mul[row[0] as usize];
        let input = inputs[0];
        for i_byte in offset..offset + byte_count {
            temp_buffer[i_byte] = mul_row[input[i_byte] as usize];
        }

        for (i_input, input) in inputs.iter().enumerate().skip(1) {
            let mul_row = &mul[row[i_input] as usize];
            for i_byte in offset..offset + byte_count {
                temp_buffer[i_byte] ^= mul_row[input[i_byte] as usize];
            }
        }

        if temp_buffer[offset..offset + byte_count] != expected[offset..offset + byte_count] {
            return false;
        }
    }
    true
}
