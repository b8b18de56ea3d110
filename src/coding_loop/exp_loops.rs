//! The six loop orders backed by the log/exp multiply
//!
//! Same nestings as the table back-end, but every product goes through
//! [`galois::multiply`] instead of the materialized table. Slower on most
//! CPUs; kept because the benchmark story is per machine, not universal.

use crate::galois;

/// Bytes outermost, inputs middle, outputs innermost
pub(super) fn byte_input_output(
    matrix_rows: &[&[u8]],
    inputs: &[&[u8]],
    outputs: &mut [&mut [u8]],
    offset: usize,
    byte_count: usize,
) {
    for i_byte in offset..offset + byte_count {
        let in_byte = inputs[0][i_byte];
        for (i_output, output) in outputs.iter_mut().enumerate() {
            output[i_byte] = galois::multiply(matrix_rows[i_output][0], in_byte);
        }

        for (i_input, input) in inputs.iter().enumerate().skip(1) {
            let in_byte = input[i_byte];
            for (i_output, output) in outputs.iter_mut().enumerate() {
                output[i_byte] ^= galois::multiply(matrix_rows[i_output][i_input], in_byte);
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
    for i_byte in offset..offset + byte_count {
        for (i_output, output) in outputs.iter_mut().enumerate() {
            let row = matrix_rows[i_output];
            let mut value = 0u8;
            for (i_input, input) in inputs.iter().enumerate() {
                value ^= galois::multiply(row[i_input], input[i_byte]);
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
    let input = inputs[0];
    for i_byte in offset..offset + byte_count {
        let in_byte = input[i_byte];
        for (i_output, output) in outputs.iter_mut().enumerate() {
            output[i_byte] = galois::multiply(matrix_rows[i_output][0], in_byte);
        }
    }

    for (i_input, input) in inputs.iter().enumerate().skip(1) {
        for i_byte in offset..offset + byte_count {
            let in_byte = input[i_byte];
            for (i_output, output) in outputs.iter_mut().enumerate() {
                output[i_byte] ^= galois::multiply(matrix_rows[i_output][i_input], in_byte);
            }
        }
    }
}

/// Inputs outermost, outputs middle, bytes innermost
pub(super) fn input_output_byte(
    matrix_rows: &[&[u8]],
    inputs: &[&[u8]],
    outputs: &mut [&mut [u8]],
    offset: usize,
    byte_count: usize,
) {
    let input = inputs[0];
    for (i_output, output) in outputs.iter_mut().enumerate() {
        let coefficient = matrix_rows[i_output][0];
        for i_byte in offset..offset + byte_count {
            output[i_byte] = galois::multiply(coefficient, input[i_byte]);
        }
    }

    for (i_input, input) in inputs.iter().enumerate().skip(1) {
        for (i_output, output) in outputs.iter_mut().enumerate() {
            let coefficient = matrix_rows[i_output][i_input];
            for i_byte in offset..offset + byte_count {
                output[i_byte] ^= galois::multiply(coefficient, input[i_byte]);
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
    for (i_output, output) in outputs.iter_mut().enumerate() {
        let row = matrix_rows[i_output];
        for i_byte in offset..offset + byte_count {
            let mut value = 0u8;
            for (i_input, input) in inputs.iter().enumerate() {
                value ^= galois::multiply(row[i_input], input[i_byte]);
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
    for (i_output, output) in outputs.iter_mut().enumerate() {
        let row = matrix_rows[i_output];

        let coefficient = row[0];
        let input = inputs[0];
        for i_byte in offset..offset + byte_count {
            output[i_byte] = galois::multiply(coefficient, input[i_byte]);
        }

        for (i_input, input) in inputs.iter().enumerate().skip(1) {
            let coefficient = row[i_input];
            for i_byte in offset..offset + byte_count {
                output[i_byte] ^= galois::multiply(coefficient, input[i_byte]);
            }
        }
    }
}
