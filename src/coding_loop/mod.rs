//! Interchangeable inner-loop strategies for the matrix-shard product
//!
//! The coding primitive computes, for each output shard `o` and byte `y` in
//! the window,
//!
//! ```text
//! out[o][y] = XOR over i of multiply(matrix_rows[o][i], inputs[i][y])
//! ```
//!
//! The three loops (byte / input / output) can be nested in six orders, and
//! the per-byte multiply can go through the full product table or the
//! log/exp tables. That makes twelve variants, all observationally
//! equivalent; they exist so the fastest one for a given CPU can be picked
//! by benchmark. Dispatch happens once per call, never per byte.

mod exp_loops;
mod table_loops;

use crate::error::Error;
use crate::galois;
use std::fmt;
use std::str::FromStr;

/// One nesting order of the three coding loops plus a multiply back-end
///
/// Variant names read outermost loop first: `InputOutputByteTable` iterates
/// inputs outermost, outputs in the middle, bytes innermost, multiplying
/// through the product table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodingLoop {
    ByteInputOutputTable,
    ByteInputOutputExp,
    ByteOutputInputTable,
    ByteOutputInputExp,
    InputByteOutputTable,
    InputByteOutputExp,
    InputOutputByteTable,
    InputOutputByteExp,
    OutputByteInputTable,
    OutputByteInputExp,
    OutputInputByteTable,
    OutputInputByteExp,
}

/// Every coding loop, for benchmarks and equivalence tests
pub const ALL_CODING_LOOPS: [CodingLoop; 12] = [
    CodingLoop::ByteInputOutputTable,
    CodingLoop::ByteInputOutputExp,
    CodingLoop::ByteOutputInputTable,
    CodingLoop::ByteOutputInputExp,
    CodingLoop::InputByteOutputTable,
    CodingLoop::InputByteOutputExp,
    CodingLoop::InputOutputByteTable,
    CodingLoop::InputOutputByteExp,
    CodingLoop::OutputByteInputTable,
    CodingLoop::OutputByteInputExp,
    CodingLoop::OutputInputByteTable,
    CodingLoop::OutputInputByteExp,
];

/// The loop used when a codec is built without an explicit selection
pub const DEFAULT_CODING_LOOP: CodingLoop = CodingLoop::InputOutputByteTable;

impl CodingLoop {
    /// Stable kebab-case name, also accepted by `FromStr`
    pub const fn name(self) -> &'static str {
        match self {
            CodingLoop::ByteInputOutputTable => "byte-input-output-table",
            CodingLoop::ByteInputOutputExp => "byte-input-output-exp",
            CodingLoop::ByteOutputInputTable => "byte-output-input-table",
            CodingLoop::ByteOutputInputExp => "byte-output-input-exp",
            CodingLoop::InputByteOutputTable => "input-byte-output-table",
            CodingLoop::InputByteOutputExp => "input-byte-output-exp",
            CodingLoop::InputOutputByteTable => "input-output-byte-table",
            CodingLoop::InputOutputByteExp => "input-output-byte-exp",
            CodingLoop::OutputByteInputTable => "output-byte-input-table",
            CodingLoop::OutputByteInputExp => "output-byte-input-exp",
            CodingLoop::OutputInputByteTable => "output-input-byte-table",
            CodingLoop::OutputInputByteExp => "output-input-byte-exp",
        }
    }

    /// Multiply `matrix_rows` by the input shards, overwriting the output
    /// shards over `offset..offset + byte_count`
    ///
    /// `matrix_rows[o]` must have one coefficient per input shard, and every
    /// shard must cover the byte window. `inputs` must not be empty.
    pub fn code_some_shards(
        self,
        matrix_rows: &[&[u8]],
        inputs: &[&[u8]],
        outputs: &mut [&mut [u8]],
        offset: usize,
        byte_count: usize,
    ) {
        debug_assert_eq!(matrix_rows.len(), outputs.len());
        debug_assert!(!inputs.is_empty());

        match self {
            CodingLoop::ByteInputOutputTable => {
                table_loops::byte_input_output(matrix_rows, inputs, outputs, offset, byte_count)
            }
            CodingLoop::ByteInputOutputExp => {
                exp_loops::byte_input_output(matrix_rows, inputs, outputs, offset, byte_count)
            }
            CodingLoop::ByteOutputInputTable => {
                table_loops::byte_output_input(matrix_rows, inputs, outputs, offset, byte_count)
            }
            CodingLoop::ByteOutputInputExp => {
                exp_loops::byte_output_input(matrix_rows, inputs, outputs, offset, byte_count)
            }
            CodingLoop::InputByteOutputTable => {
                table_loops::input_byte_output(matrix_rows, inputs, outputs, offset, byte_count)
            }
            CodingLoop::InputByteOutputExp => {
                exp_loops::input_byte_output(matrix_rows, inputs, outputs, offset, byte_count)
            }
            CodingLoop::InputOutputByteTable => {
                table_loops::input_output_byte(matrix_rows, inputs, outputs, offset, byte_count)
            }
            CodingLoop::InputOutputByteExp => {
                exp_loops::input_output_byte(matrix_rows, inputs, outputs, offset, byte_count)
            }
            CodingLoop::OutputByteInputTable => {
                table_loops::output_byte_input(matrix_rows, inputs, outputs, offset, byte_count)
            }
            CodingLoop::OutputByteInputExp => {
                exp_loops::output_byte_input(matrix_rows, inputs, outputs, offset, byte_count)
            }
            CodingLoop::OutputInputByteTable => {
                table_loops::output_input_byte(matrix_rows, inputs, outputs, offset, byte_count)
            }
            CodingLoop::OutputInputByteExp => {
                exp_loops::output_input_byte(matrix_rows, inputs, outputs, offset, byte_count)
            }
        }
    }

    /// Recompute the product and compare it against `to_check`, without
    /// writing anywhere
    ///
    /// Returns `false` at the first mismatching byte.
    pub fn check_some_shards(
        self,
        matrix_rows: &[&[u8]],
        inputs: &[&[u8]],
        to_check: &[&[u8]],
        offset: usize,
        byte_count: usize,
    ) -> bool {
        check_some_shards_fallback(matrix_rows, inputs, to_check, offset, byte_count)
    }

    /// Like [`check_some_shards`](Self::check_some_shards) but allowed to use
    /// `temp_buffer` as scratch
    ///
    /// The output-outermost table variants regenerate each expected row into
    /// the scratch buffer and compare slices, which is markedly faster than
    /// the byte-at-a-time fallback. Other variants ignore the buffer.
    /// `temp_buffer` must hold at least `offset + byte_count` bytes.
    pub fn check_some_shards_with_buffer(
        self,
        matrix_rows: &[&[u8]],
        inputs: &[&[u8]],
        to_check: &[&[u8]],
        offset: usize,
        byte_count: usize,
        temp_buffer: &mut [u8],
    ) -> bool {
        match self {
            CodingLoop::OutputInputByteTable | CodingLoop::OutputByteInputTable => {
                table_loops::check_with_scratch(
                    matrix_rows,
                    inputs,
                    to_check,
                    offset,
                    byte_count,
                    temp_buffer,
                )
            }
            _ => self.check_some_shards(matrix_rows, inputs, to_check, offset, byte_count),
        }
    }
}

impl fmt::Display for CodingLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CodingLoop {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_CODING_LOOPS
            .into_iter()
            .find(|coding_loop| coding_loop.name() == s)
            .ok_or_else(|| Error::ArgumentInvalid(format!("unknown coding loop {s:?}")))
    }
}

/// Shared scratchless verification: recompute each expected byte and compare
fn check_some_shards_fallback(
    matrix_rows: &[&[u8]],
    inputs: &[&[u8]],
    to_check: &[&[u8]],
    offset: usize,
    byte_count: usize,
) -> bool {
    let mul = &galois::tables().mul;

    for i_byte in offset..offset + byte_count {
        for (i_output, expected) in to_check.iter().enumerate() {
            let row = matrix_rows[i_output];
            let mut value = 0u8;
            for (i_input, input) in inputs.iter().enumerate() {
                value ^= mul[row[i_input] as usize][input[i_byte] as usize];
            }
            if expected[i_byte] != value {
                return false;
            }
        }
    }
    true
}
