//! Systematic Reed-Solomon codec over GF(2^8)
//!
//! A codec for K data shards and M parity shards holds the T×K generator
//! matrix (identity on top, parity rows below), the M parity rows as
//! contiguous byte vectors for the hot path, and one selected coding loop.
//! State is read-only after construction, so one codec can be shared across
//! threads without locking as long as concurrent calls write disjoint shard
//! ranges.
//!
//! Shards are equal-length byte buffers indexed `0..K` for data and `K..K+M`
//! for parity. Every operation takes an `(offset, byte_count)` window and
//! touches nothing outside it.

use crate::coding_loop::{CodingLoop, DEFAULT_CODING_LOOP};
use crate::error::{Error, Result};
use crate::galois::FIELD_SIZE;
use crate::matrix::Matrix;

/// Reed-Solomon encoder/decoder for one (K, M) geometry
pub struct ReedSolomon {
    data_shard_count: usize,
    parity_shard_count: usize,
    total_shard_count: usize,
    matrix: Matrix,
    parity_rows: Vec<Vec<u8>>,
    coding_loop: CodingLoop,
}

impl ReedSolomon {
    /// Create a codec with the default coding loop
    pub fn new(data_shard_count: usize, parity_shard_count: usize) -> Result<Self> {
        Self::with_coding_loop(data_shard_count, parity_shard_count, DEFAULT_CODING_LOOP)
    }

    /// Create a codec with an explicit coding loop
    pub fn with_coding_loop(
        data_shard_count: usize,
        parity_shard_count: usize,
        coding_loop: CodingLoop,
    ) -> Result<Self> {
        if data_shard_count == 0 {
            return Err(Error::InvalidShape(format!(
                "at least one data shard is required, got {data_shard_count} data and \
                 {parity_shard_count} parity"
            )));
        }
        let total_shard_count = data_shard_count + parity_shard_count;
        if total_shard_count > FIELD_SIZE {
            return Err(Error::TooManyShards {
                data_shards: data_shard_count,
                parity_shards: parity_shard_count,
            });
        }

        let matrix = build_generator_matrix(data_shard_count, total_shard_count)?;
        let parity_rows = (0..parity_shard_count)
            .map(|i| matrix.get_row(data_shard_count + i))
            .collect::<Result<Vec<_>>>()?;

        Ok(ReedSolomon {
            data_shard_count,
            parity_shard_count,
            total_shard_count,
            matrix,
            parity_rows,
            coding_loop,
        })
    }

    /// Number of data shards
    #[inline]
    pub fn data_shard_count(&self) -> usize {
        self.data_shard_count
    }

    /// Number of parity shards
    #[inline]
    pub fn parity_shard_count(&self) -> usize {
        self.parity_shard_count
    }

    /// Total number of shards
    #[inline]
    pub fn total_shard_count(&self) -> usize {
        self.total_shard_count
    }

    /// The coding loop this codec dispatches to
    #[inline]
    pub fn coding_loop(&self) -> CodingLoop {
        self.coding_loop
    }

    /// The parity rows of the generator matrix
    pub fn parity_rows(&self) -> &[Vec<u8>] {
        &self.parity_rows
    }

    /// Compute the parity shards from the data shards
    ///
    /// Reads shards `0..K` and overwrites shards `K..K+M` over the window.
    /// The data shards are left byte-identical (the code is systematic).
    pub fn encode_parity(
        &self,
        shards: &mut [Vec<u8>],
        offset: usize,
        byte_count: usize,
    ) -> Result<()> {
        self.check_shards_and_window(shards, offset, byte_count)?;

        let (data, parity) = shards.split_at_mut(self.data_shard_count);
        let inputs: Vec<&[u8]> = data.iter().map(|shard| shard.as_slice()).collect();
        let mut outputs: Vec<&mut [u8]> =
            parity.iter_mut().map(|shard| shard.as_mut_slice()).collect();
        let matrix_rows: Vec<&[u8]> = self.parity_rows.iter().map(|row| row.as_slice()).collect();

        self.coding_loop
            .code_some_shards(&matrix_rows, &inputs, &mut outputs, offset, byte_count);
        Ok(())
    }

    /// Check whether the parity shards are consistent with the data shards
    pub fn is_parity_correct(
        &self,
        shards: &[Vec<u8>],
        offset: usize,
        byte_count: usize,
    ) -> Result<bool> {
        self.check_shards_and_window(shards, offset, byte_count)?;

        let inputs: Vec<&[u8]> = shards[..self.data_shard_count]
            .iter()
            .map(|shard| shard.as_slice())
            .collect();
        let to_check: Vec<&[u8]> = shards[self.data_shard_count..]
            .iter()
            .map(|shard| shard.as_slice())
            .collect();
        let matrix_rows: Vec<&[u8]> = self.parity_rows.iter().map(|row| row.as_slice()).collect();

        Ok(self
            .coding_loop
            .check_some_shards(&matrix_rows, &inputs, &to_check, offset, byte_count))
    }

    /// Like [`is_parity_correct`](Self::is_parity_correct), with a caller
    /// scratch buffer for the faster comparison path
    ///
    /// `temp_buffer` must hold at least `offset + byte_count` bytes.
    pub fn is_parity_correct_with_buffer(
        &self,
        shards: &[Vec<u8>],
        offset: usize,
        byte_count: usize,
        temp_buffer: &mut [u8],
    ) -> Result<bool> {
        self.check_shards_and_window(shards, offset, byte_count)?;
        let required = offset + byte_count;
        if temp_buffer.len() < required {
            return Err(Error::BufferTooSmall {
                length: temp_buffer.len(),
                required,
            });
        }

        let inputs: Vec<&[u8]> = shards[..self.data_shard_count]
            .iter()
            .map(|shard| shard.as_slice())
            .collect();
        let to_check: Vec<&[u8]> = shards[self.data_shard_count..]
            .iter()
            .map(|shard| shard.as_slice())
            .collect();
        let matrix_rows: Vec<&[u8]> = self.parity_rows.iter().map(|row| row.as_slice()).collect();

        Ok(self.coding_loop.check_some_shards_with_buffer(
            &matrix_rows,
            &inputs,
            &to_check,
            offset,
            byte_count,
            temp_buffer,
        ))
    }

    /// Reconstruct the missing shards in place
    ///
    /// `shard_present[i]` says whether `shards[i]` still holds its original
    /// bytes. At least K shards must be present. Missing data shards are
    /// rebuilt first from the inverted decode matrix, then missing parity is
    /// regenerated from the restored data; mixing the two into one solve is
    /// deliberately not done. With everything present this is a no-op.
    pub fn decode_missing(
        &self,
        shards: &mut [Vec<u8>],
        shard_present: &[bool],
        offset: usize,
        byte_count: usize,
    ) -> Result<()> {
        self.check_shards_and_window(shards, offset, byte_count)?;
        if shard_present.len() != self.total_shard_count {
            return Err(Error::ArgumentInvalid(format!(
                "got {} presence flags for {} shards",
                shard_present.len(),
                self.total_shard_count
            )));
        }

        let present_count = shard_present.iter().filter(|&&present| present).count();
        if present_count == self.total_shard_count {
            return Ok(());
        }
        if present_count < self.data_shard_count {
            return Err(Error::InsufficientShards {
                present: present_count,
                total: self.total_shard_count,
                required: self.data_shard_count,
            });
        }

        // The rows of the generator matrix for the first K present shards,
        // inverted, map the surviving shards back onto the original data.
        // Inversion happens before any output write, so a singular selection
        // leaves the shards untouched.
        let k = self.data_shard_count;
        let mut sub_matrix = Matrix::new(k, k)?;
        let mut sub_matrix_row = 0;
        for (matrix_row, &present) in shard_present.iter().enumerate() {
            if sub_matrix_row == k {
                break;
            }
            if present {
                for c in 0..k {
                    sub_matrix.set(sub_matrix_row, c, self.matrix.get(matrix_row, c)?)?;
                }
                sub_matrix_row += 1;
            }
        }
        let data_decode_matrix = sub_matrix.invert()?;

        // Phase one: rebuild the missing data shards from the survivors.
        {
            let mut sub_shards: Vec<&[u8]> = Vec::with_capacity(k);
            let mut matrix_rows: Vec<&[u8]> = Vec::with_capacity(self.parity_shard_count);
            let mut outputs: Vec<&mut [u8]> = Vec::with_capacity(self.parity_shard_count);

            for (i_shard, shard) in shards.iter_mut().enumerate() {
                if shard_present[i_shard] {
                    if sub_shards.len() < k {
                        sub_shards.push(shard.as_slice());
                    }
                } else if i_shard < k {
                    matrix_rows.push(data_decode_matrix.row(i_shard));
                    outputs.push(shard.as_mut_slice());
                }
            }

            if !outputs.is_empty() {
                self.coding_loop.code_some_shards(
                    &matrix_rows,
                    &sub_shards,
                    &mut outputs,
                    offset,
                    byte_count,
                );
            }
        }

        // Phase two: regenerate the missing parity from the complete data.
        {
            let (data, parity) = shards.split_at_mut(k);
            let inputs: Vec<&[u8]> = data.iter().map(|shard| shard.as_slice()).collect();
            let mut matrix_rows: Vec<&[u8]> = Vec::with_capacity(self.parity_shard_count);
            let mut outputs: Vec<&mut [u8]> = Vec::with_capacity(self.parity_shard_count);

            for (i_parity, shard) in parity.iter_mut().enumerate() {
                if !shard_present[k + i_parity] {
                    matrix_rows.push(self.parity_rows[i_parity].as_slice());
                    outputs.push(shard.as_mut_slice());
                }
            }

            if !outputs.is_empty() {
                self.coding_loop.code_some_shards(
                    &matrix_rows,
                    &inputs,
                    &mut outputs,
                    offset,
                    byte_count,
                );
            }
        }

        Ok(())
    }

    /// Shared validation run before any coding work
    fn check_shards_and_window(
        &self,
        shards: &[Vec<u8>],
        offset: usize,
        byte_count: usize,
    ) -> Result<()> {
        if shards.len() != self.total_shard_count {
            return Err(Error::ArgumentInvalid(format!(
                "got {} shards, codec needs {}",
                shards.len(),
                self.total_shard_count
            )));
        }

        let shard_length = shards[0].len();
        for (i, shard) in shards.iter().enumerate() {
            if shard.len() != shard_length {
                return Err(Error::ArgumentInvalid(format!(
                    "shard {i} has {} bytes, shard 0 has {shard_length}",
                    shard.len()
                )));
            }
        }

        let end = offset.checked_add(byte_count).ok_or_else(|| {
            Error::ArgumentInvalid(format!(
                "window {offset} + {byte_count} overflows"
            ))
        })?;
        if end > shard_length {
            return Err(Error::ArgumentInvalid(format!(
                "window {offset}..{end} exceeds shard length {shard_length}"
            )));
        }

        Ok(())
    }
}

/// Build the T×K systematic generator matrix
///
/// Start from the Vandermonde matrix (every square subset of rows is
/// invertible), then right-multiply by the inverse of its top K×K block so
/// the top of the result becomes the identity and the code systematic.
fn build_generator_matrix(data_shard_count: usize, total_shard_count: usize) -> Result<Matrix> {
    let vandermonde = Matrix::vandermonde(total_shard_count, data_shard_count)?;
    let top = vandermonde.sub_matrix(0, 0, data_shard_count, data_shard_count)?;
    vandermonde.times(&top.invert()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shard_set(data: &[&[u8]], parity_count: usize) -> Vec<Vec<u8>> {
        let length = data[0].len();
        let mut shards: Vec<Vec<u8>> = data.iter().map(|d| d.to_vec()).collect();
        shards.extend(std::iter::repeat(vec![0u8; length]).take(parity_count));
        shards
    }

    #[test]
    fn test_generator_top_is_identity() {
        let codec = ReedSolomon::new(4, 2).unwrap();
        let top = codec.matrix.sub_matrix(0, 0, 4, 4).unwrap();
        assert_eq!(top, Matrix::identity(4).unwrap());
    }

    #[test]
    fn test_parity_rows_alias_generator() {
        let codec = ReedSolomon::new(3, 2).unwrap();
        for (i, row) in codec.parity_rows().iter().enumerate() {
            assert_eq!(*row, codec.matrix.get_row(3 + i).unwrap());
        }
    }

    #[test]
    fn test_shape_validation() {
        assert!(matches!(
            ReedSolomon::new(0, 2),
            Err(Error::InvalidShape(_))
        ));
        assert!(ReedSolomon::new(128, 128).is_ok());
        assert!(matches!(
            ReedSolomon::new(129, 128),
            Err(Error::TooManyShards {
                data_shards: 129,
                parity_shards: 128,
            })
        ));
    }

    #[test]
    fn test_zero_byte_window() {
        let codec = ReedSolomon::new(2, 2).unwrap();
        let mut shards = shard_set(&[&[1, 2], &[3, 4]], 2);
        codec.encode_parity(&mut shards, 0, 0).unwrap();
        assert_eq!(shards[2], vec![0, 0]);
        assert_eq!(shards[3], vec![0, 0]);
        assert!(codec.is_parity_correct(&shards, 0, 0).unwrap());
    }

    #[test]
    fn test_window_validation() {
        let codec = ReedSolomon::new(2, 1).unwrap();
        let mut shards = shard_set(&[&[1, 2], &[3, 4]], 1);
        assert!(matches!(
            codec.encode_parity(&mut shards, 1, 2),
            Err(Error::ArgumentInvalid(_))
        ));
        assert!(matches!(
            codec.encode_parity(&mut shards, usize::MAX, 2),
            Err(Error::ArgumentInvalid(_))
        ));
    }
}
