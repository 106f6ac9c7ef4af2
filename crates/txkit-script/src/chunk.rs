//! Script chunk parsing and push-data encoding.
//!
//! A script chunk is either a bare opcode or a data push carrying its
//! payload bytes. This module decodes raw script bytes into structured
//! chunks and encodes push data with the correct length prefix.

use crate::opcodes::*;
use crate::ScriptError;

/// A single parsed element of a script.
///
/// Either a standalone opcode (like OP_DUP) or a push operation carrying
/// the opcode byte and the pushed data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptChunk {
    /// The opcode byte. For direct pushes (1-75 bytes), this is the length.
    pub op: u8,
    /// The data payload, if this chunk is a push operation.
    pub data: Option<Vec<u8>>,
}

impl ScriptChunk {
    /// Convert this chunk to its ASM string representation.
    ///
    /// Data pushes render as hex; bare opcodes render by name.
    ///
    /// # Returns
    /// A token suitable for space-separated ASM output.
    pub fn to_asm_string(&self) -> String {
        if self.op > OP_0 && self.op <= OP_PUSHDATA4 {
            if let Some(ref data) = self.data {
                return hex::encode(data);
            }
        }
        opcode_to_string(self.op).to_string()
    }
}

/// Decode raw script bytes into a vector of `ScriptChunk` values.
///
/// Direct pushes (1-75) and OP_PUSHDATA1/2/4 carry their payload; a
/// top-level OP_RETURN consumes the remainder of the script as data.
/// Inside an OP_IF/OP_ENDIF block OP_RETURN is treated as a plain opcode,
/// since the trailing bytes may still be executable.
///
/// # Arguments
/// * `bytes` - The raw script bytes to decode.
///
/// # Returns
/// The parsed chunks, or `DataTooSmall` if a push runs past the end.
pub fn decode_script(bytes: &[u8]) -> Result<Vec<ScriptChunk>, ScriptError> {
    let mut chunks = Vec::new();
    let mut pos = 0;
    let mut conditional_depth: i32 = 0;

    while pos < bytes.len() {
        let op = bytes[pos];
        match op {
            OP_IF | OP_NOTIF | OP_VERIF | OP_VERNOTIF => {
                conditional_depth += 1;
                chunks.push(ScriptChunk { op, data: None });
                pos += 1;
            }
            OP_ENDIF => {
                conditional_depth -= 1;
                chunks.push(ScriptChunk { op, data: None });
                pos += 1;
            }
            OP_RETURN if conditional_depth == 0 => {
                // The rest of the script is data attached to OP_RETURN.
                chunks.push(ScriptChunk {
                    op,
                    data: Some(bytes[pos..].to_vec()),
                });
                pos = bytes.len();
            }
            OP_PUSHDATA1 | OP_PUSHDATA2 | OP_PUSHDATA4 => {
                let width = match op {
                    OP_PUSHDATA1 => 1,
                    OP_PUSHDATA2 => 2,
                    _ => 4,
                };
                let (data, next) = read_push(bytes, pos + 1, width)?;
                chunks.push(ScriptChunk { op, data: Some(data) });
                pos = next;
            }
            OP_DATA_1..=OP_DATA_75 => {
                // The opcode byte is the number of bytes to push.
                let length = op as usize;
                let data = bytes
                    .get(pos + 1..pos + 1 + length)
                    .ok_or(ScriptError::DataTooSmall)?;
                chunks.push(ScriptChunk {
                    op,
                    data: Some(data.to_vec()),
                });
                pos += 1 + length;
            }
            _ => {
                chunks.push(ScriptChunk { op, data: None });
                pos += 1;
            }
        }
    }

    Ok(chunks)
}

/// Read an OP_PUSHDATA payload whose little-endian length field occupies
/// `width` bytes starting at `at`.
///
/// # Returns
/// The payload and the position just past it, or `DataTooSmall` if either
/// the length field or the payload runs past the end of the script.
fn read_push(bytes: &[u8], at: usize, width: usize) -> Result<(Vec<u8>, usize), ScriptError> {
    let len_bytes = bytes.get(at..at + width).ok_or(ScriptError::DataTooSmall)?;
    let length = len_bytes
        .iter()
        .enumerate()
        .fold(0usize, |acc, (i, &b)| acc | (b as usize) << (8 * i));

    let start = at + width;
    let data = bytes
        .get(start..start + length)
        .ok_or(ScriptError::DataTooSmall)?;
    Ok((data.to_vec(), start + length))
}

/// Compute the push prefix bytes for a data payload of the given length.
///
/// Selects the minimal encoding: the bare length byte up to 75 bytes,
/// then OP_PUSHDATA1/2/4 with a 1/2/4-byte little-endian length field.
///
/// # Arguments
/// * `data_len` - The length of the data to be pushed.
///
/// # Returns
/// The prefix bytes, or `DataTooBig` if the length exceeds the 4-byte
/// push limit.
pub fn push_data_prefix(data_len: usize) -> Result<Vec<u8>, ScriptError> {
    if data_len <= 75 {
        Ok(vec![data_len as u8])
    } else if data_len <= 0xFF {
        Ok(vec![OP_PUSHDATA1, data_len as u8])
    } else if data_len <= 0xFFFF {
        let mut buf = vec![OP_PUSHDATA2];
        buf.extend_from_slice(&(data_len as u16).to_le_bytes());
        Ok(buf)
    } else if data_len <= 0xFFFF_FFFF {
        let mut buf = vec![OP_PUSHDATA4];
        buf.extend_from_slice(&(data_len as u32).to_le_bytes());
        Ok(buf)
    } else {
        Err(ScriptError::DataTooBig)
    }
}

/// Encode multiple payloads into a single byte vector, one push each.
///
/// Elements are encoded in order; the whole encoding fails on the first
/// part that is too large, producing no partial output.
///
/// # Arguments
/// * `parts` - Slice of data byte slices to encode.
///
/// # Returns
/// All pushes concatenated, or `PartTooBig(i)` naming the offending part.
pub fn encode_push_datas(parts: &[&[u8]]) -> Result<Vec<u8>, ScriptError> {
    let mut result = Vec::new();
    for (i, part) in parts.iter().enumerate() {
        let prefix = push_data_prefix(part.len()).map_err(|_| ScriptError::PartTooBig(i))?;
        result.extend_from_slice(&prefix);
        result.extend_from_slice(part);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- decode_script --

    #[test]
    fn test_decode_script_simple() {
        let bytes = hex::decode("05000102030401FF02ABCD").expect("valid hex");
        let parts = decode_script(&bytes).expect("should decode");
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].data.as_deref(), Some(&[0x00, 0x01, 0x02, 0x03, 0x04][..]));
        assert_eq!(parts[1].data.as_deref(), Some(&[0xFF][..]));
        assert_eq!(parts[2].data.as_deref(), Some(&[0xAB, 0xCD][..]));
    }

    #[test]
    fn test_decode_script_empty() {
        let parts = decode_script(&[]).expect("should decode");
        assert!(parts.is_empty());
    }

    /// Decode then re-encode a script made purely of pushes.
    #[test]
    fn test_decode_encode_roundtrip() {
        let script_hex = "05000102030401FF02ABCD";
        let bytes = hex::decode(script_hex).expect("valid hex");
        let parts = decode_script(&bytes).expect("should decode");

        let data_parts: Vec<&[u8]> = parts.iter().filter_map(|p| p.data.as_deref()).collect();
        let encoded = encode_push_datas(&data_parts).expect("should encode");
        assert_eq!(hex::encode(&encoded), script_hex.to_lowercase());
    }

    #[test]
    fn test_decode_script_op_return_consumes_rest() {
        let bytes = hex::decode("006a02686903686f77").expect("valid hex");
        let parts = decode_script(&bytes).expect("should decode");
        // OP_FALSE, then OP_RETURN holding everything that follows.
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].op, OP_FALSE);
        assert_eq!(parts[1].op, OP_RETURN);
        assert!(parts[1].data.is_some());
    }

    #[test]
    fn test_decode_script_op_return_inside_conditional() {
        let bytes = [OP_IF, OP_RETURN, OP_ENDIF, OP_1];
        let parts = decode_script(&bytes).expect("should decode");
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[1].op, OP_RETURN);
        assert!(parts[1].data.is_none());
    }

    // -- decode_script truncation --

    #[test]
    fn test_decode_script_truncated_direct_push() {
        // 0x05 says "push 5 bytes" but only 3 follow
        let bytes = hex::decode("05000000").expect("valid hex");
        assert!(decode_script(&bytes).is_err());
    }

    #[test]
    fn test_decode_script_truncated_pushdata1() {
        // OP_PUSHDATA1 claims 5 bytes but only 4 follow
        let bytes = hex::decode("4c05000000").expect("valid hex");
        assert!(decode_script(&bytes).is_err());
    }

    #[test]
    fn test_decode_script_pushdata_missing_length() {
        assert!(decode_script(&[OP_PUSHDATA1]).is_err());
        assert!(decode_script(&[OP_PUSHDATA2]).is_err());
        assert!(decode_script(&[OP_PUSHDATA2, 0x01]).is_err());
        assert!(decode_script(&[OP_PUSHDATA4]).is_err());
        assert!(decode_script(&[OP_PUSHDATA4, 0x01, 0x00]).is_err());
    }

    #[test]
    fn test_decode_script_pushdata1_valid() {
        let data = b"testing";
        let mut script_bytes = vec![OP_PUSHDATA1, data.len() as u8];
        script_bytes.extend_from_slice(data);
        let parts = decode_script(&script_bytes).expect("should decode");
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].op, OP_PUSHDATA1);
        assert_eq!(parts[0].data.as_deref(), Some(&data[..]));
    }

    #[test]
    fn test_decode_script_pushdata2_valid() {
        let data = vec![0xEE; 300];
        let mut script_bytes = vec![OP_PUSHDATA2, 0x2c, 0x01]; // 300 LE
        script_bytes.extend_from_slice(&data);
        let parts = decode_script(&script_bytes).expect("should decode");
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].data.as_deref(), Some(&data[..]));
    }

    // -- push_data_prefix boundaries --

    #[test]
    fn test_push_data_prefix_direct() {
        assert_eq!(push_data_prefix(20).unwrap(), vec![20u8]);
        assert_eq!(push_data_prefix(75).unwrap(), vec![75u8]);
    }

    #[test]
    fn test_push_data_prefix_pushdata1() {
        assert_eq!(push_data_prefix(76).unwrap(), vec![OP_PUSHDATA1, 76]);
        assert_eq!(push_data_prefix(255).unwrap(), vec![OP_PUSHDATA1, 255]);
    }

    #[test]
    fn test_push_data_prefix_pushdata2() {
        assert_eq!(push_data_prefix(256).unwrap(), vec![OP_PUSHDATA2, 0x00, 0x01]);
        assert_eq!(push_data_prefix(65535).unwrap(), vec![OP_PUSHDATA2, 0xFF, 0xFF]);
    }

    #[test]
    fn test_push_data_prefix_pushdata4() {
        assert_eq!(
            push_data_prefix(65536).unwrap(),
            vec![OP_PUSHDATA4, 0x00, 0x00, 0x01, 0x00]
        );
    }

    // -- encode_push_datas --

    #[test]
    fn test_encode_push_datas_multiple() {
        let parts: Vec<&[u8]> = vec![b"hello", b"world"];
        let encoded = encode_push_datas(&parts).expect("should encode");
        let expected = hex::decode("0568656c6c6f05776f726c64").expect("valid hex");
        assert_eq!(encoded, expected);
    }

    #[test]
    fn test_encode_push_datas_empty() {
        let parts: Vec<&[u8]> = vec![];
        let encoded = encode_push_datas(&parts).expect("should encode");
        assert!(encoded.is_empty());
    }

    // -- ScriptChunk::to_asm_string --

    #[test]
    fn test_chunk_to_asm_string_data() {
        let chunk = ScriptChunk {
            op: OP_DATA_20,
            data: Some(vec![0xAB; 20]),
        };
        assert_eq!(chunk.to_asm_string(), "ab".repeat(20));
    }

    #[test]
    fn test_chunk_to_asm_string_opcode() {
        let chunk = ScriptChunk {
            op: OP_DUP,
            data: None,
        };
        assert_eq!(chunk.to_asm_string(), "OP_DUP");
    }
}
