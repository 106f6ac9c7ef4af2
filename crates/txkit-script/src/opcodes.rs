//! Script opcode definitions.
//!
//! Byte constants for the script opcode vocabulary, plus the name mapping
//! used for ASM rendering and parsing. Only emission and recognition are
//! supported here; opcode semantics are out of scope for this crate.

// -- Push value --

/// Push an empty array onto the stack.
pub const OP_0: u8 = 0x00;
/// Alias of `OP_0`.
pub const OP_FALSE: u8 = 0x00;
/// Lowest direct data push opcode (the byte doubles as the push length).
pub const OP_DATA_1: u8 = 0x01;
/// Direct push of 20 bytes, the width of a public key hash.
pub const OP_DATA_20: u8 = 0x14;
/// Direct push of 32 bytes, the width of a SHA-256 digest.
pub const OP_DATA_32: u8 = 0x20;
/// Direct push of 33 bytes, the width of a compressed public key.
pub const OP_DATA_33: u8 = 0x21;
/// Direct push of 65 bytes, the width of an uncompressed public key.
pub const OP_DATA_65: u8 = 0x41;
/// Highest direct data push opcode.
pub const OP_DATA_75: u8 = 0x4b;
/// Push data with a 1-byte length prefix.
pub const OP_PUSHDATA1: u8 = 0x4c;
/// Push data with a 2-byte little-endian length prefix.
pub const OP_PUSHDATA2: u8 = 0x4d;
/// Push data with a 4-byte little-endian length prefix.
pub const OP_PUSHDATA4: u8 = 0x4e;
/// Push the number -1 onto the stack.
pub const OP_1NEGATE: u8 = 0x4f;
/// Reserved opcode.
pub const OP_RESERVED: u8 = 0x50;
/// Push the number 1 onto the stack.
pub const OP_1: u8 = 0x51;
/// Alias of `OP_1`.
pub const OP_TRUE: u8 = 0x51;
/// Push the number 2 onto the stack.
pub const OP_2: u8 = 0x52;
/// Push the number 3 onto the stack.
pub const OP_3: u8 = 0x53;
/// Push the number 4 onto the stack.
pub const OP_4: u8 = 0x54;
/// Push the number 5 onto the stack.
pub const OP_5: u8 = 0x55;
/// Push the number 6 onto the stack.
pub const OP_6: u8 = 0x56;
/// Push the number 7 onto the stack.
pub const OP_7: u8 = 0x57;
/// Push the number 8 onto the stack.
pub const OP_8: u8 = 0x58;
/// Push the number 9 onto the stack.
pub const OP_9: u8 = 0x59;
/// Push the number 10 onto the stack.
pub const OP_10: u8 = 0x5a;
/// Push the number 11 onto the stack.
pub const OP_11: u8 = 0x5b;
/// Push the number 12 onto the stack.
pub const OP_12: u8 = 0x5c;
/// Push the number 13 onto the stack.
pub const OP_13: u8 = 0x5d;
/// Push the number 14 onto the stack.
pub const OP_14: u8 = 0x5e;
/// Push the number 15 onto the stack.
pub const OP_15: u8 = 0x5f;
/// Push the number 16 onto the stack.
pub const OP_16: u8 = 0x60;

// -- Flow control --

/// Does nothing.
pub const OP_NOP: u8 = 0x61;
/// Reserved opcode.
pub const OP_VER: u8 = 0x62;
/// Conditional: execute the following statements if top of stack is true.
pub const OP_IF: u8 = 0x63;
/// Conditional: execute the following statements if top of stack is false.
pub const OP_NOTIF: u8 = 0x64;
/// Reserved conditional opcode.
pub const OP_VERIF: u8 = 0x65;
/// Reserved conditional opcode.
pub const OP_VERNOTIF: u8 = 0x66;
/// Conditional alternative branch.
pub const OP_ELSE: u8 = 0x67;
/// Conditional block terminator.
pub const OP_ENDIF: u8 = 0x68;
/// Fail unless top of stack is true.
pub const OP_VERIFY: u8 = 0x69;
/// Mark the output as unspendable; trailing bytes carry data.
pub const OP_RETURN: u8 = 0x6a;

// -- Stack --

/// Move top of main stack to alt stack.
pub const OP_TOALTSTACK: u8 = 0x6b;
/// Move top of alt stack to main stack.
pub const OP_FROMALTSTACK: u8 = 0x6c;
/// Remove the top two stack items.
pub const OP_2DROP: u8 = 0x6d;
/// Duplicate the top two stack items.
pub const OP_2DUP: u8 = 0x6e;
/// Duplicate the top three stack items.
pub const OP_3DUP: u8 = 0x6f;
/// Copy the pair of items two spaces back to the front.
pub const OP_2OVER: u8 = 0x70;
/// Move the fifth and sixth items to the top.
pub const OP_2ROT: u8 = 0x71;
/// Swap the top two pairs of items.
pub const OP_2SWAP: u8 = 0x72;
/// Duplicate top of stack if it is not zero.
pub const OP_IFDUP: u8 = 0x73;
/// Push the stack depth.
pub const OP_DEPTH: u8 = 0x74;
/// Remove the top stack item.
pub const OP_DROP: u8 = 0x75;
/// Duplicate the top stack item.
pub const OP_DUP: u8 = 0x76;
/// Remove the second-from-top stack item.
pub const OP_NIP: u8 = 0x77;
/// Copy the second-from-top stack item to the top.
pub const OP_OVER: u8 = 0x78;
/// Copy the n-th item back to the top.
pub const OP_PICK: u8 = 0x79;
/// Move the n-th item back to the top.
pub const OP_ROLL: u8 = 0x7a;
/// Rotate the top three items.
pub const OP_ROT: u8 = 0x7b;
/// Swap the top two items.
pub const OP_SWAP: u8 = 0x7c;
/// Copy the top item below the second item.
pub const OP_TUCK: u8 = 0x7d;

// -- Splice --

/// Concatenate the top two byte arrays.
pub const OP_CAT: u8 = 0x7e;
/// Split a byte array at an index.
pub const OP_SPLIT: u8 = 0x7f;
/// Convert a number to a byte array of given size.
pub const OP_NUM2BIN: u8 = 0x80;
/// Convert a byte array to a number.
pub const OP_BIN2NUM: u8 = 0x81;
/// Push the length of the top byte array.
pub const OP_SIZE: u8 = 0x82;

// -- Bitwise logic --

/// Bitwise invert.
pub const OP_INVERT: u8 = 0x83;
/// Bitwise and.
pub const OP_AND: u8 = 0x84;
/// Bitwise or.
pub const OP_OR: u8 = 0x85;
/// Bitwise xor.
pub const OP_XOR: u8 = 0x86;
/// Push 1 if the top two items are exactly equal, 0 otherwise.
pub const OP_EQUAL: u8 = 0x87;
/// `OP_EQUAL` then `OP_VERIFY`.
pub const OP_EQUALVERIFY: u8 = 0x88;
/// Reserved opcode.
pub const OP_RESERVED1: u8 = 0x89;
/// Reserved opcode.
pub const OP_RESERVED2: u8 = 0x8a;

// -- Arithmetic --

/// Add 1 to the top item.
pub const OP_1ADD: u8 = 0x8b;
/// Subtract 1 from the top item.
pub const OP_1SUB: u8 = 0x8c;
/// Multiply the top item by 2.
pub const OP_2MUL: u8 = 0x8d;
/// Divide the top item by 2.
pub const OP_2DIV: u8 = 0x8e;
/// Negate the top item.
pub const OP_NEGATE: u8 = 0x8f;
/// Absolute value of the top item.
pub const OP_ABS: u8 = 0x90;
/// Push 1 if the top item is 0, else push 0.
pub const OP_NOT: u8 = 0x91;
/// Push 0 if the top item is 0, else push 1.
pub const OP_0NOTEQUAL: u8 = 0x92;
/// Add the top two items.
pub const OP_ADD: u8 = 0x93;
/// Subtract the top item from the second item.
pub const OP_SUB: u8 = 0x94;
/// Multiply the top two items.
pub const OP_MUL: u8 = 0x95;
/// Divide the second item by the top item.
pub const OP_DIV: u8 = 0x96;
/// Remainder of dividing the second item by the top item.
pub const OP_MOD: u8 = 0x97;
/// Shift the second item left by the top item bits.
pub const OP_LSHIFT: u8 = 0x98;
/// Shift the second item right by the top item bits.
pub const OP_RSHIFT: u8 = 0x99;
/// Push 1 if both inputs are non-zero.
pub const OP_BOOLAND: u8 = 0x9a;
/// Push 1 if either input is non-zero.
pub const OP_BOOLOR: u8 = 0x9b;
/// Numeric equality.
pub const OP_NUMEQUAL: u8 = 0x9c;
/// `OP_NUMEQUAL` then `OP_VERIFY`.
pub const OP_NUMEQUALVERIFY: u8 = 0x9d;
/// Numeric inequality.
pub const OP_NUMNOTEQUAL: u8 = 0x9e;
/// Numeric less-than.
pub const OP_LESSTHAN: u8 = 0x9f;
/// Numeric greater-than.
pub const OP_GREATERTHAN: u8 = 0xa0;
/// Numeric less-than-or-equal.
pub const OP_LESSTHANOREQUAL: u8 = 0xa1;
/// Numeric greater-than-or-equal.
pub const OP_GREATERTHANOREQUAL: u8 = 0xa2;
/// Minimum of the top two items.
pub const OP_MIN: u8 = 0xa3;
/// Maximum of the top two items.
pub const OP_MAX: u8 = 0xa4;
/// Push 1 if the third item is within the range of the top two.
pub const OP_WITHIN: u8 = 0xa5;

// -- Crypto --

/// RIPEMD-160 hash of the top item.
pub const OP_RIPEMD160: u8 = 0xa6;
/// SHA-1 hash of the top item.
pub const OP_SHA1: u8 = 0xa7;
/// SHA-256 hash of the top item.
pub const OP_SHA256: u8 = 0xa8;
/// RIPEMD-160 of SHA-256 of the top item.
pub const OP_HASH160: u8 = 0xa9;
/// Double SHA-256 of the top item.
pub const OP_HASH256: u8 = 0xaa;
/// Mark the start of signature-checked data.
pub const OP_CODESEPARATOR: u8 = 0xab;
/// Check a signature against a public key.
pub const OP_CHECKSIG: u8 = 0xac;
/// `OP_CHECKSIG` then `OP_VERIFY`.
pub const OP_CHECKSIGVERIFY: u8 = 0xad;
/// Check multiple signatures against multiple public keys.
pub const OP_CHECKMULTISIG: u8 = 0xae;
/// `OP_CHECKMULTISIG` then `OP_VERIFY`.
pub const OP_CHECKMULTISIGVERIFY: u8 = 0xaf;

// -- Reserved expansion --

/// Does nothing.
pub const OP_NOP1: u8 = 0xb0;
/// Does nothing (formerly CHECKLOCKTIMEVERIFY).
pub const OP_NOP2: u8 = 0xb1;
/// Does nothing (formerly CHECKSEQUENCEVERIFY).
pub const OP_NOP3: u8 = 0xb2;
/// Does nothing.
pub const OP_NOP4: u8 = 0xb3;
/// Does nothing.
pub const OP_NOP5: u8 = 0xb4;
/// Does nothing.
pub const OP_NOP6: u8 = 0xb5;
/// Does nothing.
pub const OP_NOP7: u8 = 0xb6;
/// Does nothing.
pub const OP_NOP8: u8 = 0xb7;
/// Does nothing.
pub const OP_NOP9: u8 = 0xb8;
/// Does nothing.
pub const OP_NOP10: u8 = 0xb9;

/// Return the canonical ASM name for an opcode byte.
///
/// Direct data pushes (`OP_DATA_1`..`OP_DATA_75`) have no ASM name of
/// their own; callers render their payload as hex instead. Unassigned
/// bytes map to "OP_UNKNOWN".
///
/// # Arguments
/// * `op` - The opcode byte.
///
/// # Returns
/// The static name string.
pub fn opcode_to_string(op: u8) -> &'static str {
    match op {
        OP_0 => "OP_FALSE",
        OP_PUSHDATA1 => "OP_PUSHDATA1",
        OP_PUSHDATA2 => "OP_PUSHDATA2",
        OP_PUSHDATA4 => "OP_PUSHDATA4",
        OP_1NEGATE => "OP_1NEGATE",
        OP_RESERVED => "OP_RESERVED",
        OP_1 => "OP_1",
        OP_2 => "OP_2",
        OP_3 => "OP_3",
        OP_4 => "OP_4",
        OP_5 => "OP_5",
        OP_6 => "OP_6",
        OP_7 => "OP_7",
        OP_8 => "OP_8",
        OP_9 => "OP_9",
        OP_10 => "OP_10",
        OP_11 => "OP_11",
        OP_12 => "OP_12",
        OP_13 => "OP_13",
        OP_14 => "OP_14",
        OP_15 => "OP_15",
        OP_16 => "OP_16",
        OP_NOP => "OP_NOP",
        OP_VER => "OP_VER",
        OP_IF => "OP_IF",
        OP_NOTIF => "OP_NOTIF",
        OP_VERIF => "OP_VERIF",
        OP_VERNOTIF => "OP_VERNOTIF",
        OP_ELSE => "OP_ELSE",
        OP_ENDIF => "OP_ENDIF",
        OP_VERIFY => "OP_VERIFY",
        OP_RETURN => "OP_RETURN",
        OP_TOALTSTACK => "OP_TOALTSTACK",
        OP_FROMALTSTACK => "OP_FROMALTSTACK",
        OP_2DROP => "OP_2DROP",
        OP_2DUP => "OP_2DUP",
        OP_3DUP => "OP_3DUP",
        OP_2OVER => "OP_2OVER",
        OP_2ROT => "OP_2ROT",
        OP_2SWAP => "OP_2SWAP",
        OP_IFDUP => "OP_IFDUP",
        OP_DEPTH => "OP_DEPTH",
        OP_DROP => "OP_DROP",
        OP_DUP => "OP_DUP",
        OP_NIP => "OP_NIP",
        OP_OVER => "OP_OVER",
        OP_PICK => "OP_PICK",
        OP_ROLL => "OP_ROLL",
        OP_ROT => "OP_ROT",
        OP_SWAP => "OP_SWAP",
        OP_TUCK => "OP_TUCK",
        OP_CAT => "OP_CAT",
        OP_SPLIT => "OP_SPLIT",
        OP_NUM2BIN => "OP_NUM2BIN",
        OP_BIN2NUM => "OP_BIN2NUM",
        OP_SIZE => "OP_SIZE",
        OP_INVERT => "OP_INVERT",
        OP_AND => "OP_AND",
        OP_OR => "OP_OR",
        OP_XOR => "OP_XOR",
        OP_EQUAL => "OP_EQUAL",
        OP_EQUALVERIFY => "OP_EQUALVERIFY",
        OP_RESERVED1 => "OP_RESERVED1",
        OP_RESERVED2 => "OP_RESERVED2",
        OP_1ADD => "OP_1ADD",
        OP_1SUB => "OP_1SUB",
        OP_2MUL => "OP_2MUL",
        OP_2DIV => "OP_2DIV",
        OP_NEGATE => "OP_NEGATE",
        OP_ABS => "OP_ABS",
        OP_NOT => "OP_NOT",
        OP_0NOTEQUAL => "OP_0NOTEQUAL",
        OP_ADD => "OP_ADD",
        OP_SUB => "OP_SUB",
        OP_MUL => "OP_MUL",
        OP_DIV => "OP_DIV",
        OP_MOD => "OP_MOD",
        OP_LSHIFT => "OP_LSHIFT",
        OP_RSHIFT => "OP_RSHIFT",
        OP_BOOLAND => "OP_BOOLAND",
        OP_BOOLOR => "OP_BOOLOR",
        OP_NUMEQUAL => "OP_NUMEQUAL",
        OP_NUMEQUALVERIFY => "OP_NUMEQUALVERIFY",
        OP_NUMNOTEQUAL => "OP_NUMNOTEQUAL",
        OP_LESSTHAN => "OP_LESSTHAN",
        OP_GREATERTHAN => "OP_GREATERTHAN",
        OP_LESSTHANOREQUAL => "OP_LESSTHANOREQUAL",
        OP_GREATERTHANOREQUAL => "OP_GREATERTHANOREQUAL",
        OP_MIN => "OP_MIN",
        OP_MAX => "OP_MAX",
        OP_WITHIN => "OP_WITHIN",
        OP_RIPEMD160 => "OP_RIPEMD160",
        OP_SHA1 => "OP_SHA1",
        OP_SHA256 => "OP_SHA256",
        OP_HASH160 => "OP_HASH160",
        OP_HASH256 => "OP_HASH256",
        OP_CODESEPARATOR => "OP_CODESEPARATOR",
        OP_CHECKSIG => "OP_CHECKSIG",
        OP_CHECKSIGVERIFY => "OP_CHECKSIGVERIFY",
        OP_CHECKMULTISIG => "OP_CHECKMULTISIG",
        OP_CHECKMULTISIGVERIFY => "OP_CHECKMULTISIGVERIFY",
        OP_NOP1 => "OP_NOP1",
        OP_NOP2 => "OP_NOP2",
        OP_NOP3 => "OP_NOP3",
        OP_NOP4 => "OP_NOP4",
        OP_NOP5 => "OP_NOP5",
        OP_NOP6 => "OP_NOP6",
        OP_NOP7 => "OP_NOP7",
        OP_NOP8 => "OP_NOP8",
        OP_NOP9 => "OP_NOP9",
        OP_NOP10 => "OP_NOP10",
        _ => "OP_UNKNOWN",
    }
}

/// Parse an ASM opcode name into its byte value.
///
/// Accepts the canonical names produced by `opcode_to_string` plus the
/// common aliases `OP_0`, `OP_TRUE`, and `OP_NOP2`/`OP_NOP3` long forms.
///
/// # Arguments
/// * `name` - The opcode name, e.g. "OP_DUP".
///
/// # Returns
/// `Some(opcode)` if the name is recognized, otherwise `None`.
pub fn string_to_opcode(name: &str) -> Option<u8> {
    let op = match name {
        "OP_FALSE" | "OP_0" => OP_0,
        "OP_PUSHDATA1" => OP_PUSHDATA1,
        "OP_PUSHDATA2" => OP_PUSHDATA2,
        "OP_PUSHDATA4" => OP_PUSHDATA4,
        "OP_1NEGATE" => OP_1NEGATE,
        "OP_RESERVED" => OP_RESERVED,
        "OP_TRUE" | "OP_1" => OP_1,
        "OP_2" => OP_2,
        "OP_3" => OP_3,
        "OP_4" => OP_4,
        "OP_5" => OP_5,
        "OP_6" => OP_6,
        "OP_7" => OP_7,
        "OP_8" => OP_8,
        "OP_9" => OP_9,
        "OP_10" => OP_10,
        "OP_11" => OP_11,
        "OP_12" => OP_12,
        "OP_13" => OP_13,
        "OP_14" => OP_14,
        "OP_15" => OP_15,
        "OP_16" => OP_16,
        "OP_NOP" => OP_NOP,
        "OP_VER" => OP_VER,
        "OP_IF" => OP_IF,
        "OP_NOTIF" => OP_NOTIF,
        "OP_VERIF" => OP_VERIF,
        "OP_VERNOTIF" => OP_VERNOTIF,
        "OP_ELSE" => OP_ELSE,
        "OP_ENDIF" => OP_ENDIF,
        "OP_VERIFY" => OP_VERIFY,
        "OP_RETURN" => OP_RETURN,
        "OP_TOALTSTACK" => OP_TOALTSTACK,
        "OP_FROMALTSTACK" => OP_FROMALTSTACK,
        "OP_2DROP" => OP_2DROP,
        "OP_2DUP" => OP_2DUP,
        "OP_3DUP" => OP_3DUP,
        "OP_2OVER" => OP_2OVER,
        "OP_2ROT" => OP_2ROT,
        "OP_2SWAP" => OP_2SWAP,
        "OP_IFDUP" => OP_IFDUP,
        "OP_DEPTH" => OP_DEPTH,
        "OP_DROP" => OP_DROP,
        "OP_DUP" => OP_DUP,
        "OP_NIP" => OP_NIP,
        "OP_OVER" => OP_OVER,
        "OP_PICK" => OP_PICK,
        "OP_ROLL" => OP_ROLL,
        "OP_ROT" => OP_ROT,
        "OP_SWAP" => OP_SWAP,
        "OP_TUCK" => OP_TUCK,
        "OP_CAT" => OP_CAT,
        "OP_SPLIT" => OP_SPLIT,
        "OP_NUM2BIN" => OP_NUM2BIN,
        "OP_BIN2NUM" => OP_BIN2NUM,
        "OP_SIZE" => OP_SIZE,
        "OP_INVERT" => OP_INVERT,
        "OP_AND" => OP_AND,
        "OP_OR" => OP_OR,
        "OP_XOR" => OP_XOR,
        "OP_EQUAL" => OP_EQUAL,
        "OP_EQUALVERIFY" => OP_EQUALVERIFY,
        "OP_RESERVED1" => OP_RESERVED1,
        "OP_RESERVED2" => OP_RESERVED2,
        "OP_1ADD" => OP_1ADD,
        "OP_1SUB" => OP_1SUB,
        "OP_2MUL" => OP_2MUL,
        "OP_2DIV" => OP_2DIV,
        "OP_NEGATE" => OP_NEGATE,
        "OP_ABS" => OP_ABS,
        "OP_NOT" => OP_NOT,
        "OP_0NOTEQUAL" => OP_0NOTEQUAL,
        "OP_ADD" => OP_ADD,
        "OP_SUB" => OP_SUB,
        "OP_MUL" => OP_MUL,
        "OP_DIV" => OP_DIV,
        "OP_MOD" => OP_MOD,
        "OP_LSHIFT" => OP_LSHIFT,
        "OP_RSHIFT" => OP_RSHIFT,
        "OP_BOOLAND" => OP_BOOLAND,
        "OP_BOOLOR" => OP_BOOLOR,
        "OP_NUMEQUAL" => OP_NUMEQUAL,
        "OP_NUMEQUALVERIFY" => OP_NUMEQUALVERIFY,
        "OP_NUMNOTEQUAL" => OP_NUMNOTEQUAL,
        "OP_LESSTHAN" => OP_LESSTHAN,
        "OP_GREATERTHAN" => OP_GREATERTHAN,
        "OP_LESSTHANOREQUAL" => OP_LESSTHANOREQUAL,
        "OP_GREATERTHANOREQUAL" => OP_GREATERTHANOREQUAL,
        "OP_MIN" => OP_MIN,
        "OP_MAX" => OP_MAX,
        "OP_WITHIN" => OP_WITHIN,
        "OP_RIPEMD160" => OP_RIPEMD160,
        "OP_SHA1" => OP_SHA1,
        "OP_SHA256" => OP_SHA256,
        "OP_HASH160" => OP_HASH160,
        "OP_HASH256" => OP_HASH256,
        "OP_CODESEPARATOR" => OP_CODESEPARATOR,
        "OP_CHECKSIG" => OP_CHECKSIG,
        "OP_CHECKSIGVERIFY" => OP_CHECKSIGVERIFY,
        "OP_CHECKMULTISIG" => OP_CHECKMULTISIG,
        "OP_CHECKMULTISIGVERIFY" => OP_CHECKMULTISIGVERIFY,
        "OP_NOP1" => OP_NOP1,
        "OP_NOP2" | "OP_CHECKLOCKTIMEVERIFY" => OP_NOP2,
        "OP_NOP3" | "OP_CHECKSEQUENCEVERIFY" => OP_NOP3,
        "OP_NOP4" => OP_NOP4,
        "OP_NOP5" => OP_NOP5,
        "OP_NOP6" => OP_NOP6,
        "OP_NOP7" => OP_NOP7,
        "OP_NOP8" => OP_NOP8,
        "OP_NOP9" => OP_NOP9,
        "OP_NOP10" => OP_NOP10,
        _ => return None,
    };
    Some(op)
}
