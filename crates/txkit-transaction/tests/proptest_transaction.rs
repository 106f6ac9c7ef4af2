use proptest::prelude::*;

use txkit_primitives::util::ByteReader;
use txkit_script::Script;
use txkit_transaction::{Input, Output, Transaction};

/// Strategy to generate a random input.
fn arb_input() -> impl Strategy<Value = Input> {
    (
        prop::array::uniform32(any::<u8>()),
        any::<u32>(),
        prop::collection::vec(any::<u8>(), 0..64),
        any::<u32>(),
    )
        .prop_map(|(txid, vout, script_bytes, sequence)| {
            let mut input = Input::new();
            input.previous_tx_id = txid;
            input.previous_tx_out_index = vout;
            input.unlocking_script = Script::from_bytes(&script_bytes);
            input.sequence_number = sequence;
            input
        })
}

/// Strategy to generate a random output.
fn arb_output() -> impl Strategy<Value = Output> {
    (any::<u64>(), prop::collection::vec(any::<u8>(), 0..64)).prop_map(
        |(satoshis, script_bytes)| Output {
            satoshis,
            locking_script: Script::from_bytes(&script_bytes),
        },
    )
}

/// Strategy to generate a valid random transaction, including the empty
/// 0-input 0-output case.
fn arb_transaction() -> impl Strategy<Value = Transaction> {
    (
        any::<u32>(),
        prop::collection::vec(arb_input(), 0..4),
        prop::collection::vec(arb_output(), 0..4),
        any::<u32>(),
    )
        .prop_map(|(version, inputs, outputs, lock_time)| {
            let mut tx = Transaction::new();
            tx.version = version;
            tx.lock_time = lock_time;
            for input in inputs {
                tx.add_input(input);
            }
            for output in outputs {
                tx.add_output(output);
            }
            tx
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn transaction_serialize_deserialize_roundtrip(tx in arb_transaction()) {
        let bytes = tx.to_bytes();
        let tx2 = Transaction::from_bytes(&bytes).unwrap();
        prop_assert_eq!(tx2.version, tx.version);
        prop_assert_eq!(tx2.lock_time, tx.lock_time);
        prop_assert_eq!(tx2.input_count(), tx.input_count());
        prop_assert_eq!(tx2.output_count(), tx.output_count());
        prop_assert_eq!(tx2.to_bytes(), bytes);
    }

    #[test]
    fn transaction_hex_roundtrip(tx in arb_transaction()) {
        let hex_str = tx.to_hex();
        let tx2 = Transaction::from_hex(&hex_str).unwrap();
        prop_assert_eq!(tx2.to_hex(), hex_str);
    }

    #[test]
    fn transaction_id_is_stable(tx in arb_transaction()) {
        prop_assert_eq!(tx.tx_id(), tx.tx_id());
        prop_assert_eq!(hex::encode(tx.tx_id()), tx.tx_id_hex());
    }

    #[test]
    fn output_roundtrip(output in arb_output()) {
        let bytes = output.to_bytes();
        let mut reader = ByteReader::new(&bytes);
        let decoded = Output::read_from(&mut reader).unwrap();
        prop_assert_eq!(decoded.satoshis, output.satoshis);
        prop_assert_eq!(decoded.locking_script.as_bytes(), output.locking_script.as_bytes());
        prop_assert_eq!(reader.position(), bytes.len());
    }

    #[test]
    fn input_roundtrip(input in arb_input()) {
        let bytes = input.to_bytes();
        let mut reader = ByteReader::new(&bytes);
        let decoded = Input::read_from(&mut reader).unwrap();
        prop_assert_eq!(decoded.previous_tx_id, input.previous_tx_id);
        prop_assert_eq!(decoded.previous_tx_out_index, input.previous_tx_out_index);
        prop_assert_eq!(decoded.unlocking_script.as_bytes(), input.unlocking_script.as_bytes());
        prop_assert_eq!(decoded.sequence_number, input.sequence_number);
        prop_assert_eq!(reader.position(), bytes.len());
    }

    /// Any truncation of a valid encoding must fail, never read out of
    /// bounds or return a partial transaction.
    #[test]
    fn truncated_transaction_never_decodes(tx in arb_transaction(), frac in 0.0f64..1.0) {
        let bytes = tx.to_bytes();
        let cut = ((bytes.len() as f64) * frac) as usize;
        prop_assume!(cut < bytes.len());
        prop_assert!(Transaction::from_bytes(&bytes[..cut]).is_err());
    }
}
