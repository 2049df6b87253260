//! Fuzz target for the Cosmos transaction decoder.
//!
//! Feeds arbitrary bytes to the decoder and to sender extraction on every
//! built-in chain.
//!
//! # Running
//!
//! ```bash
//! cargo +nightly fuzz run tx_decoder
//! ```
//!
//! Interesting inputs are stored in `fuzz/corpus/tx_decoder/`.

#![no_main]

use libfuzzer_sys::fuzz_target;
use recipe_chain::{chains, CosmosMessage, TxDecoder};

fuzz_target!(|data: &[u8]| {
    let Ok(decoded) = TxDecoder::new().decode(data) else {
        return;
    };

    let _ = decoded.signatures();
    let Ok(any) = decoded.single_message() else {
        return;
    };
    let Ok(descriptors) = chains::all() else {
        return;
    };

    for descriptor in descriptors {
        let Ok(kind) = descriptor.registry().lookup(&any.type_url) else {
            continue;
        };
        let Ok(message) = CosmosMessage::unpack(kind, any) else {
            continue;
        };

        let _ = message.recipient();
        let _ = message.amount();
        let _ = message.denom();
        let _ = message.from_asset();
        let _ = message.deposit_memo();

        if let Ok(sender) = descriptor.extract_sender(&message) {
            assert!(!sender.is_empty(), "extracted sender must not be empty");
        }
    }
});
