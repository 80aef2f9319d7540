/// Reference input: a genesis-style coinbase transaction.
///
/// This literal is one byte short of the historical Litecoin genesis
/// coinbase: the text reads "Stev Jobs" (63 bytes under a 64-byte push), so
/// it hashes to [`GENESIS_TXID`] rather than [`LITECOIN_GENESIS_TXID`].
pub const GENESIS_TX_HEX: &str = concat!(
    "01000000010000000000000000000000000000000000000000000000000000000000000000",
    "ffffffff4804ffff001d0104404e592054696d65732030352f4f63742f3230313120537465",
    "76204a6f62732c204170706c65e280997320566973696f6e6172792c204469657320617420",
    "3536ffffffff0100f2052a010000004341040184710fa689ad5023690c80f3a49c8f13f8d4",
    "5b8c857fbcbc8bc4a8e4d3eb4b10f4d4604fa08dce601aaf0f470216fe1b51850b4acf21b1",
    "79c45070ac7b03a9ac00000000",
);

/// Double-SHA-256 identifier of [`GENESIS_TX_HEX`], display order.
pub const GENESIS_TXID: &str = "4ce8c5d5e857d9f37c6dc590d1263cf8c51022e3d6eedd1a440ac0625f8e7389";

/// The historical Litecoin genesis coinbase
/// ("NY Times 05/Oct/2011 Steve Jobs, Apple's Visionary, Dies at 56").
pub const LITECOIN_GENESIS_TX_HEX: &str = concat!(
    "01000000010000000000000000000000000000000000000000000000000000000000000000",
    "ffffffff4804ffff001d0104404e592054696d65732030352f4f63742f32303131205374",
    "657665204a6f62732c204170706c65e280997320566973696f6e6172792c20446965732061",
    "74203536ffffffff0100f2052a010000004341040184710fa689ad5023690c80f3a49c8f13",
    "f8d45b8c857fbcbc8bc4a8e4d3eb4b10f4d4604fa08dce601aaf0f470216fe1b51850b4acf",
    "21b179c45070ac7b03a9ac00000000",
);

/// Litecoin genesis coinbase txid (also the genesis block's merkle root).
pub const LITECOIN_GENESIS_TXID: &str =
    "97ddfbbae6be97fd6cdf3e7ca13232a3afff2353e29badfab7f73011edd4ced9";
