//! Typed ABI codecs for the contract reads the router performs
//!
//! Every read the engine issues against the chain goes through one [`Codec`]
//! implementation: the codec owns the canonical function ABI, turns a typed request
//! into calldata (`selector || abi_encode(args)`) and turns the raw reply back into a
//! typed response. Byte offsets never leak past this crate.
//!
//! # Architecture
//!
//! ```text
//! libs/dex/
//! ├── abi/
//! │   ├── mod.rs        # Codec trait and word helpers
//! │   ├── quoter.rs     # quoteExactInputSingle
//! │   ├── factory.rs    # getPool
//! │   └── pool.rs       # slot0, getReserves
//! ├── error.rs          # CodecError
//! └── selectors.rs      # 4-byte selector constants
//! ```
//!
//! # Example
//!
//! ```
//! use dex::{Codec, GetPool, GetPoolParams};
//! use ethereum_types::H160;
//!
//! let calldata = GetPool::encode_request(&GetPoolParams {
//!     token_a: H160::repeat_byte(0x11),
//!     token_b: H160::repeat_byte(0x22),
//!     tick_spacing: -60,
//! })
//! .unwrap();
//! assert_eq!(&calldata[..4], &dex::selectors::GET_POOL);
//! assert_eq!(calldata.len(), 4 + 3 * 32);
//! ```

pub mod abi;
pub mod error;
pub mod selectors;

pub use abi::{
    factory::{GetPool, GetPoolParams},
    int24_from_word, int24_word,
    pool::{GetReserves, Reserves, Slot0, Slot0Reply},
    quoter::{QuoteExactInputSingle, QuoteExactInputSingleParams, QuoterReply},
    Codec, WORD_SIZE,
};
pub use error::CodecError;
