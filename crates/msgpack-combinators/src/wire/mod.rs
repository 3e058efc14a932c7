//! The primitive MessagePack reader and writer.
//!
//! [`Unpacker`] is the cursor every [`Decoder`](crate::Decoder) borrows and
//! [`Packer`] is the sink every [`Encoder`](crate::Encoder) writes to. Both
//! deal in single tagged values; composition lives one layer up.

pub mod constants;
mod packer;
mod tag;
mod unpacker;

pub use packer::Packer;
pub use tag::WireTag;
pub use unpacker::Unpacker;
