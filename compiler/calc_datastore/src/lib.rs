//! Binary key/value records.
//!
//! A record is a VLI entry count followed by that many key/value pairs,
//! each encoded with a [`StreamReadable`]/[`StreamWritable`] codec. Reading
//! a record yields an immutable [`DataStore`] which is handed to a
//! [`DataStoreWrapper`]; the wrapper replays it into its registered
//! [`DataVisitor`]s.

mod codec;
mod error;
mod registry;
mod store;
mod vli;

pub use codec::{BoolCodec, I32Codec, StreamReadable, StreamWritable, StringCodec, VliCodec};
pub use error::{DataStoreError, DataStoreResult};
pub use registry::{Factory, TagRegistry};
pub use store::{
    DataStore, DataStoreReader, DataStoreWrapper, DataStoreWriter, DataVisitor, SharedVisitor,
};
pub use vli::{read_vli, write_vli, MAX_VLI_BYTES};
