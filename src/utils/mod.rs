pub mod decode;
pub mod queue;

pub use decode::decode;
pub use decode::decode_map;
pub use decode::decode_slice;
pub use decode::type_name;
pub use decode::weak;
pub use queue::Queue;
