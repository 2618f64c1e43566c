pub mod document;
pub mod error;
pub mod fingerprint;
pub mod flatten;
pub mod mutation;
pub mod node;
pub mod ordering;
pub mod path;
pub mod plan;
pub mod render;
pub mod tree;
pub mod value;

pub use error::FlatexError;
pub use flatten::{FlatMap, StringTokenizer, Tokenizer};
pub use ordering::compare_labels;
pub use path::{Match, WILDCARD};
pub use plan::{Operation, Plan};
pub use tree::Tree;
pub use value::Value;
