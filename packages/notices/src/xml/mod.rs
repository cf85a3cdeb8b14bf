//! XML helpers shared by the response parser.

mod utils;

pub use utils::{element_children, elements_named, get_tag_name, has_tag, text_content};
