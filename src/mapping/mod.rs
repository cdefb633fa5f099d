//! Page classification and redirect mapping
//!
//! Both halves are pure functions of their input: the classifier looks at a
//! page's URL and body-class markers, the redirect mapper at its URL and type.

mod classifier;
mod redirect;

pub use classifier::{classify, classify_path, StyleMarkers};
pub use redirect::RedirectMapper;
