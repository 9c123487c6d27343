//! Shared immutable resources: the path cache, images and path helpers.

mod cache;
mod image_loader;
mod paths;

pub use cache::ResourceCache;
pub use image_loader::{image_cache, load_image, load_image_or_invalid, CodecDecoder, Image, ImageDecoder};
pub use paths::{extension_lowercase, normalize_separators, resolve_relative, sanitize_name};
