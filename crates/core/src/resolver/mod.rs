pub mod gvk;

pub use gvk::{KUBERNETES_GVK_EXTENSION, Resolution, extension_entries, resolve};
