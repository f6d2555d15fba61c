pub(crate) mod bitmap;
pub(crate) mod builtin;
pub(crate) mod decode;
pub(crate) mod loader;
