pub(crate) mod domain;
pub(crate) mod extract;
pub(crate) mod filter;
pub(crate) mod normalize;
pub(crate) mod page;
pub(crate) mod patterns;
pub(crate) mod validate;
